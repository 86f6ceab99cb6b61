use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use uuid::Uuid;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Error fetching {}", what))]
    FetchRoster {
        source: reqwest::Error,
        what: &'static str,
    },
    #[snafu(display("Error decoding {}", what))]
    DecodeRoster {
        source: reqwest::Error,
        what: &'static str,
    },
    #[snafu(display("Unable to find student with UUID: {}", id))]
    MissingStudent { id: Uuid },
    #[snafu(display("Unknown filter {:?}", got))]
    UnknownFilter { got: String },
    #[snafu(display("Unknown sort key {:?}", got))]
    UnknownSortKey { got: String },
    #[snafu(display("Unknown sort direction {:?}", got))]
    UnknownSortDir { got: String },
    #[snafu(display("{} {} has already been expelled", first_name, last_name))]
    AlreadyExpelled {
        first_name: String,
        last_name: String,
    },
    #[snafu(display("{} {} cannot be expelled", first_name, last_name))]
    ExpulsionExempt {
        first_name: String,
        last_name: String,
    },
    #[snafu(display(
        "{} {} is a {} {}, and is not eligible for the Inquisitorial Squad!",
        first_name,
        last_name,
        blood_status,
        gender
    ))]
    NotPureBlood {
        first_name: String,
        last_name: String,
        blood_status: String,
        gender: String,
    },
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const NA: StatusCode = StatusCode::FORBIDDEN; //not allowed
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input
        const CF: StatusCode = StatusCode::CONFLICT; //conflicting state

        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Sorting Hat Error"}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::BadEnvVar { .. } => ISE,
            Self::FetchRoster { .. } | Self::DecodeRoster { .. } => ISE,
            Self::MissingStudent { .. } => NF,
            Self::UnknownFilter { .. }
            | Self::UnknownSortKey { .. }
            | Self::UnknownSortDir { .. } => BI,
            Self::AlreadyExpelled { .. } => CF,
            Self::ExpulsionExempt { .. } | Self::NotPureBlood { .. } => NA,
        };

        error!(?self, "Error!");
        (status_code, Html(basic_error(self.to_string()))).into_response()
    }
}
