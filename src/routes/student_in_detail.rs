use crate::{
    data::IdForm,
    error::{MissingStudentSnafu, RosterResult},
    maud_conveniences::title,
    state::SortingHatState,
};
use axum::extract::{Query, State};
use maud::{Markup, html};
use snafu::OptionExt;
use uuid::Uuid;

pub async fn internal_get_student(
    State(state): State<SortingHatState>,
    Query(IdForm { id }): Query<IdForm>,
) -> RosterResult<Markup> {
    student_detail(&state, id).await
}

pub async fn student_detail(state: &SortingHatState, id: Uuid) -> RosterResult<Markup> {
    let roster = state.roster().await;
    let student = roster.find(id).context(MissingStudentSnafu { id })?;
    let expelled = roster.is_expelled(id);
    let portrait = format!(
        "{}/{}",
        state.config().source_config().asset_root(),
        student.image_file
    );

    Ok(html! {
        div hx-get="/internal/get_student" hx-trigger="sse:roster" hx-vals={"{\"id\": \"" (id) "\"}"} class="container mx-auto" {
            (title(student.clone()))

            div class="rounded-lg shadow-md overflow-hidden bg-gray-800 max-w-md mx-auto" {
                div class="p-4 flex flex-row space-x-4" {
                    img src=(portrait) alt={"Portrait of " (student.first_name) " " (student.last_name)} class="w-32 h-40 object-cover rounded";
                    div {
                        (field("First name", &student.first_name))
                        (field("Middle name", &student.middle_name))
                        (field("Nickname", &student.nick_name))
                        (field("Last name", &student.last_name))
                        (field("Gender", student.gender.as_str()))
                        (field("House", student.house.name()))
                        (field("Blood status", student.blood_status.as_str()))
                        (field("Responsibilities", student.responsibilities()))

                        @if expelled {
                            p class="text-red-400 font-semibold pt-2" {"Expelled"}
                        }
                    }
                }

                @if !expelled {
                    div class="p-4 flex flex-row flex-wrap gap-2" {
                        button class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded" hx-post="/internal/student/prefect" hx-vals={"{\"id\": \"" (id) "\"}"} hx-target="#in_focus" {
                            @if student.prefect { "Remove prefect" } @else { "Make prefect" }
                        }
                        button class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded" hx-post="/internal/student/inquisitorial" hx-vals={"{\"id\": \"" (id) "\"}"} hx-target="#in_focus" {
                            @if student.inquisitorial { "Remove from Inquisitorial Squad" } @else { "Join Inquisitorial Squad" }
                        }
                        button class="bg-red-600 hover:bg-red-800 font-bold py-2 px-4 rounded" hx-post="/internal/student/expel" hx-vals={"{\"id\": \"" (id) "\"}"} hx-target="#in_focus" {
                            "Expel"
                        }
                    }
                }
            }
        }
    })
}

fn field(label: &'static str, value: &str) -> Markup {
    html! {
        p class="text-gray-200 font-semibold" {
            (label) ": "
            span class="font-medium" {(value)}
        }
    }
}
