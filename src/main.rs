#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    config::RuntimeConfiguration,
    data::roster::Roster,
    routes::{
        actions::{post_expel, post_replace_prefect, post_toggle_inquisitorial, post_toggle_prefect},
        index::get_index_route,
        roster::{
            internal_get_roster, internal_set_filter, internal_set_search, internal_set_sort,
            post_reroll_blood,
        },
        sse::sse_feed,
        student_in_detail::internal_get_student,
    },
    state::SortingHatState,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::env;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod config;
mod data;
mod error;
mod fetch;
mod maud_conveniences;
mod query;
mod routes;
mod state;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().expect("unable to load env vars");

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");

    let config = RuntimeConfiguration::new().expect("unable to create config");
    let client = fetch::build_client();
    let students = fetch::load_roster(&client, &config)
        .await
        .expect("unable to load student roster");
    let state = SortingHatState::new(Roster::new(students), config);

    let trace_layer = TraceLayer::new_for_http();

    let app = Router::new()
        .route("/", get(get_index_route))
        .route("/internal/get_roster", get(internal_get_roster))
        .route("/internal/roster/filter", get(internal_set_filter))
        .route("/internal/roster/sort", get(internal_set_sort))
        .route("/internal/roster/search", get(internal_set_search))
        .route("/internal/roster/reroll", post(post_reroll_blood))
        .route("/internal/get_student", get(internal_get_student))
        .route("/internal/student/prefect", post(post_toggle_prefect))
        .route(
            "/internal/student/replace_prefect",
            post(post_replace_prefect),
        )
        .route(
            "/internal/student/inquisitorial",
            post(post_toggle_inquisitorial),
        )
        .route("/internal/student/expel", post(post_expel))
        .route("/sse_feed", get(sse_feed))
        .layer(trace_layer)
        .with_state(state);

    let server_ip = env::var("SORTINGHAT_SERVER_IP").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = TcpListener::bind(&server_ip)
        .await
        .expect("unable to listen on server ip");

    info!(?server_ip, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("unable to serve app");
}
