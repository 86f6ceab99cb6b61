use crate::{
    data::{IdForm, roster::PrefectOutcome},
    error::{MissingStudentSnafu, RosterResult},
    maud_conveniences::subtitle,
    routes::{sse::SseEvent, student_in_detail::student_detail},
    state::SortingHatState,
};
use axum::{Form, extract::State};
use maud::{Markup, html};
use serde::Deserialize;
use snafu::OptionExt;
use uuid::Uuid;

pub async fn post_toggle_prefect(
    State(state): State<SortingHatState>,
    Form(IdForm { id }): Form<IdForm>,
) -> RosterResult<Markup> {
    let outcome = state.roster_mut().await.toggle_prefect(id)?;

    match outcome {
        PrefectOutcome::NeedsConfirmation { incumbent } => {
            remove_other_prefect_dialog(&state, incumbent, id).await
        }
        outcome => {
            info!(%id, ?outcome, "Prefect toggled");
            state.send_sse_event(SseEvent::Roster);
            student_detail(&state, id).await
        }
    }
}

async fn remove_other_prefect_dialog(
    state: &SortingHatState,
    incumbent: Uuid,
    target: Uuid,
) -> RosterResult<Markup> {
    let roster = state.roster().await;
    let sitting = roster
        .find(incumbent)
        .context(MissingStudentSnafu { id: incumbent })?;
    let nominee = roster.find(target).context(MissingStudentSnafu { id: target })?;

    Ok(html! {
        div class="rounded-lg shadow-md overflow-hidden bg-gray-800 max-w-md mx-auto p-4" {
            (subtitle("Remove the other prefect?"))

            p class="text-gray-200" {
                (sitting.full_name()) " is already a prefect for " (sitting.house.name()) " (" (sitting.gender.as_str()) "). Appointing " (nominee.full_name()) " will remove them."
            }

            div class="flex flex-row space-x-4 pt-4" {
                button class="bg-red-600 hover:bg-red-800 font-bold py-2 px-4 rounded" hx-post="/internal/student/replace_prefect" hx-vals={"{\"id\": \"" (target) "\", \"incumbent\": \"" (incumbent) "\"}"} hx-target="#in_focus" {
                    "Remove " (sitting.full_name())
                }
                button class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" hx-get="/internal/get_student" hx-vals={"{\"id\": \"" (target) "\"}"} hx-target="#in_focus" {
                    "Keep " (sitting.full_name())
                }
            }
        }
    })
}

#[derive(Deserialize)]
pub struct ReplacePrefectForm {
    pub id: Uuid,
    pub incumbent: Uuid,
}

pub async fn post_replace_prefect(
    State(state): State<SortingHatState>,
    Form(ReplacePrefectForm { id, incumbent }): Form<ReplacePrefectForm>,
) -> RosterResult<Markup> {
    state.roster_mut().await.replace_prefect(incumbent, id)?;
    info!(%id, %incumbent, "Prefect replaced");
    state.send_sse_event(SseEvent::Roster);

    student_detail(&state, id).await
}

pub async fn post_toggle_inquisitorial(
    State(state): State<SortingHatState>,
    Form(IdForm { id }): Form<IdForm>,
) -> RosterResult<Markup> {
    state.roster_mut().await.toggle_inquisitorial(id)?;
    info!(%id, "Inquisitorial membership toggled");
    state.send_sse_event(SseEvent::Roster);

    student_detail(&state, id).await
}

pub async fn post_expel(
    State(state): State<SortingHatState>,
    Form(IdForm { id }): Form<IdForm>,
) -> RosterResult<Markup> {
    state.roster_mut().await.expel(id)?;
    info!(%id, "Student expelled");
    state.send_sse_event(SseEvent::Roster);

    student_detail(&state, id).await
}
