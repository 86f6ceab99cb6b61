use crate::{
    error::RosterResult,
    maud_conveniences::{escape, render_table},
    query::{self, Filter, SortDir, SortKey, Summary},
    routes::sse::SseEvent,
    state::SortingHatState,
};
use axum::extract::{Query, State};
use maud::{Markup, html};
use rand::rng;
use serde::Deserialize;

pub async fn internal_get_roster(State(state): State<SortingHatState>) -> Markup {
    render_list(&state).await
}

async fn render_list(state: &SortingHatState) -> Markup {
    let roster = state.roster().await;
    let list = query::build_list(&roster);
    let summary = query::summarize(&roster);

    let heading = match &roster.settings.filter_by {
        Filter::Expelled => "Expelled Students",
        _ => "Students",
    };

    let rows = list
        .iter()
        .map(|student| {
            [
                html! {
                    a hx-get="/internal/get_student" hx-target="#in_focus" hx-vals={"{\"id\": \"" (student.id) "\"}"} class="hover:text-blue-600 underline" {
                        (escape(&student.first_name))
                    }
                },
                escape(&student.last_name),
                escape(student.house.name()),
                escape(student.responsibilities()),
            ]
        })
        .collect();

    html! {
        div hx-get="/internal/get_roster" hx-trigger="sse:roster" class="container mx-auto flex flex-col space-y-4" {
            (render_table(heading, ["First Name", "Last Name", "House", "Responsibilities"], rows))
            (summary_line(&summary))
        }
    }
}

fn summary_line(summary: &Summary) -> Markup {
    html! {
        p class="text-gray-400 text-sm" {
            "Students: " (summary.total)
            " · Gryffindor: " (summary.gryffindor)
            " · Hufflepuff: " (summary.hufflepuff)
            " · Ravenclaw: " (summary.ravenclaw)
            " · Slytherin: " (summary.slytherin)
            " · Expelled: " (summary.expelled)
        }
    }
}

#[derive(Deserialize)]
pub struct FilterForm {
    filter: String,
}

pub async fn internal_set_filter(
    State(state): State<SortingHatState>,
    Query(FilterForm { filter }): Query<FilterForm>,
) -> RosterResult<Markup> {
    let filter = filter.parse::<Filter>()?;
    info!(?filter, "Filter selected");

    {
        let mut roster = state.roster_mut().await;
        roster.settings.filter_by = filter;
    }

    Ok(render_list(&state).await)
}

#[derive(Deserialize)]
pub struct SortForm {
    sort: String,
    dir: Option<String>,
}

pub async fn internal_set_sort(
    State(state): State<SortingHatState>,
    Query(SortForm { sort, dir }): Query<SortForm>,
) -> RosterResult<Markup> {
    let sort = sort.parse::<SortKey>()?;
    let dir = dir.map(|dir| dir.parse::<SortDir>()).transpose()?;

    {
        let mut roster = state.roster_mut().await;
        let settings = &mut roster.settings;
        // Re-selecting the active key flips the direction, like clicking a
        // column header twice.
        settings.sort_dir = dir.unwrap_or(if settings.sort_by == sort {
            settings.sort_dir.flipped()
        } else {
            SortDir::Asc
        });
        settings.sort_by = sort;
    }

    Ok(render_list(&state).await)
}

#[derive(Deserialize)]
pub struct SearchForm {
    search: String,
}

pub async fn internal_set_search(
    State(state): State<SortingHatState>,
    Query(SearchForm { search }): Query<SearchForm>,
) -> Markup {
    {
        let mut roster = state.roster_mut().await;
        roster.settings.search_by = search;
    }

    render_list(&state).await
}

pub async fn post_reroll_blood(State(state): State<SortingHatState>) -> Markup {
    {
        let mut roster = state.roster_mut().await;
        roster.reroll_blood_statuses(&mut rng());
    }
    warn!("All blood statuses re-rolled");
    state.send_sse_event(SseEvent::Roster);

    render_list(&state).await
}
