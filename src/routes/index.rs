use crate::{maud_conveniences::title, state::SortingHatState};
use axum::extract::State;
use maud::{Markup, html};

const FILTERS: [(&str, &str); 12] = [
    ("*", "All"),
    ("gryffindor", "Gryffindor"),
    ("hufflepuff", "Hufflepuff"),
    ("ravenclaw", "Ravenclaw"),
    ("slytherin", "Slytherin"),
    ("witch", "Witches"),
    ("wizard", "Wizards"),
    ("prefect", "Prefects"),
    ("inquisitorial", "Inquisitorial Squad"),
    ("pure blood", "Pure blood"),
    ("half blood", "Half blood"),
    ("muggle born", "Muggle born"),
];

const SORTS: [(&str, &str); 6] = [
    ("first_name", "First Name"),
    ("last_name", "Last Name"),
    ("house", "House"),
    ("gender", "Gender"),
    ("blood_status", "Blood Status"),
    ("responsibilities", "Responsibilities"),
];

pub async fn get_index_route(State(state): State<SortingHatState>) -> Markup {
    state.render(html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-6xl w-full flex flex-col space-y-4" {
            (title("The Sorting Hat"))

            div class="flex flex-row flex-wrap gap-2" {
                @for (token, label) in FILTERS {
                    button class="bg-slate-600 hover:bg-slate-800 font-bold py-1 px-3 rounded" hx-get="/internal/roster/filter" hx-vals={"{\"filter\": \"" (token) "\"}"} hx-target="#roster" {
                        (label)
                    }
                }
                button class="bg-red-700 hover:bg-red-900 font-bold py-1 px-3 rounded" hx-get="/internal/roster/filter" hx-vals="{\"filter\": \"expelled\"}" hx-target="#roster" {
                    "Expelled"
                }
            }

            div class="flex flex-row flex-wrap gap-2 items-center" {
                span class="text-gray-400 text-sm" {"Sort by:"}
                @for (token, label) in SORTS {
                    button class="bg-slate-600 hover:bg-slate-800 font-bold py-1 px-3 rounded" hx-get="/internal/roster/sort" hx-vals={"{\"sort\": \"" (token) "\"}"} hx-target="#roster" {
                        (label)
                    }
                }
            }

            div class="flex flex-row flex-wrap gap-2 items-center" {
                input type="search" name="search" placeholder="Search names" class="shadow appearance-none border rounded py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600" hx-get="/internal/roster/search" hx-trigger="input changed delay:300ms" hx-target="#roster";
                button class="bg-red-600 hover:bg-red-800 font-bold py-2 px-4 rounded" hx-post="/internal/roster/reroll" hx-target="#roster" {
                    "Re-roll blood statuses"
                }
            }

            div hx-ext="sse" sse-connect="/sse_feed" class="container flex flex-row justify-center space-x-4" {
                div id="roster" hx-get="/internal/get_roster" hx-trigger="load" {}
                div id="in_focus" {}
            }
        }
    })
}
