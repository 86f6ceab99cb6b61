use crate::{config::RuntimeConfiguration, data::roster::Roster, routes::sse::SseEvent};
use maud::{DOCTYPE, Markup, html};
use std::sync::Arc;
use tokio::sync::{
    RwLock, RwLockReadGuard, RwLockWriteGuard,
    broadcast::{Receiver, Sender, channel},
};

#[derive(Clone, Debug)]
pub struct SortingHatState {
    roster: Arc<RwLock<Roster>>,
    config: RuntimeConfiguration,
    sse_events_sender: Sender<SseEvent>,
}

impl SortingHatState {
    pub fn new(roster: Roster, config: RuntimeConfiguration) -> Self {
        let (tx, _rx) = channel(16);

        Self {
            roster: Arc::new(RwLock::new(roster)),
            config,
            sse_events_sender: tx,
        }
    }

    pub fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    pub async fn roster(&self) -> RwLockReadGuard<'_, Roster> {
        self.roster.read().await
    }

    pub async fn roster_mut(&self) -> RwLockWriteGuard<'_, Roster> {
        self.roster.write().await
    }

    #[allow(clippy::unused_self, clippy::needless_pass_by_value)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://unpkg.com/htmx-ext-sse@2.2.3" integrity="sha384-Y4gc0CK6Kg+hmulDc6rZPJu0tqvk7EWlih0Oh+2OkAi1ZDlCbBDCQEE2uVk472Ky" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "The Sorting Hat" }
                }
                body hx-ext="sse" class="bg-gray-900 min-h-screen flex flex-col items-center justify-center text-white" {
                    (markup)
                }
            }
        }
    }

    pub fn subscribe_to_sse_feed(&self) -> Receiver<SseEvent> {
        self.sse_events_sender.subscribe()
    }

    pub fn send_sse_event(&self, event: SseEvent) {
        let _ = self.sse_events_sender.send(event);
    }
}
