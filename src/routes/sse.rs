use crate::state::SortingHatState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, StreamExt};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;

#[derive(Debug, Clone, Copy)]
pub enum SseEvent {
    Roster,
}

impl SseEvent {
    const fn name(self) -> &'static str {
        match self {
            Self::Roster => "roster",
        }
    }
}

pub async fn sse_feed(
    State(state): State<SortingHatState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe_to_sse_feed();

    let stream = BroadcastStream::new(rx).filter_map(|event| async move {
        // Lagged receivers just miss a refresh; the next event catches up.
        event
            .ok()
            .map(|event| Ok::<_, Infallible>(Event::default().event(event.name())))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
