use std::convert::Infallible;

use axum::{
    Router,
    extract::State,
    response::sse::{Event, Sse},
    routing::get,
};
use tokio_stream::Stream;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(design_events))
}

#[utoipa::path(
    get,
    path = "/api/events",
    responses((status = 200, description = "Server-sent `designUpdated` events", content_type = "text/event-stream")),
    tag = "Events"
)]
pub async fn design_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
    tracing::debug!(subscribers = state.events.subscriber_count() + 1, "sse client connected");
    state.events.sse()
}
