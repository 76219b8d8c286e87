//! Service status snapshot and live status stream

use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use futures_util::StreamExt;
use syncscope_core::service_status;
use tracing::info;

use crate::context::AppContext;

/// SSE event name carrying a `StatusUpdate`
pub const STATUS_EVENT: &str = "status-update";

/// Current service state. Degrades instead of failing.
pub async fn get_service_status(State(ctx): State<AppContext>) -> impl IntoResponse {
    Json(service_status(ctx.probe.as_ref()).await)
}

/// Live status updates as server-sent events.
///
/// The subscription lives inside the response body; when the client goes
/// away the body is dropped and polling for this observer stops.
pub async fn status_stream(State(ctx): State<AppContext>) -> impl IntoResponse {
    let subscription = ctx.broadcaster.subscribe();
    info!(observer = subscription.id(), "Live status stream opened");

    let events = subscription.map(|update| Event::default().event(STATUS_EVENT).json_data(update));

    Sse::new(events).keep_alive(KeepAlive::new().interval(ctx.keep_alive).text("keep-alive"))
}
