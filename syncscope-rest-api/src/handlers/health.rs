//! Health check endpoint

use axum::{extract::State, response::IntoResponse, Json};
use tracing::debug;

use crate::{context::AppContext, models::HealthResponse};

/// Liveness plus the number of open live status streams
pub async fn health_check(State(ctx): State<AppContext>) -> impl IntoResponse {
    debug!("Health check requested");

    Json(HealthResponse::healthy(ctx.broadcaster.active_subscriptions()))
}
