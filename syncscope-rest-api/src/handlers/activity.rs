//! Classified activity and keyword statistics from the journal

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};
use syncscope_core::{aggregate, normalize_log_query, normalize_stats_query, RawLogQuery, RawStatsQuery};
use tracing::{debug, info};

use crate::{
    context::AppContext,
    errors::{RestError, RestResult},
};

/// Malformed query strings are treated like empty ones
fn raw_or_default<T: Default>(query: Result<Query<T>, QueryRejection>) -> T {
    match query {
        Ok(Query(raw)) => raw,
        Err(rejection) => {
            debug!("Ignoring malformed query string: {}", rejection);
            T::default()
        }
    }
}

/// Recent activity events
pub async fn get_logs(
    State(ctx): State<AppContext>,
    query: Result<Query<RawLogQuery>, QueryRejection>,
) -> RestResult<impl IntoResponse> {
    let query = normalize_log_query(&raw_or_default(query));

    let raw = ctx.journal.fetch_logs(&query).await.map_err(RestError::Logs)?;
    let events = ctx.classifier.classify(&raw);

    info!(
        requested = query.line_count,
        since = %query.since,
        events = events.len(),
        "Fetched activity"
    );
    Ok(Json(events))
}

/// Keyword counts over a time window
pub async fn get_statistics(
    State(ctx): State<AppContext>,
    query: Result<Query<RawStatsQuery>, QueryRejection>,
) -> RestResult<impl IntoResponse> {
    let query = normalize_stats_query(&raw_or_default(query));

    let raw = ctx
        .journal
        .fetch_raw_window(&query)
        .await
        .map_err(RestError::Statistics)?;
    let statistics = aggregate(&raw);

    info!(time_range = %query.time_range, total = statistics.total, "Computed statistics");
    Ok(Json(statistics))
}
