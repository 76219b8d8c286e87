use axum::{extract::State, response::IntoResponse, Json};
use syncscope_core::list_repositories as read_repository_list;
use tracing::info;

use crate::{context::AppContext, errors::RestError, errors::RestResult};

/// List configured repositories.
///
/// An unreadable list is a server error; an empty one is `[]`.
pub async fn list_repositories(State(ctx): State<AppContext>) -> RestResult<impl IntoResponse> {
    let repositories = read_repository_list(&ctx.repository_list)
        .await
        .map_err(RestError::Repositories)?;

    info!(count = repositories.len(), "Listed repositories");
    Ok(Json(repositories))
}
