//! Post handlers (read-only proxy).

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};

use journal_core::notes::ListPostsQuery;

use super::{private_no_cache, AppError};
use crate::{context::RequestContext, state::AppState};

/// List posts (GET /api/posts?page=N&tag=T).
pub async fn list_posts(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: Result<Query<ListPostsQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|e| AppError::bad_request(format!("Invalid query: {e}")))?;

    let posts = state.api.list_posts(&ctx.credentials, &query).await?;
    Ok((private_no_cache(), Json(posts)).into_response())
}

/// Get a single post (GET /api/posts/{id}).
pub async fn get_post(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let post = state.api.get_post(&ctx.credentials, &id).await?;
    Ok((private_no_cache(), Json(post)).into_response())
}
