use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use journal_core::notes::{validate_tag_name, CreateTagRequest};

use super::{private_no_cache, AppError};
use crate::{context::RequestContext, state::AppState};

/// List all tags (GET /api/tags).
pub async fn list_tags(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Response, AppError> {
    let tags = state.api.list_tags(&ctx.credentials).await?;
    Ok((private_no_cache(), Json(tags)).into_response())
}

/// Create a tag (POST /api/tags).
pub async fn create_tag(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Json<CreateTagRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(mut payload) =
        payload.map_err(|e| AppError::bad_request(format!("Failed to parse body: {e}")))?;
    payload.name = payload.name.trim().to_string();
    validate_tag_name(&payload.name)?;

    let tag = state.api.create_tag(&ctx.credentials, &payload).await?;

    tracing::info!(request_id = %ctx.request_id, tag = %tag.name, "Created tag");

    Ok((StatusCode::CREATED, private_no_cache(), Json(tag)).into_response())
}
