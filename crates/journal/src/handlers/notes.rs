//! Note handlers.
//!
//! The list endpoint applies the conditional-GET cache policy. The other
//! endpoints forward to the remote API with the viewer's cookie.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use journal_core::cache_policy::{build_policy, derive_context, reference_today, CachePolicy};
use journal_core::notes::{
    validate_create_note, validate_update_note, CreateNoteRequest, ListNotesQuery,
    UpdateNoteRequest,
};

use super::{private_no_cache, AppError};
use crate::{context::RequestContext, state::AppState};

/// Converts the policy headers into a `HeaderMap`.
fn policy_headers(policy: &CachePolicy) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::with_capacity(4);
    for (name, value) in policy.header_pairs() {
        headers.insert(
            HeaderName::from_bytes(name.as_bytes())?,
            HeaderValue::from_str(value)?,
        );
    }
    Ok(headers)
}

// ============================================================================
// List Notes
// ============================================================================

/// List the notes of a day (GET /api/notes?date=YYYY-MM-DD).
///
/// Replies 304 with the cache headers when the client's validators still
/// match, otherwise 200 with the notes and the same headers.
pub async fn list_notes(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: Result<Query<ListNotesQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|e| AppError::bad_request(format!("Invalid query: {e}")))?;

    let now = state.clock.now();
    let selected_date = query.date.unwrap_or_else(|| reference_today(now));
    let is_authenticated = ctx.credentials.is_authenticated;

    let notes = state
        .api
        .list_notes(&ctx.credentials, selected_date)
        .await?;

    let context = derive_context(selected_date, is_authenticated, now);
    let policy = build_policy(
        selected_date,
        &notes,
        &ctx.headers,
        &context,
        &state.config.cache,
        now,
    );

    tracing::debug!(
        request_id = %ctx.request_id,
        date = %selected_date,
        count = notes.len(),
        etag = %policy.headers.etag,
        public = policy.should_use_public_cache,
        not_modified = policy.is_not_modified,
        forced_bump = policy.forced_timestamp_bump,
        "Notes cache policy"
    );

    let headers = policy_headers(&policy)?;

    if policy.is_not_modified {
        return Ok((StatusCode::NOT_MODIFIED, headers).into_response());
    }

    Ok((StatusCode::OK, headers, Json(notes)).into_response())
}

// ============================================================================
// Note CRUD
// ============================================================================

/// Get a single note (GET /api/notes/{id}).
pub async fn get_note(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let note = state.api.get_note(&ctx.credentials, &id).await?;
    Ok((private_no_cache(), Json(note)).into_response())
}

/// Create a note (POST /api/notes).
pub async fn create_note(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) =
        payload.map_err(|e| AppError::bad_request(format!("Failed to parse body: {e}")))?;
    validate_create_note(&payload)?;

    let note = state.api.create_note(&ctx.credentials, &payload).await?;

    tracing::info!(request_id = %ctx.request_id, note_id = %note.id, "Created note");

    Ok((StatusCode::CREATED, private_no_cache(), Json(note)).into_response())
}

/// Update a note (PUT /api/notes/{id}).
pub async fn update_note(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) =
        payload.map_err(|e| AppError::bad_request(format!("Failed to parse body: {e}")))?;
    validate_update_note(&payload)?;

    let note = state
        .api
        .update_note(&ctx.credentials, &id, &payload)
        .await?;

    tracing::info!(request_id = %ctx.request_id, note_id = %id, "Updated note");

    Ok((private_no_cache(), Json(note)).into_response())
}

/// Delete a note (DELETE /api/notes/{id}).
pub async fn delete_note(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.api.delete_note(&ctx.credentials, &id).await?;

    tracing::info!(request_id = %ctx.request_id, note_id = %id, "Deleted note");

    Ok(StatusCode::NO_CONTENT)
}
