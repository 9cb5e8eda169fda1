//! Wine label recognition proxy.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};

use journal_core::notes::{validate_wine_request, RecognizeWineRequest};

use super::{private_no_cache, AppError};
use crate::{context::RequestContext, state::AppState};

/// Recognize a wine label (POST /api/wines/recognize).
///
/// An empty image is rejected here without contacting the remote API.
pub async fn recognize_wine(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Json<RecognizeWineRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) =
        payload.map_err(|e| AppError::bad_request(format!("Failed to parse body: {e}")))?;
    validate_wine_request(&payload)?;

    tracing::debug!(
        request_id = %ctx.request_id,
        image_len = payload.image.len(),
        "Forwarding wine label recognition"
    );

    let result = state.api.recognize_wine(&ctx.credentials, &payload).await?;
    Ok((private_no_cache(), Json(result)).into_response())
}
