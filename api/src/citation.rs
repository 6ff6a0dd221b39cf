use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use citation_system::{build_citation_request, CitationResponse, Prompt};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// `POST /generate-citation`
///
/// Checks the caller's key, then asks the completion backend for a reference
/// and relays its text unchanged.
pub async fn generate_citation(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Prompt>, JsonRejection>,
) -> ApiResult<Json<CitationResponse>> {
    let key = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match key {
        Some(key) if state.config.is_authorized(key) => {}
        _ => {
            log::warn!("Rejected citation request with missing or unknown API key");
            return Err(ApiError::Unauthorized);
        }
    }

    let Json(prompt) = payload.map_err(|rejection| ApiError::InvalidBody {
        status: rejection.status(),
        detail: rejection.body_text(),
    })?;

    let completions = state.completions.as_ref().ok_or_else(|| {
        log::error!("Citation requested but OPENAI_API_KEY is not configured");
        ApiError::Misconfigured
    })?;

    let request = build_citation_request(&state.config.openai_model, &prompt.message);

    log::info!("Generating citation ({} bytes of citation data)", prompt.message.len());

    let response = completions.complete(&request).await.map_err(|e| {
        log::error!("Completion request failed: {}", e);
        ApiError::RemoteFailure(e.to_string())
    })?;

    Ok(Json(CitationResponse { response }))
}
