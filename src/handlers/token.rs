use axum::extract::State;
use serde::Deserialize;

use crate::extractors::JsonBody;
use crate::middleware::{ApiResponse, ApiResult, Envelope};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct KeyRequest {
    pub key: String,
}

/// POST /v2/token - exchange the shared request key for a bearer token
///
/// ```json
/// { "key": "string" }
/// ```
pub async fn token_post(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<KeyRequest>,
) -> ApiResult {
    let token = state.tokens.issue_token(&request.key)?;

    Ok(ApiResponse::success(
        Envelope::message("Here's your Token").with_token(token),
    ))
}
