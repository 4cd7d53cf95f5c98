use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::TokenError;
use crate::error::ApiError;
use crate::state::AppState;

/// JWT gate for the v2 routes. Rejects before the handler (and storage)
/// is reached.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = extract_authorization(&headers)?;

    state.tokens.validate_token(header)?;
    tracing::debug!("Token accepted for {} {}", request.method(), request.uri().path());

    Ok(next.run(request).await)
}

/// Raw `Authorization` header value; missing or non-ASCII headers are
/// treated the same as a bad token
fn extract_authorization(headers: &HeaderMap) -> Result<&str, TokenError> {
    let value = headers.get(AUTHORIZATION).ok_or_else(|| {
        tracing::debug!("Token rejected: missing Authorization header");
        TokenError::InvalidToken
    })?;

    value.to_str().map_err(|_| TokenError::InvalidToken)
}
