// handlers/mod.rs - request handlers
//
// Person CRUD is shared by both API versions; /v2 only differs in the
// JWT gate layered on in routes.rs.

pub mod health;
pub mod person;
pub mod token;

use crate::error::ApiError;

/// Method fallback for every bound path
pub async fn invalid_method() -> ApiError {
    ApiError::MethodNotAllowed
}
