//! Shared application state for all routes.

use std::sync::Arc;

use crate::auth::{TokenError, TokenService};
use crate::config::AppConfig;
use crate::database::PersonStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PersonStore>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(store: Arc<dyn PersonStore>, tokens: TokenService) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
        }
    }

    /// Build state from loaded config around an already-open store
    pub fn from_config(config: &AppConfig, store: Arc<dyn PersonStore>) -> Result<Self, TokenError> {
        Ok(Self::new(store, TokenService::new(&config.jwt)?))
    }
}
