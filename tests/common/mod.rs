#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use person_api::auth::TokenService;
use person_api::config::JwtConfig;
use person_api::database::{MemoryPersonStore, PersonPayload, PersonStore};
use person_api::{app, AppState};

pub const SHARED_KEY: &str = "test-request-key";
pub const SECRET: &str = "test-signing-secret";

/// Router over a fresh in-memory store; the store handle is returned so
/// tests can inspect it directly
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryPersonStore>,
    pub tokens: Arc<TokenService>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryPersonStore::new());
        let tokens = TokenService::new(&jwt_config(SECRET)).expect("token service");
        let state = AppState::new(store.clone(), tokens);
        let tokens = state.tokens.clone();

        Self {
            router: app(state),
            store,
            tokens,
        }
    }

    pub async fn seed(&self, name: &str, sex: &str, country: &str) -> i64 {
        self.store
            .insert(PersonPayload::new(name, sex, country))
            .await
            .expect("seed insert")
            .id
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.tokens.issue_token(SHARED_KEY).expect("issue token"))
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await?;
        let body = serde_json::from_slice(&bytes)?;
        Ok((status, body))
    }
}

pub fn jwt_config(secret: &str) -> JwtConfig {
    JwtConfig {
        key: SHARED_KEY.to_string(),
        secret: secret.to_string(),
        expiry_hours: 1,
    }
}

pub fn request(method: Method, uri: &str, auth: Option<&str>, json: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let body = match json {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("request")
}
