use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::JwtConfig;

/// The single principal every token is issued for
pub const SUBJECT: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Claims valid from now for `lifetime`; `None` when the expiry would
    /// fall outside the representable timestamp range
    pub fn new(lifetime: Duration) -> Option<Self> {
        let now = Utc::now();
        let exp = now.checked_add_signed(lifetime)?.timestamp();

        Some(Self {
            sub: SUBJECT.to_string(),
            iat: now.timestamp(),
            exp,
        })
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Request Key Incorrect")]
    KeyMismatch,

    #[error("Invalid Token")]
    InvalidToken,

    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("JWT expiry of {0} hours is out of range")]
    InvalidExpiry(u64),

    #[error("JWT generation error: {0}")]
    Generation(String),
}

/// Issues and verifies HS256 tokens with the configured secret
pub struct TokenService {
    key: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Result<Self, TokenError> {
        if config.secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }

        let lifetime = i64::try_from(config.expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .filter(|lifetime| Claims::new(*lifetime).is_some())
            .ok_or(TokenError::InvalidExpiry(config.expiry_hours))?;

        Ok(Self {
            key: config.key.clone(),
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            lifetime,
        })
    }

    /// Exchange the shared request key for a signed token
    pub fn issue_token(&self, provided_key: &str) -> Result<String, TokenError> {
        if provided_key != self.key {
            warn!("Token request rejected: request key mismatch");
            return Err(TokenError::KeyMismatch);
        }

        let claims = Claims::new(self.lifetime)
            .ok_or_else(|| TokenError::Generation("expiry out of range".to_string()))?;

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Verify an `Authorization` header value. The `Bearer ` prefix is
    /// optional; an empty remainder is rejected.
    pub fn validate_token(&self, header_value: &str) -> Result<(), TokenError> {
        let token = header_value.strip_prefix("Bearer ").unwrap_or(header_value).trim();
        if token.is_empty() {
            debug!("Token rejected: empty");
            return Err(TokenError::InvalidToken);
        }

        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|_| ())
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                TokenError::InvalidToken
            })
    }
}
