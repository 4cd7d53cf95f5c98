use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::database::Person;

/// Uniform body for every endpoint. Unset fields are left off the wire;
/// an empty `data` list is still emitted as `[]`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Person>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Envelope {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: Vec<Person>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Envelope plus the status it should be sent with
#[derive(Debug)]
pub struct ApiResponse {
    pub envelope: Envelope,
    pub status_code: Option<StatusCode>,
}

impl ApiResponse {
    /// Create a successful API response with default 200 status
    pub fn success(envelope: Envelope) -> Self {
        Self {
            envelope,
            status_code: None,
        }
    }

    /// Create an API response with custom status code
    pub fn with_status(envelope: Envelope, status_code: StatusCode) -> Self {
        Self {
            envelope,
            status_code: Some(status_code),
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);
        (status, Json(self.envelope)).into_response()
    }
}

pub type ApiResult = Result<ApiResponse, crate::error::ApiError>;
