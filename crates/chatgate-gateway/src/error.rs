//! Gateway error types.

use crate::ask::{AskResponse, TokenCounts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chatgate_providers::ProviderError;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur in the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Shared secret missing or incorrect.
    #[error("Invalid backend password")]
    Auth,

    /// Request rejected before any downstream call.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Downstream provider failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Get the HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Auth => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Provider(e) => match e {
                ProviderError::Authentication(_) => StatusCode::UNAUTHORIZED,
                ProviderError::RateLimit { .. } => StatusCode::TOO_MANY_REQUESTS,
                ProviderError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Io(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(%status, "request rejected: {}", self);

        // Error payloads carry the message and zeroed usage counters;
        // history is never returned on a failure path.
        let body = AskResponse {
            response: self.to_string(),
            tokens: TokenCounts::zero(),
            new_history: None,
        };

        (status, Json(body)).into_response()
    }
}
