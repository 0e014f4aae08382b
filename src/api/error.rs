use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::{catalog::CatalogError, management::RegistryError, warning};

/// Errors returned by the HTTP handlers, rendered as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required parameter is missing or unusable.
    #[error("{0}")]
    Validation(String),
    /// The search produced no match.
    #[error("{0}")]
    NotFound(String),
    /// A required upstream call answered with a non-2xx status.
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        raw: String,
    },
    /// Anything unexpected; the detail is logged, never returned.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    /// Maps a failed primary catalog call.
    ///
    /// Upstream statuses pass through with `message`; transport and decode
    /// failures become internal errors.
    pub fn from_catalog(err: CatalogError, message: &str) -> Self {
        match err {
            CatalogError::Status { status, body } => ApiError::Upstream {
                status,
                message: message.to_string(),
                raw: body,
            },
            other => ApiError::Internal(format!("{}: {}", message, other)),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Upstream {
                status,
                message,
                raw,
            } => warning!("{} (upstream {}): {}", message, status, raw),
            ApiError::Internal(detail) => warning!("Internal error: {}", detail),
            _ => {}
        }

        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
