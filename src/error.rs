//! Application error type and its HTTP rendering.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload shared by all JSON error responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors returned by the link services and HTTP handlers.
///
/// Validation and conflict variants are raised before any store mutation.
/// Store variants wrap the underlying [`StoreError`] unchanged.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid destination URL: {reason}")]
    InvalidDestination { url: String, reason: String },

    #[error("Invalid alias: {reason}")]
    InvalidAlias { alias: String, reason: String },

    #[error("Alias '{alias}' is already taken")]
    AliasTaken { alias: String },

    #[error("Generated code '{code}' collided with an existing link")]
    CodeCollision { code: String },

    #[error("Short link '{code}' not found")]
    NotFound { code: String },

    #[error("Failed to write to link store: {0}")]
    StoreWriteFailed(#[source] StoreError),

    #[error("Failed to read from link store: {0}")]
    StoreReadFailed(#[source] StoreError),

    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn invalid_destination(url: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDestination {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_alias(alias: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAlias {
            alias: alias.to_string(),
            reason: reason.into(),
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidDestination { .. } | Self::InvalidAlias { .. } | Self::Validation { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::AliasTaken { .. } | Self::CodeCollision { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::StoreWriteFailed(e) | Self::StoreReadFailed(e) if e.is_permission_denied() => {
                StatusCode::FORBIDDEN
            }
            Self::StoreWriteFailed(_) | Self::StoreReadFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error code exposed to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDestination { .. } => "invalid_destination",
            Self::InvalidAlias { .. } => "invalid_alias",
            Self::AliasTaken { .. } => "alias_taken",
            Self::CodeCollision { .. } => "code_collision",
            Self::NotFound { .. } => "not_found",
            Self::StoreWriteFailed(e) | Self::StoreReadFailed(e) if e.is_permission_denied() => {
                "permission_denied"
            }
            Self::StoreWriteFailed(_) => "store_write_failed",
            Self::StoreReadFailed(_) => "store_read_failed",
            Self::Validation { .. } => "validation_error",
            Self::Internal { .. } => "internal_error",
        }
    }

    fn details(&self) -> Value {
        match self {
            Self::InvalidDestination { url, .. } => json!({ "url": url }),
            Self::InvalidAlias { alias, reason } => json!({ "alias": alias, "reason": reason }),
            Self::AliasTaken { alias } => json!({ "alias": alias }),
            Self::CodeCollision { code } | Self::NotFound { code } => json!({ "code": code }),
            Self::Validation { details, .. } => details.clone(),
            Self::StoreWriteFailed(_) | Self::StoreReadFailed(_) | Self::Internal { .. } => {
                json!({})
            }
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details: self.details(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}
