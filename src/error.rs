//! Application error taxonomy and its HTTP mapping.
//!
//! Every fallible operation in the service returns [`AppError`]. Handlers
//! propagate it with `?` and Axum renders it through [`IntoResponse`] as
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Short URL not found", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::time::Duration;
use thiserror::Error;

/// Name of the primary key constraint on `url_mappings.short_id`.
pub const SHORT_ID_CONSTRAINT: &str = "url_mappings_pkey";

/// Name of the unique index on `url_mappings.original_url`.
pub const ORIGINAL_URL_CONSTRAINT: &str = "url_mappings_original_url_key";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Unique key violated by an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    ShortId,
    OriginalUrl,
}

/// Failures originating from the mapping store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("store call `{operation}` timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { key: UniqueKey, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(key: UniqueKey, message: impl Into<String>) -> Self {
        Self::Conflict {
            key,
            message: message.into(),
        }
    }

    pub fn store(cause: impl Into<String>) -> Self {
        Self::Store(StoreError::Database(cause.into()))
    }

    pub fn timeout(operation: &'static str, after: Duration) -> Self {
        Self::Store(StoreError::Timeout { operation, after })
    }

    /// Returns true for errors raised by the mapping store, timeouts included.
    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Converts the error into its client-facing payload.
    ///
    /// Store failures never expose their cause.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            AppError::Validation { message, details } => ErrorInfo {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::NotFound { message, details } => ErrorInfo {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::Conflict { message, .. } => ErrorInfo {
                code: "conflict",
                message: message.clone(),
                details: json!({}),
            },
            AppError::Store(_) => ErrorInfo {
                code: "internal_error",
                message: "Storage error".to_string(),
                details: json!({}),
            },
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Store(cause) = &self {
            tracing::error!(error = %cause, "Request failed with store error");
        }

        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            match db.constraint() {
                Some(SHORT_ID_CONSTRAINT) => {
                    return AppError::conflict(UniqueKey::ShortId, "Short ID already exists");
                }
                Some(ORIGINAL_URL_CONSTRAINT) => {
                    return AppError::conflict(
                        UniqueKey::OriginalUrl,
                        "Original URL is already shortened",
                    );
                }
                _ => {}
            }
        }

        AppError::store(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        AppError::bad_request(
            format!("Invalid input: {}", errors),
            json!({ "fields": fields }),
        )
    }
}
