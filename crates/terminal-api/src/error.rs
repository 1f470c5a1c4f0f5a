//! # API Errors
//!
//! The single error-translation layer for every route. Handlers return
//! `ApiResult<T>` and propagate with `?`; conversion into a response happens
//! here and nowhere else.
//!
//! | Error | Status | Body |
//! |-------|--------|------|
//! | `Rejected` | 400 | `{"error": {"message": "..."}}` |
//! | `MethodNotAllowed` | 405 | `{"error": {"message": "..."}}` |
//! | `Unexpected` | 500 | `{"error": <serialized TerminalError>}` |

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use terminal_core::TerminalError;
use thiserror::Error;
use tracing::{error, warn};

/// Error returned by every handler
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was rejected by the payments API or failed validation
    #[error("{message}")]
    Rejected { message: String },

    /// The path exists but not for this HTTP method
    #[error("method {method} not allowed")]
    MethodNotAllowed { method: String },

    /// Anything else; reported verbatim
    #[error(transparent)]
    Unexpected(TerminalError),
}

/// Result type alias for handlers
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn rejected(message: impl Into<String>) -> Self {
        ApiError::Rejected {
            message: message.into(),
        }
    }

    /// Force the 500 branch regardless of how the error would normally be
    /// classified.
    pub fn unexpected(err: TerminalError) -> Self {
        ApiError::Unexpected(err)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Rejected { .. } => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TerminalError> for ApiError {
    fn from(err: TerminalError) -> Self {
        if err.is_recognized() {
            ApiError::rejected(err.message())
        } else {
            ApiError::Unexpected(err)
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::rejected(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::rejected(rejection.body_text())
    }
}

/// Error envelope: `{"error": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse<T> {
    pub error: T,
}

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            ApiError::Rejected { message } => {
                warn!("Request rejected: {}", message);
                (
                    status,
                    Json(ErrorResponse {
                        error: ErrorMessage { message },
                    }),
                )
                    .into_response()
            }
            ApiError::MethodNotAllowed { method } => {
                let message = format!("method {} not allowed", method);
                warn!("{}", message);
                (
                    status,
                    Json(ErrorResponse {
                        error: ErrorMessage { message },
                    }),
                )
                    .into_response()
            }
            ApiError::Unexpected(err) => {
                error!("Unexpected error: {}", err);
                (status, Json(ErrorResponse { error: err })).into_response()
            }
        }
    }
}
