//! # Terminal Error Types
//!
//! Two-tier error taxonomy for Terminal operations.
//!
//! - **Recognized** errors: the payments API (or local request validation)
//!   explicitly rejected the request. These carry a human-readable message
//!   meant for the caller.
//! - **Unexpected** errors: everything else (transport failures, undecodable
//!   responses, misconfiguration). These are reported verbatim.

use serde::Serialize;
use thiserror::Error;

/// Core error type for all Terminal operations
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TerminalError {
    /// The payments API rejected the request
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status returned by the API
        status: u16,
        /// API error type (e.g. `invalid_request_error`)
        #[serde(skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        /// API error code (e.g. `payment_intent_unexpected_state`)
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String>,
        /// Offending parameter, if the API named one
        #[serde(skip_serializing_if = "Option::is_none")]
        param: Option<String>,
        message: String,
    },

    /// Request failed local validation before reaching the API
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Network/HTTP error communicating with the API
    #[error("Network error: {message}")]
    Network { message: String },

    /// Response body could not be decoded
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Internal error (should not happen)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl TerminalError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        TerminalError::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        TerminalError::Network {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        TerminalError::Serialization {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        TerminalError::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        TerminalError::Internal {
            message: message.into(),
        }
    }

    /// Returns true if the request was explicitly rejected, either by the
    /// API or by local validation.
    pub fn is_recognized(&self) -> bool {
        matches!(
            self,
            TerminalError::Api { .. } | TerminalError::InvalidRequest { .. }
        )
    }

    /// The bare message, without the variant prefix added by `Display`.
    pub fn message(&self) -> &str {
        match self {
            TerminalError::Api { message, .. }
            | TerminalError::InvalidRequest { message }
            | TerminalError::Network { message }
            | TerminalError::Serialization { message }
            | TerminalError::Configuration { message }
            | TerminalError::Internal { message } => message,
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        if self.is_recognized() {
            400
        } else {
            500
        }
    }
}

/// Result type alias for Terminal operations
pub type TerminalResult<T> = Result<T, TerminalError>;
