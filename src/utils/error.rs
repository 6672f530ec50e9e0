//! Error handling module
//!
//! Defines the error taxonomy returned by every SDK call

use crate::utils::logging::redact_api_keys;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Field-level error details returned by the API (e.g. `{"email": "must be valid"}`)
pub type ErrorDetails = HashMap<String, Value>;

/// SDK error types
///
/// Each variant corresponds to a stable error `code()` and an HTTP `status_code()`
/// (0 when the failure never reached the server).
#[derive(Error, Debug)]
pub enum MailBreezeError {
    /// Request validation failed on the server (HTTP 400)
    Validation {
        message: String,
        request_id: Option<String>,
        details: ErrorDetails,
    },

    /// API key invalid, expired or missing (HTTP 401)
    Authentication {
        message: String,
        request_id: Option<String>,
    },

    /// Resource not found (HTTP 404)
    NotFound {
        message: String,
        request_id: Option<String>,
    },

    /// Rate limit exceeded (HTTP 429)
    RateLimit {
        message: String,
        request_id: Option<String>,
        /// Seconds to wait before retrying, when the server said so
        retry_after: Option<u64>,
    },

    /// Server-side failure (HTTP 5xx)
    Server {
        status: u16,
        message: String,
        request_id: Option<String>,
    },

    /// Any other non-success status
    Api {
        status: u16,
        code: &'static str,
        message: String,
        request_id: Option<String>,
        details: ErrorDetails,
    },

    /// Connection, timeout or transport failure
    Network { message: String },

    /// Response body could not be decoded
    Parse {
        status: u16,
        message: String,
        request_id: Option<String>,
    },

    /// Response body could not be read
    ResponseRead {
        status: u16,
        message: String,
        request_id: Option<String>,
    },

    /// Request body could not be encoded
    Serialization { message: String },

    /// Client could not be configured
    Configuration { message: String },

    /// Caller supplied invalid parameters; no request was sent
    InvalidArgument { message: String },
}

/// Result type alias
pub type MailBreezeResult<T> = Result<T, MailBreezeError>;

impl MailBreezeError {
    /// Create the variant matching an HTTP status code
    pub fn from_status(
        status: u16,
        message: impl Into<String>,
        request_id: Option<String>,
        retry_after: Option<u64>,
        details: Option<ErrorDetails>,
    ) -> Self {
        let message = sanitize(message);
        match status {
            400 => MailBreezeError::Validation {
                message,
                request_id,
                details: details.unwrap_or_default(),
            },
            401 => MailBreezeError::Authentication { message, request_id },
            404 => MailBreezeError::NotFound { message, request_id },
            429 => MailBreezeError::RateLimit {
                message,
                request_id,
                retry_after,
            },
            s if s >= 500 => MailBreezeError::Server {
                status: s,
                message,
                request_id,
            },
            s => MailBreezeError::Api {
                status: s,
                code: code_from_status(s),
                message,
                request_id,
                details: details.unwrap_or_default(),
            },
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        MailBreezeError::Network {
            message: sanitize(message),
        }
    }

    pub fn parse(status: u16, message: impl Into<String>, request_id: Option<String>) -> Self {
        MailBreezeError::Parse {
            status,
            message: sanitize(message),
            request_id,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        MailBreezeError::Configuration {
            message: sanitize(message),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        MailBreezeError::InvalidArgument {
            message: sanitize(message),
        }
    }

    /// HTTP status code, or 0 for client-side failures
    pub fn status_code(&self) -> u16 {
        match self {
            MailBreezeError::Validation { .. } => 400,
            MailBreezeError::Authentication { .. } => 401,
            MailBreezeError::NotFound { .. } => 404,
            MailBreezeError::RateLimit { .. } => 429,
            MailBreezeError::Server { status, .. }
            | MailBreezeError::Api { status, .. }
            | MailBreezeError::Parse { status, .. }
            | MailBreezeError::ResponseRead { status, .. } => *status,
            MailBreezeError::Network { .. }
            | MailBreezeError::Serialization { .. }
            | MailBreezeError::Configuration { .. }
            | MailBreezeError::InvalidArgument { .. } => 0,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            MailBreezeError::Validation { .. } => "VALIDATION_ERROR",
            MailBreezeError::Authentication { .. } => "AUTHENTICATION_ERROR",
            MailBreezeError::NotFound { .. } => "NOT_FOUND",
            MailBreezeError::RateLimit { .. } => "RATE_LIMIT_EXCEEDED",
            MailBreezeError::Server { .. } => "SERVER_ERROR",
            MailBreezeError::Api { code, .. } => code,
            MailBreezeError::Network { .. } => "NETWORK_ERROR",
            MailBreezeError::Parse { .. } => "PARSE_ERROR",
            MailBreezeError::ResponseRead { .. } => "RESPONSE_READ_ERROR",
            MailBreezeError::Serialization { .. } => "SERIALIZATION_ERROR",
            MailBreezeError::Configuration { .. } => "CONFIGURATION_ERROR",
            MailBreezeError::InvalidArgument { .. } => "INVALID_ARGUMENT",
        }
    }

    /// Human-readable message with API keys redacted
    pub fn message(&self) -> &str {
        match self {
            MailBreezeError::Validation { message, .. }
            | MailBreezeError::Authentication { message, .. }
            | MailBreezeError::NotFound { message, .. }
            | MailBreezeError::RateLimit { message, .. }
            | MailBreezeError::Server { message, .. }
            | MailBreezeError::Api { message, .. }
            | MailBreezeError::Network { message }
            | MailBreezeError::Parse { message, .. }
            | MailBreezeError::ResponseRead { message, .. }
            | MailBreezeError::Serialization { message }
            | MailBreezeError::Configuration { message }
            | MailBreezeError::InvalidArgument { message } => message,
        }
    }

    /// Value of the `X-Request-Id` response header, if any
    pub fn request_id(&self) -> Option<&str> {
        match self {
            MailBreezeError::Validation { request_id, .. }
            | MailBreezeError::Authentication { request_id, .. }
            | MailBreezeError::NotFound { request_id, .. }
            | MailBreezeError::RateLimit { request_id, .. }
            | MailBreezeError::Server { request_id, .. }
            | MailBreezeError::Api { request_id, .. }
            | MailBreezeError::Parse { request_id, .. }
            | MailBreezeError::ResponseRead { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    /// Error details; empty when the API sent none
    pub fn details(&self) -> &ErrorDetails {
        static EMPTY: once_cell::sync::Lazy<ErrorDetails> =
            once_cell::sync::Lazy::new(HashMap::new);

        match self {
            MailBreezeError::Validation { details, .. } | MailBreezeError::Api { details, .. } => {
                details
            }
            _ => &EMPTY,
        }
    }

    /// Seconds to wait before retrying a rate-limited request
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            MailBreezeError::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Transient failures: HTTP 429 and any 5xx, whatever the variant
    pub fn is_retryable(&self) -> bool {
        let status = self.status_code();
        status == 429 || status >= 500
    }
}

impl From<serde_json::Error> for MailBreezeError {
    fn from(err: serde_json::Error) -> Self {
        MailBreezeError::Serialization {
            message: sanitize(format!("Failed to serialize request body: {}", err)),
        }
    }
}

fn code_from_status(status: u16) -> &'static str {
    match status {
        400 => "VALIDATION_ERROR",
        401 => "AUTHENTICATION_ERROR",
        403 => "FORBIDDEN",
        404 => "NOT_FOUND",
        429 => "RATE_LIMIT_EXCEEDED",
        s if s >= 500 => "SERVER_ERROR",
        _ => "UNKNOWN_ERROR",
    }
}

fn sanitize(message: impl Into<String>) -> String {
    redact_api_keys(&message.into()).into_owned()
}

impl fmt::Display for MailBreezeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.code(), self.status_code(), self.message())?;
        if let Some(request_id) = self.request_id() {
            write!(f, " [request_id={}]", request_id)?;
        }
        Ok(())
    }
}

/// Error context extension trait
pub trait ErrorContext<T> {
    /// Map any error into an `InvalidArgument` with context
    fn invalid_argument_context(self, message: &str) -> MailBreezeResult<T>;

    /// Map any error into a `Network` error with context
    fn network_context(self, message: &str) -> MailBreezeResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn invalid_argument_context(self, message: &str) -> MailBreezeResult<T> {
        self.map_err(|e| MailBreezeError::invalid_argument(format!("{}: {}", message, e)))
    }

    fn network_context(self, message: &str) -> MailBreezeResult<T> {
        self.map_err(|e| MailBreezeError::network(format!("{}: {}", message, e)))
    }
}
