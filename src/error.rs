//! Error types for the appbase client.
//!
//! This module provides a unified error type with explicit variants for
//! transport failures, structured backend errors, body decode failures,
//! and date codec failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for appbase operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A structured error reported by the backend on a non-success status.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// A success response whose body could not be decoded.
    #[error("failed to decode response body: {message}")]
    Decode { message: String },

    /// Date codec failures.
    #[error("invalid date value: {0}")]
    Date(#[from] DateError),

    /// Invalid server base URL.
    #[error("invalid server URL '{value}': {reason}")]
    ServerUrl { value: String, reason: String },
}

impl Error {
    pub(crate) fn decode(err: reqwest::Error) -> Self {
        Error::Decode {
            message: err.to_string(),
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// A normalized error reported by the backend.
///
/// Every non-success response is mapped into this shape: the HTTP status,
/// the backend's numeric error code when it supplied one, and a message
/// that falls back to a fixed per-operation string when the body carried
/// none.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status: u16,
    /// Backend-defined numeric error code, if present.
    ///
    /// The backend reports this as a JSON number; no integral precision
    /// is assumed.
    pub code: Option<f64>,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(code) = self.code {
            write!(f, " [code {}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Date codec errors.
#[derive(Debug, Error)]
pub enum DateError {
    /// The decoded object carried no `iso` string field.
    #[error("missing iso field")]
    MissingIso,

    /// The `iso` field was not a valid RFC3339 timestamp.
    #[error(transparent)]
    Format(#[from] chrono::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_with_code() {
        let err = ApiError {
            status: 400,
            code: Some(101.0),
            message: "object not found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 400 [code 101]: object not found");
    }

    #[test]
    fn api_error_display_without_code() {
        let err = ApiError {
            status: 503,
            code: None,
            message: "unable to read object".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: unable to read object");
    }
}
