//! Error types for folio.
//!
//! This module provides a unified error type with explicit variants for
//! transport, upstream API, input validation, and local storage errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for folio operations.
///
/// Content fetch failures surface here as ordinary values. The accumulator
/// decides what to do with them; nothing in this crate panics on an upstream
/// fault.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Upstream API errors (HTTP status, GraphQL errors, unexpected shape).
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Input validation errors (invalid URL, slug, token).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Local storage errors (cache files, locks, serialization).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Whether the upstream rejected the request's credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Api(api) if api.is_auth_error())
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

/// Errors reported by, or about the responses of, an upstream API.
#[derive(Debug)]
pub enum ApiError {
    /// Non-success HTTP status.
    Status { status: u16, message: Option<String> },

    /// GraphQL `errors` array in an otherwise well-formed response.
    GraphQl { messages: Vec<String> },

    /// REST envelope with `success: false`.
    Rejected { message: Option<String> },

    /// A required part of the response was null or absent.
    MissingData { what: &'static str },

    /// The response body did not have the expected shape.
    Malformed { message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Status { status, message } => {
                write!(f, "HTTP {}", status)?;
                if let Some(message) = message {
                    write!(f, ": {}", message)?;
                }
                Ok(())
            }
            ApiError::GraphQl { messages } => {
                write!(f, "GraphQL errors: {}", messages.join("; "))
            }
            ApiError::Rejected { message } => match message {
                Some(message) => write!(f, "request rejected: {}", message),
                None => write!(f, "request rejected"),
            },
            ApiError::MissingData { what } => write!(f, "response missing {}", what),
            ApiError::Malformed { message } => write!(f, "malformed response: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => *status == 401 || *status == 403,
            ApiError::GraphQl { messages } => messages
                .iter()
                .any(|m| m.to_ascii_lowercase().contains("unauthenticated")),
            _ => false,
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid slug.
    #[error("invalid slug '{value}': {reason}")]
    Slug { value: String, reason: String },

    /// Invalid API token.
    #[error("invalid token: {reason}")]
    Token { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

/// Local storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Could not acquire a lock on a storage file.
    #[error("failed to lock {path}")]
    Lock { path: String },

    /// A value could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
