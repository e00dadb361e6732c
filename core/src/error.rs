//! Error types for fetching the meal collection.
//!
//! # Design
//! A non-2xx status deliberately hides the server's body behind a fixed
//! message; the status code is kept for logs and the FFI surface only.
//! Transport and decode failures surface their own message text.

use thiserror::Error;

/// Message shown for any non-success HTTP status.
pub const STATUS_FAILURE_MESSAGE: &str = "Something went wrong!";

/// Errors produced while turning a response into meal records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The store answered with a status outside 200-299.
    #[error("Something went wrong!")]
    Status { status: u16 },

    /// The request never produced a response (DNS, connect, TLS, reset...).
    #[error("{0}")]
    Transport(String),

    /// The body was not a JSON object of meal records.
    #[error("{0}")]
    Decode(String),
}

/// Failure reported by a host that could not complete the round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        FetchError::Transport(err.message)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
