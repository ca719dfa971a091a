//! Error types for the market intelligence client.

use thiserror::Error;

/// Message shown when the analysis service cannot be reached or answers
/// with a non-success status.
pub const GENERIC_FETCH_FAILURE: &str = "Failed to fetch market data. Please try again.";

/// The main error type for market-intel.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, storage, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client errors (connection refused, DNS, TLS, timeouts)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success transport outcome, e.g. a non-2xx status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Well-formed response in which the service reports a failure.
    #[error("Service error: {}", .0.as_deref().unwrap_or("no message"))]
    Business(Option<String>),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// History storage errors
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Clipboard access errors
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new business error from an optional server message.
    pub fn business(msg: Option<String>) -> Self {
        Self::Business(msg.filter(|m| !m.trim().is_empty()))
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new persistence error.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create a new clipboard error.
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }

    /// Single-line message suitable for the session error field.
    ///
    /// Business errors carry the server-supplied text when there is one;
    /// everything else collapses to a retry-suggesting generic message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Business(Some(message)) => message.clone(),
            _ => GENERIC_FETCH_FAILURE.to_string(),
        }
    }

    /// Check if this error is recoverable (user can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Transport(_) | Self::Business(_))
    }
}
