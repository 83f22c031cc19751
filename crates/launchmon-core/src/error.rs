//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // API Client Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Server returned HTTP status {code}")]
    HttpStatus { code: u16 },

    #[error("Failed to decode server response: {message}")]
    Decode { message: String },

    // ─────────────────────────────────────────────────────────────
    // Domain Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown log level: {value}")]
    UnknownLogLevel { value: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn http_status(code: u16) -> Self {
        Self::HttpStatus { code }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn unknown_log_level(value: impl Into<String>) -> Self {
        Self::UnknownLogLevel {
            value: value.into(),
        }
    }

    /// Check if this is a recoverable error.
    ///
    /// Recoverable errors are the transient fetch failures the polling
    /// engine reports to its consumer and then retries on the next tick.
    /// The server may come back by then, so none of these stop a stream.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Network { .. } | Error::HttpStatus { .. } | Error::Decode { .. }
        )
    }
}
