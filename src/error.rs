//! Unified error handling for the harness core.
//!
//! Client and service layers never catch and hide errors; everything
//! surfaces to the calling test as an `ApiError`.

use std::fmt;

/// Error type for client-core and service-layer operations.
#[derive(Debug)]
pub enum ApiError {
    /// Required configuration is missing or unusable (no target endpoint).
    Config(String),
    /// The HTTP round trip itself failed (timeout, connection refused, TLS).
    Transport(reqwest::Error),
    /// The response body did not decode into the expected shape.
    Decode { context: String, message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::Decode { context, message } => {
                write!(f, "Failed to decode {}: {}", context, message)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}
