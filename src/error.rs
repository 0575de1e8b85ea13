//! Error types for the Magrathea client
//!
//! Provides a unified error type for all session operations.

use thiserror::Error;

/// Result type alias using MagratheaError
pub type Result<T> = std::result::Result<T, MagratheaError>;

/// Unified error type for Magrathea client operations
#[derive(Debug, Error)]
pub enum MagratheaError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Failed to open or maintain the stream (includes deadline expiry and EOF)
    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Handshake Errors
    // -------------------------------------------------------------------------
    #[error("Error during authentication. Magrathea API returned: {response}")]
    Authentication { response: String },

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Session Errors
    // -------------------------------------------------------------------------
    #[error("Invalid connection to Magrathea API.")]
    NotConnected,

    /// Server answered with a non-'0' status line
    #[error("Error during {context}. Magrathea API returned: {response}")]
    Protocol {
        context: &'static str,
        response: String,
    },
}

impl MagratheaError {
    /// Whether the same session can be used again after this error
    /// (possibly after a reconnect).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MagratheaError::Validation(_) | MagratheaError::Config(_) | MagratheaError::NotConnected
        )
    }

    /// Raw server status line carried by this error, if any
    pub fn server_response(&self) -> Option<&str> {
        match self {
            MagratheaError::Authentication { response }
            | MagratheaError::Protocol { response, .. } => Some(response),
            _ => None,
        }
    }
}
