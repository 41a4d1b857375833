//! Error types for the RPC dispatch bridge.
//!
//! Three failure kinds, matching what callers can act on: the transport
//! failed, the response was not a JSON-RPC envelope, or the server answered
//! with an application-level error object. None of them are retried here.

use thiserror::Error;

/// Main error type for RPC invocations.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Connection failed, timed out, the peer was unreachable, or the wire
    /// response could not be read.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Response bytes could not be parsed as a JSON-RPC response envelope.
    #[error("Malformed RPC response: {message}")]
    MalformedResponse { message: String },

    /// The server responded at the transport level, but the envelope carries
    /// an error object. The object travels as data, verbatim.
    #[error("RPC application error: {error}")]
    Application { error: serde_json::Value },
}

/// Result type alias for RPC operations.
pub type Result<T> = std::result::Result<T, RpcError>;

impl From<std::io::Error> for RpcError {
    fn from(e: std::io::Error) -> Self {
        RpcError::Transport {
            message: format!("IO error: {}", e),
        }
    }
}

impl From<reqwest::Error> for RpcError {
    fn from(e: reqwest::Error) -> Self {
        RpcError::Transport {
            message: format!("HTTP error: {}", e),
        }
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(e: serde_json::Error) -> Self {
        RpcError::MalformedResponse {
            message: format!("JSON error: {}", e),
        }
    }
}
