//! Error types
//! One taxonomy for factory, transport and adapter failures

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AiError>;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("Unsupported AI provider: {0}")]
    UnsupportedProvider(String),

    /// 4xx from the vendor
    #[error("Client error ({status}): {message}")]
    Client { status: u16, message: String },

    /// 5xx from the vendor
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Network failure, timeout, undecodable body, or any streaming failure
    #[error("Request error: {0}")]
    Transport(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Raised by a caller-supplied request or response override
    #[error("Override error: {0}")]
    Override(String),
}

impl AiError {
    /// HTTP status carried by client/server errors
    pub fn status(&self) -> Option<u16> {
        match self {
            AiError::Client { status, .. } | AiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        let code = status.as_u16();
        if status.is_client_error() {
            AiError::Client {
                status: code,
                message,
            }
        } else if status.is_server_error() {
            AiError::Server {
                status: code,
                message,
            }
        } else {
            AiError::Transport(format!("unexpected status {status}: {message}"))
        }
    }
}
