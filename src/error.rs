//! Error types
//!
//! `NetError` never escapes the request normalizer as an `Err`: it is stored
//! in [`Reply::log`](crate::models::Reply) so callers always receive the
//! same record shape. `Fatal` is the only error meant to end the process.

use thiserror::Error;

/// Why a request did not produce a usable JSON body
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetError {
    /// No response was obtained (DNS, refused connection, timeout, bad URL)
    #[error("{0}")]
    Transport(String),

    /// The response started but its body could not be read to the end
    #[error("{0}")]
    Truncated(String),

    /// The server answered with a 4xx/5xx status
    #[error("{reason}")]
    HttpStatus { status: u16, reason: String },

    /// The response arrived but its body is not valid JSON
    #[error("{0}")]
    BodyParse(String),

    /// The request body could not be encoded as JSON
    #[error("{0}")]
    Encode(String),
}

impl NetError {
    /// Classify a reqwest error raised before or while receiving headers
    pub fn from_send(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            NetError::Transport(format!("timed out: {}", error))
        } else if error.is_connect() {
            NetError::Transport(format!("connection failed: {}", error))
        } else {
            NetError::Transport(format!("request failed: {}", error))
        }
    }

    /// Short machine-friendly name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            NetError::Transport(_) => "transport",
            NetError::Truncated(_) => "truncated",
            NetError::HttpStatus { .. } => "http_status",
            NetError::BodyParse(_) => "body_parse",
            NetError::Encode(_) => "encode",
        }
    }
}

/// Raised by [`Console::critical`](crate::console::Console::critical).
///
/// The console only prints; the entry point turns this into exit code 1.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct Fatal {
    pub message: String,
}

impl Fatal {
    pub fn new(message: impl Into<String>) -> Self {
        Fatal {
            message: message.into(),
        }
    }
}
