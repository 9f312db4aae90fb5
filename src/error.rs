//! Error types for artist search
//!
//! Fetch failures never escape the UI: they end up in the cache's error
//! state and render as an inline message.

use thiserror::Error;

/// Failure of a single catalog request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request could not complete: {0}")]
    Transport(String),

    #[error("TicketMaster API error: {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Failure to read the optional config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    Io(String, std::io::Error),

    #[error("Failed to parse config file '{0}': {1}")]
    Parse(String, serde_json::Error),
}
