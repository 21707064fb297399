//! REST API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not logged in. Run 'perfect-research login' first")]
    MissingToken,

    #[error("Session rejected by the server (status {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse API response from {endpoint}: {source}")]
    InvalidResponse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid API URL '{0}'")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is not valid JSON: {0}")]
    SessionFormat(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether the user has to log in again
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::MissingToken | ApiError::Unauthorized { .. })
    }
}
