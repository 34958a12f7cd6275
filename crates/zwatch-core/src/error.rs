//! Error types for the ZWatch client

/// Errors that can occur in the ZWatch client
#[derive(Debug, thiserror::Error)]
pub enum ZWatchError {
    /// Rejected locally before any request was sent
    #[error("{0}")]
    Validation(String),

    #[error("Authentication rejected with HTTP {status}")]
    Auth { status: u16 },

    #[error("{endpoint} failed with HTTP {status}")]
    Request { endpoint: String, status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Credential storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ZWatchError {
    /// True for failures where no usable answer came back from the service
    pub fn is_transport(&self) -> bool {
        matches!(self, ZWatchError::Network(_) | ZWatchError::Decode(_))
    }
}

/// Result type alias for ZWatch client operations
pub type Result<T> = std::result::Result<T, ZWatchError>;
