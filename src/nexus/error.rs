use thiserror::Error;

/// Failure of a single Nexus API call
#[derive(Debug, Error)]
pub enum NexusError {
    /// The addressed object does not exist (HTTP 404)
    #[error("not found")]
    NotFound,
    /// Any status the endpoint does not document as success
    #[error("unexpected response status {status}: {body}")]
    UnexpectedResponse { status: u16, body: String },
    /// Connection, TLS or timeout failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid Nexus base URL '{0}'")]
    InvalidBaseUrl(String),
    /// The operator is shutting down
    #[error("request cancelled")]
    Cancelled,
}

impl NexusError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
