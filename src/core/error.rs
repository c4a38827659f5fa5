use thiserror::Error;

/// Transport failures that end a stdio session.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to read request stream: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to write response stream: {0}")]
    Write(#[source] std::io::Error),
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}
