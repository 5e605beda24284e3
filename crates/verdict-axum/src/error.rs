use thiserror::Error;

/// Failures writing an error response
#[derive(Debug, Error)]
pub enum SinkError {
    /// Status outside `100..=999`
    #[error("invalid status code: {0}")]
    InvalidStatus(u16),

    /// The writer already holds a response
    #[error("response already sent")]
    AlreadySent,

    /// Payload could not be encoded
    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}
