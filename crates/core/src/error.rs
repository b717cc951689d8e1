use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Failure reported by the catalog fetch collaborator.
///
/// Always recoverable: a failed page leaves the accumulated listing intact
/// and can be retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (network, DNS, TLS, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body could not be decoded into a page.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// No response arrived within the configured fetch timeout.
    #[error("Request timed out")]
    TimedOut,
}
