use thiserror::Error;

/// Failure modes of one remote call. Calls are single-attempt; the first
/// error reaches the caller without retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The request never produced an HTTP status: connect failure, DNS,
    /// timeout, or a body that could not be read or decoded.
    #[error("request failed before a server response: {0}")]
    Network(String),
    #[error("resource not found")]
    NotFound,
    /// A 4xx other than 404; carries the server's message when it sent one.
    #[error("server rejected the request: {0}")]
    Rejected(String),
    #[error("server error (status {status})")]
    Server { status: u16 },
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        RemoteError::Network(err.to_string())
    }
}
