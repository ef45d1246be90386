//! Terminal protocol outcomes of the method dispatcher.

use thiserror::Error;

/// A request outcome that ends processing with a bodiless status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DavError {
    /// Resource absent, or invisible to the caller.
    #[error("resource not found")]
    NotFound,

    /// Path outside the mount prefix, or the office client workaround.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Malformed or ambiguous request body.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Destination host differs from the request host.
    #[error("destination host does not match request host")]
    BadGateway,

    /// Move or copy onto the resource itself.
    #[error("source and destination are the same")]
    Forbidden,

    /// Move with a partial depth.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Element with an unresolvable namespace in the request body.
    #[error("malformed namespace on element {0}")]
    MalformedNamespace(String),

    /// Lock check failed with the given status.
    #[error("lock conflict ({0})")]
    LockConflict(u16),

    /// MOVE or COPY without a `Destination` header.
    #[error("missing Destination header")]
    MissingDestination,

    /// Response body could not be produced.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DavError {
    /// Returns the HTTP status code for this outcome.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::BadRequest(_) | Self::MalformedNamespace(_) | Self::MissingDestination => 400,
            Self::BadGateway => 502,
            Self::Forbidden => 403,
            Self::Conflict(_) => 409,
            Self::LockConflict(code) => *code,
            Self::Internal(_) => 500,
        }
    }
}

/// Result type for dispatcher outcomes.
pub type DavResult<T> = std::result::Result<T, DavError>;
