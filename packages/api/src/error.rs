//! Error types for the transport and accessor layers.

use thiserror::Error;

/// Failure of a single HTTP call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("unexpected transport failure: {0}")]
    Unknown(String),
}

impl TransportError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server rejected the credentials (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// A draft failed validation before it was sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} is not a valid date (expected YYYY-MM-DD): {value}")]
    InvalidDate { field: &'static str, value: String },
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: String, end: String },
    #[error("unknown project status: {0}")]
    UnknownStatus(String),
}

/// Error returned by every resource accessor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The transport failed; carried unmodified.
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("invalid payload: {0}")]
    InvalidDraft(#[from] DraftError),
    /// The response arrived but did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    Decode(String),
    /// An authenticated call was attempted without a persisted token.
    #[error("not signed in")]
    MissingToken,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_unauthorized())
    }

    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}
