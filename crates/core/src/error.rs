//! Pipeline error model.

use thiserror::Error;

/// Result type used by the fallible pipeline stages (remote fetch, aggregation).
pub type InvoiceResult<T> = Result<T, InvoiceError>;

/// Failure taxonomy for the fetch-process-present pipeline.
///
/// Nothing in this enum crosses the orchestration boundary as a raw error:
/// the repository and orchestration stages fold every variant into a
/// [`LoadResult::Error`](crate::LoadResult::Error) message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvoiceError {
    /// The network call could not complete (timeout, refused connection, broken body stream).
    #[error("Network error occurred: {0}")]
    Transport(String),

    /// The remote answered with a non-success status code.
    #[error("HTTP {status} {reason}")]
    Protocol { status: u16, reason: String },

    /// The remote answered successfully but without a decodable payload.
    #[error("{0}")]
    EmptyBody(String),

    /// Unexpected internal failure while computing totals.
    #[error("{0}")]
    Aggregation(String),

    /// Anything else. `None` means the failure carried no description.
    #[error("{}", .0.as_deref().unwrap_or("Unknown error"))]
    Unknown(Option<String>),
}

impl InvoiceError {
    pub fn transport(cause: impl Into<String>) -> Self {
        Self::Transport(cause.into())
    }

    pub fn protocol(status: u16, reason: impl Into<String>) -> Self {
        Self::Protocol {
            status,
            reason: reason.into(),
        }
    }

    pub fn empty_body(msg: impl Into<String>) -> Self {
        Self::EmptyBody(msg.into())
    }

    pub fn aggregation(msg: impl Into<String>) -> Self {
        Self::Aggregation(msg.into())
    }

    pub fn unknown(description: Option<String>) -> Self {
        Self::Unknown(description)
    }

    /// Human-readable description, if the failure has one.
    pub fn description(&self) -> Option<String> {
        match self {
            InvoiceError::Unknown(None) => None,
            other => Some(other.to_string()),
        }
    }

    /// Status code carried by a protocol failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            InvoiceError::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }
}
