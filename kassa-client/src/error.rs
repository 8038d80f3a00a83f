//! Error type for client operations.

use kassa_types::{ApiError, Payment, Refund};

/// Result alias used throughout the client.
pub type Result<T> = std::result::Result<T, KassaError>;

/// Object decoded from a response that also carried an error report.
#[derive(Debug, Clone, PartialEq)]
pub enum Partial {
    Payment(Payment),
    Refund(Refund),
}

impl Partial {
    pub fn as_payment(&self) -> Option<&Payment> {
        match self {
            Partial::Payment(p) => Some(p),
            Partial::Refund(_) => None,
        }
    }

    pub fn as_refund(&self) -> Option<&Refund> {
        match self {
            Partial::Refund(r) => Some(r),
            Partial::Payment(_) => None,
        }
    }
}

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum KassaError {
    /// Request could not be built or the exchange failed on the wire.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-200 response with an error body the API documents.
    #[error("API error: {status} - {error}")]
    Api { status: u16, error: ApiError },

    /// Non-200 response whose body could not be read as an error report.
    #[error("unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 200 response whose body reports an error. The decoded object is kept
    /// so callers can still look at what the API sent.
    #[error("{error}")]
    Rejected {
        error: ApiError,
        partial: Box<Partial>,
    },

    #[error("request cancelled")]
    Cancelled,

    #[error("request deadline exceeded")]
    DeadlineExceeded,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl KassaError {
    /// The error report sent by the API, for `Api` and `Rejected` errors.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            KassaError::Api { error, .. } | KassaError::Rejected { error, .. } => Some(error),
            _ => None,
        }
    }

    /// HTTP status of a failed response, if the failure came with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            KassaError::Api { status, .. } | KassaError::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            KassaError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The partially decoded object of a `Rejected` error.
    pub fn partial(&self) -> Option<&Partial> {
        match self {
            KassaError::Rejected { partial, .. } => Some(partial),
            _ => None,
        }
    }
}
