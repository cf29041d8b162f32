use super::kind::{Field, Kind};
use thiserror::Error;

/// Failures talking to the media endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The request did not complete (connection, DNS, timeout).
    #[error("request failed: {0}")]
    Network(String),

    /// The endpoint answered with a non-2xx status.
    #[error("endpoint rejected the request: HTTP {status}")]
    Rejected { status: u16 },

    /// A list response without a usable `items` array.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Problems with a draft before anything is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(Field),

    #[error("{field} does not apply to {kind}")]
    NotApplicable { field: Field, kind: Kind },

    #[error("{field} must be a whole number, got '{value}'")]
    InvalidNumber { field: Field, value: String },

    #[error("unknown field '{0}'")]
    UnknownField(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
