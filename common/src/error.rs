//! Error taxonomy.
//!
//! Only [`StoreError`], [`SubmissionError`] and [`AccessError`] ever abort an
//! operation. Source and probe errors are carried inside
//! [`SourceResult`](crate::models::pool::SourceResult) and
//! [`ProbeOutcome`](crate::models::probe::ProbeOutcome) values.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceFetchError {
    #[error("timed out")]
    Timeout,
    #[error("HTTP {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Network(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("reading body: {0}")]
    Body(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value is not valid JSON for this key: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage backend: {0}")]
    Backend(String),
}

/// Rejection of a client-submitted ranked set. Nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("submission must be a JSON list of entries")]
    NotAList,
    #[error("entry {index} is malformed: {reason}")]
    BadEntry { index: usize, reason: String },
}

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("not authorized")]
    Unauthorized,
    #[error("no admin password is configured")]
    NoPasswordConfigured,
    #[error("wrong password")]
    WrongPassword,
    #[error("token must not be empty")]
    EmptyToken,
    #[error("token expiry of {0} days is out of range")]
    InvalidExpiry(i64),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("invalid submission: {0}")]
    InvalidSubmission(#[from] SubmissionError),
    #[error("not authorized")]
    Unauthorized,
    #[error(transparent)]
    Access(#[from] AccessError),
}
