//! Error types for log ingestion

use serde::Serialize;
use thiserror::Error;

/// Errors from the external byte-source collaborator.
///
/// The core never constructs these itself; the fetch future supplied to
/// `ingest` reports them when the underlying source cannot be read.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum FetchError {
    #[error("source unreachable: {0}")]
    Unreachable(String),

    #[error("failed to read source: {0}")]
    Io(String),
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err.to_string())
    }
}

/// Structural errors from the row parser.
///
/// Per-row problems are not errors: malformed rows are silently dropped
/// from the record sequence.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum ParseError {
    #[error("log text is empty")]
    Empty,

    #[error("header row is missing the required 'time' column")]
    MissingTimeColumn,
}

/// Errors that abort a whole ingestion.
///
/// Carried in the snapshot's error field; sticky until the next successful
/// ingest.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum IngestError {
    #[error("failed to fetch log: {0}")]
    Fetch(#[from] FetchError),

    #[error("failed to parse log: {0}")]
    Parse(#[from] ParseError),
}
