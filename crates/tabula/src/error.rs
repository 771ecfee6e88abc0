//! Error types for loading table definitions and saving exports.
//!
//! The table engine itself never fails; errors only come from the edges
//! where files are read or written.

use thiserror::Error;

/// Errors raised while loading definitions or records, or saving exports.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The table definition is not valid TOML for the expected shape.
    #[error("invalid table definition: {0}")]
    Toml(#[from] toml::de::Error),

    /// The record payload is not valid JSON.
    #[error("invalid record json: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing CSV failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// An export file name would leave the sink's directory.
    #[error("invalid export file name: {0:?}")]
    InvalidFileName(String),

    /// The record payload parsed but does not hold a list of objects.
    #[error("invalid records: {0}")]
    InvalidRecords(String),

    /// The table definition declares no columns.
    #[error("table definition has no columns")]
    EmptyColumns,
}

impl Error {
    /// Creates an invalid-records error with the given message.
    pub fn invalid_records(message: impl Into<String>) -> Self {
        Self::InvalidRecords(message.into())
    }
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
