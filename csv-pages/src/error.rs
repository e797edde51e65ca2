//! Error types for csv-pages.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for csv-pages operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The input path is missing or is not a regular file.
    #[error("CSV file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The input could not be read or decoded as CSV.
    #[error("error reading CSV: {0}")]
    Parse(String),

    /// The header row lacks one of the required columns.
    #[error("CSV must contain columns: Topic, Pages (missing: {})", .missing.join(", "))]
    Schema { missing: Vec<&'static str> },

    /// A render setting is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Parse(err.to_string())
    }
}
