//! Error types for scanmerge-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that abort a reconciliation run
///
/// Per-record anomalies (malformed rows, duplicate barcodes, reconciliation
/// gaps) are never errors; see [`crate::Diagnostic`].
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to open an input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stream-level CSV failure while reading an input
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to create, write or finalize the report file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV writer failure while writing the report
    #[error("CSV write error in '{path}': {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
