use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for wrangling operations.
pub type WrangleResult<T> = Result<T, WrangleError>;

/// Error type returned by wrangling and codec functions.
///
/// A single error enum shared by the raw reader, the typed codec, the wrangle steps and the
/// test fixtures.
#[derive(Debug, Error)]
pub enum WrangleError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The type sidecar could not be encoded or decoded.
    #[error("sidecar error: {0}")]
    Json(#[from] serde_json::Error),

    /// A typed CSV was read without its type sidecar.
    #[error("missing type sidecar {path} for table {table}")]
    MissingSidecar { table: PathBuf, path: PathBuf },

    /// The data does not conform to the expected schema (missing columns, width overflow, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A column required by a wrangle step is absent.
    #[error("missing required column '{column}' in {table}")]
    MissingColumn { column: String, table: String },

    /// A value cannot be written so that it reads back unchanged.
    #[error("cannot write value at row {row} column '{column}': {message}")]
    Unrepresentable {
        row: usize,
        column: String,
        message: String,
    },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}
