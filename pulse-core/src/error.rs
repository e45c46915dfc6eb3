//! Core error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("missing input file: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("CSV parse error in {table} at line {line}: {message}")]
    CsvParse {
        table: &'static str,
        line: usize,
        message: String,
    },

    #[error("CSV write error: {0}")]
    CsvWrite(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
