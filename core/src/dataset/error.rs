//! Error types for loading the sales dataset

use std::path::PathBuf;

use arrow::error::ArrowError;
use thiserror::Error;

/// Fatal load-time errors. Any of these aborts startup; no partial dataset is kept.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read sales data")]
    Read(#[from] std::io::Error),

    #[error("failed to decode CSV")]
    Csv(#[from] ArrowError),

    #[error("missing required column(s): {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("row {row}: empty value in column {column}")]
    MissingValue { row: usize, column: &'static str },

    #[error("row {row}: cannot parse date '{value}' with format '{format}'")]
    InvalidDate {
        row: usize,
        value: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("row {row}: {column} must be a finite non-negative number, got {value}")]
    InvalidAmount {
        row: usize,
        column: &'static str,
        value: f64,
    },
}
