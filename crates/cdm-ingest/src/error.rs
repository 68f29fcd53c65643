//! Error types for counts table ingestion.

use std::path::PathBuf;

use cdm_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse delimited data in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}: no header row found")]
    EmptyTable { path: PathBuf },

    #[error("{path}:{line}: expected {expected} columns, found {found}")]
    ColumnCount {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("{path}: missing required column {column:?}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path}:{line}: count {value:?} is not a non-negative integer")]
    InvalidCount {
        path: PathBuf,
        line: u64,
        value: String,
    },

    #[error("{path}:{line}: no calendar month for year {year:?} month {month:?}")]
    InvalidMonth {
        path: PathBuf,
        line: u64,
        year: String,
        month: String,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
