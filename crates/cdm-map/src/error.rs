//! Error types for constraint mapping.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("no {field} term for code {code:?}")]
    UnknownCode { field: String, code: String },

    #[error("vocabulary has no entries for field {field:?}")]
    MissingVocabulary { field: String },

    #[error("fields {first:?} and {second:?} both map to {field:?}")]
    FieldCollision {
        field: String,
        first: String,
        second: String,
    },

    #[error("February length must be 28 or 29, got {length}")]
    InvalidFebruaryLength { length: u32 },

    #[error("year {value:?} is not a number")]
    InvalidYear { value: String },

    #[error("month {value:?} is not a calendar month")]
    InvalidMonth { value: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse vocabulary {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, MapError>;
