#![deny(unsafe_code)]

use std::path::PathBuf;

use cdm_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error(
        "constraints do not reproduce the input: {missing} record(s) lost, \
         {unexpected} record(s) added (e.g. {examples})"
    )]
    DataLoss {
        missing: usize,
        unexpected: usize,
        examples: String,
    },

    #[error("unknown dataset partition {partition:?} (known: {})", known.join(", "))]
    UnknownPartition {
        partition: String,
        known: Vec<String>,
    },

    #[error(
        "cannot choose a dataset partition: the domain column holds several ({})",
        tags.join(", ")
    )]
    AmbiguousPartition { tags: Vec<String> },

    #[error(
        "required {field} value(s) missing after minimisation for partition {partition}: {}",
        missing.join(", ")
    )]
    MissingRequiredValues {
        field: String,
        partition: String,
        missing: Vec<String>,
    },

    #[error("constraints have no {field:?} field to check required values against")]
    MissingField { field: String },

    #[error("failed to read reference catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse reference catalog {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}
