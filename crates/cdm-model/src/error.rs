use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid field name: {0:?}")]
    InvalidFieldName(String),
    #[error("duplicate field name: {0}")]
    DuplicateField(String),
    #[error("record {index} has {found} values, expected {expected}")]
    RecordArity {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("constraint {index} has {found} value lists, expected {expected}")]
    ConstraintArity {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("constraint {index} has an empty value list for field {field}")]
    EmptyValueList { index: usize, field: String },
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("field sets differ: expected {expected:?}, found {found:?}")]
    FieldSetMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
