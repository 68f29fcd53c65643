use cdm_model::ModelError;
use cdm_validate::ValidationError;
use thiserror::Error;

use crate::codec::CodecError;

#[derive(Debug, Error)]
pub enum MinimiseError {
    #[error("cannot minimise records with no fields")]
    EmptyFieldSet,
    #[error("{count} fields exceed the configured maximum of {max} for field order search")]
    TooManyFields { count: usize, max: usize },
    #[error("field order {order:?} is not a permutation of {field_count} fields")]
    InvalidFieldOrder { order: Vec<usize>, field_count: usize },
    #[error("search cancelled")]
    Cancelled,
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, MinimiseError>;
