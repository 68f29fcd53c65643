//! Data model for categorical constraint minimisation.
//!
//! Records assign one value to every field; constraints generalise each
//! field to a value list and denote the Cartesian product of those lists.

pub mod constraint;
pub mod error;
pub mod ids;
pub mod options;
pub mod record;

pub use constraint::{Constraint, ConstraintList, ConstraintMap};
pub use error::{ModelError, Result};
pub use ids::{FieldName, field_names};
pub use options::{
    DEFAULT_MAX_FIELDS, DEFAULT_MAX_ROUNDS, MinimiseOptions, SearchStrategyKind,
};
pub use record::{Record, RecordSet};
