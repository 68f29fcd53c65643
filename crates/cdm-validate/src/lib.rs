//! Post-minimisation checks.

pub mod completeness;
pub mod error;
pub mod lossless;
pub mod reference;

pub use completeness::{CompletenessReport, check_required_values};
pub use error::ValidationError;
pub use lossless::check_lossless;
pub use reference::{PartitionReference, ReferenceCatalog, resolve_partition};
