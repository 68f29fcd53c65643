//! Required-value completeness check.
//!
//! Guards against the search or the token codec silently dropping values of
//! the nominated field. Missing values are fatal; values outside the
//! reference are only logged.

use cdm_model::ConstraintList;
use tracing::{info, warn};

use crate::error::ValidationError;
use crate::reference::ReferenceCatalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletenessReport {
    pub field: String,
    pub partition: String,
    pub required: usize,
    pub found: usize,
    /// Values present in the constraints but absent from the reference.
    pub unexpected: Vec<String>,
}

pub fn check_required_values(
    catalog: &ReferenceCatalog,
    partition: &str,
    constraints: &ConstraintList,
) -> Result<CompletenessReport, ValidationError> {
    let required = catalog.required(partition)?;
    let field = catalog.field();
    let found = constraints
        .values_of(field)
        .ok_or_else(|| ValidationError::MissingField {
            field: field.to_string(),
        })?;

    let missing: Vec<String> = required.difference(&found).cloned().collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingRequiredValues {
            field: field.to_string(),
            partition: partition.to_string(),
            missing,
        });
    }

    let unexpected: Vec<String> = found.difference(required).cloned().collect();
    if !unexpected.is_empty() {
        warn!(
            field,
            partition,
            values = ?unexpected,
            "constraints contain values outside the reference set"
        );
    }
    info!(
        field,
        partition,
        required = required.len(),
        "required values present"
    );

    Ok(CompletenessReport {
        field: field.to_string(),
        partition: partition.to_string(),
        required: required.len(),
        found: found.len(),
        unexpected,
    })
}
