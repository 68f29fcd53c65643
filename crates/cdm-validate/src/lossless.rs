//! Losslessness check: the constraints must denote exactly the input records.

use cdm_model::{ConstraintList, Record, RecordSet};
use tracing::warn;

use crate::error::ValidationError;

const MAX_EXAMPLES: usize = 3;

/// Expands `constraints` and compares the result with `records` as sets.
///
/// Constraints may use a different field order than the records; they are
/// aligned first.
pub fn check_lossless(
    records: &RecordSet,
    constraints: &ConstraintList,
) -> Result<(), ValidationError> {
    let aligned = constraints.reordered(records.fields())?;
    let expected = records.to_set();
    let actual = aligned.expand();

    let missing: Vec<&Record> = expected.difference(&actual).collect();
    let unexpected: Vec<&Record> = actual.difference(&expected).collect();
    if missing.is_empty() && unexpected.is_empty() {
        return Ok(());
    }

    let examples = missing
        .iter()
        .map(|record| format!("-{}", render(record)))
        .chain(unexpected.iter().map(|record| format!("+{}", render(record))))
        .take(MAX_EXAMPLES)
        .collect::<Vec<_>>()
        .join(", ");
    warn!(
        missing = missing.len(),
        unexpected = unexpected.len(),
        "constraint list does not match input records"
    );
    Err(ValidationError::DataLoss {
        missing: missing.len(),
        unexpected: unexpected.len(),
        examples,
    })
}

fn render(record: &Record) -> String {
    format!("({})", record.join("|"))
}
