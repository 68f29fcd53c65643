//! Single-pass merge for one field order.
//!
//! Records are sorted by their values taken in the field order, then swept
//! once. A record that differs from its predecessor only in the trailing
//! field of the order extends the open constraint's trailing value list;
//! any other record opens a new singleton constraint. Leading fields are
//! therefore always singletons within one pass.

use std::cmp::Ordering;

use cdm_model::{Constraint, ConstraintList, Record, RecordSet};

use crate::error::{MinimiseError, Result};

/// Merges `records` under `order`, a permutation of field indices.
///
/// The returned constraints are expressed in the record set's own field
/// order; `order` only decides sorting and which field may widen.
pub fn merge(order: &[usize], records: &RecordSet) -> Result<ConstraintList> {
    check_order(order, records.fields().len())?;
    Ok(merge_unchecked(order, records)?)
}

pub(crate) fn merge_unchecked(
    order: &[usize],
    records: &RecordSet,
) -> cdm_model::Result<ConstraintList> {
    let Some((&trailing, leading)) = order.split_last() else {
        return ConstraintList::new(records.fields().to_vec(), Vec::new());
    };

    let mut sorted: Vec<&Record> = records.records().iter().collect();
    sorted.sort_by(|left, right| compare_in_order(order, left, right));

    let mut constraints: Vec<Constraint> = Vec::new();
    let mut previous: Option<&Record> = None;
    for record in sorted {
        let extends = previous.is_some_and(|prev| {
            leading
                .iter()
                .all(|&idx| prev[idx] == record[idx])
        });
        match constraints.last_mut() {
            Some(open) if extends => {
                open.push_value(trailing, &record[trailing]);
            }
            _ => constraints.push(Constraint::from_record(record)),
        }
        previous = Some(record);
    }

    ConstraintList::new(records.fields().to_vec(), constraints)
}

fn compare_in_order(order: &[usize], left: &Record, right: &Record) -> Ordering {
    order
        .iter()
        .map(|&idx| left[idx].cmp(&right[idx]))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

pub(crate) fn check_order(order: &[usize], field_count: usize) -> Result<()> {
    let mut seen = vec![false; field_count];
    let valid = order.len() == field_count
        && order.iter().all(|&idx| {
            idx < field_count && !std::mem::replace(&mut seen[idx], true)
        });
    if valid {
        Ok(())
    } else {
        Err(MinimiseError::InvalidFieldOrder {
            order: order.to_vec(),
            field_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use cdm_model::field_names;

    use super::*;

    fn record_set(fields: &[&str], rows: &[&[&str]]) -> RecordSet {
        RecordSet::new(
            field_names(fields.iter().copied()).unwrap(),
            rows.iter()
                .map(|row| row.iter().map(|v| (*v).to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    fn lists(list: &ConstraintList) -> Vec<Vec<Vec<String>>> {
        list.iter().map(|c| c.values().to_vec()).collect()
    }

    fn v(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn trailing_field_widens_when_leading_fields_match() {
        let records = record_set(&["a", "b"], &[&["1", "x"], &["1", "y"], &["2", "x"]]);
        let merged = merge(&[0, 1], &records).unwrap();
        assert_eq!(
            lists(&merged),
            vec![vec![v(&["1"]), v(&["x", "y"])], vec![v(&["2"]), v(&["x"])]]
        );
    }

    #[test]
    fn reversed_order_cannot_merge() {
        let records = record_set(&["a", "b"], &[&["1", "x"], &["1", "y"], &["2", "z"]]);
        assert_eq!(merge(&[0, 1], &records).unwrap().len(), 2);
        let merged = merge(&[1, 0], &records).unwrap();
        assert_eq!(merged.len(), 3);
        // Results stay in the record set's field order.
        assert_eq!(merged.fields(), records.fields());
    }

    #[test]
    fn either_order_can_widen_a_shared_leading_value() {
        // b=x is shared by a=1 and a=2, so trailing `a` widens under (b, a).
        let records = record_set(&["a", "b"], &[&["1", "x"], &["1", "y"], &["2", "x"]]);
        let merged = merge(&[1, 0], &records).unwrap();
        assert_eq!(
            lists(&merged),
            vec![vec![v(&["1", "2"]), v(&["x"])], vec![v(&["1"]), v(&["y"])]]
        );
    }

    #[test]
    fn sort_is_applied_before_sweeping() {
        let records = record_set(&["a", "b"], &[&["2", "x"], &["1", "y"], &["1", "x"]]);
        let merged = merge(&[0, 1], &records).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.constraints()[0].values(), &[v(&["1"]), v(&["x", "y"])]);
    }

    #[test]
    fn duplicate_records_do_not_repeat_trailing_values() {
        let records = record_set(&["a", "b"], &[&["1", "x"], &["1", "x"], &["1", "y"]]);
        let merged = merge(&[0, 1], &records).unwrap();
        assert_eq!(lists(&merged), vec![vec![v(&["1"]), v(&["x", "y"])]]);
    }

    #[test]
    fn single_field_collapses_into_one_constraint() {
        let records = record_set(&["month"], &[&["02"], &["01"], &["03"]]);
        let merged = merge(&[0], &records).unwrap();
        assert_eq!(lists(&merged), vec![vec![v(&["01", "02", "03"])]]);
    }

    #[test]
    fn values_compare_as_strings() {
        let records = record_set(&["a", "b"], &[&["10", "x"], &["9", "x"], &["10", "y"]]);
        let merged = merge(&[0, 1], &records).unwrap();
        assert_eq!(
            lists(&merged),
            vec![vec![v(&["10"]), v(&["x", "y"])], vec![v(&["9"]), v(&["x"])]]
        );
    }

    #[test]
    fn rejects_orders_that_are_not_permutations() {
        let records = record_set(&["a", "b"], &[&["1", "x"]]);
        assert!(matches!(
            merge(&[0, 0], &records),
            Err(MinimiseError::InvalidFieldOrder { .. })
        ));
        assert!(matches!(
            merge(&[0], &records),
            Err(MinimiseError::InvalidFieldOrder { .. })
        ));
        assert!(matches!(
            merge(&[0, 2], &records),
            Err(MinimiseError::InvalidFieldOrder { .. })
        ));
    }

    #[test]
    fn empty_input_yields_empty_list() {
        let records = record_set(&["a", "b"], &[]);
        assert!(merge(&[1, 0], &records).unwrap().is_empty());
    }
}
