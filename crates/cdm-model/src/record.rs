//! Flat record sets.
//!
//! A record assigns exactly one value to every field. Records are stored as
//! rows aligned with the owning set's field list so that field orders can be
//! expressed as index permutations.

use std::collections::BTreeSet;

use crate::constraint::{Constraint, ConstraintList};
use crate::error::{ModelError, Result};
use crate::ids::FieldName;

/// One value per field, aligned with [`RecordSet::fields`].
pub type Record = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    fields: Vec<FieldName>,
    records: Vec<Record>,
}

impl RecordSet {
    /// Creates a record set, checking that every record has one value per field.
    pub fn new(fields: Vec<FieldName>, records: Vec<Record>) -> Result<Self> {
        check_unique(&fields)?;
        for (index, record) in records.iter().enumerate() {
            if record.len() != fields.len() {
                return Err(ModelError::RecordArity {
                    index,
                    expected: fields.len(),
                    found: record.len(),
                });
            }
        }
        Ok(Self { fields, records })
    }

    pub fn fields(&self) -> &[FieldName] {
        &self.fields
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.as_str() == name)
    }

    /// The distinct records, in byte-wise order over the field list.
    pub fn to_set(&self) -> BTreeSet<Record> {
        self.records.iter().cloned().collect()
    }

    /// The trivial, uncompacted constraint list: one singleton constraint per record.
    pub fn to_singletons(&self) -> ConstraintList {
        let constraints = self
            .records
            .iter()
            .map(|record| Constraint::from_record(record))
            .collect();
        ConstraintList::from_parts_unchecked(self.fields.clone(), constraints)
    }

    /// Returns the same records with columns rearranged into `order`.
    ///
    /// `order` must name exactly the fields of this set.
    pub fn reordered(&self, order: &[FieldName]) -> Result<Self> {
        let indices = projection(&self.fields, order)?;
        let records = self
            .records
            .iter()
            .map(|record| indices.iter().map(|&idx| record[idx].clone()).collect())
            .collect();
        Ok(Self {
            fields: order.to_vec(),
            records,
        })
    }

    /// Sorts the records ascending, comparing values in field-list order.
    pub fn sort(&mut self) {
        self.records.sort();
    }
}

pub(crate) fn check_unique(fields: &[FieldName]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for field in fields {
        if !seen.insert(field.as_str()) {
            return Err(ModelError::DuplicateField(field.to_string()));
        }
    }
    Ok(())
}

/// For each field in `order`, its index in `fields`.
pub(crate) fn projection(fields: &[FieldName], order: &[FieldName]) -> Result<Vec<usize>> {
    let mismatch = || ModelError::FieldSetMismatch {
        expected: fields.iter().map(ToString::to_string).collect(),
        found: order.iter().map(ToString::to_string).collect(),
    };
    if order.len() != fields.len() {
        return Err(mismatch());
    }
    check_unique(order)?;
    order
        .iter()
        .map(|name| fields.iter().position(|field| field == name).ok_or_else(mismatch))
        .collect()
}
