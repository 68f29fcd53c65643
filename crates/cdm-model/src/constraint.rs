//! Generalised constraints.
//!
//! A [`Constraint`] holds a non-empty, duplicate-free value sequence per
//! field and denotes the Cartesian product of those sequences. A
//! [`ConstraintList`] denotes the union of its constraints.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ModelError, Result};
use crate::ids::FieldName;
use crate::record::{Record, check_unique, projection};

/// Field name to value list, the external shape of a constraint.
pub type ConstraintMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Constraint {
    values: Vec<Vec<String>>,
}

impl Constraint {
    /// A constraint denoting exactly one record.
    pub fn from_record(record: &[String]) -> Self {
        Self {
            values: record.iter().map(|value| vec![value.clone()]).collect(),
        }
    }

    /// Wraps per-field value lists. Shape is checked when the constraint
    /// joins a [`ConstraintList`].
    pub fn from_values(values: Vec<Vec<String>>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Vec<String>] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Vec<String>> {
        self.values
    }

    pub fn field_values(&self, index: usize) -> Option<&[String]> {
        self.values.get(index).map(Vec::as_slice)
    }

    /// Appends `value` to the field's sequence unless it is already present.
    ///
    /// Returns `true` when the value was added.
    pub fn push_value(&mut self, index: usize, value: &str) -> bool {
        let Some(list) = self.values.get_mut(index) else {
            return false;
        };
        if list.iter().any(|existing| existing == value) {
            return false;
        }
        list.push(value.to_string());
        true
    }

    /// Number of records denoted (product of list lengths, saturating).
    pub fn cardinality(&self) -> usize {
        self.values
            .iter()
            .fold(1usize, |acc, list| acc.saturating_mul(list.len()))
    }

    /// Enumerates the denoted records, the last field varying fastest.
    pub fn expand(&self) -> Vec<Record> {
        if self.values.iter().any(Vec::is_empty) {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(self.cardinality().min(1 << 16));
        let mut cursor = vec![0usize; self.values.len()];
        loop {
            out.push(
                cursor
                    .iter()
                    .zip(&self.values)
                    .map(|(&idx, list)| list[idx].clone())
                    .collect(),
            );
            let mut pos = self.values.len();
            loop {
                if pos == 0 {
                    return out;
                }
                pos -= 1;
                cursor[pos] += 1;
                if cursor[pos] < self.values[pos].len() {
                    break;
                }
                cursor[pos] = 0;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintList {
    fields: Vec<FieldName>,
    constraints: Vec<Constraint>,
}

impl ConstraintList {
    /// Creates a list, checking each constraint has one non-empty list per field.
    pub fn new(fields: Vec<FieldName>, constraints: Vec<Constraint>) -> Result<Self> {
        check_unique(&fields)?;
        for (index, constraint) in constraints.iter().enumerate() {
            check_shape(&fields, index, constraint)?;
        }
        Ok(Self {
            fields,
            constraints,
        })
    }

    pub fn empty(fields: Vec<FieldName>) -> Result<Self> {
        Self::new(fields, Vec::new())
    }

    pub(crate) fn from_parts_unchecked(
        fields: Vec<FieldName>,
        constraints: Vec<Constraint>,
    ) -> Self {
        Self {
            fields,
            constraints,
        }
    }

    pub fn fields(&self) -> &[FieldName] {
        &self.fields
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn into_constraints(self) -> Vec<Constraint> {
        self.constraints
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.as_str() == name)
    }

    pub fn push(&mut self, constraint: Constraint) -> Result<()> {
        check_shape(&self.fields, self.constraints.len(), &constraint)?;
        self.constraints.push(constraint);
        Ok(())
    }

    /// Sum of per-constraint cardinalities. Equals the denoted record count
    /// when constraints are disjoint.
    pub fn cardinality(&self) -> usize {
        self.constraints
            .iter()
            .fold(0usize, |acc, constraint| acc.saturating_add(constraint.cardinality()))
    }

    /// The denoted record set.
    pub fn expand(&self) -> BTreeSet<Record> {
        self.constraints
            .iter()
            .flat_map(Constraint::expand)
            .collect()
    }

    /// Every value that appears for `field` in any constraint.
    pub fn values_of(&self, field: &str) -> Option<BTreeSet<String>> {
        let index = self.field_index(field)?;
        Some(
            self.constraints
                .iter()
                .flat_map(|constraint| constraint.values[index].iter().cloned())
                .collect(),
        )
    }

    /// Rearranges every constraint's lists into `order`.
    pub fn reordered(&self, order: &[FieldName]) -> Result<Self> {
        let indices = projection(&self.fields, order)?;
        let constraints = self
            .constraints
            .iter()
            .map(|constraint| Constraint {
                values: indices
                    .iter()
                    .map(|&idx| constraint.values[idx].clone())
                    .collect(),
            })
            .collect();
        Ok(Self {
            fields: order.to_vec(),
            constraints,
        })
    }

    /// External form: one field-name to value-list mapping per constraint.
    pub fn to_maps(&self) -> Vec<ConstraintMap> {
        self.constraints
            .iter()
            .map(|constraint| {
                self.fields
                    .iter()
                    .zip(&constraint.values)
                    .map(|(field, values)| (field.to_string(), values.clone()))
                    .collect()
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a ConstraintList {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}

fn check_shape(fields: &[FieldName], index: usize, constraint: &Constraint) -> Result<()> {
    if constraint.values.len() != fields.len() {
        return Err(ModelError::ConstraintArity {
            index,
            expected: fields.len(),
            found: constraint.values.len(),
        });
    }
    if let Some(pos) = constraint.values.iter().position(Vec::is_empty) {
        return Err(ModelError::EmptyValueList {
            index,
            field: fields[pos].to_string(),
        });
    }
    Ok(())
}
