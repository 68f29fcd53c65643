//! Internal code to external term translation.
//!
//! Field names are renamed first, then every value of a renamed field is
//! looked up in the vocabulary of its new name. Fields without a rename pass
//! through untouched.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use cdm_model::ConstraintMap;

use crate::error::{MapError, Result};

const BUILTIN_VOCABULARY: &str = include_str!("../reference/vocabulary.json");
const BUILTIN_ORIGIN: &str = "<builtin>";

/// Internal field name and the external name it is published under.
pub const FIELD_RENAMES: &[(&str, &str)] = &[
    ("report_type", "frequency"),
    ("data_policy_licence", "intended_use"),
    ("quality_flag", "data_quality"),
    ("variable", "variable"),
];

/// A field whose value list, when exactly `from`, is widened to `to`.
struct Superset {
    field: &'static str,
    from: &'static [&'static str],
    to: &'static [&'static str],
}

const SUPERSETS: &[Superset] = &[Superset {
    field: "data_quality",
    from: &["quality_controlled"],
    to: &["all_data", "quality_controlled"],
}];

pub fn external_name(field: &str) -> Option<&'static str> {
    FIELD_RENAMES
        .iter()
        .find(|(internal, _)| *internal == field)
        .map(|(_, external)| *external)
}

/// Code → term tables keyed by external field name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary {
    fields: BTreeMap<String, BTreeMap<String, String>>,
}

impl Vocabulary {
    /// The vocabulary embedded in the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_VOCABULARY, Path::new(BUILTIN_ORIGIN))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text, path)
    }

    /// Parses vocabulary JSON; `origin` is only used in error messages.
    pub fn from_json_str(text: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| MapError::Json {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn term(&self, field: &str, code: &str) -> Result<&str> {
        let table = self
            .fields
            .get(field)
            .ok_or_else(|| MapError::MissingVocabulary {
                field: field.to_string(),
            })?;
        table
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| MapError::UnknownCode {
                field: field.to_string(),
                code: code.to_string(),
            })
    }

    /// Renames fields, translates their codes and applies superset widening.
    ///
    /// Two input fields that publish under the same name, such as
    /// `report_type` next to an existing `frequency`, fail with
    /// [`MapError::FieldCollision`]: keeping either one would silently drop
    /// the other's values from the published constraint.
    pub fn translate(&self, constraint: &ConstraintMap) -> Result<ConstraintMap> {
        let mut out = ConstraintMap::new();
        let mut sources: BTreeMap<String, &str> = BTreeMap::new();
        for (field, values) in constraint {
            let (name, values) = match external_name(field) {
                Some(external) => {
                    let terms = values
                        .iter()
                        .map(|code| self.term(external, code).map(str::to_string))
                        .collect::<Result<Vec<_>>>()?;
                    (external.to_string(), terms)
                }
                None => (field.clone(), values.clone()),
            };
            if let Some(first) = sources.insert(name.clone(), field) {
                return Err(MapError::FieldCollision {
                    field: name,
                    first: first.to_string(),
                    second: field.clone(),
                });
            }
            out.insert(name, values);
        }

        for superset in SUPERSETS {
            if let Some(values) = out.get_mut(superset.field)
                && values.iter().map(String::as_str).eq(superset.from.iter().copied())
            {
                debug!(field = superset.field, "widening to superset");
                *values = superset.to.iter().map(|s| (*s).to_string()).collect();
            }
        }
        Ok(out)
    }
}
