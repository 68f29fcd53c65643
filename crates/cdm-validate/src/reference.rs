//! Required-value reference catalog.
//!
//! For each dataset partition the catalog lists the values of one nominated
//! field that a minimised constraint list must still contain. Partition tags
//! are matched case-insensitively.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ValidationError;

const BUILTIN_CATALOG: &str = include_str!("../reference/catalog.toml");
const BUILTIN_ORIGIN: &str = "<builtin>";

fn default_field() -> String {
    "variable".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    #[serde(default = "default_field")]
    field: String,
    #[serde(default)]
    partitions: BTreeMap<String, PartitionReference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartitionReference {
    pub required: BTreeSet<String>,
}

#[derive(Debug, Clone)]
pub struct ReferenceCatalog {
    field: String,
    /// Keyed by lowercase partition tag.
    partitions: BTreeMap<String, PartitionReference>,
}

impl ReferenceCatalog {
    /// The catalog embedded in the crate.
    pub fn builtin() -> Result<Self, ValidationError> {
        Self::from_toml_str(BUILTIN_CATALOG, Path::new(BUILTIN_ORIGIN))
    }

    pub fn load(path: &Path) -> Result<Self, ValidationError> {
        let text = fs::read_to_string(path).map_err(|source| ValidationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Parses catalog TOML; `origin` is only used in error messages.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ValidationError> {
        let raw: RawCatalog = toml::from_str(text).map_err(|source| ValidationError::Toml {
            path: origin.to_path_buf(),
            source,
        })?;
        Ok(Self {
            field: raw.field,
            partitions: raw
                .partitions
                .into_iter()
                .map(|(tag, reference)| (tag.to_lowercase(), reference))
                .collect(),
        })
    }

    /// The nominated "must not be lost" field.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn partitions(&self) -> impl Iterator<Item = &str> {
        self.partitions.keys().map(String::as_str)
    }

    pub fn required(&self, partition: &str) -> Result<&BTreeSet<String>, ValidationError> {
        self.partitions
            .get(&partition.to_lowercase())
            .map(|reference| &reference.required)
            .ok_or_else(|| ValidationError::UnknownPartition {
                partition: partition.to_string(),
                known: self.partitions().map(str::to_string).collect(),
            })
    }
}

/// Chooses the partition to check: the explicit tag if given, otherwise the
/// single distinct tag found in the input's domain column.
///
/// Returns `Ok(None)` when there is no tag at all. Several distinct tags
/// without an explicit choice is an error, since the required values differ
/// per partition.
pub fn resolve_partition(
    explicit: Option<&str>,
    tags: &BTreeSet<String>,
) -> Result<Option<String>, ValidationError> {
    if let Some(tag) = explicit {
        return Ok(Some(tag.trim().to_string()));
    }
    let distinct: BTreeSet<&str> = tags
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .collect();
    let mut iter = distinct.iter();
    match (iter.next(), iter.next()) {
        (None, _) => Ok(None),
        (Some(only), None) => Ok(Some((*only).to_string())),
        (Some(_), Some(_)) => Err(ValidationError::AmbiguousPartition {
            tags: distinct.iter().map(|tag| (*tag).to_string()).collect(),
        }),
    }
}
