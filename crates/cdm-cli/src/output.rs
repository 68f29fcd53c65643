//! JSON constraint files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;

use cdm_model::ConstraintMap;

/// Serialises `value` as JSON indented by four spaces, with a trailing newline.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("serialize constraints")?;
    buf.push(b'\n');
    String::from_utf8(buf).context("serialized JSON is not UTF-8")
}

pub fn write_constraints(path: &Path, constraints: &[ConstraintMap]) -> Result<()> {
    let json = to_json_string(constraints)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}

pub fn read_constraints(path: &Path) -> Result<Vec<ConstraintMap>> {
    read_json(path)
}
