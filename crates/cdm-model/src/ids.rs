#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// Name of one categorical dimension (a column of the counts table).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct FieldName(String);

impl FieldName {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidFieldName(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FieldName {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FieldName> for String {
    fn from(value: FieldName) -> Self {
        value.0
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Builds a field list from raw names, rejecting blanks and repeats.
pub fn field_names<I, S>(names: I) -> Result<Vec<FieldName>, ModelError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut fields: Vec<FieldName> = Vec::new();
    for name in names {
        let field = FieldName::new(name)?;
        if fields.contains(&field) {
            return Err(ModelError::DuplicateField(field.0));
        }
        fields.push(field);
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_name_is_trimmed() {
        let field = FieldName::new("  month ").unwrap();
        assert_eq!(field.as_str(), "month");
    }

    #[test]
    fn blank_field_name_is_rejected() {
        assert!(matches!(
            FieldName::new("   "),
            Err(ModelError::InvalidFieldName(_))
        ));
    }

    #[test]
    fn repeated_field_names_are_rejected() {
        let err = field_names(["year", "month", "year"]).unwrap_err();
        assert_eq!(err, ModelError::DuplicateField("year".to_string()));
    }
}
