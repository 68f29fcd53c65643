//! Token codec for refinement rounds.
//!
//! Between rounds each constraint's value lists are flattened into single
//! string tokens so the constraints can be searched again as scalar
//! pseudo-records. Format version 1 joins values with `,`, escaping `\` as
//! `\\` and `,` as `\,`. A single value encodes as itself (escaped), so
//! decoding never nests.

use cdm_model::{Constraint, ConstraintList, ModelError, RecordSet};
use thiserror::Error;

/// Version of the token format produced by [`encode_values`].
pub const CODEC_VERSION: u32 = 1;

const DELIMITER: char = ',';
const ESCAPE: char = '\\';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("token {token:?} ends with a dangling escape")]
    DanglingEscape { token: String },
    #[error("token {token:?} contains unsupported escape sequence \\{found}")]
    InvalidEscape { token: String, found: char },
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Encodes one value list into a single token.
pub fn encode_values(values: &[String]) -> String {
    let mut token = String::new();
    for (idx, value) in values.iter().enumerate() {
        if idx > 0 {
            token.push(DELIMITER);
        }
        for ch in value.chars() {
            if ch == ESCAPE || ch == DELIMITER {
                token.push(ESCAPE);
            }
            token.push(ch);
        }
    }
    token
}

/// Decodes one token back into its value list.
pub fn decode_token(token: &str) -> Result<Vec<String>, CodecError> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut chars = token.chars();
    while let Some(ch) = chars.next() {
        match ch {
            ESCAPE => match chars.next() {
                Some(next @ (ESCAPE | DELIMITER)) => current.push(next),
                Some(found) => {
                    return Err(CodecError::InvalidEscape {
                        token: token.to_string(),
                        found,
                    });
                }
                None => {
                    return Err(CodecError::DanglingEscape {
                        token: token.to_string(),
                    });
                }
            },
            DELIMITER => values.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    values.push(current);
    Ok(values)
}

/// Decodes a list of tokens into one flat value list, in token order,
/// skipping values already seen.
pub fn decode_tokens(tokens: &[String]) -> Result<Vec<String>, CodecError> {
    let mut values: Vec<String> = Vec::new();
    for token in tokens {
        for value in decode_token(token)? {
            if !values.contains(&value) {
                values.push(value);
            }
        }
    }
    Ok(values)
}

/// Flattens each constraint into a pseudo-record of tokens (same field order).
pub fn encode_constraints(list: &ConstraintList) -> Result<RecordSet, CodecError> {
    let records = list
        .iter()
        .map(|constraint| {
            constraint
                .values()
                .iter()
                .map(|values| encode_values(values))
                .collect()
        })
        .collect();
    Ok(RecordSet::new(list.fields().to_vec(), records)?)
}

/// Restores true value lists from a constraint list whose values are tokens.
pub fn decode_constraints(list: &ConstraintList) -> Result<ConstraintList, CodecError> {
    let mut constraints = Vec::with_capacity(list.len());
    for constraint in list {
        let values = constraint
            .values()
            .iter()
            .map(|tokens| decode_tokens(tokens))
            .collect::<Result<Vec<_>, _>>()?;
        constraints.push(Constraint::from_values(values));
    }
    Ok(ConstraintList::new(list.fields().to_vec(), constraints)?)
}
