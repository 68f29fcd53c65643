//! Day values implied by a constraint's reporting frequency.

use tracing::debug;

use cdm_model::ConstraintMap;

use crate::calendar::{DAY_FIELD, day_values, expand_by_month_length};
use crate::error::Result;

pub const FREQUENCY_FIELD: &str = "frequency";

/// Adds `day` values according to the `frequency` field.
///
/// A constraint listing several frequencies is first split into one
/// constraint per frequency, in the order listed, so each gets its own days.
/// Monthly data gets day `01`; daily and sub-daily data are split by month
/// length. Any other frequency, or none, leaves the constraint unchanged.
pub fn add_time_inputs(constraint: ConstraintMap) -> Result<Vec<ConstraintMap>> {
    let mut out = Vec::new();
    for single in split_by_frequency(constraint) {
        out.extend(add_single_frequency_inputs(single)?);
    }
    Ok(out)
}

fn split_by_frequency(constraint: ConstraintMap) -> Vec<ConstraintMap> {
    let Some(frequencies) = constraint.get(FREQUENCY_FIELD) else {
        return vec![constraint];
    };
    let mut distinct: Vec<String> = Vec::with_capacity(frequencies.len());
    for frequency in frequencies {
        if !distinct.contains(frequency) {
            distinct.push(frequency.clone());
        }
    }
    if distinct.len() < 2 {
        return vec![constraint];
    }
    debug!(frequencies = distinct.len(), "splitting constraint by frequency");
    distinct
        .into_iter()
        .map(|frequency| {
            let mut single = constraint.clone();
            single.insert(FREQUENCY_FIELD.to_string(), vec![frequency]);
            single
        })
        .collect()
}

fn add_single_frequency_inputs(constraint: ConstraintMap) -> Result<Vec<ConstraintMap>> {
    let frequency = constraint
        .get(FREQUENCY_FIELD)
        .and_then(|values| values.first())
        .map(String::as_str);
    match frequency {
        Some("monthly") => {
            let mut out = constraint;
            out.insert(DAY_FIELD.to_string(), day_values(1));
            Ok(vec![out])
        }
        Some("daily" | "sub_daily") => expand_by_month_length(&constraint),
        other => {
            debug!(frequency = ?other, "no time inputs added");
            Ok(vec![constraint])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MONTH_FIELD;

    fn s(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn monthly_gets_first_day_only() {
        let constraint: ConstraintMap = [
            (FREQUENCY_FIELD.to_string(), s(&["monthly"])),
            (MONTH_FIELD.to_string(), s(&["02", "04"])),
        ]
        .into();
        let out = add_time_inputs(constraint).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0][DAY_FIELD], s(&["01"]));
    }

    #[test]
    fn daily_is_split_by_month() {
        let constraint: ConstraintMap = [
            (FREQUENCY_FIELD.to_string(), s(&["daily"])),
            (MONTH_FIELD.to_string(), s(&["02", "04"])),
        ]
        .into();
        let out = add_time_inputs(constraint).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[1][DAY_FIELD].len(), 30);
    }

    #[test]
    fn unknown_or_missing_frequency_is_left_alone() {
        let constraint: ConstraintMap = [(MONTH_FIELD.to_string(), s(&["02"]))].into();
        let out = add_time_inputs(constraint.clone()).unwrap();
        assert_eq!(out, vec![constraint]);

        let yearly: ConstraintMap = [(FREQUENCY_FIELD.to_string(), s(&["annual"]))].into();
        assert_eq!(add_time_inputs(yearly.clone()).unwrap(), vec![yearly]);
    }

    #[test]
    fn mixed_frequencies_each_get_their_own_days() {
        let constraint: ConstraintMap = [
            (FREQUENCY_FIELD.to_string(), s(&["monthly", "daily"])),
            (MONTH_FIELD.to_string(), s(&["01"])),
            ("variable".to_string(), s(&["air_temperature"])),
        ]
        .into();
        let out = add_time_inputs(constraint).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0][FREQUENCY_FIELD], s(&["monthly"]));
        assert_eq!(out[0][DAY_FIELD], s(&["01"]));
        assert_eq!(out[1][FREQUENCY_FIELD], s(&["daily"]));
        assert_eq!(out[1][DAY_FIELD], day_values(31));
        assert!(out.iter().all(|c| c["variable"] == s(&["air_temperature"])));
    }

    #[test]
    fn repeated_frequency_is_not_split() {
        let constraint: ConstraintMap = [
            (FREQUENCY_FIELD.to_string(), s(&["monthly", "monthly"])),
            (MONTH_FIELD.to_string(), s(&["03"])),
        ]
        .into();
        let out = add_time_inputs(constraint).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0][DAY_FIELD], s(&["01"]));
    }
}
