//! Splitting constraints by month length so each carries valid days only.
//!
//! A constraint over `month` (and optionally `year`) becomes one constraint
//! per month-length group, ordered 28, 29, 30, 31 days, each with an explicit
//! `day` list. February is split by year: years not divisible by four, plus
//! 1800 and 1900, have 28 days; other years divisible by four have 29.

use tracing::trace;

use cdm_model::ConstraintMap;

use crate::error::{MapError, Result};

pub const YEAR_FIELD: &str = "year";
pub const MONTH_FIELD: &str = "month";
pub const DAY_FIELD: &str = "day";

const NON_LEAP_CENTURIES: &[i64] = &[1800, 1900];

/// Two-digit day values `01..=last`.
pub fn day_values(last: u32) -> Vec<String> {
    (1..=last).map(|day| format!("{day:02}")).collect()
}

fn february_length(year: i64) -> u32 {
    if year % 4 == 0 && !NON_LEAP_CENTURIES.contains(&year) {
        29
    } else {
        28
    }
}

fn parse_year(value: &str) -> Result<i64> {
    value.parse().map_err(|_| MapError::InvalidYear {
        value: value.to_string(),
    })
}

fn month_length(value: &str) -> Result<Option<u32>> {
    let invalid = || MapError::InvalidMonth {
        value: value.to_string(),
    };
    let month: u32 = value.parse().map_err(|_| invalid())?;
    match month {
        2 => Ok(None),
        4 | 6 | 9 | 11 => Ok(Some(30)),
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(Some(31)),
        _ => Err(invalid()),
    }
}

/// The years among `years` whose February has `length` days, sorted numerically.
pub fn feb_years_by_length(length: u32, years: &[String]) -> Result<Vec<String>> {
    if length != 28 && length != 29 {
        return Err(MapError::InvalidFebruaryLength { length });
    }
    let mut matching = Vec::new();
    for value in years {
        let year = parse_year(value)?;
        if february_length(year) == length {
            matching.push((year, value.clone()));
        }
    }
    matching.sort();
    matching.dedup();
    Ok(matching.into_iter().map(|(_, value)| value).collect())
}

fn with_days(base: &ConstraintMap, months: Vec<String>, days: u32) -> ConstraintMap {
    let mut out = base.clone();
    out.insert(MONTH_FIELD.to_string(), months);
    out.insert(DAY_FIELD.to_string(), day_values(days));
    out
}

/// Splits `constraint` by month length and adds the matching `day` values.
///
/// Without a `month` field the constraint gets every day `01..=31`.
pub fn expand_by_month_length(constraint: &ConstraintMap) -> Result<Vec<ConstraintMap>> {
    let Some(months) = constraint.get(MONTH_FIELD) else {
        let mut out = constraint.clone();
        out.insert(DAY_FIELD.to_string(), day_values(31));
        return Ok(vec![out]);
    };

    let mut has_february = false;
    let mut thirty = Vec::new();
    let mut thirty_one = Vec::new();
    for month in months {
        match month_length(month)? {
            None => has_february = true,
            Some(30) => thirty.push(month.clone()),
            Some(_) => thirty_one.push(month.clone()),
        }
    }
    let february = || {
        months
            .iter()
            .filter(|month| matches!(month_length(month), Ok(None)))
            .cloned()
            .collect::<Vec<_>>()
    };

    let mut out = Vec::new();
    if has_february {
        match constraint.get(YEAR_FIELD) {
            Some(years) => {
                for length in [28, 29] {
                    let years = feb_years_by_length(length, years)?;
                    if years.is_empty() {
                        continue;
                    }
                    let mut split = with_days(constraint, february(), length);
                    split.insert(YEAR_FIELD.to_string(), years);
                    out.push(split);
                }
            }
            None => out.push(with_days(constraint, february(), 28)),
        }
    }
    if !thirty.is_empty() {
        out.push(with_days(constraint, thirty, 30));
    }
    if !thirty_one.is_empty() {
        out.push(with_days(constraint, thirty_one, 31));
    }
    trace!(groups = out.len(), "split constraint by month length");
    Ok(out)
}
