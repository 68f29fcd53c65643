//! Per-day expansion of monthly counts tables.
//!
//! Every row is repeated once per day of its (year, month), with a two-digit
//! `day` column inserted before the last column. Month lengths follow the
//! proleptic Gregorian calendar.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use crate::counts_table::{CountsRow, CountsTable, read_counts_table, write_counts_table};
use crate::error::{IngestError, Result};

pub const DAY_COLUMN: &str = "day";
const YEAR_COLUMN: &str = "year";
const MONTH_COLUMN: &str = "month";

/// Progress is logged every this many input rows.
const PROGRESS_INTERVAL: usize = 1000;

/// Days in the given month, or `None` if the month does not exist.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.pred_opt()?.day())
}

/// `<input>.days`, next to the input file.
pub fn days_output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".days");
    PathBuf::from(name)
}

/// Expands each row into one row per day of its month.
///
/// `path` is only used in error messages.
pub fn expand_counts_by_day(path: &Path, table: &CountsTable) -> Result<CountsTable> {
    let missing = |column: &str| IngestError::MissingColumn {
        path: path.to_path_buf(),
        column: column.to_string(),
    };
    let year_idx = table.column_index(YEAR_COLUMN).ok_or_else(|| missing(YEAR_COLUMN))?;
    let month_idx = table
        .column_index(MONTH_COLUMN)
        .ok_or_else(|| missing(MONTH_COLUMN))?;
    let insert_at = table.headers.len().saturating_sub(1);

    let mut headers = table.headers.clone();
    headers.insert(insert_at, DAY_COLUMN.to_string());

    let mut rows = Vec::new();
    for (idx, row) in table.rows.iter().enumerate() {
        if idx > 0 && idx % PROGRESS_INTERVAL == 0 {
            debug!(row = idx, total = table.rows.len(), "expanding rows by day");
        }
        let year = &row.values[year_idx];
        let month = &row.values[month_idx];
        let days = year
            .parse::<i32>()
            .ok()
            .zip(month.parse::<u32>().ok())
            .and_then(|(y, m)| days_in_month(y, m))
            .ok_or_else(|| IngestError::InvalidMonth {
                path: path.to_path_buf(),
                line: row.line,
                year: year.clone(),
                month: month.clone(),
            })?;
        for day in 1..=days {
            let mut values = row.values.clone();
            values.insert(insert_at, format!("{day:02}"));
            rows.push(CountsRow {
                line: row.line,
                values,
            });
        }
    }

    Ok(CountsTable { headers, rows })
}

/// Reads `input`, expands it by day and writes `<input>.days`.
pub fn add_days_to_counts(input: &Path, delimiter: u8) -> Result<(PathBuf, usize)> {
    let table = read_counts_table(input, delimiter)?;
    let expanded = expand_counts_by_day(input, &table)?;
    let output = days_output_path(input);
    write_counts_table(&output, &expanded, delimiter)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        rows = expanded.rows.len(),
        "wrote per-day counts"
    );
    Ok((output, expanded.rows.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths_follow_the_gregorian_calendar() {
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(1896, 2), Some(29));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(1901, 4), Some(30));
        assert_eq!(days_in_month(1901, 12), Some(31));
        assert_eq!(days_in_month(1901, 13), None);
        assert_eq!(days_in_month(1901, 0), None);
    }

    #[test]
    fn day_column_goes_before_the_last_column() {
        let table = CountsTable {
            headers: vec!["year".into(), "month".into(), "count".into()],
            rows: vec![CountsRow {
                line: 2,
                values: vec!["1900".into(), "02".into(), "7".into()],
            }],
        };
        let expanded = expand_counts_by_day(Path::new("counts.csv"), &table).unwrap();
        assert_eq!(expanded.headers, vec!["year", "month", "day", "count"]);
        assert_eq!(expanded.rows.len(), 28);
        assert_eq!(expanded.rows[27].values, vec!["1900", "02", "28", "7"]);
    }

    #[test]
    fn impossible_months_are_reported_with_their_line() {
        let table = CountsTable {
            headers: vec!["year".into(), "month".into(), "count".into()],
            rows: vec![CountsRow {
                line: 5,
                values: vec!["1900".into(), "13".into(), "1".into()],
            }],
        };
        let err = expand_counts_by_day(Path::new("counts.csv"), &table).unwrap_err();
        assert_eq!(
            err.to_string(),
            "counts.csv:5: no calendar month for year \"1900\" month \"13\""
        );
    }

    #[test]
    fn output_path_appends_suffix() {
        assert_eq!(
            days_output_path(Path::new("data/counts.csv")),
            PathBuf::from("data/counts.csv.days")
        );
    }
}
