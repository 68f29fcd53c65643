use std::collections::BTreeSet;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use cdm_model::{RecordSet, field_names};

use crate::error::{IngestError, Result};

/// Default name of the row-count bookkeeping column.
pub const COUNT_COLUMN: &str = "count";
/// Default name of the dataset partition tag column.
pub const DOMAIN_COLUMN: &str = "domain";

/// One data row with its 1-based line number in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountsRow {
    pub line: u64,
    pub values: Vec<String>,
}

/// A delimited table with a header row, every row as wide as the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountsTable {
    pub headers: Vec<String>,
    pub rows: Vec<CountsRow>,
}

impl CountsTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Drop rows whose count column is zero.
    pub remove_zero_counts: bool,
    /// Bookkeeping column holding the row count; never a field.
    pub count_column: String,
    /// Column holding the dataset partition tag; never a field.
    pub domain_column: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            remove_zero_counts: true,
            count_column: COUNT_COLUMN.to_string(),
            domain_column: DOMAIN_COLUMN.to_string(),
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_remove_zero_counts(mut self, enable: bool) -> Self {
        self.remove_zero_counts = enable;
        self
    }
}

/// Records ready for minimisation plus what was set aside while loading.
#[derive(Debug, Clone)]
pub struct LoadedRecords {
    pub records: RecordSet,
    /// Distinct values of the domain column, if present.
    pub domain_tags: BTreeSet<String>,
    /// Data rows read from the file.
    pub rows_read: usize,
    /// Rows dropped for a zero count.
    pub zero_count_rows: usize,
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn record_line(record: &StringRecord, fallback: u64) -> u64 {
    record
        .position()
        .map(csv::Position::line)
        .unwrap_or(fallback)
}

/// Reads a delimited table, failing on any row whose width differs from the header.
///
/// Blank lines are skipped; cells and headers are trimmed.
pub fn read_counts_table(path: &Path, delimiter: u8) -> Result<CountsTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let values: Vec<String> = record.iter().map(normalize_cell).collect();
        if values.iter().all(String::is_empty) {
            continue;
        }
        let line = record_line(&record, idx as u64 + 1);
        let Some(expected) = headers.as_ref().map(Vec::len) else {
            headers = Some(values);
            continue;
        };
        if values.len() != expected {
            return Err(IngestError::ColumnCount {
                path: path.to_path_buf(),
                line,
                expected,
                found: values.len(),
            });
        }
        rows.push(CountsRow { line, values });
    }

    let headers = headers.ok_or_else(|| IngestError::EmptyTable {
        path: path.to_path_buf(),
    })?;
    debug!(path = %path.display(), columns = headers.len(), rows = rows.len(), "read counts table");
    Ok(CountsTable { headers, rows })
}

/// Writes a table with its header row.
pub fn write_counts_table(path: &Path, table: &CountsTable, delimiter: u8) -> Result<()> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(csv_error)?;
    writer.write_record(&table.headers).map_err(csv_error)?;
    for row in &table.rows {
        writer.write_record(&row.values).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Loads a counts file as a record set.
pub fn load_records(path: &Path, options: &IngestOptions) -> Result<LoadedRecords> {
    let table = read_counts_table(path, options.delimiter)?;
    records_from_table(path, &table, options)
}

/// Converts a counts table into records, excluding bookkeeping columns.
///
/// `path` is only used in error messages.
pub fn records_from_table(
    path: &Path,
    table: &CountsTable,
    options: &IngestOptions,
) -> Result<LoadedRecords> {
    let count_idx = table.column_index(&options.count_column);
    let domain_idx = table.column_index(&options.domain_column);
    if options.remove_zero_counts && count_idx.is_none() {
        return Err(IngestError::MissingColumn {
            path: path.to_path_buf(),
            column: options.count_column.clone(),
        });
    }

    let keep: Vec<usize> = (0..table.headers.len())
        .filter(|&idx| Some(idx) != count_idx && Some(idx) != domain_idx)
        .collect();
    let fields = field_names(keep.iter().map(|&idx| table.headers[idx].clone()))?;

    let mut records = Vec::with_capacity(table.rows.len());
    let mut domain_tags = BTreeSet::new();
    let mut zero_count_rows = 0usize;
    for row in &table.rows {
        if let Some(idx) = count_idx.filter(|_| options.remove_zero_counts) {
            let raw = &row.values[idx];
            let count: u64 = raw.parse().map_err(|_| IngestError::InvalidCount {
                path: path.to_path_buf(),
                line: row.line,
                value: raw.clone(),
            })?;
            if count == 0 {
                zero_count_rows += 1;
                continue;
            }
        }
        if let Some(idx) = domain_idx {
            domain_tags.insert(row.values[idx].clone());
        }
        records.push(keep.iter().map(|&idx| row.values[idx].clone()).collect());
    }

    let records = RecordSet::new(fields, records)?;
    info!(
        path = %path.display(),
        rows = table.rows.len(),
        records = records.len(),
        zero_count_rows,
        "parsed records"
    );
    Ok(LoadedRecords {
        records,
        domain_tags,
        rows_read: table.rows.len(),
        zero_count_rows,
    })
}
