use std::fs;
use std::path::PathBuf;

use cdm_ingest::{
    IngestError, IngestOptions, add_days_to_counts, load_records, read_counts_table,
};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("cdm_ingest_{}_{stamp}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn cleanup(path: &PathBuf) {
    if let Some(parent) = path.parent() {
        let _ = fs::remove_dir_all(parent);
    }
}

#[test]
fn loads_records_without_bookkeeping_columns() {
    let path = temp_file(
        "counts.csv",
        "domain, variable, year, month, count\n\
         land, 44, 1900, 01, 3\n\
         land, 44, 1900, 02, 0\n\
         \n\
         land, 85, 1900, 01, 12\n",
    );
    let loaded = load_records(&path, &IngestOptions::default()).expect("load");
    let fields: Vec<&str> = loaded.records.fields().iter().map(|f| f.as_str()).collect();
    assert_eq!(fields, vec!["variable", "year", "month"]);
    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.records.records()[1], vec!["85", "1900", "01"]);
    assert_eq!(loaded.rows_read, 3);
    assert_eq!(loaded.zero_count_rows, 1);
    assert_eq!(loaded.domain_tags.into_iter().collect::<Vec<_>>(), vec!["land"]);
    cleanup(&path);
}

#[test]
fn keeping_zero_counts_still_drops_the_count_column() {
    let path = temp_file("counts.csv", "variable,year,count\n44,1900,0\n44,1901,2\n");
    let options = IngestOptions::default().with_remove_zero_counts(false);
    let loaded = load_records(&path, &options).expect("load");
    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.records.fields().len(), 2);
    cleanup(&path);
}

#[test]
fn wrong_column_count_fails_fast() {
    let path = temp_file("counts.csv", "variable,year,count\n44,1900,1\n44,1901\n");
    let err = read_counts_table(&path, b',').unwrap_err();
    assert!(matches!(
        err,
        IngestError::ColumnCount {
            line: 3,
            expected: 3,
            found: 2,
            ..
        }
    ));
    cleanup(&path);
}

#[test]
fn zero_count_filter_needs_a_count_column() {
    let path = temp_file("counts.csv", "variable,year\n44,1900\n");
    let err = load_records(&path, &IngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "count"));
    cleanup(&path);
}

#[test]
fn non_numeric_counts_are_rejected() {
    let path = temp_file("counts.csv", "variable,count\n44,many\n");
    let err = load_records(&path, &IngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::InvalidCount { line: 2, .. }));
    cleanup(&path);
}

#[test]
fn custom_delimiter_is_honoured() {
    let path = temp_file("counts.tsv", "variable\tyear\tcount\n44\t1900\t1\n");
    let options = IngestOptions::default().with_delimiter(b'\t');
    let loaded = load_records(&path, &options).expect("load");
    assert_eq!(loaded.records.records()[0], vec!["44", "1900"]);
    cleanup(&path);
}

#[test]
fn empty_file_has_no_header() {
    let path = temp_file("counts.csv", "\n\n");
    let err = read_counts_table(&path, b',').unwrap_err();
    assert!(matches!(err, IngestError::EmptyTable { .. }));
    cleanup(&path);
}

#[test]
fn add_days_writes_expanded_file() {
    let path = temp_file("counts.csv", "year,month,count\n1900,02,5\n1904,02,1\n");
    let (output, rows) = add_days_to_counts(&path, b',').expect("add days");
    assert_eq!(rows, 28 + 29);
    let table = read_counts_table(&output, b',').expect("read expanded");
    assert_eq!(table.headers, vec!["year", "month", "day", "count"]);
    assert_eq!(table.rows[28].values, vec!["1904", "02", "01", "1"]);
    cleanup(&path);
}
