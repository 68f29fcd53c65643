pub mod counts_table;
pub mod days;
pub mod error;

pub use counts_table::{
    COUNT_COLUMN, CountsRow, CountsTable, DOMAIN_COLUMN, IngestOptions, LoadedRecords,
    load_records, read_counts_table, records_from_table, write_counts_table,
};
pub use days::{
    DAY_COLUMN, add_days_to_counts, days_in_month, days_output_path, expand_counts_by_day,
};
pub use error::{IngestError, Result};
