//! Ingestion of Lahman CSV exports.
//!
//! - [`read_raw_csv`]: read a raw export, inferring a type per column
//! - [`csv::ingest_csv_from_reader`]: read CSV against a known [`crate::types::Schema`]

pub mod csv;

pub use self::csv::{read_raw_csv, read_raw_csv_from_reader};
