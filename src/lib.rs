//! `lahman-wrangle` turns raw Lahman baseball CSV exports into normalized, type-optimized tables.
//!
//! The primary entrypoint is [`wrangle::wrangle_all`], which runs the fixed table sequence
//! (people, fielding, batting, pitching, teams, salaries, parks) from
//! `{data_dir}/lahman/raw` into `{data_dir}/lahman/wrangled`. Each table can also be wrangled on
//! its own with [`wrangle::wrangle_people`], [`wrangle::wrangle_fielding`] or
//! [`wrangle::wrangle_basic`].
//!
//! ## What wrangling does
//!
//! - Column names are mapped to snake_case ([`wrangle::FIELD_NAME_MAP`]) and lower-cased.
//! - Numeric columns are downcast to the narrowest integer width that holds their values, keeping
//!   nullability ([`codec::optimize_dtypes`]). People keeps its read types.
//! - People: `birth_*`/`death_*` year/month/day triples become `birth_date`/`death_date`.
//! - Fielding: columns more than 90% null are dropped.
//! - Output is written with a JSON type sidecar ([`codec::to_csv_with_types`]) so it can be read
//!   back with exact types ([`codec::from_csv_with_types`]).
//! - If an output file already exists, that table is skipped.
//!
//! ## Quick example
//!
//! ```no_run
//! use lahman_wrangle::wrangle::{LahmanPaths, WrangleOutcome, wrangle_all};
//!
//! # fn main() -> Result<(), lahman_wrangle::WrangleError> {
//! let paths = LahmanPaths::from_data_dir("../data");
//! for report in wrangle_all(&paths)? {
//!     if let WrangleOutcome::Written { rows, .. } = report.outcome {
//!         println!("{} -> {} ({rows} rows)", report.source, report.output.display());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`wrangle`]: per-table wrangle steps and the driver
//! - [`codec`]: dtype optimization and typed CSV persistence
//! - [`ingestion`]: raw and schema-driven CSV readers
//! - [`types`]: schema + in-memory dataset types
//! - [`fixtures`]: memoized loaders for wrangled datasets in test suites
//! - [`cli`], [`logging`]: the `lahman-wrangle` binary's arguments and log setup
//! - [`error`]: error types used across the crate

pub mod cli;
pub mod codec;
pub mod error;
pub mod fixtures;
pub mod ingestion;
pub mod logging;
pub mod types;
pub mod wrangle;

pub use error::{WrangleError, WrangleResult};
