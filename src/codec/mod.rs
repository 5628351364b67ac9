//! Type-optimizing table codec.
//!
//! - [`optimize_dtypes`]: shrink numeric columns to the narrowest safe width
//! - [`to_csv_with_types`] / [`from_csv_with_types`]: persist and restore a table with exact
//!   column types via a JSON sidecar
//! - [`table_info`]: column/type summary used in wrangle logs
//!
//! ## Example: optimize, write, read back
//!
//! ```no_run
//! use lahman_wrangle::codec::{from_csv_with_types, optimize_dtypes, to_csv_with_types};
//! use lahman_wrangle::ingestion::read_raw_csv;
//!
//! # fn main() -> Result<(), lahman_wrangle::WrangleError> {
//! let mut ds = read_raw_csv("Batting.csv", &[])?;
//! optimize_dtypes(&mut ds);
//! to_csv_with_types(&ds, "batting.csv")?;
//! assert_eq!(from_csv_with_types("batting.csv")?, ds);
//! # Ok(())
//! # }
//! ```

pub mod info;
pub mod optimize;
pub mod typed_csv;

pub use info::table_info;
pub use optimize::optimize_dtypes;
pub use typed_csv::{from_csv_with_types, sidecar_path, to_csv_with_types};
