//! Generic wrangle path.

use std::path::Path;

use crate::codec::optimize_dtypes;
use crate::error::WrangleResult;
use crate::ingestion::read_raw_csv;

use super::{WrangleReport, normalize_field_names, run_step};

/// Rename columns and optimize dtypes of `raw_dir/filename`, writing
/// `wrangled_dir/<lower-cased filename>`.
///
/// Skipped when the output already exists; the raw file is not opened in that case.
pub fn wrangle_basic(
    raw_dir: impl AsRef<Path>,
    wrangled_dir: impl AsRef<Path>,
    filename: &str,
) -> WrangleResult<WrangleReport> {
    run_step(raw_dir.as_ref(), wrangled_dir.as_ref(), filename, |raw| {
        let mut dataset = read_raw_csv(raw, &[])?;
        normalize_field_names(&mut dataset);
        optimize_dtypes(&mut dataset);
        Ok(dataset)
    })
}
