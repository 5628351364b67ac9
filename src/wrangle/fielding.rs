//! Fielding table: sparse column removal.

use std::path::Path;

use tracing::debug;

use crate::codec::optimize_dtypes;
use crate::error::WrangleResult;
use crate::ingestion::read_raw_csv;
use crate::types::DataSet;

use super::{WrangleReport, normalize_field_names, run_step};

/// Raw fielding file name.
pub const FIELDING_FILE: &str = "Fielding.csv";

/// Columns with a null fraction strictly above this are dropped.
pub const FIELDING_NULL_THRESHOLD: f64 = 0.90;

/// Wrangle `Fielding.csv` into `fielding.csv`, dropping mostly-empty position columns.
pub fn wrangle_fielding(
    raw_dir: impl AsRef<Path>,
    wrangled_dir: impl AsRef<Path>,
) -> WrangleResult<WrangleReport> {
    run_step(raw_dir.as_ref(), wrangled_dir.as_ref(), FIELDING_FILE, |raw| {
        let mut fielding = read_raw_csv(raw, &[])?;
        normalize_field_names(&mut fielding);
        drop_sparse_columns(&mut fielding, FIELDING_NULL_THRESHOLD);
        optimize_dtypes(&mut fielding);
        Ok(fielding)
    })
}

/// Drop every column whose null fraction is strictly greater than `threshold`.
///
/// A table without rows has no null fraction and keeps all its columns. Returns the dropped
/// column names.
pub fn drop_sparse_columns(dataset: &mut DataSet, threshold: f64) -> Vec<String> {
    let rows = dataset.row_count();
    if rows == 0 {
        return Vec::new();
    }

    let sparse: Vec<String> = dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(idx, _)| null_fraction_exceeds(dataset.null_count(*idx), rows, threshold))
        .map(|(_, f)| f.name.clone())
        .collect();

    if !sparse.is_empty() {
        debug!(columns = ?sparse, "dropping sparse columns");
        let names: Vec<&str> = sparse.iter().map(String::as_str).collect();
        dataset.drop_columns(&names);
    }
    sparse
}

fn null_fraction_exceeds(nulls: usize, rows: usize, threshold: f64) -> bool {
    // integer comparison for the common tenths thresholds so 9/10 is exactly 0.90
    let tenths = threshold * 10.0;
    if tenths.fract() == 0.0 && (0.0..=10.0).contains(&tenths) {
        return nulls * 10 > rows * tenths as usize;
    }
    nulls as f64 / rows as f64 > threshold
}
