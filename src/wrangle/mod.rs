//! Lahman wrangling: raw exports in, normalized and type-optimized tables out.
//!
//! Every step follows the same shape:
//!
//! 1. If the wrangled output already exists, log and skip (no freshness check against the raw
//!    file, no overwrite).
//! 2. Read the raw CSV from the raw directory.
//! 3. Apply table-specific cleanup (see [`people`], [`fielding`], [`basic`]).
//! 4. Log a [`crate::codec::table_info`] summary and persist with
//!    [`crate::codec::to_csv_with_types`] under the lower-cased file name.
//!
//! All reads and writes use explicit paths; nothing here changes the working directory.

pub mod basic;
pub mod fielding;
pub mod names;
pub mod people;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::codec::{table_info, to_csv_with_types};
use crate::error::WrangleResult;
use crate::types::DataSet;

pub use basic::wrangle_basic;
pub use fielding::{FIELDING_NULL_THRESHOLD, wrangle_fielding};
pub use names::{FIELD_NAME_MAP, normalize_field_name, normalize_field_names};
pub use people::{derive_date, wrangle_people};

/// Raw and wrangled directories under a data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LahmanPaths {
    /// `{data_dir}/lahman/raw`
    pub raw: PathBuf,
    /// `{data_dir}/lahman/wrangled`
    pub wrangled: PathBuf,
}

impl LahmanPaths {
    /// Resolve the Lahman directories under `data_dir`.
    pub fn from_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let lahman = data_dir.as_ref().join("lahman");
        Self {
            raw: lahman.join("raw"),
            wrangled: lahman.join("wrangled"),
        }
    }
}

/// What a wrangle step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrangleOutcome {
    /// Output already existed; nothing was read or written.
    Skipped,
    /// Output was derived from the raw file and written.
    Written { rows: usize, columns: usize },
}

/// Result of one wrangle step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrangleReport {
    /// Raw source file name, as given.
    pub source: String,
    /// Wrangled output path.
    pub output: PathBuf,
    /// Whether the output was written or already present.
    pub outcome: WrangleOutcome,
}

/// One entry of the fixed wrangle sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrangleStep {
    /// `People.csv`, with birth/death date derivation.
    People,
    /// `Fielding.csv`, with sparse-column removal.
    Fielding,
    /// Any other table: rename and optimize only.
    Basic(&'static str),
}

/// Tables wrangled by [`wrangle_all`], in order.
pub const WRANGLE_STEPS: [WrangleStep; 7] = [
    WrangleStep::People,
    WrangleStep::Fielding,
    WrangleStep::Basic("Batting.csv"),
    WrangleStep::Basic("Pitching.csv"),
    WrangleStep::Basic("Teams.csv"),
    WrangleStep::Basic("Salaries.csv"),
    WrangleStep::Basic("Parks.csv"),
];

impl WrangleStep {
    /// Raw file name consumed by this step.
    pub fn source_file(self) -> &'static str {
        match self {
            WrangleStep::People => people::PEOPLE_FILE,
            WrangleStep::Fielding => fielding::FIELDING_FILE,
            WrangleStep::Basic(filename) => filename,
        }
    }

    /// Run this step against `paths`.
    pub fn run(self, paths: &LahmanPaths) -> WrangleResult<WrangleReport> {
        match self {
            WrangleStep::People => wrangle_people(&paths.raw, &paths.wrangled),
            WrangleStep::Fielding => wrangle_fielding(&paths.raw, &paths.wrangled),
            WrangleStep::Basic(filename) => wrangle_basic(&paths.raw, &paths.wrangled, filename),
        }
    }
}

/// Run every step of [`WRANGLE_STEPS`] in order, stopping at the first failure.
pub fn wrangle_all(paths: &LahmanPaths) -> WrangleResult<Vec<WrangleReport>> {
    WRANGLE_STEPS.iter().map(|step| step.run(paths)).collect()
}

/// Wrangled output path for a raw file name: same directory for every table, lower-cased name.
pub fn wrangled_path(wrangled_dir: &Path, filename: &str) -> PathBuf {
    wrangled_dir.join(filename.to_lowercase())
}

/// Skip-if-exists precondition shared by every step.
///
/// Returns the skip report when `output` is already present.
fn skip_if_wrangled(source: &str, output: &Path) -> Option<WrangleReport> {
    if !output.exists() {
        return None;
    }
    info!("Skipping wrangle of {source} - already performed");
    Some(WrangleReport {
        source: source.to_string(),
        output: output.to_path_buf(),
        outcome: WrangleOutcome::Skipped,
    })
}

/// Shared step driver: precondition, transform, summary log, persist.
///
/// `transform` receives the raw file path and returns the finished table.
fn run_step<F>(
    raw_dir: &Path,
    wrangled_dir: &Path,
    source: &str,
    transform: F,
) -> WrangleResult<WrangleReport>
where
    F: FnOnce(&Path) -> WrangleResult<DataSet>,
{
    let output = wrangled_path(wrangled_dir, source);
    if let Some(report) = skip_if_wrangled(source, &output) {
        return Ok(report);
    }

    let dataset = transform(&raw_dir.join(source))?;
    info!("{source}\n{}", table_info(&dataset));

    fs::create_dir_all(wrangled_dir)?;
    to_csv_with_types(&dataset, &output)?;

    Ok(WrangleReport {
        source: source.to_string(),
        output,
        outcome: WrangleOutcome::Written {
            rows: dataset.row_count(),
            columns: dataset.column_count(),
        },
    })
}
