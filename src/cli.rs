//! CLI argument definitions for the wrangle binary.

use std::path::PathBuf;

use clap::Parser;

use crate::wrangle::LahmanPaths;

/// Wrangle Lahman data from {data_dir}/lahman/raw to {data_dir}/lahman/wrangled.
///
/// Wrangles people, fielding, batting, pitching, teams, salaries and parks.
#[derive(Debug, Parser)]
#[command(name = "lahman-wrangle", version)]
pub struct Cli {
    /// Baseball data directory.
    #[arg(long = "data-dir", env = "LAHMAN_DATA_DIR", default_value = "../data")]
    pub data_dir: PathBuf,

    /// Verbose output (INFO-level logging).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Lahman raw/wrangled directories under the configured data directory.
    pub fn paths(&self) -> LahmanPaths {
        LahmanPaths::from_data_dir(&self.data_dir)
    }
}
