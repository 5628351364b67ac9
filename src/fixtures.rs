//! Test fixtures: memoized loaders for already-wrangled datasets.
//!
//! Fixtures resolve a fixed path under a data root, decompress `.gz` files, and read them with
//! [`crate::codec::from_csv_with_types`]. Each fixture is loaded at most once per test process
//! because the largest one can take tens of seconds to decompress.
//!
//! [`TestOptions`] selects the data root and whether slow tests run. `cargo test` forwards its
//! own arguments to the test harness, so the options are read from the environment:
//!
//! - `LAHMAN_DATA_DIR` (`--data-dir`, default `../data`)
//! - `LAHMAN_RUNSLOW` (`--runslow`, any value except `0`/`false`/`no`/`off`/`n`/`f`)
//!
//! ## Example
//!
//! ```no_run
//! use lahman_wrangle::fixtures;
//!
//! fn batting_has_rows() {
//!     lahman_wrangle::require_runslow!();
//!     let batting = fixtures::session().batting().unwrap();
//!     assert!(batting.row_count() > 0);
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use clap::builder::FalseyValueParser;
use once_cell::sync::{Lazy, OnceCell};
use tracing::info;

use crate::codec::from_csv_with_types;
use crate::error::WrangleResult;
use crate::types::DataSet;

/// Reason reported for slow tests that were not enabled.
pub const SLOW_SKIP_REASON: &str = "need --runslow option to run";

/// Options for the fixture layer.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "lahman-fixtures")]
pub struct TestOptions {
    /// Baseball data directory.
    #[arg(long = "data-dir", env = "LAHMAN_DATA_DIR", default_value = "../data")]
    pub data_dir: PathBuf,

    /// Run slow tests.
    #[arg(long, env = "LAHMAN_RUNSLOW", value_parser = FalseyValueParser::new())]
    pub runslow: bool,
}

impl TestOptions {
    /// Options from the environment only.
    pub fn from_env() -> Self {
        Self::parse_from(["lahman-fixtures"])
    }

    /// Why a test of the given speed should be skipped, or `None` if it should run.
    pub fn skip_reason(&self, speed: Speed) -> Option<&'static str> {
        match speed {
            Speed::Slow if !self.runslow => Some(SLOW_SKIP_REASON),
            _ => None,
        }
    }
}

/// Speed marker for a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    /// Always runs.
    Fast,
    /// Runs only with `--runslow`.
    Slow,
}

const FIXTURE_COUNT: usize = 6;

/// The datasets available as fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixture {
    /// Per-player game lines collected from retrosheet.
    PlayerGame,
    /// Wrangled per-team game lines.
    TeamGame,
    /// Wrangled game-level records.
    Game,
    /// Wrangled batting lines.
    Batting,
    /// Wrangled pitching lines.
    Pitching,
    /// Wrangled fielding lines.
    Fielding,
}

impl Fixture {
    /// Every fixture, in declaration order.
    pub const ALL: [Fixture; FIXTURE_COUNT] = [
        Fixture::PlayerGame,
        Fixture::TeamGame,
        Fixture::Game,
        Fixture::Batting,
        Fixture::Pitching,
        Fixture::Fielding,
    ];

    /// Path relative to the data root.
    pub fn relative_path(self) -> &'static str {
        match self {
            Fixture::PlayerGame => "retrosheet/collected/player_game.csv.gz",
            Fixture::TeamGame => "retrosheet/wrangled/team_game.csv.gz",
            Fixture::Game => "retrosheet/wrangled/game.csv.gz",
            Fixture::Batting => "retrosheet/wrangled/batting.csv.gz",
            Fixture::Pitching => "retrosheet/wrangled/pitching.csv.gz",
            Fixture::Fielding => "retrosheet/wrangled/fielding.csv.gz",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Load a fixture file without memoization.
pub fn load_fixture(path: impl AsRef<Path>) -> WrangleResult<DataSet> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading fixture");
    from_csv_with_types(path)
}

/// Memoizing fixture store bound to one set of [`TestOptions`].
#[derive(Debug)]
pub struct Fixtures {
    options: TestOptions,
    cells: [OnceCell<Arc<DataSet>>; FIXTURE_COUNT],
}

impl Fixtures {
    /// Create an empty store; nothing is loaded until first use.
    pub fn new(options: TestOptions) -> Self {
        Self {
            options,
            cells: std::array::from_fn(|_| OnceCell::new()),
        }
    }

    /// Options this store was created with.
    pub fn options(&self) -> &TestOptions {
        &self.options
    }

    /// Absolute (or data-root relative) path of a fixture.
    pub fn path(&self, fixture: Fixture) -> PathBuf {
        self.options.data_dir.join(fixture.relative_path())
    }

    /// Returns true once `fixture` has been loaded successfully.
    pub fn is_loaded(&self, fixture: Fixture) -> bool {
        self.cells[fixture.slot()].get().is_some()
    }

    /// Load `fixture` on first use and return the shared copy afterwards.
    ///
    /// A failed load is not cached; the next call tries again.
    pub fn get(&self, fixture: Fixture) -> WrangleResult<Arc<DataSet>> {
        self.cells[fixture.slot()]
            .get_or_try_init(|| load_fixture(self.path(fixture)).map(Arc::new))
            .cloned()
    }

    /// [`Fixture::PlayerGame`], loaded on first use.
    pub fn player_game(&self) -> WrangleResult<Arc<DataSet>> {
        self.get(Fixture::PlayerGame)
    }

    /// [`Fixture::TeamGame`], loaded on first use.
    pub fn team_game(&self) -> WrangleResult<Arc<DataSet>> {
        self.get(Fixture::TeamGame)
    }

    /// [`Fixture::Game`], loaded on first use.
    pub fn game(&self) -> WrangleResult<Arc<DataSet>> {
        self.get(Fixture::Game)
    }

    /// [`Fixture::Batting`], loaded on first use.
    pub fn batting(&self) -> WrangleResult<Arc<DataSet>> {
        self.get(Fixture::Batting)
    }

    /// [`Fixture::Pitching`], loaded on first use.
    pub fn pitching(&self) -> WrangleResult<Arc<DataSet>> {
        self.get(Fixture::Pitching)
    }

    /// [`Fixture::Fielding`], loaded on first use.
    pub fn fielding(&self) -> WrangleResult<Arc<DataSet>> {
        self.get(Fixture::Fielding)
    }
}

static SESSION: Lazy<Fixtures> = Lazy::new(|| Fixtures::new(TestOptions::from_env()));

/// Process-wide fixture store configured from the environment.
pub fn session() -> &'static Fixtures {
    &SESSION
}

/// Return early from the current test unless slow tests are enabled.
///
/// libtest has no runtime skip, so a test stopped here is reported as `ok`; the skip reason is
/// printed to stderr (`cargo test -- --nocapture` shows it). Pair slow tests with
/// `#[ignore = "need --runslow option to run"]` so they show up as ignored in the summary, and run
/// them with `LAHMAN_RUNSLOW=1 cargo test -- --include-ignored`.
#[macro_export]
macro_rules! require_runslow {
    () => {
        if let Some(reason) = $crate::fixtures::session()
            .options()
            .skip_reason($crate::fixtures::Speed::Slow)
        {
            eprintln!("skipped: {reason}");
            return;
        }
    };
}
