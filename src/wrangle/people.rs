//! People table: birth/death date derivation.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::error::{WrangleError, WrangleResult};
use crate::ingestion::read_raw_csv;
use crate::types::{DataSet, DataType, Value};

use super::{WrangleReport, normalize_field_names, run_step};

/// Raw people file name.
pub const PEOPLE_FILE: &str = "People.csv";

/// Raw columns parsed as dates while reading.
const DATE_COLUMNS: [&str; 2] = ["debut", "finalGame"];

/// Column prefixes of the year/month/day triples collapsed into `<prefix>_date`.
const DATE_PREFIXES: [&str; 2] = ["birth", "death"];

/// Wrangle `People.csv` into `people.csv`.
///
/// Beyond the generic path, `debut`/`finalGame` are read as dates and the
/// `birth_year/month/day` and `death_year/month/day` triples are replaced by `birth_date` and
/// `death_date` (see [`derive_date`]). Column types are kept as read; people is not
/// dtype-optimized.
pub fn wrangle_people(
    raw_dir: impl AsRef<Path>,
    wrangled_dir: impl AsRef<Path>,
) -> WrangleResult<WrangleReport> {
    run_step(raw_dir.as_ref(), wrangled_dir.as_ref(), PEOPLE_FILE, |raw| {
        let mut people = read_raw_csv(raw, &DATE_COLUMNS)?;
        normalize_field_names(&mut people);
        collapse_dates(&mut people)?;
        Ok(people)
    })
}

/// Replace each `<prefix>_year/_month/_day` triple with a single `<prefix>_date` column.
pub fn collapse_dates(people: &mut DataSet) -> WrangleResult<()> {
    let mut source_columns = Vec::with_capacity(DATE_PREFIXES.len() * 3);
    for prefix in DATE_PREFIXES {
        let parts = ["year", "month", "day"].map(|part| format!("{prefix}_{part}"));
        let mut idxs = [0usize; 3];
        for (idx, name) in idxs.iter_mut().zip(&parts) {
            *idx = people
                .schema
                .index_of(name)
                .ok_or_else(|| WrangleError::MissingColumn {
                    column: name.clone(),
                    table: PEOPLE_FILE.to_string(),
                })?;
        }

        let [y, m, d] = idxs;
        people.push_derived_column(format!("{prefix}_date"), DataType::Date, |row| {
            let part = |idx: usize| row.get(idx).and_then(Value::as_i64);
            derive_date(part(y), part(m), part(d)).map_or(Value::Null, Value::Date)
        });
        source_columns.extend(parts);
    }

    let names: Vec<&str> = source_columns.iter().map(String::as_str).collect();
    people.drop_columns(&names);
    Ok(())
}

/// Build a date from possibly-missing parts.
///
/// - Missing year gives `None`.
/// - Missing month or day defaults to 1.
/// - A day past the end of its month is clamped to the month's last day.
/// - A month outside `1..=12`, a day below 1, or a year chrono cannot represent gives `None`.
///
/// Never fails; invalid parts are logged at WARN.
///
/// ```rust
/// use chrono::NaiveDate;
/// use lahman_wrangle::wrangle::derive_date;
///
/// assert_eq!(derive_date(Some(1980), None, None), NaiveDate::from_ymd_opt(1980, 1, 1));
/// assert_eq!(derive_date(None, Some(6), Some(15)), None);
/// assert_eq!(derive_date(Some(1975), Some(6), Some(15)), NaiveDate::from_ymd_opt(1975, 6, 15));
/// ```
pub fn derive_date(year: Option<i64>, month: Option<i64>, day: Option<i64>) -> Option<NaiveDate> {
    let year = year?;
    let month = month.unwrap_or(1);
    let day = day.unwrap_or(1);

    let first = i32::try_from(year)
        .ok()
        .zip(u32::try_from(month).ok())
        .and_then(|(y, m)| NaiveDate::from_ymd_opt(y, m, 1));
    let Some(first) = first else {
        warn!(year, month, day, "invalid date parts, treating date as missing");
        return None;
    };
    if day < 1 {
        warn!(year, month, day, "invalid day of month, treating date as missing");
        return None;
    }

    let last = last_day_of_month(first);
    if day > i64::from(last) {
        warn!(year, month, day, last, "day past end of month, clamping");
    }
    let day = u32::try_from(day).map_or(last, |d| d.min(last));
    first.with_day(day)
}

fn last_day_of_month(first: NaiveDate) -> u32 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next.and_then(|n| n.pred_opt()).map_or(31, |d| d.day())
}
