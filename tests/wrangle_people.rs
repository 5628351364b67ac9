use chrono::NaiveDate;
use lahman_wrangle::codec::from_csv_with_types;
use lahman_wrangle::types::{DataType, Value};
use lahman_wrangle::wrangle::{WrangleOutcome, derive_date, wrangle_people};

const RAW: &str = "tests/fixtures/lahman/raw";

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn derive_date_defaults_missing_month_and_day() {
    assert_eq!(derive_date(Some(1980), None, None), Some(ymd(1980, 1, 1)));
    assert_eq!(derive_date(Some(1890), Some(7), None), Some(ymd(1890, 7, 1)));
    assert_eq!(derive_date(Some(1890), None, Some(12)), Some(ymd(1890, 1, 12)));
}

#[test]
fn derive_date_missing_year_is_missing_date() {
    assert_eq!(derive_date(None, None, None), None);
    assert_eq!(derive_date(None, Some(6), Some(15)), None);
}

#[test]
fn derive_date_full_date() {
    assert_eq!(derive_date(Some(1975), Some(6), Some(15)), Some(ymd(1975, 6, 15)));
}

#[test]
fn derive_date_clamps_day_past_month_end() {
    assert_eq!(derive_date(Some(1975), Some(2), Some(31)), Some(ymd(1975, 2, 28)));
    assert_eq!(derive_date(Some(1976), Some(2), Some(30)), Some(ymd(1976, 2, 29)));
    assert_eq!(derive_date(Some(1999), Some(4), Some(31)), Some(ymd(1999, 4, 30)));
    assert_eq!(derive_date(Some(1999), Some(12), Some(40)), Some(ymd(1999, 12, 31)));
}

#[test]
fn derive_date_invalid_month_or_day_is_missing_date() {
    assert_eq!(derive_date(Some(1975), Some(13), Some(1)), None);
    assert_eq!(derive_date(Some(1975), Some(0), Some(1)), None);
    assert_eq!(derive_date(Some(1975), Some(5), Some(0)), None);
    assert_eq!(derive_date(Some(i64::MAX), Some(1), Some(1)), None);
}

#[test]
fn wrangle_people_collapses_birth_and_death_dates() {
    let out = tempfile::tempdir().unwrap();
    let report = wrangle_people(RAW, out.path()).unwrap();
    assert_eq!(report.output, out.path().join("people.csv"));
    assert!(matches!(report.outcome, WrangleOutcome::Written { rows: 6, .. }));

    let people = from_csv_with_types(&report.output).unwrap();
    let names: Vec<&str> = people.schema.field_names().collect();
    let source_parts = [
        "birth_year",
        "birth_month",
        "birth_day",
        "death_year",
        "death_month",
        "death_day",
    ];
    for gone in source_parts {
        assert!(!names.contains(&gone), "{gone} should be dropped");
    }
    assert_eq!(names.last(), Some(&"death_date"));
    assert!(names.contains(&"final_game"));
    assert!(names.contains(&"bb_ref_id"));
    assert!(names.iter().all(|n| *n == n.to_lowercase()));

    let col = |name: &str| people.schema.index_of(name).unwrap();
    let (birth, death) = (col("birth_date"), col("death_date"));
    let expected = [
        (Some(ymd(1981, 12, 27)), None),
        (Some(ymd(1934, 2, 5)), Some(ymd(2021, 1, 22))),
        (Some(ymd(1980, 1, 1)), None),
        (None, Some(ymd(1890, 7, 1))),
        (Some(ymd(1975, 6, 15)), None),
        (Some(ymd(1975, 2, 28)), None),
    ];
    for (row, (b, d)) in people.rows.iter().zip(expected) {
        assert_eq!(row[birth], b.map_or(Value::Null, Value::Date));
        assert_eq!(row[death], d.map_or(Value::Null, Value::Date));
    }
}

#[test]
fn wrangle_people_parses_debut_dates_and_keeps_read_number_types() {
    let out = tempfile::tempdir().unwrap();
    let report = wrangle_people(RAW, out.path()).unwrap();
    let people = from_csv_with_types(&report.output).unwrap();

    let debut = people.schema.field("debut").unwrap();
    assert_eq!(debut.data_type, DataType::Date);
    assert!(debut.nullable);
    assert_eq!(people.schema.field("final_game").unwrap().data_type, DataType::Date);

    let weight = people.schema.field("weight").unwrap();
    assert_eq!((weight.data_type, weight.nullable), (DataType::Int64, true));
    let height = people.schema.field("height").unwrap();
    assert_eq!((height.data_type, height.nullable), (DataType::Int64, true));
    assert_eq!(people.rows[0][people.schema.index_of("weight").unwrap()], Value::Int64(215));
}
