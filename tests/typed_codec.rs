use chrono::NaiveDate;
use lahman_wrangle::WrangleError;
use lahman_wrangle::codec::{
    from_csv_with_types, optimize_dtypes, sidecar_path, table_info, to_csv_with_types,
};
use lahman_wrangle::types::{DataSet, DataType, Field, Schema, Value};
use std::path::Path;

fn date(y: i32, m: u32, d: u32) -> Value {
    Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn sample() -> DataSet {
    DataSet::new(
        Schema::new(vec![
            Field::new("player_id", DataType::Utf8),
            Field::new("year_id", DataType::Int16),
            Field::nullable("hr", DataType::Int8),
            Field::nullable("era", DataType::Float64),
            Field::nullable("debut", DataType::Date),
            Field::new("active", DataType::Bool),
        ]),
        vec![
            vec![
                Value::Utf8("aaronha01".to_string()),
                Value::Int64(1957),
                Value::Int64(44),
                Value::Float64(3.45),
                date(1954, 4, 13),
                Value::Bool(false),
            ],
            vec![
                Value::Utf8("partial01".to_string()),
                Value::Int64(1871),
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Bool(true),
            ],
        ],
    )
}

#[test]
fn sidecar_path_strips_csv_and_gz_extensions() {
    assert_eq!(
        sidecar_path(Path::new("/data/people.csv")),
        Path::new("/data/people_types.json")
    );
    assert_eq!(
        sidecar_path(Path::new("/data/team_game.csv.gz")),
        Path::new("/data/team_game_types.json")
    );
}

#[test]
fn round_trip_preserves_schema_and_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.csv");
    let ds = sample();

    to_csv_with_types(&ds, &path).unwrap();
    assert!(sidecar_path(&path).exists());

    let back = from_csv_with_types(&path).unwrap();
    assert_eq!(back, ds);
}

#[test]
fn round_trip_through_gzip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.csv.gz");
    let ds = sample();

    to_csv_with_types(&ds, &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0x1f, 0x8b]);

    assert_eq!(from_csv_with_types(&path).unwrap(), ds);
}

#[test]
fn round_trip_after_optimization_keeps_nullable_integers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batting.csv");
    let mut ds = DataSet::new(
        Schema::new(vec![
            Field::new("ab", DataType::Int64),
            Field::nullable("ibb", DataType::Float64),
        ]),
        vec![
            vec![Value::Int64(615), Value::Float64(15.0)],
            vec![Value::Int64(4), Value::Null],
        ],
    );
    optimize_dtypes(&mut ds);
    assert_eq!(ds.schema.fields[0], Field::new("ab", DataType::Int16));
    assert_eq!(ds.schema.fields[1], Field::nullable("ibb", DataType::Int8));

    to_csv_with_types(&ds, &path).unwrap();
    let back = from_csv_with_types(&path).unwrap();
    assert_eq!(back.schema, ds.schema);
    assert_eq!(back.rows[0][1], Value::Int64(15));
    assert_eq!(back.rows[1][1], Value::Null);
}

fn strings(fields: Vec<Field>, rows: &[&[Option<&str>]]) -> DataSet {
    let rows = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.map_or(Value::Null, |s| Value::Utf8(s.to_string())))
                .collect()
        })
        .collect();
    DataSet::new(Schema::new(fields), rows)
}

#[test]
fn round_trip_keeps_surrounding_whitespace_in_strings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("names.csv");
    let ds = strings(
        vec![Field::nullable("name_suffix", DataType::Utf8)],
        &[&[Some(" Jr.")], &[Some("  ")], &[None], &[Some("Sr. ")]],
    );

    to_csv_with_types(&ds, &path).unwrap();
    assert_eq!(from_csv_with_types(&path).unwrap(), ds);
}

#[test]
fn round_trip_keeps_empty_strings_in_non_nullable_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("names.csv.gz");
    let ds = strings(
        vec![
            Field::new("name_given", DataType::Utf8),
            Field::nullable("birth_city", DataType::Utf8),
        ],
        &[&[Some(""), Some("Mobile")], &[Some("Henry Louis"), None]],
    );

    to_csv_with_types(&ds, &path).unwrap();
    assert_eq!(from_csv_with_types(&path).unwrap(), ds);
}

#[test]
fn empty_string_in_nullable_column_is_rejected_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("names.csv");
    let ds = strings(
        vec![Field::nullable("birth_city", DataType::Utf8)],
        &[&[Some("Mobile")], &[Some("")]],
    );

    let err = to_csv_with_types(&ds, &path).unwrap_err();
    assert!(matches!(
        err,
        WrangleError::Unrepresentable { row: 3, ref column, .. } if column == "birth_city"
    ));
    assert!(!path.exists());
    assert!(!sidecar_path(&path).exists());
}

#[test]
fn written_csv_uses_plain_text_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.csv");
    to_csv_with_types(&sample(), &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("player_id,year_id,hr,era,debut,active"));
    assert_eq!(lines.next(), Some("aaronha01,1957,44,3.45,1954-04-13,false"));
    assert_eq!(lines.next(), Some("partial01,1871,,,,true"));
    assert!(!dir.path().join("sample.csv.partial").exists());
}

#[test]
fn reading_without_sidecar_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orphan.csv");
    std::fs::write(&path, "a\n1\n").unwrap();

    let err = from_csv_with_types(&path).unwrap_err();
    assert!(matches!(err, WrangleError::MissingSidecar { .. }));
}

#[test]
fn optimize_shrinks_to_narrowest_width() {
    let mut ds = DataSet::new(
        Schema::new(vec![
            Field::new("small", DataType::Int64),
            Field::new("medium", DataType::Int64),
            Field::new("large", DataType::Int64),
            Field::new("huge", DataType::Int64),
            Field::new("negative", DataType::Int64),
        ]),
        vec![
            vec![
                Value::Int64(127),
                Value::Int64(128),
                Value::Int64(33_000_000),
                Value::Int64(5_000_000_000),
                Value::Int64(-129),
            ],
            vec![
                Value::Int64(-128),
                Value::Int64(0),
                Value::Int64(0),
                Value::Int64(0),
                Value::Int64(0),
            ],
        ],
    );
    let changed = optimize_dtypes(&mut ds);

    let types: Vec<DataType> = ds.schema.fields.iter().map(|f| f.data_type).collect();
    assert_eq!(
        types,
        vec![
            DataType::Int8,
            DataType::Int16,
            DataType::Int32,
            DataType::Int64,
            DataType::Int16,
        ]
    );
    assert_eq!(changed, 4);
}

#[test]
fn optimize_leaves_fractional_and_empty_columns_alone() {
    let mut ds = DataSet::new(
        Schema::new(vec![
            Field::new("era", DataType::Float64),
            Field::nullable("zr", DataType::Float64),
            Field::new("name", DataType::Utf8),
        ]),
        vec![
            vec![Value::Float64(2.04), Value::Null, Value::Utf8("x".to_string())],
            vec![Value::Float64(1.0), Value::Null, Value::Utf8("y".to_string())],
        ],
    );
    assert_eq!(optimize_dtypes(&mut ds), 0);
    assert_eq!(ds.schema.fields[0].data_type, DataType::Float64);
    assert_eq!(ds.schema.fields[1].data_type, DataType::Float64);
    assert_eq!(ds.rows[1][0], Value::Float64(1.0));
}

#[test]
fn table_info_lists_every_column_with_dtype() {
    let info = table_info(&sample());
    assert!(info.starts_with("2 rows x 6 columns"));
    assert!(info.contains("player_id"));
    assert!(info.contains("int16"));
    assert!(info.contains("Int8"));
    assert!(info.contains("datetime64[ns]"));
    assert!(info.contains("object"));
    assert_eq!(info.lines().count(), 7);
}
