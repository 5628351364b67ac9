//! CSV ingestion: raw (schema-inferring) and typed (schema-driven) readers.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{WrangleError, WrangleResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Date format used for date cells, both when reading raw exports and when persisting.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read a raw, headered CSV file and infer a column type for every column.
///
/// Rules:
///
/// - Empty cells are [`Value::Null`]. Other cells are kept verbatim in string columns; numeric,
///   bool and date parsing ignores surrounding whitespace.
/// - A column whose non-null cells all parse as integers is [`DataType::Int64`]; all floats gives
///   [`DataType::Float64`]; all `True`/`False` gives [`DataType::Bool`]; anything else is
///   [`DataType::Utf8`].
/// - A column with no non-null cells is a nullable [`DataType::Float64`].
/// - Columns named in `date_columns` are parsed as [`DataType::Date`] when every non-null cell is
///   a `YYYY-MM-DD` date. Naming a column that is not in the header is an error.
pub fn read_raw_csv(path: impl AsRef<Path>, date_columns: &[&str]) -> WrangleResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    read_raw_csv_from_reader(&mut rdr, date_columns)
}

/// Read raw CSV data from an existing CSV reader, inferring column types.
pub fn read_raw_csv_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    date_columns: &[&str],
) -> WrangleResult<DataSet> {
    let headers = rdr.headers()?.clone();
    for name in date_columns {
        if !headers.iter().any(|h| h == *name) {
            return Err(WrangleError::MissingColumn {
                column: (*name).to_string(),
                table: "raw csv".to_string(),
            });
        }
    }

    let records = rdr.records().collect::<Result<Vec<_>, _>>()?;

    let mut fields = Vec::with_capacity(headers.len());
    for (idx, name) in headers.iter().enumerate() {
        let cells = || records.iter().map(move |r| r.get(idx).unwrap_or(""));
        let mut data_type = infer_column_type(cells());
        if date_columns.contains(&name) {
            if cells()
                .filter(|c| !c.is_empty())
                .all(|c| parse_date(c.trim()).is_some())
            {
                data_type = DataType::Date;
            } else {
                warn!(column = name, "date column contains non-date values, keeping inferred type");
            }
        }
        let nullable = cells().any(str::is_empty);
        fields.push(Field {
            name: name.to_string(),
            data_type,
            nullable,
        });
    }
    let schema = Schema::new(fields);

    let mut rows = Vec::with_capacity(records.len());
    for (row_idx0, record) in records.iter().enumerate() {
        let user_row = row_idx0 + 2;
        let mut row = Vec::with_capacity(schema.fields.len());
        for (idx, field) in schema.fields.iter().enumerate() {
            let raw = record.get(idx).unwrap_or("");
            row.push(parse_typed_value(user_row, field, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema, rows))
}

/// Ingest CSV data from an existing CSV reader using a known schema.
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain all schema fields (order can differ).
/// - Each value is parsed according to the schema field type; integer values must fit the
///   declared width.
/// - An empty cell is [`Value::Null`] in a nullable field and the empty string in a non-nullable
///   [`DataType::Utf8`] field; any other non-nullable field rejects it.
pub fn ingest_csv_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> WrangleResult<DataSet> {
    let headers = rdr.headers()?.clone();

    // Map schema fields -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| h == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(WrangleError::SchemaMismatch {
                    message: format!(
                        "missing required column '{field}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, field, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

fn infer_column_type<'a>(cells: impl Iterator<Item = &'a str>) -> DataType {
    let mut any = false;
    let mut all_int = true;
    let mut all_float = true;
    let mut all_bool = true;
    for cell in cells.filter(|c| !c.is_empty()).map(str::trim) {
        any = true;
        all_int = all_int && cell.parse::<i64>().is_ok();
        all_float = all_float && cell.parse::<f64>().is_ok();
        all_bool = all_bool && matches!(cell, "True" | "False" | "true" | "false");
        if !all_int && !all_float && !all_bool {
            return DataType::Utf8;
        }
    }

    if !any {
        DataType::Float64
    } else if all_int {
        DataType::Int64
    } else if all_float {
        DataType::Float64
    } else if all_bool {
        DataType::Bool
    } else {
        DataType::Utf8
    }
}

fn parse_typed_value(row: usize, field: &Field, raw: &str) -> WrangleResult<Value> {
    let err = |message: String| WrangleError::ParseError {
        row,
        column: field.name.clone(),
        raw: raw.to_owned(),
        message,
    };

    if raw.is_empty() {
        return match (field.nullable, field.data_type) {
            (true, _) => Ok(Value::Null),
            (false, DataType::Utf8) => Ok(Value::Utf8(String::new())),
            (false, _) => Err(err("empty value in non-nullable column".to_string())),
        };
    }

    let trimmed = raw.trim();
    match field.data_type {
        DataType::Utf8 => Ok(Value::Utf8(raw.to_owned())),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let v = trimmed.parse::<i64>().map_err(|e| err(e.to_string()))?;
            match field.data_type.integer_bounds() {
                Some((lo, hi)) if v < lo || v > hi => Err(err(format!(
                    "value out of range for {:?} ({lo}..={hi})",
                    field.data_type
                ))),
                _ => Ok(Value::Int64(v)),
            }
        }
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| err(e.to_string())),
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).map_err(err),
        DataType::Date => parse_date(trimmed)
            .map(Value::Date)
            .ok_or_else(|| err(format!("expected date ({DATE_FORMAT})"))),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}
