//! CSV persistence with a JSON type sidecar.
//!
//! Plain CSV has no column types, so every table written by [`to_csv_with_types`] is paired with
//! a `<stem>_types.json` file in the same directory. [`from_csv_with_types`] reads the sidecar
//! first and parses the CSV against it, reproducing the exact schema that was written.
//!
//! Paths ending in `.gz` are gzip-compressed on write and decompressed on read.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{WrangleError, WrangleResult};
use crate::ingestion::csv::{DATE_FORMAT, ingest_csv_from_reader};
use crate::types::{DataSet, DataType, Field, Schema, Value};

const SIDECAR_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct TypeSidecar {
    version: u32,
    columns: Vec<Field>,
}

/// Path of the type sidecar belonging to a table file.
///
/// `people.csv` and `people.csv.gz` both map to `people_types.json`.
pub fn sidecar_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    let stem = name.strip_suffix(".csv").unwrap_or(name);
    path.with_file_name(format!("{stem}_types.json"))
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Persist `dataset` as CSV at `path`, plus its type sidecar.
///
/// The sidecar is written first and the table goes through a temporary file that is renamed into
/// place, so the table file only exists once it is complete.
///
/// An empty cell means null in a nullable column, so an empty string in a nullable
/// [`DataType::Utf8`] column is rejected with [`WrangleError::Unrepresentable`] before anything is
/// written.
pub fn to_csv_with_types(dataset: &DataSet, path: impl AsRef<Path>) -> WrangleResult<()> {
    let path = path.as_ref();
    check_representable(dataset)?;

    let sidecar = TypeSidecar {
        version: SIDECAR_VERSION,
        columns: dataset.schema.fields.clone(),
    };
    let json = serde_json::to_string_pretty(&sidecar)?;
    fs::write(sidecar_path(path), json + "\n")?;

    let mut partial = path.as_os_str().to_owned();
    partial.push(".partial");
    let partial = PathBuf::from(partial);

    let file = BufWriter::new(File::create(&partial)?);
    if is_gzip(path) {
        let encoder = write_rows(dataset, GzEncoder::new(file, Compression::default()))?;
        encoder.finish()?.flush()?;
    } else {
        write_rows(dataset, file)?.flush()?;
    }
    fs::rename(&partial, path)?;

    debug!(path = %path.display(), rows = dataset.row_count(), "wrote typed csv");
    Ok(())
}

fn check_representable(dataset: &DataSet) -> WrangleResult<()> {
    for (idx, field) in dataset.schema.fields.iter().enumerate() {
        if !(field.nullable && field.data_type == DataType::Utf8) {
            continue;
        }
        let empty = dataset
            .column(idx)
            .position(|v| matches!(v, Value::Utf8(s) if s.is_empty()));
        if let Some(row_idx0) = empty {
            return Err(WrangleError::Unrepresentable {
                // header is row 1
                row: row_idx0 + 2,
                column: field.name.clone(),
                message: "empty string in a nullable column would read back as null".to_string(),
            });
        }
    }
    Ok(())
}

fn write_rows<W: Write>(dataset: &DataSet, out: W) -> WrangleResult<W> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(dataset.schema.field_names())?;

    let mut record: Vec<String> = Vec::with_capacity(dataset.column_count());
    for row in &dataset.rows {
        record.clear();
        record.extend(row.iter().map(format_value));
        wtr.write_record(&record)?;
    }
    wtr.into_inner().map_err(|e| WrangleError::Io(e.into_error()))
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Int64(v) => v.to_string(),
        Value::Float64(v) => v.to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Utf8(v) => v.clone(),
        Value::Date(d) => d.format(DATE_FORMAT).to_string(),
    }
}

/// Read a table written by [`to_csv_with_types`], reconstructing its exact schema.
///
/// Fails with [`WrangleError::MissingSidecar`] when the sidecar is absent.
pub fn from_csv_with_types(path: impl AsRef<Path>) -> WrangleResult<DataSet> {
    let path = path.as_ref();
    let schema = read_sidecar(path)?;

    let file = BufReader::new(File::open(path)?);
    let input: Box<dyn Read> = if is_gzip(path) {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);
    ingest_csv_from_reader(&mut rdr, &schema)
}

fn read_sidecar(path: &Path) -> WrangleResult<Schema> {
    let sidecar = sidecar_path(path);
    let text = match fs::read_to_string(&sidecar) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(WrangleError::MissingSidecar {
                table: path.to_path_buf(),
                path: sidecar,
            });
        }
        Err(e) => return Err(e.into()),
    };

    let parsed: TypeSidecar = serde_json::from_str(&text)?;
    if parsed.version != SIDECAR_VERSION {
        return Err(WrangleError::SchemaMismatch {
            message: format!(
                "unsupported sidecar version {} in {}",
                parsed.version,
                sidecar.display()
            ),
        });
    }
    Ok(Schema::new(parsed.columns))
}
