//! Human-readable table summaries for logs.

use std::fmt::Write;

use crate::types::DataSet;

/// Summarize a table: shape, approximate memory, then one line per column with its dtype and
/// non-null count.
///
/// ```rust
/// use lahman_wrangle::codec::table_info;
/// use lahman_wrangle::types::{DataSet, DataType, Field, Schema, Value};
///
/// let ds = DataSet::new(
///     Schema::new(vec![Field::nullable("hr", DataType::Int16)]),
///     vec![vec![Value::Int64(61)], vec![Value::Null]],
/// );
/// let info = table_info(&ds);
/// assert!(info.contains("hr"));
/// assert!(info.contains("Int16"));
/// assert!(info.contains("1 non-null"));
/// ```
pub fn table_info(dataset: &DataSet) -> String {
    let rows = dataset.row_count();
    let bytes: usize = dataset
        .schema
        .fields
        .iter()
        .map(|f| f.data_type.cell_width() * rows)
        .sum();

    let width = dataset
        .schema
        .field_names()
        .map(str::len)
        .max()
        .unwrap_or(0);

    let mut out = format!(
        "{rows} rows x {} columns, ~{:.1} KB",
        dataset.column_count(),
        bytes as f64 / 1024.0
    );
    for (idx, field) in dataset.schema.fields.iter().enumerate() {
        let non_null = rows - dataset.null_count(idx);
        // writing to a String cannot fail
        let _ = write!(
            out,
            "\n  {:<width$}  {:<14}  {non_null} non-null",
            field.name,
            field.dtype_name()
        );
    }
    out
}
