//! Numeric dtype optimization.

use tracing::debug;

use crate::types::{DataSet, DataType, Value};

/// Downcast every numeric column to the narrowest type that preserves its values.
///
/// - Integer columns shrink to the smallest of `Int8`/`Int16`/`Int32`/`Int64` covering their
///   observed range.
/// - Float columns whose non-null values are all whole numbers become integer columns, chosen the
///   same way. Nullability is kept, so a float column that only held floats because of missing
///   values becomes a nullable integer.
/// - Columns with no non-null values, fractional floats, and non-numeric columns are unchanged.
///
/// Returns the number of columns whose type changed.
pub fn optimize_dtypes(dataset: &mut DataSet) -> usize {
    let mut changed = 0;
    for idx in 0..dataset.schema.fields.len() {
        let current = dataset.schema.fields[idx].data_type;
        if !(current.is_integer() || current == DataType::Float64) {
            continue;
        }

        let Some((min, max)) = integral_range(dataset, idx) else {
            continue;
        };
        let target = DataType::narrowest_integer(min, max);
        if target == current {
            continue;
        }

        if current == DataType::Float64 {
            for row in &mut dataset.rows {
                if let Some(cell) = row.get_mut(idx) {
                    if let Some(v) = cell.as_i64() {
                        *cell = Value::Int64(v);
                    }
                }
            }
        }

        let field = &mut dataset.schema.fields[idx];
        debug!(column = %field.name, from = ?current, to = ?target, "downcast column");
        field.data_type = target;
        changed += 1;
    }
    changed
}

/// Min and max of a column when every non-null value is a whole number; `None` otherwise or when
/// the column holds no values at all.
fn integral_range(dataset: &DataSet, idx: usize) -> Option<(i64, i64)> {
    let mut range: Option<(i64, i64)> = None;
    for value in dataset.column(idx) {
        if value.is_null() {
            continue;
        }
        let v = value.as_i64()?;
        range = Some(match range {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }
    range
}
