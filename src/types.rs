//! Core data model types for wrangling.
//!
//! Tables are held in memory as a [`DataSet`]: an ordered [`Schema`] of typed, nullable
//! [`Field`]s plus row-major [`Value`] storage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Logical data type for a schema field.
///
/// Integer widths describe the guaranteed value range of a column; cells of every integer width
/// are stored as [`Value::Int64`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
    /// Calendar date without time zone.
    Date,
}

impl DataType {
    /// Returns true for the signed integer types.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64
        )
    }

    /// Inclusive value range for integer types.
    pub fn integer_bounds(self) -> Option<(i64, i64)> {
        match self {
            DataType::Int8 => Some((i8::MIN as i64, i8::MAX as i64)),
            DataType::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            DataType::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            DataType::Int64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Smallest integer type able to hold every value in `min..=max`.
    pub fn narrowest_integer(min: i64, max: i64) -> DataType {
        [DataType::Int8, DataType::Int16, DataType::Int32]
            .into_iter()
            .find(|t| {
                t.integer_bounds()
                    .is_some_and(|(lo, hi)| min >= lo && max <= hi)
            })
            .unwrap_or(DataType::Int64)
    }

    /// Approximate in-memory width of one cell, in bytes.
    pub(crate) fn cell_width(self) -> usize {
        match self {
            DataType::Int8 | DataType::Bool => 1,
            DataType::Int16 => 2,
            DataType::Int32 | DataType::Date => 4,
            DataType::Int64 | DataType::Float64 => 8,
            // pointer-sized handle, string bytes are not counted
            DataType::Utf8 => 8,
        }
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
    /// Whether the column may contain [`Value::Null`].
    #[serde(default)]
    pub nullable: bool,
}

impl Field {
    /// Create a new non-nullable field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: false,
        }
    }

    /// Create a new nullable field.
    pub fn nullable(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
        }
    }

    /// Display name of the field type, in the vocabulary of the upstream dataframe tooling.
    ///
    /// Nullable integers are capitalized (`Int8`), non-nullable ones are not (`int8`).
    pub fn dtype_name(&self) -> &'static str {
        match (self.data_type, self.nullable) {
            (DataType::Int8, false) => "int8",
            (DataType::Int8, true) => "Int8",
            (DataType::Int16, false) => "int16",
            (DataType::Int16, true) => "Int16",
            (DataType::Int32, false) => "int32",
            (DataType::Int32, true) => "Int32",
            (DataType::Int64, false) => "int64",
            (DataType::Int64, true) => "Int64",
            (DataType::Float64, _) => "float64",
            (DataType::Bool, _) => "bool",
            (DataType::Utf8, _) => "object",
            (DataType::Date, _) => "datetime64[ns]",
        }
    }
}

/// A list of fields describing the shape of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns a field by name, if present.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// Signed integer (any declared integer width).
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Calendar date.
    Date(NaiveDate),
}

impl Value {
    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Integer view of a numeric value.
    ///
    /// Floats convert only when they carry no fractional part and fit in an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            Value::Float64(v)
                if v.fract() == 0.0 && *v >= i64::MIN as f64 && *v < i64::MAX as f64 =>
            {
                Some(*v as i64)
            }
            _ => None,
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Iterate the values of column `idx`, top to bottom.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().map(move |row| row.get(idx).unwrap_or(&Value::Null))
    }

    /// Number of null cells in column `idx`.
    pub fn null_count(&self, idx: usize) -> usize {
        self.column(idx).filter(|v| v.is_null()).count()
    }

    /// Rename every column by applying `rename` to its current name.
    pub fn rename_columns<F>(&mut self, mut rename: F)
    where
        F: FnMut(&str) -> String,
    {
        for field in &mut self.schema.fields {
            field.name = rename(&field.name);
        }
    }

    /// Remove the named columns. Names not present in the schema are ignored.
    pub fn drop_columns(&mut self, names: &[&str]) {
        let keep: Vec<bool> = self
            .schema
            .fields
            .iter()
            .map(|f| !names.contains(&f.name.as_str()))
            .collect();
        if keep.iter().all(|k| *k) {
            return;
        }

        let mut flags = keep.iter();
        self.schema.fields.retain(|_| *flags.next().unwrap_or(&true));
        for row in &mut self.rows {
            let mut flags = keep.iter();
            row.retain(|_| *flags.next().unwrap_or(&true));
        }
    }

    /// Append a column whose values are derived from each existing row.
    ///
    /// The field is marked nullable if any derived value is [`Value::Null`].
    pub fn push_derived_column<F>(
        &mut self,
        name: impl Into<String>,
        data_type: DataType,
        mut derive: F,
    ) where
        F: FnMut(&[Value]) -> Value,
    {
        let values: Vec<Value> = self.rows.iter().map(|row| derive(row.as_slice())).collect();
        let nullable = values.iter().any(Value::is_null);
        self.schema.fields.push(Field {
            name: name.into(),
            data_type,
            nullable,
        });
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }
}
