//! Table representation for validation.
//!
//! This module provides the column-oriented container that schemas are
//! validated against: a [`Table`] is an ordered set of named [`Series`] of
//! equal length, and each series holds [`Value`]s together with the row label
//! of every value.

use crate::{Result, TableError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null/missing value
    Null,
    /// String value
    Str(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
}

impl Value {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this value is null or an empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Str(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Str(_) => ValueKind::String,
            Value::Int(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Boolean,
        }
    }

    /// Attempts to get this value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Coerces this value to a number.
    ///
    /// Numeric values convert directly and strings are parsed after trimming.
    /// Anything else, including unparseable text, yields `None`.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Str(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            // Debug keeps the trailing ".0" on whole floats
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// The kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Null,
    #[serde(alias = "str")]
    String,
    #[serde(alias = "int")]
    Integer,
    Float,
    #[serde(alias = "bool")]
    Boolean,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A named, ordered column of values.
///
/// Every value carries the row label it had in the table it came from, so a
/// filtered series (for example with empty cells removed) still reports the
/// original row numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    index: Vec<usize>,
    values: Vec<Value>,
}

impl Series {
    /// Creates a new series labelled `0..n`.
    pub fn new<V, I>(name: impl Into<String>, values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        Self {
            name: name.into(),
            index: (0..values.len()).collect(),
            values,
        }
    }

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the series holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the values in order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns the row labels in order.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Gets the value at a position (not a row label).
    pub fn get(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    /// Gets the row label at a position.
    pub fn row(&self, position: usize) -> Option<usize> {
        self.index.get(position).copied()
    }

    /// Iterates over `(row label, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.index.iter().copied().zip(self.values.iter())
    }

    /// Returns a new series with only the values matching `keep`.
    ///
    /// Row labels of the kept values are preserved.
    pub fn filter(&self, keep: impl Fn(&Value) -> bool) -> Series {
        let (index, values) = self
            .iter()
            .filter(|(_, value)| keep(value))
            .map(|(row, value)| (row, value.clone()))
            .unzip();
        Series {
            name: self.name.clone(),
            index,
            values,
        }
    }

    /// Returns the first `n` values.
    pub fn head(&self, n: usize) -> Series {
        let n = n.min(self.len());
        Series {
            name: self.name.clone(),
            index: self.index[..n].to_vec(),
            values: self.values[..n].to_vec(),
        }
    }
}

/// A table of equally long, uniquely named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Series>,
    rows: usize,
}

impl Table {
    /// Creates a table with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a table from columns.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateColumn`] if two columns share a name and
    /// [`TableError::LengthMismatch`] if the columns differ in length.
    pub fn new(columns: Vec<Series>) -> Result<Self> {
        let rows = columns.first().map_or(0, Series::len);
        let mut seen = HashSet::new();

        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(TableError::duplicate_column(column.name()));
            }
            if column.len() != rows {
                return Err(TableError::length_mismatch(
                    column.name(),
                    rows,
                    column.len(),
                ));
            }
        }

        Ok(Self { columns, rows })
    }

    /// Creates a table from a header and row-major data.
    pub fn from_rows<H, S>(headers: H, rows: Vec<Vec<Value>>) -> Result<Self>
    where
        H: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let mut columns: Vec<Vec<Value>> = vec![Vec::with_capacity(rows.len()); headers.len()];

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != headers.len() {
                return Err(TableError::RaggedRow {
                    row: row_idx,
                    expected: headers.len(),
                    actual: row.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }

        Self::new(
            headers
                .into_iter()
                .zip(columns)
                .map(|(name, values)| Series::new(name, values))
                .collect(),
        )
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns the number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns the columns in order.
    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    /// Returns the column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Series::name)
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Series> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Looks up a column by position.
    pub fn column_at(&self, position: usize) -> Option<&Series> {
        self.columns.get(position)
    }

    /// Takes the first `size` rows of the table.
    ///
    /// If `size` is greater than the number of rows, returns all rows.
    pub fn head(&self, size: usize) -> Table {
        Table {
            columns: self.columns.iter().map(|c| c.head(size)).collect(),
            rows: size.min(self.rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_kinds() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::from("x").kind(), ValueKind::String);
        assert_eq!(Value::from(42).kind(), ValueKind::Integer);
        assert_eq!(Value::from(3.5).kind(), ValueKind::Float);
        assert_eq!(Value::from(true).kind(), ValueKind::Boolean);
        assert_eq!(ValueKind::Integer.to_string(), "integer");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from("Gerald ").to_string(), "Gerald ");
        assert_eq!(Value::from(82).to_string(), "82");
        assert_eq!(Value::from(82.0).to_string(), "82.0");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_value_to_number() {
        assert_eq!(Value::from(7).to_number(), Some(7.0));
        assert_eq!(Value::from(" 2.5 ").to_number(), Some(2.5));
        assert_eq!(Value::from("abc").to_number(), None);
        assert_eq!(Value::Null.to_number(), None);
        assert_eq!(Value::from(true).to_number(), None);
    }

    #[test]
    fn test_value_is_empty() {
        assert!(Value::Null.is_empty());
        assert!(Value::from("").is_empty());
        assert!(!Value::from(" ").is_empty());
        assert!(!Value::from(0).is_empty());
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn test_series_filter_keeps_row_labels() {
        let series = Series::new("name", vec!["a", "", "c", ""]);
        let filtered = series.filter(|v| !v.is_empty());

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.index(), &[0, 2]);
        assert_eq!(filtered.row(1), Some(2));
        assert_eq!(filtered.get(1), Some(&Value::from("c")));
    }

    #[test]
    fn test_table_lookup() {
        let table = Table::new(vec![
            Series::new("id", vec![1, 2, 3]),
            Series::new("name", vec!["a", "b", "c"]),
        ])
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["id", "name"]);
        assert!(table.column("name").is_some());
        assert!(table.column("missing").is_none());
        assert_eq!(table.column_at(0).map(Series::name), Some("id"));
    }

    #[test]
    fn test_table_rejects_duplicate_columns() {
        let result = Table::new(vec![
            Series::new("id", vec![1]),
            Series::new("id", vec![2]),
        ]);
        assert!(matches!(result, Err(TableError::DuplicateColumn(name)) if name == "id"));
    }

    #[test]
    fn test_table_rejects_length_mismatch() {
        let result = Table::new(vec![
            Series::new("id", vec![1, 2]),
            Series::new("name", vec!["a"]),
        ]);
        assert!(matches!(result, Err(TableError::LengthMismatch { .. })));
    }

    #[test]
    fn test_table_from_rows() {
        let table = Table::from_rows(
            ["id", "name"],
            vec![
                vec![Value::from(1), Value::from("a")],
                vec![Value::from(2), Value::Null],
            ],
        )
        .unwrap();

        let name = table.column("name").unwrap();
        assert_eq!(name.values(), &[Value::from("a"), Value::Null]);

        let ragged = Table::from_rows(["id", "name"], vec![vec![Value::from(1)]]);
        assert!(matches!(ragged, Err(TableError::RaggedRow { row: 0, .. })));
    }

    #[test]
    fn test_table_head() {
        let table = Table::new(vec![Series::new("id", 0..10i64)]).unwrap();

        let sample = table.head(5);
        assert_eq!(sample.len(), 5);

        let large_sample = table.head(100);
        assert_eq!(large_sample.len(), 10);
    }
}
