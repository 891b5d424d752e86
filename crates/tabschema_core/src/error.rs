//! Error types for table construction and loading.
//!
//! Data-content problems are never errors in tabschema; they become warnings
//! during validation. The errors here only cover building a [`Table`](crate::Table)
//! that is structurally unusable, or failing to read one from disk.

use thiserror::Error;

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors that can occur while building or loading a table.
#[derive(Error, Debug)]
pub enum TableError {
    /// Two columns share the same name
    #[error("Duplicate column name: '{0}'")]
    DuplicateColumn(String),

    /// A column does not have the same number of rows as the rest of the table
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        /// Offending column
        column: String,
        /// Row count of the table
        expected: usize,
        /// Row count of the column
        actual: usize,
    },

    /// A data row has a different number of cells than the header
    #[error("Row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based data row
        row: usize,
        /// Header width
        expected: usize,
        /// Cells found
        actual: usize,
    },

    /// CSV/TSV parsing failed
    #[error("Failed to parse delimited data: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TableError {
    /// Creates a new duplicate column error.
    pub fn duplicate_column(name: impl Into<String>) -> Self {
        Self::DuplicateColumn(name.into())
    }

    /// Creates a new length mismatch error.
    pub fn length_mismatch(column: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            column: column.into(),
            expected,
            actual,
        }
    }
}
