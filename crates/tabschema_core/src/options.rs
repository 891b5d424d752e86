//! Validation options.
//!
//! Options never change which problems are found, only how much of the table
//! is looked at and how the resulting warnings are ordered.

use serde::{Deserialize, Serialize};

/// Order in which warnings are returned from a schema validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningOrder {
    /// Column-level warnings first, then cell warnings by row; within a row,
    /// warnings keep column declaration order.
    #[default]
    RowMajor,

    /// Warnings in column declaration order, then row order within a column.
    ColumnMajor,
}

/// Options for a validation run.
///
/// # Example
///
/// ```rust
/// use tabschema_core::{ValidationOptions, WarningOrder};
///
/// let options = ValidationOptions::new()
///     .with_order(WarningOrder::ColumnMajor)
///     .with_sample_size(1000);
///
/// assert_eq!(options.sample_size, Some(1000));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Ordering of the returned warnings
    pub order: WarningOrder,

    /// Validate only the first N rows
    pub sample_size: Option<usize>,
}

impl ValidationOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the warning order.
    pub fn with_order(mut self, order: WarningOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the number of leading rows to validate.
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = Some(size);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ValidationOptions::new();
        assert_eq!(options.order, WarningOrder::RowMajor);
        assert_eq!(options.sample_size, None);
    }

    #[test]
    fn test_order_deserializes_from_snake_case() {
        let order: WarningOrder = serde_json::from_str("\"column_major\"").unwrap();
        assert_eq!(order, WarningOrder::ColumnMajor);
    }
}
