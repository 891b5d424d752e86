//! Error types for rule construction and evaluation.

use crate::constraints::Bounds;
use thiserror::Error;

/// Result type for rule and schema operations.
pub type Result<T> = std::result::Result<T, RuleError>;

/// Configuration errors.
///
/// Problems with the data itself are never reported through this type; they
/// become [`Warning`](crate::Warning)s. A `RuleError` means a rule, column or
/// schema was declared incorrectly.
#[derive(Debug, Error)]
pub enum RuleError {
    /// Invalid regex pattern
    #[error("Invalid regex pattern '{pattern}': {error}")]
    InvalidPattern { pattern: String, error: String },

    /// Range bounds that no value can satisfy, or NaN bounds
    #[error("Invalid range: no value lies between {min} and {max} with {bounds:?} bounds")]
    InvalidRange { min: f64, max: f64, bounds: Bounds },

    /// Membership rule without any allowed values
    #[error("The set of allowed values is empty")]
    EmptyAllowedSet,

    /// Unparseable date format string
    #[error("Invalid date format string: '{0}'")]
    InvalidDateFormat(String),

    /// Two columns in a schema share a name
    #[error("Column '{0}' is declared more than once")]
    DuplicateColumn(String),

    /// Schema without columns
    #[error("A schema must declare at least one column")]
    EmptySchema,

    /// Two per-row masks of different lengths were combined
    #[error("Cannot combine results of length {left} and {right}")]
    ShapeMismatch { left: usize, right: usize },

    /// A whole-column rule returned a mask that does not cover the column
    #[error("Rule '{rule}' returned {actual} results for a column of {expected} values")]
    MaskLength {
        rule: String,
        expected: usize,
        actual: usize,
    },
}

impl RuleError {
    /// Creates a new invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, error: impl ToString) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            error: error.to_string(),
        }
    }

    /// Creates a new duplicate column error.
    pub fn duplicate_column(name: impl Into<String>) -> Self {
        Self::DuplicateColumn(name.into())
    }

    /// Creates a new mask length error.
    pub fn mask_length(rule: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::MaskLength {
            rule: rule.into(),
            expected,
            actual,
        }
    }
}
