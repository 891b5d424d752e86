//! Validation warnings.
//!
//! A warning is one problem found in the data. Cell warnings point at a row
//! and column and keep the offending value; column warnings (e.g. a missing
//! column) only name a column; row warnings (e.g. a duplicated row) only name
//! a row; table warnings name neither.
//!
//! Rendered forms:
//!
//! ```text
//! {row: 1, column: "Age"}: "270" was not in the range [0, 120)
//! {column: "Email"}: The column exists in the schema but not in the table
//! {row: 4}: The row is a duplicate of another row
//! Invalid number of columns. The schema specifies 3, but the table has 2
//! ```

use crate::result::{FAILED_LEAF, Verdict};
use crate::rule::{MessageContext, Rule, RuleRef};
use std::fmt;
use tabschema_core::{Value, WarningRecord};

static NO_VALUE: Value = Value::Null;

/// A single problem found while validating a table.
#[derive(Clone)]
pub struct Warning {
    rule: Option<RuleRef>,
    row: Option<usize>,
    column: Option<String>,
    value: Option<Value>,
    verdict: Option<Verdict>,
    message: Option<String>,
}

impl Warning {
    /// Creates a warning for a value that failed a rule.
    pub fn cell(
        rule: RuleRef,
        row: usize,
        column: impl Into<String>,
        value: Value,
        verdict: Verdict,
    ) -> Self {
        Self {
            rule: Some(rule),
            row: Some(row),
            column: Some(column.into()),
            value: Some(value),
            verdict: Some(verdict),
            message: None,
        }
    }

    /// Creates a warning about a whole column.
    pub fn column(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: None,
            row: None,
            column: Some(column.into()),
            value: None,
            verdict: None,
            message: Some(message.into()),
        }
    }

    /// Creates a warning about a whole row.
    pub fn row_level(row: usize, message: impl Into<String>) -> Self {
        Self {
            rule: None,
            row: Some(row),
            column: None,
            value: None,
            verdict: None,
            message: Some(message.into()),
        }
    }

    /// Creates the warning for a row repeating another row.
    pub fn duplicate_row(row: usize) -> Self {
        Self::row_level(row, "The row is a duplicate of another row")
    }

    /// Creates a warning about the whole table.
    pub fn table(message: impl Into<String>) -> Self {
        Self {
            rule: None,
            row: None,
            column: None,
            value: None,
            verdict: None,
            message: Some(message.into()),
        }
    }

    /// Creates the warning for a declared column absent from the table.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::column(column, "The column exists in the schema but not in the table")
    }

    /// Creates the warning for a positional schema whose width differs from
    /// the table's.
    pub fn column_count(expected: usize, actual: usize) -> Self {
        Self::table(format!(
            "Invalid number of columns. The schema specifies {expected}, but the table has {actual}"
        ))
    }

    /// Replaces the explanation with fixed text.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Gets the rule that failed, if any.
    pub fn rule(&self) -> Option<&RuleRef> {
        self.rule.as_ref()
    }

    /// Gets the row label.
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Gets the column name.
    pub fn column_name(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Gets the offending value.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Gets the outcome of the rule and its sub-rules at this cell.
    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    /// Returns true for warnings tied to a single cell.
    pub fn is_cell(&self) -> bool {
        self.value.is_some()
    }

    /// Explanation without the row/column prefix.
    pub fn message(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }

        match &self.rule {
            Some(rule) => {
                let context = MessageContext {
                    value: self.value.as_ref().unwrap_or(&NO_VALUE),
                    row: self.row,
                    column: self.column.as_deref(),
                    verdict: self.verdict.as_ref().unwrap_or(&FAILED_LEAF),
                };
                rule.message(&context)
            }
            None => String::new(),
        }
    }

    /// Full one-line rendering.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Converts the warning into a serializable record.
    pub fn to_record(&self) -> WarningRecord {
        WarningRecord {
            row: self.row,
            column: self.column.clone(),
            value: self.value.as_ref().map(ToString::to_string),
            message: self.message(),
            text: self.render(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message();

        match (&self.column, &self.value) {
            (Some(column), Some(value)) => {
                let row = self
                    .row
                    .map_or_else(|| "None".to_string(), |row| row.to_string());
                write!(
                    f,
                    "{{row: {}, column: \"{}\"}}: \"{}\" {}",
                    row, column, value, message
                )
            }
            (Some(column), None) => write!(f, "{{column: \"{}\"}}: {}", column, message),
            (None, _) => match self.row {
                Some(row) => write!(f, "{{row: {}}}: {}", row, message),
                None => f.write_str(&message),
            },
        }
    }
}

impl fmt::Debug for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Warning")
            .field("rule", &self.rule.as_ref().map(|rule| rule.name()))
            .field("row", &self.row)
            .field("column", &self.column)
            .field("value", &self.value)
            .field("message", &self.message())
            .finish()
    }
}
