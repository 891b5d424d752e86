//! Column declarations.

use crate::rule::{Rule, RuleRef};
use crate::warning::Warning;
use crate::Result;
use std::fmt;
use std::sync::Arc;
use tabschema_core::Series;
use tracing::debug;

/// A named column and the rules its values must satisfy.
///
/// ```rust
/// use tabschema_core::Series;
/// use tabschema_validator::{Column, InRange};
///
/// let age = Column::new("Age").rule(InRange::new(0.0, 120.0).unwrap());
/// let warnings = age.validate(&Series::new("Age", [30, 270])).unwrap();
///
/// assert_eq!(warnings.len(), 1);
/// assert_eq!(warnings[0].row(), Some(1));
/// ```
#[derive(Clone)]
pub struct Column {
    name: String,
    rules: Vec<RuleRef>,
    allow_empty: bool,
}

impl Column {
    /// Creates a column without rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
            allow_empty: false,
        }
    }

    /// Creates a column with the given rules.
    pub fn with_rules(name: impl Into<String>, rules: Vec<RuleRef>) -> Self {
        Self {
            rules,
            ..Self::new(name)
        }
    }

    /// Adds a rule.
    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(rule.into_rule_ref());
        self
    }

    /// Skips empty cells (nulls and empty strings) instead of checking them.
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Gets the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the rules in declaration order.
    pub fn rules(&self) -> &[RuleRef] {
        &self.rules
    }

    /// Returns true if empty cells are skipped.
    pub fn allows_empty(&self) -> bool {
        self.allow_empty
    }

    /// Checks every rule against a series.
    ///
    /// Warnings come out grouped by rule, in rule declaration order, and by
    /// row within a rule. Row labels are those of `series`, even when empty
    /// cells were skipped.
    ///
    /// # Errors
    ///
    /// Fails only when a rule misbehaves, e.g. returns a mask that does not
    /// cover the series.
    pub fn validate(&self, series: &Series) -> Result<Vec<Warning>> {
        let filtered;
        let data = if self.allow_empty {
            filtered = series.filter(|value| !value.is_empty());
            &filtered
        } else {
            series
        };

        let mut warnings = Vec::new();

        for rule in &self.rules {
            let evaluation = rule.evaluate_traced(data)?;
            evaluation.result.check_len(rule.name(), data.len())?;

            for (position, (row, value)) in data.iter().enumerate() {
                if evaluation.result.passed_at(position) {
                    continue;
                }
                warnings.push(Warning::cell(
                    Arc::clone(rule),
                    row,
                    self.name.as_str(),
                    value.clone(),
                    evaluation.verdict_at(position),
                ));
            }
        }

        debug!(
            column = %self.name,
            rows = data.len(),
            skipped = series.len() - data.len(),
            warnings = warnings.len(),
            "Validated column"
        );

        Ok(warnings)
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<&str> = self.rules.iter().map(|rule| rule.name()).collect();

        f.debug_struct("Column")
            .field("name", &self.name)
            .field("rules", &rules)
            .field("allow_empty", &self.allow_empty)
            .finish()
    }
}
