//! Table schemas.
//!
//! A [`Schema`] is an ordered list of [`Column`]s. Validating a table runs
//! every column's rules against the matching table column and collects the
//! warnings; the table itself is never modified.
//!
//! Columns are matched by name, or by position for schemas built with
//! [`Schema::ordered`]. Table columns not named by the schema are ignored.
//! [`Schema::with_distinct_rows`] adds a check across all table columns that
//! reports repeated rows.

use crate::column::Column;
use crate::constraints::{Keep, distinct_mask};
use crate::warning::Warning;
use crate::{Result, RuleError};
use std::collections::HashSet;
use std::time::Instant;
use tabschema_core::{
    Series, Table, ValidationOptions, ValidationReport, ValidationStats, ValueKind, WarningOrder,
};
use tracing::{debug, info, warn};

/// An ordered set of column declarations.
///
/// # Example
///
/// ```rust
/// use tabschema_core::{Series, Table};
/// use tabschema_validator::{Column, InRange, LeadingWhitespace, Schema};
///
/// let schema = Schema::new(vec![
///     Column::new("Name").rule(LeadingWhitespace::new()),
///     Column::new("Age").rule(InRange::new(0.0, 120.0).unwrap()),
/// ])
/// .unwrap();
///
/// let table = Table::new(vec![
///     Series::new("Name", ["Ada", " Grace"]),
///     Series::new("Age", [36, 270]),
/// ])
/// .unwrap();
///
/// let warnings = schema.validate(&table).unwrap();
/// assert_eq!(warnings.len(), 2);
/// assert_eq!(
///     warnings[0].render(),
///     "{row: 1, column: \"Name\"}: \" Grace\" contains leading whitespace"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<Column>,
    ordered: bool,
    distinct_rows: Option<Keep>,
}

/// Warnings of one run, grouped by declared column, plus what was counted.
struct Run {
    groups: Vec<Vec<Warning>>,
    stats: ValidationStats,
}

impl Schema {
    /// Creates a schema that matches columns by name.
    ///
    /// # Errors
    ///
    /// Fails if `columns` is empty or two columns share a name.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(RuleError::EmptySchema);
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(RuleError::duplicate_column(column.name()));
            }
        }

        Ok(Self {
            columns,
            ordered: false,
            distinct_rows: None,
        })
    }

    /// Creates a schema that matches columns by position.
    ///
    /// The n-th declared column validates the n-th table column whatever its
    /// header. A table with a different number of columns yields a single
    /// warning and nothing else is checked.
    pub fn ordered(columns: Vec<Column>) -> Result<Self> {
        Ok(Self {
            ordered: true,
            ..Self::new(columns)?
        })
    }

    /// Reports rows that repeat another row across every table column.
    ///
    /// `keep` chooses which occurrence of a repeated row is not reported.
    pub fn with_distinct_rows(mut self, keep: Keep) -> Self {
        self.distinct_rows = Some(keep);
        self
    }

    /// Gets the duplicate-row setting, if the check is enabled.
    pub fn distinct_rows(&self) -> Option<Keep> {
        self.distinct_rows
    }

    /// Gets the declared columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Gets a declared column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name() == name)
    }

    /// Returns true if columns are matched by position.
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    /// Validates a table with default options.
    pub fn validate(&self, table: &Table) -> Result<Vec<Warning>> {
        self.validate_with(table, &ValidationOptions::default())
    }

    /// Validates a table.
    ///
    /// Problems in the data are returned as warnings; an error means a rule
    /// misbehaved.
    pub fn validate_with(&self, table: &Table, options: &ValidationOptions) -> Result<Vec<Warning>> {
        let run = self.run(table, options)?;
        Ok(arrange(run.groups, options.order))
    }

    /// Validates a table and summarizes the result.
    pub fn report(&self, table: &Table, options: &ValidationOptions) -> Result<ValidationReport> {
        let start = Instant::now();
        let run = self.run(table, options)?;
        let warnings = arrange(run.groups, options.order);

        let stats = ValidationStats {
            duration_ms: start.elapsed().as_millis() as u64,
            ..run.stats
        };

        Ok(ValidationReport::new(
            warnings.iter().map(Warning::to_record).collect(),
            stats,
        ))
    }

    fn run(&self, table: &Table, options: &ValidationOptions) -> Result<Run> {
        let sampled;
        let table = match options.sample_size {
            Some(size) if size < table.len() => {
                debug!(size, rows = table.len(), "Validating a sample of the table");
                sampled = table.head(size);
                &sampled
            }
            _ => table,
        };

        let mut stats = ValidationStats {
            rows_validated: table.len(),
            ..ValidationStats::default()
        };

        if self.ordered && table.num_columns() != self.columns.len() {
            warn!(
                expected = self.columns.len(),
                actual = table.num_columns(),
                "Column count mismatch"
            );
            return Ok(Run {
                groups: vec![vec![Warning::column_count(
                    self.columns.len(),
                    table.num_columns(),
                )]],
                stats,
            });
        }

        let mut groups = Vec::with_capacity(self.columns.len());

        for (position, column) in self.columns.iter().enumerate() {
            let Some(series) = self.find(table, position, column) else {
                warn!(column = column.name(), "Column missing from table");
                groups.push(vec![Warning::missing_column(column.name())]);
                continue;
            };

            groups.push(column.validate(series)?);
            stats.columns_checked += 1;
            stats.rules_evaluated += column.rules().len();
        }

        if let Some(keep) = self.distinct_rows {
            groups.push(duplicate_rows(table, keep));
            stats.rules_evaluated += 1;
        }

        info!(
            rows = stats.rows_validated,
            columns = stats.columns_checked,
            warnings = groups.iter().map(Vec::len).sum::<usize>(),
            "Validated table"
        );

        Ok(Run { groups, stats })
    }

    fn find<'t>(&self, table: &'t Table, position: usize, column: &Column) -> Option<&'t Series> {
        if self.ordered {
            table.column_at(position)
        } else {
            table.column(column.name())
        }
    }
}

/// One warning per row that repeats another row in every column.
fn duplicate_rows(table: &Table, keep: Keep) -> Vec<Warning> {
    let Some(first) = table.columns().first() else {
        return Vec::new();
    };

    let keys: Vec<Vec<(ValueKind, String)>> = (0..table.len())
        .map(|position| {
            table
                .columns()
                .iter()
                .filter_map(|series| series.get(position))
                .map(|value| (value.kind(), value.to_string()))
                .collect()
        })
        .collect();

    let warnings: Vec<Warning> = distinct_mask(keys, keep)
        .into_iter()
        .zip(first.index())
        .filter(|(passed, _)| !passed)
        .map(|(_, &row)| Warning::duplicate_row(row))
        .collect();

    debug!(duplicates = warnings.len(), ?keep, "Checked for duplicate rows");
    warnings
}

/// Flattens per-column warning groups into the requested order.
fn arrange(groups: Vec<Vec<Warning>>, order: WarningOrder) -> Vec<Warning> {
    let mut warnings: Vec<Warning> = groups.into_iter().flatten().collect();

    if order == WarningOrder::RowMajor {
        // Stable: rowless warnings first, then declaration order within a row.
        warnings.sort_by_key(Warning::row);
    }

    warnings
}
