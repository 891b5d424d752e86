//! Serializable validation reports.

use serde::Serialize;

/// A rendered warning, detached from the rule that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarningRecord {
    /// Row label, absent for column- and table-level warnings
    pub row: Option<usize>,

    /// Column name, absent for table-level warnings
    pub column: Option<String>,

    /// Offending value as displayed
    pub value: Option<String>,

    /// Explanation without the row/column prefix
    pub message: String,

    /// Full rendered line
    pub text: String,
}

/// Outcome of validating one table against a schema.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Whether validation produced no warnings
    pub passed: bool,

    /// Warnings in the order they were returned
    pub warnings: Vec<WarningRecord>,

    /// Validation statistics
    pub stats: ValidationStats,
}

/// Statistics about a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationStats {
    /// Number of rows validated
    pub rows_validated: usize,

    /// Number of declared columns found in the table
    pub columns_checked: usize,

    /// Number of rule evaluations
    pub rules_evaluated: usize,

    /// Number of warnings produced
    pub warning_count: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Builds a report, deriving `passed` and the warning count.
    pub fn new(warnings: Vec<WarningRecord>, mut stats: ValidationStats) -> Self {
        stats.warning_count = warnings.len();
        Self {
            passed: warnings.is_empty(),
            warnings,
            stats,
        }
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(row: Option<usize>) -> WarningRecord {
        WarningRecord {
            row,
            column: Some("Age".to_string()),
            value: Some("270".to_string()),
            message: "was not in the range [0, 120)".to_string(),
            text: "{row: 1, column: \"Age\"}: \"270\" was not in the range [0, 120)".to_string(),
        }
    }

    #[test]
    fn test_empty_report_passes() {
        let report = ValidationReport::new(Vec::new(), ValidationStats::default());
        assert!(report.passed);
        assert_eq!(report.stats.warning_count, 0);
    }

    #[test]
    fn test_report_counts_warnings() {
        let report = ValidationReport::new(vec![record(Some(1)), record(None)], ValidationStats::default());
        assert!(!report.passed);
        assert_eq!(report.stats.warning_count, 2);
    }

    #[test]
    fn test_report_json() {
        let report = ValidationReport::new(vec![record(Some(1))], ValidationStats::default());
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["passed"], false);
        assert_eq!(json["warnings"][0]["row"], 1);
        assert_eq!(json["warnings"][0]["column"], "Age");
        assert_eq!(json["stats"]["warning_count"], 1);
    }
}
