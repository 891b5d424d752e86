use anyhow::{Context, Result};
use colored::*;
use tabschema_core::ValidationReport;

use crate::OutputFormat;

pub fn print_validation_report(
    report: &ValidationReport,
    schema_name: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json_report(report),
        OutputFormat::Text => {
            print_text_report(report, schema_name);
            Ok(())
        }
    }
}

fn print_text_report(report: &ValidationReport, schema_name: Option<&str>) {
    println!("\n{}", "═".repeat(60));
    match schema_name {
        Some(name) => println!("{}", format!("  VALIDATION REPORT: {}", name).bold()),
        None => println!("{}", "  VALIDATION REPORT".bold()),
    }
    println!("{}", "═".repeat(60));

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !report.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for (i, warning) in report.warnings.iter().enumerate() {
            println!("  {}. {}", i + 1, warning.text.yellow());
        }
    }

    let stats = &report.stats;
    println!("\n{}", "Summary:".bold());
    println!("  Rows validated:  {}", stats.rows_validated);
    println!("  Columns checked: {}", stats.columns_checked);
    println!("  Rules evaluated: {}", stats.rules_evaluated);
    println!("  Total warnings:  {}", stats.warning_count);
    println!("  Duration:        {} ms", stats.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) -> Result<()> {
    let json = report
        .to_json()
        .context("Failed to serialize validation report")?;
    println!("{}", json);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
