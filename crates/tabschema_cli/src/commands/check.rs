use anyhow::{Context, Result};
use std::path::Path;
use tabschema_parser::{KeepDefinition, parse_file};
use tracing::info;

use crate::output;

pub fn execute(schema_path: &str) -> Result<()> {
    info!("Checking schema definition: {}", schema_path);

    // Parse the definition file
    let path = Path::new(schema_path);
    let definition = parse_file(path)
        .with_context(|| format!("Failed to parse schema file: {}", schema_path))?;

    // Building catches invalid rules and duplicate columns
    let schema = definition
        .build()
        .with_context(|| format!("Invalid schema definition: {}", schema_path))?;

    output::print_success("Schema definition is valid");

    // Print schema summary
    println!("\nSchema Summary:");
    println!("  Name:     {}", definition.name.as_deref().unwrap_or("N/A"));
    println!("  Columns:  {}", schema.columns().len());
    println!("  Rules:    {}", definition.rule_count());
    println!(
        "  Matching: {}",
        if schema.is_ordered() { "by position" } else { "by name" }
    );
    if let Some(keep) = definition.distinct_rows {
        let kept = match keep {
            KeepDefinition::First => "first kept",
            KeepDefinition::Last => "last kept",
            KeepDefinition::None => "none kept",
        };
        println!("  Duplicate rows: reported ({})", kept);
    }

    println!("\nColumns:");
    for column in &definition.columns {
        let kinds: Vec<&str> = column.rules.iter().map(|rule| rule.kind()).collect();
        let rules = if kinds.is_empty() {
            "no rules".to_string()
        } else {
            kinds.join(", ")
        };
        let empty = if column.allow_empty { " (empty allowed)" } else { "" };
        println!("  - {}: {}{}", column.name, rules, empty);
    }

    Ok(())
}
