use anyhow::{Context, Result, bail};
use std::path::Path;
use tabschema_core::{CsvOptions, ValidationOptions, WarningOrder, read_csv};
use tabschema_parser::parse_file;
use tracing::info;

use crate::{OutputFormat, output};

pub struct ValidateArgs<'a> {
    pub schema_path: &'a str,
    pub data_path: &'a str,
    pub format: OutputFormat,
    pub order: WarningOrder,
    pub sample_size: Option<usize>,
    pub delimiter: Option<char>,
    pub infer_types: bool,
}

pub fn execute(args: ValidateArgs<'_>) -> Result<()> {
    info!("Validating {} against {}", args.data_path, args.schema_path);
    if let Some(size) = args.sample_size {
        info!("Sample size: {}", size);
    }

    // Parse and build the schema
    let definition = parse_file(Path::new(args.schema_path))
        .with_context(|| format!("Failed to parse schema file: {}", args.schema_path))?;
    let schema = definition
        .build()
        .with_context(|| format!("Invalid schema definition: {}", args.schema_path))?;

    // Load the data
    let data_path = Path::new(args.data_path);
    let csv_options = csv_options(data_path, args.delimiter, args.infer_types)?;
    let table = read_csv(data_path, &csv_options)
        .with_context(|| format!("Failed to read data file: {}", args.data_path))?;

    if args.format == OutputFormat::Text {
        output::print_info(&format!(
            "Loaded {} rows and {} columns from {}",
            table.len(),
            table.num_columns(),
            args.data_path
        ));
    }

    let mut options = ValidationOptions::new().with_order(args.order);
    if let Some(size) = args.sample_size {
        options = options.with_sample_size(size);
    }

    let report = schema
        .report(&table, &options)
        .context("Validation failed")?;

    output::print_validation_report(&report, definition.name.as_deref(), args.format)?;

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}

/// Builds CSV options from the file extension and command-line overrides.
fn csv_options(path: &Path, delimiter: Option<char>, infer_types: bool) -> Result<CsvOptions> {
    let mut options = CsvOptions::for_path(path).with_infer_types(infer_types);

    if let Some(delimiter) = delimiter {
        if !delimiter.is_ascii() {
            bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
        }
        options = options.with_delimiter(delimiter as u8);
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_options_from_extension() {
        let options = csv_options(Path::new("data.tsv"), None, true).unwrap();
        assert_eq!(options.delimiter, b'\t');

        let options = csv_options(Path::new("data.csv"), None, false).unwrap();
        assert_eq!(options.delimiter, b',');
        assert!(!options.infer_types);
    }

    #[test]
    fn test_csv_options_delimiter_override() {
        let options = csv_options(Path::new("data.csv"), Some(';'), true).unwrap();
        assert_eq!(options.delimiter, b';');

        assert!(csv_options(Path::new("data.csv"), Some('§'), true).is_err());
    }
}
