//! Parser for tabschema definition files (YAML/TOML formats).
//!
//! This crate reads schema definitions from YAML and TOML into
//! [`SchemaDefinition`]s and builds them into validator [`Schema`]s.
//!
//! # Example
//!
//! ```rust
//! use tabschema_parser::parse_yaml;
//!
//! let yaml = r#"
//! name: customers
//! columns:
//!   - name: Sex
//!     rules:
//!       - type: in_set
//!         options: [Male, Female, Other]
//! "#;
//!
//! let definition = parse_yaml(yaml).expect("Failed to parse definition");
//! let schema = definition.build().expect("Failed to build schema");
//! assert_eq!(schema.columns()[0].name(), "Sex");
//! ```

mod definition;

pub use definition::*;

use std::path::Path;
use tabschema_validator::{RuleError, Schema};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a schema definition.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// The definition parsed but describes an invalid schema
    #[error("Invalid schema: {0}")]
    InvalidSchema(#[from] RuleError),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported definition file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a schema definition from a YAML string.
pub fn parse_yaml(content: &str) -> Result<SchemaDefinition> {
    let definition: SchemaDefinition = serde_yaml_ng::from_str(content)?;
    Ok(definition)
}

/// Parse a schema definition from a TOML string.
///
/// # Example
///
/// ```rust
/// use tabschema_parser::parse_toml;
///
/// let toml = r#"
/// [[columns]]
/// name = "Age"
///
/// [[columns.rules]]
/// type = "in_range"
/// min = 0
/// max = 120
/// "#;
///
/// let definition = parse_toml(toml).unwrap();
/// assert_eq!(definition.columns[0].rules.len(), 1);
/// ```
pub fn parse_toml(content: &str) -> Result<SchemaDefinition> {
    let definition: SchemaDefinition =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(definition)
}

/// Detect the definition format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `DefinitionFormat::Yaml`
/// * `.toml` → `DefinitionFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<DefinitionFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(DefinitionFormat::Yaml),
        "toml" => Ok(DefinitionFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a schema definition from a file with automatic format detection.
///
/// ```no_run
/// use tabschema_parser::parse_file;
/// use std::path::Path;
///
/// let definition = parse_file(Path::new("schemas/customers.yml")).unwrap();
/// println!("Loaded {} columns", definition.columns.len());
/// ```
pub fn parse_file(path: &Path) -> Result<SchemaDefinition> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    debug!("Parsing {:?} definition from {}", format, path.display());

    match format {
        DefinitionFormat::Yaml => parse_yaml(&content),
        DefinitionFormat::Toml => parse_toml(&content),
    }
}

/// Parse a definition file and build the schema it describes.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let definition = parse_file(path)?;
    Ok(definition.build()?)
}
