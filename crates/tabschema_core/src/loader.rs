//! Delimited text (CSV/TSV) loading.
//!
//! Cells are kept verbatim: no trimming is applied, since leading and trailing
//! whitespace is exactly what some rules look for. Empty cells become
//! [`Value::Null`].

use crate::{Result, Series, Table, Value};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Options for reading delimited text into a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: u8,

    /// Whether the first record is a header row. Without one, columns are
    /// named by position (`"0"`, `"1"`, ...).
    pub has_headers: bool,

    /// Whether to convert all-numeric columns to integers or floats
    pub infer_types: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            infer_types: true,
        }
    }
}

impl CsvOptions {
    /// Comma-separated defaults.
    pub fn csv() -> Self {
        Self::default()
    }

    /// Tab-separated defaults.
    pub fn tsv() -> Self {
        Self::default().with_delimiter(b'\t')
    }

    /// Picks comma or tab separation from a file extension (`.tsv`/`.tab`).
    pub fn for_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("tsv") | Some("tab") => Self::tsv(),
            _ => Self::csv(),
        }
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether the first record is a header row.
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Sets whether numeric columns are converted.
    pub fn with_infer_types(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }
}

/// Reads a delimited file into a table.
pub fn read_csv(path: &Path, options: &CsvOptions) -> Result<Table> {
    debug!("Reading delimited data from {}", path.display());
    let file = std::fs::File::open(path)?;
    read_csv_from(file, options)
}

/// Reads delimited text held in memory into a table.
pub fn read_csv_str(content: &str, options: &CsvOptions) -> Result<Table> {
    read_csv_from(content.as_bytes(), options)
}

/// Reads delimited data from any reader into a table.
pub fn read_csv_from<R: Read>(reader: R, options: &CsvOptions) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .from_reader(reader);

    let mut headers: Vec<String> = if options.has_headers {
        reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect()
    } else {
        Vec::new()
    };

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        if columns.is_empty() {
            // Headerless input: the first record fixes the width
            headers = (0..record.len()).map(|i| i.to_string()).collect();
            columns = vec![Vec::new(); record.len()];
        }
        for (column, cell) in columns.iter_mut().zip(record.iter()) {
            column.push(cell.to_string());
        }
    }

    let series = headers
        .into_iter()
        .zip(columns)
        .map(|(name, cells)| {
            let values = if options.infer_types {
                infer_column(cells)
            } else {
                cells.into_iter().map(text_cell).collect()
            };
            Series::new(name, values)
        })
        .collect();

    let table = Table::new(series)?;
    debug!(
        "Loaded table with {} rows and {} columns",
        table.len(),
        table.num_columns()
    );
    Ok(table)
}

fn text_cell(cell: String) -> Value {
    if cell.is_empty() {
        Value::Null
    } else {
        Value::Str(cell)
    }
}

/// Converts a column to integers if every non-empty cell is an integer, to
/// floats if every non-empty cell is a number, and leaves it as text otherwise.
fn infer_column(cells: Vec<String>) -> Vec<Value> {
    let non_empty = || cells.iter().filter(|c| !c.is_empty());

    if non_empty().next().is_none() {
        return cells.into_iter().map(text_cell).collect();
    }

    if non_empty().all(|c| c.parse::<i64>().is_ok()) {
        return cells
            .iter()
            .map(|c| c.parse::<i64>().map_or(Value::Null, Value::Int))
            .collect();
    }

    if non_empty().all(|c| c.parse::<f64>().is_ok()) {
        return cells
            .iter()
            .map(|c| c.parse::<f64>().map_or(Value::Null, Value::Float))
            .collect();
    }

    cells.into_iter().map(text_cell).collect()
}
