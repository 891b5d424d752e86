//! # tabschema core
//!
//! Core data structures shared by the tabschema crates.
//!
//! This crate holds everything the validation engine consumes or produces
//! that is not itself validation logic:
//!
//! - **Table**: column-oriented container of [`Value`]s ([`Table`], [`Series`])
//! - **Loading**: CSV/TSV input via [`read_csv`] and [`CsvOptions`]
//! - **Options**: [`ValidationOptions`] for a validation run
//! - **Reports**: serializable [`ValidationReport`]s
//!
//! ## Example
//!
//! ```rust
//! use tabschema_core::{CsvOptions, Value, read_csv_str};
//!
//! let table = read_csv_str("name,age\nAda,36\n", &CsvOptions::default()).unwrap();
//!
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.column("age").unwrap().get(0), Some(&Value::Int(36)));
//! ```

pub mod error;
pub mod loader;
pub mod options;
pub mod report;
pub mod table;

pub use error::*;
pub use loader::*;
pub use options::*;
pub use report::*;
pub use table::*;
