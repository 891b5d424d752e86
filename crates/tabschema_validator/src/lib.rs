//! # tabschema validator
//!
//! Composable rule engine for checking tables against a schema. This crate
//! provides:
//!
//! - Built-in rules (patterns, ranges, allowed values, whitespace, type
//!   conversion, date formats, uniqueness, column type)
//! - Custom rules backed by closures
//! - Boolean combinators (`and`, `or`, `not`) that explain which sub-rule failed
//! - Column and schema declarations that turn failures into [`Warning`]s
//!
//! ## Example
//!
//! ```rust
//! use tabschema_core::{CsvOptions, read_csv_str};
//! use tabschema_validator::{
//!     CanConvert, Column, InSet, MatchesPattern, RuleExt, Schema, TargetType,
//! };
//!
//! let table = read_csv_str("id,sex\n12,Male\nx,male\n", &CsvOptions::default()).unwrap();
//!
//! let schema = Schema::new(vec![
//!     Column::new("id").rule(CanConvert::new(TargetType::Integer)),
//!     Column::new("sex").rule(
//!         InSet::new(["Male", "Female"]).unwrap()
//!             .or(MatchesPattern::new("^[A-Z]$").unwrap()),
//!     ),
//! ])
//! .unwrap();
//!
//! for warning in schema.validate(&table).unwrap() {
//!     println!("{warning}");
//! }
//! ```

mod column;
mod composite;
mod constraints;
mod custom;
mod error;
mod result;
mod rule;
mod schema;
mod warning;

pub use column::*;
pub use composite::*;
pub use constraints::*;
pub use custom::*;
pub use error::*;
pub use result::*;
pub use rule::*;
pub use schema::*;
pub use warning::*;
