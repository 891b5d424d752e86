//! Schema definition types.
//!
//! These mirror the structure of a definition file and are built into a
//! [`Schema`] with [`SchemaDefinition::build`]. Rule kinds are selected with a
//! `type` key.
//!
//! ```yaml
//! name: customers
//! distinct_rows: first
//! columns:
//!   - name: Age
//!     allow_empty: true
//!     rules:
//!       - type: in_range
//!         min: 0
//!         max: 120
//!   - name: Customer ID
//!     rules:
//!       - type: pattern
//!         regex: '\d{4}[A-Z]{4}'
//!         message: is not a customer ID
//! ```

use serde::Deserialize;
use tabschema_core::ValueKind;
use tabschema_validator::{
    Bounds, CanConvert, Column, CompositeRule, DateFormat, HasType, InRange, InSet, IsDistinct,
    Keep, LeadingWhitespace, MatchesPattern, Rule, RuleRef, Schema, TargetType, TrailingWhitespace,
};

/// A schema as written in a definition file.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDefinition {
    /// Optional name shown in reports
    pub name: Option<String>,

    /// Match columns by position instead of by name
    #[serde(default)]
    pub ordered: bool,

    /// Report repeated rows, sparing the chosen occurrence
    #[serde(default)]
    pub distinct_rows: Option<KeepDefinition>,

    /// Column declarations in order
    pub columns: Vec<ColumnDefinition>,
}

/// A column as written in a definition file.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,

    /// Skip null and empty cells
    #[serde(default)]
    pub allow_empty: bool,

    /// Rules applied to the column
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

/// Inclusivity of an `in_range` rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsDefinition {
    #[default]
    ClosedOpen,
    Closed,
    Open,
    OpenClosed,
}

impl From<BoundsDefinition> for Bounds {
    fn from(bounds: BoundsDefinition) -> Self {
        match bounds {
            BoundsDefinition::ClosedOpen => Bounds::ClosedOpen,
            BoundsDefinition::Closed => Bounds::Closed,
            BoundsDefinition::Open => Bounds::Open,
            BoundsDefinition::OpenClosed => Bounds::OpenClosed,
        }
    }
}

/// Which occurrence of a repeated value or row passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeepDefinition {
    #[default]
    First,
    Last,
    None,
}

impl From<KeepDefinition> for Keep {
    fn from(keep: KeepDefinition) -> Self {
        match keep {
            KeepDefinition::First => Keep::First,
            KeepDefinition::Last => Keep::Last,
            KeepDefinition::None => Keep::None,
        }
    }
}

/// Target of a `can_convert` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetTypeDefinition {
    #[serde(alias = "int")]
    Integer,
    Float,
    #[serde(alias = "bool")]
    Boolean,
}

impl From<TargetTypeDefinition> for TargetType {
    fn from(target: TargetTypeDefinition) -> Self {
        match target {
            TargetTypeDefinition::Integer => TargetType::Integer,
            TargetTypeDefinition::Float => TargetType::Float,
            TargetTypeDefinition::Boolean => TargetType::Boolean,
        }
    }
}

/// A rule as written in a definition file.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleDefinition {
    /// Text contains a regex match
    Pattern {
        regex: String,
        message: Option<String>,
    },

    /// Numeric value within a range; missing bounds are unbounded
    InRange {
        min: Option<f64>,
        max: Option<f64>,
        #[serde(default)]
        bounds: BoundsDefinition,
        message: Option<String>,
    },

    /// Value is one of the options
    InSet {
        options: Vec<String>,
        #[serde(default = "default_true")]
        case_sensitive: bool,
        message: Option<String>,
    },

    LeadingWhitespace {
        message: Option<String>,
    },

    TrailingWhitespace {
        message: Option<String>,
    },

    /// Value converts to a type
    CanConvert {
        to: TargetTypeDefinition,
        message: Option<String>,
    },

    /// Text parses with a strftime format
    DateFormat {
        format: String,
        message: Option<String>,
    },

    /// No repeated values in the column
    Distinct {
        #[serde(default)]
        keep: KeepDefinition,
        message: Option<String>,
    },

    /// Every non-null value has one kind
    HasType {
        kind: ValueKind,
        message: Option<String>,
    },

    And {
        left: Box<RuleDefinition>,
        right: Box<RuleDefinition>,
        message: Option<String>,
    },

    Or {
        left: Box<RuleDefinition>,
        right: Box<RuleDefinition>,
        message: Option<String>,
    },

    Not {
        rule: Box<RuleDefinition>,
        message: Option<String>,
    },
}

fn default_true() -> bool {
    true
}

/// Applies an optional message through a rule's `with_message` setter.
macro_rules! with_optional_message {
    ($rule:expr, $message:expr) => {
        match $message {
            Some(message) => $rule.with_message(message.as_str()),
            None => $rule,
        }
    };
}

impl RuleDefinition {
    /// Definition keyword of this rule.
    pub fn kind(&self) -> &'static str {
        match self {
            RuleDefinition::Pattern { .. } => "pattern",
            RuleDefinition::InRange { .. } => "in_range",
            RuleDefinition::InSet { .. } => "in_set",
            RuleDefinition::LeadingWhitespace { .. } => "leading_whitespace",
            RuleDefinition::TrailingWhitespace { .. } => "trailing_whitespace",
            RuleDefinition::CanConvert { .. } => "can_convert",
            RuleDefinition::DateFormat { .. } => "date_format",
            RuleDefinition::Distinct { .. } => "distinct",
            RuleDefinition::HasType { .. } => "has_type",
            RuleDefinition::And { .. } => "and",
            RuleDefinition::Or { .. } => "or",
            RuleDefinition::Not { .. } => "not",
        }
    }

    /// Builds the rule, including any nested rules.
    ///
    /// # Errors
    ///
    /// Returns the first construction error, e.g. an invalid regex.
    pub fn build(&self) -> tabschema_validator::Result<RuleRef> {
        let rule = match self {
            RuleDefinition::Pattern { regex, message } => {
                with_optional_message!(MatchesPattern::new(regex)?, message).into_rule_ref()
            }
            RuleDefinition::InRange {
                min,
                max,
                bounds,
                message,
            } => {
                let range = InRange::bounded(
                    min.unwrap_or(f64::NEG_INFINITY),
                    max.unwrap_or(f64::INFINITY),
                    (*bounds).into(),
                )?;
                with_optional_message!(range, message).into_rule_ref()
            }
            RuleDefinition::InSet {
                options,
                case_sensitive,
                message,
            } => {
                let mut set = InSet::new(options.iter().cloned())?;
                if !case_sensitive {
                    set = set.case_insensitive();
                }
                with_optional_message!(set, message).into_rule_ref()
            }
            RuleDefinition::LeadingWhitespace { message } => {
                with_optional_message!(LeadingWhitespace::new(), message).into_rule_ref()
            }
            RuleDefinition::TrailingWhitespace { message } => {
                with_optional_message!(TrailingWhitespace::new(), message).into_rule_ref()
            }
            RuleDefinition::CanConvert { to, message } => {
                with_optional_message!(CanConvert::new((*to).into()), message).into_rule_ref()
            }
            RuleDefinition::DateFormat { format, message } => {
                with_optional_message!(DateFormat::new(format.as_str())?, message).into_rule_ref()
            }
            RuleDefinition::Distinct { keep, message } => {
                let distinct = IsDistinct::new().with_keep((*keep).into());
                with_optional_message!(distinct, message).into_rule_ref()
            }
            RuleDefinition::HasType { kind, message } => {
                with_optional_message!(HasType::new(*kind), message).into_rule_ref()
            }
            RuleDefinition::And {
                left,
                right,
                message,
            } => {
                let rule = CompositeRule::and(left.build()?, right.build()?);
                with_optional_message!(rule, message).into_rule_ref()
            }
            RuleDefinition::Or {
                left,
                right,
                message,
            } => {
                let rule = CompositeRule::or(left.build()?, right.build()?);
                with_optional_message!(rule, message).into_rule_ref()
            }
            RuleDefinition::Not { rule, message } => {
                let rule = CompositeRule::not(rule.build()?);
                with_optional_message!(rule, message).into_rule_ref()
            }
        };

        Ok(rule)
    }
}

impl ColumnDefinition {
    /// Builds the column and all of its rules.
    pub fn build(&self) -> tabschema_validator::Result<Column> {
        let rules = self
            .rules
            .iter()
            .map(RuleDefinition::build)
            .collect::<tabschema_validator::Result<Vec<_>>>()?;

        Ok(Column::with_rules(self.name.as_str(), rules).allow_empty(self.allow_empty))
    }
}

impl SchemaDefinition {
    /// Builds the schema.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid rule, a duplicate column name, or an empty
    /// column list.
    pub fn build(&self) -> tabschema_validator::Result<Schema> {
        let columns = self
            .columns
            .iter()
            .map(ColumnDefinition::build)
            .collect::<tabschema_validator::Result<Vec<_>>>()?;

        let schema = if self.ordered {
            Schema::ordered(columns)?
        } else {
            Schema::new(columns)?
        };

        Ok(match self.distinct_rows {
            Some(keep) => schema.with_distinct_rows(keep.into()),
            None => schema,
        })
    }

    /// Total number of rules across all columns, counting each composite
    /// as one.
    pub fn rule_count(&self) -> usize {
        self.columns.iter().map(|column| column.rules.len()).sum()
    }
}
