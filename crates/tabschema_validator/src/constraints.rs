//! Built-in rules.
//!
//! Per-value rules:
//! - [`MatchesPattern`]: text form contains a regex match
//! - [`InRange`]: numeric value within bounds
//! - [`InSet`]: value is one of a fixed list of options
//! - [`LeadingWhitespace`] / [`TrailingWhitespace`]: no surrounding whitespace
//! - [`CanConvert`]: value converts to a target type
//! - [`DateFormat`]: text parses with a strftime format
//!
//! Whole-column rules:
//! - [`IsDistinct`]: no repeated values, see [`Keep`]
//! - [`HasType`]: every non-null value has the same kind
//!
//! Values are judged by their text form unless the rule is numeric.

use crate::result::ValidationResult;
use crate::rule::{per_element, Message, MessageContext, Mode, Rule};
use crate::{Result, RuleError};
use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::fmt;
use tabschema_core::{Series, Value, ValueKind};

/// The text form of a value contains a match of a regular expression.
///
/// The pattern is searched for anywhere in the text; anchor it with `^` and
/// `$` to require a full match.
#[derive(Debug, Clone)]
pub struct MatchesPattern {
    regex: Regex,
    message: Option<Message>,
}

impl MatchesPattern {
    /// Compiles the pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| RuleError::invalid_pattern(pattern, e))?;
        Ok(Self {
            regex,
            message: None,
        })
    }

    /// Replaces the default message.
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Gets the pattern source.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Rule for MatchesPattern {
    fn name(&self) -> &str {
        "matches_pattern"
    }

    fn mode(&self) -> Mode {
        Mode::PerElement
    }

    fn evaluate(&self, series: &Series) -> Result<ValidationResult> {
        Ok(per_element(series, |value| {
            self.regex.is_match(&value.to_string())
        }))
    }

    fn default_message(&self, _context: &MessageContext<'_>) -> String {
        format!("does not match the pattern \"{}\"", self.regex.as_str())
    }

    fn custom_message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

/// Which ends of a numeric range are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bounds {
    /// `[min, max)`
    #[default]
    ClosedOpen,
    /// `[min, max]`
    Closed,
    /// `(min, max)`
    Open,
    /// `(min, max]`
    OpenClosed,
}

impl Bounds {
    /// Checks `x` against `min` and `max`.
    pub fn contains(self, min: f64, max: f64, x: f64) -> bool {
        let above_min = match self {
            Bounds::ClosedOpen | Bounds::Closed => x >= min,
            Bounds::Open | Bounds::OpenClosed => x > min,
        };
        let below_max = match self {
            Bounds::Closed | Bounds::OpenClosed => x <= max,
            Bounds::ClosedOpen | Bounds::Open => x < max,
        };
        above_min && below_max
    }

    fn brackets(self) -> (char, char) {
        match self {
            Bounds::ClosedOpen => ('[', ')'),
            Bounds::Closed => ('[', ']'),
            Bounds::Open => ('(', ')'),
            Bounds::OpenClosed => ('(', ']'),
        }
    }
}

/// A numeric value lies within a range.
///
/// Values that are not numbers, including text that does not parse as one,
/// fail.
#[derive(Debug, Clone)]
pub struct InRange {
    min: f64,
    max: f64,
    bounds: Bounds,
    message: Option<Message>,
}

impl InRange {
    /// Creates a `[min, max)` range.
    ///
    /// Use infinities for one-sided ranges.
    ///
    /// # Errors
    ///
    /// Fails if a bound is NaN or `min` is not below `max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        Self::bounded(min, max, Bounds::default())
    }

    /// Creates a range with explicit inclusivity.
    ///
    /// `min == max` is only accepted with [`Bounds::Closed`], the one
    /// variant that still contains a value.
    ///
    /// # Errors
    ///
    /// Fails if a bound is NaN or no value lies within the range.
    pub fn bounded(min: f64, max: f64, bounds: Bounds) -> Result<Self> {
        let empty = min > max || (min == max && bounds != Bounds::Closed);
        if min.is_nan() || max.is_nan() || empty {
            return Err(RuleError::InvalidRange { min, max, bounds });
        }
        Ok(Self {
            min,
            max,
            bounds,
            message: None,
        })
    }

    /// Sets which ends of the range are included.
    ///
    /// A range accepted by [`InRange::new`] has `min < max`, so it stays
    /// non-empty under every `Bounds`.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Replaces the default message.
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Gets the lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Gets the upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Gets the bound inclusivity.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

impl Rule for InRange {
    fn name(&self) -> &str {
        "in_range"
    }

    fn mode(&self) -> Mode {
        Mode::PerElement
    }

    fn evaluate(&self, series: &Series) -> Result<ValidationResult> {
        Ok(per_element(series, |value| {
            value
                .to_number()
                .is_some_and(|x| self.bounds.contains(self.min, self.max, x))
        }))
    }

    fn default_message(&self, _context: &MessageContext<'_>) -> String {
        let (open, close) = self.bounds.brackets();
        format!(
            "was not in the range {}{}, {}{}",
            open, self.min, self.max, close
        )
    }

    fn custom_message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

/// A value is one of a fixed list of options.
///
/// The text form of the value is compared with each option.
#[derive(Debug, Clone)]
pub struct InSet {
    options: Vec<String>,
    case_sensitive: bool,
    message: Option<Message>,
}

impl InSet {
    /// Creates a case-sensitive membership rule.
    ///
    /// # Errors
    ///
    /// Fails if no options are given.
    pub fn new<I, S>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        if options.is_empty() {
            return Err(RuleError::EmptyAllowedSet);
        }
        Ok(Self {
            options,
            case_sensitive: true,
            message: None,
        })
    }

    /// Ignores case when comparing.
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Replaces the default message.
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Gets the allowed options.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    fn contains(&self, text: &str) -> bool {
        if self.case_sensitive {
            self.options.iter().any(|option| option == text)
        } else {
            let text = text.to_lowercase();
            self.options
                .iter()
                .any(|option| option.to_lowercase() == text)
        }
    }
}

impl Rule for InSet {
    fn name(&self) -> &str {
        "in_set"
    }

    fn mode(&self) -> Mode {
        Mode::PerElement
    }

    fn evaluate(&self, series: &Series) -> Result<ValidationResult> {
        Ok(per_element(series, |value| self.contains(&value.to_string())))
    }

    fn default_message(&self, _context: &MessageContext<'_>) -> String {
        format!(
            "is not in the list of legal options ({})",
            self.options.join(", ")
        )
    }

    fn custom_message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

/// The text form of a value does not start with whitespace.
#[derive(Debug, Clone, Default)]
pub struct LeadingWhitespace {
    message: Option<Message>,
}

impl LeadingWhitespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the default message.
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for LeadingWhitespace {
    fn name(&self) -> &str {
        "leading_whitespace"
    }

    fn mode(&self) -> Mode {
        Mode::PerElement
    }

    fn evaluate(&self, series: &Series) -> Result<ValidationResult> {
        Ok(per_element(series, |value| {
            !value.to_string().starts_with(char::is_whitespace)
        }))
    }

    fn default_message(&self, _context: &MessageContext<'_>) -> String {
        "contains leading whitespace".to_string()
    }

    fn custom_message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

/// The text form of a value does not end with whitespace.
#[derive(Debug, Clone, Default)]
pub struct TrailingWhitespace {
    message: Option<Message>,
}

impl TrailingWhitespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the default message.
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for TrailingWhitespace {
    fn name(&self) -> &str {
        "trailing_whitespace"
    }

    fn mode(&self) -> Mode {
        Mode::PerElement
    }

    fn evaluate(&self, series: &Series) -> Result<ValidationResult> {
        Ok(per_element(series, |value| {
            !value.to_string().ends_with(char::is_whitespace)
        }))
    }

    fn default_message(&self, _context: &MessageContext<'_>) -> String {
        "contains trailing whitespace".to_string()
    }

    fn custom_message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

/// Types a value can be converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetType {
    Integer,
    Float,
    Boolean,
}

impl TargetType {
    /// Returns true if `value` converts to this type.
    ///
    /// Nulls never convert. Floats convert to integers by truncation, as
    /// long as they are finite.
    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => false,
            (TargetType::Integer, Value::Int(_) | Value::Bool(_)) => true,
            (TargetType::Integer, Value::Float(x)) => x.is_finite(),
            (TargetType::Integer, Value::Str(s)) => s.trim().parse::<i64>().is_ok(),
            (TargetType::Float, Value::Int(_) | Value::Float(_) | Value::Bool(_)) => true,
            (TargetType::Float, Value::Str(s)) => s.trim().parse::<f64>().is_ok(),
            (TargetType::Boolean, Value::Bool(_)) => true,
            (TargetType::Boolean, Value::Int(i)) => *i == 0 || *i == 1,
            (TargetType::Boolean, Value::Float(_)) => false,
            (TargetType::Boolean, Value::Str(s)) => matches!(
                s.trim().to_lowercase().as_str(),
                "true" | "false" | "1" | "0" | "yes" | "no"
            ),
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetType::Integer => "integer",
            TargetType::Float => "float",
            TargetType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A value can be converted to a target type.
#[derive(Debug, Clone)]
pub struct CanConvert {
    target: TargetType,
    message: Option<Message>,
}

impl CanConvert {
    pub fn new(target: TargetType) -> Self {
        Self {
            target,
            message: None,
        }
    }

    /// Replaces the default message.
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Gets the target type.
    pub fn target(&self) -> TargetType {
        self.target
    }
}

impl Rule for CanConvert {
    fn name(&self) -> &str {
        "can_convert"
    }

    fn mode(&self) -> Mode {
        Mode::PerElement
    }

    fn evaluate(&self, series: &Series) -> Result<ValidationResult> {
        Ok(per_element(series, |value| self.target.accepts(value)))
    }

    fn default_message(&self, _context: &MessageContext<'_>) -> String {
        format!("cannot be converted to type {}", self.target)
    }

    fn custom_message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

/// The text form of a value parses with a strftime-style format.
///
/// A value passes if it parses as a date and time, a date, or a time.
#[derive(Debug, Clone)]
pub struct DateFormat {
    format: String,
    message: Option<Message>,
}

impl DateFormat {
    /// Validates the format string.
    ///
    /// # Errors
    ///
    /// Fails on unknown or incomplete specifiers such as `%Q` or a lone `%`.
    pub fn new(format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(RuleError::InvalidDateFormat(format));
        }
        Ok(Self {
            format,
            message: None,
        })
    }

    /// Replaces the default message.
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Gets the format string.
    pub fn format(&self) -> &str {
        &self.format
    }

    fn parses(&self, text: &str) -> bool {
        NaiveDateTime::parse_from_str(text, &self.format).is_ok()
            || NaiveDate::parse_from_str(text, &self.format).is_ok()
            || NaiveTime::parse_from_str(text, &self.format).is_ok()
    }
}

impl Rule for DateFormat {
    fn name(&self) -> &str {
        "date_format"
    }

    fn mode(&self) -> Mode {
        Mode::PerElement
    }

    fn evaluate(&self, series: &Series) -> Result<ValidationResult> {
        Ok(per_element(series, |value| self.parses(&value.to_string())))
    }

    fn default_message(&self, _context: &MessageContext<'_>) -> String {
        format!("does not match the date format string \"{}\"", self.format)
    }

    fn custom_message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

/// Which occurrence of a repeated value still passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Keep {
    /// The first occurrence passes, later repeats fail
    #[default]
    First,
    /// The last occurrence passes, earlier ones fail
    Last,
    /// Every occurrence of a repeated value fails
    None,
}

/// Marks repeated keys as failing, sparing the occurrence chosen by `keep`.
pub(crate) fn distinct_mask<K: Hash + Eq>(keys: Vec<K>, keep: Keep) -> Vec<bool> {
    match keep {
        Keep::First => {
            let mut seen = HashSet::with_capacity(keys.len());
            keys.into_iter().map(|key| seen.insert(key)).collect()
        }
        Keep::Last => {
            let mut seen = HashSet::with_capacity(keys.len());
            let mut mask: Vec<bool> = keys.into_iter().rev().map(|key| seen.insert(key)).collect();
            mask.reverse();
            mask
        }
        Keep::None => {
            let mut counts: HashMap<&K, usize> = HashMap::with_capacity(keys.len());
            for key in &keys {
                *counts.entry(key).or_default() += 1;
            }
            keys.iter().map(|key| counts[key] == 1).collect()
        }
    }
}

/// No value appears more than once in the column.
///
/// By default the first occurrence of a value passes and every later repeat
/// fails; [`IsDistinct::with_keep`] changes which occurrence is spared.
/// Values of different kinds are never equal, so `1` and `"1"` are distinct.
#[derive(Debug, Clone, Default)]
pub struct IsDistinct {
    keep: Keep,
    message: Option<Message>,
}

impl IsDistinct {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets which occurrence of a repeated value passes.
    pub fn with_keep(mut self, keep: Keep) -> Self {
        self.keep = keep;
        self
    }

    /// Replaces the default message.
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Gets which occurrence of a repeated value passes.
    pub fn keep(&self) -> Keep {
        self.keep
    }
}

impl Rule for IsDistinct {
    fn name(&self) -> &str {
        "distinct"
    }

    fn mode(&self) -> Mode {
        Mode::WholeColumn
    }

    fn evaluate(&self, series: &Series) -> Result<ValidationResult> {
        let keys: Vec<(ValueKind, String)> = series
            .values()
            .iter()
            .map(|value| (value.kind(), value.to_string()))
            .collect();
        Ok(ValidationResult::Mask(distinct_mask(keys, self.keep)))
    }

    fn default_message(&self, _context: &MessageContext<'_>) -> String {
        "contains values that are not unique".to_string()
    }

    fn custom_message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

/// Every non-null value in the column has the given kind.
///
/// The outcome is a single verdict for the column, so a mismatch flags
/// every row.
#[derive(Debug, Clone)]
pub struct HasType {
    kind: ValueKind,
    message: Option<Message>,
}

impl HasType {
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Replaces the default message.
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Gets the expected kind.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }
}

impl Rule for HasType {
    fn name(&self) -> &str {
        "has_type"
    }

    fn mode(&self) -> Mode {
        Mode::WholeColumn
    }

    fn evaluate(&self, series: &Series) -> Result<ValidationResult> {
        let matches = series
            .values()
            .iter()
            .filter(|value| !value.is_null())
            .all(|value| value.kind() == self.kind);
        Ok(ValidationResult::Scalar(matches))
    }

    fn default_message(&self, _context: &MessageContext<'_>) -> String {
        format!("did not have the type \"{}\"", self.kind)
    }

    fn custom_message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Verdict;
    use pretty_assertions::assert_eq;
    use ValidationResult::{Mask, Scalar};

    fn message_of(rule: &dyn Rule, value: Value) -> String {
        let verdict = Verdict {
            passed: false,
            children: Vec::new(),
        };
        rule.message(&MessageContext::new(&value, &verdict))
    }

    #[test]
    fn test_pattern_search_semantics() {
        let rule = MatchesPattern::new(r"\d{4}[A-Z]{4}").unwrap();
        let series = Series::new("id", ["1234ABCD", "x1234ABCDx", "775ANSID"]);

        assert_eq!(rule.evaluate(&series).unwrap(), Mask(vec![true, true, false]));
        assert_eq!(
            message_of(&rule, Value::from("775ANSID")),
            "does not match the pattern \"\\d{4}[A-Z]{4}\""
        );
    }

    #[test]
    fn test_pattern_invalid() {
        let result = MatchesPattern::new("(unclosed");
        assert!(matches!(result, Err(RuleError::InvalidPattern { .. })));
    }

    #[test]
    fn test_range_default_bounds() {
        let rule = InRange::new(0.0, 120.0).unwrap();
        let series = Series::new(
            "age",
            [
                Value::Int(0),
                Value::Int(120),
                Value::Float(119.5),
                Value::from("42"),
                Value::from("old"),
                Value::Null,
            ],
        );

        assert_eq!(
            rule.evaluate(&series).unwrap(),
            Mask(vec![true, false, true, true, false, false])
        );
        assert_eq!(message_of(&rule, Value::Int(270)), "was not in the range [0, 120)");
    }

    #[test]
    fn test_range_explicit_bounds() {
        let series = Series::new("n", [Value::Int(0), Value::Int(10)]);

        let closed = InRange::new(0.0, 10.0).unwrap().with_bounds(Bounds::Closed);
        assert_eq!(closed.evaluate(&series).unwrap(), Mask(vec![true, true]));
        assert_eq!(message_of(&closed, Value::Int(11)), "was not in the range [0, 10]");

        let open = InRange::new(0.0, 10.0).unwrap().with_bounds(Bounds::Open);
        assert_eq!(open.evaluate(&series).unwrap(), Mask(vec![false, false]));

        let open_closed = InRange::new(0.0, 10.0).unwrap().with_bounds(Bounds::OpenClosed);
        assert_eq!(open_closed.evaluate(&series).unwrap(), Mask(vec![false, true]));
    }

    #[test]
    fn test_range_one_sided() {
        let rule = InRange::new(0.0, f64::INFINITY).unwrap();
        let series = Series::new("n", [Value::Int(-1), Value::Int(i64::MAX)]);

        assert_eq!(rule.evaluate(&series).unwrap(), Mask(vec![false, true]));
        assert_eq!(message_of(&rule, Value::Int(-1)), "was not in the range [0, inf)");
    }

    #[test]
    fn test_range_invalid() {
        assert!(matches!(
            InRange::new(5.0, 1.0),
            Err(RuleError::InvalidRange { .. })
        ));
        assert!(InRange::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_range_single_point() {
        assert!(matches!(
            InRange::new(5.0, 5.0),
            Err(RuleError::InvalidRange { .. })
        ));
        for bounds in [Bounds::ClosedOpen, Bounds::Open, Bounds::OpenClosed] {
            assert!(
                InRange::bounded(5.0, 5.0, bounds).is_err(),
                "{bounds:?} should reject an empty range"
            );
        }

        let point = InRange::bounded(5.0, 5.0, Bounds::Closed).unwrap();
        let series = Series::new("n", [Value::Int(5), Value::Float(5.5)]);
        assert_eq!(point.evaluate(&series).unwrap(), Mask(vec![true, false]));
        assert_eq!(message_of(&point, Value::Float(5.5)), "was not in the range [5, 5]");
    }

    #[test]
    fn test_in_set() {
        let rule = InSet::new(["Male", "Female", "Other"]).unwrap();
        let series = Series::new("sex", ["Male", "male", "Other", ""]);

        assert_eq!(
            rule.evaluate(&series).unwrap(),
            Mask(vec![true, false, true, false])
        );
        assert_eq!(
            message_of(&rule, Value::from("male")),
            "is not in the list of legal options (Male, Female, Other)"
        );

        let relaxed = rule.case_insensitive();
        assert_eq!(
            relaxed.evaluate(&series).unwrap(),
            Mask(vec![true, true, true, false])
        );
    }

    #[test]
    fn test_in_set_compares_text_form() {
        let rule = InSet::new(["1", "2"]).unwrap();
        let series = Series::new("n", [Value::Int(1), Value::Int(3)]);

        assert_eq!(rule.evaluate(&series).unwrap(), Mask(vec![true, false]));
    }

    #[test]
    fn test_in_set_empty() {
        let result = InSet::new(Vec::<String>::new());
        assert!(matches!(result, Err(RuleError::EmptyAllowedSet)));
    }

    #[test]
    fn test_whitespace() {
        let series = Series::new("name", ["Gerald ", " Yuni", "Ada", "\tTab"]);

        assert_eq!(
            LeadingWhitespace::new().evaluate(&series).unwrap(),
            Mask(vec![true, false, true, false])
        );
        assert_eq!(
            TrailingWhitespace::new().evaluate(&series).unwrap(),
            Mask(vec![false, true, true, true])
        );
    }

    #[test]
    fn test_can_convert() {
        let series = Series::new(
            "n",
            [
                Value::from("13"),
                Value::from("a"),
                Value::from(" 7 "),
                Value::Float(2.5),
                Value::Null,
            ],
        );

        let integer = CanConvert::new(TargetType::Integer);
        assert_eq!(
            integer.evaluate(&series).unwrap(),
            Mask(vec![true, false, true, true, false])
        );
        assert_eq!(
            message_of(&integer, Value::from("a")),
            "cannot be converted to type integer"
        );

        let boolean = CanConvert::new(TargetType::Boolean);
        let flags = Series::new("flag", [Value::from("Yes"), Value::Int(2), Value::Bool(false)]);
        assert_eq!(boolean.evaluate(&flags).unwrap(), Mask(vec![true, false, true]));
    }

    #[test]
    fn test_date_format() {
        let rule = DateFormat::new("%Y-%m-%d").unwrap();
        let series = Series::new("date", ["2024-02-29", "2023-02-29", "29/02/2024", ""]);

        assert_eq!(
            rule.evaluate(&series).unwrap(),
            Mask(vec![true, false, false, false])
        );
        assert_eq!(
            message_of(&rule, Value::from("29/02/2024")),
            "does not match the date format string \"%Y-%m-%d\""
        );
    }

    #[test]
    fn test_date_format_with_time() {
        let rule = DateFormat::new("%Y-%m-%d %H:%M").unwrap();
        let series = Series::new("ts", ["2024-01-01 10:30", "2024-01-01"]);

        assert_eq!(rule.evaluate(&series).unwrap(), Mask(vec![true, false]));
    }

    #[test]
    fn test_date_format_invalid() {
        assert!(matches!(
            DateFormat::new("%Y-%Q"),
            Err(RuleError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn test_distinct_keeps_first_occurrence() {
        let rule = IsDistinct::new();
        let series = Series::new(
            "id",
            [Value::Int(1), Value::Int(2), Value::Int(1), Value::from("1"), Value::Int(1)],
        );

        assert_eq!(
            rule.evaluate(&series).unwrap(),
            Mask(vec![true, true, false, true, false])
        );
        assert_eq!(rule.mode(), Mode::WholeColumn);
    }

    #[test]
    fn test_distinct_keep_last_and_none() {
        let series = Series::new("id", ["a", "b", "a", "c", "a"]);

        let last = IsDistinct::new().with_keep(Keep::Last);
        assert_eq!(
            last.evaluate(&series).unwrap(),
            Mask(vec![false, true, false, true, true])
        );

        let none = IsDistinct::new().with_keep(Keep::None);
        assert_eq!(
            none.evaluate(&series).unwrap(),
            Mask(vec![false, true, false, true, false])
        );
    }

    #[test]
    fn test_has_type() {
        let ints = Series::new("n", [Value::Int(1), Value::Null, Value::Int(3)]);
        let mixed = Series::new("n", [Value::Int(1), Value::from("two")]);
        let rule = HasType::new(ValueKind::Integer);

        assert_eq!(rule.evaluate(&ints).unwrap(), Scalar(true));
        assert_eq!(rule.evaluate(&mixed).unwrap(), Scalar(false));
        assert_eq!(
            message_of(&rule, Value::from("two")),
            "did not have the type \"integer\""
        );
    }

    #[test]
    fn test_custom_message_overrides_default() {
        let rule = LeadingWhitespace::new().with_message("starts with a space");
        assert_eq!(message_of(&rule, Value::from(" x")), "starts with a space");

        let rule = InRange::new(0.0, 1.0)
            .unwrap()
            .with_message(Message::dynamic(|value| format!("{value} is out of bounds")));
        assert_eq!(message_of(&rule, Value::Int(5)), "5 is out of bounds");
    }
}
