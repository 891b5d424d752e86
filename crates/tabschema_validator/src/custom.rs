//! User-defined rules backed by closures.

use crate::result::ValidationResult;
use crate::rule::{per_element, Message, MessageContext, Mode, Rule};
use crate::Result;
use std::fmt;
use std::sync::Arc;
use tabschema_core::{Series, Value};

type SeriesPredicate = dyn Fn(&Series) -> ValidationResult + Send + Sync;
type ElementPredicate = dyn Fn(&Value) -> bool + Send + Sync;

/// A rule that looks at the whole column.
///
/// The predicate may return one `bool` for the column or a mask with one
/// `bool` per value. A mask of the wrong length is reported as
/// [`RuleError::MaskLength`](crate::RuleError::MaskLength).
///
/// ```rust
/// use tabschema_core::Series;
/// use tabschema_validator::{CustomSeriesRule, Rule, ValidationResult};
///
/// let sorted = CustomSeriesRule::new(
///     |series: &Series| {
///         let numbers: Vec<_> = series.values().iter().filter_map(|v| v.as_int()).collect();
///         numbers.windows(2).all(|pair| pair[0] <= pair[1])
///     },
///     "is not sorted",
/// );
///
/// let result = sorted.evaluate(&Series::new("n", [1, 3, 2])).unwrap();
/// assert_eq!(result, ValidationResult::Scalar(false));
/// ```
#[derive(Clone)]
pub struct CustomSeriesRule {
    predicate: Arc<SeriesPredicate>,
    message: Message,
}

impl CustomSeriesRule {
    pub fn new<F, R>(predicate: F, message: impl Into<Message>) -> Self
    where
        F: Fn(&Series) -> R + Send + Sync + 'static,
        R: Into<ValidationResult>,
    {
        Self {
            predicate: Arc::new(move |series: &Series| predicate(series).into()),
            message: message.into(),
        }
    }

    /// Replaces the message.
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = message.into();
        self
    }
}

impl Rule for CustomSeriesRule {
    fn name(&self) -> &str {
        "custom_series"
    }

    fn mode(&self) -> Mode {
        Mode::WholeColumn
    }

    fn evaluate(&self, series: &Series) -> Result<ValidationResult> {
        let result = (self.predicate)(series);
        result.check_len(self.name(), series.len())?;
        Ok(result)
    }

    fn default_message(&self, context: &MessageContext<'_>) -> String {
        self.message.render(context.value)
    }

    fn custom_message(&self) -> Option<&Message> {
        Some(&self.message)
    }
}

impl fmt::Debug for CustomSeriesRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomSeriesRule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// A rule that judges each value on its own.
#[derive(Clone)]
pub struct CustomElementRule {
    predicate: Arc<ElementPredicate>,
    message: Message,
}

impl CustomElementRule {
    pub fn new<F>(predicate: F, message: impl Into<Message>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            message: message.into(),
        }
    }

    /// Replaces the message.
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = message.into();
        self
    }
}

impl Rule for CustomElementRule {
    fn name(&self) -> &str {
        "custom_element"
    }

    fn mode(&self) -> Mode {
        Mode::PerElement
    }

    fn evaluate(&self, series: &Series) -> Result<ValidationResult> {
        Ok(per_element(series, |value| (self.predicate)(value)))
    }

    fn default_message(&self, context: &MessageContext<'_>) -> String {
        self.message.render(context.value)
    }

    fn custom_message(&self) -> Option<&Message> {
        Some(&self.message)
    }
}

impl fmt::Debug for CustomElementRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomElementRule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}
