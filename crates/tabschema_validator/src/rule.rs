//! The rule abstraction.
//!
//! Every check, built-in or user-defined, implements [`Rule`]. Rules are
//! shared through [`RuleRef`] handles so the same rule can appear in
//! several columns and inside several composites without being copied.

use crate::composite::CompositeRule;
use crate::result::{Evaluation, FAILED_LEAF, ValidationResult, Verdict};
use crate::Result;
use std::fmt;
use std::sync::Arc;
use tabschema_core::{Series, Value};

/// Shared, immutable handle to a rule.
pub type RuleRef = Arc<dyn Rule>;

/// How a rule looks at a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// The rule sees the whole column at once (e.g. uniqueness)
    WholeColumn,
    /// The rule judges each value on its own
    PerElement,
}

type DynamicMessage = dyn Fn(&Value) -> String + Send + Sync;

/// A user-supplied failure message.
#[derive(Clone)]
pub enum Message {
    /// Fixed text
    Static(String),
    /// Text computed from the offending value
    Dynamic(Arc<DynamicMessage>),
}

impl Message {
    /// Creates a message computed from the offending value.
    pub fn dynamic<F>(render: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Message::Dynamic(Arc::new(render))
    }

    /// Renders the message for a value.
    pub fn render(&self, value: &Value) -> String {
        match self {
            Message::Static(text) => text.clone(),
            Message::Dynamic(render) => render(value),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Message::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Static(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Static(text)
    }
}

/// Everything a rule may use to explain a failure.
#[derive(Debug, Clone, Copy)]
pub struct MessageContext<'a> {
    /// The offending value
    pub value: &'a Value,
    /// Row label of the value, if any
    pub row: Option<usize>,
    /// Column the value came from, if any
    pub column: Option<&'a str>,
    /// Outcome of the rule and its sub-rules at this position
    pub verdict: &'a Verdict,
}

impl<'a> MessageContext<'a> {
    /// Creates a context for a value with the given verdict.
    pub fn new(value: &'a Value, verdict: &'a Verdict) -> Self {
        Self {
            value,
            row: None,
            column: None,
            verdict,
        }
    }

    /// Narrows the context to the `index`-th sub-rule.
    pub fn child(&self, index: usize) -> MessageContext<'a> {
        MessageContext {
            verdict: self.verdict.child(index).unwrap_or(&FAILED_LEAF),
            ..*self
        }
    }
}

/// A check applied to a column.
///
/// `evaluate` returns `true` for every position that passes. Rules never
/// mutate the series they are given and never hold per-run state, so one
/// rule can be evaluated from several threads at once.
pub trait Rule: Send + Sync {
    /// Short readable name used in logs and error messages.
    fn name(&self) -> &str;

    /// Whether the rule looks at whole columns or single values.
    fn mode(&self) -> Mode;

    /// Evaluates the rule against a column.
    fn evaluate(&self, series: &Series) -> Result<ValidationResult>;

    /// Evaluates the rule and keeps the results of its sub-rules.
    ///
    /// Leaf rules keep the default; composites override it.
    fn evaluate_traced(&self, series: &Series) -> Result<Evaluation> {
        Ok(Evaluation::leaf(self.evaluate(series)?))
    }

    /// Explanation used when no custom message was supplied.
    fn default_message(&self, context: &MessageContext<'_>) -> String;

    /// Custom message supplied when the rule was built.
    fn custom_message(&self) -> Option<&Message> {
        None
    }

    /// Explains why the value in `context` failed.
    fn message(&self, context: &MessageContext<'_>) -> String {
        match self.custom_message() {
            Some(message) => message.render(context.value),
            None => self.default_message(context),
        }
    }

    /// Converts the rule into a shared handle.
    fn into_rule_ref(self) -> RuleRef
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

impl Rule for Arc<dyn Rule> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn mode(&self) -> Mode {
        (**self).mode()
    }

    fn evaluate(&self, series: &Series) -> Result<ValidationResult> {
        (**self).evaluate(series)
    }

    fn evaluate_traced(&self, series: &Series) -> Result<Evaluation> {
        (**self).evaluate_traced(series)
    }

    fn default_message(&self, context: &MessageContext<'_>) -> String {
        (**self).default_message(context)
    }

    fn custom_message(&self) -> Option<&Message> {
        (**self).custom_message()
    }

    fn message(&self, context: &MessageContext<'_>) -> String {
        (**self).message(context)
    }

    fn into_rule_ref(self) -> RuleRef {
        self
    }
}

/// Boolean combinators available on every rule.
///
/// The operands are moved into a new [`CompositeRule`]; they are never
/// modified. Wrap a rule in a [`RuleRef`] first to reuse it elsewhere.
pub trait RuleExt: Rule + Sized + 'static {
    /// Passes where both rules pass.
    fn and<R: Rule + 'static>(self, other: R) -> CompositeRule {
        CompositeRule::and(self, other)
    }

    /// Passes where at least one rule passes.
    fn or<R: Rule + 'static>(self, other: R) -> CompositeRule {
        CompositeRule::or(self, other)
    }

    /// Passes where this rule fails.
    fn not(self) -> CompositeRule {
        CompositeRule::not(self)
    }
}

impl<R: Rule + Sized + 'static> RuleExt for R {}

/// Applies a per-value predicate to every position of a series.
pub(crate) fn per_element(series: &Series, check: impl Fn(&Value) -> bool) -> ValidationResult {
    series.values().iter().map(check).collect()
}
