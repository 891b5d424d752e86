//! Boolean combinations of rules.
//!
//! Both operands of `and`/`or` are always evaluated, even when the first
//! one already decides the outcome, so that failure messages can name
//! every sub-rule that failed.

use crate::result::{Evaluation, ValidationResult};
use crate::rule::{Message, MessageContext, Mode, Rule, RuleRef};
use crate::Result;
use std::fmt;
use tabschema_core::Series;

/// The boolean operator of a [`CompositeRule`] and its operands.
#[derive(Clone)]
pub enum Operator {
    And(RuleRef, RuleRef),
    Or(RuleRef, RuleRef),
    Not(RuleRef),
}

impl Operator {
    /// Operator keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Operator::And(..) => "and",
            Operator::Or(..) => "or",
            Operator::Not(..) => "not",
        }
    }

    /// Operands in evaluation order.
    pub fn operands(&self) -> Vec<&RuleRef> {
        match self {
            Operator::And(left, right) | Operator::Or(left, right) => vec![left, right],
            Operator::Not(child) => vec![child],
        }
    }
}

/// A rule built from other rules with `and`, `or` and `not`.
#[derive(Clone)]
pub struct CompositeRule {
    operator: Operator,
    message: Option<Message>,
}

impl CompositeRule {
    /// Passes where both rules pass.
    pub fn and(left: impl Rule + 'static, right: impl Rule + 'static) -> Self {
        Self::from_operator(Operator::And(left.into_rule_ref(), right.into_rule_ref()))
    }

    /// Passes where at least one rule passes.
    pub fn or(left: impl Rule + 'static, right: impl Rule + 'static) -> Self {
        Self::from_operator(Operator::Or(left.into_rule_ref(), right.into_rule_ref()))
    }

    /// Passes where the rule fails.
    pub fn not(child: impl Rule + 'static) -> Self {
        Self::from_operator(Operator::Not(child.into_rule_ref()))
    }

    fn from_operator(operator: Operator) -> Self {
        Self {
            operator,
            message: None,
        }
    }

    /// Replaces the generated explanation with a custom message.
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Gets the operator and its operands.
    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    /// Messages of the operands that decided the outcome at this position.
    ///
    /// A failing composite names the operands that failed. A passing one,
    /// which only gets a message when it sits under a `not`, names the
    /// operands that passed.
    fn operand_messages(&self, context: &MessageContext<'_>) -> Vec<String> {
        let operands = self.operator.operands();
        let outcome = context.verdict.passed;

        let deciding: Vec<String> = operands
            .iter()
            .enumerate()
            .filter(|(index, _)| context.child(*index).verdict.passed == outcome)
            .map(|(index, rule)| rule.message(&context.child(index)))
            .collect();

        if !deciding.is_empty() {
            return deciding;
        }

        operands
            .iter()
            .enumerate()
            .map(|(index, rule)| rule.message(&context.child(index)))
            .collect()
    }
}

fn join_messages(parts: Vec<String>, keyword: &str) -> String {
    if parts.len() == 1 {
        return parts.into_iter().collect();
    }

    parts
        .iter()
        .map(|part| format!("({part})"))
        .collect::<Vec<_>>()
        .join(&format!(" {keyword} "))
}

impl Rule for CompositeRule {
    fn name(&self) -> &str {
        self.operator.keyword()
    }

    fn mode(&self) -> Mode {
        let whole_column = self
            .operator
            .operands()
            .iter()
            .any(|rule| rule.mode() == Mode::WholeColumn);

        if whole_column {
            Mode::WholeColumn
        } else {
            Mode::PerElement
        }
    }

    fn evaluate(&self, series: &Series) -> Result<ValidationResult> {
        Ok(self.evaluate_traced(series)?.result)
    }

    fn evaluate_traced(&self, series: &Series) -> Result<Evaluation> {
        match &self.operator {
            Operator::And(left, right) => {
                let left = left.evaluate_traced(series)?;
                let right = right.evaluate_traced(series)?;
                let result = left.result.clone().combine(right.result.clone(), |a, b| a && b)?;
                Ok(Evaluation::node(result, vec![left, right]))
            }
            Operator::Or(left, right) => {
                let left = left.evaluate_traced(series)?;
                let right = right.evaluate_traced(series)?;
                let result = left.result.clone().combine(right.result.clone(), |a, b| a || b)?;
                Ok(Evaluation::node(result, vec![left, right]))
            }
            Operator::Not(child) => {
                let child = child.evaluate_traced(series)?;
                Ok(Evaluation::node(child.result.clone().invert(), vec![child]))
            }
        }
    }

    fn default_message(&self, context: &MessageContext<'_>) -> String {
        match &self.operator {
            Operator::Not(child) => format!("not ({})", child.message(&context.child(0))),
            Operator::And(..) => join_messages(self.operand_messages(context), "and"),
            Operator::Or(..) => join_messages(self.operand_messages(context), "or"),
        }
    }

    fn custom_message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

impl fmt::Debug for CompositeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operands: Vec<&str> = self
            .operator
            .operands()
            .into_iter()
            .map(|rule| rule.name())
            .collect();

        f.debug_struct("CompositeRule")
            .field("operator", &self.operator.keyword())
            .field("operands", &operands)
            .field("message", &self.message)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{InSet, LeadingWhitespace, TrailingWhitespace};
    use crate::custom::CustomSeriesRule;
    use crate::rule::RuleExt;
    use crate::result::Verdict;
    use pretty_assertions::assert_eq;
    use tabschema_core::Value;

    fn series() -> Series {
        Series::new("name", [" a", "b ", "c", " d "])
    }

    #[test]
    fn test_and_or_not() {
        let s = series();

        let both = LeadingWhitespace::new().and(TrailingWhitespace::new());
        assert_eq!(
            both.evaluate(&s).unwrap(),
            ValidationResult::Mask(vec![false, false, true, false])
        );

        let either = LeadingWhitespace::new().or(TrailingWhitespace::new());
        assert_eq!(
            either.evaluate(&s).unwrap(),
            ValidationResult::Mask(vec![true, true, true, false])
        );

        let negated = LeadingWhitespace::new().not();
        assert_eq!(
            negated.evaluate(&s).unwrap(),
            ValidationResult::Mask(vec![true, false, false, true])
        );
    }

    #[test]
    fn test_scalar_operand_broadcasts() {
        let always_fails = CustomSeriesRule::new(|_: &Series| false, "never passes");
        let rule = always_fails.or(LeadingWhitespace::new());

        assert_eq!(
            rule.evaluate(&series()).unwrap(),
            ValidationResult::Mask(vec![false, true, true, false])
        );
    }

    #[test]
    fn test_mode_is_whole_column_if_any_operand_is() {
        let per_element = LeadingWhitespace::new().and(TrailingWhitespace::new());
        assert_eq!(per_element.mode(), Mode::PerElement);

        let mixed = LeadingWhitespace::new().and(CustomSeriesRule::new(|_: &Series| true, "x"));
        assert_eq!(mixed.mode(), Mode::WholeColumn);
    }

    #[test]
    fn test_and_message_names_only_failing_operand() {
        let rule = InSet::new(["b"]).unwrap().and(TrailingWhitespace::new());
        let value = Value::from("c");
        let verdict = rule.evaluate_traced(&Series::new("x", ["c"])).unwrap().verdict_at(0);
        let context = MessageContext::new(&value, &verdict);

        assert_eq!(
            rule.message(&context),
            "is not in the list of legal options (b)"
        );
    }

    #[test]
    fn test_or_message_lists_both() {
        let rule = InSet::new(["b"]).unwrap().or(TrailingWhitespace::new());
        let value = Value::from("c ");
        let verdict = rule.evaluate_traced(&Series::new("x", ["c "])).unwrap().verdict_at(0);
        let context = MessageContext::new(&value, &verdict);

        assert_eq!(
            rule.message(&context),
            "(is not in the list of legal options (b)) or (contains trailing whitespace)"
        );
    }

    #[test]
    fn test_not_message_and_custom_override() {
        let rule = InSet::new(["a"]).unwrap().not();
        let value = Value::from("a");
        let verdict = Verdict {
            passed: false,
            children: vec![Verdict {
                passed: true,
                children: Vec::new(),
            }],
        };
        let context = MessageContext::new(&value, &verdict);

        assert_eq!(
            rule.message(&context),
            "not (is not in the list of legal options (a))"
        );

        let rule = rule.with_message("must not be a");
        assert_eq!(rule.message(&context), "must not be a");
    }

    #[test]
    fn test_negated_or_names_the_passing_operand() {
        let rule = InSet::new(["x"]).unwrap().or(InSet::new(["y"]).unwrap()).not();
        let value = Value::from("x");
        let verdict = rule.evaluate_traced(&Series::new("c", ["x"])).unwrap().verdict_at(0);
        let context = MessageContext::new(&value, &verdict);

        assert!(!verdict.passed);
        assert_eq!(
            rule.message(&context),
            "not (is not in the list of legal options (x))"
        );
    }

    #[test]
    fn test_negated_and_names_every_operand() {
        let rule = InSet::new(["x"]).unwrap().and(TrailingWhitespace::new()).not();
        let value = Value::from("x");
        let verdict = rule.evaluate_traced(&Series::new("c", ["x"])).unwrap().verdict_at(0);
        let context = MessageContext::new(&value, &verdict);

        assert_eq!(
            rule.message(&context),
            "not ((is not in the list of legal options (x)) and (contains trailing whitespace))"
        );
    }

    #[test]
    fn test_operands_are_shared_not_copied() {
        let leading: RuleRef = LeadingWhitespace::new().into_rule_ref();
        let composite = CompositeRule::and(leading.clone(), TrailingWhitespace::new());

        match composite.operator() {
            Operator::And(left, _) => assert!(std::sync::Arc::ptr_eq(left, &leading)),
            _ => panic!("expected an and"),
        }
        assert_eq!(leading.name(), "leading_whitespace");
    }
}
