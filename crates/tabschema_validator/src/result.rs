//! Per-position rule outcomes.
//!
//! A [`ValidationResult`] is either one aggregate boolean that applies to
//! every position of the evaluated column, or a mask with one boolean per
//! position. `true` means the position passed.
//!
//! When two results are combined, a scalar broadcasts over the other
//! operand's positions; two masks must have the same length.

use crate::{Result, RuleError};

/// Outcome of evaluating a rule against a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// One outcome shared by every position
    Scalar(bool),
    /// One outcome per position
    Mask(Vec<bool>),
}

impl ValidationResult {
    /// Returns whether the given position passed.
    ///
    /// Positions beyond the end of a mask count as passing; callers check
    /// lengths with [`check_len`](Self::check_len) first.
    pub fn passed_at(&self, position: usize) -> bool {
        match self {
            ValidationResult::Scalar(passed) => *passed,
            ValidationResult::Mask(mask) => mask.get(position).copied().unwrap_or(true),
        }
    }

    /// Returns the mask length, or `None` for a scalar.
    pub fn mask_len(&self) -> Option<usize> {
        match self {
            ValidationResult::Scalar(_) => None,
            ValidationResult::Mask(mask) => Some(mask.len()),
        }
    }

    /// Expands the result into one boolean for each of `len` positions.
    pub fn to_mask(&self, len: usize) -> Vec<bool> {
        match self {
            ValidationResult::Scalar(passed) => vec![*passed; len],
            ValidationResult::Mask(mask) => mask.clone(),
        }
    }

    /// Returns the failing positions among the first `len`.
    pub fn failures(&self, len: usize) -> Vec<usize> {
        (0..len).filter(|&pos| !self.passed_at(pos)).collect()
    }

    /// Returns true if every position passed.
    pub fn all_passed(&self) -> bool {
        match self {
            ValidationResult::Scalar(passed) => *passed,
            ValidationResult::Mask(mask) => mask.iter().all(|&passed| passed),
        }
    }

    /// Ensures a mask covers exactly `expected` positions.
    ///
    /// Scalars always fit.
    pub fn check_len(&self, rule: &str, expected: usize) -> Result<()> {
        match self.mask_len() {
            Some(actual) if actual != expected => {
                Err(RuleError::mask_length(rule, expected, actual))
            }
            _ => Ok(()),
        }
    }

    /// Flips every outcome.
    pub fn invert(self) -> Self {
        match self {
            ValidationResult::Scalar(passed) => ValidationResult::Scalar(!passed),
            ValidationResult::Mask(mask) => {
                ValidationResult::Mask(mask.into_iter().map(|passed| !passed).collect())
            }
        }
    }

    /// Combines two results position by position.
    ///
    /// `Scalar ∘ Scalar` stays scalar, `Scalar ∘ Mask(n)` broadcasts to a
    /// mask of length `n`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::ShapeMismatch`] when both sides are masks of
    /// different lengths.
    pub fn combine(self, other: Self, op: fn(bool, bool) -> bool) -> Result<Self> {
        use ValidationResult::{Mask, Scalar};

        match (self, other) {
            (Scalar(a), Scalar(b)) => Ok(Scalar(op(a, b))),
            (Scalar(a), Mask(b)) => Ok(Mask(b.into_iter().map(|b| op(a, b)).collect())),
            (Mask(a), Scalar(b)) => Ok(Mask(a.into_iter().map(|a| op(a, b)).collect())),
            (Mask(a), Mask(b)) => {
                if a.len() != b.len() {
                    return Err(RuleError::ShapeMismatch {
                        left: a.len(),
                        right: b.len(),
                    });
                }
                Ok(Mask(a.into_iter().zip(b).map(|(a, b)| op(a, b)).collect()))
            }
        }
    }
}

impl From<bool> for ValidationResult {
    fn from(passed: bool) -> Self {
        ValidationResult::Scalar(passed)
    }
}

impl From<Vec<bool>> for ValidationResult {
    fn from(mask: Vec<bool>) -> Self {
        ValidationResult::Mask(mask)
    }
}

impl FromIterator<bool> for ValidationResult {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        ValidationResult::Mask(iter.into_iter().collect())
    }
}

/// A rule's result together with the results of its sub-rules.
///
/// Leaf rules have no children; composites keep one child evaluation per
/// operand so failures can be attributed later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub result: ValidationResult,
    pub children: Vec<Evaluation>,
}

impl Evaluation {
    /// Creates an evaluation without sub-rules.
    pub fn leaf(result: ValidationResult) -> Self {
        Self {
            result,
            children: Vec::new(),
        }
    }

    /// Creates an evaluation with sub-rule evaluations.
    pub fn node(result: ValidationResult, children: Vec<Evaluation>) -> Self {
        Self { result, children }
    }

    /// Extracts the outcome tree at one position.
    pub fn verdict_at(&self, position: usize) -> Verdict {
        Verdict {
            passed: self.result.passed_at(position),
            children: self
                .children
                .iter()
                .map(|child| child.verdict_at(position))
                .collect(),
        }
    }
}

/// The outcome of a rule and each of its sub-rules at a single position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub passed: bool,
    pub children: Vec<Verdict>,
}

/// Leaf verdict used when a rule reports fewer children than expected.
pub(crate) static FAILED_LEAF: Verdict = Verdict {
    passed: false,
    children: Vec::new(),
};

impl Verdict {
    /// Gets the verdict of the `index`-th sub-rule.
    pub fn child(&self, index: usize) -> Option<&Verdict> {
        self.children.get(index)
    }
}
