//! Acceptance rules over a hand.

pub mod formula;
pub mod shape;

pub use formula::{Comparison, Formula};
pub use shape::ShapePattern;

use crate::error::ConditionError;
use bridge_types::{Evaluator, HandMetrics, Suit};
use std::fmt;

/// An evaluator's value must fall within `min..=max`.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRange {
    pub evaluator: Evaluator,
    pub min: f64,
    pub max: f64,
}

impl EvaluationRange {
    /// Missing bounds default to `0` and infinity. A range that admits every
    /// hand is rejected, as are NaN and infinite minimums.
    pub fn new(
        evaluator: Evaluator,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<Self, ConditionError> {
        let min = min.unwrap_or(0.0);
        let max = max.unwrap_or(f64::INFINITY);
        if !min.is_finite() || max.is_nan() || min > max {
            return Err(ConditionError::InvalidBounds {
                what: evaluator.to_string(),
                min,
                max,
            });
        }
        if min <= 0.0 && max == f64::INFINITY {
            return Err(ConditionError::UnconstrainedBounds(evaluator.to_string()));
        }
        Ok(Self {
            evaluator,
            min,
            max,
        })
    }

    pub fn accept<H: HandMetrics + ?Sized>(&self, hand: &H) -> bool {
        let value = hand.evaluate(self.evaluator);
        self.min <= value && value <= self.max
    }
}

/// A suit's length must fall within `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitLengthRange {
    pub suit: Suit,
    pub min: u8,
    pub max: u8,
}

impl SuitLengthRange {
    /// Bounds are clamped to `0..=13`; an empty range or one that admits
    /// every length is rejected.
    pub fn new(suit: Suit, min: Option<i64>, max: Option<i64>) -> Result<Self, ConditionError> {
        let min = min.unwrap_or(0).max(0);
        let max = max.unwrap_or(13).min(13);
        if min > max {
            return Err(ConditionError::InvalidBounds {
                what: suit.name().to_string(),
                min: min as f64,
                max: max as f64,
            });
        }
        if (min, max) == (0, 13) {
            return Err(ConditionError::UnconstrainedBounds(suit.name().to_string()));
        }
        Ok(Self {
            suit,
            min: min as u8,
            max: max as u8,
        })
    }

    pub fn accept<H: HandMetrics + ?Sized>(&self, hand: &H) -> bool {
        (self.min..=self.max).contains(&hand.suit_length(self.suit))
    }
}

/// Include groups and exclude groups, each an AND of its conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyGroups {
    pub include: Vec<Vec<Condition>>,
    pub exclude: Vec<Vec<Condition>>,
}

impl LegacyGroups {
    /// Any matching exclude group rejects before includes are looked at; with
    /// no include groups nothing is accepted.
    pub fn accept<H: HandMetrics + ?Sized>(&self, hand: &H) -> bool {
        let group_accepts = |group: &Vec<Condition>| group.iter().all(|c| c.accept(hand));
        if self.exclude.iter().any(group_accepts) {
            return false;
        }
        self.include.iter().any(group_accepts)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Evaluation(EvaluationRange),
    SuitLength(SuitLengthRange),
    Formula(Formula),
    Shape(ShapePattern),
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
    IncludeExclude(LegacyGroups),
}

impl Condition {
    pub fn accept<H: HandMetrics + ?Sized>(&self, hand: &H) -> bool {
        match self {
            Condition::Evaluation(range) => range.accept(hand),
            Condition::SuitLength(range) => range.accept(hand),
            Condition::Formula(formula) => formula.accept(hand),
            Condition::Shape(pattern) => pattern.matches(hand.shape()),
            Condition::And(children) => children.iter().all(|c| c.accept(hand)),
            Condition::Or(children) => children.iter().any(|c| c.accept(hand)),
            Condition::Not(child) => !child.accept(hand),
            Condition::IncludeExclude(groups) => groups.accept(hand),
        }
    }

    /// Number of simple (non-composite) conditions.
    pub fn leaf_count(&self) -> usize {
        match self {
            Condition::Evaluation(_)
            | Condition::SuitLength(_)
            | Condition::Formula(_)
            | Condition::Shape(_) => 1,
            Condition::And(children) | Condition::Or(children) => {
                children.iter().map(Condition::leaf_count).sum()
            }
            Condition::Not(child) => child.leaf_count(),
            Condition::IncludeExclude(groups) => groups
                .include
                .iter()
                .chain(groups.exclude.iter())
                .flatten()
                .map(Condition::leaf_count)
                .sum(),
        }
    }

    pub fn is_trivial(&self) -> bool {
        self.leaf_count() == 0
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, conditions: &[Condition]) -> fmt::Result {
    f.write_str("(")?;
    for (i, condition) in conditions.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{condition}")?;
    }
    f.write_str(")")
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Evaluation(range) if range.max.is_infinite() => {
                write!(f, "{} {}+", range.evaluator, range.min)
            }
            Condition::Evaluation(range) => {
                write!(f, "{} {}..={}", range.evaluator, range.min, range.max)
            }
            Condition::SuitLength(range) => {
                write!(f, "{} {}..={}", range.suit.name(), range.min, range.max)
            }
            Condition::Formula(formula) => write!(f, "formula {formula}"),
            Condition::Shape(pattern) => write!(f, "shape {pattern}"),
            Condition::And(children) => {
                f.write_str("AND ")?;
                write_list(f, children)
            }
            Condition::Or(children) => {
                f.write_str("OR ")?;
                write_list(f, children)
            }
            Condition::Not(child) => write!(f, "NOT {child}"),
            Condition::IncludeExclude(groups) => {
                let mut first = true;
                for (label, list) in [("INCLUDE", &groups.include), ("EXCLUDE", &groups.exclude)] {
                    for group in list {
                        if !first {
                            f.write_str("; ")?;
                        }
                        first = false;
                        write!(f, "{label} ")?;
                        write_list(f, group)?;
                    }
                }
                if first {
                    f.write_str("INCLUDE nothing")?;
                }
                Ok(())
            }
        }
    }
}
