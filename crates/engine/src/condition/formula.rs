//! Suit-length comparisons such as `2*hearts - diamonds + 1 == spades + clubs`.
//!
//! Formulas are compiled once into operands and comparison operators. At
//! evaluation time every suit letter is replaced by that suit's length and the
//! resulting text is checked again before a small integer evaluator (`+ - *`
//! and a leading minus, nothing else) computes each side.

use crate::error::FormulaError;
use bridge_types::{HandMetrics, Suit};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

static OPERAND: OnceLock<Regex> = OnceLock::new();
static NUMERIC: OnceLock<Regex> = OnceLock::new();

fn operand_pattern() -> &'static Regex {
    OPERAND.get_or_init(|| {
        Regex::new(r"^-?(?:[cdhs]|\d+)(?:[-+*](?:[cdhs]|\d+))*$")
            .expect("operand pattern is a valid regex")
    })
}

fn numeric_pattern() -> &'static Regex {
    NUMERIC.get_or_init(|| {
        Regex::new(r"^-?\d+(?:[-+*]\d+)*$").expect("numeric pattern is a valid regex")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Ge,
    Le,
    Gt,
    Lt,
}

impl Comparison {
    /// Two-character operators come first so `>=` never splits as `>`.
    const BY_WIDTH: [Comparison; 6] = [
        Comparison::Eq,
        Comparison::Ne,
        Comparison::Ge,
        Comparison::Le,
        Comparison::Gt,
        Comparison::Lt,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Eq => "==",
            Comparison::Ne => "!=",
            Comparison::Ge => ">=",
            Comparison::Le => "<=",
            Comparison::Gt => ">",
            Comparison::Lt => "<",
        }
    }

    pub fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Comparison::Eq => lhs == rhs,
            Comparison::Ne => lhs != rhs,
            Comparison::Ge => lhs >= rhs,
            Comparison::Le => lhs <= rhs,
            Comparison::Gt => lhs > rhs,
            Comparison::Lt => lhs < rhs,
        }
    }
}

/// A compiled, possibly chained, suit-length comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    text: String,
    operands: Vec<String>,
    comparisons: Vec<Comparison>,
}

impl Formula {
    pub fn compile(source: &str) -> Result<Self, FormulaError> {
        let text = normalize(source);
        let (operands, comparisons) = split_comparisons(&text);
        if comparisons.is_empty() {
            return Err(FormulaError::MissingComparison(source.to_string()));
        }
        for operand in &operands {
            if operand.is_empty() {
                return Err(FormulaError::EmptyOperand(source.to_string()));
            }
            if !is_valid_operand(operand) {
                return Err(FormulaError::InvalidExpression(operand.clone()));
            }
        }
        if !text.chars().any(|c| Suit::from_char(c).is_some()) {
            return Err(FormulaError::NoSuitSymbol(source.to_string()));
        }

        let formula = Formula {
            text,
            operands,
            comparisons,
        };
        // Catch substitution and overflow problems now rather than per hand.
        formula.evaluate(|_| 13)?;
        Ok(formula)
    }

    /// The normalized formula text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Evaluates every comparison with the given suit lengths.
    pub fn evaluate(&self, length: impl Fn(Suit) -> u8) -> Result<bool, FormulaError> {
        let values = self
            .operands
            .iter()
            .map(|operand| evaluate_numeric(&substitute(operand, &length)))
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(self
            .comparisons
            .iter()
            .zip(values.windows(2))
            .all(|(op, pair)| op.holds(pair[0], pair[1])))
    }

    pub fn accept<H: HandMetrics + ?Sized>(&self, hand: &H) -> bool {
        match self.evaluate(|suit| hand.suit_length(suit)) {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(formula = %self.text, %err, "formula failed at evaluation");
                false
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn normalize(source: &str) -> String {
    let mut text: String = source
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    for suit in Suit::ALL {
        text = text.replace(suit.name(), &suit.to_char().to_ascii_lowercase().to_string());
    }
    text
}

/// Splits on every comparison operator, left to right.
fn split_comparisons(text: &str) -> (Vec<String>, Vec<Comparison>) {
    let mut operands = Vec::new();
    let mut comparisons = Vec::new();
    let mut current = String::new();
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if let Some(op) = Comparison::BY_WIDTH
            .into_iter()
            .find(|op| rest.starts_with(op.symbol()))
        {
            operands.push(std::mem::take(&mut current));
            comparisons.push(op);
            rest = &rest[op.symbol().len()..];
        } else {
            current.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    operands.push(current);
    (operands, comparisons)
}

pub(crate) fn is_valid_operand(operand: &str) -> bool {
    operand_pattern().is_match(operand)
}

fn substitute(operand: &str, length: &impl Fn(Suit) -> u8) -> String {
    operand
        .chars()
        .map(|c| match Suit::from_char(c) {
            Some(suit) => length(suit).to_string(),
            None => c.to_string(),
        })
        .collect()
}

/// Integer arithmetic with `*` binding tighter than `+` and `-`.
fn evaluate_numeric(expr: &str) -> Result<i64, FormulaError> {
    if !numeric_pattern().is_match(expr) {
        return Err(FormulaError::UnsafeSubstitution(expr.to_string()));
    }
    let overflow = || FormulaError::Overflow(expr.to_string());

    let (mut sign, mut rest) = match expr.strip_prefix('-') {
        Some(body) => (-1i64, body),
        None => (1i64, expr),
    };
    let mut sum: i64 = 0;
    let mut product: i64 = 1;
    loop {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let value: i64 = rest[..end].parse().map_err(|_| overflow())?;
        product = product.checked_mul(value).ok_or_else(overflow)?;
        rest = &rest[end..];

        let Some(op) = rest.chars().next() else {
            let term = product.checked_mul(sign).ok_or_else(overflow)?;
            return sum.checked_add(term).ok_or_else(overflow);
        };
        if op != '*' {
            let term = product.checked_mul(sign).ok_or_else(overflow)?;
            sum = sum.checked_add(term).ok_or_else(overflow)?;
            product = 1;
            sign = if op == '-' { -1 } else { 1 };
        }
        rest = &rest[1..];
    }
}
