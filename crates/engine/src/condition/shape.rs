//! Hand-pattern language.
//!
//! A term lists four lengths in spades, hearts, diamonds, clubs order. Each
//! position is a digit or `x` for any length, and a parenthesised group
//! matches any permutation of its lengths over those positions: `(4333)`,
//! `5(431)`, `(54)xx`. Terms and the named categories `any`, `balanced` and
//! `unbalanced` combine left to right with `+` (union) and `-` (difference).

use crate::error::ShapeError;
use std::collections::BTreeSet;
use std::fmt;

/// Suit lengths in spades, hearts, diamonds, clubs order.
pub type Lengths = [u8; 4];

/// A compiled pattern: the set of 13-card distributions it matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapePattern {
    text: String,
    shapes: BTreeSet<Lengths>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Fixed(Option<u8>),
    Group(Vec<Option<u8>>),
}

impl ShapePattern {
    /// Parses the full pattern language.
    pub fn parse(source: &str) -> Result<Self, ShapeError> {
        let text: String = source
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if text.is_empty() {
            return Err(ShapeError::InvalidPattern(source.to_string()));
        }

        let mut shapes = BTreeSet::new();
        let mut union = true;
        let mut term = String::new();
        for (i, c) in text.char_indices() {
            if c == '+' || c == '-' {
                if i == 0 || term.is_empty() {
                    return Err(ShapeError::InvalidPattern(source.to_string()));
                }
                apply(&mut shapes, &term_shapes(&term, source)?, union);
                term.clear();
                union = c == '+';
            } else {
                term.push(c);
            }
        }
        if term.is_empty() {
            return Err(ShapeError::InvalidPattern(source.to_string()));
        }
        apply(&mut shapes, &term_shapes(&term, source)?, union);

        Ok(ShapePattern { text, shapes })
    }

    /// Only a named category: `any`, `balanced` or `unbalanced`.
    pub fn category(name: &str) -> Result<Self, ShapeError> {
        let text = name.trim().to_lowercase();
        let shapes = category_shapes(&text)
            .ok_or_else(|| ShapeError::UnknownCategory(name.to_string()))?;
        Ok(ShapePattern { text, shapes })
    }

    pub fn matches(&self, lengths: Lengths) -> bool {
        self.shapes.contains(&lengths)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl fmt::Display for ShapePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn apply(shapes: &mut BTreeSet<Lengths>, term: &BTreeSet<Lengths>, union: bool) {
    if union {
        shapes.extend(term.iter().copied());
    } else {
        shapes.retain(|s| !term.contains(s));
    }
}

fn term_shapes(term: &str, source: &str) -> Result<BTreeSet<Lengths>, ShapeError> {
    if term.chars().all(|c| c.is_ascii_alphabetic()) && term != "xxxx" {
        return category_shapes(term).ok_or_else(|| ShapeError::UnknownCategory(term.to_string()));
    }
    let slots = parse_slots(term).ok_or_else(|| ShapeError::InvalidPattern(source.to_string()))?;
    Ok(all_distributions()
        .filter(|lengths| slots_match(&slots, lengths))
        .collect())
}

fn category_shapes(name: &str) -> Option<BTreeSet<Lengths>> {
    let any = || all_distributions().collect::<BTreeSet<_>>();
    let balanced = || {
        ["(4333)", "(4432)", "(5332)"]
            .iter()
            .filter_map(|term| parse_slots(term))
            .flat_map(|slots| all_distributions().filter(move |l| slots_match(&slots, l)))
            .collect::<BTreeSet<_>>()
    };
    match name {
        "any" => Some(any()),
        "balanced" => Some(balanced()),
        "unbalanced" => {
            let balanced = balanced();
            Some(any().into_iter().filter(|l| !balanced.contains(l)).collect())
        }
        _ => None,
    }
}

/// Returns `None` unless the term covers exactly four positions.
fn parse_slots(term: &str) -> Option<Vec<Slot>> {
    let mut slots = Vec::new();
    let mut group: Option<Vec<Option<u8>>> = None;
    for c in term.chars() {
        match c {
            '(' if group.is_none() => group = Some(Vec::new()),
            ')' => {
                let members = group.take()?;
                if members.is_empty() {
                    return None;
                }
                slots.push(Slot::Group(members));
            }
            _ => {
                let position = match c {
                    'x' => None,
                    d => Some(d.to_digit(10)? as u8),
                };
                match group.as_mut() {
                    Some(members) => members.push(position),
                    None => slots.push(Slot::Fixed(position)),
                }
            }
        }
    }
    let width: usize = slots
        .iter()
        .map(|slot| match slot {
            Slot::Fixed(_) => 1,
            Slot::Group(members) => members.len(),
        })
        .sum();
    (group.is_none() && width == 4).then_some(slots)
}

fn slots_match(slots: &[Slot], lengths: &Lengths) -> bool {
    let mut at = 0;
    for slot in slots {
        match slot {
            Slot::Fixed(expected) => {
                if expected.is_some_and(|e| e != lengths[at]) {
                    return false;
                }
                at += 1;
            }
            Slot::Group(members) => {
                let span = &lengths[at..at + members.len()];
                if !permutation_matches(members, span) {
                    return false;
                }
                at += members.len();
            }
        }
    }
    true
}

fn permutation_matches(members: &[Option<u8>], values: &[u8]) -> bool {
    let Some((first, rest)) = members.split_first() else {
        return values.is_empty();
    };
    (0..values.len()).any(|i| {
        if first.is_some_and(|e| e != values[i]) {
            return false;
        }
        let mut remaining = values.to_vec();
        remaining.remove(i);
        permutation_matches(rest, &remaining)
    })
}

/// Every spades/hearts/diamonds/clubs split of 13 cards.
fn all_distributions() -> impl Iterator<Item = Lengths> {
    (0..=13u8).flat_map(|s| {
        (0..=13 - s).flat_map(move |h| (0..=13 - s - h).map(move |d| [s, h, d, 13 - s - h - d]))
    })
}
