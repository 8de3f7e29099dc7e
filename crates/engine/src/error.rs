use bridge_types::Position;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error("formula {0:?} does not mention any suit")]
    NoSuitSymbol(String),
    #[error("formula {0:?} contains an invalid expression")]
    InvalidExpression(String),
    #[error("formula {0:?} has no comparison operator")]
    MissingComparison(String),
    #[error("formula {0:?} has an empty side of a comparison")]
    EmptyOperand(String),
    #[error("substituted formula {0:?} is not purely numeric")]
    UnsafeSubstitution(String),
    #[error("formula {0:?} overflows")]
    Overflow(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("invalid shape pattern {0:?}")]
    InvalidPattern(String),
    #[error("unknown shape category {0:?}")]
    UnknownCategory(String),
}

/// A rule node that cannot be turned into a condition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConditionError {
    #[error("unknown tag <{0}>")]
    UnknownTag(String),
    #[error("<{tag}> is missing {field:?}")]
    MissingField { tag: String, field: String },
    #[error("{field:?} is not a number: {text:?}")]
    InvalidNumber { field: String, text: String },
    #[error("{what}: invalid range {min}..={max}")]
    InvalidBounds { what: String, min: f64, max: f64 },
    #[error("{0}: neither min nor max constrains the range")]
    UnconstrainedBounds(String),
    #[error("condition type must be include or exclude, got {0:?}")]
    InvalidGroupType(String),
    #[error("unknown value {value:?} for {attribute:?}")]
    UnknownAttributeValue { attribute: String, value: String },
    #[error("<not> takes exactly one condition, got {0}")]
    NotArity(usize),
    #[error("bid mixes and/or/not with legacy <condition> groups")]
    MixedConditionStyles,
    #[error(transparent)]
    Formula(#[from] FormulaError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Denotations from the opening bid down to the bid being built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BidPath(pub Vec<String>);

impl BidPath {
    pub fn child(&self, denotation: impl Into<String>) -> BidPath {
        let mut path = self.0.clone();
        path.push(denotation.into());
        BidPath(path)
    }
}

impl fmt::Display for BidPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<system>");
        }
        f.write_str(&self.0.join(" > "))
    }
}

/// Fatal errors while loading a bidding system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("in {path}: {source}")]
    Condition {
        path: BidPath,
        #[source]
        source: ConditionError,
    },
    #[error("duplicate bid {path}")]
    DuplicateDenotation { path: BidPath },
    #[error("in {path}: invalid denotation {text:?}")]
    InvalidDenotation { path: BidPath, text: String },
    #[error("in {path}: unrecognized strain in {text:?}")]
    UnrecognizedStrain { path: BidPath, text: String },
}

impl BuildError {
    pub fn path(&self) -> &BidPath {
        match self {
            BuildError::Condition { path, .. }
            | BuildError::DuplicateDenotation { path }
            | BuildError::InvalidDenotation { path, .. }
            | BuildError::UnrecognizedStrain { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("the auction is still in progress")]
    AuctionInProgress,
    #[error("the auction has already finished")]
    AuctionFinished,
    #[error("{0:?} is not one of the expected bids")]
    UnexpectedCall(String),
    #[error("it is {0}'s turn, not the human seat's")]
    NotHumanTurn(Position),
    #[error("{0} is a human seat and must call next")]
    HumanToCall(Position),
    #[error("auction did not finish within {0} calls")]
    RunawayAuction(usize),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Build(#[from] BuildError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let path = BidPath::default().child("1s").child("2h").child("3n");
        assert_eq!(path.to_string(), "1s > 2h > 3n");
        assert_eq!(BidPath::default().to_string(), "<system>");
    }

    #[test]
    fn test_build_error_names_the_chain() {
        let err = BuildError::Condition {
            path: BidPath(vec!["1n".into(), "2c".into()]),
            source: ConditionError::NotArity(2),
        };
        assert_eq!(
            err.to_string(),
            "in 1n > 2c: <not> takes exactly one condition, got 2"
        );
    }
}
