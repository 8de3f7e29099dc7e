use crate::board::Position;
use crate::strain::Strain;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

static CONTRACT_PATTERN: OnceLock<Regex> = OnceLock::new();

fn contract_pattern() -> &'static Regex {
    CONTRACT_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(?:([1-7])([cdhsn])([nesw])|p(?:ass)?)$")
            .expect("contract pattern is a valid regex")
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid contract {0:?}")]
pub struct ParseContractError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    pub level: u8,
    pub strain: Strain,
    pub declarer: Position,
}

impl Contract {
    pub fn new(level: u8, strain: Strain, declarer: Position) -> Self {
        Self {
            level,
            strain,
            declarer,
        }
    }

    pub fn is_game(&self) -> bool {
        match self.strain {
            Strain::NoTrump => self.level >= 3,
            Strain::Hearts | Strain::Spades => self.level >= 4,
            Strain::Clubs | Strain::Diamonds => self.level >= 5,
        }
    }

    pub fn is_slam(&self) -> bool {
        self.level >= 6
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.level, self.strain, self.declarer)
    }
}

/// How an auction ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinalContract {
    PassedOut,
    Contract(Contract),
}

impl FinalContract {
    pub fn contract(&self) -> Option<&Contract> {
        match self {
            FinalContract::PassedOut => None,
            FinalContract::Contract(c) => Some(c),
        }
    }
}

impl fmt::Display for FinalContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinalContract::PassedOut => f.write_str("P"),
            FinalContract::Contract(c) => c.fmt(f),
        }
    }
}

impl FromStr for FinalContract {
    type Err = ParseContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseContractError(s.to_string());
        let caps = contract_pattern().captures(s.trim()).ok_or_else(err)?;
        let (Some(level), Some(strain), Some(seat)) = (caps.get(1), caps.get(2), caps.get(3))
        else {
            return Ok(FinalContract::PassedOut);
        };
        let level = level.as_str().parse::<u8>().map_err(|_| err())?;
        let strain = strain
            .as_str()
            .chars()
            .next()
            .and_then(Strain::from_char)
            .ok_or_else(err)?;
        let declarer = seat
            .as_str()
            .chars()
            .next()
            .and_then(Position::from_char)
            .ok_or_else(err)?;
        Ok(FinalContract::Contract(Contract::new(level, strain, declarer)))
    }
}
