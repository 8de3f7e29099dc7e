use crate::strain::Strain;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid call {0:?}")]
pub struct ParseCallError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Call {
    Pass,
    Bid { level: u8, strain: Strain },
}

impl Call {
    pub fn is_bid(&self) -> bool {
        matches!(self, Call::Bid { .. })
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Call::Pass)
    }

    /// Returns the strain of this call, if it's a bid.
    pub fn strain(&self) -> Option<Strain> {
        match self {
            Call::Bid { strain, .. } => Some(*strain),
            Call::Pass => None,
        }
    }

    /// Returns the suit of this call, if it's a suited bid.
    pub fn suit(&self) -> Option<Suit> {
        self.strain().and_then(|s| s.to_suit())
    }

    pub fn render(self) -> String {
        match self {
            Call::Pass => "P".to_string(),
            Call::Bid { level, strain } => format!("{}{}", level, strain.to_char()),
        }
    }
}

impl FromStr for Call {
    type Err = ParseCallError;

    /// Accepts "p", "pass" and "<level><strain>" in any case, e.g. "4h".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCallError(s.to_string());
        let upper = s.trim().to_ascii_uppercase();
        if upper == "P" || upper == "PASS" {
            return Ok(Call::Pass);
        }
        let mut chars = upper.chars();
        let (Some(level_char), Some(strain_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(err());
        };
        let level = level_char.to_digit(10).ok_or_else(err)? as u8;
        if !(1..=7).contains(&level) {
            return Err(err());
        }
        let strain = Strain::from_char(strain_char).ok_or_else(err)?;
        Ok(Call::Bid { level, strain })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
