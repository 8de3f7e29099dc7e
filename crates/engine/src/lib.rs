//! Rule engine for a declarative bidding system.
//!
//! A system is decoded into [`RuleNode`]s, built once into a [`BidTree`] of
//! bids guarded by [`Condition`]s, and then consulted turn by turn by a
//! [`BiddingTable`] until the auction is passed out.

pub mod condition;
pub mod error;
pub mod system;
pub mod table;

pub use condition::{Condition, Formula, ShapePattern};
pub use error::{
    BidPath, BuildError, ConditionError, ConfigError, EngineError, FormulaError, ShapeError,
};
pub use system::{build_system, load_system, system_from_yaml, Bid, BidId, BidTree, RuleNode};
pub use table::{
    BiddingTable, BoardState, ChoiceStrategy, FirstChoice, Mode, Opponents, RandomChoice,
    RecordedCall, Step, TableConfig,
};

use bridge_types::Call;

/// Parse a comma-separated call string (e.g. "1C,P,1D") into a Vec<Call>.
pub fn parse_calls(calls_string: &str) -> Vec<Call> {
    if calls_string.is_empty() {
        return Vec::new();
    }
    calls_string
        .split(',')
        .filter_map(|s| s.trim().parse::<Call>().ok())
        .collect()
}

/// Renders calls the way [`parse_calls`] reads them.
pub fn render_calls(calls: &[Call]) -> String {
    calls
        .iter()
        .map(|c| c.render())
        .collect::<Vec<_>>()
        .join(",")
}
