//! The bidding table: deals boards and runs auctions against a bid tree.

pub mod board_state;
pub mod choice;
pub mod config;

pub use board_state::{BoardState, RecordedCall};
pub use choice::{ChoiceStrategy, FirstChoice, RandomChoice};
pub use config::{Mode, Opponents, TableConfig};

use crate::error::EngineError;
use crate::system::{Bid, BidId, BidTree};
use bridge_types::{Call, DealProvider, FinalContract, Position};

/// Auctions are cut off after this many calls.
pub const MAX_CALLS: usize = 128;

/// What happened on one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    PassedOut,
    AwaitingHuman {
        seat: Position,
        candidates: Vec<BidId>,
    },
    Called {
        seat: Position,
        call: Call,
        bid: Option<BidId>,
    },
}

pub struct BiddingTable<D: DealProvider> {
    tree: BidTree,
    config: TableConfig,
    dealer: D,
    state: BoardState,
}

impl<D: DealProvider> BiddingTable<D> {
    /// Creates the table and deals board 1.
    pub fn new(tree: BidTree, config: TableConfig, mut dealer: D) -> Self {
        let state = BoardState::new(1, dealer.deal());
        let table = Self {
            tree,
            config,
            dealer,
            state,
        };
        table.log_board_start();
        table
    }

    pub fn tree(&self) -> &BidTree {
        &self.tree
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Deals the next board and clears the auction.
    pub fn start_new_board(&mut self) {
        let board_number = self.state.board_number() + 1;
        self.state = BoardState::new(board_number, self.dealer.deal());
        self.log_board_start();
    }

    fn log_board_start(&self) {
        tracing::info!(
            board = self.state.board_number(),
            dealer = %self.state.dealer(),
            vulnerability = %self.state.vulnerability(),
            "starting board"
        );
    }

    /// Bids `seat` may choose from: the rebids of partner's last bid, or the
    /// openings when partner has not yet bid or last passed.
    pub fn expected_bids(&self, seat: Position) -> Vec<&Bid> {
        match self.state.last_bid_by(seat.partner()) {
            Some(partner_bid) => self.tree.children(partner_bid).collect(),
            None => self.tree.openings().collect(),
        }
    }

    /// Expected bids that accept `seat`'s hand, in system order.
    pub fn candidates(&self, seat: Position) -> Vec<&Bid> {
        let Some(hand) = self.state.hand(seat) else {
            return Vec::new();
        };
        self.expected_bids(seat)
            .into_iter()
            .filter(|bid| bid.accept(hand))
            .collect()
    }

    /// The bid the engine would make for `seat`, `None` meaning pass.
    pub fn select_bid<S>(&self, seat: Position, strategy: &mut S) -> Option<&Bid>
    where
        S: ChoiceStrategy + ?Sized,
    {
        let candidates = self.candidates(seat);
        match candidates.len() {
            0 => None,
            1 => candidates.first().copied(),
            len => {
                let index = strategy.choose(&candidates);
                if index >= len {
                    tracing::warn!(index, len, "choice out of range, taking the first candidate");
                }
                candidates.get(index).or(candidates.first()).copied()
            }
        }
    }

    /// Plays one turn for the seat to call.
    pub fn step<S>(&mut self, strategy: &mut S) -> Step
    where
        S: ChoiceStrategy + ?Sized,
    {
        if self.state.is_passed_out() {
            return Step::PassedOut;
        }
        let seat = self.state.seat_to_call();
        if self.config.is_human(seat) {
            return Step::AwaitingHuman {
                seat,
                candidates: self.expected_bids(seat).iter().map(|b| b.id).collect(),
            };
        }

        let chosen = if self.config.is_silent(seat) {
            None
        } else {
            self.select_bid(seat, strategy).map(|bid| (bid.call, bid.id))
        };
        let (call, bid) = match chosen {
            Some((call, id)) => (call, Some(id)),
            None => (Call::Pass, None),
        };
        self.state.record(call, bid);
        Step::Called { seat, call, bid }
    }

    /// Records the human seat's call from its denotation.
    pub fn record_denotation(&mut self, text: &str) -> Result<Call, EngineError> {
        if self.state.is_passed_out() {
            return Err(EngineError::AuctionFinished);
        }
        let seat = self.state.seat_to_call();
        if !self.config.is_human(seat) {
            return Err(EngineError::NotHumanTurn(seat));
        }

        let key = text.trim().to_lowercase();
        if key == "p" || key == "pass" {
            self.state.record(Call::Pass, None);
            return Ok(Call::Pass);
        }
        let (call, id) = self
            .expected_bids(seat)
            .into_iter()
            .find(|bid| bid.denotation == key)
            .map(|bid| (bid.call, bid.id))
            .ok_or_else(|| EngineError::UnexpectedCall(text.to_string()))?;
        self.state.record(call, Some(id));
        Ok(call)
    }

    /// Steps until the auction is passed out.
    pub fn bid_out<S>(&mut self, strategy: &mut S) -> Result<FinalContract, EngineError>
    where
        S: ChoiceStrategy + ?Sized,
    {
        while !self.state.is_passed_out() {
            if self.state.sequence().len() >= MAX_CALLS {
                return Err(EngineError::RunawayAuction(MAX_CALLS));
            }
            if let Step::AwaitingHuman { seat, .. } = self.step(strategy) {
                return Err(EngineError::HumanToCall(seat));
            }
        }
        self.final_contract()
    }

    pub fn final_contract(&self) -> Result<FinalContract, EngineError> {
        self.state.final_contract()
    }
}
