//! One board's auction: seats, vulnerability, calls and the final contract.

use crate::error::EngineError;
use crate::system::BidId;
use bridge_types::{Call, Contract, Deal, FinalContract, Hand, Position, Vulnerability};

/// A call together with the bid that justified it; `None` for a plain pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedCall {
    pub seat: Position,
    pub call: Call,
    pub bid: Option<BidId>,
}

#[derive(Debug, Clone)]
pub struct BoardState {
    board_number: u32,
    deal: Deal,
    sequence: Vec<RecordedCall>,
}

impl BoardState {
    pub fn new(board_number: u32, deal: Deal) -> Self {
        Self {
            board_number,
            deal,
            sequence: Vec::new(),
        }
    }

    pub fn board_number(&self) -> u32 {
        self.board_number
    }

    pub fn dealer(&self) -> Position {
        Position::dealer_from_board_number(self.board_number)
    }

    pub fn vulnerability(&self) -> Vulnerability {
        Vulnerability::from_board_number(self.board_number)
    }

    pub fn hand(&self, seat: Position) -> Option<&Hand> {
        self.deal.hand(seat)
    }

    pub fn deal(&self) -> &Deal {
        &self.deal
    }

    /// The seat that made (or will make) the call at `index`.
    pub fn seat_at(&self, index: usize) -> Position {
        Position::dealer_from_board_number(self.board_number.wrapping_add((index % 4) as u32))
    }

    pub fn seat_to_call(&self) -> Position {
        self.seat_at(self.sequence.len())
    }

    pub fn sequence(&self) -> &[RecordedCall] {
        &self.sequence
    }

    pub fn calls(&self) -> Vec<Call> {
        self.sequence.iter().map(|entry| entry.call).collect()
    }

    /// Appends a call for the seat to act.
    pub fn record(&mut self, call: Call, bid: Option<BidId>) -> RecordedCall {
        let entry = RecordedCall {
            seat: self.seat_to_call(),
            call,
            bid,
        };
        self.sequence.push(entry);
        tracing::debug!(
            board = self.board_number,
            seat = %entry.seat,
            call = %call,
            "recorded call"
        );
        entry
    }

    /// The bid behind the most recent call made by `seat`, if that call was
    /// not a pass.
    pub fn last_bid_by(&self, seat: Position) -> Option<BidId> {
        let entry = self.sequence.iter().rev().find(|e| e.seat == seat)?;
        if entry.call.is_bid() {
            entry.bid
        } else {
            None
        }
    }

    /// At least four calls, the last three of them passes.
    pub fn is_passed_out(&self) -> bool {
        self.sequence.len() >= 4 && self.sequence.iter().rev().take(3).all(|e| e.call.is_pass())
    }

    /// Resolves the contract once the auction is passed out.
    ///
    /// The declarer is the player who made the final bid unless that
    /// player's partner named the same strain earlier; then it is the partner.
    pub fn final_contract(&self) -> Result<FinalContract, EngineError> {
        if !self.is_passed_out() {
            return Err(EngineError::AuctionInProgress);
        }
        let index = self.sequence.len() - 4;
        let last = self.sequence[index].call;
        let Call::Bid { level, strain } = last else {
            return Ok(FinalContract::PassedOut);
        };

        // Only the partner's calls are visited: index-2, index-6, ...
        let partner_named_strain = index >= 2
            && (0..=index - 2)
                .rev()
                .step_by(4)
                .any(|i| self.sequence[i].call.strain() == Some(strain));
        let declarer_index = if partner_named_strain { index - 2 } else { index };

        Ok(FinalContract::Contract(Contract::new(
            level,
            strain,
            self.seat_at(declarer_index),
        )))
    }
}
