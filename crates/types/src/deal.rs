use crate::board::Position;
use crate::card::Card;
use crate::hand::Hand;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Four hands, one per seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Deal {
    pub hands: HashMap<Position, Hand>,
}

impl Deal {
    pub fn new(hands: HashMap<Position, Hand>) -> Self {
        Self { hands }
    }

    pub fn hand(&self, position: Position) -> Option<&Hand> {
        self.hands.get(&position)
    }
}

/// Source of deals for successive boards.
pub trait DealProvider {
    fn deal(&mut self) -> Deal;
}

/// Shuffles a full pack and hands out 13 cards to each seat.
pub struct RandomDealer<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomDealer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DealProvider for RandomDealer<R> {
    fn deal(&mut self) -> Deal {
        let mut deck = Card::deck();
        deck.shuffle(&mut self.rng);

        let mut hands = HashMap::new();
        for (position, chunk) in Position::ALL.into_iter().zip(deck.chunks(13)) {
            let mut hand = Hand::new(chunk.to_vec());
            hand.sort();
            hands.insert(position, hand);
        }
        Deal { hands }
    }
}

/// Deals the same hands every board.
#[derive(Debug, Clone, Default)]
pub struct FixedDealer {
    deal: Deal,
}

impl FixedDealer {
    pub fn new(deal: Deal) -> Self {
        Self { deal }
    }
}

impl DealProvider for FixedDealer {
    fn deal(&mut self) -> Deal {
        self.deal.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_random_deal_is_complete() {
        let mut dealer = RandomDealer::new(StdRng::seed_from_u64(7));
        let deal = dealer.deal();
        let mut seen = HashSet::new();
        for position in Position::ALL {
            let hand = deal.hand(position).expect("every seat is dealt");
            assert_eq!(hand.cards.len(), 13);
            seen.extend(hand.cards.iter().copied());
        }
        assert_eq!(seen.len(), 52);
    }

    #[test]
    fn test_seeded_deals_repeat() {
        let a = RandomDealer::new(StdRng::seed_from_u64(42)).deal();
        let b = RandomDealer::new(StdRng::seed_from_u64(42)).deal();
        assert_eq!(a, b);
    }
}
