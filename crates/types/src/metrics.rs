// cspell:ignore AKQ AKJ AQJ KQJ
//! Hand evaluation: the capability surface rule conditions are checked against.

use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Point scale for high-card evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HcpScale {
    /// A=4 K=3 Q=2 J=1
    #[default]
    Standard,
    /// A=4.5 K=3 Q=1.5 J=0.75 T=0.25
    Chimaera,
}

impl HcpScale {
    pub fn weight(self, rank: Rank) -> f64 {
        match (self, rank) {
            (HcpScale::Standard, Rank::Ace) => 4.0,
            (HcpScale::Standard, Rank::King) => 3.0,
            (HcpScale::Standard, Rank::Queen) => 2.0,
            (HcpScale::Standard, Rank::Jack) => 1.0,
            (HcpScale::Chimaera, Rank::Ace) => 4.5,
            (HcpScale::Chimaera, Rank::King) => 3.0,
            (HcpScale::Chimaera, Rank::Queen) => 1.5,
            (HcpScale::Chimaera, Rank::Jack) => 0.75,
            (HcpScale::Chimaera, Rank::Ten) => 0.25,
            _ => 0.0,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(HcpScale::Standard),
            "chimaera" => Some(HcpScale::Chimaera),
            _ => None,
        }
    }
}

/// How distribution is scored on top of high cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShapePoints {
    /// One point for every card beyond the fourth in each suit.
    #[default]
    Standard,
    /// Half the hand's freakness, less one half.
    Freakiness,
}

impl ShapePoints {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(ShapePoints::Standard),
            "freakiness" => Some(ShapePoints::Freakiness),
            _ => None,
        }
    }

    pub fn score(self, lengths: [u8; 4]) -> f64 {
        match self {
            ShapePoints::Standard => {
                f64::from(lengths.iter().map(|&len| len.saturating_sub(4)).sum::<u8>())
            }
            ShapePoints::Freakiness => f64::from(freakness(lengths)) / 2.0 - 0.5,
        }
    }
}

/// Dealer-style freakness: a void scores 3, a singleton 2, a doubleton 1,
/// three or four cards nothing, and longer suits one per card beyond four.
pub fn freakness(lengths: [u8; 4]) -> u8 {
    lengths
        .iter()
        .map(|&len| match len {
            0..=2 => 3 - len,
            3 | 4 => 0,
            _ => len - 4,
        })
        .sum()
}

/// A named scalar evaluation of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Evaluator {
    Hcp(HcpScale),
    /// High cards plus shape points.
    Points(HcpScale, ShapePoints),
    /// Playing tricks.
    Tricks,
}

impl Evaluator {
    pub fn name(self) -> &'static str {
        match self {
            Evaluator::Hcp(_) => "hcp",
            Evaluator::Points(..) => "points",
            Evaluator::Tricks => "tricks",
        }
    }
}

impl fmt::Display for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the rule engine needs to know about a hand.
pub trait HandMetrics {
    /// Number of cards held in `suit`, 0..=13.
    fn suit_length(&self, suit: Suit) -> u8;

    fn evaluate(&self, evaluator: Evaluator) -> f64;

    /// Lengths in spades, hearts, diamonds, clubs order.
    fn shape(&self) -> [u8; 4] {
        Suit::DESCENDING.map(|suit| self.suit_length(suit))
    }
}

impl HandMetrics for Hand {
    fn suit_length(&self, suit: Suit) -> u8 {
        self.length(suit)
    }

    fn evaluate(&self, evaluator: Evaluator) -> f64 {
        match evaluator {
            Evaluator::Hcp(scale) => high_card_points(self, scale),
            Evaluator::Points(scale, shape) => {
                high_card_points(self, scale) + shape.score(self.shape())
            }
            Evaluator::Tricks => Suit::ALL
                .iter()
                .map(|&suit| playing_tricks(&self.holding(suit)))
                .sum(),
        }
    }
}

fn high_card_points(hand: &Hand, scale: HcpScale) -> f64 {
    hand.cards.iter().map(|c| scale.weight(c.rank)).sum()
}

/// Honour tricks from the top of the suit, capped by its length, plus one
/// trick for every card beyond the third.
fn playing_tricks(holding: &[Rank]) -> f64 {
    let len = holding.len();
    let has = |rank: Rank| holding.contains(&rank);
    let (ace, king, queen, jack) = (
        has(Rank::Ace),
        has(Rank::King),
        has(Rank::Queen),
        has(Rank::Jack),
    );
    let honours = match (ace, king, queen) {
        (true, true, true) => 3.0,
        (true, true, false) if jack => 2.5,
        (true, true, false) => 2.0,
        (true, false, true) if jack => 2.0,
        (true, false, true) => 1.5,
        (true, false, false) => 1.0,
        (false, true, true) if jack => 2.0,
        (false, true, true) => 1.0,
        (false, true, false) if len >= 2 => 0.5,
        (false, false, true) if jack && len >= 3 => 0.5,
        _ => 0.0,
    };
    let honours: f64 = f64::min(honours, len as f64);
    honours + len.saturating_sub(3) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_hcp() {
        let hand = Hand::parse("J.Q.K.A2");
        assert_eq!(hand.evaluate(Evaluator::Hcp(HcpScale::Standard)), 10.0);
    }

    #[test]
    fn test_chimaera_hcp() {
        let hand = Hand::parse("JT.Q.K.A2");
        assert_eq!(hand.evaluate(Evaluator::Hcp(HcpScale::Chimaera)), 10.0);
    }

    #[test]
    fn test_points_add_length() {
        // Six spades and five hearts: three length points.
        let hand = Hand::parse("2.3.AK432.AQ5432");
        assert_eq!(hand.evaluate(Evaluator::Hcp(HcpScale::Standard)), 13.0);
        let points = Evaluator::Points(HcpScale::Standard, ShapePoints::Standard);
        assert_eq!(hand.evaluate(points), 16.0);
    }

    #[test]
    fn test_freakness() {
        assert_eq!(freakness([4, 3, 3, 3]), 0);
        assert_eq!(freakness([4, 4, 3, 2]), 1);
        assert_eq!(freakness([5, 3, 3, 2]), 2);
        assert_eq!(freakness([6, 5, 2, 0]), 7);
        assert_eq!(freakness([13, 0, 0, 0]), 18);
    }

    #[test]
    fn test_freakiness_points() {
        // 6-5-1-1: freakness 7, so 3 shape points.
        let hand = Hand::parse("2.3.AK432.AQ5432");
        let points = Evaluator::Points(HcpScale::Standard, ShapePoints::Freakiness);
        assert_eq!(hand.evaluate(points), 16.0);
        // A flat hand loses half a point.
        let flat = Hand::parse("432.432.432.AKQJ");
        assert_eq!(flat.evaluate(points), 9.5);
    }

    #[test]
    fn test_playing_tricks() {
        assert_eq!(playing_tricks(&[Rank::Ace, Rank::King, Rank::Queen]), 3.0);
        assert_eq!(playing_tricks(&[Rank::Ace, Rank::King]), 2.0);
        assert_eq!(playing_tricks(&[Rank::King]), 0.0);
        assert_eq!(playing_tricks(&[Rank::King, Rank::Two]), 0.5);
        assert_eq!(
            playing_tricks(&[
                Rank::Ace,
                Rank::King,
                Rank::Queen,
                Rank::Five,
                Rank::Four,
                Rank::Two
            ]),
            6.0
        );
        assert_eq!(playing_tricks(&[]), 0.0);
    }

    #[test]
    fn test_hand_tricks() {
        // AKQxxx spades, AK hearts, small elsewhere.
        let hand = Hand::parse("32.432.AK.AKQ542");
        assert_eq!(hand.evaluate(Evaluator::Tricks), 8.0);
    }

    #[test]
    fn test_shape_order() {
        let hand = Hand::parse("J32.T5.AK32.KQJ3");
        assert_eq!(hand.shape(), [4, 4, 2, 3]);
        assert_eq!(hand.suit_length(Suit::Diamonds), 2);
    }
}
