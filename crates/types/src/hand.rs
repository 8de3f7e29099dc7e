// cspell:ignore AKQJT AKQJ
use crate::card::Card;
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Suit lengths of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Distribution {
    pub spades: u8,
    pub hearts: u8,
    pub diamonds: u8,
    pub clubs: u8,
}

impl Distribution {
    pub fn new(spades: u8, hearts: u8, diamonds: u8, clubs: u8) -> Self {
        Self {
            spades,
            hearts,
            diamonds,
            clubs,
        }
    }

    pub fn length(&self, suit: Suit) -> u8 {
        match suit {
            Suit::Spades => self.spades,
            Suit::Hearts => self.hearts,
            Suit::Diamonds => self.diamonds,
            Suit::Clubs => self.clubs,
        }
    }

    /// Lengths in spades, hearts, diamonds, clubs order.
    pub fn lengths(&self) -> [u8; 4] {
        [self.spades, self.hearts, self.diamonds, self.clubs]
    }

    pub fn total(&self) -> u8 {
        self.lengths().iter().sum()
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.spades, self.hearts, self.diamonds, self.clubs
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Parse a hand string in the format "Clubs.Diamonds.Hearts.Spades".
    pub fn parse(s: &str) -> Self {
        crate::io::hand_parser::parse_hand(s)
    }

    /// Parse a PBN-style hand string in the format "Spades.Hearts.Diamonds.Clubs".
    pub fn from_pbn(s: &str) -> Self {
        crate::io::hand_parser::parse_pbn_hand(s)
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.cards.iter().filter(|c| c.suit == suit).count() as u8
    }

    pub fn distribution(&self) -> Distribution {
        Distribution {
            spades: self.length(Suit::Spades),
            hearts: self.length(Suit::Hearts),
            diamonds: self.length(Suit::Diamonds),
            clubs: self.length(Suit::Clubs),
        }
    }

    pub fn holds(&self, suit: Suit, rank: Rank) -> bool {
        self.cards.iter().any(|c| c.suit == suit && c.rank == rank)
    }

    pub fn sort(&mut self) {
        // Spades first, high cards first within a suit.
        self.cards
            .sort_by(|a, b| b.suit.cmp(&a.suit).then_with(|| b.rank.cmp(&a.rank)));
    }

    /// Ranks held in one suit, highest first.
    pub fn holding(&self, suit: Suit) -> Vec<Rank> {
        let mut ranks: Vec<Rank> = self
            .cards
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| c.rank)
            .collect();
        ranks.sort_by(|a, b| b.cmp(a));
        ranks
    }
}

impl fmt::Display for Hand {
    /// PBN order: "AKQ2.KJ3.T5.J32", a void renders as an empty group.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<String> = Suit::DESCENDING
            .iter()
            .map(|&suit| self.holding(suit).iter().map(|r| r.to_char()).collect())
            .collect();
        write!(f, "{}", groups.join("."))
    }
}
