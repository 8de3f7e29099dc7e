use crate::card::Card;
use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;

/// Parses a hand string in the format "Clubs.Diamonds.Hearts.Spades".
///
/// This format is used by test vectors and represents suits in ascending
/// order of rank (C, D, H, S). Unknown characters are ignored.
pub fn parse_hand(s: &str) -> Hand {
    parse_in_order(s, Suit::ALL)
}

/// Parses a PBN hand string, which lists suits in descending order (S, H, D, C).
pub fn parse_pbn_hand(s: &str) -> Hand {
    parse_in_order(s, Suit::DESCENDING)
}

fn parse_in_order(s: &str, suit_order: [Suit; 4]) -> Hand {
    let mut cards = Vec::new();
    for (suit, suit_str) in suit_order.iter().zip(s.trim().split('.')) {
        for c in suit_str.chars() {
            if let Some(rank) = Rank::from_char(c) {
                cards.push(Card::new(*suit, rank));
            }
        }
    }
    Hand { cards }
}
