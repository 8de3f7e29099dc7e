use bidding_engine::{Bid, BidTree, RecordedCall};
use bridge_types::{Hand, Position, Suit};
use std::collections::HashMap;
use std::fmt::Write;

pub fn get_hand_suits(hand: &Hand) -> Vec<String> {
    let mut hand = hand.clone();
    hand.sort();

    let mut suits = Vec::new();
    for suit in [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs] {
        let cards: String = hand
            .cards
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| c.rank.to_char())
            .collect();
        suits.push(format!(
            "{}: {}",
            suit.to_char(),
            if cards.is_empty() { "-" } else { &cards }
        ));
    }
    suits
}

pub fn format_hands_table(hands: &HashMap<Position, Hand>) -> String {
    let mut out = String::new();
    let empty = vec!["-".to_string(); 4];
    let suits_of = |pos: Position| hands.get(&pos).map(get_hand_suits);
    let n = suits_of(Position::North);
    let e = suits_of(Position::East);
    let s = suits_of(Position::South);
    let w = suits_of(Position::West);
    let n_suits = n.as_ref().unwrap_or(&empty);
    let e_suits = e.as_ref().unwrap_or(&empty);
    let s_suits = s.as_ref().unwrap_or(&empty);
    let w_suits = w.as_ref().unwrap_or(&empty);

    let indent = "        "; // 8 spaces

    writeln!(out, "{}North", indent).unwrap();
    for s in n_suits {
        writeln!(out, "{}{}", indent, s).unwrap();
    }
    writeln!(out).unwrap();

    writeln!(out, "{:<20} East", "West").unwrap();
    for (w, e) in w_suits.iter().zip(e_suits) {
        writeln!(out, "{:<20} {}", w, e).unwrap();
    }
    writeln!(out).unwrap();

    writeln!(out, "{}South", indent).unwrap();
    for s in s_suits {
        writeln!(out, "{}{}", indent, s).unwrap();
    }
    out
}

pub fn format_row(idx: usize, pos: char, call: &str, rule: &str, desc: &str) -> String {
    format!(
        "{:<3} | {:<3} | {:<5} | {:<25} | {}",
        idx, pos, call, rule, desc
    )
}

pub fn format_table_header() -> String {
    let mut out = String::new();
    writeln!(
        out,
        "{:<3} | {:<3} | {:<5} | {:<25} | Meaning",
        "Idx", "Pos", "Call", "Bid Path"
    )
    .unwrap();
    writeln!(
        out,
        "{:-<3}-+-{:-<3}-+-{:-<5}-+-{:-<25}-+---------------------------",
        "", "", "", ""
    )
    .unwrap();
    out
}

/// One auction row. Calls made without a system bid show no path.
pub fn format_call(idx: usize, recorded: &RecordedCall, tree: &BidTree, meaning: bool) -> String {
    let bid = recorded.bid.and_then(|id| tree.get(id));
    let path = bid.map(|b| tree.path(b.id).to_string()).unwrap_or_default();
    let desc = match bid {
        Some(b) if meaning => bid_meaning(b),
        _ => String::new(),
    };
    format_row(
        idx,
        recorded.seat.to_char(),
        &recorded.call.render(),
        &path,
        &desc,
    )
}

/// The bid's description, or its condition when it has none.
pub fn bid_meaning(bid: &Bid) -> String {
    if bid.description.is_empty() {
        bid.condition.to_string()
    } else {
        bid.description.clone()
    }
}

pub fn format_possible_bids(bids: &[&Bid], meaning: bool) -> String {
    if bids.is_empty() {
        return "      (no system bid fits)".to_string();
    }
    let mut out = String::from("      could bid:");
    for bid in bids {
        write!(out, " {}", bid.call.render()).unwrap();
        if meaning {
            write!(out, " ({})", bid_meaning(bid)).unwrap();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bidding_engine::{BidId, Condition};
    use bridge_types::{Call, Strain};

    fn one_spade_tree() -> (BidTree, BidId) {
        let mut tree = BidTree::new();
        let call = Call::Bid {
            level: 1,
            strain: Strain::Spades,
        };
        let id = tree
            .insert(
                None,
                Bid::new(call, "1s", "five spades", Condition::And(Vec::new())),
            )
            .unwrap();
        (tree, id)
    }

    #[test]
    fn test_hand_suits_show_voids() {
        let hand = Hand::from_pbn("AKQJT98765432...");
        let suits = get_hand_suits(&hand);
        assert_eq!(suits, ["S: AKQJT98765432", "H: -", "D: -", "C: -"]);
    }

    #[test]
    fn test_hands_table_lists_every_seat() {
        let hands = HashMap::from([
            (Position::North, Hand::from_pbn("AKJ32.K32.Q2.Q32")),
            (Position::West, Hand::from_pbn("976.765.763.T876")),
        ]);
        let table = format_hands_table(&hands);
        assert!(table.contains("        North\n        S: AKJ32\n"));
        assert!(table.contains("S: 976"));
        assert!(table.contains("South\n        -\n"));
    }

    #[test]
    fn test_call_rows() {
        let (tree, id) = one_spade_tree();
        let bid = RecordedCall {
            seat: Position::North,
            call: tree[id].call,
            bid: Some(id),
        };
        let row = format_call(1, &bid, &tree, true);
        assert!(row.starts_with("1   | N   | 1S    | 1s"));
        assert!(row.ends_with("| five spades"));
        assert!(format_call(1, &bid, &tree, false).ends_with("| "));

        let pass = RecordedCall {
            seat: Position::East,
            call: Call::Pass,
            bid: None,
        };
        assert!(format_call(2, &pass, &tree, true).starts_with("2   | E   | P     |"));
    }

    #[test]
    fn test_meaning_falls_back_to_condition() {
        let (mut tree, _) = one_spade_tree();
        let call = Call::Bid {
            level: 1,
            strain: Strain::NoTrump,
        };
        let id = tree
            .insert(None, Bid::new(call, "1n", "", Condition::Or(Vec::new())))
            .unwrap();
        assert_eq!(bid_meaning(&tree[id]), Condition::Or(Vec::new()).to_string());
    }

    #[test]
    fn test_possible_bids() {
        let (tree, id) = one_spade_tree();
        assert_eq!(
            format_possible_bids(&[&tree[id]], true),
            "      could bid: 1S (five spades)"
        );
        assert_eq!(format_possible_bids(&[&tree[id]], false), "      could bid: 1S");
        assert_eq!(format_possible_bids(&[], true), "      (no system bid fits)");
    }
}
