use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    North,
    East,
    South,
    West,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::North,
        Position::East,
        Position::South,
        Position::West,
    ];

    pub fn next(self) -> Self {
        match self {
            Position::North => Position::East,
            Position::East => Position::South,
            Position::South => Position::West,
            Position::West => Position::North,
        }
    }

    pub fn partner(self) -> Self {
        match self {
            Position::North => Position::South,
            Position::South => Position::North,
            Position::East => Position::West,
            Position::West => Position::East,
        }
    }

    pub fn is_north_south(self) -> bool {
        matches!(self, Position::North | Position::South)
    }

    pub fn to_char(self) -> char {
        match self {
            Position::North => 'N',
            Position::East => 'E',
            Position::South => 'S',
            Position::West => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Position::North),
            'E' => Some(Position::East),
            'S' => Some(Position::South),
            'W' => Some(Position::West),
            _ => None,
        }
    }

    /// Board 1 is dealt by North, 2 by East, 3 by South, 4 by West, then repeat.
    ///
    /// Passing `board_number + calls_made` gives the seat whose turn it is.
    pub fn dealer_from_board_number(board_number: u32) -> Self {
        let index = (board_number % 4 + 3) % 4;
        Position::ALL[index as usize]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Board vulnerability, named from North-South's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Vulnerability {
    #[default]
    None,
    /// Only North-South are vulnerable.
    Unfavourable,
    /// Only East-West are vulnerable.
    Favourable,
    All,
}

impl Vulnerability {
    pub fn is_vulnerable(self, pos: Position) -> bool {
        match self {
            Vulnerability::None => false,
            Vulnerability::Unfavourable => pos.is_north_south(),
            Vulnerability::Favourable => !pos.is_north_south(),
            Vulnerability::All => true,
        }
    }

    pub fn from_board_number(board_number: u32) -> Self {
        match board_number % 16 {
            1 | 8 | 11 | 14 => Vulnerability::None,
            2 | 5 | 12 | 15 => Vulnerability::Unfavourable,
            3 | 6 | 9 | 0 => Vulnerability::Favourable,
            4 | 7 | 10 | 13 => Vulnerability::All,
            _ => unreachable!(),
        }
    }
}

impl fmt::Display for Vulnerability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Vulnerability::None => "None",
            Vulnerability::Unfavourable => "Unfavourable",
            Vulnerability::Favourable => "Favourable",
            Vulnerability::All => "All",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_next() {
        assert_eq!(Position::North.next(), Position::East);
        assert_eq!(Position::West.next(), Position::North);
    }

    #[test]
    fn test_position_partner() {
        for pos in Position::ALL {
            assert_eq!(pos.partner().partner(), pos);
            assert_eq!(pos.partner(), pos.next().next());
        }
    }

    #[test]
    fn test_position_char() {
        assert_eq!(Position::North.to_char(), 'N');
        assert_eq!(Position::from_char('w'), Some(Position::West));
        assert_eq!(Position::from_char('X'), None);
    }

    #[test]
    fn test_dealer_rotation() {
        assert_eq!(Position::dealer_from_board_number(1), Position::North);
        assert_eq!(Position::dealer_from_board_number(2), Position::East);
        assert_eq!(Position::dealer_from_board_number(3), Position::South);
        assert_eq!(Position::dealer_from_board_number(4), Position::West);
        assert_eq!(Position::dealer_from_board_number(5), Position::North);
        assert_eq!(Position::dealer_from_board_number(0), Position::West);
        // u32::MAX is 3 mod 4.
        assert_eq!(Position::dealer_from_board_number(u32::MAX), Position::South);
    }

    #[test]
    fn test_vulnerability_buckets() {
        for n in [1, 8, 11, 14, 17, 24] {
            assert_eq!(Vulnerability::from_board_number(n), Vulnerability::None);
        }
        for n in [2, 5, 12, 15] {
            assert_eq!(
                Vulnerability::from_board_number(n),
                Vulnerability::Unfavourable
            );
        }
        for n in [3, 6, 9, 16] {
            assert_eq!(
                Vulnerability::from_board_number(n),
                Vulnerability::Favourable
            );
        }
        for n in [4, 7, 10, 13, 20] {
            assert_eq!(Vulnerability::from_board_number(n), Vulnerability::All);
        }
    }

    #[test]
    fn test_vulnerability() {
        assert!(Vulnerability::Unfavourable.is_vulnerable(Position::North));
        assert!(!Vulnerability::Unfavourable.is_vulnerable(Position::East));
        assert!(Vulnerability::Favourable.is_vulnerable(Position::West));
        assert!(Vulnerability::All.is_vulnerable(Position::West));
        assert!(!Vulnerability::None.is_vulnerable(Position::South));
    }
}
