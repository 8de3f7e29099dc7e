use crate::error::ConfigError;
use bridge_types::Position;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One seat is played by a person.
    #[default]
    Practice,
    /// The engine calls for every seat.
    Automatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Opponents {
    /// The opposing partnership always passes.
    #[default]
    Silent,
    /// Opponents bid the same system on their own hands.
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_human_seat")]
    pub human_seat: Position,
    #[serde(default)]
    pub opponents: Opponents,
    #[serde(default)]
    pub display_meaning_of_bids: bool,
    #[serde(default)]
    pub display_meaning_of_possible_bids: bool,
}

fn default_human_seat() -> Position {
    Position::South
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            human_seat: default_human_seat(),
            opponents: Opponents::default(),
            display_meaning_of_bids: false,
            display_meaning_of_possible_bids: false,
        }
    }
}

impl TableConfig {
    pub fn automatic() -> Self {
        Self {
            mode: Mode::Automatic,
            ..Self::default()
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_yaml_str(&fs::read_to_string(path)?)
    }

    pub fn is_human(&self, seat: Position) -> bool {
        self.mode == Mode::Practice && seat == self.human_seat
    }

    /// Whether `seat` sits with the human seat (North-South by default).
    pub fn is_home_side(&self, seat: Position) -> bool {
        seat == self.human_seat || seat == self.human_seat.partner()
    }

    /// Whether `seat` always passes.
    pub fn is_silent(&self, seat: Position) -> bool {
        self.opponents == Opponents::Silent && !self.is_home_side(seat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TableConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, TableConfig::default());
        assert_eq!(config.mode, Mode::Practice);
        assert_eq!(config.human_seat, Position::South);
        assert_eq!(config.opponents, Opponents::Silent);
        assert!(config.is_human(Position::South));
        assert!(config.is_home_side(Position::North));
        assert!(!config.is_home_side(Position::East));
        assert!(config.is_silent(Position::East));
        assert!(!config.is_silent(Position::North));
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = "mode: automatic\nhuman_seat: West\nopponents: system\ndisplay_meaning_of_bids: true\n";
        let config = TableConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.mode, Mode::Automatic);
        assert_eq!(config.human_seat, Position::West);
        assert_eq!(config.opponents, Opponents::System);
        assert!(config.display_meaning_of_bids);
        assert!(!config.display_meaning_of_possible_bids);
        assert!(!config.is_human(Position::West));
        assert!(!config.is_silent(Position::North));
    }

    #[test]
    fn test_unknown_mode_is_an_error() {
        assert!(matches!(
            TableConfig::from_yaml_str("mode: tournament"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
