use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Where a checker can be: on the bar, on one of the 24 points, or borne off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    Bar,
    Board(u8),
    Off,
}

impl Position {
    /// Creates a position on the board from an index (0-23).
    pub fn from_index(index: u8) -> Self {
        assert!(index < 24, "point index {index} out of range");
        Position::Board(index)
    }

    pub fn index(&self) -> Option<u8> {
        match self {
            Position::Board(index) => Some(*index),
            _ => None,
        }
    }
}

/// Points are printed 1-based, the way players count them.
impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Bar => write!(f, "bar"),
            Position::Off => write!(f, "off"),
            Position::Board(index) => write!(f, "{}", index + 1),
        }
    }
}
