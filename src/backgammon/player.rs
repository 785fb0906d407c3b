use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// One side of the board. White moves toward index 0, Black toward index 23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::White, Player::Black];

    pub fn opposite(&self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Step applied to a point index for every pip moved.
    pub fn direction(&self) -> i8 {
        match self {
            Player::White => -1,
            Player::Black => 1,
        }
    }

    /// The six points that must hold every remaining checker before bearing off.
    pub fn home_range(&self) -> RangeInclusive<u8> {
        match self {
            Player::White => 0..=5,
            Player::Black => 18..=23,
        }
    }

    /// Slot used for per-player arrays such as the bar and borne-off counts.
    pub(crate) fn slot(&self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Player::White => 'W',
            Player::Black => 'B',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}
