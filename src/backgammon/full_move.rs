use std::{fmt::Display, ops::Deref};

use serde::{Deserialize, Serialize};

use crate::backgammon::{HalfMove, Player};

/// Everything one player did during a single turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    player: Player,
    roll: Vec<u8>,
    half_moves: Vec<HalfMove>,
}

impl Move {
    pub fn new(player: Player) -> Self {
        Move {
            player,
            roll: Vec::new(),
            half_moves: Vec::with_capacity(4),
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// The values rolled at the start of the turn.
    pub fn roll(&self) -> &[u8] {
        &self.roll
    }

    pub(crate) fn set_roll(&mut self, roll: &[u8]) {
        self.roll = roll.to_vec();
    }

    pub fn add_half_move(&mut self, half_move: HalfMove) {
        self.half_moves.push(half_move);
    }

    pub fn hits(&self) -> usize {
        self.half_moves.iter().filter(|hm| hm.is_hit()).count()
    }
}

impl Deref for Move {
    type Target = [HalfMove];

    fn deref(&self) -> &Self::Target {
        &self.half_moves
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ", self.player)?;
        for (i, value) in self.roll.iter().enumerate() {
            if i > 0 {
                write!(f, "-")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ":")?;
        if self.half_moves.is_empty() {
            return write!(f, " (no move)");
        }
        for half_move in self.half_moves.iter() {
            write!(f, " {}", half_move)?;
        }
        Ok(())
    }
}
