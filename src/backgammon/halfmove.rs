use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::backgammon::{Player, Position};

/// One checker moved by one die value, as applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HalfMove {
    player: Player,
    from: Position,
    to: Position,
    die: u8,
    hit: bool,
}

impl HalfMove {
    pub fn new(player: Player, from: Position, to: Position, die: u8, hit: bool) -> Self {
        HalfMove { player, from, to, die, hit }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn from(&self) -> Position {
        self.from
    }

    pub fn to(&self) -> Position {
        self.to
    }

    pub fn die(&self) -> u8 {
        self.die
    }

    /// A lone opposing checker was sent to the bar.
    pub fn is_hit(&self) -> bool {
        self.hit
    }
}

/// Standard notation: `24/18`, `bar/21*`, `3/off`.
impl Display for HalfMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.from, self.to)?;
        if self.hit {
            write!(f, "*")?;
        }
        Ok(())
    }
}
