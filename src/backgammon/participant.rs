use serde::{Deserialize, Serialize};

use crate::backgammon::Player;

/// A person sitting at the board. Checker positions live on the board only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    name: String,
    player: Player,
    turns_played: u32,
    score: u32,
}

impl Participant {
    pub fn new(name: impl Into<String>, player: Player) -> Self {
        Participant {
            name: name.into(),
            player,
            turns_played: 0,
            score: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn record_turn(&mut self) {
        self.turns_played += 1;
    }

    pub(crate) fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    /// Starts a new game; the running score carries over.
    pub(crate) fn reset(&mut self) {
        self.turns_played = 0;
    }
}
