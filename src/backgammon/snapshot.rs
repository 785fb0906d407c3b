use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::backgammon::{Board, GameOutcome, Player, TurnPhase};
use crate::error::SnapshotError;

/// Everything needed to resume a game: the board, whose turn it is and
/// which dice are left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub current_player: Player,
    pub remaining_dice: Vec<u8>,
    pub phase: TurnPhase,
}

impl GameSnapshot {
    /// Checks that the snapshot describes a position a real game can reach.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.board.validate()?;
        let dice = &self.remaining_dice;
        if let Some(&bad) = dice.iter().find(|d| !(1..=6).contains(*d)) {
            return Err(SnapshotError::InvalidDie(bad));
        }
        let double = dice.windows(2).all(|pair| pair[0] == pair[1]);
        if dice.len() > 4 || (dice.len() > 2 && !double) {
            return Err(SnapshotError::ImpossibleRoll(dice.clone()));
        }

        let finished = GameOutcome::from_board(&self.board) != GameOutcome::Ongoing;
        let consistent = match self.phase {
            TurnPhase::AwaitingRoll => dice.is_empty() && !finished,
            TurnPhase::Moving => !dice.is_empty() && !finished,
            TurnPhase::GameOver => dice.is_empty() && finished,
        };
        if !consistent {
            return Err(SnapshotError::PhaseMismatch { phase: self.phase, dice: dice.len() });
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and validates a snapshot.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: GameSnapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        debug!("snapshot written");
        Ok(())
    }

    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let snapshot = Self::from_json(&json)?;
        debug!(player = %snapshot.current_player, "snapshot read");
        Ok(snapshot)
    }
}
