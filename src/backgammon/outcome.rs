use serde::{Deserialize, Serialize};

use crate::backgammon::{Board, CHECKERS_PER_PLAYER, Player};

/// How a game stands, and if finished, how big the win was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Ongoing,
    Win(Player),
    /// The loser has not borne off a single checker.
    Gammon(Player),
    /// A gammon where the loser still has a checker on the bar or in the winner's home board.
    Backgammon(Player),
}

impl GameOutcome {
    pub fn from_board(board: &Board) -> Self {
        let Some(winner) = Player::ALL
            .into_iter()
            .find(|&p| board.borne_off(p) >= CHECKERS_PER_PLAYER)
        else {
            return GameOutcome::Ongoing;
        };

        let loser = winner.opposite();
        if board.borne_off(loser) > 0 {
            return GameOutcome::Win(winner);
        }
        let stuck_in_winner_home = winner
            .home_range()
            .any(|i| board.point(i).is_owned_by(loser));
        if board.bar(loser) > 0 || stuck_in_winner_home {
            GameOutcome::Backgammon(winner)
        } else {
            GameOutcome::Gammon(winner)
        }
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameOutcome::Ongoing => None,
            GameOutcome::Win(p) | GameOutcome::Gammon(p) | GameOutcome::Backgammon(p) => Some(*p),
        }
    }

    /// Points the winner scores.
    pub fn points(&self) -> u32 {
        match self {
            GameOutcome::Ongoing => 0,
            GameOutcome::Win(_) => 1,
            GameOutcome::Gammon(_) => 2,
            GameOutcome::Backgammon(_) => 3,
        }
    }
}
