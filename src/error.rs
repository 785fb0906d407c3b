//! Error types for the rules engine.
//!
//! Illegal moves are ordinary values the caller recovers from by trying
//! something else. Out-of-range indices are contract violations and panic
//! at the call site instead.

use derive_more::{Display, Error, From};

use crate::backgammon::{Player, Position, TurnPhase};

/// Why a proposed checker movement was rejected. The board is untouched
/// whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The source holds no checker of the moving player.
    #[display("{_0} has no checker on {_1}")]
    NoCheckerAt(Player, Position),

    /// Checkers on the bar must re-enter before anything else moves.
    #[display("{_0} must enter from the bar first")]
    MustEnterFromBar(#[error(not(source))] Player),

    /// Re-entry was requested with an empty bar.
    #[display("{_0} has no checker on the bar")]
    NothingOnBar(#[error(not(source))] Player),

    /// The target point holds two or more opposing checkers.
    #[display("point {_0} is blocked")]
    Blocked(#[error(not(source))] Position),

    /// Some checker is still outside the home board or on the bar.
    #[display("{_0} cannot bear off yet")]
    BearOffNotAllowed(#[error(not(source))] Player),

    /// The die does not reach past the edge from this point.
    #[display("a {_0} does not bear off from {_1}")]
    BearOffTooShort(u8, Position),

    /// An over-shooting die may only take the farthest-back checker.
    #[display("a checker farther back than {_0} must move first")]
    FartherCheckerRemains(#[error(not(source))] Position),

    /// The die value is not among the remaining rolled values.
    #[display("no {_0} left to play")]
    DieNotAvailable(#[error(not(source))] u8),

    /// Both legs of a combined move must land on the board.
    #[display("combined move from {_0} leaves the board")]
    CombinedLegOffBoard(#[error(not(source))] Position),

    #[display("dice have not been rolled")]
    NotRolled,

    #[display("dice were already rolled this turn")]
    AlreadyRolled,

    #[display("the game is over")]
    GameOver,
}

/// A saved game could not be read back into a consistent state.
#[derive(Debug, Display, Error, From)]
pub enum SnapshotError {
    #[display("snapshot is not valid JSON: {_0}")]
    #[from]
    Json(serde_json::Error),

    #[display("snapshot file error: {_0}")]
    #[from]
    Io(std::io::Error),

    /// Point `index` has a count without an owner or an owner without a count.
    #[display("point {} has inconsistent owner and count", index + 1)]
    InconsistentPoint { index: u8 },

    /// A side does not account for exactly fifteen checkers.
    #[display("{player} has {found} checkers, expected 15")]
    CheckerCount { player: Player, found: u32 },

    #[display("invalid die value {_0}")]
    InvalidDie(#[error(not(source))] u8),

    /// More than four values, or more than two that are not a double.
    #[display("dice {_0:?} cannot come from one roll")]
    ImpossibleRoll(#[error(not(source))] Vec<u8>),

    /// The turn phase disagrees with the board or the remaining dice.
    #[display("phase `{phase}` does not fit {dice} remaining dice and the board")]
    PhaseMismatch { phase: TurnPhase, dice: usize },
}
