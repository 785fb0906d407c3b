//! Turn coordination: who is to move, which dice remain, and when the game ends.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::backgammon::{
    Board, CHECKERS_PER_PLAYER, Dice, DieSource, GameOutcome, GameSnapshot, HalfMove, Move, Participant, Player, Point,
    Position, RandomDie,
};
use crate::error::{MoveError, SnapshotError};

/// Where the active player is within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingRoll,
    Moving,
    GameOver,
}

impl Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnPhase::AwaitingRoll => write!(f, "awaiting roll"),
            TurnPhase::Moving => write!(f, "moving"),
            TurnPhase::GameOver => write!(f, "game over"),
        }
    }
}

/// A game between two participants. Owns the board and the dice and is the
/// only thing that mutates them.
pub struct Game<S = RandomDie> {
    board: Board,
    dice: Dice<S>,
    current_player: Player,
    phase: TurnPhase,
    outcome: GameOutcome,
    participants: [Participant; 2],
    current_move: Move,
    history: Vec<Move>,
}

impl Default for Game<RandomDie> {
    fn default() -> Self {
        Game::new(RandomDie::from_entropy())
    }
}

impl<S: DieSource> Game<S> {
    pub fn new(source: S) -> Self {
        Self::with_names("White", "Black", source)
    }

    pub fn with_names(white: impl Into<String>, black: impl Into<String>, source: S) -> Self {
        Game {
            board: Board::new(),
            dice: Dice::new(source),
            current_player: Player::White,
            phase: TurnPhase::AwaitingRoll,
            outcome: GameOutcome::Ongoing,
            participants: [
                Participant::new(white, Player::White),
                Participant::new(black, Player::Black),
            ],
            current_move: Move::new(Player::White),
            history: Vec::new(),
        }
    }

    /// Starts from an arbitrary position with `to_move` awaiting the roll.
    pub fn from_position(board: Board, to_move: Player, source: S) -> Self {
        let mut game = Self::new(source);
        game.board = board;
        game.current_player = to_move;
        game.current_move = Move::new(to_move);
        game.refresh_outcome();
        game
    }

    /// Rolls for the active player. A double yields four values.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn roll_dice(&mut self) -> Result<&[u8], MoveError> {
        match self.phase {
            TurnPhase::GameOver => return Err(MoveError::GameOver),
            TurnPhase::Moving => return Err(MoveError::AlreadyRolled),
            TurnPhase::AwaitingRoll => {}
        }
        self.dice.roll();
        self.current_move.set_roll(self.dice.values());
        self.phase = TurnPhase::Moving;
        info!(dice = %self.dice, "rolled");
        Ok(self.dice.values())
    }
}

impl<S> Game<S> {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn points(&self) -> &[Point; 24] {
        self.board.points()
    }

    pub fn bar(&self, player: Player) -> u8 {
        self.board.bar(player)
    }

    pub fn borne_off(&self, player: Player) -> u8 {
        self.board.borne_off(player)
    }

    pub fn dice(&self) -> &Dice<S> {
        &self.dice
    }

    /// Die values the active player may still play.
    pub fn remaining_moves(&self) -> &[u8] {
        self.dice.values()
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn participant(&self, player: Player) -> &Participant {
        &self.participants[player.slot()]
    }

    pub fn current_participant(&self) -> &Participant {
        self.participant(self.current_player)
    }

    /// Completed turns, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// What the active player has played so far this turn.
    pub fn current_move(&self) -> &Move {
        &self.current_move
    }

    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn winner(&self) -> Option<Player> {
        Player::ALL
            .into_iter()
            .find(|&p| self.board.borne_off(p) >= CHECKERS_PER_PLAYER)
    }

    fn ensure_moving(&self) -> Result<(), MoveError> {
        match self.phase {
            TurnPhase::GameOver => Err(MoveError::GameOver),
            TurnPhase::AwaitingRoll => Err(MoveError::NotRolled),
            TurnPhase::Moving => Ok(()),
        }
    }

    fn ensure_available(&self, die: u8) -> Result<(), MoveError> {
        match self.dice.contains(die) {
            true => Ok(()),
            false => Err(MoveError::DieNotAvailable(die)),
        }
    }

    /// Plays `die` from `from` for the active player and consumes the die.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn try_move(&mut self, from: Position, die: u8) -> Result<HalfMove, MoveError> {
        self.ensure_moving()?;
        self.ensure_available(die)?;
        let half_move = self
            .board
            .move_checker(self.current_player, from, die)
            .inspect_err(|err| debug!(%err, "move rejected"))?;
        self.record(half_move);
        Ok(half_move)
    }

    /// Moves one checker with two dice through the point the smaller die
    /// reaches. Either both legs are played or the board is left untouched.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn try_combined_move(&mut self, from: Position, dice: [u8; 2]) -> Result<[HalfMove; 2], MoveError> {
        self.ensure_moving()?;
        let [small, large] = {
            let mut sorted = dice;
            sorted.sort_unstable();
            sorted
        };
        if small == large {
            if self.dice.count(small) < 2 {
                return Err(MoveError::DieNotAvailable(small));
            }
        } else {
            self.ensure_available(small)?;
            self.ensure_available(large)?;
        }

        let player = self.current_player;
        let mid = match from {
            Position::Bar => Board::enter_from_bar_target(player, small) as i8,
            Position::Board(index) => Board::destination_index(player, index, small),
            Position::Off => panic!("Cannot move from off the board"),
        };
        let last = mid + player.direction() * large as i8;
        if !(0..24).contains(&mid) || !(0..24).contains(&last) {
            return Err(MoveError::CombinedLegOffBoard(from));
        }
        for index in [mid, last] {
            if self.board.point_is_blocked(player, index) {
                debug!(point = index + 1, "combined move blocked");
                return Err(MoveError::Blocked(Position::Board(index as u8)));
            }
        }

        let first = self.board.move_checker(player, from, small)?;
        let second = match self.board.move_checker(player, Position::Board(mid as u8), large) {
            Ok(second) => second,
            Err(err) => {
                self.board.undo(&first);
                debug!(%err, "second leg rejected, first leg rolled back");
                return Err(err);
            }
        };
        self.record(first);
        self.record(second);
        Ok([first, second])
    }

    /// Bears a checker off `from` using exactly the given die.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn try_bear_off(&mut self, from: u8, die: u8) -> Result<HalfMove, MoveError> {
        assert!(from < 24, "point index {from} out of range");
        self.ensure_moving()?;
        self.ensure_available(die)?;
        let player = self.current_player;
        if !self.board.bearing_off_allowed(player) {
            return Err(MoveError::BearOffNotAllowed(player));
        }
        if (0..24).contains(&Board::destination_index(player, from, die)) {
            return Err(MoveError::BearOffTooShort(die, Position::Board(from)));
        }
        if !self.board.can_bear_off_with_die(player, die) {
            return Err(MoveError::FartherCheckerRemains(Position::Board(from)));
        }
        self.try_move(Position::Board(from), die)
    }

    /// Bears off from `from`, picking the die: the exact distance if
    /// rolled, otherwise the smallest larger value that may over-shoot.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn try_bear_off_click(&mut self, from: u8) -> Result<HalfMove, MoveError> {
        assert!(from < 24, "point index {from} out of range");
        self.ensure_moving()?;
        let player = self.current_player;
        if !self.board.point(from).is_owned_by(player) {
            return Err(MoveError::NoCheckerAt(player, Position::Board(from)));
        }
        if !self.board.bearing_off_allowed(player) {
            return Err(MoveError::BearOffNotAllowed(player));
        }
        let need = Board::distance_to_bear_off(player, from);
        if self.dice.contains(need) {
            return self.try_move(Position::Board(from), need);
        }
        let larger: Vec<u8> = self.dice.unique_values().into_iter().filter(|&die| die > need).collect();
        let mut refused = MoveError::DieNotAvailable(need);
        for die in larger {
            match self.board.check_move(player, Position::Board(from), die) {
                Ok(Position::Off) => return self.try_move(Position::Board(from), die),
                Ok(_) => {}
                Err(err) => refused = err,
            }
        }
        Err(refused)
    }

    /// Sources from which `player` may legally play `die`. With checkers on
    /// the bar the only candidate is [`Position::Bar`].
    pub fn legal_single_sources(&self, player: Player, die: u8) -> Vec<Position> {
        if self.board.bar(player) > 0 {
            return match self.board.check_move(player, Position::Bar, die) {
                Ok(_) => vec![Position::Bar],
                Err(_) => Vec::new(),
            };
        }
        (0..24)
            .map(Position::Board)
            .filter(|&from| self.board.check_move(player, from, die).is_ok())
            .collect()
    }

    pub fn any_move_available(&self, player: Player, dice: &[u8]) -> bool {
        dice.iter()
            .any(|&die| !self.legal_single_sources(player, die).is_empty())
    }

    /// The active player can still play at least one remaining die.
    pub fn has_legal_move(&self) -> bool {
        self.phase == TurnPhase::Moving
            && self.any_move_available(self.current_player, self.dice.values())
    }

    /// Ends the turn once the dice are spent or nothing can be played.
    /// Returns whether the turn passed to the opponent.
    pub fn end_turn_if_needed(&mut self) -> bool {
        if self.phase != TurnPhase::Moving {
            return false;
        }
        if self.dice.is_empty() || !self.has_legal_move() {
            self.pass_turn();
            return true;
        }
        false
    }

    /// Hands the turn to the opponent, discarding any unplayed dice.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn switch_turn(&mut self) -> Result<(), MoveError> {
        if self.phase == TurnPhase::GameOver {
            return Err(MoveError::GameOver);
        }
        self.pass_turn();
        Ok(())
    }

    fn pass_turn(&mut self) {
        self.participants[self.current_player.slot()].record_turn();
        let next = self.current_player.opposite();
        let finished = std::mem::replace(&mut self.current_move, Move::new(next));
        info!(turn = %finished, "turn over");
        self.history.push(finished);
        self.dice.reset();
        self.current_player = next;
        self.phase = TurnPhase::AwaitingRoll;
    }

    fn record(&mut self, half_move: HalfMove) {
        self.dice.consume(half_move.die());
        self.current_move.add_half_move(half_move);
        debug!(%half_move, remaining = %self.dice, "played");
        self.refresh_outcome();
    }

    fn refresh_outcome(&mut self) {
        let outcome = GameOutcome::from_board(&self.board);
        if outcome == GameOutcome::Ongoing || self.phase == TurnPhase::GameOver {
            self.outcome = outcome;
            return;
        }
        self.outcome = outcome;
        self.phase = TurnPhase::GameOver;
        self.dice.reset();
        if let Some(winner) = outcome.winner() {
            self.participants[winner.slot()].add_score(outcome.points());
            info!(%winner, ?outcome, points = outcome.points(), "game over");
        }
        if !self.current_move.is_empty() {
            let finished = std::mem::replace(&mut self.current_move, Move::new(self.current_player));
            self.history.push(finished);
        }
    }

    /// Sets up a fresh game. Participants keep their scores.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.dice.reset();
        self.current_player = Player::White;
        self.phase = TurnPhase::AwaitingRoll;
        self.outcome = GameOutcome::Ongoing;
        self.participants.iter_mut().for_each(Participant::reset);
        self.current_move = Move::new(Player::White);
        self.history.clear();
        info!("new game");
    }

    /// Captures the position between commands. A turn whose dice are all
    /// spent must be ended first, or the snapshot will not validate.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            current_player: self.current_player,
            remaining_dice: self.dice.values().to_vec(),
            phase: self.phase,
        }
    }

    /// Replaces the position with a saved one. The move history restarts.
    #[instrument(skip(self, snapshot))]
    pub fn restore(&mut self, snapshot: &GameSnapshot) -> Result<(), SnapshotError> {
        snapshot.validate()?;
        self.board = snapshot.board;
        self.current_player = snapshot.current_player;
        self.dice.set_values(&snapshot.remaining_dice);
        self.phase = snapshot.phase;
        self.current_move = Move::new(snapshot.current_player);
        self.current_move.set_roll(&snapshot.remaining_dice);
        self.history.clear();
        self.outcome = GameOutcome::from_board(&self.board);
        info!(player = %self.current_player, phase = %self.phase, "restored");
        Ok(())
    }
}
