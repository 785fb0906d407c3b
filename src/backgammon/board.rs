use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::backgammon::{HalfMove, Player, Position};
use crate::error::{MoveError, SnapshotError};

/// Checkers each side plays with.
pub const CHECKERS_PER_PLAYER: u8 = 15;

/// A single point. `count == 0` exactly when `owner` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub owner: Option<Player>,
    pub count: u8,
}

impl Point {
    pub const EMPTY: Point = Point { owner: None, count: 0 };

    pub fn is_owned_by(&self, player: Player) -> bool {
        self.owner == Some(player) && self.count > 0
    }
}

/// Backgammon board: 24 points, a bar and a borne-off tray per side.
///
/// Index 0 is White's one point and index 23 is Black's one point.
/// White moves toward decreasing indices and bears off below index 0,
/// Black moves toward increasing indices and bears off above index 23.
/// Every mutation goes through [`Board::set_point`] so owner and count
/// never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    points: [Point; 24],
    bar: [u8; 2],
    borne_off: [u8; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a new board with the default starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (index, count) in [(23, 2), (12, 5), (7, 3), (5, 5)] {
            board.set_point(index, Some(Player::White), count);
        }
        for (index, count) in [(0, 2), (11, 5), (16, 3), (18, 5)] {
            board.set_point(index, Some(Player::Black), count);
        }
        board
    }

    /// Creates an empty board with no checkers on it.
    pub fn empty() -> Self {
        Board {
            points: [Point::EMPTY; 24],
            bar: [0; 2],
            borne_off: [0; 2],
        }
    }

    pub fn point(&self, index: u8) -> Point {
        self.points[index as usize]
    }

    pub fn points(&self) -> &[Point; 24] {
        &self.points
    }

    pub fn bar(&self, player: Player) -> u8 {
        self.bar[player.slot()]
    }

    pub fn borne_off(&self, player: Player) -> u8 {
        self.borne_off[player.slot()]
    }

    /// Set an arbitrary number of checkers on a point. A count of zero
    /// clears the owner.
    pub fn set_point(&mut self, index: u8, owner: Option<Player>, count: u8) {
        assert!(index < 24, "point index {index} out of range");
        assert!(count <= CHECKERS_PER_PLAYER, "{count} checkers do not fit on one point");
        assert!(count == 0 || owner.is_some(), "checkers on point {index} need an owner");
        self.points[index as usize] = match count {
            0 => Point::EMPTY,
            _ => Point { owner, count },
        };
    }

    pub fn set_bar(&mut self, player: Player, count: u8) {
        self.bar[player.slot()] = count;
    }

    pub fn set_borne_off(&mut self, player: Player, count: u8) {
        self.borne_off[player.slot()] = count;
    }

    pub fn opponent(player: Player) -> Player {
        player.opposite()
    }

    pub fn direction(player: Player) -> i8 {
        player.direction()
    }

    /// Index reached by moving `die` pips from `from`. Values outside
    /// `0..24` mean the checker would leave the board.
    pub fn destination_index(player: Player, from: u8, die: u8) -> i8 {
        from as i8 + player.direction() * die as i8
    }

    /// The point a checker entering from the bar lands on.
    pub fn enter_from_bar_target(player: Player, die: u8) -> u8 {
        assert!((1..=6).contains(&die), "invalid die value {die}");
        match player {
            Player::White => 24 - die,
            Player::Black => die - 1,
        }
    }

    /// Pips needed to carry a checker on `index` off the board.
    pub fn distance_to_bear_off(player: Player, index: u8) -> u8 {
        match player {
            Player::White => index + 1,
            Player::Black => 24 - index,
        }
    }

    /// Two or more opposing checkers hold the point. Off-board indices
    /// are never blocked.
    pub fn point_is_blocked(&self, player: Player, index: i8) -> bool {
        if !(0..24).contains(&index) {
            return false;
        }
        let point = self.points[index as usize];
        point.owner == Some(player.opposite()) && point.count >= 2
    }

    /// Checkers of `player` sitting on the 24 points.
    pub fn checkers_on_board(&self, player: Player) -> u32 {
        self.points
            .iter()
            .filter(|p| p.owner == Some(player))
            .map(|p| p.count as u32)
            .sum()
    }

    /// Board, bar and borne-off checkers together. Always 15 in play.
    pub fn checker_total(&self, player: Player) -> u32 {
        self.checkers_on_board(player) + self.bar(player) as u32 + self.borne_off(player) as u32
    }

    pub fn bearing_off_allowed(&self, player: Player) -> bool {
        let in_home = player
            .home_range()
            .map(|i| self.points[i as usize])
            .filter(|p| p.owner == Some(player))
            .map(|p| p.count as u32)
            .sum::<u32>();

        self.bar(player) == 0 && in_home + self.borne_off(player) as u32 == CHECKERS_PER_PLAYER as u32
    }

    /// Distance of the farthest-back checker still in the home board.
    fn farthest_home_distance(&self, player: Player) -> Option<u8> {
        player
            .home_range()
            .filter(|&i| self.points[i as usize].is_owned_by(player))
            .map(|i| Self::distance_to_bear_off(player, i))
            .max()
    }

    /// The point `die` may bear a checker off from: the point at exactly
    /// that distance if occupied, otherwise the farthest-back checker when
    /// the die over-shoots every remaining one.
    pub fn bear_off_source(&self, player: Player, die: u8) -> Option<u8> {
        assert!((1..=6).contains(&die), "invalid die value {die}");
        if !self.bearing_off_allowed(player) {
            return None;
        }
        let exact = match player {
            Player::White => die - 1,
            Player::Black => 24 - die,
        };
        if self.points[exact as usize].is_owned_by(player) {
            return Some(exact);
        }
        let farthest = self.farthest_home_distance(player)?;
        (farthest < die).then(|| match player {
            Player::White => farthest - 1,
            Player::Black => 24 - farthest,
        })
    }

    pub fn can_bear_off_with_die(&self, player: Player, die: u8) -> bool {
        self.bear_off_source(player, die).is_some()
    }

    /// Decides where `player` would land by playing `die` from `from`,
    /// without touching the board.
    pub fn check_move(&self, player: Player, from: Position, die: u8) -> Result<Position, MoveError> {
        assert!((1..=6).contains(&die), "invalid die value {die}");
        match from {
            Position::Off => panic!("Cannot move from off the board"),
            Position::Bar => {
                if self.bar(player) == 0 {
                    return Err(MoveError::NothingOnBar(player));
                }
                let target = Self::enter_from_bar_target(player, die);
                if self.point_is_blocked(player, target as i8) {
                    return Err(MoveError::Blocked(Position::Board(target)));
                }
                Ok(Position::Board(target))
            }
            Position::Board(index) => {
                assert!(index < 24, "point index {index} out of range");
                if self.bar(player) > 0 {
                    return Err(MoveError::MustEnterFromBar(player));
                }
                if !self.points[index as usize].is_owned_by(player) {
                    return Err(MoveError::NoCheckerAt(player, from));
                }
                let dest = Self::destination_index(player, index, die);
                if (0..24).contains(&dest) {
                    if self.point_is_blocked(player, dest) {
                        return Err(MoveError::Blocked(Position::Board(dest as u8)));
                    }
                    return Ok(Position::Board(dest as u8));
                }
                if !self.bearing_off_allowed(player) {
                    return Err(MoveError::BearOffNotAllowed(player));
                }
                let distance = Self::distance_to_bear_off(player, index);
                debug_assert!(die >= distance);
                if die > distance && self.farthest_home_distance(player) > Some(distance) {
                    return Err(MoveError::FartherCheckerRemains(from));
                }
                Ok(Position::Off)
            }
        }
    }

    /// Plays one die for `player`, hitting a lone opposing checker on the
    /// landing point. On error nothing changes.
    pub fn move_checker(&mut self, player: Player, from: Position, die: u8) -> Result<HalfMove, MoveError> {
        let to = self.check_move(player, from, die)?;

        match from {
            Position::Bar => self.bar[player.slot()] -= 1,
            Position::Board(index) => self.remove_checker(index),
            Position::Off => unreachable!(),
        }
        let hit = match to {
            Position::Board(index) => self.add_checker(index, player),
            Position::Off => {
                self.borne_off[player.slot()] += 1;
                trace!(%player, %from, "bore off");
                false
            }
            Position::Bar => unreachable!(),
        };

        Ok(HalfMove::new(player, from, to, die, hit))
    }

    /// Reverses a half move that was the last one applied to this board.
    pub fn undo(&mut self, half_move: &HalfMove) {
        let player = half_move.player();
        match half_move.to() {
            Position::Board(index) => {
                self.remove_checker(index);
                if half_move.is_hit() {
                    let opponent = player.opposite();
                    self.bar[opponent.slot()] -= 1;
                    self.set_point(index, Some(opponent), 1);
                }
            }
            Position::Off => self.borne_off[player.slot()] -= 1,
            Position::Bar => panic!("Cannot move to the bar"),
        }
        match half_move.from() {
            Position::Bar => self.bar[player.slot()] += 1,
            Position::Board(index) => {
                let hit = self.add_checker(index, player);
                debug_assert!(!hit, "undo must not hit");
            }
            Position::Off => panic!("Cannot move from off the board"),
        }
    }

    fn remove_checker(&mut self, index: u8) {
        let point = self.points[index as usize];
        self.set_point(index, point.owner, point.count - 1);
    }

    /// Places a checker and reports whether a lone opposing checker was hit.
    fn add_checker(&mut self, index: u8, player: Player) -> bool {
        let point = self.points[index as usize];
        match point.owner {
            None => {
                self.set_point(index, Some(player), 1);
                false
            }
            Some(owner) if owner == player => {
                self.set_point(index, Some(player), point.count + 1);
                false
            }
            Some(owner) => {
                assert_eq!(point.count, 1, "cannot land on blocked point {}", index + 1);
                self.bar[owner.slot()] += 1;
                self.set_point(index, Some(player), 1);
                trace!(%player, point = index + 1, "hit");
                true
            }
        }
    }

    /// Checks the invariants a freshly loaded board must satisfy.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        for (index, point) in self.points.iter().enumerate() {
            if (point.count == 0) != point.owner.is_none() {
                return Err(SnapshotError::InconsistentPoint { index: index as u8 });
            }
        }
        for player in Player::ALL {
            let found = self.checker_total(player);
            if found != CHECKERS_PER_PLAYER as u32 {
                return Err(SnapshotError::CheckerCount { player, found });
            }
        }
        Ok(())
    }

    fn cell(&self, index: u8) -> String {
        let point = self.points[index as usize];
        match point.owner {
            Some(player) => format!("{}{}", player.symbol(), point.count),
            None => ".".to_string(),
        }
    }
}

/// Renders the board from White's side: points 13-24 on top, 12-1 below.
impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let top: Vec<u8> = (12..24).collect();
        let bottom: Vec<u8> = (0..12).rev().collect();

        self.write_row(f, &top, true)?;
        self.write_row(f, &top, false)?;
        let tray = format!(
            " bar W{} B{} | off W{} B{} ",
            self.bar(Player::White),
            self.bar(Player::Black),
            self.borne_off(Player::White),
            self.borne_off(Player::Black)
        );
        writeln!(f, "{:=^54}", tray)?;
        self.write_row(f, &bottom, false)?;
        self.write_row(f, &bottom, true)
    }
}

impl Board {
    fn write_row(&self, f: &mut std::fmt::Formatter<'_>, indices: &[u8], label: bool) -> std::fmt::Result {
        for (n, &index) in indices.iter().enumerate() {
            if n == 6 {
                write!(f, " |")?;
            }
            if label {
                write!(f, " {:>3}", index + 1)?;
            } else {
                write!(f, " {:>3}", self.cell(index))?;
            }
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(placements: &[(u8, Player, u8)]) -> Board {
        let mut board = Board::empty();
        for &(index, player, count) in placements {
            board.set_point(index, Some(player), count);
        }
        board
    }

    #[test]
    fn test_initial_layout() {
        let board = Board::new();
        assert_eq!(board.point(23), Point { owner: Some(Player::White), count: 2 });
        assert_eq!(board.point(12), Point { owner: Some(Player::White), count: 5 });
        assert_eq!(board.point(7), Point { owner: Some(Player::White), count: 3 });
        assert_eq!(board.point(5), Point { owner: Some(Player::White), count: 5 });
        assert_eq!(board.point(0), Point { owner: Some(Player::Black), count: 2 });
        assert_eq!(board.point(11), Point { owner: Some(Player::Black), count: 5 });
        assert_eq!(board.point(16), Point { owner: Some(Player::Black), count: 3 });
        assert_eq!(board.point(18), Point { owner: Some(Player::Black), count: 5 });
        for player in Player::ALL {
            assert_eq!(board.checker_total(player), 15);
            assert_eq!(board.bar(player), 0);
            assert_eq!(board.borne_off(player), 0);
        }
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_geometry() {
        assert_eq!(Board::destination_index(Player::White, 23, 6), 17);
        assert_eq!(Board::destination_index(Player::Black, 0, 6), 6);
        assert_eq!(Board::destination_index(Player::White, 2, 4), -2);
        assert_eq!(Board::destination_index(Player::Black, 21, 5), 26);
        assert_eq!(Board::enter_from_bar_target(Player::White, 1), 23);
        assert_eq!(Board::enter_from_bar_target(Player::White, 6), 18);
        assert_eq!(Board::enter_from_bar_target(Player::Black, 1), 0);
        assert_eq!(Board::enter_from_bar_target(Player::Black, 6), 5);
        assert_eq!(Board::distance_to_bear_off(Player::White, 0), 1);
        assert_eq!(Board::distance_to_bear_off(Player::Black, 23), 1);
        assert_eq!(Board::distance_to_bear_off(Player::Black, 18), 6);
    }

    #[test]
    fn test_entry_lines_up_with_movement() {
        // Entering with d lands where a checker one step "behind" the board would arrive.
        for die in 1..=6 {
            assert_eq!(Board::enter_from_bar_target(Player::White, die) as i8, 24 - die as i8);
            assert_eq!(Board::enter_from_bar_target(Player::Black, die) as i8, -1 + die as i8);
        }
    }

    #[test]
    fn test_blocking() {
        let board = Board::new();
        assert!(board.point_is_blocked(Player::White, 0));
        assert!(board.point_is_blocked(Player::White, 18));
        assert!(!board.point_is_blocked(Player::White, 5));
        assert!(!board.point_is_blocked(Player::White, 10));
        assert!(!board.point_is_blocked(Player::White, -1));
        assert!(!board.point_is_blocked(Player::Black, 24));

        let mut blocked = board;
        let err = blocked.move_checker(Player::White, Position::Board(23), 5).unwrap_err();
        assert_eq!(err, MoveError::Blocked(Position::Board(18)));
        assert_eq!(blocked, board);
    }

    #[test]
    fn test_hit_sends_checker_to_bar() {
        let mut board = only(&[(10, Player::White, 2), (7, Player::Black, 1)]);
        let before = board;
        let half_move = board.move_checker(Player::White, Position::Board(10), 3).unwrap();
        assert!(half_move.is_hit());
        assert_eq!(board.point(7), Point { owner: Some(Player::White), count: 1 });
        assert_eq!(board.point(10), Point { owner: Some(Player::White), count: 1 });
        assert_eq!(board.bar(Player::Black), 1);

        board.undo(&half_move);
        assert_eq!(board, before);
    }

    #[test]
    fn test_source_cleared_when_last_checker_leaves() {
        let mut board = only(&[(10, Player::Black, 1)]);
        board.move_checker(Player::Black, Position::Board(10), 2).unwrap();
        assert_eq!(board.point(10), Point::EMPTY);
        assert_eq!(board.point(12), Point { owner: Some(Player::Black), count: 1 });
    }

    #[test]
    fn test_wrong_owner_rejected() {
        let mut board = Board::new();
        let err = board.move_checker(Player::White, Position::Board(0), 1).unwrap_err();
        assert_eq!(err, MoveError::NoCheckerAt(Player::White, Position::Board(0)));
        let err = board.move_checker(Player::Black, Position::Board(3), 1).unwrap_err();
        assert_eq!(err, MoveError::NoCheckerAt(Player::Black, Position::Board(3)));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_bar_entry_and_precedence() {
        let mut board = Board::new();
        board.set_point(23, Some(Player::White), 1);
        board.set_bar(Player::White, 1);

        let err = board.move_checker(Player::White, Position::Board(12), 3).unwrap_err();
        assert_eq!(err, MoveError::MustEnterFromBar(Player::White));

        // Black holds index 18 with five checkers: entering with a 6 is blocked.
        let err = board.move_checker(Player::White, Position::Bar, 6).unwrap_err();
        assert_eq!(err, MoveError::Blocked(Position::Board(18)));

        let half_move = board.move_checker(Player::White, Position::Bar, 2).unwrap();
        assert_eq!(half_move.to(), Position::Board(22));
        assert_eq!(board.bar(Player::White), 0);
        assert_eq!(board.point(22), Point { owner: Some(Player::White), count: 1 });

        let err = board.move_checker(Player::White, Position::Bar, 2).unwrap_err();
        assert_eq!(err, MoveError::NothingOnBar(Player::White));
    }

    #[test]
    fn test_entry_hits_blot() {
        let mut board = only(&[(3, Player::White, 1), (20, Player::White, 14)]);
        board.set_bar(Player::Black, 1);
        board.set_point(10, Some(Player::Black), 14);
        let half_move = board.move_checker(Player::Black, Position::Bar, 4).unwrap();
        assert!(half_move.is_hit());
        assert_eq!(board.bar(Player::White), 1);
        assert_eq!(board.point(3), Point { owner: Some(Player::Black), count: 1 });
        assert_eq!(board.checker_total(Player::White), 15);
        assert_eq!(board.checker_total(Player::Black), 15);
    }

    #[test]
    fn test_bearing_off_gating() {
        let mut board = only(&[(0, Player::White, 5), (3, Player::White, 5), (5, Player::White, 4), (8, Player::White, 1)]);
        assert!(!board.bearing_off_allowed(Player::White));
        board.set_point(8, None, 0);
        board.set_point(5, Some(Player::White), 5);
        assert!(board.bearing_off_allowed(Player::White));
        board.set_point(5, Some(Player::White), 4);
        board.set_bar(Player::White, 1);
        assert!(!board.bearing_off_allowed(Player::White));
        board.set_bar(Player::White, 0);
        board.set_borne_off(Player::White, 1);
        assert!(board.bearing_off_allowed(Player::White));

        let err = Board::new().move_checker(Player::White, Position::Board(5), 6).unwrap_err();
        assert_eq!(err, MoveError::BearOffNotAllowed(Player::White));
    }

    #[test]
    fn test_bear_off_exact_and_overshoot() {
        // White: 3 on index 3 (distance 4), 12 already off.
        let mut board = only(&[(3, Player::White, 2), (1, Player::White, 1)]);
        board.set_borne_off(Player::White, 12);

        assert_eq!(board.bear_off_source(Player::White, 4), Some(3));
        assert_eq!(board.bear_off_source(Player::White, 6), Some(3));
        assert_eq!(board.bear_off_source(Player::White, 2), Some(1));
        assert_eq!(board.bear_off_source(Player::White, 3), None);
        assert!(!board.can_bear_off_with_die(Player::White, 3));

        let err = board.move_checker(Player::White, Position::Board(1), 6).unwrap_err();
        assert_eq!(err, MoveError::FartherCheckerRemains(Position::Board(1)));

        let half_move = board.move_checker(Player::White, Position::Board(3), 6).unwrap();
        assert_eq!(half_move.to(), Position::Off);
        assert_eq!(board.borne_off(Player::White), 13);
        assert_eq!(board.point(3).count, 1);

        // Moving inside the home board with a small die is still a normal move.
        board.move_checker(Player::White, Position::Board(3), 1).unwrap();
        assert_eq!(board.point(2), Point { owner: Some(Player::White), count: 1 });
    }

    #[test]
    fn test_black_bear_off() {
        let mut board = only(&[(22, Player::Black, 14), (19, Player::Black, 1)]);
        assert!(board.bearing_off_allowed(Player::Black));
        assert_eq!(board.bear_off_source(Player::Black, 2), Some(22));
        assert_eq!(board.bear_off_source(Player::Black, 6), Some(19));
        assert_eq!(board.bear_off_source(Player::Black, 4), None);
        board.move_checker(Player::Black, Position::Board(19), 5).unwrap();
        assert_eq!(board.borne_off(Player::Black), 1);
        assert_eq!(board.point(19), Point::EMPTY);
    }

    #[test]
    fn test_validate_catches_bad_counts() {
        let mut board = Board::new();
        board.set_borne_off(Player::Black, 1);
        assert!(matches!(
            board.validate(),
            Err(SnapshotError::CheckerCount { player: Player::Black, found: 16 })
        ));
    }

    #[test]
    fn test_display_lists_points() {
        let text = Board::new().to_string();
        assert!(text.contains("W2"));
        assert!(text.contains("B5"));
        assert!(text.contains("24"));
        assert!(text.contains("bar W0 B0"));
    }
}
