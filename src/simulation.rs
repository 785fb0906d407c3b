//! Random self-play used to stress the rules engine.

use std::fmt::Display;

use hashbrown::HashMap;
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{debug, info, instrument};

use crate::backgammon::{CHECKERS_PER_PLAYER, Game, GameOutcome, Player, Position, RandomDie};

/// Result of one random game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub seed: u64,
    /// `Ongoing` when the turn limit was hit.
    pub outcome: GameOutcome,
    pub turns: u32,
}

#[derive(Debug, Clone, Default)]
pub struct SimulationReport {
    pub games: usize,
    pub tallies: HashMap<GameOutcome, usize>,
    pub total_turns: u64,
}

impl SimulationReport {
    fn add(mut self, record: GameRecord) -> Self {
        self.games += 1;
        self.total_turns += u64::from(record.turns);
        *self.tallies.entry(record.outcome).or_default() += 1;
        self
    }

    fn merge(mut self, other: SimulationReport) -> Self {
        self.games += other.games;
        self.total_turns += other.total_turns;
        for (outcome, count) in other.tallies {
            *self.tallies.entry(outcome).or_default() += count;
        }
        self
    }

    pub fn count(&self, outcome: GameOutcome) -> usize {
        self.tallies.get(&outcome).copied().unwrap_or(0)
    }

    pub fn wins(&self, player: Player) -> usize {
        self.tallies
            .iter()
            .filter(|(outcome, _)| outcome.winner() == Some(player))
            .map(|(_, count)| count)
            .sum()
    }

    pub fn unfinished(&self) -> usize {
        self.count(GameOutcome::Ongoing)
    }

    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games as f64
    }
}

impl Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Games: {}, unfinished: {}, average turns: {:.1}", self.games, self.unfinished(), self.average_turns())?;
        for player in Player::ALL {
            let wins = self.wins(player);
            let rate = if self.games == 0 { 0.0 } else { wins as f64 / self.games as f64 * 100.0 };
            writeln!(
                f,
                "{} wins: {} ({:.2}%), gammons: {}, backgammons: {}",
                player,
                wins,
                rate,
                self.count(GameOutcome::Gammon(player)),
                self.count(GameOutcome::Backgammon(player)),
            )?;
        }
        Ok(())
    }
}

fn assert_conserved<S>(game: &Game<S>) {
    for player in Player::ALL {
        assert_eq!(
            game.board().checker_total(player),
            u32::from(CHECKERS_PER_PLAYER),
            "{} lost track of a checker:\n{}",
            player,
            game.board()
        );
    }
}

/// Every (source, die) pair the active player could play right now.
fn playable<S>(game: &Game<S>) -> Vec<(Position, u8)> {
    let player = game.current_player();
    game.dice()
        .unique_values()
        .into_iter()
        .flat_map(|die| {
            game.legal_single_sources(player, die)
                .into_iter()
                .map(move |from| (from, die))
        })
        .collect()
}

/// Plays one game with random legal moves for both sides.
pub fn play_random_game(seed: u64, max_turns: u32) -> GameRecord {
    let mut game = Game::new(RandomDie::seeded(seed));
    let mut chooser = StdRng::seed_from_u64(seed.rotate_left(32) ^ 0x9E37_79B9_7F4A_7C15);
    let mut turns = 0;

    while !game.is_game_over() && turns < max_turns {
        if game.roll_dice().is_err() {
            break;
        }
        turns += 1;
        while !game.end_turn_if_needed() && !game.is_game_over() {
            let options = playable(&game);
            let Some(&(from, die)) = options.choose(&mut chooser) else {
                break;
            };
            if let Err(err) = game.try_move(from, die) {
                panic!("listed move {} with a {} was rejected: {}", from, die, err);
            }
            assert_conserved(&game);
        }
    }

    debug!(seed, turns, outcome = ?game.outcome(), "random game done");
    GameRecord { seed, outcome: game.outcome(), turns }
}

/// Plays `games` random games in parallel, game `i` seeded with `seed + i`.
#[instrument]
pub fn simulate(games: usize, seed: u64, max_turns: u32) -> SimulationReport {
    let report = (0..games as u64)
        .into_par_iter()
        .map(|index| play_random_game(seed.wrapping_add(index), max_turns))
        .fold(SimulationReport::default, SimulationReport::add)
        .reduce(SimulationReport::default, SimulationReport::merge);
    info!(games = report.games, unfinished = report.unfinished(), "simulation finished");
    report
}
