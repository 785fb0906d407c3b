//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Play backgammon at the terminal or stress the engine with random games.
#[derive(Parser, Debug)]
#[command(name = "backgammon")]
#[command(about = "Two-player backgammon", long_about = None)]
pub struct Cli {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game through the text menu (default)
    Play {
        /// Name for White
        #[arg(long)]
        white: Option<String>,

        /// Name for Black
        #[arg(long)]
        black: Option<String>,

        /// Dice seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play random games and report the results
    Simulate {
        #[arg(short, long, default_value = "1000")]
        games: usize,

        /// Seed of the first game
        #[arg(long)]
        seed: Option<u64>,

        /// Turn limit before a game counts as unfinished
        #[arg(long, default_value = "2000")]
        max_turns: u32,
    },
}
