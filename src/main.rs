use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use backgammon::{
    backgammon::{Game, Player, RandomDie},
    config::Config,
    menu, simulation,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading config")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command.unwrap_or(Command::Play { white: None, black: None, seed: None }) {
        Command::Play { white, black, seed } => {
            let dice = match seed.or(config.seed) {
                Some(seed) => RandomDie::seeded(seed),
                None => RandomDie::from_entropy(),
            };
            let mut game = Game::with_names(
                white.unwrap_or(config.white_name),
                black.unwrap_or(config.black_name),
                dice,
            );
            info!("starting game");
            let mut out = BufWriter::new(io::stdout().lock());
            menu::run(&mut game, io::stdin().lock(), &mut out).context("terminal i/o")?;
            drop(out);
            for player in Player::ALL {
                let participant = game.participant(player);
                println!("{}: {} points", participant.name(), participant.score());
            }
        }
        Command::Simulate { games, seed, max_turns } => {
            let start = std::time::Instant::now();
            let report = simulation::simulate(games, seed.or(config.seed).unwrap_or(0), max_turns);
            print!("{}", report);
            println!("Simulation took: {:?}", start.elapsed());
        }
    }
    Ok(())
}
