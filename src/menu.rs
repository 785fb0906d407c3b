//! Line-oriented text menu for playing at a terminal.
//!
//! Points are typed 1-based as printed on the board; `bar` names the bar.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use derive_more::{Display, Error};
use tracing::{debug, warn};

use crate::backgammon::{DieSource, Game, GameSnapshot, Position, TurnPhase};

pub const HELP: &str = "\
commands:
  roll                    roll the dice
  move <point|bar> <die>  move one checker by one die
  combine <point|bar> <a>+<b>
                          move one checker with two dice
  off <point> [die]       bear off (die picked automatically if omitted)
  sources <die>           list points that can play a die
  end                     end the turn
  show                    print the board
  save <file> / load <file>
  new                     start a new game
  help                    this text
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    Roll,
    Move { from: Position, die: u8 },
    Combine { from: Position, dice: [u8; 2] },
    BearOff { from: u8, die: Option<u8> },
    Sources { die: u8 },
    End,
    Show,
    Save(PathBuf),
    Load(PathBuf),
    New,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseError {
    #[display("empty command")]
    Empty,

    #[display("unknown command `{_0}`, try `help`")]
    Unknown(#[error(not(source))] String),

    #[display("missing {_0}")]
    MissingArgument(#[error(not(source))] &'static str),

    #[display("`{_0}` is not a point (1-24 or bar)")]
    BadPoint(#[error(not(source))] String),

    #[display("`{_0}` is not a die value (1-6)")]
    BadDie(#[error(not(source))] String),
}

fn parse_point(word: &str) -> Result<Position, ParseError> {
    if word.eq_ignore_ascii_case("bar") {
        return Ok(Position::Bar);
    }
    match word.parse::<u8>() {
        Ok(n @ 1..=24) => Ok(Position::Board(n - 1)),
        _ => Err(ParseError::BadPoint(word.to_string())),
    }
}

fn parse_die(word: &str) -> Result<u8, ParseError> {
    match word.parse::<u8>() {
        Ok(n @ 1..=6) => Ok(n),
        _ => Err(ParseError::BadDie(word.to_string())),
    }
}

impl MenuCommand {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        // "13,6" is accepted as well as "13 6".
        let line = line.replace(',', " ");
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ParseError::Empty);
        };
        let mut next = |what: &'static str| words.next().ok_or(ParseError::MissingArgument(what));

        let command = match verb.to_ascii_lowercase().as_str() {
            "roll" | "r" => MenuCommand::Roll,
            "move" | "m" => MenuCommand::Move {
                from: parse_point(next("point")?)?,
                die: parse_die(next("die")?)?,
            },
            "combine" | "c" => {
                let from = parse_point(next("point")?)?;
                let pair = next("dice")?;
                let (a, b) = pair
                    .split_once('+')
                    .ok_or_else(|| ParseError::BadDie(pair.to_string()))?;
                MenuCommand::Combine { from, dice: [parse_die(a)?, parse_die(b)?] }
            }
            "off" | "o" => {
                let from = match parse_point(next("point")?)? {
                    Position::Board(index) => index,
                    _ => return Err(ParseError::BadPoint("bar".to_string())),
                };
                let die = words.next().map(parse_die).transpose()?;
                MenuCommand::BearOff { from, die }
            }
            "sources" | "s" => MenuCommand::Sources { die: parse_die(next("die")?)? },
            "end" | "fin" | "e" => MenuCommand::End,
            "show" | "board" => MenuCommand::Show,
            "save" => MenuCommand::Save(PathBuf::from(next("file")?)),
            "load" => MenuCommand::Load(PathBuf::from(next("file")?)),
            "new" => MenuCommand::New,
            "help" | "?" => MenuCommand::Help,
            "quit" | "q" | "exit" => MenuCommand::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn status<S, W: Write>(game: &Game<S>, out: &mut W) -> std::io::Result<()> {
    let participant = game.current_participant();
    match game.phase() {
        TurnPhase::GameOver => writeln!(out, "game over: {:?}", game.outcome()),
        TurnPhase::AwaitingRoll => {
            writeln!(out, "{} ({}) to roll", participant.name(), game.current_player())
        }
        TurnPhase::Moving => writeln!(
            out,
            "{} ({}) to move, dice {}",
            participant.name(),
            game.current_player(),
            game.dice()
        ),
    }
}

/// Runs one command. Returns false when the session should end.
pub fn execute<S: DieSource, W: Write>(game: &mut Game<S>, command: MenuCommand, out: &mut W) -> std::io::Result<bool> {
    debug!(?command, "menu command");
    let played = match command {
        MenuCommand::Quit => return Ok(false),
        MenuCommand::Help => {
            writeln!(out, "{}", HELP)?;
            return Ok(true);
        }
        MenuCommand::Show => {
            write!(out, "{}", game.board())?;
            status(game, out)?;
            return Ok(true);
        }
        MenuCommand::Roll => {
            match game.roll_dice() {
                Ok(values) => writeln!(out, "rolled {:?}", values)?,
                Err(err) => writeln!(out, "cannot roll: {}", err)?,
            }
            None
        }
        MenuCommand::Move { from, die } => Some(game.try_move(from, die).map(|hm| hm.to_string())),
        MenuCommand::Combine { from, dice } => Some(
            game.try_combined_move(from, dice)
                .map(|[a, b]| format!("{} {}", a, b)),
        ),
        MenuCommand::BearOff { from, die } => Some(
            match die {
                Some(die) => game.try_bear_off(from, die),
                None => game.try_bear_off_click(from),
            }
            .map(|hm| hm.to_string()),
        ),
        MenuCommand::Sources { die } => {
            let sources = game.legal_single_sources(game.current_player(), die);
            let listed: Vec<String> = sources.iter().map(|p| p.to_string()).collect();
            writeln!(out, "a {} can be played from: {}", die, if listed.is_empty() { "nowhere".to_string() } else { listed.join(" ") })?;
            return Ok(true);
        }
        MenuCommand::End => {
            if let Err(err) = game.switch_turn() {
                writeln!(out, "{}", err)?;
            }
            None
        }
        MenuCommand::New => {
            game.reset();
            None
        }
        MenuCommand::Save(path) => {
            match game.snapshot().save(&path) {
                Ok(()) => writeln!(out, "saved to {}", path.display())?,
                Err(err) => writeln!(out, "{}", err)?,
            }
            return Ok(true);
        }
        MenuCommand::Load(path) => {
            match GameSnapshot::load(&path).and_then(|snapshot| game.restore(&snapshot)) {
                Ok(()) => writeln!(out, "loaded {}", path.display())?,
                Err(err) => {
                    warn!(%err, "load failed");
                    writeln!(out, "{}", err)?
                }
            }
            None
        }
    };

    match played {
        Some(Ok(text)) => writeln!(out, "played {}", text)?,
        Some(Err(err)) => writeln!(out, "illegal: {}", err)?,
        None => {}
    }
    if game.end_turn_if_needed() {
        writeln!(out, "turn passes to {}", game.current_player())?;
    }
    if let Some(winner) = game.winner() {
        writeln!(out, "{} wins ({} points)", game.participant(winner).name(), game.outcome().points())?;
    }
    status(game, out)?;
    Ok(true)
}

/// Reads commands from `input` until `quit` or end of input.
pub fn run<S: DieSource, R: BufRead, W: Write>(game: &mut Game<S>, input: R, out: &mut W) -> std::io::Result<()> {
    write!(out, "{}", game.board())?;
    status(game, out)?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match MenuCommand::parse(&line) {
            Ok(command) => {
                if !execute(game, command, out)? {
                    break;
                }
            }
            Err(err) => writeln!(out, "{}", err)?,
        }
        out.flush()?;
    }
    Ok(())
}
