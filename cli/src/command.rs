use std::str::FromStr;

use sweeper_core::{Coord, Coord2, Preset};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    /// Restart, optionally switching difficulty
    NewGame(Option<Preset>),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, type `h` for help")]
    Unknown(String),
    #[error("Expected `ROW COL` after {0:?}")]
    MissingCoords(String),
    #[error("Invalid coordinate {0:?}")]
    InvalidCoord(String),
    #[error("Unknown difficulty {0:?}")]
    UnknownPreset(String),
    #[error("Unexpected argument {0:?}")]
    TrailingInput(String),
}

pub(crate) const HELP: &str = "\
commands:
  r ROW COL      reveal a cell
  f ROW COL      flag or unflag a cell
  n [PRESET]     new game (beginner, intermediate, expert)
  h              this help
  q              quit";

fn parse_coord(word: Option<&str>, verb: &str) -> Result<Coord, CommandError> {
    let word = word.ok_or_else(|| CommandError::MissingCoords(verb.to_owned()))?;
    word.parse()
        .map_err(|_| CommandError::InvalidCoord(word.to_owned()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?;

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal((
                parse_coord(words.next(), verb)?,
                parse_coord(words.next(), verb)?,
            )),
            "f" | "flag" => Command::Flag((
                parse_coord(words.next(), verb)?,
                parse_coord(words.next(), verb)?,
            )),
            "n" | "new" => match words.next() {
                Some(name) => Command::NewGame(Some(
                    name.parse()
                        .map_err(|_| CommandError::UnknownPreset(name.to_owned()))?,
                )),
                None => Command::NewGame(None),
            },
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(verb.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::TrailingInput(extra.to_owned())),
            None => Ok(command),
        }
    }
}
