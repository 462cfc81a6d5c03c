//! Parsing of locally typed commands.
//!
//! Placement lines are `row col orientation` and shot lines `row col`; the
//! fields may be separated by whitespace or commas. Nothing parsed here is
//! ever sent before it has been validated.

use core::fmt;

#[cfg(not(feature = "std"))]
use alloc::{string::{String, ToString}, vec::Vec};

use crate::common::{BoardError, Coord, Orientation};
use crate::config::BOARD_SIZE;

/// A validated local command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalCommand {
    Place { at: Coord, orientation: Orientation },
    /// Empty placement line: let the client pick a spot.
    PlaceRandom,
    Shoot(Coord),
    Surrender,
}

/// Why a line of local input was refused. The player is simply asked again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// No input is being asked for right now.
    NotExpected,
    Empty,
    MissingField,
    TooManyFields,
    NotANumber(String),
    OutOfRange { row: usize, col: usize },
    BadOrientation(String),
    Placement(BoardError),
    AlreadyTargeted(Coord),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max = BOARD_SIZE - 1;
        match self {
            InputError::NotExpected => write!(f, "No input expected right now"),
            InputError::Empty => write!(f, "Please enter a row and a column"),
            InputError::MissingField => write!(f, "Missing a field"),
            InputError::TooManyFields => write!(f, "Too many fields"),
            InputError::NotANumber(text) => {
                write!(f, "'{}' is not a number between 0 and {}", text, max)
            }
            InputError::OutOfRange { row, col } => {
                write!(f, "({}, {}) is outside the board (0-{})", row, col, max)
            }
            InputError::BadOrientation(text) => {
                write!(f, "Invalid orientation '{}' - use H or V", text)
            }
            InputError::Placement(e) => write!(f, "{}", e),
            InputError::AlreadyTargeted(at) => write!(f, "You already fired at {}", at),
        }
    }
}

fn fields(line: &str) -> Vec<&str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_index(text: &str) -> Result<usize, InputError> {
    text.parse()
        .map_err(|_| InputError::NotANumber(text.to_string()))
}

fn parse_coord(row: &str, col: &str) -> Result<Coord, InputError> {
    let (row, col) = (parse_index(row)?, parse_index(col)?);
    Coord::new(row, col).map_err(|_| InputError::OutOfRange { row, col })
}

/// Parse a placement answer: `row col H|V`, or an empty line for random placement.
pub fn parse_placement(line: &str) -> Result<LocalCommand, InputError> {
    match fields(line).as_slice() {
        [] => Ok(LocalCommand::PlaceRandom),
        [_] | [_, _] => Err(InputError::MissingField),
        [row, col, orientation] => {
            let at = parse_coord(row, col)?;
            let orientation = Orientation::from_letter(orientation)
                .ok_or_else(|| InputError::BadOrientation(orientation.to_string()))?;
            Ok(LocalCommand::Place { at, orientation })
        }
        _ => Err(InputError::TooManyFields),
    }
}

/// Parse a turn answer: `row col`, or `q` / `quit` / `surrender`.
pub fn parse_turn(line: &str) -> Result<LocalCommand, InputError> {
    let trimmed = line.trim();
    if ["q", "quit", "surrender"]
        .iter()
        .any(|word| trimmed.eq_ignore_ascii_case(word))
    {
        return Ok(LocalCommand::Surrender);
    }
    match fields(trimmed).as_slice() {
        [] => Err(InputError::Empty),
        [_] => Err(InputError::MissingField),
        [row, col] => parse_coord(row, col).map(LocalCommand::Shoot),
        _ => Err(InputError::TooManyFields),
    }
}
