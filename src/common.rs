//! Common types for the client: coordinates, cells, shot outcomes and board errors.

use core::fmt;

use crate::config::{
    BOARD_SIZE, HIT_SYMBOL, MISS_SYMBOL, SHIP_SYMBOL, SUNK_SYMBOL, WATER_SYMBOL,
};

/// A `(row, col)` position on a 10×10 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    /// Build a coordinate, refusing anything off the board.
    pub fn new(row: usize, col: usize) -> Result<Self, BoardError> {
        if row >= BOARD_SIZE as usize || col >= BOARD_SIZE as usize {
            return Err(BoardError::OutOfBounds { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Parse the wire form `row,col`.
    pub fn parse(text: &str) -> Option<Self> {
        let (row, col) = text.split_once(',')?;
        let row: usize = row.trim().parse().ok()?;
        let col: usize = col.trim().parse().ok()?;
        Self::new(row, col).ok()
    }

    /// Step `offset` cells along `orientation`, or `None` when that leaves the board.
    pub fn offset(self, orientation: Orientation, offset: usize) -> Option<Self> {
        let (row, col) = match orientation {
            Orientation::Horizontal => (self.row as usize, self.col as usize + offset),
            Orientation::Vertical => (self.row as usize + offset, self.col as usize),
        };
        Self::new(row, col).ok()
    }

    pub(crate) fn index(self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Wire letter used in SHIP_POS.
    pub fn letter(self) -> char {
        match self {
            Orientation::Horizontal => 'H',
            Orientation::Vertical => 'V',
        }
    }

    pub fn from_letter(text: &str) -> Option<Self> {
        match text.trim() {
            "H" | "h" => Some(Orientation::Horizontal),
            "V" | "v" => Some(Orientation::Vertical),
            _ => None,
        }
    }
}

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Water,
    Ship,
    Hit,
    Miss,
    Sunk,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Water => WATER_SYMBOL,
            Cell::Ship => SHIP_SYMBOL,
            Cell::Hit => HIT_SYMBOL,
            Cell::Miss => MISS_SYMBOL,
            Cell::Sunk => SUNK_SYMBOL,
        }
    }
}

/// Authoritative outcome of one of our shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Miss,
    Hit,
    Sunk,
}

impl ShotOutcome {
    /// Accepts the words used by the server (`HIT`, `MISS`, `SUNK`) and the
    /// single letters of the older coordinate-carrying results (`A`, `T`, `S`).
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "MISS" | "A" => Some(ShotOutcome::Miss),
            "HIT" | "T" => Some(ShotOutcome::Hit),
            "SUNK" | "S" => Some(ShotOutcome::Sunk),
            _ => None,
        }
    }

    /// The cell an opponent-view square takes once this outcome is known.
    pub fn cell(self) -> Cell {
        match self {
            ShotOutcome::Miss => Cell::Miss,
            ShotOutcome::Hit => Cell::Hit,
            ShotOutcome::Sunk => Cell::Sunk,
        }
    }
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotOutcome::Miss => write!(f, "MISS"),
            ShotOutcome::Hit => write!(f, "HIT"),
            ShotOutcome::Sunk => write!(f, "SUNK"),
        }
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate outside the 10×10 grid.
    OutOfBounds { row: usize, col: usize },
    /// Ship would run off the edge of the board.
    ShipOutOfBounds,
    /// Ship placement overlaps a cell that is not water.
    ShipOverlaps,
    /// Ships must occupy at least one cell.
    ZeroSizedShip,
    /// Random placement gave up.
    UnableToPlaceShip,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col } => {
                write!(f, "Coordinate ({}, {}) is off the board", row, col)
            }
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::ZeroSizedShip => write!(f, "Ship size must be positive"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
        }
    }
}
