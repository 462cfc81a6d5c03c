//! 10×10 board of cells, used both for the own board and the opponent view.

use core::fmt;
use rand::Rng;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::common::{BoardError, Cell, Coord, Orientation, ShotOutcome};
use crate::config::{BOARD_SIZE, RANDOM_PLACEMENT_ATTEMPTS};
use crate::ship::Ship;

const CELLS: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

/// Grid of cells plus the ships placed on it.
///
/// The opponent view is a `Board` with no ships; it only ever receives
/// `Miss`, `Hit` or `Sunk` through [`Board::record_shot_outcome`].
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELLS],
    ships: Vec<Ship>,
}

impl Board {
    /// Create an all-water board with no ships.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Water; CELLS],
            ships: Vec::new(),
        }
    }

    pub fn cell(&self, coord: Coord) -> Cell {
        self.cells[coord.index()]
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Number of cells currently in state `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// Place a ship; `false` means nothing was touched.
    pub fn place_ship(
        &mut self,
        name: &str,
        size: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> bool {
        self.try_place_ship(name, size, row, col, orientation).is_ok()
    }

    /// Place a ship, reporting why a placement was refused.
    pub fn try_place_ship(
        &mut self,
        name: &str,
        size: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let origin = Coord::new(row, col).map_err(|_| BoardError::ShipOutOfBounds)?;
        let ship = Ship::new(name, size, origin, orientation)?;
        if ship.cells().iter().any(|c| self.cell(*c) != Cell::Water) {
            return Err(BoardError::ShipOverlaps);
        }
        for coord in ship.cells() {
            self.cells[coord.index()] = Cell::Ship;
        }
        self.ships.push(ship);
        Ok(())
    }

    /// Returns a random in-bounds, non-overlapping origin and orientation for a ship of `size`.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        size: usize,
    ) -> Result<(Coord, Orientation), BoardError> {
        let board = BOARD_SIZE as usize;
        if size == 0 {
            return Err(BoardError::ZeroSizedShip);
        }
        if size > board {
            return Err(BoardError::ShipOutOfBounds);
        }
        for _ in 0..RANDOM_PLACEMENT_ATTEMPTS {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orient {
                Orientation::Horizontal => (board - 1, board - size),
                Orientation::Vertical => (board - size, board - 1),
            };
            let origin = Coord::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c))?;
            let fits = (0..size)
                .filter_map(|i| origin.offset(orient, i))
                .all(|c| self.cell(c) == Cell::Water);
            if fits {
                return Ok((origin, orient));
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Record the authoritative outcome of one of our shots on the opponent view.
    pub fn record_shot_outcome(&mut self, coord: Coord, outcome: ShotOutcome) {
        self.cells[coord.index()] = outcome.cell();
    }

    /// Mark an opponent shot on the own board. Returns the ship that was struck, if any.
    ///
    /// Sinking is not decided here; the server reports it.
    pub fn record_incoming_hit(&mut self, coord: Coord) -> Option<&Ship> {
        self.cells[coord.index()] = Cell::Hit;
        let idx = self.ships.iter().position(|s| s.occupies(coord))?;
        self.ships[idx].take_hit(coord);
        Some(&self.ships[idx])
    }

    /// Whether any placed ship still has an un-hit cell.
    pub fn has_living_ships(&self) -> bool {
        self.ships.iter().any(|s| !s.is_sunk())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for c in 0..BOARD_SIZE {
            write!(f, " {}", c)?;
        }
        writeln!(f)?;
        for r in 0..BOARD_SIZE as usize {
            write!(f, "{}", r)?;
            for c in 0..BOARD_SIZE as usize {
                write!(f, " {}", self.cells[r * BOARD_SIZE as usize + c].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  ship: {}, hit: {}, miss: {}, sunk: {},\n  ships: {:?}\n}}",
            self.count(Cell::Ship),
            self.count(Cell::Hit),
            self.count(Cell::Miss),
            self.count(Cell::Sunk),
            self.ships
        )
    }
}
