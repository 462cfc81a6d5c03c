//! Ships on the own board.

use core::fmt;

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use crate::common::{BoardError, Coord, Orientation};

/// Ship as announced by a PLACE_SHIP request: name and length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipRequest {
    pub name: String,
    pub size: usize,
}

impl ShipRequest {
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

impl fmt::Display for ShipRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (size {})", self.name, self.size)
    }
}

/// A placed ship. `cells` holds the coordinates not yet hit, so it shrinks
/// as hits land and is empty once the ship is sunk.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    name: String,
    size: usize,
    origin: Coord,
    orientation: Orientation,
    cells: Vec<Coord>,
}

impl Ship {
    /// Lay out a ship of `size` cells from `origin` along `orientation`.
    pub fn new(
        name: impl Into<String>,
        size: usize,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSizedShip);
        }
        let cells = (0..size)
            .map(|i| origin.offset(orientation, i))
            .collect::<Option<Vec<_>>>()
            .ok_or(BoardError::ShipOutOfBounds)?;
        Ok(Self {
            name: name.into(),
            size,
            origin,
            orientation,
            cells,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Coordinates still afloat, in placement order.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn occupies(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    /// Remove `coord` from the living cells. Returns `true` if it was one of them.
    pub fn take_hit(&mut self, coord: Coord) -> bool {
        match self.cells.iter().position(|c| *c == coord) {
            Some(idx) => {
                self.cells.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn is_sunk(&self) -> bool {
        self.cells.is_empty()
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", origin: ({}), orientation: {:?}, size: {}, afloat: {} }}",
            self.name,
            self.origin,
            self.orientation,
            self.size,
            self.cells.len(),
        )
    }
}
