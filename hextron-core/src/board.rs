//! Hex geometry with (row, column) axial coordinates

use serde::{Deserialize, Serialize};

/// Step vectors in axial coordinates (row-delta, col-delta)
/// Index: 0=NW, 1=NE, 2=E, 3=SE, 4=SW, 5=W
pub const STEPS: [(i8, i8); 6] = [
    (-1, 0),  // NW
    (-1, 1),  // NE
    (0, 1),   // E
    (1, 0),   // SE
    (1, -1),  // SW
    (0, -1),  // W
];

/// Orientation names for diagnostics
pub const ORIENTATION_NAMES: [&str; 6] = ["NW", "NE", "E", "SE", "SW", "W"];

/// Apply a relative turn to an orientation (mod 6)
pub fn turned(orientation: u8, turn: i8) -> u8 {
    (orientation as i8 + turn).rem_euclid(6) as u8
}

/// Axial (row, column) coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i8,
    pub col: i8,
}

impl Cell {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Neighbor in the given orientation (0-5)
    pub fn step(self, orientation: u8) -> Cell {
        let (dr, dc) = STEPS[orientation as usize % 6];
        Cell::new(self.row + dr, self.col + dc)
    }

    /// Hex-grid distance between two cells on the axial plane
    pub fn distance_to(self, other: Cell) -> i8 {
        let dr = (self.row - other.row).abs();
        let dc = (self.col - other.col).abs();
        let dd = ((self.row + self.col) - (other.row + other.col)).abs();
        (dr + dc + dd) / 2
    }
}
