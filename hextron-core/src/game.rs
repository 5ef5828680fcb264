//! Trail board, move model, and lookahead state

use crate::board::{turned, Cell};
use serde::{Deserialize, Serialize};

/// Side length of the standard board
pub const STANDARD_SIZE: i8 = 13;

/// A relative turn in [-2, 2], applied to the orientation before stepping.
/// The two encodings of a 180-degree reversal (+3/-3) are outside the range:
/// a rider can never reverse into its own trail head-on.
pub type Action = i8;

/// Canonical action enumeration order; tie-breaks depend on it
pub const ACTIONS: [Action; 5] = [-2, -1, 0, 1, 2];

/// Player identity, index into the board's trail layers.
/// Index 0 is the controlled player in every snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Red = 0,
    Blue = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Trail occupancy over the trimmed hexagonal region.
///
/// The region is carved out of a `size` x `size` square by a diamond
/// constraint on the diagonal sum (see [`Board::valid`]). Cells hold a
/// bitmask of player trails; marks are append-only within a match. Cloning
/// the board is the copy-on-write unit for candidate simulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: i8,
    cells: Vec<u8>,
}

impl Board {
    /// Empty board with the given side length
    pub fn new(size: i8) -> Self {
        assert!(size >= 3, "board side must be at least 3, got {}", size);
        Self {
            size,
            cells: vec![0; size as usize * size as usize],
        }
    }

    /// Empty board of the reference deployment size
    pub fn standard() -> Self {
        Self::new(STANDARD_SIZE)
    }

    pub fn size(&self) -> i8 {
        self.size
    }

    /// Center of the hex region
    pub fn center(&self) -> Cell {
        Cell::new(self.size / 2, self.size / 2)
    }

    /// Check if a cell lies inside the hexagonal playing field:
    /// inside the square bounds, with the corners cut off by the
    /// diagonal-sum constraint `size/2 <= row + col < size + size/2`.
    pub fn valid(&self, cell: Cell) -> bool {
        let s = self.size;
        cell.col >= 0
            && cell.col < s
            && cell.row >= 0
            && cell.row < s
            && cell.row + cell.col >= s / 2
            && cell.row + cell.col < s + s / 2
    }

    fn index(&self, cell: Cell) -> usize {
        debug_assert!(self.valid(cell), "indexed access to invalid cell {:?}", cell);
        cell.row as usize * self.size as usize + cell.col as usize
    }

    /// True iff no player has left a trail on the cell.
    /// Must only be called on valid cells.
    pub fn is_free(&self, cell: Cell) -> bool {
        self.cells[self.index(cell)] == 0
    }

    /// True iff the given player has left a trail on the cell
    pub fn marked_by(&self, cell: Cell, player: Player) -> bool {
        self.cells[self.index(cell)] & (1 << player.index()) != 0
    }

    /// Permanently mark a cell as part of a player's trail
    pub fn mark(&mut self, cell: Cell, player: Player) {
        let i = self.index(cell);
        self.cells[i] |= 1 << player.index();
    }

    /// Total number of trail marks on the board
    pub fn occupied_count(&self) -> i32 {
        self.cells.iter().map(|m| m.count_ones() as i32).sum()
    }

    /// Iterate all valid cells of the hex region
    pub fn iter_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let s = self.size;
        (0..s)
            .flat_map(move |row| (0..s).map(move |col| Cell::new(row, col)))
            .filter(move |&c| self.valid(c))
    }
}

// ============================================================================
// MOVE MODEL
// ============================================================================

/// True iff a player sitting at `cell` has lost: off the board, or on
/// any trail (its own or the opponent's)
pub fn terminal(board: &Board, cell: Cell) -> bool {
    !board.valid(cell) || !board.is_free(cell)
}

/// Apply a relative turn, then step one cell in the new orientation
pub fn apply_action(cell: Cell, orientation: u8, action: Action) -> (Cell, u8) {
    let new_orientation = turned(orientation, action);
    (cell.step(new_orientation), new_orientation)
}

/// Actions whose destination cell is on the board and trail-free,
/// enumerated in canonical order
pub fn legal_actions(board: &Board, cell: Cell, orientation: u8) -> Vec<Action> {
    ACTIONS
        .iter()
        .copied()
        .filter(|&action| {
            let (dest, _) = apply_action(cell, orientation, action);
            board.valid(dest) && board.is_free(dest)
        })
        .collect()
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Ephemeral lookahead state (clone to mutate).
///
/// Candidate states created during move selection are scored and discarded;
/// nothing survives past the returned action.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub positions: [Cell; 2],
    pub orientations: [u8; 2],
}

impl GameState {
    pub fn new(board: Board, positions: [Cell; 2], orientations: [u8; 2]) -> Self {
        Self {
            board,
            positions,
            orientations,
        }
    }

    /// Leave a trail on the player's current cell, then turn and step.
    /// Returns a new state; the receiver is never mutated.
    pub fn apply_move(&self, player: Player, action: Action) -> Self {
        let mut next = self.clone();
        let i = player.index();
        next.board.mark(next.positions[i], player);
        let (position, orientation) =
            apply_action(next.positions[i], next.orientations[i], action);
        next.positions[i] = position;
        next.orientations[i] = orientation;
        next
    }

    /// Legal actions for one player in this state
    pub fn legal_actions_for(&self, player: Player) -> Vec<Action> {
        let i = player.index();
        legal_actions(&self.board, self.positions[i], self.orientations[i])
    }

    /// True iff the player's current position is a losing one
    pub fn is_terminal_for(&self, player: Player) -> bool {
        terminal(&self.board, self.positions[player.index()])
    }
}

// ============================================================================
// TESTS
// ============================================================================
