//! Turn-constrained shortest paths from a single (position, orientation)

use crate::board::Cell;
use crate::game::{apply_action, Board, ACTIONS};
use rustc_hash::FxHashSet;

/// Sentinel distance for cells no turn-constrained path reaches.
/// Strictly greater than any real distance.
pub const UNREACHED: u32 = u32::MAX;

/// Per-cell minimum move counts from one source
#[derive(Clone, Debug)]
pub struct DistanceMap {
    size: i8,
    dist: Vec<u32>,
}

impl DistanceMap {
    fn new(size: i8) -> Self {
        Self {
            size,
            dist: vec![UNREACHED; size as usize * size as usize],
        }
    }

    fn index(&self, cell: Cell) -> usize {
        debug_assert!(
            cell.row >= 0 && cell.row < self.size && cell.col >= 0 && cell.col < self.size,
            "distance lookup outside the grid: {:?}",
            cell
        );
        cell.row as usize * self.size as usize + cell.col as usize
    }

    /// Minimum number of moves to reach the cell, or [`UNREACHED`]
    pub fn get(&self, cell: Cell) -> u32 {
        self.dist[self.index(cell)]
    }

    fn set(&mut self, cell: Cell, distance: u32) {
        let i = self.index(cell);
        self.dist[i] = distance;
    }

    /// Raw row-major distances; cells outside the hex region stay [`UNREACHED`]
    pub fn values(&self) -> &[u32] {
        &self.dist
    }
}

/// Minimum number of moves from `(start, orientation)` to every free cell.
///
/// The motion graph has (cell, orientation) nodes and one unit-cost edge per
/// non-reversal action. Distances are tracked per *cell*; the work set is an
/// unordered collection of frontier nodes. Popping in arbitrary order is
/// sound because an improved cell distance always re-inserts the successor
/// node, so the relaxation runs to fixpoint (label-correcting, not BFS).
pub fn distances_from(board: &Board, start: Cell, orientation: u8) -> DistanceMap {
    debug_assert!(board.valid(start), "territory source off the board: {:?}", start);

    let mut map = DistanceMap::new(board.size());
    map.set(start, 0);

    let mut work: FxHashSet<(Cell, u8)> = FxHashSet::default();
    work.insert((start, orientation));

    loop {
        // Arbitrary pop: the set is unordered on purpose
        let node = match work.iter().next() {
            Some(&node) => node,
            None => break,
        };
        work.remove(&node);
        let (cell, facing) = node;
        // Re-read at pop time: the cell may have improved since insertion
        let here = map.get(cell);

        for &action in &ACTIONS {
            let (next, next_facing) = apply_action(cell, facing, action);
            if !board.valid(next) || !board.is_free(next) {
                continue;
            }
            let cost = here + 1;
            if cost < map.get(next) {
                map.set(next, cost);
                work.insert((next, next_facing));
            }
        }
    }

    map
}
