//! One-ply decision policy with deterministic tie-breaks

use std::cmp::Reverse;

use thiserror::Error;

use crate::board::Cell;
use crate::eval::utility;
use crate::game::{Action, Board, GameState, Player};
use crate::territory::UNREACHED;

/// Returned when no legal action exists; the round is lost either way
pub const DEFAULT_ACTION: Action = 0;

/// Score penalty for ending the move within head-to-head range
const HEAD_ON_PENALTY: i32 = 50;

// ============================================================================
// SNAPSHOT (driver boundary)
// ============================================================================

/// Contract violations at the driver boundary
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("orientation {0} outside 0..6")]
    OrientationOutOfRange(u8),
    #[error("position ({row}, {col}) outside the hex region")]
    PositionOffBoard { row: i8, col: i8 },
}

/// Validated decision input.
///
/// The controlled player is index 0 of both arrays; coordinates are the
/// internal (row, column) convention. Past construction the decision path
/// is pure and total.
#[derive(Clone, Debug)]
pub struct Snapshot {
    state: GameState,
}

impl Snapshot {
    /// Build from internal (row, column) coordinates
    pub fn new(
        board: Board,
        positions: [Cell; 2],
        orientations: [u8; 2],
    ) -> Result<Self, SnapshotError> {
        for &orientation in &orientations {
            if orientation >= 6 {
                return Err(SnapshotError::OrientationOutOfRange(orientation));
            }
        }
        for &position in &positions {
            if !board.valid(position) {
                return Err(SnapshotError::PositionOffBoard {
                    row: position.row,
                    col: position.col,
                });
            }
        }
        Ok(Self {
            state: GameState::new(board, positions, orientations),
        })
    }

    /// Build from driver coordinates.
    ///
    /// The driver supplies positions in (x, y) column-major order; this
    /// constructor is the only place the axes are swapped to the internal
    /// (row, column) convention.
    pub fn from_driver(
        board: Board,
        positions_xy: [(i8, i8); 2],
        orientations: [u8; 2],
    ) -> Result<Self, SnapshotError> {
        let positions = [
            Cell::new(positions_xy[0].1, positions_xy[0].0),
            Cell::new(positions_xy[1].1, positions_xy[1].0),
        ];
        Self::new(board, positions, orientations)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}

// ============================================================================
// CANDIDATES
// ============================================================================

/// A legal action scored by one-ply lookahead
#[derive(Clone, Copy, Debug)]
pub struct Candidate {
    pub action: Action,
    /// Territory differential, head-on penalty applied
    pub score: i32,
    /// Controlled player's legal-action count after the move
    pub future_moves: usize,
    /// Controlled player's path distance to the board center after the move
    pub center_distance: u32,
}

impl Candidate {
    /// Lexicographic ranking: score high, then few future moves (fill the
    /// board tightly), then close to the center. Higher key wins.
    fn rank_key(&self) -> (i32, Reverse<usize>, Reverse<u32>) {
        (
            self.score,
            Reverse(self.future_moves),
            Reverse(self.center_distance),
        )
    }
}

/// Strictly-better comparison; equal keys keep the incumbent, so the
/// canonical enumeration order breaks residual ties
fn improves(challenger: &Candidate, incumbent: &Candidate) -> bool {
    challenger.rank_key() > incumbent.rank_key()
}

// ============================================================================
// OBSERVER
// ============================================================================

/// Driver-side diagnostics hook; every method defaults to a no-op.
/// The decision function itself never prints or takes timestamps.
pub trait DecisionObserver {
    fn candidate(&mut self, _candidate: &Candidate) {}
    fn decided(&mut self, _action: Action) {}
}

struct Quiet;

impl DecisionObserver for Quiet {}

// ============================================================================
// DECISION
// ============================================================================

/// Choose the controlled player's next action. Stateless across rounds.
pub fn decide(snapshot: &Snapshot) -> Action {
    decide_with_observer(snapshot, &mut Quiet)
}

/// [`decide`], reporting every scored candidate to the observer
pub fn decide_with_observer(snapshot: &Snapshot, observer: &mut dyn DecisionObserver) -> Action {
    let state = snapshot.state();
    let mut best: Option<Candidate> = None;

    for action in state.legal_actions_for(Player::Red) {
        let candidate = evaluate_candidate(state, action);
        observer.candidate(&candidate);

        let take = match &best {
            None => true,
            Some(incumbent) => improves(&candidate, incumbent),
        };
        if take {
            best = Some(candidate);
        }
    }

    let action = best.map(|c| c.action).unwrap_or(DEFAULT_ACTION);
    observer.decided(action);
    action
}

/// Simulate one legal action and score the resulting state
fn evaluate_candidate(state: &GameState, action: Action) -> Candidate {
    let next = state.apply_move(Player::Red, action);
    let eval = utility(&next);

    let mut score = eval.score;
    if next.positions[0].distance_to(next.positions[1]) <= 1 {
        // Anti-suicide bias: moving into head-to-head range risks a
        // simultaneous crash the one-ply evaluation cannot see
        score -= HEAD_ON_PENALTY;
    }

    let future_moves = next.legal_actions_for(Player::Red).len();
    let center_distance = eval
        .distances
        .as_ref()
        .map(|maps| maps[0].get(next.board.center()))
        .unwrap_or(UNREACHED);

    Candidate {
        action,
        score,
        future_moves,
        center_distance,
    }
}

// ============================================================================
// TESTS
// ============================================================================
