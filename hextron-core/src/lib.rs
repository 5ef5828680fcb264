//! HEXTRON Core - hex light-trail move-decision engine
//!
//! This crate provides the decision engine for a two-player, simultaneous
//! light-trail game on a trimmed hexagonal grid:
//! - Board geometry ((row, column) axial coordinates, diamond-trimmed region)
//! - Move model (turn-and-step actions, trails, terminal detection)
//! - Territory computation (turn-constrained shortest paths)
//! - Voronoi utility evaluation
//! - One-ply decision policy with deterministic tie-breaks
//!
//! The engine exposes one pure decision function over a validated snapshot;
//! the match loop, I/O and timing belong to the external driver.

pub mod ai;
pub mod board;
pub mod eval;
pub mod game;
pub mod territory;

// Re-exports for convenient access
pub use ai::{
    decide, decide_with_observer, Candidate, DecisionObserver, Snapshot, SnapshotError,
    DEFAULT_ACTION,
};
pub use board::{turned, Cell, ORIENTATION_NAMES, STEPS};
pub use eval::{utility, Evaluation, LOSS_SCORE};
pub use game::{
    apply_action, legal_actions, terminal, Action, Board, GameState, Player, ACTIONS,
    STANDARD_SIZE,
};
pub use territory::{distances_from, DistanceMap, UNREACHED};
