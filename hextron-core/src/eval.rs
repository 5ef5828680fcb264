//! Terminal-aware Voronoi territory evaluation

use crate::game::{GameState, Player};
use crate::territory::{distances_from, DistanceMap};

/// Base score for states where the controlled player has already lost.
/// Dominates any achievable territory differential.
pub const LOSS_SCORE: i32 = -127_000;

/// Evaluation of one candidate state
#[derive(Debug)]
pub struct Evaluation {
    /// Territory differential, or the loss-branch score
    pub score: i32,
    /// Distance maps for [controlled, opponent]; absent in the loss branch
    pub distances: Option<[DistanceMap; 2]>,
}

/// Score a state from the controlled player's (index 0) perspective.
///
/// A lost state scores [`LOSS_SCORE`] plus the trail-mark count, so forced
/// losses still prefer lines that filled more of the board first. Otherwise
/// the score is the number of cells the controlled player reaches strictly
/// sooner than the opponent, minus the number the opponent reaches strictly
/// sooner. Equidistant and mutually unreachable cells count for neither.
pub fn utility(state: &GameState) -> Evaluation {
    if state.is_terminal_for(Player::Red) {
        return Evaluation {
            score: LOSS_SCORE + state.board.occupied_count(),
            distances: None,
        };
    }

    let (ours, theirs) = both_distance_maps(state);

    let mut score = 0i32;
    for (&a, &b) in ours.values().iter().zip(theirs.values()) {
        if a < b {
            score += 1;
        } else if b < a {
            score -= 1;
        }
    }

    Evaluation {
        score,
        distances: Some([ours, theirs]),
    }
}

/// The two per-player territory computations are independent reads of the
/// same board snapshot; run them side by side when `parallel` is enabled.
#[cfg(feature = "parallel")]
fn both_distance_maps(state: &GameState) -> (DistanceMap, DistanceMap) {
    rayon::join(
        || distances_from(&state.board, state.positions[0], state.orientations[0]),
        || distances_from(&state.board, state.positions[1], state.orientations[1]),
    )
}

#[cfg(not(feature = "parallel"))]
fn both_distance_maps(state: &GameState) -> (DistanceMap, DistanceMap) {
    (
        distances_from(&state.board, state.positions[0], state.orientations[0]),
        distances_from(&state.board, state.positions[1], state.orientations[1]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::game::Board;

    /// Empty standard board, both players mirrored through the center
    fn mirrored_state() -> GameState {
        GameState::new(
            Board::standard(),
            [Cell::new(6, 2), Cell::new(6, 10)],
            [2, 5], // facing each other: E vs W
        )
    }

    #[test]
    fn test_mirrored_position_scores_zero() {
        let eval = utility(&mirrored_state());
        assert_eq!(eval.score, 0);
        assert!(eval.distances.is_some());
    }

    #[test]
    fn test_distance_maps_are_per_player() {
        let state = mirrored_state();
        let maps = utility(&state).distances.unwrap();
        assert_eq!(maps[0].get(state.positions[0]), 0);
        assert_eq!(maps[1].get(state.positions[1]), 0);
        assert!(maps[0].get(state.positions[1]) > 0);
    }

    #[test]
    fn test_territory_advantage_is_positive() {
        // Push the opponent toward the rim; the controlled player now
        // reaches more of the open board first
        let state = GameState::new(
            Board::standard(),
            [Cell::new(6, 6), Cell::new(12, 6)],
            [2, 2],
        );
        let eval = utility(&state);
        assert!(eval.score > 0, "score was {}", eval.score);
    }

    #[test]
    fn test_loss_branch_triggers_only_when_terminal() {
        let mut state = mirrored_state();
        assert!(utility(&state).score.abs() < LOSS_SCORE.abs());

        // Drop the controlled player onto a trail
        state.board.mark(state.positions[0], Player::Blue);
        let eval = utility(&state);
        assert!(eval.score <= LOSS_SCORE + state.board.occupied_count());
        assert!(eval.distances.is_none());
    }

    #[test]
    fn test_fuller_board_loses_less_badly() {
        let mut sparse = mirrored_state();
        sparse.board.mark(sparse.positions[0], Player::Blue);

        let mut full = sparse.clone();
        for col in 4..10 {
            full.board.mark(Cell::new(2, col), Player::Red);
        }

        assert!(utility(&full).score > utility(&sparse).score);
    }
}
