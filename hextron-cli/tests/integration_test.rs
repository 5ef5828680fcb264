//! Integration tests for the HEXTRON engine
//!
//! Tests the full stack the way the driver uses it: snapshot construction,
//! decisions for both riders, simultaneous advancement, and terminal rules.

use std::time::Instant;

use hextron_core::{
    apply_action, decide, legal_actions, terminal, turned, Action, Board, Cell, Player, Snapshot,
    DEFAULT_ACTION,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Outcome of a driver-ruled self-play game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    RedWins,
    BlueWins,
    Draw,
    RoundLimit,
}

/// Drive a full game with the engine on both sides, enforcing the
/// simultaneous-advance rules the way an external driver would
fn drive_game(
    mut board: Board,
    mut positions: [Cell; 2],
    mut orientations: [u8; 2],
    max_rounds: u32,
) -> (Outcome, u32) {
    for round in 1..=max_rounds {
        let red_view = Snapshot::new(
            board.clone(),
            [positions[0], positions[1]],
            [orientations[0], orientations[1]],
        )
        .unwrap();
        let blue_view = Snapshot::new(
            board.clone(),
            [positions[1], positions[0]],
            [orientations[1], orientations[0]],
        )
        .unwrap();

        let red_action = decide(&red_view);
        let blue_action = decide(&blue_view);

        board.mark(positions[0], Player::Red);
        board.mark(positions[1], Player::Blue);

        let (red_pos, red_orient) = apply_action(positions[0], orientations[0], red_action);
        let (blue_pos, blue_orient) = apply_action(positions[1], orientations[1], blue_action);

        let head_on = red_pos == blue_pos;
        let red_dead = head_on || terminal(&board, red_pos);
        let blue_dead = head_on || terminal(&board, blue_pos);

        match (red_dead, blue_dead) {
            (true, true) => return (Outcome::Draw, round),
            (true, false) => return (Outcome::BlueWins, round),
            (false, true) => return (Outcome::RedWins, round),
            (false, false) => {}
        }

        positions = [red_pos, blue_pos];
        orientations = [red_orient, blue_orient];
    }

    (Outcome::RoundLimit, max_rounds)
}

fn mirrored_start() -> (Board, [Cell; 2], [u8; 2]) {
    (
        Board::standard(),
        [Cell::new(6, 2), Cell::new(6, 10)],
        [2, 5],
    )
}

// ============================================================================
// FULL-GAME TESTS
// ============================================================================

#[test]
fn test_self_play_game_ends() {
    let (board, positions, orientations) = mirrored_start();
    let (outcome, rounds) = drive_game(board, positions, orientations, 300);

    // The board has 127 cells; two riders marking one each per round must
    // run out long before the limit
    assert_ne!(outcome, Outcome::RoundLimit);
    assert!(rounds > 1, "game over in the opening round");
    println!("Self-play: {:?} in {} rounds", outcome, rounds);
}

#[test]
fn test_self_play_fills_substantial_territory() {
    let (board, positions, orientations) = mirrored_start();
    let (_, rounds) = drive_game(board, positions, orientations, 300);

    // A territory-driven rider should survive well past a random walk
    assert!(rounds >= 10, "engine crashed after only {} rounds", rounds);
}

#[test]
fn test_randomized_starts_all_terminate() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let board = Board::standard();

    for _ in 0..5 {
        let (red, blue) = loop {
            let red = Cell::new(rng.gen_range(0..13), rng.gen_range(0..13));
            let blue = Cell::new(12 - red.row, 12 - red.col);
            if board.valid(red) && red.distance_to(blue) >= 4 {
                break (red, blue);
            }
        };
        let orient = rng.gen_range(0..6u8);

        let (outcome, _) = drive_game(
            board.clone(),
            [red, blue],
            [orient, turned(orient, 3)],
            300,
        );
        assert_ne!(outcome, Outcome::RoundLimit);
    }
}

#[test]
fn test_engine_decisions_always_legal_until_trapped() {
    let (mut board, mut positions, mut orientations) = mirrored_start();

    for _ in 0..200 {
        let view = Snapshot::new(
            board.clone(),
            [positions[0], positions[1]],
            [orientations[0], orientations[1]],
        )
        .unwrap();
        let action = decide(&view);

        let legal = legal_actions(&board, positions[0], orientations[0]);
        if legal.is_empty() {
            assert_eq!(action, DEFAULT_ACTION);
            break;
        }
        assert!(legal.contains(&action), "illegal action {} chosen", action);

        // Walk red forward against a frozen opponent
        board.mark(positions[0], Player::Red);
        let (pos, orient) = apply_action(positions[0], orientations[0], action);
        if terminal(&board, pos) {
            break;
        }
        positions[0] = pos;
        orientations[0] = orient;
    }
}

// ============================================================================
// LATENCY
// ============================================================================

#[test]
fn test_decision_latency_on_open_board() {
    let (board, positions, orientations) = mirrored_start();
    let snapshot = Snapshot::new(board, positions, orientations).unwrap();

    // Warm-up, then measure the worst (emptiest) board
    let _ = decide(&snapshot);
    let start = Instant::now();
    let iterations = 20;
    for _ in 0..iterations {
        let _ = decide(&snapshot);
    }
    let avg = start.elapsed() / iterations;

    println!("Avg decision time on open board: {:?}", avg);
    assert!(avg.as_millis() < 1000, "decision took {:?}", avg);
}

// ============================================================================
// DRIVER-CONTRACT TESTS
// ============================================================================

#[test]
fn test_driver_coordinate_convention_round_trip() {
    // The driver hands in (x, y); a rider at column 2, row 6 must behave
    // exactly like the internal (row 6, col 2) rider
    let via_driver = Snapshot::from_driver(
        Board::standard(),
        [(2, 6), (10, 6)],
        [2, 5],
    )
    .unwrap();
    let internal = Snapshot::new(
        Board::standard(),
        [Cell::new(6, 2), Cell::new(6, 10)],
        [2, 5],
    )
    .unwrap();

    assert_eq!(via_driver.state().positions, internal.state().positions);
    assert_eq!(decide(&via_driver), decide(&internal));
}

#[test]
fn test_returned_action_is_a_relative_turn() {
    let (board, positions, orientations) = mirrored_start();
    let snapshot = Snapshot::new(board, positions, orientations).unwrap();

    let action: Action = decide(&snapshot);
    assert!((-2..=2).contains(&action));
}
