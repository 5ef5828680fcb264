//! Play command - self-play matches between two engine instances
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), advance_round(), compute_match_statistics()
//! - Level 4: starting positions, observer, formatting utilities

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hextron_core::{
    apply_action, decide, decide_with_observer, terminal, turned, Action, Board, Candidate, Cell,
    DecisionObserver, Player, Snapshot, ORIENTATION_NAMES,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Board side length
    #[arg(long, default_value = "13")]
    pub size: i8,

    /// Maximum rounds per game before calling a draw
    #[arg(long, default_value = "200")]
    pub max_rounds: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Outcome of one game, from the driver's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    RedWins,
    BlueWins,
    Draw,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    outcome: Outcome,
    rounds: u32,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    red_wins: usize,
    blue_wins: usize,
    draws: usize,
    avg_rounds: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting self-play: {} games on a size-{} board",
        args.games,
        args.size
    );

    let results = play_match(&args, seed)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match
fn play_match(args: &PlayArgs, seed: Option<u64>) -> Result<MatchResults> {
    let mut rng = create_rng(seed);
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        let record = play_single_game(game_num + 1, args, &mut rng)?;

        tracing::info!(
            "Game {}: {:?} ({} rounds)",
            record.game_number,
            record.outcome,
            record.rounds
        );

        games.push(record);
    }

    Ok(compute_match_statistics(games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &PlayArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play a single game: both riders are driven by the same engine.
///
/// The driver owns the rules the engine does not: simultaneous advancement,
/// trail bookkeeping, and loss/draw classification per round.
fn play_single_game(game_number: usize, args: &PlayArgs, rng: &mut ChaCha8Rng) -> Result<GameRecord> {
    let mut board = Board::new(args.size);
    let (mut positions, mut orientations) = starting_placement(&board, rng);

    tracing::debug!(
        "Game {} start: red {:?} {}, blue {:?} {}",
        game_number,
        positions[0],
        ORIENTATION_NAMES[orientations[0] as usize],
        positions[1],
        ORIENTATION_NAMES[orientations[1] as usize]
    );

    let mut rounds = 0;
    let outcome = loop {
        if rounds >= args.max_rounds {
            break Outcome::Draw;
        }
        rounds += 1;

        // Each side sees itself as the controlled player (index 0)
        let red_view = Snapshot::new(
            board.clone(),
            [positions[0], positions[1]],
            [orientations[0], orientations[1]],
        )?;
        let blue_view = Snapshot::new(
            board.clone(),
            [positions[1], positions[0]],
            [orientations[1], orientations[0]],
        )?;

        let mut observer = TraceObserver { round: rounds };
        let red_action = decide_with_observer(&red_view, &mut observer);
        let blue_action = decide(&blue_view);

        if let Some(outcome) = advance_round(
            &mut board,
            &mut positions,
            &mut orientations,
            [red_action, blue_action],
        ) {
            break outcome;
        }
    };

    Ok(GameRecord {
        game_number,
        outcome,
        rounds,
    })
}

/// Advance both riders simultaneously and classify the round.
///
/// Current cells become permanent trail, then both step. A rider loses by
/// leaving the board, landing on any trail, or meeting the opponent on the
/// same cell; both losing in the same round is a draw.
fn advance_round(
    board: &mut Board,
    positions: &mut [Cell; 2],
    orientations: &mut [u8; 2],
    actions: [Action; 2],
) -> Option<Outcome> {
    board.mark(positions[0], Player::Red);
    board.mark(positions[1], Player::Blue);

    let (red_pos, red_orient) = apply_action(positions[0], orientations[0], actions[0]);
    let (blue_pos, blue_orient) = apply_action(positions[1], orientations[1], actions[1]);

    *positions = [red_pos, blue_pos];
    *orientations = [red_orient, blue_orient];

    let head_on = red_pos == blue_pos;
    let red_dead = head_on || terminal(board, red_pos);
    let blue_dead = head_on || terminal(board, blue_pos);

    match (red_dead, blue_dead) {
        (true, true) => Some(Outcome::Draw),
        (true, false) => Some(Outcome::BlueWins),
        (false, true) => Some(Outcome::RedWins),
        (false, false) => None,
    }
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let red_wins = games.iter().filter(|g| g.outcome == Outcome::RedWins).count();
    let blue_wins = games
        .iter()
        .filter(|g| g.outcome == Outcome::BlueWins)
        .count();
    let draws = games.iter().filter(|g| g.outcome == Outcome::Draw).count();

    let total_rounds: u32 = games.iter().map(|g| g.rounds).sum();
    let avg_rounds = if games.is_empty() {
        0.0
    } else {
        total_rounds as f32 / games.len() as f32
    };

    MatchResults {
        games,
        red_wins,
        blue_wins,
        draws,
        avg_rounds,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Preferred hex distance between starting positions
const START_DISTANCE: i8 = 4;

/// Mirrored starting placement: a random valid cell for red, point-mirrored
/// through the board center for blue, facing opposite directions.
///
/// Small boards cannot separate a mirrored pair by the full margin (the
/// largest mirrored distance on a size-3 board is 2), so the floor shrinks
/// with the board; a mirrored pair at distance >= 2 exists for every
/// accepted size.
fn starting_placement(board: &Board, rng: &mut ChaCha8Rng) -> ([Cell; 2], [u8; 2]) {
    let s = board.size();
    let floor = START_DISTANCE.min(s - 2).max(2);
    loop {
        let red = Cell::new(rng.gen_range(0..s), rng.gen_range(0..s));
        let blue = Cell::new(s - 1 - red.row, s - 1 - red.col);
        if board.valid(red) && board.valid(blue) && red.distance_to(blue) >= floor {
            let red_orient = rng.gen_range(0..6u8);
            return ([red, blue], [red_orient, turned(red_orient, 3)]);
        }
    }
}

/// Logs every scored candidate; wired into red's decisions only to keep
/// the output readable
struct TraceObserver {
    round: u32,
}

impl DecisionObserver for TraceObserver {
    fn candidate(&mut self, candidate: &Candidate) {
        tracing::debug!(
            "round {}: candidate {:>2}: score={} future_moves={} center_distance={}",
            self.round,
            candidate.action,
            candidate.score,
            candidate.future_moves,
            candidate.center_distance
        );
    }

    fn decided(&mut self, action: Action) {
        tracing::debug!("round {}: chose {}", self.round, action);
    }
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        outcome: String,
        rounds: u32,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        red_wins: usize,
        blue_wins: usize,
        draws: usize,
        avg_rounds: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        red_wins: results.red_wins,
        blue_wins: results.blue_wins,
        draws: results.draws,
        avg_rounds: results.avg_rounds,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                outcome: format!("{:?}", g.outcome),
                rounds: g.rounds,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Self-Play Results ===");
    println!("Total games: {}", total);
    println!("Red wins:    {}", results.red_wins);
    println!("Blue wins:   {}", results.blue_wins);
    println!("Draws:       {}", results.draws);
    println!("Avg rounds:  {:.1}", results.avg_rounds);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} in {} rounds",
            game.game_number, game.outcome, game.rounds
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
