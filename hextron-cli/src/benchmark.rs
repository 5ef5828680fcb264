//! Benchmark command - decision latency measurement
//!
//! The engine carries no timing of its own; this command plays self-play
//! rounds and times each `decide` call from the outside.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hextron_core::{apply_action, decide, terminal, Board, Cell, Player, Snapshot};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct BenchArgs {
    /// Number of decisions to time
    #[arg(long, default_value = "200")]
    pub decisions: usize,

    /// Board side length
    #[arg(long, default_value = "13")]
    pub size: i8,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Timing summary over all measured decisions
#[derive(Clone, Debug)]
struct BenchmarkResult {
    decisions: usize,
    total_time: Duration,
    avg_time: Duration,
    max_time: Duration,
    decisions_per_second: f64,
}

// ============================================================================
// COMMAND
// ============================================================================

/// Run benchmark command
pub fn run(args: BenchArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Benchmarking {} decisions on a size-{} board",
        args.decisions,
        args.size
    );

    let samples = collect_samples(&args, seed)?;
    let result = summarize(samples);

    if args.json {
        print_json_result(&result);
    } else {
        print_text_result(&result);
    }

    Ok(())
}

/// Time `decide` across fresh self-play games until enough samples exist.
/// Board fill varies over a game, so latency is sampled across whole games
/// rather than the empty opening position only.
fn collect_samples(args: &BenchArgs, seed: Option<u64>) -> Result<Vec<Duration>> {
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut samples = Vec::with_capacity(args.decisions);

    while samples.len() < args.decisions {
        let mut board = Board::new(args.size);
        let (mut positions, mut orientations) = opening(&board, &mut rng);

        loop {
            if samples.len() >= args.decisions {
                break;
            }

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

            let start = Instant::now();
            let red_action = decide(&red_view);
            samples.push(start.elapsed());

            let blue_action = decide(&blue_view);

            board.mark(positions[0], Player::Red);
            board.mark(positions[1], Player::Blue);
            let (red_pos, red_orient) =
                apply_action(positions[0], orientations[0], red_action);
            let (blue_pos, blue_orient) =
                apply_action(positions[1], orientations[1], blue_action);

            if red_pos == blue_pos
                || terminal(&board, red_pos)
                || terminal(&board, blue_pos)
            {
                break;
            }
            positions = [red_pos, blue_pos];
            orientations = [red_orient, blue_orient];
        }
    }

    Ok(samples)
}

/// Fixed mirrored opening on the horizontal center line
fn opening(board: &Board, rng: &mut ChaCha8Rng) -> ([Cell; 2], [u8; 2]) {
    use rand::Rng;

    let s = board.size();
    let row = s / 2;
    let red = Cell::new(row, s / 4);
    let blue = Cell::new(s - 1 - red.row, s - 1 - red.col);
    debug_assert!(board.valid(red) && board.valid(blue));

    // Randomize facings only; positions stay comparable across runs
    let orient = rng.gen_range(0..6u8);
    ([red, blue], [orient, hextron_core::turned(orient, 3)])
}

fn summarize(samples: Vec<Duration>) -> BenchmarkResult {
    let decisions = samples.len();
    let total_time: Duration = samples.iter().sum();
    let avg_time = if decisions > 0 {
        total_time / decisions as u32
    } else {
        Duration::ZERO
    };
    let max_time = samples.iter().copied().max().unwrap_or(Duration::ZERO);
    let decisions_per_second = if total_time.as_secs_f64() > 0.0 {
        decisions as f64 / total_time.as_secs_f64()
    } else {
        0.0
    };

    BenchmarkResult {
        decisions,
        total_time,
        avg_time,
        max_time,
        decisions_per_second,
    }
}

// ============================================================================
// REPORTING
// ============================================================================

/// Format duration for display
fn format_duration(d: Duration) -> String {
    if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else if d.as_millis() >= 1 {
        format!("{:.1}ms", d.as_secs_f64() * 1000.0)
    } else {
        format!("{:.1}us", d.as_secs_f64() * 1_000_000.0)
    }
}

fn print_json_result(result: &BenchmarkResult) {
    #[derive(serde::Serialize)]
    struct JsonOutput {
        decisions: usize,
        total_time_ms: f64,
        avg_time_ms: f64,
        max_time_ms: f64,
        decisions_per_second: f64,
    }

    let output = JsonOutput {
        decisions: result.decisions,
        total_time_ms: result.total_time.as_secs_f64() * 1000.0,
        avg_time_ms: result.avg_time.as_secs_f64() * 1000.0,
        max_time_ms: result.max_time.as_secs_f64() * 1000.0,
        decisions_per_second: result.decisions_per_second,
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_result(result: &BenchmarkResult) {
    println!("\n=== Decision Latency ===");
    println!("Decisions:   {}", result.decisions);
    println!("Total time:  {}", format_duration(result.total_time));
    println!("Avg/decide:  {}", format_duration(result.avg_time));
    println!("Max/decide:  {}", format_duration(result.max_time));
    println!("Decide/s:    {:.1}", result.decisions_per_second);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hextron_core::STANDARD_SIZE;

    #[test]
    fn test_format_duration() {
        assert!(format_duration(Duration::from_micros(500)).contains("us"));
        assert!(format_duration(Duration::from_millis(500)).contains("ms"));
        assert!(format_duration(Duration::from_secs(5)).contains('s'));
    }

    #[test]
    fn test_summarize() {
        let samples = vec![
            Duration::from_millis(1),
            Duration::from_millis(3),
            Duration::from_millis(2),
        ];
        let result = summarize(samples);
        assert_eq!(result.decisions, 3);
        assert_eq!(result.total_time, Duration::from_millis(6));
        assert_eq!(result.avg_time, Duration::from_millis(2));
        assert_eq!(result.max_time, Duration::from_millis(3));
    }

    #[test]
    fn test_summarize_empty() {
        let result = summarize(vec![]);
        assert_eq!(result.decisions, 0);
        assert_eq!(result.avg_time, Duration::ZERO);
        assert_eq!(result.decisions_per_second, 0.0);
    }

    #[test]
    fn test_opening_is_valid_and_mirrored() {
        let board = Board::new(STANDARD_SIZE);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let ([red, blue], [red_orient, blue_orient]) = opening(&board, &mut rng);

        assert!(board.valid(red));
        assert!(board.valid(blue));
        assert_eq!(blue, Cell::new(12 - red.row, 12 - red.col));
        assert_eq!(blue_orient, (red_orient + 3) % 6);
    }

    #[test]
    fn test_collect_samples_counts() {
        let args = BenchArgs {
            decisions: 5,
            size: STANDARD_SIZE,
            json: false,
        };
        let samples = collect_samples(&args, Some(42)).unwrap();
        assert_eq!(samples.len(), 5);
    }
}
