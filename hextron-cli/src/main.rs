//! HEXTRON CLI - the external driver around the decision engine
//!
//! Commands:
//! - play: self-play matches between two engine instances
//! - bench: decision latency measurement

mod benchmark;
mod play_cmd;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hextron")]
#[command(about = "HEXTRON hex light-trail driver and benchmarks")]
struct Cli {
    /// RNG seed for reproducible starting positions
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play self-play matches
    Play(play_cmd::PlayArgs),
    /// Measure decision latency
    Bench(benchmark::BenchArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Bench(args) => benchmark::run(args, cli.seed),
    }
}
