//! TRIO CLI - Command-line interface
//!
//! Commands:
//! - simulate: Run complete tournaments with simulated results
//! - plan: Plan the next round of a tournament snapshot
//! - targets: Show matches-per-player targets by field size

mod args;
mod plan;
mod simulate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trio_tournament::target_matches;

#[derive(Parser)]
#[command(name = "trio")]
#[command(about = "Three-player tournament pairing engine")]
struct Cli {
    /// Random seed for reproducible pairings and results
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate complete tournaments
    Simulate(simulate::SimulateArgs),
    /// Plan the next round of a tournament snapshot
    Plan(plan::PlanArgs),
    /// Show target matches per player by field size
    Targets {
        #[arg(long, default_value = "24")]
        max: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Simulate(args) => simulate::run(args, cli.seed),
        Commands::Plan(args) => plan::run(args, cli.seed),
        Commands::Targets { max } => {
            print_targets(max);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_targets(max: usize) {
    println!("{:>8}  {:>7}", "players", "target");
    for n in 3..=max.max(3) {
        println!("{:>8}  {:>7}", n, target_matches(n));
    }
}
