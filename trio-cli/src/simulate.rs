//! Simulate command - run whole tournaments with random results
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: run_single(), run_batch(), report_results()
//! - Level 3: simulate_tournament(), pick_winner()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use trio_core::{Match, PlayerId, RoundType, Tournament, TournamentKind};
use trio_tournament::{EngineConfig, Progress, TournamentSession};

use crate::args::{engine_config, ByePolicyArg, KindArg};

/// Upper bound on rounds before a simulation is considered stuck
const MAX_ROUNDS: u32 = 200;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of players
    #[arg(long, default_value = "9")]
    pub players: usize,

    /// Tournament format
    #[arg(long, value_enum, default_value_t = KindArg::Swiss)]
    pub kind: KindArg,

    /// Bye compensation policy
    #[arg(long, value_enum, default_value_t = ByePolicyArg::Flat)]
    pub bye_policy: ByePolicyArg,

    /// Number of tournaments to simulate
    #[arg(long, default_value = "1")]
    pub tournaments: usize,

    /// Score candidate matches in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Save the final tournament snapshot (single tournament only)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Summary of one simulated tournament
#[derive(Clone, Debug, Serialize)]
struct SimulationSummary {
    rounds: usize,
    regular_rounds: usize,
    tiebreaker_rounds: usize,
    winner: Option<PlayerId>,
}

impl SimulationSummary {
    fn from_tournament(tournament: &Tournament) -> Self {
        let count = |round_type: RoundType| {
            tournament
                .rounds
                .iter()
                .filter(|r| r.round_type == round_type)
                .count()
        };
        Self {
            rounds: tournament.rounds.len(),
            regular_rounds: count(RoundType::Regular),
            tiebreaker_rounds: count(RoundType::Tiebreaker),
            winner: tournament.winner,
        }
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// 1. Build the engine configuration
/// 2. Simulate one tournament (detailed report) or many (summary)
pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    if args.players < 3 {
        bail!("Need at least 3 players, got {}", args.players);
    }

    tracing::info!(
        "Simulating {} {:?} tournament(s) with {} players",
        args.tournaments,
        args.kind,
        args.players
    );

    if args.tournaments <= 1 {
        run_single(&args, seed)
    } else {
        run_batch(&args, seed)
    }
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn run_single(args: &SimulateArgs, seed: Option<u64>) -> Result<()> {
    let config = engine_config(seed, args.bye_policy, args.parallel);
    let mut rng = create_rng(seed.map(|s| s.wrapping_add(1)));
    let tournament = simulate_tournament(args.players, args.kind.into(), config, &mut rng)?;

    if let Some(path) = &args.output {
        tournament
            .save(path)
            .with_context(|| format!("Failed to save snapshot: {}", path.display()))?;
        tracing::info!("Saved tournament snapshot to {}", path.display());
    }

    report_results(&tournament, args.json)
}

fn run_batch(args: &SimulateArgs, seed: Option<u64>) -> Result<()> {
    let progress = ProgressBar::new(args.tournaments as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} tournaments ({eta})")
            .context("Invalid progress template")?,
    );

    let mut summaries = Vec::with_capacity(args.tournaments);
    for i in 0..args.tournaments {
        let run_seed = seed.map(|s| s.wrapping_add(2 * i as u64));
        let config = engine_config(run_seed, args.bye_policy, args.parallel);
        let mut rng = create_rng(run_seed.map(|s| s.wrapping_add(1)));
        let tournament = simulate_tournament(args.players, args.kind.into(), config, &mut rng)?;
        summaries.push(SimulationSummary::from_tournament(&tournament));
        progress.inc(1);
    }
    progress.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print_batch_summary(&summaries);
    }
    Ok(())
}

fn report_results(tournament: &Tournament, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tournament)?);
    } else {
        print_round_log(tournament);
        print_standings(tournament);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play a full tournament, choosing winners at random weighted by a hidden
/// per-player strength.
pub fn simulate_tournament<R: Rng>(
    players: usize,
    kind: TournamentKind,
    config: EngineConfig,
    rng: &mut R,
) -> Result<Tournament> {
    simulate_with_limit(players, kind, config, rng, MAX_ROUNDS)
}

fn simulate_with_limit<R: Rng>(
    players: usize,
    kind: TournamentKind,
    config: EngineConfig,
    rng: &mut R,
    max_rounds: u32,
) -> Result<Tournament> {
    let mut session = TournamentSession::new("simulation", kind, config);
    for i in 0..players {
        session.add_player(&format!("Player {}", i + 1))?;
    }
    let strengths: Vec<f64> = (0..players).map(|_| rng.gen_range(0.5..2.0)).collect();

    let mut progress = session.start()?;
    loop {
        match progress {
            Progress::Completed { .. } => break,
            Progress::RoundOpen { round, .. } | Progress::RoundCreated { round, .. } => {
                if round > max_rounds {
                    bail!("Tournament did not finish within {} rounds", max_rounds);
                }
            }
        }

        let pending: Vec<Match> = session.pending_matches().into_iter().cloned().collect();
        if pending.is_empty() {
            progress = session.advance()?;
            continue;
        }
        for m in pending {
            let winner = pick_winner(&m, &strengths, rng)?;
            progress = session.record_result(m.id, winner)?;
        }
    }

    Ok(session.into_tournament())
}

/// Weighted random winner; player ids are 1-based positions in `strengths`
fn pick_winner<R: Rng>(m: &Match, strengths: &[f64], rng: &mut R) -> Result<PlayerId> {
    let weights: Vec<f64> = m
        .participants
        .iter()
        .map(|&id| {
            (id as usize)
                .checked_sub(1)
                .and_then(|i| strengths.get(i))
                .copied()
                .unwrap_or(1.0)
        })
        .collect();
    let dist = WeightedIndex::new(&weights).context("Invalid player strengths")?;
    Ok(m.participants[dist.sample(rng)])
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn player_name(tournament: &Tournament, id: PlayerId) -> String {
    tournament
        .player(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("#{}", id))
}

fn print_round_log(tournament: &Tournament) {
    for round in &tournament.rounds {
        println!("Round {} [{:?}]", round.number, round.round_type);
        for m in &round.matches {
            let names: Vec<String> = m
                .participants
                .iter()
                .map(|&id| player_name(tournament, id))
                .collect();
            let winner = m
                .winner
                .map(|id| player_name(tournament, id))
                .unwrap_or_else(|| "-".to_string());
            println!("  {:<40} winner: {}", names.join(", "), winner);
        }
        for bye in &round.byes {
            println!(
                "  bye: {} (+{})",
                player_name(tournament, bye.player_id),
                bye.points
            );
        }
    }
}

fn print_standings(tournament: &Tournament) {
    println!();
    println!("{:>4}  {:<16} {:>6} {:>4} {:>4}", "rank", "player", "points", "W", "L");
    for row in trio_tournament::standings(&tournament.players) {
        println!(
            "{:>4}  {:<16} {:>6} {:>4} {:>4}",
            row.rank, row.name, row.points, row.wins, row.losses
        );
    }

    match tournament.winner {
        Some(id) => println!("\nChampion: {}", player_name(tournament, id)),
        None => println!("\nNo champion decided"),
    }
}

fn print_batch_summary(summaries: &[SimulationSummary]) {
    let n = summaries.len().max(1) as f64;
    let avg = |f: fn(&SimulationSummary) -> usize| summaries.iter().map(f).sum::<usize>() as f64 / n;
    let with_tiebreaker = summaries.iter().filter(|s| s.tiebreaker_rounds > 0).count();

    println!("Tournaments:          {}", summaries.len());
    println!("Avg rounds:           {:.2}", avg(|s| s.rounds));
    println!("Avg regular rounds:   {:.2}", avg(|s| s.regular_rounds));
    println!("Avg tiebreaker rounds:{:.2}", avg(|s| s.tiebreaker_rounds));
    println!("Needed a tiebreaker:  {}", with_tiebreaker);
}
