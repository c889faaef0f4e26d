//! Plan command - create the next round for a tournament snapshot
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: next_step(), report_progress()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use trio_core::{Round, Tournament, TournamentStatus};
use trio_tournament::{target_matches, Progress, TournamentSession};

use crate::args::{engine_config, ByePolicyArg};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlanArgs {
    /// Tournament snapshot JSON file
    #[arg(long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Bye compensation policy
    #[arg(long, value_enum, default_value_t = ByePolicyArg::Flat)]
    pub bye_policy: ByePolicyArg,

    /// Write the updated snapshot here (default: print only)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output the plan as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run plan command
///
/// 1. Load the snapshot
/// 2. Start it, advance it, or report that it is over
/// 3. Print the new round and optionally save the snapshot
pub fn run(args: PlanArgs, seed: Option<u64>) -> Result<()> {
    let tournament = Tournament::load(&args.snapshot)?;
    tracing::info!(
        "Loaded '{}': {} players, {} rounds",
        tournament.name,
        tournament.players.len(),
        tournament.rounds.len()
    );

    let config = engine_config(seed, args.bye_policy, false);
    let mut session = TournamentSession::from_tournament(tournament, config);
    let progress = next_step(&mut session)?;

    report_progress(session.tournament(), &progress, args.json)?;

    if let Some(path) = &args.output {
        session
            .tournament()
            .save(path)
            .with_context(|| format!("Failed to save snapshot: {}", path.display()))?;
        tracing::info!("Saved tournament snapshot to {}", path.display());
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn next_step(session: &mut TournamentSession) -> Result<Progress> {
    if let Some(open) = session.tournament().open_round() {
        return Ok(Progress::RoundOpen {
            round: open.number,
            remaining: open.matches.iter().filter(|m| !m.is_decided()).count(),
        });
    }

    let progress = match session.tournament().status() {
        TournamentStatus::Setup => session.start()?,
        TournamentStatus::InProgress => session.advance()?,
        TournamentStatus::Complete => Progress::Completed {
            winner: session.winner(),
        },
    };
    Ok(progress)
}

fn report_progress(tournament: &Tournament, progress: &Progress, json: bool) -> Result<()> {
    let round = match progress {
        Progress::RoundCreated { .. } => tournament.rounds.last(),
        _ => None,
    };

    if json {
        let value = json!({
            "tournament": tournament.name,
            "target_matches": target_matches(tournament.players.len()),
            "round": round,
            "complete": tournament.winner.is_some(),
            "winner": tournament.winner,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match (progress, round) {
        (Progress::Completed { winner }, _) => match winner.and_then(|id| tournament.player(id)) {
            Some(p) => println!("Tournament complete. Champion: {}", p.name),
            None => println!("Tournament complete without a champion"),
        },
        (Progress::RoundOpen { round, remaining }, _) => {
            println!("Round {} still open: {} matches pending", round, remaining)
        }
        (_, Some(round)) => print_round(tournament, round),
        (_, None) => println!("Nothing to plan"),
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn print_round(tournament: &Tournament, round: &Round) {
    println!("Round {} [{:?}]", round.number, round.round_type);
    for m in &round.matches {
        let names: Vec<&str> = m
            .participants
            .iter()
            .filter_map(|&id| tournament.player(id))
            .map(|p| p.name.as_str())
            .collect();
        println!("  match {}: {}", m.id, names.join(", "));
    }
    for bye in &round.byes {
        if let Some(p) = tournament.player(bye.player_id) {
            println!("  bye: {} (+{})", p.name, bye.points);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trio_core::{Player, RoundType, TournamentKind};
    use trio_tournament::EngineConfig;

    fn snapshot(players: u32) -> Tournament {
        let players = (1..=players).map(|id| Player::new(id, format!("P{}", id))).collect();
        Tournament::new("plan", TournamentKind::Swiss).with_players(players)
    }

    fn session_for(tournament: Tournament) -> TournamentSession {
        TournamentSession::from_tournament(tournament, EngineConfig::default().with_seed(5))
    }

    #[test]
    fn test_next_step_starts_unstarted_snapshot() {
        let mut session = session_for(snapshot(4));
        let progress = next_step(&mut session).unwrap();
        assert_eq!(
            progress,
            Progress::RoundCreated {
                round: 1,
                round_type: RoundType::Regular,
                matches: 1
            }
        );
    }

    #[test]
    fn test_next_step_reports_open_round() {
        let mut session = session_for(snapshot(6));
        session.start().unwrap();
        let first = session.pending_matches()[0].clone();
        session.record_result(first.id, first.participants[0]).unwrap();
        let before = session.tournament().clone();

        let progress = next_step(&mut session).unwrap();
        assert_eq!(progress, Progress::RoundOpen { round: 1, remaining: 1 });
        assert_eq!(session.tournament(), &before);
    }

    #[test]
    fn test_next_step_advances_completed_round() {
        let mut session = session_for(snapshot(3));
        session.start().unwrap();
        let m = session.pending_matches()[0].clone();
        session.record_result(m.id, m.participants[0]).unwrap();

        // Round 2 was created by the result; decide it and snapshot mid-way
        let mut t = session.into_tournament();
        let open = t.rounds.last_mut().unwrap();
        open.matches[0].winner = Some(open.matches[0].participants[0]);
        for p in &mut t.players {
            if p.id == t.rounds[1].matches[0].participants[0] {
                p.wins += 1;
            } else {
                p.losses += 1;
            }
        }

        let mut session = session_for(t);
        let progress = next_step(&mut session).unwrap();
        assert!(matches!(progress, Progress::RoundCreated { round: 3, .. }));
    }

    #[test]
    fn test_next_step_on_complete_snapshot() {
        let mut t = snapshot(3);
        t.current_round = 1;
        t.winner = Some(2);
        let mut session = session_for(t);
        assert_eq!(
            next_step(&mut session).unwrap(),
            Progress::Completed { winner: Some(2) }
        );
    }

    #[test]
    fn test_snapshot_with_too_few_players_fails() {
        let mut session = session_for(snapshot(2));
        assert!(next_step(&mut session).is_err());
    }
}
