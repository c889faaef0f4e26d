//! TRIO Tournament - Round pairing and progression engine
//!
//! This crate decides, after every round, which three-player matches to
//! create next, who sits out, when tiebreakers are needed and when the
//! tournament is over:
//! - Combination generation and history of used triples
//! - Standings and tie detection
//! - Target match counts per player
//! - Greedy match selection and bye allocation
//! - Round planning state machine and strategy dispatch
//! - An in-memory session that applies plans and records results
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: TournamentSession (orchestration)
//! - Level 2: plan_round, RoundStrategy (phases)
//! - Level 3: select_optimal_matches, select_bye_players, tiebreaker grouping (steps)
//! - Level 4: combinations, standings, targets, configuration

mod byes;
mod combinations;
mod config;
mod history;
mod planner;
mod selection;
mod session;
mod standings;
mod strategy;
mod target;

pub use byes::{assign_bye_points, select_bye_players};
pub use combinations::generate_all_combinations;
pub use config::{ByePolicy, EngineConfig, ScoringConfig};
pub use history::{bye_counts, unused_combinations, used_keys, CombinationHistory};
pub use planner::{
    determine_winner, next_phase, plan_round, plan_round_with_history, should_complete_tournament,
    Phase, RoundPlan,
};
pub use selection::{
    competitiveness_score, first_round_matches, participation_score, select_optimal_matches,
};
pub use session::{Progress, TournamentSession};
pub use standings::{are_tied, compare_players, has_clear_top3, sort_players, standings, Standing};
pub use strategy::{strategy_for, ChampionsMeetingStrategy, RoundStrategy, SwissStrategy};
pub use target::{all_reached_target, target_matches};
