//! Round planning - the Regular → Tiebreaker → Final → Complete state machine
//!
//! Level 2 - Phases

use rand::Rng;
use trio_core::{ByeAward, Player, PlayerId, RoundType, Tournament, Triple};

use crate::byes::{assign_bye_points, select_bye_players};
use crate::config::EngineConfig;
use crate::history::CombinationHistory;
use crate::selection::{first_round_matches, select_from_history};
use crate::standings::{are_tied, has_clear_top3, sort_players};
use crate::target::all_reached_target;

/// Where the tournament stands when the next round is requested
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Regular,
    Tiebreaker,
    Final,
    Complete,
}

/// Matches to create for one round, and who sits out
#[derive(Clone, Debug, PartialEq)]
pub struct RoundPlan {
    pub round_number: u32,
    pub round_type: RoundType,
    pub matches: Vec<Triple>,
    /// Bye players in priority order with their awards (Regular rounds only)
    pub byes: Vec<ByeAward>,
}

impl RoundPlan {
    fn new(round_number: u32, round_type: RoundType, matches: Vec<Triple>) -> Self {
        Self {
            round_number,
            round_type,
            matches,
            byes: Vec::new(),
        }
    }

    pub fn bye_players(&self) -> Vec<PlayerId> {
        self.byes.iter().map(|b| b.player_id).collect()
    }

    pub fn participant_count(&self) -> usize {
        self.matches.len() * 3
    }
}

// ============================================================================
// Level 2 - Phase decision
// ============================================================================

/// Decide the type of the next round
pub fn next_phase(tournament: &Tournament, config: &EngineConfig) -> Phase {
    if let Some(final_round) = tournament.final_round() {
        return if final_round.is_completed() {
            Phase::Complete
        } else {
            Phase::Final
        };
    }

    if !all_reached_target(tournament) {
        return Phase::Regular;
    }

    let tiebreakers = tournament.completed_rounds_of(RoundType::Tiebreaker);
    if has_clear_top3(&tournament.players) || tiebreakers >= config.max_tiebreaker_rounds {
        return Phase::Final;
    }

    let sorted = sort_players(&tournament.players);
    if tiebreaker_groups(&sorted).is_empty() {
        tracing::warn!(
            "Podium tie in '{}' cannot be split by a tiebreaker, moving to the final",
            tournament.name
        );
        return Phase::Final;
    }
    Phase::Tiebreaker
}

/// A final exists and its match has been decided
pub fn should_complete_tournament(tournament: &Tournament) -> bool {
    tournament
        .final_round()
        .map_or(false, |round| !round.matches.is_empty() && round.is_completed())
}

/// Winner of the final, once decided
pub fn determine_winner(tournament: &Tournament) -> Option<PlayerId> {
    tournament
        .final_round()
        .filter(|round| round.is_completed())
        .and_then(|round| round.matches.first())
        .and_then(|m| m.winner)
}

/// Plan round `round_number` from a snapshot.
///
/// Returns `None` when the tournament is complete or a round is still open.
pub fn plan_round<R: Rng + ?Sized>(
    tournament: &Tournament,
    round_number: u32,
    config: &EngineConfig,
    rng: &mut R,
) -> Option<RoundPlan> {
    let history = CombinationHistory::from_tournament(tournament);
    plan_round_with_history(tournament, &history, round_number, config, rng)
}

/// Same as [`plan_round`] with a pre-built combination history
pub fn plan_round_with_history<R: Rng + ?Sized>(
    tournament: &Tournament,
    history: &CombinationHistory,
    round_number: u32,
    config: &EngineConfig,
    rng: &mut R,
) -> Option<RoundPlan> {
    if tournament.open_round().is_some() {
        return None;
    }

    let plan = match next_phase(tournament, config) {
        Phase::Complete => return None,
        Phase::Regular => plan_regular(tournament, history, round_number, config, rng),
        Phase::Tiebreaker => plan_tiebreaker(tournament, round_number),
        Phase::Final => plan_final(tournament, round_number),
    };

    tracing::debug!(
        "Planned round {} ({:?}): {} matches, {} byes",
        plan.round_number,
        plan.round_type,
        plan.matches.len(),
        plan.byes.len()
    );
    Some(plan)
}

// ============================================================================
// Level 3 - Round construction
// ============================================================================

fn plan_regular<R: Rng + ?Sized>(
    tournament: &Tournament,
    history: &CombinationHistory,
    round_number: u32,
    config: &EngineConfig,
    rng: &mut R,
) -> RoundPlan {
    let players = &tournament.players;
    let matches = if tournament.rounds.is_empty() {
        let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        first_round_matches(&ids, rng).0
    } else {
        let selected = select_from_history(players, history, config.parallel);
        if selected.is_empty() && players.len() >= 3 {
            // Every combination has been played once; start repeating.
            tracing::info!(
                "All {} combinations used in '{}', allowing repeats",
                history.len(),
                tournament.name
            );
            select_from_history(players, &CombinationHistory::new(), config.parallel)
        } else {
            selected
        }
    };

    let bye_players = select_bye_players(players, &matches, tournament);
    let mut plan = RoundPlan::new(round_number, RoundType::Regular, matches);
    plan.byes = assign_bye_points(config.bye_policy, &bye_players, players);
    plan
}

fn plan_tiebreaker(tournament: &Tournament, round_number: u32) -> RoundPlan {
    let sorted = sort_players(&tournament.players);
    RoundPlan::new(round_number, RoundType::Tiebreaker, tiebreaker_groups(&sorted))
}

fn plan_final(tournament: &Tournament, round_number: u32) -> RoundPlan {
    let sorted = sort_players(&tournament.players);
    let top3: Vec<PlayerId> = sorted.iter().take(3).map(|p| p.id).collect();
    let matches = Triple::from_slice(&top3).into_iter().collect();
    RoundPlan::new(round_number, RoundType::Final, matches)
}

/// Players tied with the third-ranked player, starting from rank 3
fn podium_contenders<'a>(sorted: &[&'a Player]) -> Vec<&'a Player> {
    match sorted.get(2) {
        Some(third) => sorted[2..]
            .iter()
            .take_while(|p| are_tied(third, p))
            .copied()
            .collect(),
        None => Vec::new(),
    }
}

/// Tiebreaker matches: contenders padded with the next-best players to a
/// multiple of three, grouped in standings order. Contenders that cannot be
/// padded are left out; fewer than two contenders yields no matches.
fn tiebreaker_groups(sorted: &[&Player]) -> Vec<Triple> {
    let contenders = podium_contenders(sorted);
    if contenders.len() < 2 {
        return Vec::new();
    }

    let mut group: Vec<PlayerId> = contenders.iter().map(|p| p.id).collect();
    let padding = sorted
        .iter()
        .skip(2 + contenders.len())
        .map(|p| p.id);
    for id in padding {
        if group.len() % 3 == 0 {
            break;
        }
        group.push(id);
    }
    group.truncate(group.len() - group.len() % 3);

    group.chunks_exact(3).filter_map(Triple::from_slice).collect()
}
