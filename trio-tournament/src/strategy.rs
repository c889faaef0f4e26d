//! Round strategies - one implementation per tournament kind
//!
//! Level 2 - Phases

use rand::RngCore;
use trio_core::{PlayerId, RoundType, Tournament, TournamentKind};

use crate::byes::{assign_bye_points, select_bye_players};
use crate::config::EngineConfig;
use crate::history::CombinationHistory;
use crate::planner::{self, RoundPlan};
use crate::selection::first_round_matches;
use crate::standings::sort_players;
use crate::target::all_reached_target;

/// Progression rules for a tournament kind
pub trait RoundStrategy: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Plan the round after the latest one played, or `None` when there
    /// is nothing to plan (round still open, or tournament over)
    fn plan_round(
        &self,
        tournament: &Tournament,
        history: &CombinationHistory,
        rng: &mut dyn RngCore,
    ) -> Option<RoundPlan>;

    fn should_complete(&self, tournament: &Tournament) -> bool;

    fn determine_winner(&self, tournament: &Tournament) -> Option<PlayerId>;
}

/// Strategy for a tournament kind
pub fn strategy_for(kind: TournamentKind, config: EngineConfig) -> Box<dyn RoundStrategy> {
    match kind {
        TournamentKind::Swiss => Box::new(SwissStrategy::new(config)),
        TournamentKind::ChampionsMeeting => Box::new(ChampionsMeetingStrategy::new(config)),
    }
}

// ============================================================================
// Swiss
// ============================================================================

/// Combination-driven Swiss rounds, tiebreakers and a three-player final
#[derive(Clone, Debug, Default)]
pub struct SwissStrategy {
    config: EngineConfig,
}

impl SwissStrategy {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }
}

impl RoundStrategy for SwissStrategy {
    fn name(&self) -> &'static str {
        "swiss"
    }

    fn plan_round(
        &self,
        tournament: &Tournament,
        history: &CombinationHistory,
        rng: &mut dyn RngCore,
    ) -> Option<RoundPlan> {
        planner::plan_round_with_history(
            tournament,
            history,
            tournament.next_round_number(),
            &self.config,
            rng,
        )
    }

    fn should_complete(&self, tournament: &Tournament) -> bool {
        planner::should_complete_tournament(tournament)
    }

    fn determine_winner(&self, tournament: &Tournament) -> Option<PlayerId> {
        planner::determine_winner(tournament)
    }
}

// ============================================================================
// Champions Meeting
// ============================================================================

/// Placeholder format: random groups every round until everyone reaches the
/// target, then the standings leader wins. No tiebreakers, no final.
#[derive(Clone, Debug, Default)]
pub struct ChampionsMeetingStrategy {
    config: EngineConfig,
}

impl ChampionsMeetingStrategy {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }
}

impl RoundStrategy for ChampionsMeetingStrategy {
    fn name(&self) -> &'static str {
        "champions-meeting"
    }

    fn plan_round(
        &self,
        tournament: &Tournament,
        _history: &CombinationHistory,
        rng: &mut dyn RngCore,
    ) -> Option<RoundPlan> {
        if tournament.open_round().is_some() || self.should_complete(tournament) {
            return None;
        }

        let ids: Vec<PlayerId> = tournament.players.iter().map(|p| p.id).collect();
        let (matches, _) = first_round_matches(&ids, rng);
        let bye_players = select_bye_players(&tournament.players, &matches, tournament);

        Some(RoundPlan {
            round_number: tournament.next_round_number(),
            round_type: RoundType::Regular,
            matches,
            byes: assign_bye_points(self.config.bye_policy, &bye_players, &tournament.players),
        })
    }

    fn should_complete(&self, tournament: &Tournament) -> bool {
        tournament.has_started()
            && tournament.players.len() >= 3
            && tournament.open_round().is_none()
            && all_reached_target(tournament)
    }

    fn determine_winner(&self, tournament: &Tournament) -> Option<PlayerId> {
        if !self.should_complete(tournament) {
            return None;
        }
        sort_players(&tournament.players).first().map(|p| p.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use trio_core::{Match, Player, Round, Triple};

    fn tournament(kind: TournamentKind, n: u32) -> Tournament {
        let players = (1..=n).map(|id| Player::new(id, format!("P{}", id))).collect();
        Tournament::new("strategy", kind).with_players(players)
    }

    #[test]
    fn test_strategy_dispatch() {
        let config = EngineConfig::default();
        assert_eq!(strategy_for(TournamentKind::Swiss, config.clone()).name(), "swiss");
        assert_eq!(
            strategy_for(TournamentKind::ChampionsMeeting, config).name(),
            "champions-meeting"
        );
    }

    #[test]
    fn test_swiss_plans_next_round_number() {
        let t = tournament(TournamentKind::Swiss, 6);
        let strategy = SwissStrategy::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let plan = strategy
            .plan_round(&t, &CombinationHistory::new(), &mut rng)
            .unwrap();
        assert_eq!(plan.round_number, 1);
        assert_eq!(plan.matches.len(), 2);
    }

    #[test]
    fn test_champions_meeting_completes_at_target() {
        let mut t = tournament(TournamentKind::ChampionsMeeting, 3);
        let strategy = ChampionsMeetingStrategy::default();
        assert!(!strategy.should_complete(&t));

        for p in &mut t.players {
            p.losses = 3;
        }
        t.players[1].points = 9;
        let mut round = Round::new(1, RoundType::Regular);
        let mut m = Match::new(1, Triple::new(1, 2, 3).unwrap());
        m.winner = Some(2);
        round.matches.push(m);
        t.rounds.push(round);
        t.current_round = 1;

        assert!(strategy.should_complete(&t));
        assert_eq!(strategy.determine_winner(&t), Some(2));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(strategy
            .plan_round(&t, &CombinationHistory::new(), &mut rng)
            .is_none());
    }

    #[test]
    fn test_champions_meeting_regular_rounds() {
        let t = tournament(TournamentKind::ChampionsMeeting, 7);
        let strategy = ChampionsMeetingStrategy::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let plan = strategy
            .plan_round(&t, &CombinationHistory::new(), &mut rng)
            .unwrap();
        assert_eq!(plan.round_type, RoundType::Regular);
        assert_eq!(plan.matches.len(), 2);
        assert_eq!(plan.byes.len(), 1);
    }
}
