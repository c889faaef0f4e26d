//! Tournament session - applies plans and results to an in-memory tournament
//!
//! Level 1 - Orchestration
//!
//! Every mutation is built on a working copy and swapped in only when it
//! succeeds, so a rejected call leaves the tournament untouched.

use rand_chacha::ChaCha8Rng;
use trio_core::{
    Match, MatchId, Player, PlayerId, Round, RoundType, Tournament, TournamentError,
    TournamentKind, TournamentStatus,
};

use crate::config::{EngineConfig, ScoringConfig};
use crate::history::CombinationHistory;
use crate::planner::RoundPlan;
use crate::strategy::{strategy_for, RoundStrategy};

/// Minimum field for a three-player tournament
const MIN_PLAYERS: usize = 3;

/// What happened after a start, result or advance call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Progress {
    /// The open round still has undecided matches
    RoundOpen { round: u32, remaining: usize },
    /// A new round was created
    RoundCreated {
        round: u32,
        round_type: RoundType,
        matches: usize,
    },
    /// The tournament is over
    Completed { winner: Option<PlayerId> },
}

/// A single running tournament
pub struct TournamentSession {
    tournament: Tournament,
    config: EngineConfig,
    strategy: Box<dyn RoundStrategy>,
    history: CombinationHistory,
    rng: ChaCha8Rng,
}

impl TournamentSession {
    /// Create an empty tournament
    pub fn new(name: impl Into<String>, kind: TournamentKind, config: EngineConfig) -> Self {
        Self::from_tournament(Tournament::new(name, kind), config)
    }

    /// Resume from a snapshot
    pub fn from_tournament(tournament: Tournament, config: EngineConfig) -> Self {
        let strategy = strategy_for(tournament.kind, config.clone());
        let history = CombinationHistory::from_tournament(&tournament);
        let rng = config.rng();
        Self {
            tournament,
            config,
            strategy,
            history,
            rng,
        }
    }

    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    pub fn into_tournament(self) -> Tournament {
        self.tournament
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.tournament.winner
    }

    /// Undecided matches of the open round
    pub fn pending_matches(&self) -> Vec<&Match> {
        self.tournament
            .open_round()
            .map(|r| r.matches.iter().filter(|m| !m.is_decided()).collect())
            .unwrap_or_default()
    }

    // ========================================================================
    // Setup
    // ========================================================================

    /// Register a player; names are unique ignoring case
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, TournamentError> {
        self.ensure_setup()?;
        let name = name.trim();
        if self
            .tournament
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name))
        {
            return Err(TournamentError::DuplicatePlayer(name.to_string()));
        }

        let id = self.tournament.next_player_id();
        self.tournament.players.push(Player::new(id, name));
        tracing::debug!("Added player {} ({})", name, id);
        Ok(id)
    }

    /// Remove a player before the tournament starts
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Player, TournamentError> {
        self.ensure_setup()?;
        let index = self
            .tournament
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(TournamentError::PlayerNotFound(id))?;
        Ok(self.tournament.players.remove(index))
    }

    /// Start the tournament by creating round 1
    pub fn start(&mut self) -> Result<Progress, TournamentError> {
        self.ensure_setup()?;
        let actual = self.tournament.players.len();
        if actual < MIN_PLAYERS {
            return Err(TournamentError::NotEnoughPlayers {
                required: MIN_PLAYERS,
                actual,
            });
        }

        tracing::info!(
            "Starting '{}' ({}) with {} players",
            self.tournament.name,
            self.strategy.name(),
            actual
        );
        self.advance_from(self.tournament.clone())
    }

    // ========================================================================
    // Play
    // ========================================================================

    /// Record the winner of a match in the open round.
    ///
    /// Applies the win/loss statistics and, once the round is complete,
    /// creates the next round or completes the tournament.
    pub fn record_result(
        &mut self,
        match_id: MatchId,
        winner: PlayerId,
    ) -> Result<Progress, TournamentError> {
        self.ensure_in_progress()?;

        let mut working = self.tournament.clone();
        let (round_type, participants) = decide_match(&mut working, match_id, winner)?;
        apply_result(&mut working, &participants, winner, round_type, self.config.scoring)?;

        tracing::debug!("Match {} won by player {}", match_id, winner);
        self.advance_from(working)
    }

    /// Create the next round when none is open (e.g. after an empty round)
    pub fn advance(&mut self) -> Result<Progress, TournamentError> {
        self.ensure_in_progress()?;
        if let Some(open) = self.tournament.open_round() {
            return Err(TournamentError::RoundStillOpen(open.number));
        }
        self.advance_from(self.tournament.clone())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn ensure_setup(&self) -> Result<(), TournamentError> {
        match self.tournament.status() {
            TournamentStatus::Setup => Ok(()),
            TournamentStatus::InProgress => Err(TournamentError::AlreadyStarted),
            TournamentStatus::Complete => Err(TournamentError::AlreadyComplete),
        }
    }

    fn ensure_in_progress(&self) -> Result<(), TournamentError> {
        match self.tournament.status() {
            TournamentStatus::InProgress => Ok(()),
            TournamentStatus::Setup => Err(TournamentError::NotStarted),
            TournamentStatus::Complete => Err(TournamentError::AlreadyComplete),
        }
    }

    /// Decide what comes next for `working` and commit it
    fn advance_from(&mut self, mut working: Tournament) -> Result<Progress, TournamentError> {
        if let Some(open) = working.open_round() {
            let progress = Progress::RoundOpen {
                round: open.number,
                remaining: open.matches.iter().filter(|m| !m.is_decided()).count(),
            };
            self.tournament = working;
            return Ok(progress);
        }

        if self.strategy.should_complete(&working) {
            return Ok(self.complete(working));
        }

        let plan = match self
            .strategy
            .plan_round(&working, &self.history, &mut self.rng)
        {
            Some(plan) => plan,
            None => return Ok(self.complete(working)),
        };

        let round = apply_plan(&mut working, &plan)?;
        for m in &round.matches {
            self.history.record(m);
        }

        tracing::info!(
            "Round {} ({:?}) created: {} matches, {} byes",
            plan.round_number,
            plan.round_type,
            plan.matches.len(),
            plan.byes.len()
        );
        self.tournament = working;

        Ok(Progress::RoundCreated {
            round: plan.round_number,
            round_type: plan.round_type,
            matches: plan.matches.len(),
        })
    }

    fn complete(&mut self, mut working: Tournament) -> Progress {
        let winner = self.strategy.determine_winner(&working);
        working.winner = winner;
        match winner {
            Some(id) => tracing::info!("'{}' complete, winner: player {}", working.name, id),
            None => tracing::warn!("'{}' complete without a winner", working.name),
        }
        self.tournament = working;
        Progress::Completed { winner }
    }
}

/// Set the winner of a match, returning its round type and participants
fn decide_match(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner: PlayerId,
) -> Result<(RoundType, Vec<PlayerId>), TournamentError> {
    let (round_type, m) = tournament
        .rounds
        .iter_mut()
        .find_map(|r| {
            let round_type = r.round_type;
            r.find_match_mut(match_id).map(|m| (round_type, m))
        })
        .ok_or(TournamentError::MatchNotFound(match_id))?;

    if m.is_decided() {
        return Err(TournamentError::MatchAlreadyDecided(match_id));
    }
    if !m.involves(winner) {
        return Err(TournamentError::InvalidWinner {
            match_id,
            player_id: winner,
        });
    }
    m.winner = Some(winner);
    Ok((round_type, m.participants.clone()))
}

/// Win/loss bookkeeping; the final awards no points
fn apply_result(
    tournament: &mut Tournament,
    participants: &[PlayerId],
    winner: PlayerId,
    round_type: RoundType,
    scoring: ScoringConfig,
) -> Result<(), TournamentError> {
    let awards_points = round_type != RoundType::Final;
    for &id in participants {
        let player = tournament
            .player_mut(id)
            .ok_or(TournamentError::PlayerNotFound(id))?;
        if id == winner {
            player.wins += 1;
            if awards_points {
                player.points += scoring.win_points;
            }
        } else {
            player.losses += 1;
            if awards_points {
                player.points += scoring.loss_points;
            }
        }
    }
    Ok(())
}

/// Turn a plan into a round on the tournament and hand out bye points
fn apply_plan(tournament: &mut Tournament, plan: &RoundPlan) -> Result<Round, TournamentError> {
    let mut round = Round::new(plan.round_number, plan.round_type);
    let mut next_id = tournament.next_match_id();

    for triple in &plan.matches {
        if let Some(missing) = triple.ids().into_iter().find(|id| tournament.player(*id).is_none()) {
            return Err(TournamentError::PlayerNotFound(missing));
        }
        round.matches.push(Match::new(next_id, *triple));
        next_id += 1;
    }

    for award in &plan.byes {
        let player = tournament
            .player_mut(award.player_id)
            .ok_or(TournamentError::PlayerNotFound(award.player_id))?;
        player.points += award.points;
    }
    round.byes = plan.byes.clone();

    tournament.rounds.push(round.clone());
    tournament.current_round = plan.round_number;
    Ok(round)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::used_keys;

    fn session(n: usize) -> TournamentSession {
        let mut s = TournamentSession::new(
            "session",
            TournamentKind::Swiss,
            EngineConfig::default().with_seed(11),
        );
        for i in 0..n {
            s.add_player(&format!("Player {}", i + 1)).unwrap();
        }
        s
    }

    /// Lowest id wins every match
    fn play_round(s: &mut TournamentSession) -> Progress {
        let pending: Vec<(MatchId, PlayerId)> = s
            .pending_matches()
            .iter()
            .map(|m| (m.id, *m.participants.iter().min().unwrap()))
            .collect();
        let mut progress = None;
        for (match_id, winner) in pending {
            progress = Some(s.record_result(match_id, winner).unwrap());
        }
        progress.unwrap()
    }

    #[test]
    fn test_add_and_remove_players() {
        let mut s = session(0);
        let a = s.add_player("Ada").unwrap();
        let b = s.add_player("Bo").unwrap();
        assert_eq!((a, b), (1, 2));
        assert_eq!(
            s.add_player("ada"),
            Err(TournamentError::DuplicatePlayer("ada".to_string()))
        );

        let removed = s.remove_player(a).unwrap();
        assert_eq!(removed.name, "Ada");
        assert_eq!(s.remove_player(a), Err(TournamentError::PlayerNotFound(a)));
    }

    #[test]
    fn test_start_requires_three_players() {
        let mut s = session(2);
        assert_eq!(
            s.start(),
            Err(TournamentError::NotEnoughPlayers {
                required: 3,
                actual: 2
            })
        );
        assert!(!s.tournament().has_started());
    }

    #[test]
    fn test_start_locks_roster() {
        let mut s = session(3);
        let progress = s.start().unwrap();
        assert_eq!(
            progress,
            Progress::RoundCreated {
                round: 1,
                round_type: RoundType::Regular,
                matches: 1
            }
        );
        assert_eq!(s.add_player("Late"), Err(TournamentError::AlreadyStarted));
        assert_eq!(s.remove_player(1), Err(TournamentError::AlreadyStarted));
        assert_eq!(s.start(), Err(TournamentError::AlreadyStarted));
    }

    #[test]
    fn test_record_result_validation_leaves_state_unchanged() {
        let mut s = session(3);
        assert_eq!(s.record_result(1, 1), Err(TournamentError::NotStarted));
        s.start().unwrap();
        let before = s.tournament().clone();

        assert_eq!(s.record_result(99, 1), Err(TournamentError::MatchNotFound(99)));
        assert_eq!(
            s.record_result(1, 42),
            Err(TournamentError::InvalidWinner {
                match_id: 1,
                player_id: 42
            })
        );
        assert_eq!(s.tournament(), &before);
    }

    #[test]
    fn test_result_applies_statistics() {
        let mut s = session(6);
        s.start().unwrap();
        let m = s.pending_matches()[0].clone();
        let winner = m.participants[1];
        let progress = s.record_result(m.id, winner).unwrap();
        assert_eq!(progress, Progress::RoundOpen { round: 1, remaining: 1 });

        for id in &m.participants {
            let p = s.tournament().player(*id).unwrap();
            if *id == winner {
                assert_eq!((p.points, p.wins, p.losses), (3, 1, 0));
            } else {
                assert_eq!((p.points, p.wins, p.losses), (0, 0, 1));
            }
        }
        assert_eq!(
            s.record_result(m.id, winner),
            Err(TournamentError::MatchAlreadyDecided(m.id))
        );
    }

    #[test]
    fn test_byes_receive_points() {
        let mut s = session(5);
        s.start().unwrap();
        let round = &s.tournament().rounds[0];
        assert_eq!(round.byes.len(), 2);
        for bye in &round.byes {
            let p = s.tournament().player(bye.player_id).unwrap();
            assert_eq!(p.points, 1);
            assert!(!round.plays(bye.player_id));
        }
    }

    #[test]
    fn test_full_tournament_reaches_winner() {
        let mut s = session(6);
        let mut progress = s.start().unwrap();
        let mut rounds = 0;
        while !matches!(progress, Progress::Completed { .. }) {
            progress = play_round(&mut s);
            rounds += 1;
            assert!(rounds < 50, "tournament did not terminate");
        }

        let t = s.tournament();
        let final_round = t.final_round().unwrap();
        assert_eq!(final_round.matches.len(), 1);
        assert_eq!(s.winner(), final_round.matches[0].winner);
        assert_eq!(progress, Progress::Completed { winner: s.winner() });
        assert_eq!(s.record_result(1, 1), Err(TournamentError::AlreadyComplete));
        assert_eq!(s.add_player("Late"), Err(TournamentError::AlreadyComplete));
    }

    #[test]
    fn test_history_index_tracks_rounds() {
        let mut s = session(7);
        s.start().unwrap();
        play_round(&mut s);
        play_round(&mut s);
        assert_eq!(s.history.len(), used_keys(s.tournament()).len());
    }

    #[test]
    fn test_final_awards_no_points() {
        let mut s = session(3);
        let mut progress = s.start().unwrap();
        while !matches!(
            progress,
            Progress::RoundCreated {
                round_type: RoundType::Final,
                ..
            }
        ) {
            progress = play_round(&mut s);
        }
        let points_before: Vec<u32> = s.tournament().players.iter().map(|p| p.points).collect();
        play_round(&mut s);
        let points_after: Vec<u32> = s.tournament().players.iter().map(|p| p.points).collect();
        assert_eq!(points_before, points_after);
        assert_eq!(s.winner(), Some(1));
    }

    #[test]
    fn test_advance_rejects_open_round() {
        let mut s = session(3);
        s.start().unwrap();
        assert_eq!(s.advance(), Err(TournamentError::RoundStillOpen(1)));
    }

    #[test]
    fn test_resume_without_current_round_keeps_history() {
        let mut s = session(6);
        s.start().unwrap();
        let first: Vec<_> = s.tournament().rounds[0]
            .matches
            .iter()
            .filter_map(|m| m.triple())
            .collect();

        let mut snapshot = s.tournament().clone();
        snapshot.current_round = 0;
        let mut resumed = TournamentSession::from_tournament(snapshot, EngineConfig::default().with_seed(11));
        let progress = play_round(&mut resumed);

        assert_eq!(
            progress,
            Progress::RoundCreated {
                round: 2,
                round_type: RoundType::Regular,
                matches: 2
            }
        );
        let t = resumed.tournament();
        let numbers: Vec<u32> = t.rounds.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert!(t.rounds[1]
            .matches
            .iter()
            .filter_map(|m| m.triple())
            .all(|k| !first.contains(&k)));
    }

    #[test]
    fn test_resume_from_snapshot() {
        let mut s = session(6);
        s.start().unwrap();
        play_round(&mut s);
        let snapshot = s.tournament().clone();

        let resumed = TournamentSession::from_tournament(snapshot.clone(), EngineConfig::default());
        assert_eq!(resumed.tournament(), &snapshot);
        assert_eq!(resumed.history.len(), used_keys(&snapshot).len());
    }
}
