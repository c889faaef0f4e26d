//! History tracking - triples already matched and byes already received
//!
//! Level 3 - Steps

use rustc_hash::{FxHashMap, FxHashSet};
use trio_core::{Match, PlayerId, Tournament, Triple};

use crate::combinations::generate_all_combinations;

/// Canonical keys of every three-player match in every round,
/// regardless of round type or completion.
pub fn used_keys(tournament: &Tournament) -> FxHashSet<Triple> {
    tournament
        .rounds
        .iter()
        .flat_map(|round| round.matches.iter())
        .filter_map(Match::triple)
        .collect()
}

/// All combinations of `ids` that have not been played yet
pub fn unused_combinations(ids: &[PlayerId], tournament: &Tournament) -> Vec<Triple> {
    CombinationHistory::from_tournament(tournament).unused(ids)
}

/// Number of completed rounds in which each player appeared in no match
pub fn bye_counts(tournament: &Tournament) -> FxHashMap<PlayerId, usize> {
    let mut counts: FxHashMap<PlayerId, usize> =
        tournament.players.iter().map(|p| (p.id, 0)).collect();

    for round in tournament.rounds.iter().filter(|r| r.is_completed()) {
        for (id, count) in counts.iter_mut() {
            if !round.plays(*id) {
                *count += 1;
            }
        }
    }
    counts
}

/// Running set of used triples.
///
/// Built once from a snapshot and then updated as matches are created, so
/// repeated planning does not rescan the whole round history. Its contents
/// always equal [`used_keys`] of the same tournament.
#[derive(Clone, Debug, Default)]
pub struct CombinationHistory {
    used: FxHashSet<Triple>,
}

impl CombinationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tournament(tournament: &Tournament) -> Self {
        Self {
            used: used_keys(tournament),
        }
    }

    /// Record a match; returns false if it was not a valid triple or already known
    pub fn record(&mut self, m: &Match) -> bool {
        match m.triple() {
            Some(triple) => self.used.insert(triple),
            None => false,
        }
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.used.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Combinations of `ids` not yet in the history
    pub fn unused(&self, ids: &[PlayerId]) -> Vec<Triple> {
        generate_all_combinations(ids)
            .into_iter()
            .filter(|t| !self.used.contains(t))
            .collect()
    }
}
