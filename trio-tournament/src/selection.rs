//! Match selection - choosing a conflict-free set of triples for a round
//!
//! Level 3 - Steps
//!
//! Later rounds use a greedy walk over the unused combinations, ordered so
//! that players with fewer matches come first and, among those, groups with
//! similar records. The first round is a plain shuffle.

use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use trio_core::{Player, PlayerId, Tournament, Triple};

use crate::history::CombinationHistory;

/// Candidate triple with its ordering keys
#[derive(Clone, Copy, Debug)]
struct ScoredCandidate {
    triple: Triple,
    participation: f64,
    competitiveness: f64,
}

/// Average matches played by the three players; lower is preferred
pub fn participation_score(members: [&Player; 3]) -> f64 {
    members.iter().map(|p| p.matches_played() as f64).sum::<f64>() / 3.0
}

/// var(points) + 0.5 * var(wins); lower means a closer match
pub fn competitiveness_score(members: [&Player; 3]) -> f64 {
    let points = members.map(|p| p.points as f64);
    let wins = members.map(|p| p.wins as f64);
    variance(&points) + 0.5 * variance(&wins)
}

fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

// ============================================================================
// Later rounds
// ============================================================================

/// Pick pairwise-disjoint triples for the next round.
///
/// Greedy, not optimal: an early low-scored pick may consume players that
/// would have allowed more matches overall.
pub fn select_optimal_matches(
    players: &[Player],
    tournament: &Tournament,
    parallel: bool,
) -> Vec<Triple> {
    let history = CombinationHistory::from_tournament(tournament);
    select_from_history(players, &history, parallel)
}

pub(crate) fn select_from_history(
    players: &[Player],
    history: &CombinationHistory,
    parallel: bool,
) -> Vec<Triple> {
    let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    let candidates = history.unused(&ids);
    if candidates.is_empty() {
        return Vec::new();
    }

    let lookup: FxHashMap<PlayerId, &Player> = players.iter().map(|p| (p.id, p)).collect();
    let mut scored = score_candidates(&candidates, &lookup, parallel);
    scored.sort_by(compare_candidates);

    let selected = greedy_disjoint(&scored, lookup.len());
    tracing::debug!(
        "Selected {} matches from {} unused combinations",
        selected.len(),
        candidates.len()
    );
    selected
}

fn score_candidates(
    candidates: &[Triple],
    lookup: &FxHashMap<PlayerId, &Player>,
    parallel: bool,
) -> Vec<ScoredCandidate> {
    let score = |triple: &Triple| -> Option<ScoredCandidate> {
        let [a, b, c] = triple.ids();
        let members = [*lookup.get(&a)?, *lookup.get(&b)?, *lookup.get(&c)?];
        Some(ScoredCandidate {
            triple: *triple,
            participation: participation_score(members),
            competitiveness: competitiveness_score(members),
        })
    };

    if parallel {
        candidates.par_iter().filter_map(score).collect()
    } else {
        candidates.iter().filter_map(score).collect()
    }
}

fn compare_candidates(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    a.participation
        .partial_cmp(&b.participation)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            a.competitiveness
                .partial_cmp(&b.competitiveness)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.triple.cmp(&b.triple))
}

fn greedy_disjoint(sorted: &[ScoredCandidate], player_count: usize) -> Vec<Triple> {
    let mut used: FxHashSet<PlayerId> = FxHashSet::default();
    let mut selected = Vec::new();

    for candidate in sorted {
        if player_count - used.len() < 3 {
            break;
        }
        let ids = candidate.triple.ids();
        if ids.iter().any(|id| used.contains(id)) {
            continue;
        }
        used.extend(ids);
        selected.push(candidate.triple);
    }
    selected
}

// ============================================================================
// First round
// ============================================================================

/// Shuffle and cut into sequential triples; the remainder (< 3) sits out.
///
/// Ids are sorted before shuffling so that a seeded RNG gives the same
/// pairings regardless of input order.
pub fn first_round_matches<R: Rng + ?Sized>(
    ids: &[PlayerId],
    rng: &mut R,
) -> (Vec<Triple>, Vec<PlayerId>) {
    let mut shuffled = ids.to_vec();
    shuffled.sort_unstable();
    shuffled.dedup();
    shuffled.shuffle(rng);

    let mut chunks = shuffled.chunks_exact(3);
    let matches = chunks
        .by_ref()
        .filter_map(Triple::from_slice)
        .collect();
    let byes = chunks.remainder().to_vec();
    (matches, byes)
}
