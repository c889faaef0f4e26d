//! Bye allocation - players left out of a round and their compensation
//!
//! Level 3 - Steps

use rustc_hash::FxHashSet;
use trio_core::{ByeAward, Player, PlayerId, Tournament, Triple};

use crate::config::ByePolicy;
use crate::history::bye_counts;
use crate::standings::sort_players;

/// Players not in any selected match, fairest first: fewest previous byes,
/// then fewest points, then lowest id.
pub fn select_bye_players(
    players: &[Player],
    selected: &[Triple],
    tournament: &Tournament,
) -> Vec<PlayerId> {
    let playing: FxHashSet<PlayerId> = selected.iter().flat_map(|t| t.ids()).collect();
    let counts = bye_counts(tournament);

    let mut byes: Vec<&Player> = players
        .iter()
        .filter(|p| !playing.contains(&p.id))
        .collect();
    byes.sort_by_key(|p| (counts.get(&p.id).copied().unwrap_or(0), p.points, p.id));
    byes.into_iter().map(|p| p.id).collect()
}

/// Points for each bye player under the given policy.
///
/// Ranks are taken from `players` as they stand before the awards.
pub fn assign_bye_points(policy: ByePolicy, byes: &[PlayerId], players: &[Player]) -> Vec<ByeAward> {
    match policy {
        ByePolicy::Flat { points } => byes
            .iter()
            .map(|&player_id| ByeAward { player_id, points })
            .collect(),
        ByePolicy::RankWeighted => {
            let sorted = sort_players(players);
            let half = sorted.len() / 2;
            byes.iter()
                .map(|&player_id| {
                    let rank = sorted.iter().position(|p| p.id == player_id).unwrap_or(0);
                    let points = if rank >= half { 2 } else { 1 };
                    ByeAward { player_id, points }
                })
                .collect()
        }
    }
}
