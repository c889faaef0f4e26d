//! Standings - ranking players by record and detecting ties
//!
//! Level 4 - Utilities

use std::cmp::Ordering;

use trio_core::{Player, PlayerId};

/// Row of a standings table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standing {
    /// 1-based position
    pub rank: usize,
    pub player_id: PlayerId,
    pub name: String,
    pub points: u32,
    pub wins: u32,
    pub losses: u32,
    pub matches_played: u32,
}

/// Ranking order: points desc, wins desc, losses asc, id asc
pub fn compare_players(a: &Player, b: &Player) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| a.losses.cmp(&b.losses))
        .then_with(|| a.id.cmp(&b.id))
}

/// Players ordered best first
pub fn sort_players(players: &[Player]) -> Vec<&Player> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| compare_players(a, b));
    sorted
}

/// Same points, wins and losses
pub fn are_tied(a: &Player, b: &Player) -> bool {
    a.points == b.points && a.wins == b.wins && a.losses == b.losses
}

/// True when the podium is decided: fewer than four players, or the
/// third and fourth ranked players are not tied.
pub fn has_clear_top3(players: &[Player]) -> bool {
    if players.len() < 4 {
        return true;
    }
    let sorted = sort_players(players);
    !are_tied(sorted[2], sorted[3])
}

/// Ranked standings table
pub fn standings(players: &[Player]) -> Vec<Standing> {
    sort_players(players)
        .into_iter()
        .enumerate()
        .map(|(i, p)| Standing {
            rank: i + 1,
            player_id: p.id,
            name: p.name.clone(),
            points: p.points,
            wins: p.wins,
            losses: p.losses,
            matches_played: p.matches_played(),
        })
        .collect()
}
