//! Target match counts - how many matches each player plays before
//! standings are considered final

use trio_core::Tournament;

/// Matches each player should play for a field of `player_count`
pub fn target_matches(player_count: usize) -> usize {
    match player_count {
        0..=4 => 3,
        5..=6 => 4,
        7..=9 => 5,
        10..=12 => 6,
        n => ((n - 1) / 2 + 2).min(8),
    }
}

/// Every player has played at least the target number of matches
pub fn all_reached_target(tournament: &Tournament) -> bool {
    let target = target_matches(tournament.players.len());
    tournament
        .players
        .iter()
        .all(|p| p.matches_played() as usize >= target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trio_core::{Player, TournamentKind};

    #[test]
    fn test_target_table() {
        assert_eq!(target_matches(3), 3);
        assert_eq!(target_matches(4), 3);
        assert_eq!(target_matches(5), 4);
        assert_eq!(target_matches(6), 4);
        assert_eq!(target_matches(9), 5);
        assert_eq!(target_matches(12), 6);
        assert_eq!(target_matches(13), 8);
        assert_eq!(target_matches(20), 8);
    }

    #[test]
    fn test_target_large_field_capped() {
        assert_eq!(target_matches(100), 8);
    }

    #[test]
    fn test_all_reached_target() {
        let players: Vec<Player> = (1..=4)
            .map(|id| Player::new(id, format!("P{}", id)).with_record(0, 1, 2))
            .collect();
        let mut t = Tournament::new("t", TournamentKind::Swiss).with_players(players);
        assert!(all_reached_target(&t));

        t.players[2].losses = 1;
        assert!(!all_reached_target(&t));
    }
}
