//! Player - participant identity and running record

use serde::{Deserialize, Serialize};

/// Stable player identifier within a tournament
pub type PlayerId = u32;

/// A tournament participant
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Cumulative points (match wins plus bye compensation)
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

impl Player {
    /// Create a player with an empty record
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            points: 0,
            wins: 0,
            losses: 0,
        }
    }

    /// Set the record (builder style, mostly for fixtures)
    pub fn with_record(mut self, points: u32, wins: u32, losses: u32) -> Self {
        self.points = points;
        self.wins = wins;
        self.losses = losses;
        self
    }

    /// Matches with a recorded result
    pub fn matches_played(&self) -> u32 {
        self.wins + self.losses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_has_empty_record() {
        let player = Player::new(7, "Ada");
        assert_eq!(player.id, 7);
        assert_eq!(player.name, "Ada");
        assert_eq!(player.points, 0);
        assert_eq!(player.matches_played(), 0);
    }

    #[test]
    fn test_matches_played() {
        let player = Player::new(1, "Bo").with_record(6, 2, 3);
        assert_eq!(player.matches_played(), 5);
    }

    #[test]
    fn test_record_defaults_when_missing_from_json() {
        let player: Player = serde_json::from_str(r#"{"id": 3, "name": "Cy"}"#).unwrap();
        assert_eq!(player, Player::new(3, "Cy"));
    }
}
