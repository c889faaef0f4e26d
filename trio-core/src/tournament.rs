//! Tournament - full snapshot of players and round history

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::player::{Player, PlayerId};
use crate::round::{MatchId, Round, RoundType};

/// Tournament format, selects the round strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentKind {
    /// Combination-driven Swiss rounds, tiebreakers and a three-player final
    #[default]
    Swiss,
    /// Simple grouping format without podium logic
    ChampionsMeeting,
}

/// Coarse lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TournamentStatus {
    /// Players may still be added or removed
    Setup,
    InProgress,
    Complete,
}

/// In-memory tournament snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub name: String,
    #[serde(default)]
    pub kind: TournamentKind,
    pub players: Vec<Player>,
    #[serde(default)]
    pub rounds: Vec<Round>,
    /// Number of the latest round created (0 before start)
    #[serde(default)]
    pub current_round: u32,
    #[serde(default)]
    pub winner: Option<PlayerId>,
}

impl Tournament {
    pub fn new(name: impl Into<String>, kind: TournamentKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Default::default()
        }
    }

    /// Builder for fixtures: a tournament with the given players
    pub fn with_players(mut self, players: Vec<Player>) -> Self {
        self.players = players;
        self
    }

    pub fn status(&self) -> TournamentStatus {
        if self.winner.is_some() {
            TournamentStatus::Complete
        } else if self.has_started() {
            TournamentStatus::InProgress
        } else {
            TournamentStatus::Setup
        }
    }

    pub fn has_started(&self) -> bool {
        self.current_round > 0 || !self.rounds.is_empty()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// The round still waiting for results, if any
    pub fn open_round(&self) -> Option<&Round> {
        self.rounds.iter().find(|r| !r.is_completed())
    }

    /// The final round, once created
    pub fn final_round(&self) -> Option<&Round> {
        self.rounds.iter().find(|r| r.round_type == RoundType::Final)
    }

    /// Number of completed rounds of the given type
    pub fn completed_rounds_of(&self, round_type: RoundType) -> usize {
        self.rounds
            .iter()
            .filter(|r| r.round_type == round_type && r.is_completed())
            .count()
    }

    /// Number for the next round, from the round history rather than
    /// `current_round` alone, which may be missing from a snapshot
    pub fn next_round_number(&self) -> u32 {
        let latest = self.rounds.iter().map(|r| r.number).max().unwrap_or(0);
        latest.max(self.current_round) + 1
    }

    /// Next free match id
    pub fn next_match_id(&self) -> MatchId {
        self.rounds
            .iter()
            .flat_map(|r| r.matches.iter().map(|m| m.id))
            .max()
            .map_or(1, |id| id + 1)
    }

    /// Next free player id
    pub fn next_player_id(&self) -> PlayerId {
        self.players.iter().map(|p| p.id).max().map_or(1, |id| id + 1)
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tournament snapshot: {}", path.display()))?;
        let tournament = serde_json::from_str(&content)
            .with_context(|| format!("Invalid tournament snapshot: {}", path.display()))?;
        Ok(tournament)
    }

    /// Save a snapshot as pretty-printed JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write tournament snapshot: {}", path.display()))?;
        Ok(())
    }
}
