//! Rounds and matches

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;
use crate::triple::Triple;

/// Match identifier, unique within a tournament
pub type MatchId = u32;

/// Kind of round in the tournament progression
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundType {
    /// Swiss-style round driven by the combination selector
    #[default]
    Regular,
    /// Extra round to separate players tied for the podium
    Tiebreaker,
    /// Single match between the top three
    Final,
}

/// A single three-player match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub participants: Vec<PlayerId>,
    #[serde(default)]
    pub winner: Option<PlayerId>,
}

impl Match {
    /// Create an undecided match for a triple
    pub fn new(id: MatchId, triple: Triple) -> Self {
        Self {
            id,
            participants: triple.ids().to_vec(),
            winner: None,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    pub fn involves(&self, id: PlayerId) -> bool {
        self.participants.contains(&id)
    }

    /// Canonical key, if the match has exactly three distinct participants
    pub fn triple(&self) -> Option<Triple> {
        Triple::from_slice(&self.participants)
    }
}

/// Points handed to a player who sat out a round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByeAward {
    pub player_id: PlayerId,
    pub points: u32,
}

/// One round of play
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub round_type: RoundType,
    pub matches: Vec<Match>,
    #[serde(default)]
    pub byes: Vec<ByeAward>,
}

impl Round {
    pub fn new(number: u32, round_type: RoundType) -> Self {
        Self {
            number,
            round_type,
            matches: Vec::new(),
            byes: Vec::new(),
        }
    }

    /// A round is completed once every match in it has a winner
    pub fn is_completed(&self) -> bool {
        self.matches.iter().all(Match::is_decided)
    }

    /// True if the player appears in any match of this round
    pub fn plays(&self, id: PlayerId) -> bool {
        self.matches.iter().any(|m| m.involves(id))
    }

    pub fn find_match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(a: PlayerId, b: PlayerId, c: PlayerId) -> Triple {
        Triple::new(a, b, c).unwrap()
    }

    #[test]
    fn test_round_completion() {
        let mut round = Round::new(1, RoundType::Regular);
        round.matches.push(Match::new(1, triple(1, 2, 3)));
        round.matches.push(Match::new(2, triple(4, 5, 6)));
        assert!(!round.is_completed());

        round.find_match_mut(1).unwrap().winner = Some(2);
        assert!(!round.is_completed());

        round.find_match_mut(2).unwrap().winner = Some(6);
        assert!(round.is_completed());
    }

    #[test]
    fn test_empty_round_is_completed() {
        assert!(Round::new(4, RoundType::Tiebreaker).is_completed());
    }

    #[test]
    fn test_match_triple_requires_three_participants() {
        let m = Match {
            id: 1,
            participants: vec![1, 2],
            winner: None,
        };
        assert!(m.triple().is_none());
        assert_eq!(Match::new(2, triple(3, 1, 2)).triple(), Some(triple(1, 2, 3)));
    }

    #[test]
    fn test_plays() {
        let mut round = Round::new(1, RoundType::Regular);
        round.matches.push(Match::new(1, triple(1, 2, 3)));
        assert!(round.plays(2));
        assert!(!round.plays(4));
    }

    #[test]
    fn test_round_type_serde() {
        let json = serde_json::to_string(&RoundType::Tiebreaker).unwrap();
        assert_eq!(json, "\"tiebreaker\"");
    }
}
