//! Validation errors for tournament mutations

use crate::player::PlayerId;
use crate::round::MatchId;

/// Errors raised when a requested change is not allowed.
///
/// None of these leave the tournament partially modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TournamentError {
    #[error("tournament has already started")]
    AlreadyStarted,

    #[error("tournament has not started yet")]
    NotStarted,

    #[error("tournament is already complete")]
    AlreadyComplete,

    #[error("need at least {required} players, have {actual}")]
    NotEnoughPlayers { required: usize, actual: usize },

    #[error("a player named '{0}' already exists")]
    DuplicatePlayer(String),

    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("match {0} not found")]
    MatchNotFound(MatchId),

    #[error("match {0} already has a winner")]
    MatchAlreadyDecided(MatchId),

    #[error("player {player_id} did not play in match {match_id}")]
    InvalidWinner { match_id: MatchId, player_id: PlayerId },

    #[error("round {0} is still open")]
    RoundStillOpen(u32),
}
