//! TRIO Core - Tournament data model
//!
//! This crate provides the shared types for three-player tournaments:
//! - Players and their running record
//! - Canonical player triples (match groupings)
//! - Matches, rounds and round types
//! - Tournament snapshots with JSON load/save
//! - Validation errors raised while mutating a tournament

pub mod error;
pub mod player;
pub mod round;
pub mod tournament;
pub mod triple;

// Re-exports for convenient access
pub use error::TournamentError;
pub use player::{Player, PlayerId};
pub use round::{ByeAward, Match, MatchId, Round, RoundType};
pub use tournament::{Tournament, TournamentKind, TournamentStatus};
pub use triple::Triple;
