//! Shared command arguments
//!
//! Level 4 - Configuration

use clap::ValueEnum;

use trio_core::TournamentKind;
use trio_tournament::{ByePolicy, EngineConfig};

/// Tournament format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    #[default]
    Swiss,
    ChampionsMeeting,
}

impl From<KindArg> for TournamentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Swiss => TournamentKind::Swiss,
            KindArg::ChampionsMeeting => TournamentKind::ChampionsMeeting,
        }
    }
}

/// Points handed to players sitting out a round
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ByePolicyArg {
    /// +1 for every bye
    #[default]
    Flat,
    /// +2 for byes in the bottom half of the standings, +1 otherwise
    RankWeighted,
}

impl From<ByePolicyArg> for ByePolicy {
    fn from(policy: ByePolicyArg) -> Self {
        match policy {
            ByePolicyArg::Flat => ByePolicy::Flat { points: 1 },
            ByePolicyArg::RankWeighted => ByePolicy::RankWeighted,
        }
    }
}

/// Engine configuration from command-line flags
pub fn engine_config(seed: Option<u64>, bye_policy: ByePolicyArg, parallel: bool) -> EngineConfig {
    let config = EngineConfig::default()
        .with_bye_policy(bye_policy.into())
        .with_parallel(parallel);
    match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}
