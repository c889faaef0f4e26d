//! Configuration types for the pairing engine
//!
//! Level 4 - Utilities and configuration

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// How many points a player receives for sitting out a round
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByePolicy {
    /// Every bye player receives the same amount
    Flat { points: u32 },
    /// Bye players in the bottom half of the standings receive 2, others 1
    RankWeighted,
}

impl Default for ByePolicy {
    fn default() -> Self {
        ByePolicy::Flat { points: 1 }
    }
}

/// Points applied when a match result is recorded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoringConfig {
    pub win_points: u32,
    pub loss_points: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            win_points: 3,
            loss_points: 0,
        }
    }
}

/// Engine configuration
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Random seed for the first-round shuffle (None = entropy)
    pub seed: Option<u64>,
    /// Score candidate triples on the rayon pool
    pub parallel: bool,
    /// Completed tiebreaker rounds after which the final is forced
    pub max_tiebreaker_rounds: usize,
    pub bye_policy: ByePolicy,
    pub scoring: ScoringConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            parallel: false,
            max_tiebreaker_rounds: 2,
            bye_policy: ByePolicy::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_bye_policy(mut self, policy: ByePolicy) -> Self {
        self.bye_policy = policy;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_max_tiebreaker_rounds(mut self, rounds: usize) -> Self {
        self.max_tiebreaker_rounds = rounds;
        self
    }

    /// RNG for this configuration
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}
