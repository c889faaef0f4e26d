//! Triple - canonical grouping of three distinct players
//!
//! A triple is stored sorted ascending so that equality, hashing and
//! ordering only depend on membership. The same value is used for proposed
//! pairings and for the "already matched" history keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// Three distinct player ids, sorted ascending
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[PlayerId; 3]", into = "[PlayerId; 3]")]
pub struct Triple([PlayerId; 3]);

impl Triple {
    /// Build a canonical triple, or `None` if any id is repeated
    pub fn new(a: PlayerId, b: PlayerId, c: PlayerId) -> Option<Self> {
        let mut ids = [a, b, c];
        ids.sort_unstable();
        if ids[0] == ids[1] || ids[1] == ids[2] {
            return None;
        }
        Some(Self(ids))
    }

    /// Build from a participant list; only lists of exactly 3 distinct ids qualify
    pub fn from_slice(ids: &[PlayerId]) -> Option<Self> {
        match *ids {
            [a, b, c] => Self::new(a, b, c),
            _ => None,
        }
    }

    /// Member ids in ascending order
    pub fn ids(&self) -> [PlayerId; 3] {
        self.0
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.0.contains(&id)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.0[0], self.0[1], self.0[2])
    }
}

impl TryFrom<[PlayerId; 3]> for Triple {
    type Error = String;

    fn try_from(ids: [PlayerId; 3]) -> Result<Self, Self::Error> {
        Self::new(ids[0], ids[1], ids[2]).ok_or_else(|| format!("repeated player in triple {:?}", ids))
    }
}

impl From<Triple> for [PlayerId; 3] {
    fn from(triple: Triple) -> Self {
        triple.0
    }
}
