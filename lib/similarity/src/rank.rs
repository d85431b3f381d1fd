//! Top-K selection
//!
//! Candidates are ordered by ascending cosine distance. Equal distances keep
//! table row order, so identical input always yields the identical ranking.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use twinscout_core::{Error, Result};

/// Default number of twins in a report
pub const DEFAULT_K: usize = 5;

/// A candidate row and its cosine distance from the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub row: usize,
    pub distance: f64,
}

impl Neighbor {
    pub fn new(row: usize, distance: f64) -> Self {
        Self { row, distance }
    }

    /// Closest first, then lowest row
    #[inline]
    pub fn cmp_rank(&self, other: &Neighbor) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.row.cmp(&other.row))
    }
}

/// How to treat a request for more twins than the roster holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankPolicy {
    /// Fail with `InsufficientData` unless exactly k twins can be returned
    #[default]
    Strict,
    /// Return `min(k, available)` twins; fail only when there are none
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranker {
    k: usize,
    policy: RankPolicy,
}

impl Default for Ranker {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            policy: RankPolicy::Strict,
        }
    }
}

impl Ranker {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RankPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn policy(&self) -> RankPolicy {
        self.policy
    }

    /// Check k against the number of available candidates before any work is done
    pub fn check(&self, available: usize) -> Result<usize> {
        if self.k == 0 {
            return Err(Error::InvalidParameter("k must be at least 1".to_string()));
        }
        match self.policy {
            RankPolicy::Strict if available < self.k => Err(Error::InsufficientData {
                requested: self.k,
                available,
            }),
            RankPolicy::Partial if available == 0 => Err(Error::InsufficientData {
                requested: self.k,
                available,
            }),
            _ => Ok(self.k.min(available)),
        }
    }

    /// Select the k closest candidates, closest first.
    ///
    /// Candidates must not contain the target row.
    pub fn rank(&self, mut candidates: Vec<Neighbor>) -> Result<Vec<Neighbor>> {
        let take = self.check(candidates.len())?;
        if candidates.iter().any(|c| c.distance.is_nan()) {
            return Err(Error::InvalidParameter(
                "candidate distance is NaN".to_string(),
            ));
        }

        // Stable sort; row tie-break makes the order total anyway
        candidates.sort_by(Neighbor::cmp_rank);
        candidates.truncate(take);
        Ok(candidates)
    }
}
