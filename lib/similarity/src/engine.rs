//! Similarity engine
//!
//! Computes cosine distances from a target row to the rest of the transformed
//! space and hands them to the [`Ranker`]. Candidate generation sits behind
//! [`NeighborSearch`] so an index can replace the brute-force scan.

use crate::distance::cosine_distance;
use crate::rank::{Neighbor, Ranker};
use crate::transform::TransformedSpace;
use tracing::trace;
use twinscout_core::{Error, Result};

pub trait NeighborSearch {
    /// Distances from `target` to candidate rows, target excluded.
    ///
    /// An exhaustive implementation returns every other row; an approximate
    /// one may return a shortlist. Order is unspecified.
    fn candidates(&self, space: &TransformedSpace, target: usize) -> Result<Vec<Neighbor>>;
}

/// Exhaustive O(N·F) scan over every row
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl NeighborSearch for BruteForce {
    fn candidates(&self, space: &TransformedSpace, target: usize) -> Result<Vec<Neighbor>> {
        let query = space.row(target).ok_or_else(|| {
            Error::InvalidParameter(format!(
                "target row {} out of range for {} rows",
                target,
                space.len()
            ))
        })?;

        space
            .rows()
            .iter()
            .enumerate()
            .filter(|(row, _)| *row != target)
            .map(|(row, vector)| {
                if vector.dim() != query.dim() {
                    return Err(Error::InvalidParameter(format!(
                        "row {} has dimension {}, expected {}",
                        row,
                        vector.dim(),
                        query.dim()
                    )));
                }
                Ok(Neighbor::new(row, cosine_distance(query, vector)))
            })
            .collect()
    }
}

/// Nearest-neighbour search over a transformed space
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine<S = BruteForce> {
    search: S,
}

impl SimilarityEngine<BruteForce> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: NeighborSearch> SimilarityEngine<S> {
    pub fn with_search(search: S) -> Self {
        Self { search }
    }

    /// The `k` rows closest to `target`, closest first, as (row, distance)
    pub fn nearest(&self, space: &TransformedSpace, target: usize, k: usize) -> Result<Vec<Neighbor>> {
        self.nearest_with(space, target, &Ranker::new(k))
    }

    /// Like [`nearest`](Self::nearest) with a configured ranker
    pub fn nearest_with(
        &self,
        space: &TransformedSpace,
        target: usize,
        ranker: &Ranker,
    ) -> Result<Vec<Neighbor>> {
        // Fail before scanning when the roster cannot satisfy k
        ranker.check(space.len().saturating_sub(1))?;

        let candidates = self.search.candidates(space, target)?;
        trace!(target_row = target, candidates = candidates.len(), "Scored candidates");

        let ranked = ranker.rank(candidates)?;
        debug_assert!(ranked.iter().all(|n| n.row != target));
        Ok(ranked)
    }
}
