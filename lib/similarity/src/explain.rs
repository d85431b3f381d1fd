//! Explainability for twin scores
//!
//! A cosine similarity is a sum over features of `t_f * c_f / (|t| |c|)`, so
//! each score splits exactly into per-feature contributions. Positive terms
//! are features where target and twin sit on the same side of the roster
//! mean; negative terms pull the score down.

use crate::report::Twin;
use serde::Serialize;
use std::collections::BTreeMap;
use twinscout_core::{Feature, Vector};

/// Per-feature contributions to a similarity score, in score points.
///
/// The values sum to the similarity score. Zero-length vectors contribute
/// nothing, matching their score of 0.
pub fn contributions(target: &Vector, candidate: &Vector) -> BTreeMap<Feature, f64> {
    let denom = target.norm() * candidate.norm();
    Feature::ALL
        .iter()
        .map(|f| {
            let i = f.index();
            let term = if denom == 0.0 || i >= target.dim() || i >= candidate.dim() {
                0.0
            } else {
                target[i] * candidate[i] / denom * 100.0
            };
            (*f, term)
        })
        .collect()
}

/// Summary statistics for a twin query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityStats {
    /// Number of candidates considered
    pub candidates_count: usize,
    /// Number of twins returned
    pub results_count: usize,
    pub avg_score: f64,
    pub best_score: f64,
    pub worst_score: f64,
    /// Feature that contributed most to the best twin
    pub top_contributing_feature: Option<Feature>,
}

impl SimilarityStats {
    /// Compute stats from ranked twins (closest first)
    pub fn compute(twins: &[Twin], candidates_count: usize) -> Self {
        let (best, worst) = match (twins.first(), twins.last()) {
            (Some(best), Some(worst)) => (best, worst),
            _ => {
                return Self {
                    candidates_count,
                    results_count: 0,
                    avg_score: 0.0,
                    best_score: 0.0,
                    worst_score: 0.0,
                    top_contributing_feature: None,
                }
            }
        };

        let avg_score = twins.iter().map(|t| t.score).sum::<f64>() / twins.len() as f64;
        let top_contributing_feature = best
            .contributions
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(feature, _)| *feature);

        Self {
            candidates_count,
            results_count: twins.len(),
            avg_score,
            best_score: best.score,
            worst_score: worst.score,
            top_contributing_feature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::similarity_score;
    use twinscout_core::PlayerRecord;

    fn twin(name: &str, score: f64, assists: f64) -> Twin {
        let mut contributions = BTreeMap::new();
        contributions.insert(Feature::Goals, 10.0);
        contributions.insert(Feature::Assists, assists);
        Twin {
            rank: 1,
            row: 0,
            record: PlayerRecord::new(name, "MF", 1, 1, 1, 1.0, 0.1),
            distance: 1.0 - score / 100.0,
            score,
            contributions,
        }
    }

    #[test]
    fn test_contributions_sum_to_score() {
        let t = Vector::new(vec![1.0, -0.5, 0.3, 2.0, -1.2]);
        let c = Vector::new(vec![0.7, 0.4, -0.9, 1.1, -0.2]);
        let parts = contributions(&t, &c);
        let total: f64 = parts.values().sum();
        let expected = similarity_score(crate::distance::cosine_distance(&t, &c));
        assert!((total - expected).abs() < 1e-9, "{} vs {}", total, expected);
        assert!(parts[&Feature::Shots] < 0.0);
    }

    #[test]
    fn test_zero_vector_contributes_nothing() {
        let parts = contributions(&Vector::new(vec![0.0; 5]), &Vector::new(vec![1.0; 5]));
        assert!(parts.values().all(|v| *v == 0.0));
    }

    #[test]
    fn test_similarity_stats() {
        let twins = vec![twin("A", 90.0, 50.0), twin("B", 60.0, 5.0), twin("C", -30.0, 1.0)];
        let stats = SimilarityStats::compute(&twins, 8);

        assert_eq!(stats.candidates_count, 8);
        assert_eq!(stats.results_count, 3);
        assert_eq!(stats.best_score, 90.0);
        assert_eq!(stats.worst_score, -30.0);
        assert!((stats.avg_score - 40.0).abs() < 1e-12);
        assert_eq!(stats.top_contributing_feature, Some(Feature::Assists));
    }

    #[test]
    fn test_empty_stats() {
        let stats = SimilarityStats::compute(&[], 5);
        assert_eq!(stats.results_count, 0);
        assert_eq!(stats.top_contributing_feature, None);
    }
}
