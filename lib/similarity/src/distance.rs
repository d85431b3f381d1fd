//! Distance and score functions
//!
//! Cosine distance ranges over [0, 2]: 0 for vectors pointing the same way,
//! 1 for orthogonal ones, 2 for opposite ones. The similarity score is the
//! same quantity on a percentage-like scale and is never clamped.

use twinscout_core::Vector;

/// Cosine distance `1 - cos(a, b)`
#[inline]
pub fn cosine_distance(a: &Vector, b: &Vector) -> f64 {
    1.0 - a.cosine_similarity(b)
}

/// Similarity score for a cosine distance: `(1 - distance) * 100`.
///
/// 100 means identical direction, 0 orthogonal, -100 opposite.
#[inline]
pub fn similarity_score(distance: f64) -> f64 {
    (1.0 - distance) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_distance_range() {
        let a = Vector::new(vec![1.0, 1.0]);
        assert!(cosine_distance(&a, &Vector::new(vec![2.0, 2.0])).abs() < 1e-12);
        assert!((cosine_distance(&a, &Vector::new(vec![1.0, -1.0])) - 1.0).abs() < 1e-12);
        assert!((cosine_distance(&a, &Vector::new(vec![-1.0, -1.0])) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_score_is_not_clamped() {
        assert_eq!(similarity_score(0.0), 100.0);
        assert_eq!(similarity_score(1.0), 0.0);
        assert_eq!(similarity_score(2.0), -100.0);
        assert!(similarity_score(1.5) < 0.0);
    }
}
