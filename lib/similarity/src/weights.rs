//! Feature weighting
//!
//! A weight is a multiplicative factor on one feature. Unlisted features keep
//! weight 1.0, so an empty map leaves the feature space untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use twinscout_core::{Error, Feature, Result};

/// Default assist weight used by the scouting report
pub const DEFAULT_ASSIST_WEIGHT: f64 = 1.6;

/// Lower bound of the assist weight accepted by the shell
pub const MIN_ASSIST_WEIGHT: f64 = 1.0;

/// Upper bound of the assist weight accepted by the shell
pub const MAX_ASSIST_WEIGHT: f64 = 3.0;

/// Per-feature multiplicative weights
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureWeights {
    weights: BTreeMap<Feature, f64>,
}

impl FeatureWeights {
    /// All features at weight 1.0
    pub fn uniform() -> Self {
        Self::default()
    }

    /// Only assists weighted
    pub fn assists(weight: f64) -> Self {
        Self::uniform().with(Feature::Assists, weight)
    }

    #[must_use]
    pub fn with(mut self, feature: Feature, weight: f64) -> Self {
        self.weights.insert(feature, weight);
        self
    }

    /// Weight of a feature, 1.0 when unset
    #[inline]
    pub fn get(&self, feature: Feature) -> f64 {
        self.weights.get(&feature).copied().unwrap_or(1.0)
    }

    /// Features carrying an explicit weight other than 1.0
    pub fn weighted_features(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        self.weights
            .iter()
            .filter(|(_, w)| **w != 1.0)
            .map(|(f, w)| (*f, *w))
    }

    /// Weights must be finite and strictly positive
    pub fn validate(&self) -> Result<()> {
        for (feature, weight) in &self.weights {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(Error::InvalidWeight {
                    feature: *feature,
                    weight: *weight,
                });
            }
        }
        Ok(())
    }
}

/// Where in the transform pipeline weights are applied.
///
/// Scaling a raw column also scales its standard deviation by the same
/// factor, so under `Raw` the weight cancels out of the z-scores entirely.
/// `Standardized` scales the z-scores instead and is the only stage where a
/// larger weight increases a feature's influence on distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightStage {
    /// Multiply raw values, then standardize
    Raw,
    /// Standardize, then multiply z-scores
    #[default]
    Standardized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_features_default_to_one() {
        let weights = FeatureWeights::assists(1.6);
        assert_eq!(weights.get(Feature::Assists), 1.6);
        assert_eq!(weights.get(Feature::Goals), 1.0);
        assert_eq!(
            weights.weighted_features().collect::<Vec<_>>(),
            vec![(Feature::Assists, 1.6)]
        );
        assert_eq!(FeatureWeights::assists(1.0).weighted_features().count(), 0);
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        assert!(FeatureWeights::assists(2.0).validate().is_ok());
        assert!(matches!(
            FeatureWeights::assists(0.0).validate(),
            Err(Error::InvalidWeight { feature: Feature::Assists, .. })
        ));
        assert!(FeatureWeights::assists(-1.0).validate().is_err());
        assert!(FeatureWeights::assists(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_serde_map_by_column_name() {
        let weights = FeatureWeights::uniform()
            .with(Feature::Assists, 2.0)
            .with(Feature::Shots, 0.5);
        let json = serde_json::to_string(&weights).unwrap();
        assert_eq!(json, r#"{"assists":2.0,"sh":0.5}"#);

        let parsed: FeatureWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, weights);
    }

    #[test]
    fn test_unknown_feature_in_map_rejected() {
        let parsed = serde_json::from_str::<FeatureWeights>(r#"{"tackles":2.0}"#);
        assert!(parsed.is_err());
    }
}
