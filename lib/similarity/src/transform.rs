//! Feature transformation
//!
//! Turns a roster into a comparable vector space: per-feature weighting and
//! standardization to population z-scores. The output keeps the row order and
//! row identities of the input table.

use crate::weights::{FeatureWeights, WeightStage};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use twinscout_core::{Error, Feature, FeatureTable, Result, Vector, FEATURE_COUNT};

/// Standard deviation, relative to the column mean, below which a column is constant
pub const VARIANCE_EPSILON: f64 = 1e-12;

/// What to do with a feature that has the same value for every player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Fail with `DegenerateFeature`
    #[default]
    Reject,
    /// Write 0.0 for the feature in every row, removing it from the comparison
    ZeroFill,
}

/// Mean and population standard deviation of one feature column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnStats {
    pub feature: Feature,
    pub mean: f64,
    pub std_dev: f64,
}

impl ColumnStats {
    /// Population statistics (N denominator) of a column
    pub fn compute(feature: Feature, values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                feature,
                mean: 0.0,
                std_dev: 0.0,
            };
        }
        // Exact for constant columns; summing would leave rounding error in the mean
        let first = values[0];
        if values.iter().all(|v| *v == first) {
            return Self {
                feature,
                mean: first,
                std_dev: 0.0,
            };
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            feature,
            mean,
            std_dev: variance.sqrt(),
        }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.std_dev <= VARIANCE_EPSILON * self.mean.abs().max(1.0)
    }

    #[inline]
    pub fn z_score(&self, value: f64) -> f64 {
        (value - self.mean) / self.std_dev
    }
}

/// The transformed space for one query
#[derive(Debug, Clone)]
pub struct TransformedSpace {
    ids: Vec<String>,
    index: AHashMap<String, usize>,
    rows: Vec<Vector>,
    stats: Vec<ColumnStats>,
    dropped: Vec<Feature>,
}

impl TransformedSpace {
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn row(&self, row: usize) -> Option<&Vector> {
        self.rows.get(row)
    }

    pub fn rows(&self) -> &[Vector] {
        &self.rows
    }

    /// Identity of the player at a row
    #[inline]
    pub fn id(&self, row: usize) -> Option<&str> {
        self.ids.get(row).map(String::as_str)
    }

    #[inline]
    pub fn index_of(&self, player: &str) -> Option<usize> {
        self.index.get(player).copied()
    }

    /// Transformed vector of a player
    pub fn vector_of(&self, player: &str) -> Option<&Vector> {
        self.index_of(player).and_then(|row| self.rows.get(row))
    }

    /// Per-feature statistics, in feature order, computed after any raw-stage weighting
    pub fn stats(&self) -> &[ColumnStats] {
        &self.stats
    }

    /// Features zero-filled because they had no variance
    pub fn dropped_features(&self) -> &[Feature] {
        &self.dropped
    }
}

/// Applies weighting and standardization to a table
#[derive(Debug, Clone, Default)]
pub struct FeatureTransformer {
    weights: FeatureWeights,
    stage: WeightStage,
    degenerate: DegeneratePolicy,
}

impl FeatureTransformer {
    pub fn new(weights: FeatureWeights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_stage(mut self, stage: WeightStage) -> Self {
        self.stage = stage;
        self
    }

    #[must_use]
    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    pub fn stage(&self) -> WeightStage {
        self.stage
    }

    /// Build the transformed space of a table.
    ///
    /// Fails with `InvalidWeight` for a non-positive or non-finite weight and,
    /// under [`DegeneratePolicy::Reject`], with `DegenerateFeature` for a
    /// constant column.
    pub fn transform(&self, table: &FeatureTable) -> Result<TransformedSpace> {
        self.weights.validate()?;

        let n = table.len();
        let mut columns: Vec<Vec<f64>> = Feature::ALL.iter().map(|f| table.column(*f)).collect();

        if self.stage == WeightStage::Raw {
            for (feature, weight) in self.weights.weighted_features() {
                columns[feature.index()].iter_mut().for_each(|v| *v *= weight);
            }
        }

        let mut stats = Vec::with_capacity(FEATURE_COUNT);
        let mut dropped = Vec::new();
        for feature in Feature::ALL {
            let column = &mut columns[feature.index()];
            let column_stats = ColumnStats::compute(feature, column);

            if column_stats.is_degenerate() {
                match self.degenerate {
                    DegeneratePolicy::Reject => return Err(Error::DegenerateFeature { feature }),
                    DegeneratePolicy::ZeroFill => {
                        warn!("Feature '{}' has zero variance, zero-filling", feature);
                        column.iter_mut().for_each(|v| *v = 0.0);
                        dropped.push(feature);
                    }
                }
            } else {
                let post_weight = match self.stage {
                    WeightStage::Standardized => self.weights.get(feature),
                    WeightStage::Raw => 1.0,
                };
                column
                    .iter_mut()
                    .for_each(|v| *v = column_stats.z_score(*v) * post_weight);
            }
            stats.push(column_stats);
        }

        let rows: Vec<Vector> = (0..n)
            .map(|row| Vector::new(columns.iter().map(|c| c[row]).collect()))
            .collect();
        let ids: Vec<String> = table.player_names().map(str::to_string).collect();
        let index = ids
            .iter()
            .enumerate()
            .map(|(row, id)| (id.clone(), row))
            .collect();

        debug!(
            rows = n,
            stage = ?self.stage,
            dropped = dropped.len(),
            "Transformed feature space"
        );

        Ok(TransformedSpace {
            ids,
            index,
            rows,
            stats,
            dropped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinscout_core::PlayerRecord;

    fn table() -> FeatureTable {
        FeatureTable::new(vec![
            PlayerRecord::new("A", "MF", 5, 8, 20, 40.1, 0.11),
            PlayerRecord::new("B", "MF", 4, 6, 35, 38.5, 0.09),
            PlayerRecord::new("C", "FW", 12, 4, 50, 55.2, 0.22),
        ])
        .unwrap()
    }

    #[test]
    fn test_columns_are_z_scores() {
        let space = FeatureTransformer::default().transform(&table()).unwrap();
        assert_eq!(space.len(), 3);

        for feature in Feature::ALL {
            let col: Vec<f64> = space.rows().iter().map(|r| r[feature.index()]).collect();
            let stats = ColumnStats::compute(feature, &col);
            assert!(stats.mean.abs() < 1e-12, "{} mean {}", feature, stats.mean);
            assert!((stats.std_dev - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_population_std_dev() {
        let stats = ColumnStats::compute(Feature::Goals, &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.std_dev, 2.0);
    }

    #[test]
    fn test_rows_keep_table_order_and_identity() {
        let table = table();
        let space = FeatureTransformer::default().transform(&table).unwrap();
        for (row, name) in table.player_names().enumerate() {
            assert_eq!(space.id(row), Some(name));
            assert_eq!(space.index_of(name), Some(row));
        }
        assert!(space.vector_of("Z").is_none());
    }

    #[test]
    fn test_standardized_weight_scales_column() {
        let table = table();
        let base = FeatureTransformer::default().transform(&table).unwrap();
        let weighted = FeatureTransformer::new(FeatureWeights::assists(2.0))
            .transform(&table)
            .unwrap();
        let a = Feature::Assists.index();
        let g = Feature::Goals.index();
        for row in 0..table.len() {
            assert!((weighted.rows()[row][a] - 2.0 * base.rows()[row][a]).abs() < 1e-12);
            assert_eq!(weighted.rows()[row][g], base.rows()[row][g]);
        }
    }

    #[test]
    fn test_raw_weight_cancels_in_standardization() {
        let table = table();
        let base = FeatureTransformer::default().transform(&table).unwrap();
        let weighted = FeatureTransformer::new(FeatureWeights::assists(2.5))
            .with_stage(WeightStage::Raw)
            .transform(&table)
            .unwrap();
        for (a, b) in base.rows().iter().zip(weighted.rows()) {
            assert!(a.l2_distance(b) < 1e-12);
        }
        assert!((weighted.stats()[Feature::Assists.index()].mean - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_feature_rejected() {
        let table = FeatureTable::new(vec![
            PlayerRecord::new("A", "MF", 5, 3, 20, 40.1, 0.11),
            PlayerRecord::new("B", "MF", 4, 3, 35, 38.5, 0.09),
        ])
        .unwrap();
        let result = FeatureTransformer::default().transform(&table);
        assert!(matches!(
            result,
            Err(Error::DegenerateFeature { feature: Feature::Assists })
        ));
    }

    #[test]
    fn test_degenerate_feature_zero_filled() {
        let table = FeatureTable::new(vec![
            PlayerRecord::new("A", "MF", 5, 3, 20, 40.1, 0.11),
            PlayerRecord::new("B", "MF", 4, 3, 35, 38.5, 0.09),
        ])
        .unwrap();
        let space = FeatureTransformer::new(FeatureWeights::assists(3.0))
            .with_degenerate_policy(DegeneratePolicy::ZeroFill)
            .transform(&table)
            .unwrap();
        assert_eq!(space.dropped_features(), &[Feature::Assists]);
        for row in space.rows() {
            assert!(row.is_finite());
            assert_eq!(row[Feature::Assists.index()], 0.0);
        }
    }

    #[test]
    fn test_constant_column_on_large_roster() {
        let records: Vec<PlayerRecord> = (0..5000u32)
            .map(|i| {
                PlayerRecord::new(
                    format!("Player {}", i),
                    "MF",
                    i % 17,
                    i % 11,
                    20 + i % 40,
                    55.2,
                    f64::from(i % 13) / 20.0,
                )
            })
            .collect();
        let table = FeatureTable::new(records).unwrap();

        assert!(matches!(
            FeatureTransformer::default().transform(&table),
            Err(Error::DegenerateFeature { feature: Feature::SotPct })
        ));

        let space = FeatureTransformer::default()
            .with_degenerate_policy(DegeneratePolicy::ZeroFill)
            .transform(&table)
            .unwrap();
        assert_eq!(space.dropped_features(), &[Feature::SotPct]);
        let stats = &space.stats()[Feature::SotPct.index()];
        assert_eq!(stats.mean, 55.2);
        assert_eq!(stats.std_dev, 0.0);
        assert!(space
            .rows()
            .iter()
            .all(|row| row[Feature::SotPct.index()] == 0.0));
    }

    #[test]
    fn test_constant_column_stats_are_exact() {
        for value in [55.2, 71.3, 0.1, 1e6 + 0.3] {
            let stats = ColumnStats::compute(Feature::SotPct, &vec![value; 2000]);
            assert_eq!(stats.mean, value);
            assert_eq!(stats.std_dev, 0.0);
            assert!(stats.is_degenerate());
        }
        assert!(!ColumnStats::compute(Feature::SotPct, &[55.2, 55.3]).is_degenerate());
    }

    #[test]
    fn test_invalid_weight_rejected() {
        let result = FeatureTransformer::new(FeatureWeights::assists(0.0)).transform(&table());
        assert!(matches!(result, Err(Error::InvalidWeight { .. })));
    }
}
