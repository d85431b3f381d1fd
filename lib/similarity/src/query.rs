//! Query facade
//!
//! [`Scout`] runs the full pipeline for one query against one table
//! snapshot: transform, nearest, rank, explain. It holds no mutable state,
//! so identical queries return identical reports and can be cached by the
//! caller. [`ScoutSession`] owns the current snapshot and swaps it on reload;
//! its results carry the snapshot they were ranked against.

use crate::compare::{ComparisonChart, ComparisonExtractor};
use crate::distance::similarity_score;
use crate::engine::{BruteForce, NeighborSearch, SimilarityEngine};
use crate::explain::{contributions, SimilarityStats};
use crate::rank::{RankPolicy, Ranker, DEFAULT_K};
use crate::report::{Twin, TwinReport};
use crate::transform::{DegeneratePolicy, FeatureTransformer};
use crate::weights::{FeatureWeights, WeightStage, DEFAULT_ASSIST_WEIGHT};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use twinscout_core::{Error, Feature, FeatureTable, Result, TableSnapshot};

/// Query defaults and pipeline policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Number of twins per report
    pub k: usize,
    /// Weight of the assists feature
    pub assist_weight: f64,
    /// Weights of other features; an `assists` entry here is overridden by `assist_weight`
    pub weights: FeatureWeights,
    pub weight_stage: WeightStage,
    pub degenerate_policy: DegeneratePolicy,
    pub rank_policy: RankPolicy,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            assist_weight: DEFAULT_ASSIST_WEIGHT,
            weights: FeatureWeights::uniform(),
            weight_stage: WeightStage::default(),
            degenerate_policy: DegeneratePolicy::default(),
            rank_policy: RankPolicy::default(),
        }
    }
}

impl ScoutConfig {
    /// Load a JSON config file; missing keys keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidParameter(format!("config: {}", e)))
    }

    /// Effective weights for an assist weight
    pub fn weights_for(&self, assist_weight: f64) -> FeatureWeights {
        self.weights.clone().with(Feature::Assists, assist_weight)
    }

    fn transformer(&self, weights: FeatureWeights) -> FeatureTransformer {
        FeatureTransformer::new(weights)
            .with_stage(self.weight_stage)
            .with_degenerate_policy(self.degenerate_policy)
    }
}

/// Twin finder over one immutable table snapshot
#[derive(Debug, Clone)]
pub struct Scout<S = BruteForce> {
    table: TableSnapshot,
    config: ScoutConfig,
    engine: SimilarityEngine<S>,
}

impl Scout<BruteForce> {
    pub fn new(table: TableSnapshot) -> Self {
        Self::with_config(table, ScoutConfig::default())
    }

    pub fn with_config(table: TableSnapshot, config: ScoutConfig) -> Self {
        Self {
            table,
            config,
            engine: SimilarityEngine::new(),
        }
    }
}

impl<S: NeighborSearch> Scout<S> {
    /// Use a different candidate search backend
    pub fn with_search<T: NeighborSearch>(self, search: T) -> Scout<T> {
        Scout {
            table: self.table,
            config: self.config,
            engine: SimilarityEngine::with_search(search),
        }
    }

    pub fn table(&self) -> &FeatureTable {
        &self.table
    }

    pub fn snapshot(&self) -> TableSnapshot {
        Arc::clone(&self.table)
    }

    pub fn config(&self) -> &ScoutConfig {
        &self.config
    }

    /// Report with the configured assist weight and k
    pub fn report(&self, target: &str) -> Result<TwinReport> {
        self.find_twins(target, self.config.assist_weight, self.config.k)
    }

    /// The `k` players most similar to `target` with assists weighted by `assist_weight`
    pub fn find_twins(&self, target: &str, assist_weight: f64, k: usize) -> Result<TwinReport> {
        let weights = self.config.weights_for(assist_weight);
        self.find_twins_with(target, &weights, k)
    }

    /// Like [`find_twins`](Self::find_twins) with an arbitrary per-feature weight map
    pub fn find_twins_with(
        &self,
        target: &str,
        weights: &FeatureWeights,
        k: usize,
    ) -> Result<TwinReport> {
        let target_row = self
            .table
            .index_of(target)
            .ok_or_else(|| Error::UnknownPlayer(target.to_string()))?;
        let target_record = &self.table.records()[target_row];

        let ranker = Ranker::new(k).with_policy(self.config.rank_policy);
        let available = self.table.len() - 1;
        ranker.check(available)?;

        let space = self.config.transformer(weights.clone()).transform(&self.table)?;
        let target_vector = space
            .vector_of(target)
            .ok_or_else(|| Error::UnknownPlayer(target.to_string()))?;

        let neighbors = self.engine.nearest_with(&space, target_row, &ranker)?;

        let mut twins = Vec::with_capacity(neighbors.len());
        for (i, neighbor) in neighbors.iter().enumerate() {
            // Resolve through identities, never through bare positions
            let name = space.id(neighbor.row).ok_or_else(|| {
                Error::InvalidParameter(format!("row {} missing from space", neighbor.row))
            })?;
            let record = self.table.require(name)?;
            let candidate = space
                .vector_of(name)
                .ok_or_else(|| Error::UnknownPlayer(name.to_string()))?;

            twins.push(Twin {
                rank: i + 1,
                row: neighbor.row,
                record: record.clone(),
                distance: neighbor.distance,
                score: similarity_score(neighbor.distance),
                contributions: contributions(target_vector, candidate),
            });
        }

        debug!(
            player = target,
            k,
            returned = twins.len(),
            best = ?twins.first().map(|t| t.score),
            "Twin query complete"
        );

        let stats = SimilarityStats::compute(&twins, available);
        Ok(TwinReport {
            target: target_record.clone(),
            weights: weights.clone(),
            weight_stage: self.config.weight_stage,
            k,
            twins,
            dropped_features: space.dropped_features().to_vec(),
            stats,
        })
    }

    /// Raw statistics of target and twin for a radar chart
    pub fn build_comparison_chart(&self, target: &str, twin: &str) -> Result<ComparisonChart> {
        ComparisonExtractor::chart(&self.table, target, twin)
    }

    /// Chart of a report's target against its closest twin
    pub fn top_comparison(&self, report: &TwinReport) -> Result<ComparisonChart> {
        let top = report.top().ok_or(Error::InsufficientData {
            requested: report.k,
            available: 0,
        })?;
        self.build_comparison_chart(&report.target.player, top.name())
    }
}

/// Holds the current roster snapshot across reloads.
///
/// Queries take their own snapshot up front; a reload swaps the handle
/// without touching tables that running queries still hold.
#[derive(Debug)]
pub struct ScoutSession {
    current: RwLock<TableSnapshot>,
    config: ScoutConfig,
}

impl ScoutSession {
    pub fn new(table: FeatureTable, config: ScoutConfig) -> Self {
        Self {
            current: RwLock::new(table.into_snapshot()),
            config,
        }
    }

    pub fn snapshot(&self) -> TableSnapshot {
        Arc::clone(&self.current.read())
    }

    /// A scout bound to the current snapshot
    pub fn scout(&self) -> Scout {
        Scout::with_config(self.snapshot(), self.config.clone())
    }

    /// Replace the roster, returning the previous snapshot
    pub fn reload(&self, table: FeatureTable) -> TableSnapshot {
        let players = table.len();
        let previous = std::mem::replace(&mut *self.current.write(), table.into_snapshot());
        info!(players, "Roster reloaded");
        previous
    }

    /// Twin query against the current snapshot.
    ///
    /// The result keeps that snapshot, so charts built from it show the
    /// same roster the ranking used even after a reload.
    pub fn find_twins(&self, target: &str, assist_weight: f64, k: usize) -> Result<SessionReport> {
        let scout = self.scout();
        let report = scout.find_twins(target, assist_weight, k)?;
        Ok(SessionReport { scout, report })
    }
}

/// A twin report paired with the scout and snapshot that produced it
#[derive(Debug, Clone)]
pub struct SessionReport {
    scout: Scout,
    report: TwinReport,
}

impl SessionReport {
    pub fn report(&self) -> &TwinReport {
        &self.report
    }

    pub fn into_report(self) -> TwinReport {
        self.report
    }

    /// The roster the ranking ran against
    pub fn snapshot(&self) -> TableSnapshot {
        self.scout.snapshot()
    }

    /// Chart of the target against one of its ranked twins.
    ///
    /// Fails with `UnknownPlayer` when `twin` is not in this report.
    pub fn build_comparison_chart(&self, twin: &str) -> Result<ComparisonChart> {
        if !self.report.twins.iter().any(|t| t.name() == twin) {
            return Err(Error::UnknownPlayer(twin.to_string()));
        }
        self.scout
            .build_comparison_chart(&self.report.target.player, twin)
    }

    /// Chart of the target against its closest twin
    pub fn top_comparison(&self) -> Result<ComparisonChart> {
        self.scout.top_comparison(&self.report)
    }
}

impl std::ops::Deref for SessionReport {
    type Target = TwinReport;

    fn deref(&self) -> &TwinReport {
        &self.report
    }
}
