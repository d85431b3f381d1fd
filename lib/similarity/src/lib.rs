//! # TwinScout Similarity
//!
//! The similarity engine behind the performance twin finder.
//!
//! Given a roster and a benchmark player, it weights and standardizes the
//! feature columns, measures cosine distance from the benchmark to every
//! other player and returns a deterministic, explainable top-K list.
//!
//! ## Features
//!
//! - **Feature Weights**: Per-feature multiplicative weights, assists by default
//! - **Standardization**: Population z-scores with an explicit zero-variance policy
//! - **Cosine Ranking**: Brute-force nearest neighbours with row-order tie-break
//! - **Explainability**: Per-feature contribution breakdown of every score
//! - **Export**: Lossless CSV rows for the ranked report
//!
//! ## Example
//!
//! ```rust
//! use twinscout_core::loader;
//! use twinscout_similarity::Scout;
//!
//! let table = loader::fallback_roster().unwrap().into_snapshot();
//! let scout = Scout::new(table);
//!
//! let report = scout.find_twins("Themba Zwane", 1.6, 5).unwrap();
//! assert_eq!(report.len(), 5);
//! assert!(report.twins.iter().all(|t| t.name() != "Themba Zwane"));
//!
//! let top = report.top().unwrap();
//! let chart = scout.build_comparison_chart("Themba Zwane", top.name()).unwrap();
//! assert_eq!(chart.twin.player, top.name());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Feature   │────>│ Transformer │────>│   Engine    │
//! │    Table    │     │ (weight, z) │     │  (cosine)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       │                                        │
//!       │              ┌─────────────┐           │
//!       │              │   Ranker    │<──────────┘
//!       │              │   (top-K)   │
//!       │              └─────────────┘
//!       │                     │
//!       │              ┌─────────────┐
//!       └─────────────>│  Compare /  │
//!                      │   Explain   │
//!                      └─────────────┘
//! ```

pub mod weights;
pub mod transform;
pub mod distance;
pub mod engine;
pub mod rank;
pub mod compare;
pub mod explain;
pub mod report;
pub mod query;

// Re-export main types for convenience
pub use weights::{
    FeatureWeights,
    WeightStage,
    DEFAULT_ASSIST_WEIGHT,
    MIN_ASSIST_WEIGHT,
    MAX_ASSIST_WEIGHT,
};
pub use transform::{FeatureTransformer, TransformedSpace, ColumnStats, DegeneratePolicy};
pub use distance::{cosine_distance, similarity_score};
pub use engine::{SimilarityEngine, NeighborSearch, BruteForce};
pub use rank::{Ranker, RankPolicy, Neighbor, DEFAULT_K};
pub use compare::{ComparisonExtractor, ComparisonChart, FeatureVector, FeatureValue};
pub use explain::{contributions, SimilarityStats};
pub use report::{Twin, TwinReport, TwinRow, DisplayRow, display_rows};
pub use query::{Scout, ScoutConfig, ScoutSession, SessionReport};
