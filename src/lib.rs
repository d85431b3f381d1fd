//! # TwinScout
//!
//! Finds statistically similar players ("performance twins") to a benchmark
//! player and explains why they match.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! twinscout --data master_scouting_data.csv --player "Themba Zwane" --assist-weight 1.6
//! twinscout --player "Themba Zwane" --export
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use twinscout::prelude::*;
//!
//! let table = loader::fallback_roster().unwrap().into_snapshot();
//! let scout = Scout::new(table);
//!
//! let report = scout.find_twins("Themba Zwane", 1.6, 5).unwrap();
//! for twin in &report.twins {
//!     println!("{} {:.1}%", twin.name(), twin.score);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `twinscout-core` - Player records, feature table, roster loading
//! - `twinscout-similarity` - Weighting, standardization, cosine ranking, reports
//!
//! ## Pipeline
//!
//! 1. Roster is loaded once and validated against the fixed feature set
//! 2. Each query weights and standardizes the feature columns
//! 3. Cosine distance from the benchmark to every other player
//! 4. Top-K by ascending distance, ties in roster order
//! 5. Score = `(1 - distance) * 100`, unclamped

// Re-export core types
pub use twinscout_core::{
    loader,
    Error, Result, SchemaError,
    Feature, PlayerRecord,
    FeatureTable, TableSnapshot,
    RosterSource,
};

// Re-export similarity engine
pub use twinscout_similarity::{
    FeatureWeights, WeightStage, DegeneratePolicy, RankPolicy,
    Scout, ScoutConfig, ScoutSession, SessionReport,
    TwinReport, Twin, TwinRow, DisplayRow,
    ComparisonChart, FeatureVector,
    SimilarityStats,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        loader,
        Error, Result,
        Feature, PlayerRecord, FeatureTable,
        FeatureWeights, WeightStage, DegeneratePolicy, RankPolicy,
        Scout, ScoutConfig, ScoutSession,
        TwinReport, Twin, ComparisonChart,
    };
}
