//! The fixed, ordered feature set every player record carries.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of numeric features in a player record
pub const FEATURE_COUNT: usize = 5;

/// A numeric performance statistic used in similarity computation.
///
/// Variants are declared in column order; [`Feature::index`] is the position
/// of the feature in every vector the engine builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "goals")]
    Goals,
    #[serde(rename = "assists")]
    Assists,
    #[serde(rename = "sh")]
    Shots,
    #[serde(rename = "sot_pct")]
    SotPct,
    #[serde(rename = "g_sh")]
    GSh,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Goals,
        Feature::Assists,
        Feature::Shots,
        Feature::SotPct,
        Feature::GSh,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Feature::Goals => 0,
            Feature::Assists => 1,
            Feature::Shots => 2,
            Feature::SotPct => 3,
            Feature::GSh => 4,
        }
    }

    /// Column header in the roster file (case-sensitive)
    pub fn column(self) -> &'static str {
        match self {
            Feature::Goals => "goals",
            Feature::Assists => "assists",
            Feature::Shots => "sh",
            Feature::SotPct => "sot_pct",
            Feature::GSh => "g_sh",
        }
    }

    /// Human readable label for charts and reports
    pub fn label(self) -> &'static str {
        match self {
            Feature::Goals => "Goals",
            Feature::Assists => "Assists",
            Feature::Shots => "Shots",
            Feature::SotPct => "Shot Accuracy %",
            Feature::GSh => "Goals/Shot",
        }
    }

    /// Counting stats must be non-negative whole numbers
    pub fn is_count(self) -> bool {
        matches!(self, Feature::Goals | Feature::Assists | Feature::Shots)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Feature {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .iter()
            .copied()
            .find(|f| f.column() == s)
            .ok_or_else(|| SchemaError::UnknownFeature(s.to_string()))
    }
}
