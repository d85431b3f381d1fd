use crate::feature::{Feature, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// One row of the roster: identity, position and the raw statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player: String,
    pub position: String,
    pub goals: u32,
    pub assists: u32,
    #[serde(rename = "sh")]
    pub shots: u32,
    pub sot_pct: f64,
    pub g_sh: f64,
}

impl PlayerRecord {
    #[must_use]
    pub fn new(
        player: impl Into<String>,
        position: impl Into<String>,
        goals: u32,
        assists: u32,
        shots: u32,
        sot_pct: f64,
        g_sh: f64,
    ) -> Self {
        Self {
            player: player.into(),
            position: position.into(),
            goals,
            assists,
            shots,
            sot_pct,
            g_sh,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.player
    }

    /// Raw, untransformed value of one feature
    #[inline]
    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Goals => f64::from(self.goals),
            Feature::Assists => f64::from(self.assists),
            Feature::Shots => f64::from(self.shots),
            Feature::SotPct => self.sot_pct,
            Feature::GSh => self.g_sh,
        }
    }

    /// Raw values in [`Feature::ALL`] order
    pub fn raw_values(&self) -> [f64; FEATURE_COUNT] {
        Feature::ALL.map(|f| self.value(f))
    }
}
