//! Side-by-side comparison data
//!
//! Exposes the raw, untransformed statistics of a target and a twin. Both are
//! looked up by identity in the same table snapshot the ranking used, so the
//! values shown always belong to the players that were ranked.

use serde::Serialize;
use twinscout_core::{Feature, FeatureTable, PlayerRecord, Result};

/// One labelled raw feature value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureValue {
    pub feature: Feature,
    pub label: &'static str,
    pub value: f64,
}

/// Raw values of one player for a list of features
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    pub player: String,
    pub position: String,
    pub values: Vec<FeatureValue>,
}

impl FeatureVector {
    pub fn from_record(record: &PlayerRecord, features: &[Feature]) -> Self {
        Self {
            player: record.player.clone(),
            position: record.position.clone(),
            values: features
                .iter()
                .map(|f| FeatureValue {
                    feature: *f,
                    label: f.label(),
                    value: record.value(*f),
                })
                .collect(),
        }
    }

    pub fn get(&self, feature: Feature) -> Option<f64> {
        self.values
            .iter()
            .find(|v| v.feature == feature)
            .map(|v| v.value)
    }

    /// Values in list order
    pub fn raw(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.value).collect()
    }
}

/// Everything a radar chart of target vs twin needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonChart {
    pub target: FeatureVector,
    pub twin: FeatureVector,
    /// Largest raw value over the charted features across the whole roster
    pub radial_max: f64,
}

impl ComparisonChart {
    /// Axis labels in chart order
    pub fn labels(&self) -> Vec<&'static str> {
        self.target.values.iter().map(|v| v.label).collect()
    }
}

pub struct ComparisonExtractor;

impl ComparisonExtractor {
    /// Raw values of target and twin for the given features.
    ///
    /// Fails with `UnknownPlayer` if either identity is not in the table.
    pub fn extract(
        table: &FeatureTable,
        target: &str,
        twin: &str,
        features: &[Feature],
    ) -> Result<(FeatureVector, FeatureVector)> {
        let target = table.require(target)?;
        let twin = table.require(twin)?;
        Ok((
            FeatureVector::from_record(target, features),
            FeatureVector::from_record(twin, features),
        ))
    }

    /// Chart data for target and twin over every feature
    pub fn chart(table: &FeatureTable, target: &str, twin: &str) -> Result<ComparisonChart> {
        Self::chart_for(table, target, twin, &Feature::ALL)
    }

    pub fn chart_for(
        table: &FeatureTable,
        target: &str,
        twin: &str,
        features: &[Feature],
    ) -> Result<ComparisonChart> {
        let (target, twin) = Self::extract(table, target, twin, features)?;
        Ok(ComparisonChart {
            target,
            twin,
            radial_max: table.max_value(features),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinscout_core::{loader, Error};

    #[test]
    fn test_extract_raw_values() {
        let table = loader::fallback_roster().unwrap();
        let (target, twin) = ComparisonExtractor::extract(
            &table,
            "Themba Zwane",
            "Marcelo Allende",
            &[Feature::Goals, Feature::Assists, Feature::SotPct],
        )
        .unwrap();

        assert_eq!(target.raw(), vec![5.0, 8.0, 40.1]);
        assert_eq!(twin.raw(), vec![3.0, 7.0, 30.1]);
        assert_eq!(twin.player, "Marcelo Allende");
        assert_eq!(target.values[2].label, "Shot Accuracy %");
        assert_eq!(target.get(Feature::Shots), None);
    }

    #[test]
    fn test_unknown_twin() {
        let table = loader::fallback_roster().unwrap();
        let result = ComparisonExtractor::extract(&table, "Themba Zwane", "Nobody", &Feature::ALL);
        assert!(matches!(result, Err(Error::UnknownPlayer(ref p)) if p == "Nobody"));
    }

    #[test]
    fn test_chart_radial_max() {
        let table = loader::fallback_roster().unwrap();
        let chart = ComparisonExtractor::chart(&table, "Neo Maema", "Aubrey Modiba").unwrap();
        assert_eq!(chart.radial_max, 55.2);
        assert_eq!(
            chart.labels(),
            vec!["Goals", "Assists", "Shots", "Shot Accuracy %", "Goals/Shot"]
        );
    }
}
