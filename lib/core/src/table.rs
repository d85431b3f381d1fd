use crate::error::{Error, Result, SchemaError};
use crate::feature::Feature;
use crate::player::PlayerRecord;
use ahash::AHashMap;
use std::sync::Arc;

/// Shared, immutable handle to a roster.
///
/// Queries hold their own snapshot, so a reload never tears a running query.
pub type TableSnapshot = Arc<FeatureTable>;

/// Ordered roster of players keyed by unique identity.
///
/// Row order is the order records were supplied in and never changes after
/// construction. All lookups from outside go through the identity index.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    records: Vec<PlayerRecord>,
    index: AHashMap<String, usize>,
}

impl FeatureTable {
    /// Build a table, rejecting empty rosters, duplicate identities and
    /// non-finite or negative statistics.
    pub fn new(records: Vec<PlayerRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(SchemaError::EmptyTable.into());
        }

        let mut index = AHashMap::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            if record.player.trim().is_empty() {
                return Err(SchemaError::EmptyValue {
                    row: row + 1,
                    column: "player".to_string(),
                }
                .into());
            }
            for feature in [Feature::SotPct, Feature::GSh] {
                let value = record.value(feature);
                if !value.is_finite() {
                    return Err(SchemaError::InvalidNumber {
                        row: row + 1,
                        column: feature.column().to_string(),
                        value: value.to_string(),
                    }
                    .into());
                }
            }
            if index.insert(record.player.clone(), row).is_some() {
                return Err(Error::DuplicatePlayer(record.player.clone()));
            }
        }

        Ok(Self { records, index })
    }

    /// Wrap the table in a shareable snapshot handle
    #[must_use]
    pub fn into_snapshot(self) -> TableSnapshot {
        Arc::new(self)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Row index of a player
    #[inline]
    pub fn index_of(&self, player: &str) -> Option<usize> {
        self.index.get(player).copied()
    }

    /// Look up a player by identity
    pub fn get(&self, player: &str) -> Option<&PlayerRecord> {
        self.index_of(player).map(|row| &self.records[row])
    }

    /// Look up a player, failing with `UnknownPlayer`
    pub fn require(&self, player: &str) -> Result<&PlayerRecord> {
        self.get(player)
            .ok_or_else(|| Error::UnknownPlayer(player.to_string()))
    }

    #[inline]
    pub fn record(&self, row: usize) -> Option<&PlayerRecord> {
        self.records.get(row)
    }

    pub fn contains(&self, player: &str) -> bool {
        self.index.contains_key(player)
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.records.iter()
    }

    /// Player names in row order
    pub fn player_names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.player.as_str())
    }

    /// All raw values of one feature in row order
    pub fn column(&self, feature: Feature) -> Vec<f64> {
        self.records.iter().map(|r| r.value(feature)).collect()
    }

    /// Largest raw value over the given features across every row
    pub fn max_value(&self, features: &[Feature]) -> f64 {
        self.records
            .iter()
            .flat_map(|r| features.iter().map(move |f| r.value(*f)))
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
