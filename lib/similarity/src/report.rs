//! Ranked twin reports and their export
//!
//! Export writes one row per twin with a header row, UTF-8, comma separated.
//! Floats are written in shortest round-trip form, so reading the file back
//! yields the exact scores and statistics that were ranked.

use crate::explain::SimilarityStats;
use crate::weights::{FeatureWeights, WeightStage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use twinscout_core::{Feature, PlayerRecord, Result};

/// One ranked twin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Twin {
    /// 1-based rank, 1 is the closest twin
    pub rank: usize,
    /// Row of the twin in the table snapshot the query ran against
    pub row: usize,
    pub record: PlayerRecord,
    /// Cosine distance in the transformed space, in [0, 2]
    pub distance: f64,
    /// `(1 - distance) * 100`, not clamped
    pub score: f64,
    /// Per-feature share of `score`
    pub contributions: BTreeMap<Feature, f64>,
}

impl Twin {
    pub fn name(&self) -> &str {
        &self.record.player
    }
}

/// Result of one twin query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwinReport {
    pub target: PlayerRecord,
    pub weights: FeatureWeights,
    pub weight_stage: WeightStage,
    pub k: usize,
    /// Closest first
    pub twins: Vec<Twin>,
    /// Features zero-filled for lack of variance
    pub dropped_features: Vec<Feature>,
    pub stats: SimilarityStats,
}

impl TwinReport {
    /// The closest twin
    pub fn top(&self) -> Option<&Twin> {
        self.twins.first()
    }

    pub fn len(&self) -> usize {
        self.twins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.twins.is_empty()
    }

    /// Output rows in rank order
    pub fn rows(&self) -> Vec<TwinRow> {
        self.twins.iter().map(TwinRow::from).collect()
    }

    /// Write the rows as CSV with a header row
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for row in self.rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// CSV export as bytes
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(buf)
    }

    /// Write the CSV export to a file
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(std::io::BufWriter::new(file))
    }

    /// Suggested export file name, `Scout_Report_<player>.csv`
    pub fn default_export_name(&self) -> String {
        format!("Scout_Report_{}.csv", self.target.player)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One exported row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwinRow {
    pub player: String,
    pub position: String,
    pub similarity_score: f64,
    pub goals: u32,
    pub assists: u32,
    pub shots: u32,
    pub g_sh: f64,
    pub sot_pct: f64,
}

impl From<&Twin> for TwinRow {
    fn from(twin: &Twin) -> Self {
        let r = &twin.record;
        Self {
            player: r.player.clone(),
            position: r.position.clone(),
            similarity_score: twin.score,
            goals: r.goals,
            assists: r.assists,
            shots: r.shots,
            g_sh: r.g_sh,
            sot_pct: r.sot_pct,
        }
    }
}

/// Read rows back from an export
pub fn read_rows<R: std::io::Read>(reader: R) -> Result<Vec<TwinRow>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// A row formatted for on-screen display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub player: String,
    pub position: String,
    /// Score with one decimal and a percent sign, e.g. `48.8%`
    pub match_strength: String,
    pub goals: String,
    pub assists: String,
    pub shots: String,
    pub goals_per_shot: String,
    pub shot_accuracy: String,
    /// Set on the closest twin
    pub highlight: bool,
}

impl DisplayRow {
    pub const HEADERS: [&'static str; 8] = [
        "Player",
        "Position",
        "Match Strength",
        "Goals",
        "Assists",
        "Shots",
        "Goals per Shot",
        "Shot Accuracy %",
    ];

    pub fn cells(&self) -> [&str; 8] {
        [
            self.player.as_str(),
            self.position.as_str(),
            self.match_strength.as_str(),
            self.goals.as_str(),
            self.assists.as_str(),
            self.shots.as_str(),
            self.goals_per_shot.as_str(),
            self.shot_accuracy.as_str(),
        ]
    }
}

impl From<&TwinRow> for DisplayRow {
    fn from(row: &TwinRow) -> Self {
        Self {
            player: row.player.clone(),
            position: row.position.clone(),
            match_strength: format!("{:.1}%", row.similarity_score),
            goals: row.goals.to_string(),
            assists: row.assists.to_string(),
            shots: row.shots.to_string(),
            goals_per_shot: format!("{:.2}", row.g_sh),
            shot_accuracy: format!("{:.2}", row.sot_pct),
            highlight: false,
        }
    }
}

/// Display rows for a report, the first one highlighted
pub fn display_rows(report: &TwinReport) -> Vec<DisplayRow> {
    report
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| DisplayRow {
            highlight: i == 0,
            ..DisplayRow::from(row)
        })
        .collect()
}
