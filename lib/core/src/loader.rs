//! Roster loading
//!
//! Parses a delimited roster into a [`FeatureTable`]. Every schema problem is
//! reported here, before any query can run: a missing column, an empty cell,
//! a non-numeric value or a duplicate identity all refuse the whole file.

use crate::error::{Error, Result, SchemaError};
use crate::feature::{Feature, FEATURE_COUNT};
use crate::player::PlayerRecord;
use crate::table::FeatureTable;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Default roster file name looked up by the shell
pub const DEFAULT_ROSTER_FILE: &str = "master_scouting_data.csv";

const PLAYER_COLUMN: &str = "player";
const POSITION_COLUMN: &str = "position";

/// Where a table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterSource {
    File,
    Fallback,
}

/// Header positions of the required columns
struct ColumnMap {
    player: usize,
    position: usize,
    features: [usize; FEATURE_COUNT],
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> std::result::Result<Self, SchemaError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))
        };

        let player = find(PLAYER_COLUMN)?;
        let position = find(POSITION_COLUMN)?;
        let mut features = [0usize; FEATURE_COUNT];
        for feature in Feature::ALL {
            features[feature.index()] = find(feature.column())?;
        }

        Ok(Self {
            player,
            position,
            features,
        })
    }
}

fn cell<'r>(
    record: &'r csv::StringRecord,
    idx: usize,
    column: &str,
    row: usize,
) -> std::result::Result<&'r str, SchemaError> {
    match record.get(idx) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(SchemaError::EmptyValue {
            row,
            column: column.to_string(),
        }),
    }
}

fn parse_number(value: &str, column: &str, row: usize) -> std::result::Result<f64, SchemaError> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(SchemaError::InvalidNumber {
            row,
            column: column.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Counting stats accept `5` and `5.0` but not `5.5` or `-1`
fn parse_count(value: &str, column: &str, row: usize) -> std::result::Result<u32, SchemaError> {
    if let Ok(v) = value.parse::<u32>() {
        return Ok(v);
    }
    let v = parse_number(value, column, row)?;
    if v < 0.0 {
        return Err(SchemaError::NegativeValue {
            row,
            column: column.to_string(),
            value: v,
        });
    }
    if v.fract() != 0.0 || v > f64::from(u32::MAX) {
        return Err(SchemaError::NotAnInteger {
            row,
            column: column.to_string(),
            value: v,
        });
    }
    Ok(v as u32)
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &ColumnMap,
    row: usize,
) -> std::result::Result<PlayerRecord, SchemaError> {
    let player = cell(record, columns.player, PLAYER_COLUMN, row)?;
    // Position is free-form and may be blank
    let position = record.get(columns.position).unwrap_or_default();

    let mut counts = [0u32; 3];
    let mut rates = [0f64; 2];
    for feature in Feature::ALL {
        let column = feature.column();
        let raw = cell(record, columns.features[feature.index()], column, row)?;
        // Feature order puts the counts first
        if feature.is_count() {
            counts[feature.index()] = parse_count(raw, column, row)?;
        } else {
            rates[feature.index() - counts.len()] = parse_number(raw, column, row)?;
        }
    }

    Ok(PlayerRecord::new(
        player, position, counts[0], counts[1], counts[2], rates[0], rates[1],
    ))
}

/// Parse a roster from any reader producing comma-separated text with a header row
pub fn from_reader<R: Read>(reader: R) -> Result<FeatureTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        records.push(parse_record(&record, &columns, i + 1)?);
    }

    debug!("Parsed {} player records", records.len());
    FeatureTable::new(records)
}

/// Parse a roster file
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<FeatureTable> {
    let file = std::fs::File::open(path.as_ref())?;
    from_reader(file)
}

/// Load a roster file, using the built-in roster when the file does not exist.
///
/// Only a missing file triggers the fallback; a file that exists but fails
/// validation is still an error.
pub fn load_or_fallback<P: AsRef<Path>>(path: P) -> Result<(FeatureTable, RosterSource)> {
    let path = path.as_ref();
    match from_path(path) {
        Ok(table) => Ok((table, RosterSource::File)),
        Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
            warn!("Roster {:?} not found, using built-in roster", path);
            Ok((fallback_roster()?, RosterSource::Fallback))
        }
        Err(e) => Err(e),
    }
}

/// The built-in six player roster
pub fn fallback_roster() -> Result<FeatureTable> {
    FeatureTable::new(vec![
        PlayerRecord::new("Themba Zwane", "MF", 5, 8, 20, 40.1, 0.11),
        PlayerRecord::new("Teboho Mokoena", "MF", 4, 6, 35, 38.5, 0.09),
        PlayerRecord::new("Peter Shalulile", "FW", 12, 4, 50, 55.2, 0.22),
        PlayerRecord::new("Marcelo Allende", "MF", 3, 7, 12, 30.1, 0.08),
        PlayerRecord::new("Neo Maema", "MF", 2, 5, 15, 33.4, 0.10),
        PlayerRecord::new("Aubrey Modiba", "DF", 1, 4, 10, 25.0, 0.05),
    ])
}
