use crate::feature::Feature;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Player not found: {0}")]
    UnknownPlayer(String),

    #[error("Feature '{feature}' has zero variance across the roster")]
    DegenerateFeature { feature: Feature },

    #[error("Insufficient data: requested {requested} twins, only {available} candidates available")]
    InsufficientData { requested: usize, available: usize },

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Duplicate player identity: {0}")]
    DuplicatePlayer(String),

    #[error("Invalid weight {weight} for feature '{feature}'")]
    InvalidWeight { feature: Feature, weight: f64 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Load-time validation failures of a roster.
///
/// Row numbers are 1-based data rows (the header is row 0).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Row {row}: empty value in column '{column}'")]
    EmptyValue { row: usize, column: String },

    #[error("Row {row}: '{value}' in column '{column}' is not a number")]
    InvalidNumber { row: usize, column: String, value: String },

    #[error("Row {row}: negative value {value} in column '{column}'")]
    NegativeValue { row: usize, column: String, value: f64 },

    #[error("Row {row}: {value} in column '{column}' is not a whole number")]
    NotAnInteger { row: usize, column: String, value: f64 },

    #[error("Unknown feature '{0}'")]
    UnknownFeature(String),

    #[error("Roster contains no players")]
    EmptyTable,
}
