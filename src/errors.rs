//! Error types
//!
//! Typed errors for palette construction and data import. Application code
//! wraps these in `anyhow::Error` at the command boundary.

use thiserror::Error;

/// Palette validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// A palette needs at least a start and an end control point
    #[error("Palette needs at least 2 control points, found {0}")]
    TooFewPoints(usize),

    #[error("First control point must be at position 0.0, found {0}")]
    FirstNotZero(f64),

    #[error("Last control point must be at position 1.0, found {0}")]
    LastNotOne(f64),

    /// Positions must be strictly increasing
    #[error("Control point {index} at position {position} does not follow {previous}")]
    NotIncreasing {
        index: usize,
        position: f64,
        previous: f64,
    },

    #[error("Control point {0} has a non-finite position")]
    NonFinitePosition(usize),
}

/// Import errors for tabular and boundary files
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Unsupported extension: {0}")]
    UnsupportedExtension(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Failed to read header from file: {0}")]
    MissingHeader(String),

    #[error("Boundary contains no geometry: {0}")]
    EmptyBoundary(String),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a row could not become an airport record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("coordinates could not be repaired: ({lat:?}, {lon:?})")]
    InvalidCoordinates { lat: String, lon: String },
}
