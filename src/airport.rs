use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::coordinates;
use crate::data_loader::AirportLoadProfile;
use crate::errors::RowError;

/// One airport's traffic statistics, with repaired coordinates
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AirportRecord {
    pub identifier: String,
    pub latitude: f64,
    pub longitude: f64,
    pub prior_value: f64,
    pub current_value: f64,
    pub reduction_percent: f64,
}

fn get_value<'r>(
    record: &'r StringRecord,
    column: usize,
    field: &'static str,
) -> Result<&'r str, RowError> {
    record
        .get(column)
        .map(str::trim)
        .ok_or(RowError::MissingField(field))
}

fn parse_number(value: &str, field: &'static str) -> Result<f64, RowError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RowError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Reduction in percent, never negative.
///
/// A reported variation wins; without one the reduction is derived from the
/// two traffic values.
pub fn reduction_percent(prior: f64, current: f64, variation: Option<f64>) -> f64 {
    let reduction = match variation {
        Some(variation) => -variation,
        None if prior > 0.0 => (1.0 - current / prior) * 100.0,
        None => 0.0,
    };
    reduction.max(0.0)
}

impl AirportRecord {
    /// Builds a record from one tabular row.
    ///
    /// `row_number` names rows that have no identifier column.
    pub fn from_row(
        record: &StringRecord,
        profile: &AirportLoadProfile,
        row_number: usize,
    ) -> Result<Self, RowError> {
        let identifier = match profile.identifier_column {
            Some(column) => get_value(record, column, "identifier")?.to_string(),
            None => format!("row-{}", row_number),
        };

        let raw_lat = get_value(record, profile.latitude_column, "latitude")?;
        let raw_lon = get_value(record, profile.longitude_column, "longitude")?;
        let (latitude, longitude) = coordinates::normalize_pair(raw_lat, raw_lon).ok_or_else(
            || RowError::InvalidCoordinates {
                lat: raw_lat.to_string(),
                lon: raw_lon.to_string(),
            },
        )?;

        let prior_value = parse_number(
            get_value(record, profile.prior_column, "prior")?,
            "prior",
        )?;
        let current_value = parse_number(
            get_value(record, profile.current_column, "current")?,
            "current",
        )?;

        // an empty or unparseable variation falls back to the derived value
        let variation = profile
            .variation_column
            .and_then(|column| record.get(column))
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite());

        Ok(AirportRecord {
            identifier,
            latitude,
            longitude,
            prior_value,
            current_value,
            reduction_percent: reduction_percent(prior_value, current_value, variation),
        })
    }

    /// Severity in `[0, 1]` used to pick the marker colour
    pub fn severity(&self) -> f64 {
        (self.reduction_percent / 100.0).clamp(0.0, 1.0)
    }
}
