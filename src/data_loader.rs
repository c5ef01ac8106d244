use csv::StringRecord;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::{debug, warn};

use crate::errors::ImportError;

const IDENTIFIER_HEADERS: [&str; 5] = ["airport", "name", "iata", "id", "code"];
const LATITUDE_HEADERS: [&str; 2] = ["lat", "latitude"];
const LONGITUDE_HEADERS: [&str; 3] = ["lon", "lng", "longitude"];
const PRIOR_HEADERS: [&str; 2] = ["ops_2019", "prior"];
const CURRENT_HEADERS: [&str; 2] = ["ops_2020", "current"];
const VARIATION_HEADERS: [&str; 2] = ["var_pct_20_vs_19", "variation"];

/// Column offsets of the airport fields within a tabular file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirportLoadProfile {
    pub identifier_column: Option<usize>,
    pub latitude_column: usize,
    pub longitude_column: usize,
    pub prior_column: usize,
    pub current_column: usize,
    pub variation_column: Option<usize>,
}

impl Display for AirportLoadProfile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Airport column offsets: identifier:{:?}, lat:{}, lon:{}, prior:{}, current:{}, variation:{:?}",
            self.identifier_column,
            self.latitude_column,
            self.longitude_column,
            self.prior_column,
            self.current_column,
            self.variation_column,
        )
    }
}

fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| candidates.contains(&h.trim().to_lowercase().as_str()))
}

fn require_column(headers: &[String], candidates: &[&str]) -> Result<usize, ImportError> {
    find_column(headers, candidates).ok_or_else(|| ImportError::MissingColumn(candidates.join("|")))
}

/// Builds the column profile from a header row.
///
/// Header names are matched case-insensitively. Latitude, longitude and both
/// traffic values are required; identifier and variation are optional.
pub fn create_airport_load_profile(headers: &[String]) -> Result<AirportLoadProfile, ImportError> {
    Ok(AirportLoadProfile {
        identifier_column: find_column(headers, &IDENTIFIER_HEADERS),
        latitude_column: require_column(headers, &LATITUDE_HEADERS)?,
        longitude_column: require_column(headers, &LONGITUDE_HEADERS)?,
        prior_column: require_column(headers, &PRIOR_HEADERS)?,
        current_column: require_column(headers, &CURRENT_HEADERS)?,
        variation_column: find_column(headers, &VARIATION_HEADERS),
    })
}

/// Header row and records of a tabular file
#[derive(Debug, Clone, PartialEq)]
pub struct TabularData {
    pub headers: Vec<String>,
    pub records: Vec<StringRecord>,
    /// Rows the reader could not decode, e.g. invalid UTF-8
    pub unreadable: usize,
}

fn load_delimited(path: &Path, delimiter: u8) -> Result<TabularData, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(ImportError::MissingHeader(path.display().to_string()));
    }

    let mut records = Vec::new();
    let mut unreadable = 0;
    for result in reader.records() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                unreadable += 1;
                warn!("Skipping unreadable row in {}: {}", path.display(), e);
            }
        }
    }

    Ok(TabularData {
        headers,
        records,
        unreadable,
    })
}

pub fn load_csv(path: &Path) -> Result<TabularData, ImportError> {
    load_delimited(path, b',')
}

pub fn load_tsv(path: &Path) -> Result<TabularData, ImportError> {
    load_delimited(path, b'\t')
}

/// Loads a tabular file, choosing the delimiter from the extension
pub fn load_file(path: &Path) -> Result<TabularData, ImportError> {
    let extension = path
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("")
        .to_lowercase();

    let data = match extension.as_str() {
        "csv" => load_csv(path)?,
        "tsv" => load_tsv(path)?,
        _ => return Err(ImportError::UnsupportedExtension(extension)),
    };

    debug!(
        "Loaded {} records ({} unreadable) with headers: {:?}",
        data.records.len(),
        data.unreadable,
        data.headers
    );
    Ok(data)
}

/// Identifiers that appear more than once, in first-seen order
pub fn find_duplicate_identifiers(records: &[StringRecord], column: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for id in records.iter().filter_map(|r| r.get(column)) {
        if !id.is_empty() && !seen.insert(id) && !duplicates.iter().any(|d| d == id) {
            duplicates.push(id.to_string());
        }
    }

    duplicates
}
