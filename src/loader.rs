//! Loading and filtering a city's trip CSV.

use std::fs::File;
use std::io::Read;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::{Catalog, FilterSpec};
use crate::error::{BikeshareError, Result};
use crate::record::{
    BIRTH_YEAR, Dataset, END_TIME, GENDER, REQUIRED_COLUMNS, Schema, TripRecord,
};

static TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A single row as it appears in the source file.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    // stored as a float column, e.g. "1985.0"
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

impl RawTrip {
    fn into_record(self, row: u64) -> Result<TripRecord> {
        let start_time = parse_timestamp(&self.start_time).ok_or_else(|| {
            BikeshareError::data_format(
                row,
                format!("unparseable start time {:?}", self.start_time),
            )
        })?;

        let end_time = match self.end_time.as_deref() {
            Some(raw) => Some(parse_timestamp(raw).ok_or_else(|| {
                BikeshareError::data_format(row, format!("unparseable end time {raw:?}"))
            })?),
            None => None,
        };

        let birth_year = match self.birth_year {
            Some(year) if year.is_finite() && year.abs() < i32::MAX as f64 => {
                Some(year.round() as i32)
            }
            Some(year) => {
                return Err(BikeshareError::data_format(
                    row,
                    format!("invalid birth year {year}"),
                ));
            }
            None => None,
        };

        if !self.trip_duration.is_finite() {
            return Err(BikeshareError::data_format(
                row,
                format!("invalid trip duration {}", self.trip_duration),
            ));
        }

        Ok(TripRecord::new(
            start_time,
            self.trip_duration,
            self.start_station,
            self.end_station,
            self.user_type,
        )
        .with_end_time(end_time)
        .with_demographics(self.gender, birth_year))
    }
}

/// Parses a start or end time cell.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw.trim(), format).ok())
}

/// Checks the required columns and records which optional ones exist.
fn schema_from_headers(headers: &StringRecord) -> Result<Schema> {
    let has = |name: &str| headers.iter().any(|h| h == name);

    let missing: Vec<_> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !has(*column))
        .collect();
    if !missing.is_empty() {
        return Err(BikeshareError::data_format(
            0,
            format!("missing required column(s): {}", missing.join(", ")),
        ));
    }

    Ok(Schema {
        has_end_time: has(END_TIME),
        has_gender: has(GENDER),
        has_birth_year: has(BIRTH_YEAR),
    })
}

/// Loads the city's trips from its configured source and applies `filter`.
///
/// # Errors
///
/// Returns [`BikeshareError::SourceRead`] if the file cannot be opened and
/// [`BikeshareError::DataFormat`] if any row is malformed.
#[tracing::instrument(skip_all, fields(filter = %filter))]
pub fn load(catalog: &Catalog, filter: &FilterSpec) -> Result<Dataset> {
    let path = catalog.source_path(&filter.city)?;
    debug!(path = %path.display(), "Opening trip data");

    let file = File::open(&path).map_err(|source| BikeshareError::SourceRead {
        path: path.clone(),
        source,
    })?;

    read_dataset(file, filter)
}

/// Reads trip rows from any CSV source, keeping those that match `filter`.
///
/// Surviving rows keep their source order. Any malformed row aborts the
/// whole load.
pub fn read_dataset<R: Read>(reader: R, filter: &FilterSpec) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| BikeshareError::data_format(0, e))?;
    let schema = schema_from_headers(headers)?;

    let mut records = Vec::new();
    let mut rows_read = 0u64;

    for (i, result) in rdr.deserialize::<RawTrip>().enumerate() {
        let row = i as u64 + 1;
        let raw = result.map_err(|e| BikeshareError::data_format(row, e))?;
        let record = raw.into_record(row)?;
        rows_read = row;

        if filter.matches(&record) {
            records.push(record);
        }
    }

    info!(
        rows_read,
        rows_kept = records.len(),
        has_gender = schema.has_gender,
        has_birth_year = schema.has_birth_year,
        "Trip data loaded"
    );

    Ok(Dataset::new(records, schema))
}
