use serde::Serialize;

use crate::error::{BikeshareError, Result};
use crate::record::Dataset;
use crate::stats::utility::mode;

/// Most popular stations and station-to-station trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub most_common_start: String,
    pub most_common_end: String,
    /// `"<start> to <end>"`
    pub most_common_trip: String,
}

/// Most used start station, end station and trip. Ties resolve to the
/// alphabetically first name.
///
/// # Errors
///
/// Returns [`BikeshareError::EmptyDataset`] when there are no trips.
#[tracing::instrument(skip_all, fields(trips = dataset.len()))]
pub fn station_stats(dataset: &Dataset) -> Result<StationStats> {
    let empty = || BikeshareError::EmptyDataset("most popular stations");

    let start = mode(dataset.iter().map(|r| r.start_station.as_str())).ok_or_else(empty)?;
    let end = mode(dataset.iter().map(|r| r.end_station.as_str())).ok_or_else(empty)?;
    let trip = mode(dataset.iter().map(|r| r.trip())).ok_or_else(empty)?;

    Ok(StationStats {
        most_common_start: start.to_string(),
        most_common_end: end.to_string(),
        most_common_trip: trip,
    })
}
