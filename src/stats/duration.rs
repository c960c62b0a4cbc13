use serde::Serialize;

use crate::error::{BikeshareError, Result};
use crate::record::Dataset;
use crate::stats::utility::mean;

/// Total and average trip duration, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_duration: f64,
    pub mean_duration: f64,
}

/// Sum of all trip durations. Zero for an empty dataset.
pub fn total_duration(dataset: &Dataset) -> f64 {
    dataset.iter().map(|r| r.trip_duration).sum()
}

/// Total and mean trip duration.
///
/// # Errors
///
/// Returns [`BikeshareError::EmptyDataset`] when there are no trips, since
/// the mean is undefined.
#[tracing::instrument(skip_all, fields(trips = dataset.len()))]
pub fn duration_stats(dataset: &Dataset) -> Result<DurationStats> {
    let durations: Vec<f64> = dataset.iter().map(|r| r.trip_duration).collect();
    let mean_duration =
        mean(&durations).ok_or(BikeshareError::EmptyDataset("mean trip duration"))?;

    Ok(DurationStats {
        total_duration: durations.iter().sum(),
        mean_duration,
    })
}
