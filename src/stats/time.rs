use serde::Serialize;

use crate::config::Catalog;
use crate::error::{BikeshareError, Result};
use crate::record::Dataset;
use crate::stats::utility::mode;

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    pub most_common_month: String,
    pub most_common_day: String,
    pub most_common_hour: u32,
}

/// Most common month, weekday and start hour.
///
/// Ties resolve to the lowest month number, the alphabetically first day
/// name and the earliest hour.
///
/// # Errors
///
/// Returns [`BikeshareError::EmptyDataset`] when there are no trips.
#[tracing::instrument(skip_all, fields(trips = dataset.len()))]
pub fn time_stats(dataset: &Dataset, catalog: &Catalog) -> Result<TimeStats> {
    let empty = || BikeshareError::EmptyDataset("most common travel times");

    let month = mode(dataset.iter().map(|r| r.month())).ok_or_else(empty)?;
    let day = mode(dataset.iter().map(|r| r.day_of_week())).ok_or_else(empty)?;
    let hour = mode(dataset.iter().map(|r| r.hour())).ok_or_else(empty)?;

    Ok(TimeStats {
        most_common_month: catalog.month_name(month),
        most_common_day: day.to_string(),
        most_common_hour: hour,
    })
}
