//! Rendering and persistence of trip statistics.
//!
//! Supports plain-text console sections, JSON serialization, raw-row tables,
//! and CSV export of a filtered dataset.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use csv::WriterBuilder;
use serde::Serialize;
use tracing::debug;

use crate::error::{BikeshareError, Result};
use crate::record::{
    BIRTH_YEAR, Dataset, END_STATION, END_TIME, GENDER, START_STATION, START_TIME, Schema,
    TRIP_DURATION, TripRecord, USER_TYPE,
};
use crate::stats::utility::Counts;
use crate::stats::{DurationStats, StationStats, TimeStats, UserStats};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn separator() -> String {
    "-".repeat(40)
}

pub fn write_section_start<W: Write>(w: &mut W, title: &str) -> Result<()> {
    writeln!(w, "\nCalculating {title}...\n")?;
    Ok(())
}

pub fn write_section_end<W: Write>(w: &mut W, elapsed: Duration) -> Result<()> {
    writeln!(w, "\nThis took {} seconds.", elapsed.as_secs_f64())?;
    writeln!(w, "{}", separator())?;
    Ok(())
}

/// Explains why a statistic group has nothing to show.
pub fn write_unavailable<W: Write>(w: &mut W, err: &BikeshareError) -> Result<()> {
    match err {
        BikeshareError::EmptyDataset(_) => writeln!(w, "No trips match this filter.")?,
        other => writeln!(w, "Could not compute these statistics: {other}")?,
    }
    Ok(())
}

pub fn write_time_stats<W: Write>(w: &mut W, stats: &TimeStats) -> Result<()> {
    writeln!(w, "The most common month traveled is: {}", stats.most_common_month)?;
    writeln!(
        w,
        "The most common day of the week traveled is: {}",
        stats.most_common_day
    )?;
    writeln!(w, "The most common start hour is: {}", stats.most_common_hour)?;
    Ok(())
}

pub fn write_station_stats<W: Write>(w: &mut W, stats: &StationStats) -> Result<()> {
    writeln!(
        w,
        "The most commonly used start station is: {}",
        stats.most_common_start
    )?;
    writeln!(
        w,
        "The most commonly used end station is: {}",
        stats.most_common_end
    )?;
    writeln!(
        w,
        "The most popular trip taken according to the start and end station used is: {}",
        stats.most_common_trip
    )?;
    Ok(())
}

pub fn write_duration_stats<W: Write>(w: &mut W, stats: &DurationStats) -> Result<()> {
    writeln!(w, "The total travel time is: {} seconds", stats.total_duration)?;
    writeln!(w, "The mean travel time is: {} seconds", stats.mean_duration)?;
    Ok(())
}

fn write_counts<W: Write>(w: &mut W, counts: &Counts) -> Result<()> {
    if counts.is_empty() {
        writeln!(w, "  (none)")?;
    }
    for (value, count) in counts {
        writeln!(w, "  {value}: {count}")?;
    }
    Ok(())
}

pub fn write_user_stats<W: Write>(w: &mut W, stats: &UserStats) -> Result<()> {
    writeln!(w, "The count of user types is:")?;
    write_counts(w, &stats.user_types)?;

    match &stats.genders {
        Some(genders) => {
            writeln!(w, "The counts of gender are:")?;
            write_counts(w, genders)?;
        }
        None => writeln!(w, "Sorry! No data for Gender exists for this city.")?,
    }

    match &stats.birth_years {
        Some(years) => {
            let show =
                |year: Option<i32>| year.map_or_else(|| "n/a".to_string(), |y| y.to_string());
            writeln!(w, "The earliest birth year is: {}", show(years.earliest))?;
            writeln!(w, "The most recent birth year is: {}", show(years.latest))?;
            writeln!(w, "The most common birth year is: {}", show(years.most_common))?;
        }
        None => writeln!(w, "Sorry! No data for Birth Year exists for this city.")?,
    }
    Ok(())
}

/// Column headers for a schema, in source order.
fn columns(schema: Schema) -> Vec<&'static str> {
    let mut columns = vec![START_TIME];
    if schema.has_end_time {
        columns.push(END_TIME);
    }
    columns.extend([TRIP_DURATION, START_STATION, END_STATION, USER_TYPE]);
    if schema.has_gender {
        columns.push(GENDER);
    }
    if schema.has_birth_year {
        columns.push(BIRTH_YEAR);
    }
    columns
}

/// A record's cells matching [`columns`].
fn cells(record: &TripRecord, schema: Schema) -> Vec<String> {
    let mut cells = vec![record.start_time().format(TIMESTAMP_FORMAT).to_string()];
    if schema.has_end_time {
        cells.push(
            record
                .end_time
                .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_default(),
        );
    }
    cells.push(record.trip_duration.to_string());
    cells.push(record.start_station.clone());
    cells.push(record.end_station.clone());
    cells.push(record.user_type.clone().unwrap_or_default());
    if schema.has_gender {
        cells.push(record.gender.clone().unwrap_or_default());
    }
    if schema.has_birth_year {
        cells.push(record.birth_year.map(|y| y.to_string()).unwrap_or_default());
    }
    cells
}

/// Writes one page of raw rows as an aligned table.
///
/// `first_row` is the position of `rows[0]` in the dataset and labels the
/// leftmost column.
pub fn write_page<W: Write>(
    w: &mut W,
    rows: &[TripRecord],
    schema: Schema,
    first_row: usize,
) -> Result<()> {
    let header: Vec<String> = std::iter::once(String::new())
        .chain(columns(schema).into_iter().map(String::from))
        .collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(i, record)| {
            std::iter::once((first_row + i).to_string())
                .chain(cells(record, schema))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for line in &body {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    for line in std::iter::once(&header).chain(&body) {
        let padded: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        writeln!(w, "{}", padded.join("  ").trim_end())?;
    }
    Ok(())
}

/// Writes any serializable summary as pretty-printed JSON.
pub fn print_json<W: Write, T: Serialize>(w: &mut W, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| BikeshareError::Io(std::io::Error::other(e)))?;
    writeln!(w, "{json}")?;
    Ok(())
}

/// Writes the dataset's rows to a new CSV file at `path`.
///
/// Only the columns the source carried are written, under their source
/// names. An existing file is replaced.
pub fn write_records(path: impl AsRef<Path>, dataset: &Dataset) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), rows = dataset.len(), "Exporting CSV records");

    let csv_err = |e: csv::Error| BikeshareError::Io(std::io::Error::other(e));
    let mut writer = WriterBuilder::new().from_path(path).map_err(csv_err)?;

    let schema = dataset.schema();
    writer.write_record(columns(schema)).map_err(csv_err)?;
    for record in dataset {
        writer.write_record(cells(record, schema)).map_err(csv_err)?;
    }
    writer.flush()?;

    Ok(())
}
