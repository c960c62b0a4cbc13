//! One analysis cycle from filter to report, and the interactive loop that
//! repeats it.

use std::io::{BufRead, Write};
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::{Catalog, FilterSpec};
use crate::error::{BikeshareError, Result};
use crate::loader::load;
use crate::output;
use crate::paginate::next_page;
use crate::prompt::Prompter;
use crate::record::Dataset;
use crate::stats::{
    DurationStats, StationStats, TimeStats, UserStats, duration_stats, station_stats, time_stats,
    user_stats,
};

/// Every statistic group for one filtered dataset.
///
/// A group that could not be computed is `None`.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub city: String,
    pub month: String,
    pub day: String,
    pub trips: usize,
    pub time: Option<TimeStats>,
    pub stations: Option<StationStats>,
    pub durations: Option<DurationStats>,
    pub users: UserStats,
}

impl Summary {
    pub fn compute(dataset: &Dataset, catalog: &Catalog, filter: &FilterSpec) -> Self {
        Summary {
            city: filter.city.clone(),
            month: filter.month_label(catalog),
            day: filter.day_label(),
            trips: dataset.len(),
            time: ok_or_warn(time_stats(dataset, catalog)),
            stations: ok_or_warn(station_stats(dataset)),
            durations: ok_or_warn(duration_stats(dataset)),
            users: user_stats(dataset),
        }
    }
}

fn ok_or_warn<T>(result: Result<T>) -> Option<T> {
    result
        .inspect_err(|e| warn!(error = %e, "Statistic group skipped"))
        .ok()
}

/// Renders a group's result, or the reason it has none.
fn write_group<W: Write, T>(
    w: &mut W,
    title: &str,
    compute: impl FnOnce() -> Result<T>,
    render: impl FnOnce(&mut W, &T) -> Result<()>,
) -> Result<()> {
    output::write_section_start(w, title)?;
    let started = Instant::now();

    match compute() {
        Ok(stats) => render(w, &stats)?,
        Err(e) => {
            warn!(group = title, error = %e, "Statistic group skipped");
            output::write_unavailable(w, &e)?;
        }
    }

    output::write_section_end(w, started.elapsed())
}

/// Writes all four statistic groups, each timed and computed independently.
pub fn write_report<W: Write>(w: &mut W, dataset: &Dataset, catalog: &Catalog) -> Result<()> {
    write_group(
        w,
        "The Most Frequent Times of Travel",
        || time_stats(dataset, catalog),
        |w, s| output::write_time_stats(w, s),
    )?;
    write_group(
        w,
        "The Most Popular Stations and Trip",
        || station_stats(dataset),
        |w, s| output::write_station_stats(w, s),
    )?;
    write_group(
        w,
        "Trip Duration",
        || duration_stats(dataset),
        |w, s| output::write_duration_stats(w, s),
    )?;
    write_group(
        w,
        "User Stats",
        || Ok(user_stats(dataset)),
        |w, s| output::write_user_stats(w, s),
    )
}

/// Offers raw rows five at a time until the user declines or rows run out.
pub fn page_raw_rows<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    dataset: &Dataset,
) -> Result<()> {
    let mut cursor = 0;
    let mut wants_rows = prompter.ask_raw_rows(true)?;

    while wants_rows {
        let (rows, next) = next_page(dataset, cursor);
        if rows.is_empty() {
            writeln!(prompter.output(), "\nThat's all of the raw data for this filter.")?;
            return Ok(());
        }
        output::write_page(prompter.output(), rows, dataset.schema(), cursor)?;
        cursor = next;
        wants_rows = prompter.ask_raw_rows(false)?;
    }

    writeln!(prompter.output(), "\nNo problem!")?;
    Ok(())
}

/// Runs one full cycle: ask, load, report, page.
///
/// A load failure is reported and ends the cycle early; it does not end
/// the session.
pub fn run_cycle<R: BufRead, W: Write>(
    catalog: &Catalog,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let filter = prompter.ask_filter(catalog)?;
    info!(filter = %filter, "Filter selected");

    let dataset = match load(catalog, &filter) {
        Ok(dataset) => dataset,
        Err(e @ (BikeshareError::SourceRead { .. } | BikeshareError::DataFormat { .. })) => {
            warn!(error = %e, "Could not load trip data");
            writeln!(prompter.output(), "\nCould not load data for {}: {e}", filter.city)?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    write_report(prompter.output(), &dataset, catalog)?;
    page_raw_rows(prompter, &dataset)
}

/// The interactive loop. Each iteration starts from a fresh dataset.
pub fn explore<R: BufRead, W: Write>(
    catalog: &Catalog,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    loop {
        run_cycle(catalog, prompter)?;

        if !prompter.ask_restart()? {
            writeln!(prompter.output(), "\nAlright! See you next time!\n")?;
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Schema, TripRecord};
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn dataset(n: usize) -> Dataset {
        let at = NaiveDate::from_ymd_opt(2017, 3, 6)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let records = (0..n)
            .map(|i| TripRecord::new(at, 100.0 * i as f64, format!("S{i}"), "End", None))
            .collect();
        Dataset::new(records, Schema::default())
    }

    fn run_pager(input: &str, dataset: &Dataset) -> String {
        let mut p = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        page_raw_rows(&mut p, dataset).unwrap();
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_report_isolates_failures_on_empty_dataset() {
        let empty = Dataset::new(vec![], Schema::default());
        let mut out = Vec::new();
        write_report(&mut out, &empty, &Catalog::default()).unwrap();
        let out = String::from_utf8(out).unwrap();

        // three groups fail on no trips, user stats still renders
        assert_eq!(out.matches("No trips match this filter.").count(), 3);
        assert!(out.contains("The count of user types is:"));
        assert_eq!(out.matches("This took").count(), 4);
    }

    #[test]
    fn test_summary_compute() {
        let dataset = dataset(3);
        let catalog = Catalog::default();
        let filter = catalog.filter("chicago", "march", "monday").unwrap();

        let summary = Summary::compute(&dataset, &catalog, &filter);

        assert_eq!(summary.month, "March");
        assert_eq!(summary.day, "Monday");
        assert_eq!(summary.trips, 3);
        assert_eq!(summary.time.unwrap().most_common_hour, 8);
        assert_eq!(summary.durations.unwrap().total_duration, 300.0);
    }

    #[test]
    fn test_summary_on_empty_dataset() {
        let catalog = Catalog::default();
        let filter = catalog.filter("chicago", "all", "all").unwrap();
        let summary = Summary::compute(&Dataset::default(), &catalog, &filter);

        assert!(summary.time.is_none());
        assert!(summary.stations.is_none());
        assert!(summary.durations.is_none());
        assert!(summary.users.user_types.is_empty());
    }

    #[test]
    fn test_page_raw_rows_stops_on_no() {
        let out = run_pager("y\nn\n", &dataset(12));
        assert!(out.contains("S4"));
        assert!(!out.contains("S5"));
        assert!(out.contains("No problem!"));
    }

    #[test]
    fn test_page_raw_rows_until_exhausted() {
        let out = run_pager("y\ny\ny\ny\n", &dataset(12));
        assert!(out.contains("S11"));
        assert!(out.contains("That's all of the raw data"));
    }

    #[test]
    fn test_page_raw_rows_declined() {
        let out = run_pager("N\n", &dataset(3));
        assert!(!out.contains("S0"));
    }
}
