//! Typed trip rows and the filtered dataset they live in.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Columns every city file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] =
    [START_TIME, TRIP_DURATION, START_STATION, END_STATION, USER_TYPE];

/// One ride.
///
/// `month` and `day_of_week` are derived from the start time when the record
/// is built and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    /// Seconds.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    /// `None` for a blank cell.
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    month: u32,
    day_of_week: &'static str,
}

impl TripRecord {
    pub fn new(
        start_time: NaiveDateTime,
        trip_duration: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        user_type: Option<String>,
    ) -> Self {
        TripRecord {
            start_time,
            end_time: None,
            trip_duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type,
            gender: None,
            birth_year: None,
            month: start_time.month(),
            day_of_week: weekday_name(start_time.weekday()),
        }
    }

    pub fn with_end_time(mut self, end_time: Option<NaiveDateTime>) -> Self {
        self.end_time = end_time;
        self
    }

    /// Set the optional demographic fields
    pub fn with_demographics(mut self, gender: Option<String>, birth_year: Option<i32>) -> Self {
        self.gender = gender;
        self.birth_year = birth_year;
        self
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    /// Calendar month of the start time, 1 for January.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Full weekday name of the start time, e.g. `"Monday"`.
    pub fn day_of_week(&self) -> &'static str {
        self.day_of_week
    }

    /// Start hour, 0 to 23.
    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }

    /// Composite key naming the ride's start and end station.
    pub fn trip(&self) -> String {
        format!("{} to {}", self.start_station, self.end_station)
    }
}

/// Which optional columns a city file carries.
///
/// Presence is decided once from the header, never per row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub has_end_time: bool,
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// Trips that survived filtering, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<TripRecord>,
    schema: Schema,
}

impl Dataset {
    pub fn new(records: Vec<TripRecord>, schema: Schema) -> Self {
        Dataset { records, schema }
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
