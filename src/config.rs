//! City catalog and filter validation.
//!
//! [`Catalog`] maps city keys to their trip CSV files and holds the month and
//! weekday enumerations users may filter by. [`FilterSpec`] is the validated
//! selection handed to the loader.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Weekday;
use serde::Deserialize;

use crate::error::{BikeshareError, Result};
use crate::record::{TripRecord, weekday_name};

/// Sentinel accepted by both the month and the day question.
pub const ALL: &str = "all";

static DEFAULT_CITIES: &[(&str, &str)] = &[
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

static DEFAULT_MONTHS: &[&str] = &[
    ALL, "january", "february", "march", "april", "may", "june",
];

static DEFAULT_DAYS: &[&str] = &[
    ALL,
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Cities, their data sources, and the filter vocabularies.
///
/// May be overridden from a JSON file on disk:
/// ```json
/// {
///   "cities": {
///     "chicago": "chicago.csv",
///     "washington": "/srv/bikeshare/washington.csv"
///   },
///   "months": ["all", "january", "february", "march"]
/// }
/// ```
/// Relative source paths resolve against [`Catalog::data_dir`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Catalog {
    #[serde(skip)]
    data_dir: PathBuf,
    cities: BTreeMap<String, PathBuf>,
    months: Vec<String>,
    days: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            data_dir: PathBuf::from("."),
            cities: DEFAULT_CITIES
                .iter()
                .map(|(city, file)| (city.to_string(), PathBuf::from(file)))
                .collect(),
            months: DEFAULT_MONTHS.iter().map(|m| m.to_string()).collect(),
            days: DEFAULT_DAYS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl Catalog {
    /// Loads the catalog from a JSON file at `path`.
    ///
    /// Keys and enumeration entries are lower-cased. Both enumerations must
    /// start with `"all"`, months must follow calendar order from January,
    /// and every day must be a weekday name.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| BikeshareError::SourceRead {
                path: path.to_path_buf(),
                source,
            })?;
        let parsed: Catalog = serde_json::from_str(&content)
            .map_err(|e| BikeshareError::Config(format!("{}: {e}", path.display())))?;
        parsed.normalized()
    }

    fn normalized(self) -> Result<Self> {
        let catalog = Catalog {
            data_dir: self.data_dir,
            cities: self
                .cities
                .into_iter()
                .map(|(city, file)| (casefold(&city), file))
                .collect(),
            months: self.months.iter().map(|m| casefold(m)).collect(),
            days: self.days.iter().map(|d| casefold(d)).collect(),
        };

        if catalog.cities.is_empty() {
            return Err(BikeshareError::Config("no cities configured".into()));
        }
        if catalog.months.first().map(String::as_str) != Some(ALL) {
            return Err(BikeshareError::Config(
                "month list must start with \"all\"".into(),
            ));
        }
        if catalog.months.len() > 13 {
            return Err(BikeshareError::Config(
                "month list has more than twelve months".into(),
            ));
        }
        // a month's position in the list is its calendar number
        for (i, name) in catalog.months.iter().enumerate().skip(1) {
            let expected = u8::try_from(i)
                .ok()
                .and_then(|i| chrono::Month::try_from(i).ok())
                .map(|m| m.name().to_lowercase());
            if expected.as_deref() != Some(name.as_str()) {
                return Err(BikeshareError::Config(format!(
                    "month {i} must be {}, found {name}",
                    expected.unwrap_or_default()
                )));
            }
        }
        if catalog.days.first().map(String::as_str) != Some(ALL) {
            return Err(BikeshareError::Config(
                "day list must start with \"all\"".into(),
            ));
        }
        if let Some(bad) = catalog.days[1..]
            .iter()
            .find(|d| d.parse::<Weekday>().is_err())
        {
            return Err(BikeshareError::Config(format!("not a weekday: {bad}")));
        }

        Ok(catalog)
    }

    /// Sets the directory relative source paths are resolved against.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// City keys in alphabetical order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.cities.keys().map(String::as_str)
    }

    pub fn months(&self) -> &[String] {
        &self.months
    }

    pub fn days(&self) -> &[String] {
        &self.days
    }

    /// Resolves the source file for `city`.
    pub fn source_path(&self, city: &str) -> Result<PathBuf> {
        let file = self
            .cities
            .get(city)
            .ok_or_else(|| BikeshareError::UnknownCity(city.to_string()))?;
        Ok(self.data_dir.join(file))
    }

    /// Iterates over all `(city, resolved source path)` pairs.
    pub fn sources(&self) -> impl Iterator<Item = (&str, PathBuf)> {
        self.cities
            .iter()
            .map(|(city, file)| (city.as_str(), self.data_dir.join(file)))
    }

    /// Position of `month` in the month list. `"all"` sits at 0, so
    /// `"january"` is 1.
    pub fn month_index(&self, month: &str) -> Option<u32> {
        self.months
            .iter()
            .position(|m| m == month)
            .filter(|&i| i > 0)
            .map(|i| i as u32)
    }

    /// Title-cased name for a calendar month number.
    ///
    /// Months outside the configured list fall back to the calendar name.
    pub fn month_name(&self, index: u32) -> String {
        match self.months.get(index as usize) {
            Some(name) if index > 0 => title_case(name),
            _ => u8::try_from(index)
                .ok()
                .and_then(|i| chrono::Month::try_from(i).ok())
                .map(|m| m.name().to_string())
                .unwrap_or_else(|| index.to_string()),
        }
    }

    /// Validates raw user answers into a [`FilterSpec`].
    pub fn filter(&self, city: &str, month: &str, day: &str) -> Result<FilterSpec> {
        Ok(FilterSpec {
            city: self.parse_city(city)?,
            month: self.parse_month(month)?,
            day: self.parse_day(day)?,
        })
    }

    pub fn parse_city(&self, answer: &str) -> Result<String> {
        let city = casefold(answer);
        if self.cities.contains_key(&city) {
            Ok(city)
        } else {
            Err(BikeshareError::UnknownCity(answer.trim().to_string()))
        }
    }

    pub fn parse_month(&self, answer: &str) -> Result<MonthFilter> {
        let month = casefold(answer);
        if month == ALL {
            return Ok(MonthFilter::All);
        }
        self.month_index(&month)
            .map(MonthFilter::Month)
            .ok_or_else(|| BikeshareError::InvalidMonth(answer.trim().to_string()))
    }

    pub fn parse_day(&self, answer: &str) -> Result<DayFilter> {
        let day = casefold(answer);
        if day == ALL {
            return Ok(DayFilter::All);
        }
        if !self.days[1..].contains(&day) {
            return Err(BikeshareError::InvalidDay(answer.trim().to_string()));
        }
        day.parse::<Weekday>()
            .map(DayFilter::Day)
            .map_err(|_| BikeshareError::InvalidDay(answer.trim().to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    /// Calendar month number, 1 for January.
    Month(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Day(Weekday),
}

/// A validated city, month and day selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub city: String,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSpec {
    /// Whether `record` survives both the month and the day filter.
    pub fn matches(&self, record: &TripRecord) -> bool {
        let month_ok = match self.month {
            MonthFilter::All => true,
            MonthFilter::Month(m) => record.month() == m,
        };
        let day_ok = match self.day {
            DayFilter::All => true,
            DayFilter::Day(d) => record.day_of_week() == weekday_name(d),
        };
        month_ok && day_ok
    }

    /// Human-readable month label, `"all"` when unfiltered.
    pub fn month_label(&self, catalog: &Catalog) -> String {
        match self.month {
            MonthFilter::All => ALL.to_string(),
            MonthFilter::Month(m) => catalog.month_name(m),
        }
    }

    pub fn day_label(&self) -> String {
        match self.day {
            DayFilter::All => ALL.to_string(),
            DayFilter::Day(d) => weekday_name(d).to_string(),
        }
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = match self.month {
            MonthFilter::All => ALL.to_string(),
            MonthFilter::Month(m) => m.to_string(),
        };
        write!(f, "city={} month={} day={}", self.city, month, self.day_label())
    }
}

fn casefold(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Upper-cases the first letter of every space-separated word.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
