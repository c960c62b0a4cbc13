//! Descriptive statistics over a filtered trip dataset.
//!
//! Four independent groups: travel times, stations and trips, trip
//! durations, and user demographics. Each is computed on its own so a
//! failure in one (usually an empty dataset) never blocks the others.

pub mod duration;
pub mod station;
pub mod time;
pub mod user;
pub mod utility;

pub use duration::{DurationStats, duration_stats, total_duration};
pub use station::{StationStats, station_stats};
pub use time::{TimeStats, time_stats};
pub use user::{BirthYearStats, UserStats, user_stats};
