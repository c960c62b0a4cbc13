pub mod config;
pub mod error;
pub mod loader;
pub mod output;
pub mod paginate;
pub mod prompt;
pub mod record;
pub mod session;
pub mod stats;

pub use config::{Catalog, DayFilter, FilterSpec, MonthFilter};
pub use error::{BikeshareError, Result};
pub use record::{Dataset, Schema, TripRecord};
