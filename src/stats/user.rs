use serde::Serialize;

use crate::record::Dataset;
use crate::stats::utility::{Counts, mode, value_counts};

/// Earliest, latest and most common birth year.
///
/// Each is `None` when the column exists but no trip carries a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: Option<i32>,
    pub latest: Option<i32>,
    pub most_common: Option<i32>,
}

/// Who is riding.
///
/// `genders` and `birth_years` are `None` when the city's data has no such
/// column at all, which is different from a column with no values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Counts,
    pub genders: Option<Counts>,
    pub birth_years: Option<BirthYearStats>,
}

/// User type counts plus gender and birth-year figures where the city
/// collects them. Blank cells are skipped. Never fails: counts over no
/// trips are simply empty.
#[tracing::instrument(skip_all, fields(trips = dataset.len()))]
pub fn user_stats(dataset: &Dataset) -> UserStats {
    let schema = dataset.schema();

    let user_types = value_counts(dataset.iter().filter_map(|r| r.user_type.as_deref()));

    let genders = schema
        .has_gender
        .then(|| value_counts(dataset.iter().filter_map(|r| r.gender.as_deref())));

    let birth_years = schema.has_birth_year.then(|| {
        let years = || dataset.iter().filter_map(|r| r.birth_year);
        BirthYearStats {
            earliest: years().min(),
            latest: years().max(),
            most_common: mode(years()),
        }
    });

    UserStats {
        user_types,
        genders,
        birth_years,
    }
}
