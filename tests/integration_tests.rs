use std::io::Cursor;

use bikeshare_stats::error::BikeshareError;
use bikeshare_stats::loader::load;
use bikeshare_stats::paginate::{Pager, next_page};
use bikeshare_stats::prompt::Prompter;
use bikeshare_stats::session::{Summary, explore};
use bikeshare_stats::stats::{duration_stats, station_stats, time_stats, user_stats};
use bikeshare_stats::{Catalog, Dataset};

fn catalog() -> Catalog {
    Catalog::default().with_data_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

fn load_city(city: &str, month: &str, day: &str) -> Dataset {
    let catalog = catalog();
    let filter = catalog.filter(city, month, day).expect("valid filter");
    load(&catalog, &filter).expect("Failed to load fixture")
}

#[test]
fn test_unfiltered_load_keeps_every_row_in_order() {
    let dataset = load_city("chicago", "all", "all");

    let durations: Vec<f64> = dataset.iter().map(|r| r.trip_duration).collect();
    assert_eq!(
        durations,
        vec![600.0, 300.0, 900.0, 1200.0, 450.0, 750.0, 1500.0, 200.0, 350.0, 750.0]
    );
    let months: Vec<u32> = dataset.iter().map(|r| r.month()).collect();
    assert_eq!(months, vec![1, 1, 2, 3, 1, 2, 2, 1, 3, 1]);
}

#[test]
fn test_month_filter_keeps_only_that_month() {
    let expected = [
        ("january", 1, 5),
        ("february", 2, 3),
        ("march", 3, 2),
        ("april", 4, 0),
        ("june", 6, 0),
    ];

    for (name, index, count) in expected {
        let dataset = load_city("chicago", name, "all");
        assert_eq!(dataset.len(), count, "month {name}");
        assert!(dataset.iter().all(|r| r.month() == index));
    }
}

#[test]
fn test_day_filter_keeps_only_that_day() {
    let expected = [("monday", "Monday", 5), ("tuesday", "Tuesday", 3), ("sunday", "Sunday", 0)];

    for (name, title, count) in expected {
        let dataset = load_city("chicago", "all", name);
        assert_eq!(dataset.len(), count, "day {name}");
        assert!(dataset.iter().all(|r| r.day_of_week() == title));
    }
}

#[test]
fn test_filtered_rows_are_a_subsequence() {
    let all = load_city("chicago", "all", "all");
    let subset = load_city("chicago", "january", "monday");

    let mut remaining = all.iter();
    for record in &subset {
        assert!(remaining.any(|r| r == record));
    }
    assert_eq!(subset.len(), 3);
}

#[test]
fn test_load_is_idempotent() {
    assert_eq!(
        load_city("chicago", "february", "all"),
        load_city("chicago", "february", "all")
    );
}

#[test]
fn test_pager_round_trip() {
    let dataset = load_city("chicago", "all", "all");

    let mut cursor = 0;
    let mut seen = Vec::new();
    loop {
        let (rows, next) = next_page(&dataset, cursor);
        if rows.is_empty() {
            break;
        }
        seen.extend(rows.iter().cloned());
        cursor = next;
    }

    assert_eq!(seen, dataset.records());
    assert_eq!(Pager::new(&dataset).count(), 2);
}

#[test]
fn test_chicago_statistics() {
    let catalog = catalog();
    let dataset = load_city("chicago", "all", "all");

    let time = time_stats(&dataset, &catalog).unwrap();
    assert_eq!(time.most_common_month, "January");
    assert_eq!(time.most_common_day, "Monday");
    assert_eq!(time.most_common_hour, 8);

    let stations = station_stats(&dataset).unwrap();
    assert_eq!(stations.most_common_start, "Streeter Dr & Grand Ave");
    assert_eq!(stations.most_common_end, "Lake Shore Dr & Monroe St");
    assert_eq!(
        stations.most_common_trip,
        "Streeter Dr & Grand Ave to Lake Shore Dr & Monroe St"
    );

    let durations = duration_stats(&dataset).unwrap();
    assert_eq!(durations.total_duration, 7000.0);
    assert_eq!(durations.mean_duration, 700.0);

    let users = user_stats(&dataset);
    assert_eq!(
        users.user_types,
        vec![("Subscriber".to_string(), 7), ("Customer".to_string(), 3)]
    );
    assert_eq!(
        users.genders,
        Some(vec![("Male".to_string(), 5), ("Female".to_string(), 3)])
    );
    let years = users.birth_years.expect("chicago has birth years");
    assert_eq!(years.earliest, Some(1972));
    assert_eq!(years.latest, Some(1999));
    assert_eq!(years.most_common, Some(1985));
}

#[test]
fn test_empty_filter_result() {
    let dataset = load_city("chicago", "june", "monday");
    assert!(dataset.is_empty());

    assert!(matches!(
        duration_stats(&dataset),
        Err(BikeshareError::EmptyDataset(_))
    ));
    assert!(matches!(
        time_stats(&dataset, &catalog()),
        Err(BikeshareError::EmptyDataset(_))
    ));

    let users = user_stats(&dataset);
    assert!(users.user_types.is_empty());
    // the column exists for chicago even though no rows survived
    assert_eq!(users.genders, Some(vec![]));
}

#[test]
fn test_washington_has_no_demographics() {
    let dataset = load_city("washington", "all", "all");
    assert_eq!(dataset.len(), 4);

    let users = user_stats(&dataset);
    assert_eq!(
        users.user_types,
        vec![("Subscriber".to_string(), 3), ("Customer".to_string(), 1)]
    );
    assert_eq!(users.genders, None);
    assert_eq!(users.birth_years, None);

    let durations = duration_stats(&dataset).unwrap();
    assert_eq!(durations.total_duration, 3263.5);
}

#[test]
fn test_missing_city_file() {
    let catalog = catalog();
    let filter = catalog.filter("new york city", "all", "all").unwrap();
    assert!(matches!(
        load(&catalog, &filter),
        Err(BikeshareError::SourceRead { .. })
    ));
}

#[test]
fn test_summary_json() {
    let catalog = catalog();
    let filter = catalog.filter("washington", "june", "all").unwrap();
    let dataset = load(&catalog, &filter).unwrap();

    let summary = Summary::compute(&dataset, &catalog, &filter);
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["city"], "washington");
    assert_eq!(json["month"], "June");
    assert_eq!(json["trips"], 2);
    assert_eq!(json["time"]["most_common_day"], "Monday");
    assert!(json["users"]["genders"].is_null());
}

#[test]
fn test_scripted_explore_session() {
    let input = "\
Washington
all
all
y
n
yes
new york city
all
all
no
";
    let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    explore(&catalog(), &mut prompter).unwrap();
    let out = String::from_utf8(prompter.into_output()).unwrap();

    assert!(out.contains("The most common month traveled is: June"));
    assert!(out.contains(
        "The most popular trip taken according to the start and end station used is: \
         Union Station to Eastern Market"
    ));
    assert!(out.contains("Sorry! No data for Gender exists for this city."));
    assert!(out.contains("Jefferson Dr & 14th St SW"));
    assert!(out.contains("No problem!"));
    assert!(out.contains("Could not load data for new york city"));
    assert!(out.contains("See you next time!"));
}
