//! Property-based tests for the cleaning functions and pipeline.
//!
//! These tests use proptest to generate inputs and verify that the cleaning
//! functions keep their invariants under all conditions.
//!
//! # Testing Philosophy
//!
//! Property-based tests verify:
//! 1. **No panics**: cleaning never crashes on any input
//! 2. **Determinism**: same input always produces same output
//! 3. **Invariants**: ordering, round-trips and sentinels always hold
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p planecrash --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p planecrash --test property_tests
//! ```

use chrono::NaiveDate;
use proptest::prelude::*;

use planecrash::clean::{ROUTE_SEPARATOR, US_STATES};
use planecrash::{
    AccidentType, Count, Table, UNKNOWN_COUNTRY, Value, classify_accident, clean_database,
    clean_location, country_of_loc, split_fatalities, split_route,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Generate completely random bytes (edge cases)
fn random_utf8() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 0..200)
        .prop_filter_map("valid UTF-8", |bytes| String::from_utf8(bytes).ok())
}

/// Place names that contain no filler word.
fn place_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Paris"),
        Just("Lima"),
        Just("Oslo"),
        Just("Kenya"),
        Just("Bay"),
        Just("Island"),
        Just("Sea"),
        Just("South"),
        Just("Territory"),
        Just("of"),
    ]
    .prop_map(String::from)
}

/// Free-text locations mixing place names and filler words.
fn location_like() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        3 => place_name(),
        1 => prop_oneof![
            Just("Over"),
            Just("Near"),
            Just("Off"),
            Just("off"),
            Just("the"),
            Just("coast"),
        ]
        .prop_map(String::from),
    ];
    prop::collection::vec(word, 1..8).prop_map(|words| words.join(" "))
}

/// A single place without the route separator.
fn route_end() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,10}( [A-Z][a-z]{1,10})?"
}

fn archive_date() -> impl Strategy<Value = Option<NaiveDate>> {
    prop_oneof![
        9 => (1908i32..2010, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        1 => Just(None),
    ]
}

// =============================================================================
// Helpers
// =============================================================================

const RAW_HEADERS: [&str; 11] = [
    "Unnamed: 0",
    "Unnamed: 0.1",
    "Date:",
    "Location:",
    "Flight #:",
    "Route:",
    "AC  Type:",
    "Registration:",
    "cn / ln:",
    "Fatalities:",
    "Ground:",
];

fn raw_table(rows: &[(Option<NaiveDate>, String, String)]) -> Table {
    let records: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(i, (date, location, route))| {
            let date = date
                .map(|d| d.format("%B %d, %Y").to_string())
                .unwrap_or_else(|| "?".to_string());
            vec![
                i.to_string(),
                i.to_string(),
                date,
                location.clone(),
                "?".to_string(),
                route.clone(),
                "Douglas DC-3".to_string(),
                "?".to_string(),
                "?".to_string(),
                format!("{} (passengers:? crew:?)", i),
                "0".to_string(),
            ]
        })
        .collect();
    Table::from_records(&RAW_HEADERS.map(String::from), &records)
}

// =============================================================================
// Location and Country Properties
// =============================================================================

mod location_tests {
    use super::*;

    proptest! {
        /// Location cleaning never panics on random UTF-8.
        #[test]
        fn never_panics_on_random_utf8(input in random_utf8()) {
            let _ = clean_location(&Value::Text(input));
        }

        /// Location cleaning is deterministic.
        #[test]
        fn cleaning_is_deterministic(input in location_like()) {
            let value = Value::Text(input);
            prop_assert_eq!(clean_location(&value), clean_location(&value));
        }

        /// No single-word filler survives cleaning when fillers are whole words.
        #[test]
        fn filler_words_removed(input in location_like()) {
            let cleaned = clean_location(&Value::Text(input.clone()));
            let text = cleaned.as_text().unwrap_or_default().to_string();
            for filler in ["Over", "Near", "Off", "off", "the", "coast"] {
                prop_assert!(
                    !text.contains(filler),
                    "'{}' cleaned to '{}' still contains '{}'",
                    input, text, filler
                );
            }
            prop_assert_eq!(text.trim(), text.as_str());
        }

        /// Any "<city>, <state>" location is in the USA.
        #[test]
        fn state_suffix_is_usa(
            city in "[A-Z][a-z]{2,10}",
            state in prop::sample::select(US_STATES.to_vec()),
            use_abbrev in any::<bool>()
        ) {
            let state = if use_abbrev { state.0 } else { state.1 };
            let location = Value::Text(format!("{}, {}", city, state));
            prop_assert_eq!(country_of_loc(&location), "USA");
        }

        /// Extracting a country from an extracted country changes nothing.
        #[test]
        fn country_extraction_is_idempotent(input in random_utf8()) {
            let once = country_of_loc(&Value::Text(input));
            let twice = country_of_loc(&Value::Text(once.clone()));
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn non_text_sentinels() {
        for value in [Value::Missing, Value::Integer(1), Value::Float(2.5)] {
            assert_eq!(clean_location(&value), Value::Missing);
            assert_eq!(country_of_loc(&value), UNKNOWN_COUNTRY);
        }
    }
}

// =============================================================================
// Fatality Properties
// =============================================================================

mod fatality_tests {
    use super::*;

    proptest! {
        /// Fatality parsing never panics and never yields more than three fields.
        #[test]
        fn never_panics_on_random_utf8(input in random_utf8()) {
            let counts = split_fatalities(&input);
            prop_assert!(counts.len() <= 3);
        }

        /// Well-formed entries parse into their three parts.
        #[test]
        fn well_formed_entries(total in 0i64..1000, passengers in 0i64..1000, crew in 0i64..50) {
            let entry = format!("{} (passengers:{} crew:{})", total, passengers, crew);
            let counts = split_fatalities(&entry);
            prop_assert_eq!(counts.total, Some(Count::Known(total)));
            prop_assert_eq!(counts.passengers, Some(Count::Known(passengers)));
            prop_assert_eq!(counts.crew, Some(Count::Known(crew)));
        }
    }
}

// =============================================================================
// Route and Classification Properties
// =============================================================================

mod route_tests {
    use super::*;

    proptest! {
        /// Rejoining a split route reproduces it.
        #[test]
        fn split_then_join_round_trips(origin in route_end(), destination in route_end()) {
            let route = Value::Text(format!("{}{}{}", origin, ROUTE_SEPARATOR, destination));
            let (o, d) = split_route(&route, ROUTE_SEPARATOR);
            prop_assert_eq!(&o, &Value::Text(origin));
            prop_assert_eq!(&d, &Value::Text(destination));
            prop_assert_eq!(Value::Text(format!("{}{}{}", o, ROUTE_SEPARATOR, d)), route);
        }

        /// A location equal to the origin is always a take-off.
        #[test]
        fn origin_match_is_take_off(place in route_end(), destination in route_end()) {
            let place = Value::Text(place);
            prop_assert_eq!(
                classify_accident(&place, &place, &Value::Text(destination)),
                AccidentType::TakeOff
            );
        }

        /// Any missing field makes the phase unknown.
        #[test]
        fn missing_field_is_unknown(a in route_end(), b in route_end(), which in 0usize..3) {
            let mut fields = [Value::Text(a.clone()), Value::Text(a), Value::Text(b)];
            fields[which] = Value::Missing;
            prop_assert_eq!(
                classify_accident(&fields[0], &fields[1], &fields[2]),
                AccidentType::Unknown
            );
        }
    }
}

// =============================================================================
// Pipeline Properties
// =============================================================================

mod pipeline_tests {
    use super::*;

    proptest! {
        /// The cleaned table is always sorted by date, missing dates last.
        #[test]
        fn output_sorted_by_date(
            rows in prop::collection::vec((archive_date(), location_like(), route_end()), 1..40)
        ) {
            let raw = raw_table(&rows);
            let cleaned = clean_database(&raw).unwrap();

            prop_assert!(cleaned.is_sorted_by_index());
            prop_assert_eq!(cleaned.row_count(), rows.len());
        }

        /// Cleaning is deterministic and leaves its input alone.
        #[test]
        fn pipeline_is_deterministic(
            rows in prop::collection::vec((archive_date(), location_like(), route_end()), 1..20)
        ) {
            let raw = raw_table(&rows);
            let before = raw.clone();
            let first = clean_database(&raw).unwrap();
            let second = clean_database(&raw).unwrap();

            prop_assert_eq!(first, second);
            prop_assert_eq!(raw, before);
        }

        /// The country column is never missing.
        #[test]
        fn country_never_missing(
            rows in prop::collection::vec((archive_date(), location_like(), route_end()), 1..20)
        ) {
            let cleaned = clean_database(&raw_table(&rows)).unwrap();
            let countries = cleaned.column_by_name("Location_Country").unwrap();
            prop_assert!(countries.iter().all(|c| c.as_text().is_some()));
        }
    }
}
