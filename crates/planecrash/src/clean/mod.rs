//! Field-level cleaning functions.
//!
//! Each function here is pure: it maps one cell (or one row's worth of
//! cells) to a new value and never fails. Malformed input degrades to the
//! missing-value marker, or to the documented sentinel for the field.

mod accident;
mod country;
mod date;
mod fatalities;
mod location;
mod route;
mod states;

pub use accident::{AccidentType, classify_accident, get_accident_type};
pub use country::{UNKNOWN_COUNTRY, country_of_loc};
pub use date::{DEFAULT_DATE_FORMATS, parse_date};
pub use fatalities::{Count, FatalityCounts, FatalityField, split_fatalities};
pub use location::{LOCATION_OUTLIERS, LOCATION_TYPOS, clean_location};
pub use route::{ROUTE_SEPARATOR, split_route};
pub use states::{US_STATES, is_us_state};
