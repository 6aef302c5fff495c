//! Archive date parsing.

use chrono::NaiveDate;

/// Date layouts accepted by default. The archive writes dates as
/// `September 17, 1908`; the numeric forms cover re-exported files.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d %B %Y",
];

/// Parse a date with the first format that matches the trimmed text.
pub fn parse_date<S: AsRef<str>>(text: &str, formats: &[S]) -> Option<NaiveDate> {
    let trimmed = text.trim();
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt.as_ref()).ok())
}
