//! Country extraction from cleaned locations.

use crate::table::Value;

use super::states::is_us_state;

/// Country assigned when the location is not text.
///
/// This is a real value in the output column, not the missing-value marker.
pub const UNKNOWN_COUNTRY: &str = "?";

/// Country token for any US state.
const USA: &str = "USA";

/// Get the country of a location.
///
/// The country is the last comma-separated segment, trimmed. US state names
/// and abbreviations map to `"USA"`, so `"St. Moritz, Switzerland"` gives
/// `"Switzerland"` and `"Jackson, Mississippi"` gives `"USA"`. A location
/// without a comma is its own country.
pub fn country_of_loc(location: &Value) -> String {
    let Some(text) = location.as_text() else {
        return UNKNOWN_COUNTRY.to_string();
    };

    let country = text.rsplit(',').next().unwrap_or_default().trim();
    if is_us_state(country) {
        USA.to_string()
    } else {
        country.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(s: &str) -> String {
        country_of_loc(&Value::from(s))
    }

    #[test]
    fn test_foreign_country() {
        assert_eq!(country("St. Moritz, Switzerland"), "Switzerland");
        assert_eq!(country("Paris, France "), "France");
    }

    #[test]
    fn test_us_state_maps_to_usa() {
        assert_eq!(country("Jackson, Mississippi"), "USA");
        assert_eq!(country("San Diego, CA"), "USA");
        assert_eq!(country("Springfield, Cook County, Illinois"), "USA");
    }

    #[test]
    fn test_no_comma_returns_whole_string() {
        assert_eq!(country("  Atlantic Ocean "), "Atlantic Ocean");
        // A bare state is its own last segment, so it still maps.
        assert_eq!(country("California"), "USA");
        assert_eq!(country("CA"), "USA");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        for loc in ["San Diego, CA", "Lima, Peru", "USA", "Texas", "Near nowhere"] {
            let once = country(loc);
            assert_eq!(country(&once), once);
        }
    }

    #[test]
    fn test_non_text_gives_sentinel() {
        assert_eq!(country_of_loc(&Value::Missing), UNKNOWN_COUNTRY);
        assert_eq!(country_of_loc(&Value::Integer(7)), UNKNOWN_COUNTRY);
    }

    #[test]
    fn test_trailing_comma_gives_empty_country() {
        assert_eq!(country("Somewhere,"), "");
    }
}
