//! Location text cleaning.

use crate::table::Value;

/// Filler substrings removed from locations, in application order.
///
/// `"Over"` appears twice; the second pass removes an occurrence formed by
/// the first, as in `"OOverver"`.
pub const LOCATION_OUTLIERS: &[&str] = &[
    "Over",
    "Over",
    "Near",
    "Off",
    "off",
    "Territory of",
    "South of",
    "the",
    "coast",
];

/// (search, replace) typo corrections, applied in order after outlier
/// removal. Later pairs see the output of earlier ones.
pub const LOCATION_TYPOS: &[(&str, &str)] = &[
    ("United States", "USA"),
    ("Unied Kingdom", "United Kingdom"),
    ("UK", "United Kingdom"),
    ("United States", "USA"),
    ("Russian", "Russia"),
    ("Irkutsk Russia", "Russia"),
    ("Washington DC", "Washington"),
    ("Washington D.C.", "Washington"),
    ("Washingon", "Washington"),
    ("Minnisota", "Minnesota"),
];

/// Clean a location cell.
///
/// Non-text cells become `Missing`. Text has every outlier removed (trimming
/// after each removal) and then every typo substituted.
pub fn clean_location(location: &Value) -> Value {
    let Some(text) = location.as_text() else {
        return Value::Missing;
    };

    let mut cleaned = text.to_string();
    for outlier in LOCATION_OUTLIERS {
        cleaned = cleaned.replace(outlier, "").trim().to_string();
    }
    for (search, replace) in LOCATION_TYPOS {
        cleaned = cleaned.replace(search, replace);
    }

    Value::Text(cleaned)
}
