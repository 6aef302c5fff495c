//! Fatality string parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::table::Value;

/// A digit run or a literal `?`, in order of appearance.
static COUNT_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?|\d+").unwrap());

/// Named parts of a fatality entry, in the order they appear in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FatalityField {
    Total,
    Passengers,
    Crew,
}

impl FatalityField {
    /// Positional order used when assigning extracted tokens.
    pub const ALL: [FatalityField; 3] = [
        FatalityField::Total,
        FatalityField::Passengers,
        FatalityField::Crew,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FatalityField::Total => "total",
            FatalityField::Passengers => "passengers",
            FatalityField::Crew => "crew",
        }
    }
}

/// One extracted count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Count {
    /// A number written in the entry.
    Known(i64),
    /// A `?` in the entry, or a digit run that does not fit an `i64`.
    Unknown,
}

impl Count {
    fn from_token(token: &str) -> Self {
        token.parse().map_or(Count::Unknown, Count::Known)
    }

    /// The count as a cell; unknown counts are missing.
    pub fn to_value(self) -> Value {
        match self {
            Count::Known(n) => Value::Integer(n),
            Count::Unknown => Value::Missing,
        }
    }
}

/// Counts parsed from a fatality entry.
///
/// A field is `None` when the entry had too few tokens to reach it, which is
/// different from `Some(Count::Unknown)` (the entry said `?`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FatalityCounts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passengers: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crew: Option<Count>,
}

impl FatalityCounts {
    /// Look up a field by name.
    pub fn get(&self, field: FatalityField) -> Option<Count> {
        match field {
            FatalityField::Total => self.total,
            FatalityField::Passengers => self.passengers,
            FatalityField::Crew => self.crew,
        }
    }

    fn set(&mut self, field: FatalityField, count: Count) {
        match field {
            FatalityField::Total => self.total = Some(count),
            FatalityField::Passengers => self.passengers = Some(count),
            FatalityField::Crew => self.crew = Some(count),
        }
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        FatalityField::ALL
            .iter()
            .filter(|f| self.get(**f).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The total as a cell. Absent and unknown totals are both missing.
    pub fn total_value(&self) -> Value {
        self.total.map_or(Value::Missing, Count::to_value)
    }
}

/// Split a fatality entry into its counts.
///
/// E.g. `"15 (passengers:13 crew:2)"` gives total 15, passengers 13, crew 2.
/// Tokens past the third are ignored.
pub fn split_fatalities(entry: &str) -> FatalityCounts {
    let mut counts = FatalityCounts::default();
    for (field, token) in FatalityField::ALL
        .into_iter()
        .zip(COUNT_TOKEN.find_iter(entry))
    {
        counts.set(field, Count::from_token(token.as_str()));
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_entry() {
        let counts = split_fatalities("15 (passengers:13 crew:2)");
        assert_eq!(counts.total, Some(Count::Known(15)));
        assert_eq!(counts.passengers, Some(Count::Known(13)));
        assert_eq!(counts.crew, Some(Count::Known(2)));
        assert_eq!(counts.total_value(), Value::Integer(15));
    }

    #[test]
    fn test_unknown_counts() {
        let counts = split_fatalities("? (passengers:? crew:?)");
        assert_eq!(counts.len(), 3);
        for field in FatalityField::ALL {
            assert_eq!(counts.get(field), Some(Count::Unknown));
        }
        assert_eq!(counts.total_value(), Value::Missing);
    }

    #[test]
    fn test_total_only() {
        let counts = split_fatalities("3");
        assert_eq!(counts.total, Some(Count::Known(3)));
        assert_eq!(counts.passengers, None);
        assert_eq!(counts.crew, None);
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_mixed_known_and_unknown() {
        let counts = split_fatalities("5 (passengers:? crew:5)");
        assert_eq!(counts.total, Some(Count::Known(5)));
        assert_eq!(counts.passengers, Some(Count::Unknown));
        assert_eq!(counts.crew, Some(Count::Known(5)));
    }

    #[test]
    fn test_empty_and_garbage() {
        assert!(split_fatalities("").is_empty());
        assert!(split_fatalities("none reported").is_empty());
        assert_eq!(split_fatalities("").total_value(), Value::Missing);
    }

    #[test]
    fn test_overflow_is_unknown() {
        let counts = split_fatalities("99999999999999999999999");
        assert_eq!(counts.total, Some(Count::Unknown));
    }

    #[test]
    fn test_extra_tokens_ignored() {
        let counts = split_fatalities("10 (passengers:8 crew:2) ground:4");
        assert_eq!(counts.crew, Some(Count::Known(2)));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_absent_fields_not_serialized() {
        let json = serde_json::to_value(split_fatalities("3")).unwrap();
        assert_eq!(json, serde_json::json!({"total": {"known": 3}}));
    }
}
