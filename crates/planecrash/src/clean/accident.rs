//! Accident phase classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::Value;

/// Coarse accident phase, guessed from where the crash happened relative to
/// the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccidentType {
    /// Location, origin or destination is missing.
    Unknown,
    /// Location matches the origin.
    TakeOff,
    /// Location matches the destination (and not the origin).
    Landing,
    /// All fields present, no match.
    Other,
}

impl AccidentType {
    pub const ALL: [AccidentType; 4] = [
        AccidentType::Unknown,
        AccidentType::TakeOff,
        AccidentType::Landing,
        AccidentType::Other,
    ];

    /// Numeric code stored in the table.
    pub fn code(&self) -> i64 {
        match self {
            AccidentType::Unknown => 0,
            AccidentType::TakeOff => 1,
            AccidentType::Landing => 2,
            AccidentType::Other => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccidentType::Unknown => "unknown",
            AccidentType::TakeOff => "take-off",
            AccidentType::Landing => "landing",
            AccidentType::Other => "other",
        }
    }
}

impl fmt::Display for AccidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Equal, or one contains the other.
fn places_match(a: &str, b: &str) -> bool {
    a == b || b.contains(a) || a.contains(b)
}

/// Classify one record.
///
/// Take-off is checked before landing, so a location matching both ends of
/// the route is a take-off. Non-text cells count as missing.
pub fn classify_accident(location: &Value, origin: &Value, destination: &Value) -> AccidentType {
    let (Some(location), Some(origin), Some(destination)) =
        (location.as_text(), origin.as_text(), destination.as_text())
    else {
        return AccidentType::Unknown;
    };

    if places_match(location, origin) {
        AccidentType::TakeOff
    } else if places_match(location, destination) {
        AccidentType::Landing
    } else {
        AccidentType::Other
    }
}

/// Classify every row from its location, origin and destination columns.
/// The output is aligned with the input rows.
pub fn get_accident_type<'a, I>(rows: I) -> Vec<AccidentType>
where
    I: IntoIterator<Item = (&'a Value, &'a Value, &'a Value)>,
{
    rows.into_iter()
        .map(|(location, origin, destination)| classify_accident(location, origin, destination))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(loc: &str, origin: &str, dest: &str) -> AccidentType {
        classify_accident(&Value::from(loc), &Value::from(origin), &Value::from(dest))
    }

    #[test]
    fn test_take_off() {
        assert_eq!(classify("Chicago", "Chicago", "New York"), AccidentType::TakeOff);
        assert_eq!(classify("Chicago, Illinois", "Chicago", "New York"), AccidentType::TakeOff);
        assert_eq!(classify("Chicago", "Chicago O'Hare", "New York"), AccidentType::TakeOff);
    }

    #[test]
    fn test_landing() {
        assert_eq!(classify("New York", "Chicago", "New York"), AccidentType::Landing);
    }

    #[test]
    fn test_other() {
        assert_eq!(classify("Boston", "Chicago", "New York"), AccidentType::Other);
    }

    #[test]
    fn test_unknown_when_any_missing() {
        let text = Value::from("Chicago");
        assert_eq!(
            classify_accident(&text, &Value::Missing, &text),
            AccidentType::Unknown
        );
        assert_eq!(
            classify_accident(&Value::Missing, &text, &text),
            AccidentType::Unknown
        );
        assert_eq!(
            classify_accident(&text, &text, &Value::Integer(1)),
            AccidentType::Unknown
        );
    }

    #[test]
    fn test_take_off_has_priority() {
        assert_eq!(classify("Dakar", "Dakar", "Dakar"), AccidentType::TakeOff);
    }

    #[test]
    fn test_codes() {
        let codes: Vec<i64> = AccidentType::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3]);
        assert_eq!(AccidentType::from_code(2), Some(AccidentType::Landing));
        assert_eq!(AccidentType::from_code(9), None);
    }

    #[test]
    fn test_get_accident_type_aligned() {
        let l = [Value::from("Chicago"), Value::from("Boston"), Value::Missing];
        let o = [Value::from("Chicago"), Value::from("Chicago"), Value::from("Chicago")];
        let d = [Value::from("Miami"), Value::from("Miami"), Value::from("Miami")];
        let types = get_accident_type(l.iter().zip(o.iter()).zip(d.iter()).map(|((l, o), d)| (l, o, d)));
        assert_eq!(
            types,
            vec![AccidentType::TakeOff, AccidentType::Other, AccidentType::Unknown]
        );
    }
}
