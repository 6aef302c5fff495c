//! Cell values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single table cell.
///
/// `Missing` is the missing-value marker. It is distinct from `Text("")`:
/// an empty string is a value, `Missing` is the absence of one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No data.
    #[default]
    Missing,
    /// Free text.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
}

impl Value {
    /// Build a cell from a raw field read off disk. Empty fields are missing.
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            Value::Missing
        } else {
            Value::Text(raw.to_string())
        }
    }

    /// Returns true for the missing-value marker.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Borrow the text of a `Text` cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns true if the cell holds exactly `token` as text.
    pub fn is_text(&self, token: &str) -> bool {
        self.as_text() == Some(token)
    }

    /// Convert to a numeric cell.
    ///
    /// Integers and floats pass through. Text that parses as an integer
    /// becomes `Integer`, text that parses as a finite float becomes `Float`,
    /// anything else becomes `Missing`.
    pub fn to_numeric(&self) -> Value {
        match self {
            Value::Integer(_) | Value::Float(_) => self.clone(),
            Value::Missing => Value::Missing,
            Value::Text(s) => {
                let trimmed = s.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    Value::Integer(i)
                } else {
                    match trimmed.parse::<f64>() {
                        Ok(f) if f.is_finite() => Value::Float(f),
                        _ => Value::Missing,
                    }
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<Option<i64>> for Value {
    fn from(i: Option<i64>) -> Self {
        i.map_or(Value::Missing, Value::Integer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_empty_is_missing() {
        assert_eq!(Value::from_raw(""), Value::Missing);
        assert_eq!(Value::from_raw(" "), Value::Text(" ".to_string()));
    }

    #[test]
    fn test_missing_distinct_from_empty_text() {
        assert!(Value::Missing.is_missing());
        assert!(!Value::Text(String::new()).is_missing());
        assert_ne!(Value::Missing, Value::Text(String::new()));
    }

    #[test]
    fn test_to_numeric() {
        assert_eq!(Value::from("0").to_numeric(), Value::Integer(0));
        assert_eq!(Value::from(" 12 ").to_numeric(), Value::Integer(12));
        assert_eq!(Value::from("2.5").to_numeric(), Value::Float(2.5));
        assert_eq!(Value::from("several").to_numeric(), Value::Missing);
        assert_eq!(Value::from("inf").to_numeric(), Value::Missing);
        assert_eq!(Value::Missing.to_numeric(), Value::Missing);
        assert_eq!(Value::Integer(3).to_numeric(), Value::Integer(3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Missing.to_string(), "");
        assert_eq!(Value::from("Paris").to_string(), "Paris");
        assert_eq!(Value::Integer(44).to_string(), "44");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_json_shape() {
        let cells = vec![Value::Missing, Value::from("a"), Value::Integer(2)];
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r#"[null,"a",2]"#);
    }
}
