//! Route splitting.

use crate::table::Value;

/// Separator between origin and destination in a route entry.
pub const ROUTE_SEPARATOR: &str = " - ";

/// Split a route cell into (origin, destination).
///
/// The origin is the text before the first separator and the destination
/// the text after the last one, so intermediate stops are dropped. A route
/// without a separator is both its own origin and destination. Non-text
/// routes give two missing cells.
pub fn split_route(route: &Value, separator: &str) -> (Value, Value) {
    let Some(text) = route.as_text() else {
        return (Value::Missing, Value::Missing);
    };

    let origin = text.split(separator).next().unwrap_or(text);
    let destination = text.rsplit(separator).next().unwrap_or(text);
    (Value::from(origin), Value::from(destination))
}
