//! Coercion helpers between Value shapes.

use crate::Value;

/// Truthiness of a nominal-array element.
/// Flags are themselves, numbers are truthy when non-zero, text when non-empty.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Flag(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::Text(s) => !s.is_empty(),
        Value::Color(_) | Value::List(_) => true,
    }
}
