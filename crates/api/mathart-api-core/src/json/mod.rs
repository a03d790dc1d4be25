//! JSON helpers for animatable values.
//!
//! Hosts hand over plain JSON (numbers, booleans, strings, arrays). Strings
//! written as colour literals become [`Value::Color`] (or a
//! [`ValueError::MalformedColor`]); everything else textual stays
//! [`Value::Text`]. The shorthand objects `{ "color": "..." }`
//! and `{ "text": "..." }` force one interpretation.

use serde_json::{json, Value as JsonValue};

use crate::{Color, Value, ValueError, ValueMap};

/// Convert host JSON into a [`Value`].
pub fn parse_value(value: JsonValue) -> Result<Value, ValueError> {
    match value {
        JsonValue::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .ok_or_else(|| ValueError::UnsupportedJson(n.to_string())),
        JsonValue::Bool(b) => Ok(Value::Flag(b)),
        JsonValue::String(s) => Value::from_text(s),
        JsonValue::Array(items) => items
            .into_iter()
            .map(parse_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        JsonValue::Object(obj) => {
            if let Some(literal) = obj.get("color").and_then(|x| x.as_str()) {
                return literal.parse::<Color>().map(Value::Color);
            }
            if let Some(text) = obj.get("text").and_then(|x| x.as_str()) {
                return Ok(Value::Text(text.to_string()));
            }
            Err(ValueError::UnsupportedJson(JsonValue::Object(obj).to_string()))
        }
        JsonValue::Null => Err(ValueError::UnsupportedJson("null".into())),
    }
}

/// Convert a JSON object of `name -> value` into a [`ValueMap`], keeping key order.
pub fn parse_value_map(value: JsonValue) -> Result<ValueMap, ValueError> {
    let JsonValue::Object(obj) = value else {
        return Err(ValueError::UnsupportedJson(value.to_string()));
    };
    let mut out = ValueMap::with_capacity(obj.len());
    for (key, val) in obj {
        out.insert(key, parse_value(val)?);
    }
    Ok(out)
}

/// Plain JSON form of a [`Value`]; colours are written as their literal.
pub fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Flag(b) => json!(*b),
        Value::Number(n) => json!(*n),
        Value::Color(c) => JsonValue::String(c.to_string()),
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::List(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_prefer_colour() {
        assert_eq!(
            parse_value(json!("#000000")).unwrap(),
            Value::Color(Color::rgb(0.0, 0.0, 0.0))
        );
        assert_eq!(
            parse_value(json!("circle")).unwrap(),
            Value::Text("circle".into())
        );
        assert_eq!(
            parse_value(json!("hsl(10, 20%")),
            Err(ValueError::MalformedColor("hsl(10, 20%".into()))
        );
        assert!(parse_value(json!(["square", "#ff00"])).is_err());
    }

    #[test]
    fn shorthand_objects() {
        assert_eq!(
            parse_value(json!({ "text": "rgb(1,2,3)" })).unwrap(),
            Value::Text("rgb(1,2,3)".into())
        );
        assert!(matches!(
            parse_value(json!({ "color": "nope" })),
            Err(ValueError::MalformedColor(_))
        ));
        assert!(matches!(
            parse_value(json!({ "other": 1 })),
            Err(ValueError::UnsupportedJson(_))
        ));
        assert!(parse_value(JsonValue::Null).is_err());
    }

    #[test]
    fn nested_arrays() {
        let v = parse_value(json!([[1, 2], [true], []])).unwrap();
        assert_eq!(
            v,
            Value::list([
                Value::numbers([1.0, 2.0]),
                Value::flags([true]),
                Value::List(vec![]),
            ])
        );
        assert_eq!(value_to_json(&v), json!([[1.0, 2.0], [true], []]));
    }

    #[test]
    fn maps_keep_order() {
        let map = parse_value_map(json!({ "b": 1, "a": 2 })).unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a"]);
        assert!(parse_value_map(json!([1])).is_err());
    }
}
