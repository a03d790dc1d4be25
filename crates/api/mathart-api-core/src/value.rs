//! Value: runtime instances of a generator's animatable properties.
//! All numeric leaves use f64 so boundary frames reproduce captured values exactly.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::color::{has_color_prefix, Color};

/// Property name → value, in schema/capture order.
pub type ValueMap = IndexMap<String, Value>;

/// Animatable value.
///
/// Serialized untagged so that the portable form is plain JSON: numbers,
/// booleans, colour literals (`"rgba(0, 0, 0, 1)"`), other strings and arrays.
/// Strings written as colour literals deserialize as [`Value::Color`]; a
/// malformed one is an error rather than text.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    /// Boolean flag (step-only)
    Flag(bool),

    /// Scalar number
    Number(f64),

    /// RGB- or HSL-family colour literal
    Color(Color),

    /// Non-colour text; step-only for interpolation
    Text(String),

    /// Nested, variable-length sequence
    List(Vec<Value>),
}

/// Errors produced while building values from textual or JSON input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("malformed colour literal: {0:?}")]
    MalformedColor(String),
    #[error("unsupported json value for an animatable property: {0}")]
    UnsupportedJson(String),
}

/// Raw JSON shapes before strings are split into colours and text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawValue::deserialize(deserializer)? {
            RawValue::Flag(b) => Value::Flag(b),
            RawValue::Number(n) => Value::Number(n),
            RawValue::Text(s) => Value::from_text(s).map_err(serde::de::Error::custom)?,
            RawValue::List(items) => Value::List(items),
        })
    }
}

impl Value {
    /// Classify a string: colour literals become [`Value::Color`], anything
    /// not written as one stays [`Value::Text`].
    pub fn from_text(text: String) -> Result<Self, ValueError> {
        if has_color_prefix(&text) {
            text.parse().map(Value::Color)
        } else {
            Ok(Value::Text(text))
        }
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Convenience: a list of numbers.
    pub fn numbers(items: impl IntoIterator<Item = f64>) -> Self {
        Value::List(items.into_iter().map(Value::Number).collect())
    }

    /// Convenience: a list of flags.
    pub fn flags(items: impl IntoIterator<Item = bool>) -> Self {
        Value::List(items.into_iter().map(Value::Flag).collect())
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_color(&self) -> Option<&Color> {
        match self {
            Value::Color(c) => Some(c),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Flag(v)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}
