//! The generator seam: anything that exposes named animatable properties.

use mathart_api_core::{parse_value_map, Value, ValueMap};
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::schema::PropertySchema;

/// A generator's animatable surface as seen by the tweening engine.
///
/// Reads borrow the current value; writes replace it. The engine is the only
/// writer while a frame is computed.
pub trait Generator {
    fn schema(&self) -> &PropertySchema;

    fn property(&self, name: &str) -> Option<&Value>;

    fn set_property(&mut self, name: &str, value: Value);

    /// Receives the eased tween position for generators that animate on
    /// their own (shader time and the like). Ignored by default.
    fn set_global_phase(&mut self, _phase: f64) {}
}

/// Dynamic generator state: a schema plus an ordered map of values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyBag {
    schema: PropertySchema,
    values: ValueMap,
    global_phase: Option<f64>,
}

impl PropertyBag {
    pub fn new(schema: PropertySchema) -> Self {
        Self {
            schema,
            values: ValueMap::new(),
            global_phase: None,
        }
    }

    /// Build from a schema and a JSON object of property values.
    pub fn from_json(schema: PropertySchema, values: JsonValue) -> Result<Self> {
        schema.validate()?;
        Ok(Self {
            schema,
            values: parse_value_map(values)?,
            global_phase: None,
        })
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    /// Last phase written by the engine, if any.
    pub fn global_phase(&self) -> Option<f64> {
        self.global_phase
    }
}

impl Generator for PropertyBag {
    fn schema(&self) -> &PropertySchema {
        &self.schema
    }

    fn property(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    fn set_property(&mut self, name: &str, value: Value) {
        match self.values.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(name.to_string(), value);
            }
        }
    }

    fn set_global_phase(&mut self, phase: f64) {
        self.global_phase = Some(phase);
    }
}
