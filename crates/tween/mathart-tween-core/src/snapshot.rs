//! Snapshots: frozen copies of a generator's animatable state plus layer
//! parameters, used as tween keyframes.

use std::cell::RefCell;

use hashbrown::HashSet;
use mathart_api_core::{Color, Value, ValueMap};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::generator::Generator;
use crate::layer::{LayerParams, LayerState, ScaleMode};
use crate::random::{blend, RandomStream, SeedText};
use crate::schema::PropertySchema;

/// Immutable keyframe. The only permitted mutation is swapping the random
/// stream, which does not affect any captured value.
#[derive(Clone, Debug)]
pub struct Snapshot {
    values: ValueMap,
    layer: LayerParams,
    random: RefCell<RandomStream>,
}

impl Snapshot {
    pub fn new(values: ValueMap, layer: LayerParams, random: RandomStream) -> Self {
        Self {
            values,
            layer,
            random: RefCell::new(random),
        }
    }

    /// Deep-copy every schema property of `generator` plus the live layer state.
    /// Properties the generator does not expose are skipped (and logged).
    pub fn capture<G: Generator + ?Sized>(generator: &G, state: &LayerState) -> Self {
        let schema = generator.schema();
        let mut values = ValueMap::with_capacity(schema.len());
        for name in schema.property_names() {
            match generator.property(name) {
                Some(v) => {
                    values.insert(name.to_string(), v.clone());
                }
                None => log::warn!("capture: generator has no value for property '{name}'"),
            }
        }
        Self::new(values, state.params.clone(), state.random.clone())
    }

    #[inline]
    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    #[inline]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    #[inline]
    pub fn layer(&self) -> &LayerParams {
        &self.layer
    }

    pub fn random(&self) -> RandomStream {
        self.random.borrow().clone()
    }

    pub fn set_random(&self, stream: RandomStream) {
        *self.random.borrow_mut() = stream;
    }

    /// True when the live generator and layer state still match this snapshot:
    /// same layer parameters, structurally equal values for every schema
    /// property, and the same random stream (directly or as a blend endpoint).
    pub fn equals_live<G: Generator + ?Sized>(
        &self,
        generator: &G,
        state: &LayerState,
        schema: &PropertySchema,
    ) -> bool {
        if self.layer != state.params {
            return false;
        }
        let mine = self.random();
        if !mine.is_or_blends(&state.random) && !state.random.is_or_blends(&mine) {
            return false;
        }
        let mut compared = 0;
        for name in schema.property_names() {
            match (self.values.get(name), generator.property(name)) {
                (Some(a), Some(b)) if a == b => compared += 1,
                (None, None) => {}
                _ => return false,
            }
        }
        compared == self.values.len()
    }

    /// Flat, serializable form.
    pub fn to_portable(&self) -> PortableSnapshot {
        let random = self.random();
        PortableSnapshot {
            properties: self.values.clone(),
            background_color: self.layer.background_color,
            background_image_url: self.layer.background_image.clone(),
            opacity: self.layer.opacity,
            rotation: self.layer.rotation,
            scale: self.layer.scale,
            scale_mode: self.layer.scale_mode,
            blur: self.layer.blur,
            seed: Some(random.seed_text().to_string()),
            seed_weight: random.weight(),
        }
    }

    /// Rebuild from portable data. Properties missing from `data` are left
    /// absent; properties not in `schema` are dropped. Both are reported.
    /// Without a seed a fresh stream is created.
    pub fn from_portable(
        data: &PortableSnapshot,
        schema: &PropertySchema,
    ) -> Result<(Snapshot, LoadReport)> {
        let random = match &data.seed {
            Some(text) => match SeedText::parse(text)? {
                SeedText::Single(seed) => RandomStream::from_seed(seed),
                SeedText::Pair(a, b) if a == b => RandomStream::from_seed(a),
                SeedText::Pair(a, b) => blend(
                    &RandomStream::from_seed(a),
                    &RandomStream::from_seed(b),
                    data.seed_weight.unwrap_or(0.5),
                ),
            },
            None => RandomStream::fresh(),
        };

        let mut report = LoadReport::default();
        let mut values = ValueMap::with_capacity(schema.len());
        let mut known = HashSet::with_capacity(schema.len());
        for name in schema.property_names() {
            known.insert(name);
            match data.properties.get(name) {
                Some(v) => {
                    values.insert(name.to_string(), v.clone());
                }
                None => {
                    log::warn!("snapshot load: property '{name}' missing, left absent");
                    report.missing.push(name.to_string());
                }
            }
        }
        for name in data.properties.keys() {
            if !known.contains(name.as_str()) {
                log::warn!("snapshot load: property '{name}' not in schema, skipped");
                report.unknown.push(name.clone());
            }
        }

        let layer = LayerParams {
            rotation: data.rotation,
            opacity: data.opacity,
            scale: data.scale,
            scale_mode: data.scale_mode,
            blur: data.blur,
            background_color: data.background_color,
            background_image: data.background_image_url.clone(),
        };
        Ok((Snapshot::new(values, layer, random), report))
    }
}

/// Schema mismatches found while loading portable data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Present in the data but not in the schema
    pub unknown: Vec<String>,
    /// In the schema but absent from the data
    pub missing: Vec<String>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.unknown.is_empty() && self.missing.is_empty()
    }
}

/// Portable snapshot record. Missing layer fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortableSnapshot {
    pub properties: ValueMap,
    pub background_color: Color,
    #[serde(rename = "backgroundImageURL", skip_serializing_if = "Option::is_none")]
    pub background_image_url: Option<String>,
    pub opacity: f64,
    pub rotation: f64,
    pub scale: f64,
    pub scale_mode: ScaleMode,
    pub blur: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_weight: Option<f64>,
}

impl Default for PortableSnapshot {
    fn default() -> Self {
        let layer = LayerParams::default();
        Self {
            properties: ValueMap::new(),
            background_color: layer.background_color,
            background_image_url: None,
            opacity: layer.opacity,
            rotation: layer.rotation,
            scale: layer.scale,
            scale_mode: layer.scale_mode,
            blur: layer.blur,
            seed: None,
            seed_weight: None,
        }
    }
}

impl PortableSnapshot {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
