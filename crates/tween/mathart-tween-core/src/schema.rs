//! Property schema: which animatable properties a generator exposes and how
//! each one is interpolated.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TweenError};

/// Interpolation category of a property. Closed set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Continuous,
    Stepped,
    PairedContinuous,
    PairedStepped,
    Xy,
    NominalArray,
}

/// Per-generator-type schema. Immutable once the generator is loaded.
///
/// JSON form mirrors what generator authors write:
/// `{ "continuous": ["a"], "pairedStepped": [["p", "q"]], "xy": [["x", "y"]] }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertySchema {
    pub continuous: Vec<String>,
    pub stepped: Vec<String>,
    pub paired_continuous: Vec<(String, String)>,
    pub paired_stepped: Vec<(String, String)>,
    pub xy: Vec<(String, String)>,
    pub nominal_array: Vec<String>,
}

impl PropertySchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a schema from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let schema: PropertySchema = serde_json::from_str(text)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn with_continuous<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.continuous.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_stepped<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stepped.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_paired_continuous(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.paired_continuous.push((a.into(), b.into()));
        self
    }

    pub fn with_paired_stepped(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.paired_stepped.push((a.into(), b.into()));
        self
    }

    pub fn with_xy(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.xy.push((x.into(), y.into()));
        self
    }

    pub fn with_nominal_array<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nominal_array.extend(names.into_iter().map(Into::into));
        self
    }

    /// Every property name with its category, in category order
    /// (continuous, stepped, paired continuous, paired stepped, xy, nominal array).
    pub fn entries(&self) -> impl Iterator<Item = (&str, Category)> + '_ {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.continuous.iter().map(|n| (n.as_str(), Category::Continuous)));
        out.extend(self.stepped.iter().map(|n| (n.as_str(), Category::Stepped)));
        let pairs = [
            (Category::PairedContinuous, &self.paired_continuous),
            (Category::PairedStepped, &self.paired_stepped),
            (Category::Xy, &self.xy),
        ];
        for (cat, list) in pairs {
            for (a, b) in list {
                out.push((a.as_str(), cat));
                out.push((b.as_str(), cat));
            }
        }
        out.extend(self.nominal_array.iter().map(|n| (n.as_str(), Category::NominalArray)));
        out.into_iter()
    }

    /// All property names, in category order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries().map(|(name, _)| name)
    }

    pub fn category_of(&self, name: &str) -> Option<Category> {
        self.entries()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, cat)| cat)
    }

    pub fn len(&self) -> usize {
        self.continuous.len()
            + self.stepped.len()
            + 2 * (self.paired_continuous.len() + self.paired_stepped.len() + self.xy.len())
            + self.nominal_array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reject schemas that list a name more than once.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.len());
        for name in self.property_names() {
            if !seen.insert(name) {
                return Err(TweenError::DuplicateProperty {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }
}
