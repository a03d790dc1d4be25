//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Host-adjustable knobs for frame computation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extra full turns added to the layer rotation tween, in the direction of travel.
    pub full_rotations: u32,

    /// Background-image cross-fade window, in eased tween units.
    pub backdrop_fade_start: f64,
    pub backdrop_fade_end: f64,

    /// Blur values at or below this render without a blur filter.
    pub blur_floor: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            full_rotations: 0,
            backdrop_fade_start: 0.3,
            backdrop_fade_end: 0.7,
            blur_floor: 0.4,
        }
    }
}
