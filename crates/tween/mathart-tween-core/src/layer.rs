//! Layer parameters: the per-snapshot presentation state that wraps a
//! generator's own properties (rotation, opacity, scale, blur, background).

use std::f64::consts::{SQRT_2, TAU};

use mathart_api_core::Color;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::interp::{lerp, loop_phase};
use crate::random::RandomStream;

/// How the generator's drawing area relates to the canvas.
/// Stored as `0 = Contain, 1 = Viewport, 2 = Cover` in portable data.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ScaleMode {
    /// Square inscribed so that any rotation stays inside the canvas
    Contain,
    /// Exactly the canvas
    #[default]
    Viewport,
    /// Square whose side is the canvas diagonal, so any rotation covers it
    Cover,
}

impl TryFrom<u8> for ScaleMode {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(ScaleMode::Contain),
            1 => Ok(ScaleMode::Viewport),
            2 => Ok(ScaleMode::Cover),
            other => Err(format!("unknown scale mode {other}")),
        }
    }
}

impl From<ScaleMode> for u8 {
    fn from(mode: ScaleMode) -> Self {
        match mode {
            ScaleMode::Contain => 0,
            ScaleMode::Viewport => 1,
            ScaleMode::Cover => 2,
        }
    }
}

/// Render size for a canvas of `width` x `height`.
pub fn calc_size(width: f64, height: f64, scale: f64, mode: ScaleMode) -> (f64, f64) {
    if scale == 0.0 {
        return (1.0, 1.0);
    }
    let (w, h) = match mode {
        ScaleMode::Viewport => (width, height),
        ScaleMode::Contain => {
            let side = width.min(height) / SQRT_2;
            (side, side)
        }
        ScaleMode::Cover => {
            let side = width.hypot(height);
            (side, side)
        }
    };
    ((w * scale).ceil(), (h * scale).ceil())
}

/// Presentation parameters captured with every snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerParams {
    /// Radians
    pub rotation: f64,
    pub opacity: f64,
    pub scale: f64,
    pub scale_mode: ScaleMode,
    pub blur: f64,
    pub background_color: Color,
    /// Reference (URL) of a background image drawn behind the generator.
    pub background_image: Option<String>,
}

impl Default for LayerParams {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            opacity: 1.0,
            scale: 1.0,
            scale_mode: ScaleMode::Viewport,
            blur: 0.4,
            background_color: Color::white(),
            background_image: None,
        }
    }
}

/// Live layer state owned by the host: the editable parameters plus the
/// random stream the generator currently draws from.
#[derive(Clone, Debug)]
pub struct LayerState {
    pub params: LayerParams,
    pub random: RandomStream,
}

impl LayerState {
    pub fn new(params: LayerParams, random: RandomStream) -> Self {
        Self { params, random }
    }
}

impl Default for LayerState {
    fn default() -> Self {
        Self::new(LayerParams::default(), RandomStream::fresh())
    }
}

/// Background-image cross-fade weights. An alpha of 0 means "do not draw".
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Backdrop {
    pub start_alpha: f64,
    pub end_alpha: f64,
}

impl Backdrop {
    /// Weights at eased position `tp` for the given image presence.
    pub fn at(has_start: bool, has_end: bool, tp: f64, cfg: &Config) -> Self {
        let on = |present: bool| if present { 1.0 } else { 0.0 };
        let (fade_start, fade_end) = (cfg.backdrop_fade_start, cfg.backdrop_fade_end);
        if tp <= fade_start {
            Backdrop {
                start_alpha: on(has_start),
                end_alpha: 0.0,
            }
        } else if tp < fade_end {
            let fade = (fade_end - tp) / (fade_end - fade_start);
            let end_alpha = match (has_start, has_end) {
                (_, false) => 0.0,
                (true, true) => 1.0,
                (false, true) => 1.0 - fade,
            };
            Backdrop {
                start_alpha: if has_start { fade } else { 0.0 },
                end_alpha,
            }
        } else {
            Backdrop {
                start_alpha: 0.0,
                end_alpha: on(has_end),
            }
        }
    }
}

/// CSS-style blur radius in pixels, or `None` when no filter should be applied.
/// Values between the floor and 0.5 are compressed towards zero.
pub fn blur_radius(value: f64, floor: f64) -> Option<f64> {
    if value <= floor {
        return None;
    }
    let radius = if value < 0.5 { (value - 0.4) * 5.0 } else { value };
    (radius > 0.0).then_some(radius)
}

/// Layer rotation at `t`. Extra full turns are added in the direction of
/// travel; the loop triangle is only used when the two angles are not already
/// a whole number of turns apart (otherwise the plain ramp closes the loop).
pub fn tween_rotation(start: f64, end: f64, t: f64, looping: bool, full_rotations: u32) -> f64 {
    let looped = looping && (end - start) % TAU != 0.0;
    let direction = if end < start { -1.0 } else { 1.0 };
    let end = end + direction * TAU * f64::from(full_rotations);
    if start == end {
        return start;
    }
    lerp(start, end, loop_phase(t, looped))
}

/// Interpolated layer state for one frame.
#[derive(Clone, Debug)]
pub struct LayerFrame {
    pub rotation: f64,
    pub opacity: f64,
    pub blur: f64,
    /// Pixel radius for a blur filter, if any
    pub blur_radius: Option<f64>,
    pub render_width: f64,
    pub render_height: f64,
    pub background_color: Color,
    pub backdrop: Backdrop,
    /// Stream the generator should draw from (reset before replaying)
    pub random: RandomStream,
}
