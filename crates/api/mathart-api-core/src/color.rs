//! Colour literals.
//!
//! Colours are kept in the colour system they were written in (RGB or HSL
//! family) as four channels. Interpolation happens channel-wise in that system
//! and the result is re-encoded as `rgba(..)` or `hsla(..)`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::value::ValueError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSystem {
    Rgb,
    Hsl,
}

/// A parsed colour literal.
///
/// Channels are `[r, g, b, a]` (0..255, alpha 0..1) for RGB and
/// `[h, s, l, a]` (degrees, percent, percent, alpha 0..1) for HSL.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    system: ColorSystem,
    channels: [f64; 4],
}

impl Color {
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            system: ColorSystem::Rgb,
            channels: [r, g, b, a],
        }
    }

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Saturation and lightness are percentages (0..100).
    pub fn hsla(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self {
            system: ColorSystem::Hsl,
            channels: [h, s, l, a],
        }
    }

    pub const fn white() -> Self {
        Self {
            system: ColorSystem::Rgb,
            channels: [255.0, 255.0, 255.0, 1.0],
        }
    }

    pub const fn black() -> Self {
        Self {
            system: ColorSystem::Rgb,
            channels: [0.0, 0.0, 0.0, 1.0],
        }
    }

    #[inline]
    pub fn system(&self) -> ColorSystem {
        self.system
    }

    #[inline]
    pub fn channels(&self) -> [f64; 4] {
        self.channels
    }

    /// Channel-wise linear interpolation in the colour system of `self`.
    /// The other colour's channels are taken as written, whatever its system.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let mut channels = [0.0; 4];
        for (i, slot) in channels.iter_mut().enumerate() {
            let a = self.channels[i];
            *slot = (other.channels[i] - a) * t + a;
        }
        Color {
            system: self.system,
            channels,
        }
    }

    /// Red, green and blue on a 0..255 scale.
    pub fn to_rgb(&self) -> [f64; 3] {
        match self.system {
            ColorSystem::Rgb => [self.channels[0], self.channels[1], self.channels[2]],
            ColorSystem::Hsl => {
                let [h, s, l, _] = self.channels;
                hsl_to_rgb(h, s / 100.0, l / 100.0)
            }
        }
    }

    /// Relative luminance in 0..1.
    pub fn luma(&self) -> f64 {
        let [r, g, b] = self.to_rgb();
        (r * 0.2126 + g * 0.7152 + b * 0.0722) / 255.0
    }
}

/// HSL (hue in degrees, s/l in 0..1) to RGB (0..255).
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let hue = h.rem_euclid(360.0) / 360.0;
    if s == 0.0 {
        let v = l * 255.0;
        return [v, v, v];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |mut t: f64| {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        v * 255.0
    };
    [
        channel(hue + 1.0 / 3.0),
        channel(hue),
        channel(hue - 1.0 / 3.0),
    ]
}

/// Whether `text` is written as a colour literal (`#..`, `rgb..` or `hsl..`),
/// valid or not.
pub fn has_color_prefix(text: &str) -> bool {
    let text = text.trim_start();
    text.starts_with('#')
        || ["rgb", "hsl"]
            .iter()
            .any(|p| text.get(..3).is_some_and(|head| head.eq_ignore_ascii_case(p)))
}

fn parse_hex(digits: &str, source: &str) -> Result<Color, ValueError> {
    let malformed = || ValueError::MalformedColor(source.to_string());
    if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
        return Err(malformed());
    }
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| malformed());
    let r = byte(0)?;
    let g = byte(2)?;
    let b = byte(4)?;
    let a = if digits.len() == 8 {
        f64::from(byte(6)?) / 255.0
    } else {
        1.0
    };
    Ok(Color::rgba(f64::from(r), f64::from(g), f64::from(b), a))
}

fn parse_function(text: &str, source: &str) -> Result<Color, ValueError> {
    let malformed = || ValueError::MalformedColor(source.to_string());
    let open = text.find('(').ok_or_else(malformed)?;
    let system = match &text[..open] {
        "rgb" | "rgba" => ColorSystem::Rgb,
        "hsl" | "hsla" => ColorSystem::Hsl,
        _ => return Err(malformed()),
    };
    let inner = text[open + 1..].trim_end();
    let inner = inner.strip_suffix(')').unwrap_or(inner);
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if !(parts.len() == 3 || parts.len() == 4) {
        return Err(malformed());
    }
    let mut channels = [0.0, 0.0, 0.0, 1.0];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        let number = part.strip_suffix('%').unwrap_or(part);
        *slot = number.parse::<f64>().map_err(|_| malformed())?;
        if !slot.is_finite() {
            return Err(malformed());
        }
    }
    Ok(Color { system, channels })
}

impl FromStr for Color {
    type Err = ValueError;

    /// Accepts `rgb(..)`, `rgba(..)`, `hsl(..)`, `hsla(..)` (case-insensitive,
    /// optional `%` on channels) and `#rrggbb` / `#rrggbbaa`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        match text.strip_prefix('#') {
            Some(digits) => parse_hex(digits, s),
            None => parse_function(&text, s),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, alpha] = self.channels;
        match self.system {
            ColorSystem::Rgb => write!(f, "rgba({a}, {b}, {c}, {alpha})"),
            ColorSystem::Hsl => write!(f, "hsla({a}, {b}%, {c}%, {alpha})"),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}
