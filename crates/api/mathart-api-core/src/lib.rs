//! mathart-api-core: animatable values shared by the tweening engine and its hosts.
//!
//! A generator's animatable state is a flat map of property names to [`Value`]s.
//! Values are a small recursive sum type (numbers, colour literals, flags, text
//! and nested lists) so that deep copies and structural comparisons are plain
//! `Clone`/`PartialEq`.

pub mod coercion;
pub mod color;
pub mod json;
pub mod value;

pub use color::{Color, ColorSystem};
pub use json::{parse_value, parse_value_map, value_to_json};
pub use value::{Value, ValueError, ValueMap};
