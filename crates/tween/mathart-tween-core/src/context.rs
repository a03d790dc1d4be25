//! Tween context: geometry and plans derived from a start/end snapshot pair.
//!
//! Built eagerly whenever either snapshot or the render size changes, and
//! never mutated in place. The loop flag is a per-frame input and does not
//! invalidate it.

use std::f64::consts::PI;

use hashbrown::HashMap;
use mathart_api_core::{Color, Value};

use crate::interp::NominalPlan;
use crate::layer::calc_size;
use crate::schema::PropertySchema;
use crate::snapshot::Snapshot;

/// Return-path geometry for an xy pair: two half-size circles that carry the
/// point from the end back to the start, crossing at the midpoint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArcGeometry {
    /// Centre used for `t` in `(0.5, 0.75]`, a quarter of the way back from the end
    pub c1: [f64; 2],
    /// Centre used for `t` in `(0.75, 1]`, a quarter of the way from the start
    pub c2: [f64; 2],
    pub radius: f64,
    pub theta0: f64,
}

impl ArcGeometry {
    pub fn new(p0: [f64; 2], p1: [f64; 2]) -> Self {
        let (dx, dy) = (p1[0] - p0[0], p1[1] - p0[1]);
        Self {
            c1: [(p0[0] + 3.0 * p1[0]) / 4.0, (p0[1] + 3.0 * p1[1]) / 4.0],
            c2: [(3.0 * p0[0] + p1[0]) / 4.0, (3.0 * p0[1] + p1[1]) / 4.0],
            radius: dx.hypot(dy) / 4.0,
            theta0: dy.atan2(dx),
        }
    }

    /// Point on the return path at playback position `t` (`0.5 < t <= 1`).
    /// A zero radius yields the fixed centre.
    pub fn point(&self, t: f64) -> [f64; 2] {
        let (centre, theta) = if t <= 0.75 {
            (self.c1, 4.0 * (t - 0.5) * PI + self.theta0)
        } else {
            (self.c2, -4.0 * (t - 0.75) * PI + self.theta0)
        };
        [
            self.radius * theta.cos() + centre[0],
            self.radius * theta.sin() + centre[1],
        ]
    }
}

/// Everything about a start/end pair that does not depend on `t`.
#[derive(Clone, Debug)]
pub struct TweenContext {
    /// Background colours after image substitution
    pub start_background: Color,
    pub end_background: Color,
    pub background_color_varies: bool,
    pub blur_varies: bool,
    pub start_size: (f64, f64),
    pub end_size: (f64, f64),
    /// Keyed by the x property name
    pub arcs: HashMap<String, ArcGeometry>,
    pub nominal: HashMap<String, NominalPlan>,
}

/// When only one side has a background image, that side's colour becomes
/// black or white, whichever suits the other side's colour.
fn effective_backgrounds(start: &Snapshot, end: &Snapshot) -> (Color, Color) {
    let (sl, el) = (start.layer(), end.layer());
    let contrast = |other: &Color| {
        if other.luma() >= 0.5 {
            Color::white()
        } else {
            Color::black()
        }
    };
    match (sl.background_image.is_some(), el.background_image.is_some()) {
        (true, false) => (contrast(&el.background_color), el.background_color),
        (false, true) => (sl.background_color, contrast(&sl.background_color)),
        _ => (sl.background_color, el.background_color),
    }
}

fn point_of(snapshot: &Snapshot, x: &str, y: &str) -> Option<[f64; 2]> {
    Some([
        snapshot.value(x)?.as_number()?,
        snapshot.value(y)?.as_number()?,
    ])
}

impl TweenContext {
    pub fn build(
        schema: &PropertySchema,
        start: &Snapshot,
        end: &Snapshot,
        width: f64,
        height: f64,
    ) -> Self {
        let (start_background, end_background) = effective_backgrounds(start, end);
        let (sl, el) = (start.layer(), end.layer());

        let mut arcs = HashMap::with_capacity(schema.xy.len());
        for (x, y) in &schema.xy {
            match (point_of(start, x, y), point_of(end, x, y)) {
                (Some(p0), Some(p1)) => {
                    arcs.insert(x.clone(), ArcGeometry::new(p0, p1));
                }
                _ => log::warn!("tween context: xy pair ({x}, {y}) lacks numeric values, no arc"),
            }
        }

        let mut nominal = HashMap::with_capacity(schema.nominal_array.len());
        for name in &schema.nominal_array {
            match (start.value(name), end.value(name)) {
                (Some(Value::List(a)), Some(Value::List(b))) => {
                    nominal.insert(name.clone(), NominalPlan::new(a, b));
                }
                _ => log::warn!("tween context: nominal array '{name}' is not a list on both sides"),
            }
        }

        let ctx = Self {
            start_background,
            end_background,
            background_color_varies: start_background != end_background,
            blur_varies: sl.blur != el.blur,
            start_size: calc_size(width, height, sl.scale, sl.scale_mode),
            end_size: calc_size(width, height, el.scale, el.scale_mode),
            arcs,
            nominal,
        };
        log::debug!(
            "tween context rebuilt: {} arcs, {} nominal plans, {}x{}",
            ctx.arcs.len(),
            ctx.nominal.len(),
            width,
            height
        );
        ctx
    }

    pub fn arc(&self, x: &str) -> Option<&ArcGeometry> {
        self.arcs.get(x)
    }

    pub fn nominal_plan(&self, name: &str) -> Option<&NominalPlan> {
        self.nominal.get(name)
    }
}
