//! Frame computation.
//!
//! Per frame the host supplies the generator, the two snapshots, the cached
//! tween context, the playback position and the loop flag. Every schema
//! property is interpolated with its category's primitive and written onto
//! the generator; layer parameters come back as a [`LayerFrame`].

use mathart_api_core::{Color, Value};

use crate::config::Config;
use crate::context::TweenContext;
use crate::generator::Generator;
use crate::interp::{
    interpolate_continuous, interpolate_paired, interpolate_stepped, lerp, loop_phase, InterpFn,
};
use crate::layer::{blur_radius, tween_rotation, Backdrop, LayerFrame, LayerState};
use crate::random::blend;
use crate::schema::PropertySchema;
use crate::snapshot::Snapshot;

/// Capture the live generator and layer state as a keyframe.
pub fn build_snapshot<G: Generator + ?Sized>(generator: &G, state: &LayerState) -> Snapshot {
    Snapshot::capture(generator, state)
}

/// Derive the tween context for a snapshot pair at the given render size.
pub fn rebuild_tween_context(
    schema: &PropertySchema,
    start: &Snapshot,
    end: &Snapshot,
    width: f64,
    height: f64,
) -> TweenContext {
    TweenContext::build(schema, start, end, width, height)
}

#[inline]
fn endpoints<'a>(start: &'a Snapshot, end: &'a Snapshot, name: &str) -> Option<(&'a Value, &'a Value)> {
    match (start.value(name), end.value(name)) {
        (Some(s), Some(e)) => Some((s, e)),
        _ => {
            log::warn!("frame: property '{name}' missing from a snapshot, skipped");
            None
        }
    }
}

#[inline]
fn color_at(start: Color, end: Color, phase: f64) -> Color {
    if phase == 1.0 {
        end
    } else {
        start.lerp(&end, phase)
    }
}

fn write_pairs<G: Generator + ?Sized>(
    generator: &mut G,
    pairs: &[(String, String)],
    start: &Snapshot,
    end: &Snapshot,
    t: f64,
    looping: bool,
    interp: InterpFn,
) {
    for (p1, p2) in pairs {
        let (Some((s1, e1)), Some((s2, e2))) = (endpoints(start, end, p1), endpoints(start, end, p2))
        else {
            continue;
        };
        let (v1, v2) = interpolate_paired(s1, e1, s2, e2, t, looping, interp);
        generator.set_property(p1, v1);
        generator.set_property(p2, v2);
    }
}

fn write_xy<G: Generator + ?Sized>(
    generator: &mut G,
    schema: &PropertySchema,
    start: &Snapshot,
    end: &Snapshot,
    ctx: &TweenContext,
    t: f64,
    looping: bool,
) {
    for (x, y) in &schema.xy {
        let (Some((sx, ex)), Some((sy, ey))) = (endpoints(start, end, x), endpoints(start, end, y))
        else {
            continue;
        };
        if looping && t > 0.5 {
            if t >= 1.0 {
                generator.set_property(x, sx.clone());
                generator.set_property(y, sy.clone());
                continue;
            }
            if let Some(arc) = ctx.arc(x) {
                let [px, py] = arc.point(t);
                generator.set_property(x, Value::Number(px));
                generator.set_property(y, Value::Number(py));
                continue;
            }
            log::debug!("frame: no arc for xy pair ({x}, {y}), interpolating components");
        }
        generator.set_property(x, interpolate_continuous(sx, ex, t, looping));
        generator.set_property(y, interpolate_continuous(sy, ey, t, looping));
    }
}

fn write_nominal<G: Generator + ?Sized>(
    generator: &mut G,
    schema: &PropertySchema,
    start: &Snapshot,
    end: &Snapshot,
    ctx: &TweenContext,
    t: f64,
    looping: bool,
) {
    for name in &schema.nominal_array {
        let Some((s, e)) = endpoints(start, end, name) else {
            continue;
        };
        let value = match (s, e, ctx.nominal_plan(name)) {
            (Value::List(a), Value::List(b), Some(plan)) => Value::List(plan.apply(a, b, t, looping)),
            _ => interpolate_stepped(s, e, t, looping),
        };
        generator.set_property(name, value);
    }
}

/// Interpolate every schema property onto `generator` for position `t` and
/// return the interpolated layer parameters.
///
/// Pairs, xy points and nominal arrays are only written when `start` and
/// `end` are distinct snapshots. Properties missing from either snapshot are
/// skipped and logged.
#[allow(clippy::too_many_arguments)]
pub fn compute_frame<G: Generator + ?Sized>(
    generator: &mut G,
    schema: &PropertySchema,
    start: &Snapshot,
    end: &Snapshot,
    ctx: &TweenContext,
    t: f64,
    looping: bool,
    config: &Config,
) -> LayerFrame {
    let phase = loop_phase(t, looping);

    for name in &schema.continuous {
        if let Some((s, e)) = endpoints(start, end, name) {
            generator.set_property(name, interpolate_continuous(s, e, phase, false));
        }
    }
    for name in &schema.stepped {
        if let Some((s, e)) = endpoints(start, end, name) {
            generator.set_property(name, interpolate_stepped(s, e, t, looping));
        }
    }

    if !std::ptr::eq(start, end) {
        write_pairs(
            generator,
            &schema.paired_continuous,
            start,
            end,
            t,
            looping,
            interpolate_continuous,
        );
        write_pairs(
            generator,
            &schema.paired_stepped,
            start,
            end,
            t,
            looping,
            interpolate_stepped,
        );
        write_xy(generator, schema, start, end, ctx, t, looping);
        write_nominal(generator, schema, start, end, ctx, t, looping);
    }
    generator.set_global_phase(phase);

    let (sl, el) = (start.layer(), end.layer());
    let blur = lerp(sl.blur, el.blur, phase);
    let background_color = if ctx.background_color_varies {
        color_at(ctx.start_background, ctx.end_background, phase)
    } else {
        ctx.start_background
    };
    LayerFrame {
        rotation: tween_rotation(sl.rotation, el.rotation, t, looping, config.full_rotations),
        opacity: lerp(sl.opacity, el.opacity, phase),
        blur,
        blur_radius: blur_radius(blur, config.blur_floor),
        render_width: lerp(ctx.start_size.0, ctx.end_size.0, phase),
        render_height: lerp(ctx.start_size.1, ctx.end_size.1, phase),
        background_color,
        backdrop: Backdrop::at(
            sl.background_image.is_some(),
            el.background_image.is_some(),
            phase,
            config,
        ),
        random: blend(&start.random(), &end.random(), phase),
    }
}
