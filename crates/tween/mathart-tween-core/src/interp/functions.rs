//! Interpolation helpers:
//! - loop_phase (triangle wave used for loop playback)
//! - interpolate_continuous (linear for numbers and colours, element-wise for lists)
//! - interpolate_stepped (discretized linear with distinct forward/return paths)
//!
//! Kind mismatches and non-numeric leaves (text, flags) snap at the phase
//! midpoint rather than failing.

use mathart_api_core::Value;

/// Signature shared by the continuous and stepped primitives.
pub type InterpFn = fn(&Value, &Value, f64, bool) -> Value;

/// Map playback position to interpolation phase. Looping runs out and back:
/// `2t` up to the midpoint, then `2(1 - t)`.
#[inline]
pub fn loop_phase(t: f64, looping: bool) -> f64 {
    if !looping {
        t
    } else if t > 0.5 {
        1.0 - (t - 0.5) * 2.0
    } else {
        t * 2.0
    }
}

/// Linear interpolation of scalars; exact at both ends.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t == 1.0 {
        b
    } else {
        (b - a) * t + a
    }
}

#[inline]
fn snap(start: &Value, end: &Value, phase: f64) -> Value {
    if phase < 0.5 {
        start.clone()
    } else {
        end.clone()
    }
}

/// Discretized number. Non-looping ramps reach every integer between the two
/// values including the end; looping ramps floor on the way out and ceil on
/// the way back so both directions visit the same values.
pub fn step_number(start: f64, end: f64, t: f64, looping: bool) -> f64 {
    if (!looping && t == 1.0) || start == end {
        return end;
    }
    let d = end - start;
    if looping {
        if t <= 0.5 {
            (d * t * 2.0 + start).floor()
        } else {
            (d * (1.0 - (t - 0.5) * 2.0) + start).ceil()
        }
    } else if d > 0.0 {
        ((d + 1.0) * t + start).floor()
    } else {
        ((d - 1.0) * t + start).ceil()
    }
}

/// Tweened length of a list going from `start` to `end` elements.
pub fn step_count(start: usize, end: usize, t: f64, looping: bool) -> usize {
    let n = step_number(start as f64, end as f64, t, looping);
    let (lo, hi) = (start.min(end), start.max(end));
    (n.max(0.0) as usize).clamp(lo, hi)
}

/// Element-wise over the shared prefix, then tail elements from whichever
/// side is longer up to `len`.
fn merge_lists(
    start: &[Value],
    end: &[Value],
    len: usize,
    mut each: impl FnMut(&Value, &Value) -> Value,
) -> Value {
    let shared = start.len().min(end.len());
    let longer = if start.len() > end.len() { start } else { end };
    let mut out = Vec::with_capacity(len);
    out.extend(start.iter().zip(end).map(|(a, b)| each(a, b)));
    out.extend(longer[shared..len.max(shared)].iter().cloned());
    Value::List(out)
}

fn continuous_at(start: &Value, end: &Value, phase: f64) -> Value {
    if phase == 0.0 {
        return start.clone();
    }
    if phase == 1.0 || start == end {
        return end.clone();
    }
    match (start, end) {
        (Value::Number(a), Value::Number(b)) => Value::Number(lerp(*a, *b, phase)),
        (Value::Color(a), Value::Color(b)) => Value::Color(a.lerp(b, phase)),
        (Value::List(a), Value::List(b)) => {
            let len = step_count(a.len(), b.len(), phase, false);
            merge_lists(a, b, len, |x, y| continuous_at(x, y, phase))
        }
        _ => snap(start, end, phase),
    }
}

/// Linear interpolation at the loop phase of `t`. Colours are interpolated
/// channel-wise in the start colour's system. List lengths are stepped so
/// growth and shrinkage happen one element at a time.
pub fn interpolate_continuous(start: &Value, end: &Value, t: f64, looping: bool) -> Value {
    continuous_at(start, end, loop_phase(t, looping))
}

/// Stepped interpolation; see [`step_number`] for the integer rule.
pub fn interpolate_stepped(start: &Value, end: &Value, t: f64, looping: bool) -> Value {
    if (!looping && t == 1.0) || start == end {
        return end.clone();
    }
    match (start, end) {
        (Value::Number(a), Value::Number(b)) => Value::Number(step_number(*a, *b, t, looping)),
        (Value::List(a), Value::List(b)) => {
            let len = step_count(a.len(), b.len(), t, looping);
            merge_lists(a, b, len, |x, y| interpolate_stepped(x, y, t, looping))
        }
        _ => snap(start, end, loop_phase(t, looping)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_is_a_triangle() {
        assert_eq!(loop_phase(0.25, false), 0.25);
        assert_eq!(loop_phase(0.25, true), 0.5);
        assert_eq!(loop_phase(0.5, true), 1.0);
        assert_eq!(loop_phase(0.75, true), 0.5);
        assert_eq!(loop_phase(1.0, true), 0.0);
    }

    #[test]
    fn step_numbers() {
        // d = 3: 0,1,2,3 each get a quarter of the ramp
        let got: Vec<f64> = [0.0, 0.24, 0.25, 0.5, 0.75, 0.99, 1.0]
            .iter()
            .map(|&t| step_number(0.0, 3.0, t, false))
            .collect();
        assert_eq!(got, [0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0]);
        assert_eq!(step_number(3.0, 0.0, 0.5, false), 1.0);
        assert_eq!(step_number(2.0, 6.0, 0.25, true), 4.0);
        assert_eq!(step_number(2.0, 6.0, 0.75, true), 4.0);
        assert_eq!(step_number(2.0, 6.0, 1.0, true), 2.0);
    }

    #[test]
    fn text_and_flags_snap_at_midpoint() {
        let a = Value::Text("square".into());
        let b = Value::Text("circle".into());
        assert_eq!(interpolate_continuous(&a, &b, 0.49, false), a);
        assert_eq!(interpolate_continuous(&a, &b, 0.5, false), b);
        assert_eq!(interpolate_stepped(&Value::Flag(false), &Value::Flag(true), 0.3, true), Value::Flag(true));
        assert_eq!(interpolate_stepped(&Value::Flag(false), &Value::Flag(true), 0.9, true), Value::Flag(false));
    }

    #[test]
    fn mismatched_kinds_snap() {
        let a = Value::Number(1.0);
        let b = Value::Text("x".into());
        assert_eq!(interpolate_continuous(&a, &b, 0.2, false), a);
        assert_eq!(interpolate_continuous(&a, &b, 0.8, false), b);
    }

    #[test]
    fn list_length_steps() {
        let a = Value::numbers([0.0]);
        let b = Value::numbers([10.0, 20.0, 30.0]);
        let mid = interpolate_continuous(&a, &b, 0.5, false);
        // length: floor(3 * 0.5) + 1 = 2
        assert_eq!(mid, Value::numbers([5.0, 20.0]));
    }
}
