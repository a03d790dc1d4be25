//! Coupled property pairs.
//!
//! Out to the midpoint both properties move independently. On the return half
//! of a loop the pair takes a different path back: when both properties start
//! at the same value the first one is held at its end value while the second
//! travels to it (the fixed-anchor case); otherwise each property retraces
//! its own ramp. Lists are handled element-wise with per-property tweened
//! lengths.

use mathart_api_core::Value;

use super::functions::{step_count, InterpFn};

/// Interpolate a pair of properties `(p1, p2)` with `interp` (continuous or stepped).
pub fn interpolate_paired(
    start1: &Value,
    end1: &Value,
    start2: &Value,
    end2: &Value,
    t: f64,
    looping: bool,
    interp: InterpFn,
) -> (Value, Value) {
    if !looping || t <= 0.5 {
        return (
            interp(start1, end1, t, looping),
            interp(start2, end2, t, looping),
        );
    }
    return_path(start1, end1, start2, end2, t, interp)
}

fn return_path(
    start1: &Value,
    end1: &Value,
    start2: &Value,
    end2: &Value,
    t: f64,
    interp: InterpFn,
) -> (Value, Value) {
    if let (Value::List(s1), Value::List(e1), Value::List(s2), Value::List(e2)) =
        (start1, end1, start2, end2)
    {
        return return_path_lists(s1, e1, s2, e2, t, interp);
    }
    if start1 == start2 {
        (end1.clone(), interp(end2, end1, (t - 0.5) * 2.0, false))
    } else {
        (interp(start1, end1, t, true), interp(start2, end2, t, true))
    }
}

fn single(start: &[Value], end: &[Value], i: usize, t: f64, interp: InterpFn) -> Option<Value> {
    match (start.get(i), end.get(i)) {
        (Some(a), Some(b)) => Some(interp(a, b, t, true)),
        (Some(a), None) => Some(a.clone()),
        (None, Some(b)) => Some(b.clone()),
        (None, None) => None,
    }
}

fn return_path_lists(
    s1: &[Value],
    e1: &[Value],
    s2: &[Value],
    e2: &[Value],
    t: f64,
    interp: InterpFn,
) -> (Value, Value) {
    let len1 = step_count(s1.len(), e1.len(), t, true);
    let len2 = step_count(s2.len(), e2.len(), t, true);
    let shared = s1.len().min(e1.len()).min(s2.len()).min(e2.len());
    let mut out1 = Vec::with_capacity(len1);
    let mut out2 = Vec::with_capacity(len2);
    for i in 0..len1.max(len2) {
        if i < shared {
            let (a, b) = return_path(&s1[i], &e1[i], &s2[i], &e2[i], t, interp);
            if i < len1 {
                out1.push(a);
            }
            if i < len2 {
                out2.push(b);
            }
            continue;
        }
        if i < len1 {
            out1.extend(single(s1, e1, i, t, interp));
        }
        if i < len2 {
            out2.extend(single(s2, e2, i, t, interp));
        }
    }
    (Value::List(out1), Value::List(out2))
}
