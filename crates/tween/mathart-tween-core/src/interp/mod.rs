//! Interpolation primitives.
//!
//! Every primitive takes `(start, end, t, loop)` and returns a value of the
//! same shape. With `loop` off and `t == 1`, or with `start == end`, the end
//! value comes back exactly.

pub mod functions;
pub mod nominal;
pub mod paired;

pub use functions::{
    interpolate_continuous, interpolate_stepped, lerp, loop_phase, step_count, step_number,
    InterpFn,
};
pub use nominal::NominalPlan;
pub use paired::interpolate_paired;
