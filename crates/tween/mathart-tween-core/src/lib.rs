//! Math-art tween core (renderer-agnostic)
//!
//! Given two snapshots of a generator's animatable state and a normalized
//! position `t` in `[0, 1]`, this crate computes the intermediate state and
//! writes it back onto the generator. The host owns rendering and scheduling;
//! everything here is synchronous and runs to completion.

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod generator;
pub mod interp;
pub mod layer;
pub mod playback;
pub mod random;
pub mod schema;
pub mod session;
pub mod snapshot;

// Re-exports for hosts
pub use config::Config;
pub use context::{ArcGeometry, TweenContext};
pub use engine::{build_snapshot, compute_frame, rebuild_tween_context};
pub use error::{Result, TweenError};
pub use generator::{Generator, PropertyBag};
pub use interp::{
    interpolate_continuous, interpolate_paired, interpolate_stepped, loop_phase, NominalPlan,
};
pub use layer::{calc_size, Backdrop, LayerFrame, LayerParams, LayerState, ScaleMode};
pub use playback::{position_readout, ExportFrames, PlaybackRun, RunStatus};
pub use random::{blend, RandomStream, Seed, SeedText, SeededStream};
pub use schema::{Category, PropertySchema};
pub use session::TweenSession;
pub use snapshot::{LoadReport, PortableSnapshot, Snapshot};
pub use mathart_api_core::{Color, Value, ValueMap};
