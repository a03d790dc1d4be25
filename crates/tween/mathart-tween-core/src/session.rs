//! Session owner: the live start/end snapshots, render size and the cached
//! tween context derived from them.

use std::rc::Rc;

use crate::config::Config;
use crate::context::TweenContext;
use crate::engine::compute_frame;
use crate::error::Result;
use crate::generator::Generator;
use crate::interp::loop_phase;
use crate::layer::{LayerFrame, LayerState};
use crate::random::{blend, RandomStream, SeedText};
use crate::schema::PropertySchema;
use crate::snapshot::{LoadReport, PortableSnapshot, Snapshot};

/// Owns the keyframe pair and keeps the tween context in sync with it.
///
/// The context is rebuilt whenever a snapshot reference or the render size
/// changes, and only then.
#[derive(Debug)]
pub struct TweenSession {
    schema: PropertySchema,
    start: Rc<Snapshot>,
    end: Rc<Snapshot>,
    width: f64,
    height: f64,
    config: Config,
    context: TweenContext,
    revision: u64,
}

impl TweenSession {
    /// New session with `initial` as both start and end.
    pub fn new(
        schema: PropertySchema,
        initial: Rc<Snapshot>,
        width: f64,
        height: f64,
        config: Config,
    ) -> Self {
        let context = TweenContext::build(&schema, &initial, &initial, width, height);
        Self {
            schema,
            start: initial.clone(),
            end: initial,
            width,
            height,
            config,
            context,
            revision: 0,
        }
    }

    pub fn schema(&self) -> &PropertySchema {
        &self.schema
    }

    pub fn start(&self) -> &Rc<Snapshot> {
        &self.start
    }

    pub fn end(&self) -> &Rc<Snapshot> {
        &self.end
    }

    pub fn context(&self) -> &TweenContext {
        &self.context
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Config only shapes per-frame output, so the context is kept.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Incremented on every context rebuild.
    pub fn context_revision(&self) -> u64 {
        self.revision
    }

    fn rebuild(&mut self) {
        self.context =
            TweenContext::build(&self.schema, &self.start, &self.end, self.width, self.height);
        self.revision += 1;
    }

    pub fn set_start(&mut self, snapshot: Rc<Snapshot>) {
        if !Rc::ptr_eq(&self.start, &snapshot) {
            self.start = snapshot;
            self.rebuild();
        }
    }

    pub fn set_end(&mut self, snapshot: Rc<Snapshot>) {
        if !Rc::ptr_eq(&self.end, &snapshot) {
            self.end = snapshot;
            self.rebuild();
        }
    }

    /// Use one snapshot for both ends (a still frame).
    pub fn set_both(&mut self, snapshot: Rc<Snapshot>) {
        if !Rc::ptr_eq(&self.start, &snapshot) || !Rc::ptr_eq(&self.end, &snapshot) {
            self.start = snapshot.clone();
            self.end = snapshot;
            self.rebuild();
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.rebuild();
        }
    }

    /// Whether start and end are distinct snapshots.
    pub fn has_range(&self) -> bool {
        !Rc::ptr_eq(&self.start, &self.end)
    }

    /// Capture the live state as the start keyframe. A blended live stream is
    /// first narrowed to its start endpoint.
    pub fn capture_start<G: Generator + ?Sized>(&mut self, generator: &G, state: &mut LayerState) {
        if let Some((start, _)) = state.random.endpoints() {
            state.random = start;
        }
        self.set_start(Rc::new(Snapshot::capture(generator, state)));
    }

    /// Capture the live state as the end keyframe. A blended live stream is
    /// first narrowed to its end endpoint.
    pub fn capture_end<G: Generator + ?Sized>(&mut self, generator: &G, state: &mut LayerState) {
        if let Some((_, end)) = state.random.endpoints() {
            state.random = end;
        }
        self.set_end(Rc::new(Snapshot::capture(generator, state)));
    }

    pub fn compute_frame<G: Generator + ?Sized>(
        &self,
        generator: &mut G,
        t: f64,
        looping: bool,
    ) -> LayerFrame {
        compute_frame(
            generator,
            &self.schema,
            &self.start,
            &self.end,
            &self.context,
            t,
            looping,
            &self.config,
        )
    }

    /// Apply seed text from the user.
    ///
    /// One block replaces the live stream. Two blocks assign new streams to
    /// the start and end snapshots (one shared stream when the blocks are
    /// identical) and set the live stream to their blend at the current
    /// position. If start and end were the same snapshot, a copy is made for
    /// the end first so the two can differ in their random streams alone.
    /// On a parse error nothing changes.
    pub fn apply_seed_text(
        &mut self,
        text: &str,
        state: &mut LayerState,
        t: f64,
        looping: bool,
    ) -> Result<SeedText> {
        let parsed = SeedText::parse(text)?;
        match parsed {
            SeedText::Single(seed) => {
                state.random = RandomStream::from_seed(seed);
            }
            SeedText::Pair(a, b) if a == b => {
                let shared = RandomStream::from_seed(a);
                self.start.set_random(shared.clone());
                self.end.set_random(shared.clone());
                state.random = shared;
            }
            SeedText::Pair(a, b) => {
                let start_stream = RandomStream::from_seed(a);
                let end_stream = RandomStream::from_seed(b);
                self.start.set_random(start_stream.clone());
                if !self.has_range() {
                    log::debug!("seed pair on a still frame: splitting off an end snapshot");
                    let copy = Rc::new((*self.start).clone());
                    self.set_end(copy);
                }
                self.end.set_random(end_stream.clone());
                state.random = blend(&start_stream, &end_stream, loop_phase(t, looping));
            }
        }
        Ok(parsed)
    }

    /// Seed text to show the user. When the start and end snapshots draw
    /// from differently seeded streams both seeds are written, whatever the
    /// live stream is at the current position; otherwise the live stream's.
    pub fn seed_text(&self, state: &LayerState) -> SeedText {
        let start = self.start.random().primary_seed();
        let end = self.end.random().primary_seed();
        if start != end {
            SeedText::Pair(start, end)
        } else {
            state.random.seed_text()
        }
    }

    /// Portable form of the pair; the end is omitted for a still frame.
    pub fn to_portable(&self) -> (PortableSnapshot, Option<PortableSnapshot>) {
        let start = self.start.to_portable();
        let end = self.has_range().then(|| self.end.to_portable());
        (start, end)
    }

    /// Restore a session from portable data.
    pub fn from_portable(
        schema: PropertySchema,
        start: &PortableSnapshot,
        end: Option<&PortableSnapshot>,
        width: f64,
        height: f64,
        config: Config,
    ) -> Result<(Self, LoadReport)> {
        schema.validate()?;
        let (start_snap, mut report) = Snapshot::from_portable(start, &schema)?;
        let mut session = Self::new(schema, Rc::new(start_snap), width, height, config);
        if let Some(end) = end {
            let (end_snap, end_report) = Snapshot::from_portable(end, &session.schema)?;
            report.unknown.extend(end_report.unknown);
            report.missing.extend(end_report.missing);
            session.set_end(Rc::new(end_snap));
        }
        Ok((session, report))
    }
}
