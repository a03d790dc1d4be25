//! Seedable, restartable random streams and their blending.
//!
//! Snapshots hold streams by reference (`Rc`); identity matters. Two snapshots
//! that share a stream replay the same numbers, and a blended stream remembers
//! the endpoints it was made from so live state can be matched back to a
//! snapshot.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::error::{Result, TweenError};

/// Four 32-bit words of generator state, written as four decimal lines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Seed(pub [u32; 4]);

impl Seed {
    /// A seed drawn from the thread-local entropy source.
    pub fn random() -> Self {
        Seed(rand::random())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a}\n{b}\n{c}\n{d}")
    }
}

/// Parsed seed input: a single stream or a start/end pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SeedText {
    Single(Seed),
    Pair(Seed, Seed),
}

fn invalid(reason: impl Into<String>) -> TweenError {
    TweenError::InvalidSeed {
        reason: reason.into(),
    }
}

fn parse_block(lines: &[&str]) -> Result<Seed> {
    let mut words = [0u32; 4];
    for (slot, line) in words.iter_mut().zip(lines) {
        let line = line.trim();
        if line.is_empty() {
            return Err(invalid("blank line inside a seed block"));
        }
        if !line.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(format!("not an unsigned integer: {line:?}")));
        }
        *slot = line
            .parse::<u32>()
            .map_err(|_| invalid(format!("out of range: {line}")))?;
    }
    Ok(Seed(words))
}

impl SeedText {
    /// Parse one block of four unsigned integers, one per line, optionally
    /// followed by a second block. The blocks are separated by a single
    /// newline or by one blank line. Carriage returns and trailing newlines
    /// are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let cleaned = text.replace('\r', "");
        let lines: Vec<&str> = cleaned.trim_end_matches('\n').split('\n').collect();
        match lines.len() {
            4 => Ok(SeedText::Single(parse_block(&lines)?)),
            8 => Ok(SeedText::Pair(
                parse_block(&lines[..4])?,
                parse_block(&lines[4..])?,
            )),
            9 if lines[4].trim().is_empty() => Ok(SeedText::Pair(
                parse_block(&lines[..4])?,
                parse_block(&lines[5..])?,
            )),
            n => Err(invalid(format!(
                "expected one or two blocks of four lines, found {n} lines"
            ))),
        }
    }
}

impl FromStr for SeedText {
    type Err = TweenError;

    fn from_str(s: &str) -> Result<Self> {
        SeedText::parse(s)
    }
}

impl fmt::Display for SeedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedText::Single(seed) => write!(f, "{seed}"),
            SeedText::Pair(start, end) => write!(f, "{start}\n\n{end}"),
        }
    }
}

const WARM_UP: usize = 12;

/// Deterministic stream over `[0, 1)` (sfc32 core).
#[derive(Debug)]
pub struct SeededStream {
    seed: Seed,
    state: Cell<[u32; 4]>,
}

impl SeededStream {
    pub fn new(seed: Seed) -> Self {
        let stream = Self {
            seed,
            state: Cell::new(seed.0),
        };
        stream.reset();
        stream
    }

    pub fn fresh() -> Self {
        Self::new(Seed::random())
    }

    #[inline]
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Restart from the seed.
    pub fn reset(&self) {
        self.state.set(self.seed.0);
        for _ in 0..WARM_UP {
            self.next_u32();
        }
    }

    fn next_u32(&self) -> u32 {
        let [mut a, mut b, mut c, mut d] = self.state.get();
        let t = a.wrapping_add(b).wrapping_add(d);
        d = d.wrapping_add(1);
        a = b ^ (b >> 9);
        b = c.wrapping_add(c << 3);
        c = c.rotate_left(21).wrapping_add(t);
        self.state.set([a, b, c, d]);
        t
    }

    pub fn next(&self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// Weighted mix of two streams advanced in lockstep.
#[derive(Debug)]
pub struct BlendedStream {
    pub start: RandomStream,
    pub end: RandomStream,
    pub weight: f64,
}

/// Shared handle to a random stream.
#[derive(Clone, Debug)]
pub enum RandomStream {
    Seeded(Rc<SeededStream>),
    Blended(Rc<BlendedStream>),
}

impl RandomStream {
    pub fn from_seed(seed: Seed) -> Self {
        RandomStream::Seeded(Rc::new(SeededStream::new(seed)))
    }

    pub fn fresh() -> Self {
        RandomStream::Seeded(Rc::new(SeededStream::fresh()))
    }

    /// Identity comparison (same underlying stream object).
    pub fn ptr_eq(a: &RandomStream, b: &RandomStream) -> bool {
        match (a, b) {
            (RandomStream::Seeded(x), RandomStream::Seeded(y)) => Rc::ptr_eq(x, y),
            (RandomStream::Blended(x), RandomStream::Blended(y)) => Rc::ptr_eq(x, y),
            _ => false,
        }
    }

    /// True when `self` is `other`, or is a blend with `other` as one of its endpoints.
    pub fn is_or_blends(&self, other: &RandomStream) -> bool {
        if RandomStream::ptr_eq(self, other) {
            return true;
        }
        match self {
            RandomStream::Seeded(_) => false,
            RandomStream::Blended(b) => b.start.is_or_blends(other) || b.end.is_or_blends(other),
        }
    }

    /// Blend weight on the end stream, for blended streams.
    pub fn weight(&self) -> Option<f64> {
        match self {
            RandomStream::Seeded(_) => None,
            RandomStream::Blended(b) => Some(b.weight),
        }
    }

    /// The two streams a blend was made from.
    pub fn endpoints(&self) -> Option<(RandomStream, RandomStream)> {
        match self {
            RandomStream::Seeded(_) => None,
            RandomStream::Blended(b) => Some((b.start.clone(), b.end.clone())),
        }
    }

    pub fn next(&self) -> f64 {
        match self {
            RandomStream::Seeded(s) => s.next(),
            RandomStream::Blended(b) => {
                let w = b.weight;
                (1.0 - w) * b.start.next() + w * b.end.next()
            }
        }
    }

    pub fn reset(&self) {
        match self {
            RandomStream::Seeded(s) => s.reset(),
            RandomStream::Blended(b) => {
                b.start.reset();
                b.end.reset();
            }
        }
    }

    /// Seed of the stream, or of the start endpoint for a blend.
    pub fn primary_seed(&self) -> Seed {
        match self {
            RandomStream::Seeded(s) => s.seed(),
            RandomStream::Blended(b) => b.start.primary_seed(),
        }
    }

    /// Seed text that recreates this stream (a blend serializes both endpoints).
    pub fn seed_text(&self) -> SeedText {
        match self {
            RandomStream::Seeded(s) => SeedText::Single(s.seed()),
            RandomStream::Blended(b) => {
                SeedText::Pair(b.start.primary_seed(), b.end.primary_seed())
            }
        }
    }
}

/// Mix two streams with weight `w` on `b`.
///
/// `w == 0` returns `a` itself and `w == 1` returns `b` itself, as does
/// blending a stream with itself.
pub fn blend(a: &RandomStream, b: &RandomStream, w: f64) -> RandomStream {
    if w == 0.0 || RandomStream::ptr_eq(a, b) {
        a.clone()
    } else if w == 1.0 {
        b.clone()
    } else {
        RandomStream::Blended(Rc::new(BlendedStream {
            start: a.clone(),
            end: b.clone(),
            weight: w,
        }))
    }
}
