//! Playback scheduling: real-time runs and fixed-rate export.
//!
//! The engine itself is stateless per frame; these types only turn clock
//! readings or frame indices into tween positions.

use crate::error::{Result, TweenError};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Finished,
    Aborted,
}

/// One real-time pass from a start position to 1.
#[derive(Clone, Debug)]
pub struct PlaybackRun {
    start_tween: f64,
    length_ms: f64,
    begin_ms: Option<f64>,
    status: RunStatus,
    progress: f64,
}

impl PlaybackRun {
    /// A run starting at `start_tween` (a finished position restarts at 0)
    /// lasting `length_ms` for the full range.
    pub fn new(start_tween: f64, length_ms: f64) -> Result<Self> {
        if !(length_ms.is_finite() && length_ms > 0.0) {
            return Err(TweenError::InvalidLength { length: length_ms });
        }
        let start_tween = if start_tween >= 1.0 {
            0.0
        } else {
            start_tween.max(0.0)
        };
        Ok(Self {
            start_tween,
            length_ms,
            begin_ms: None,
            status: RunStatus::Running,
            progress: start_tween,
        })
    }

    /// Position for the frame rendered at `now_ms`, or `None` once the run is
    /// over. The first tick anchors the clock. Reaching 1 finishes the run;
    /// that last frame is still returned.
    pub fn tick(&mut self, now_ms: f64) -> Option<f64> {
        if self.status != RunStatus::Running {
            return None;
        }
        let begin = *self.begin_ms.get_or_insert(now_ms);
        let mut tween = self.start_tween + (now_ms - begin) / self.length_ms;
        if tween >= 1.0 {
            tween = 1.0;
            self.status = RunStatus::Finished;
            log::debug!("playback finished");
        }
        self.progress = tween;
        Some(tween)
    }

    /// Jump to `tween`; the next tick re-anchors the clock there.
    pub fn seek(&mut self, tween: f64) {
        if self.status == RunStatus::Running {
            self.start_tween = tween.clamp(0.0, 1.0);
            self.begin_ms = None;
            self.progress = self.start_tween;
        }
    }

    /// Stop a running pass. Returns whether anything changed.
    pub fn abort(&mut self) -> bool {
        if self.status == RunStatus::Running {
            self.status = RunStatus::Aborted;
            log::debug!("playback aborted at {}", self.progress);
            true
        } else {
            false
        }
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }
}

/// Tween positions of every frame of a fixed-rate export. The last frame is
/// exactly 1.
#[derive(Clone, Debug)]
pub struct ExportFrames {
    start_tween: f64,
    /// Frames over the full 0..1 range
    frames: f64,
    index: usize,
    /// Index of the frame rendered at exactly 1
    last: usize,
}

impl ExportFrames {
    pub fn new(fps: f64, length_secs: f64, start_tween: f64) -> Result<Self> {
        if !(length_secs.is_finite() && length_secs > 0.0) {
            return Err(TweenError::InvalidLength {
                length: length_secs,
            });
        }
        if !(fps.is_finite() && fps > 0.0) {
            return Err(TweenError::InvalidFrameRate { fps });
        }
        let frames = (fps * length_secs).round().max(1.0);
        let start_tween = if start_tween >= 1.0 {
            0.0
        } else {
            start_tween.max(0.0)
        };
        // frames already behind the start position are skipped
        let skipped = ((start_tween * frames).floor() as usize).min(frames as usize - 1);
        Ok(Self {
            start_tween,
            frames,
            index: 0,
            last: frames as usize - skipped,
        })
    }
}

impl Iterator for ExportFrames {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index > self.last {
            return None;
        }
        let tween = if self.index == self.last {
            1.0
        } else {
            self.start_tween + self.index as f64 / self.frames
        };
        self.index += 1;
        Some(tween)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.last + 1).saturating_sub(self.index);
        (left, Some(left))
    }
}

impl ExactSizeIterator for ExportFrames {}

/// Scrub position as elapsed seconds: one decimal up to a minute, whole
/// seconds beyond, nothing for a non-positive length.
pub fn position_readout(tween: f64, length_secs: f64) -> String {
    if !(length_secs > 0.0) {
        return String::new();
    }
    let time = tween * length_secs;
    let time = if length_secs <= 60.0 {
        (time * 10.0).round() / 10.0
    } else {
        time.round()
    };
    format!("{time}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_resolution() {
        assert_eq!(position_readout(0.5, 3.0), "1.5s");
        assert_eq!(position_readout(0.123, 10.0), "1.2s");
        assert_eq!(position_readout(0.5, 121.0), "61s");
        assert_eq!(position_readout(1.0, 4.0), "4s");
        assert_eq!(position_readout(0.5, 0.0), "");
    }

    #[test]
    fn invalid_lengths() {
        assert!(matches!(
            PlaybackRun::new(0.0, 0.0),
            Err(TweenError::InvalidLength { .. })
        ));
        assert!(PlaybackRun::new(0.0, f64::NAN).is_err());
        assert!(ExportFrames::new(30.0, -1.0, 0.0).is_err());
        assert!(matches!(
            ExportFrames::new(0.0, 2.0, 0.0),
            Err(TweenError::InvalidFrameRate { .. })
        ));
        assert!(matches!(
            ExportFrames::new(f64::INFINITY, 2.0, 0.0),
            Err(TweenError::InvalidFrameRate { .. })
        ));
    }
}
