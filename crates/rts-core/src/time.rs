//! Simulation time model.
//!
//! # Design
//!
//! The driver advances in **frames**.  Each frame carries an explicit elapsed
//! time delta, and the clock accumulates those deltas into a monotonically
//! increasing [`SimTime`]:
//!
//!   elapsed = Σ dt over all frames so far
//!
//! Agent timers (decision throttling, harvest phases, avoidance commitment)
//! compare `SimTime` instants, never wall-clock time, so a run is fully
//! determined by its seed and the sequence of deltas fed to it.

use std::fmt;

// ── Frame ────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame(pub u64);

impl Frame {
    pub const ZERO: Frame = Frame(0);

    /// Return the frame `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Frame {
        Frame(self.0 + n)
    }
}

impl std::ops::Sub for Frame {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Frame) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── SimTime ──────────────────────────────────────────────────────────────────

/// An instant in simulated seconds since the start of the run.
///
/// Stored as `f64` so that long runs at 60 fps accumulate no visible drift.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }

    /// The instant `secs` seconds after `self`.
    #[inline]
    pub fn after(self, secs: f32) -> SimTime {
        SimTime(self.0 + secs as f64)
    }

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

// ── SimClock ─────────────────────────────────────────────────────────────────

/// Tracks the current frame and accumulated simulated time.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current frame, advanced by [`SimClock::advance`] each step.
    pub frame: Frame,
    /// Simulated time at the start of `frame`.
    pub now: SimTime,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one frame of `dt` seconds.  Negative or
    /// non-finite deltas are treated as zero.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.frame = self.frame.offset(1);
        self.now = self.now.after(dt);
    }

    /// Break elapsed time into (minutes, seconds) for human-readable logs.
    pub fn elapsed_ms(&self) -> (u64, f64) {
        let total = self.now.0.max(0.0);
        let minutes = (total / 60.0).floor() as u64;
        (minutes, total - minutes as f64 * 60.0)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s) = self.elapsed_ms();
        write!(f, "{} ({}m {:06.3}s)", self.frame, m, s)
    }
}

// ── SimConfig ────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Fixed frame delta used by `Sim::run`.  Default: 1/60 s.
    pub frame_dt_secs: f32,

    /// Total frames to simulate in `Sim::run`.
    pub total_frames: u64,

    /// Call `SimObserver::on_snapshot` every N frames.  0 disables snapshots.
    pub snapshot_interval_frames: u64,
}

impl SimConfig {
    /// The frame at which `Sim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_frame(&self) -> Frame {
        Frame(self.total_frames)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                     42,
            frame_dt_secs:            1.0 / 60.0,
            total_frames:             60 * 60,
            snapshot_interval_frames: 60,
        }
    }
}
