//! Simulation observer trait for progress reporting and data collection.

use rts_agent::AgentStore;
use rts_core::{Frame, SimTime};
use rts_resource::Stockpile;
use rts_spatial::BodyStore;

/// Per-frame totals handed to [`SimObserver::on_frame_end`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub frame:      Frame,
    /// Simulated time at the end of the frame.
    pub now:        SimTime,
    /// Agents whose decision was due this frame.
    pub decisions:  usize,
    pub agents:     usize,
    pub stockpile:  Stockpile,
    /// Resource nodes still registered.
    pub live_nodes: usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// frame loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_frame_end(&mut self, stats: &FrameStats) {
///         if stats.frame.0 % self.interval == 0 {
///             println!("{}: {} decisions", stats.frame, stats.decisions);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each frame, before physics.
    fn on_frame_start(&mut self, _frame: Frame) {}

    /// Called once the frame's removals have been applied.
    fn on_frame_end(&mut self, _stats: &FrameStats) {}

    /// Called every `config.snapshot_interval_frames` frames.
    ///
    /// Provides read-only access to agents and bodies so that output writers
    /// can record positions without the sim knowing any output format.
    fn on_snapshot(&mut self, _frame: Frame, _agents: &AgentStore, _bodies: &BodyStore) {}

    /// Called once after the final frame completes.
    fn on_sim_end(&mut self, _final_frame: Frame) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
