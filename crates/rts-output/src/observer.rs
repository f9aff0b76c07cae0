//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;

use rts_agent::AgentStore;
use rts_core::Frame;
use rts_sim::{FrameStats, SimObserver};
use rts_spatial::BodyStore;

use crate::row::{AgentSnapshotRow, FrameSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent snapshots and frame summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed; further errors suppressed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_frame_end(&mut self, stats: &FrameStats) {
        let row = FrameSummaryRow {
            frame:      stats.frame.0,
            sim_secs:   stats.now.secs(),
            decisions:  stats.decisions as u64,
            agents:     stats.agents as u64,
            wood:       stats.stockpile.wood,
            stone:      stats.stockpile.stone,
            live_nodes: stats.live_nodes as u64,
        };
        let result = self.writer.write_frame_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, frame: Frame, agents: &AgentStore, bodies: &BodyStore) {
        let rows: Vec<AgentSnapshotRow> = agents
            .iter()
            .filter_map(|agent| {
                let p = bodies.position(agent.body)?;
                Some(AgentSnapshotRow {
                    frame:    frame.0,
                    agent_id: agent.id.0,
                    role:     agent.role.as_str(),
                    state:    agent.state.as_str(),
                    x:        p.x,
                    y:        p.y,
                    z:        p.z,
                    carrying: agent.carrying(),
                })
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_frame: Frame) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
