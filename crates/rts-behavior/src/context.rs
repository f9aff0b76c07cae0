//! Per-decision view of the world handed to a task strategy.

use rts_core::planar::horizontal_distance;
use rts_core::{AgentId, BodyId, SimTime, Vec3};
use rts_resource::{DepotStore, ResourceRegistry};
use rts_spatial::{HeightField, ObstacleIndex};

/// Everything an agent may read or mutate during one decision.
///
/// Built by the sim for each agent in turn.  The read-only parts are
/// per-frame snapshots taken after physics ran; the mutable parts are shared
/// by every agent and mutated sequentially.
///
/// # Lifetimes
///
/// All borrows live for one agent's update.  The agent's own record and body
/// are passed separately as `&mut`.
pub struct TickContext<'a> {
    /// Simulated time of this frame.
    pub now: SimTime,

    /// Obstacle snapshot for steering probes.
    pub obstacles: &'a ObstacleIndex,

    /// Positions of this agent's cohort peers (may include the agent itself).
    pub peers: &'a [(AgentId, Vec3)],

    /// Positions of every hostile body, ascending by `BodyId`.
    pub hostiles: &'a [(BodyId, Vec3)],

    pub terrain: &'a dyn HeightField,

    /// The shared target reservation registry.
    pub registry: &'a mut ResourceRegistry,

    pub depots: &'a mut DepotStore,

    /// Bodies to remove from the world once every agent has updated.
    pub removals: &'a mut Vec<BodyId>,
}

impl<'a> TickContext<'a> {
    /// Current position of hostile `body`, or `None` if it left the world.
    pub fn hostile_position(&self, body: BodyId) -> Option<Vec3> {
        self.hostiles
            .binary_search_by_key(&body, |&(id, _)| id)
            .ok()
            .map(|i| self.hostiles[i].1)
    }

    /// The hostile nearest to `from` on the horizontal plane.  Ties go to
    /// the lower `BodyId`.
    pub fn nearest_hostile(&self, from: Vec3) -> Option<(BodyId, Vec3)> {
        self.hostiles
            .iter()
            .copied()
            .filter(|(_, p)| p.is_finite())
            .min_by(|a, b| {
                horizontal_distance(from, a.1)
                    .total_cmp(&horizontal_distance(from, b.1))
                    .then(a.0.cmp(&b.0))
            })
    }
}
