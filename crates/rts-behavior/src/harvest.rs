//! Worker task: harvest resources and carry them home.
//!
//! # State graph
//!
//! ```text
//!  Idle/Seeking ──claim──► TravelingToTarget ──within radius──► Harvesting
//!       ▲  │ no node                                               │ duration elapsed
//!       │  └──► Idle (hold)                                        ▼
//!   Delivering ◄──within radius── Returning ◄───────── payload = min(chunk, amount)
//! ```
//!
//! Any state whose node has vanished clears the target and returns to
//! `Seeking`.  Nodes are claimed nearest to the home depot, not to the
//! worker, so a depot's workers fan out from it.

use tracing::{debug, warn};

use rts_agent::{Agent, Payload, TargetRef, TaskState};
use rts_core::planar::horizontal_distance;
use rts_core::Vec3;
use rts_resource::ResourceRegistry;

use crate::{HarvestParams, Step, TaskStrategy, TickContext};

/// [`TaskStrategy`] for worker drones.
#[derive(Debug, Clone, Default)]
pub struct HarvestTask {
    pub params: HarvestParams,
}

impl HarvestTask {
    pub fn new(params: HarvestParams) -> Self {
        Self { params }
    }

    fn invalidate(agent: &mut Agent) -> Step {
        debug!(agent = %agent.id, target = ?agent.target, "target vanished, seeking again");
        agent.clear_target();
        agent.state = TaskState::Seeking;
        Step::Transition
    }
}

impl TaskStrategy for HarvestTask {
    fn name(&self) -> &'static str {
        "harvest"
    }

    fn step(&self, agent: &mut Agent, position: Vec3, ctx: &mut TickContext<'_>) -> Step {
        let Some(depot_id) = agent.role.depot() else {
            warn!(agent = %agent.id, "harvest task driving an agent without a depot");
            return Step::Hold;
        };
        let Some((depot_pos, depot_body)) = ctx.depots.get(depot_id).map(|d| (d.position, d.body)) else {
            warn!(agent = %agent.id, depot = %depot_id, "home depot missing, skipping decision");
            return Step::Hold;
        };
        let radius = self.params.interaction_radius;

        match agent.state {
            TaskState::Idle | TaskState::Seeking => {
                if agent.payload.is_some() {
                    agent.state = TaskState::Returning;
                    return Step::Transition;
                }
                match ctx.registry.claim_nearest(depot_pos) {
                    Some(node) => {
                        agent.target = Some(TargetRef::Resource(node));
                        agent.state = TaskState::TravelingToTarget;
                        Step::Transition
                    }
                    None => {
                        agent.state = TaskState::Idle;
                        Step::Hold
                    }
                }
            }

            TaskState::TravelingToTarget => {
                let Some(node) = agent.resource_target().and_then(|id| ctx.registry.get(id)) else {
                    return Self::invalidate(agent);
                };
                if horizontal_distance(position, node.position) < radius {
                    agent.state = TaskState::Harvesting;
                    agent.phase_started = Some(ctx.now);
                    Step::Transition
                } else {
                    Step::MoveTo { goal: node.position, exclude: Some(node.body) }
                }
            }

            TaskState::Harvesting => {
                let Some(node) = agent.resource_target().filter(|&id| ctx.registry.contains(id)) else {
                    return Self::invalidate(agent);
                };
                let started = *agent.phase_started.get_or_insert(ctx.now);
                if ctx.now.since(started) < self.params.duration as f64 {
                    return Step::Hold;
                }
                let Some(harvest) = ctx.registry.harvest(node, self.params.chunk) else {
                    return Self::invalidate(agent);
                };
                if let Some(body) = harvest.depleted {
                    ctx.removals.push(body);
                }
                debug!(agent = %agent.id, %node, kind = %harvest.kind, amount = harvest.amount, "harvested");
                agent.clear_target();
                agent.payload = Some(Payload { kind: harvest.kind, amount: harvest.amount });
                agent.state = TaskState::Returning;
                Step::Transition
            }

            TaskState::Returning => {
                if agent.payload.is_none() {
                    agent.state = TaskState::Seeking;
                    return Step::Transition;
                }
                if horizontal_distance(position, depot_pos) < radius {
                    agent.state = TaskState::Delivering;
                    Step::Transition
                } else {
                    Step::MoveTo { goal: depot_pos, exclude: Some(depot_body) }
                }
            }

            TaskState::Delivering => {
                if let Some(p) = agent.payload.take() {
                    if let Err(e) = ctx.depots.receive(depot_id, p.kind, p.amount) {
                        warn!(agent = %agent.id, error = %e, "delivery failed; payload dropped");
                    }
                }
                agent.state = TaskState::Seeking;
                Step::Transition
            }

            TaskState::Engaging => {
                agent.clear_target();
                agent.state = TaskState::Seeking;
                Step::Transition
            }
        }
    }

    fn release(&self, agent: &mut Agent, registry: &mut ResourceRegistry) {
        if let Some(node) = agent.resource_target() {
            registry.release(node);
        }
        agent.clear_target();
        agent.payload = None;
    }
}

