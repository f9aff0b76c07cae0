//! `TaskMachine` — drives one [`TaskStrategy`] for any number of agents.

use tracing::{debug, trace};

use rts_agent::Agent;
use rts_core::planar::with_horizontal;
use rts_core::Vec3;
use rts_resource::ResourceRegistry;
use rts_spatial::Body;

use crate::{HoverPolicy, SeparationParams, Step, Steering, TaskStrategy, TickContext, separation};

/// Upper bound on state changes within one decision.
///
/// Lets an instant harvest finish in the arrival decision while keeping a
/// degenerate layout (node right next to the depot, zero harvest time) from
/// spinning forever.
pub const MAX_CHAINED_STEPS: usize = 6;

/// Parameterised state machine: throttling, transition chaining, steering,
/// separation and hover around a task-specific strategy.
#[derive(Debug, Clone)]
pub struct TaskMachine<S> {
    pub strategy:   S,
    pub steering:   Steering,
    pub separation: SeparationParams,
    pub hover:      HoverPolicy,
}

impl<S: TaskStrategy> TaskMachine<S> {
    pub fn new(strategy: S, steering: Steering, separation: SeparationParams, hover: HoverPolicy) -> Self {
        Self { strategy, steering, separation, hover }
    }

    /// Run one decision for `agent` if one is due at `ctx.now`.
    ///
    /// Writes the body's horizontal velocity (and vertical, via the hover
    /// policy).  Returns `false` when throttled, in which case the body is
    /// left untouched and keeps its last commanded velocity.
    pub fn update(&self, agent: &mut Agent, body: &mut Body, ctx: &mut TickContext<'_>) -> bool {
        if !agent.is_due(ctx.now) {
            return false;
        }
        agent.last_decision = Some(ctx.now);
        let position = body.position;

        let mut step = Step::Transition;
        for _ in 0..MAX_CHAINED_STEPS {
            let before = agent.state;
            step = self.strategy.step(agent, position, ctx);
            if agent.state != before {
                debug!(
                    agent = %agent.id,
                    task = self.strategy.name(),
                    from = %before,
                    to = %agent.state,
                    "state transition"
                );
            }
            if step != Step::Transition {
                break;
            }
        }

        let horizontal = match step {
            Step::MoveTo { goal, exclude } => {
                let bias = separation(position, agent.id, ctx.peers, &self.separation, agent.speed);
                let ignore = [body.id, exclude.unwrap_or(body.id)];
                self.steering.compute_velocity(
                    position,
                    Some(goal),
                    agent.speed,
                    ctx.obstacles,
                    &ignore,
                    &mut agent.avoidance,
                    bias,
                    ctx.now,
                )
            }
            Step::Hold | Step::Transition => Vec3::ZERO,
        };

        body.velocity = with_horizontal(body.velocity, horizontal);
        self.hover.apply(body, ctx.terrain);
        trace!(agent = %agent.id, state = %agent.state, velocity = ?body.velocity, "decision");
        true
    }

    /// Release `agent`'s shared claims ahead of despawn.
    pub fn release(&self, agent: &mut Agent, registry: &mut ResourceRegistry) {
        self.strategy.release(agent, registry);
    }
}
