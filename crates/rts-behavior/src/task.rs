//! The `TaskStrategy` trait — what varies between worker and soldier.

use rts_agent::Agent;
use rts_core::{BodyId, Vec3};
use rts_resource::ResourceRegistry;

use crate::TickContext;

/// Outcome of one strategy step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Stand still this decision (zero horizontal velocity).
    Hold,
    /// Steer toward `goal`.  `exclude` is the target's body, ignored by the
    /// obstacle probe.
    MoveTo { goal: Vec3, exclude: Option<BodyId> },
    /// The state changed; step again within the same decision.
    Transition,
}

/// Task-specific half of the state machine.
///
/// The strategy owns the transitions; [`TaskMachine`](crate::TaskMachine)
/// owns throttling, steering and hover.  A strategy reads the agent's
/// current state, mutates the agent and the shared context, and says what
/// the body should do next.
///
/// # Contract
///
/// * Return [`Step::Transition`] only after changing `agent.state`.
/// * Never change a reservation flag except through `ctx.registry`.
/// * A missing target is not an error: clear it and go back to `Seeking`.
pub trait TaskStrategy: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// One step of the state machine for `agent`, whose body is at `position`.
    fn step(&self, agent: &mut Agent, position: Vec3, ctx: &mut TickContext<'_>) -> Step;

    /// Give back anything `agent` holds in shared state.  Called when the
    /// agent is despawned.
    fn release(&self, _agent: &mut Agent, _registry: &mut ResourceRegistry) {}
}
