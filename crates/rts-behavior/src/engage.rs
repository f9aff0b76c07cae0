//! Soldier task: chase the nearest hostile and hold at engagement range.
//!
//! Combat targets are not reserved; any number of soldiers may pick the
//! same hostile.  Firing is handled elsewhere; this task only positions.

use tracing::debug;

use rts_agent::{Agent, TargetRef, TaskState};
use rts_core::Vec3;
use rts_core::planar::horizontal_distance;

use crate::{EngageParams, Step, TaskStrategy, TickContext};

/// [`TaskStrategy`] for soldiers.
#[derive(Debug, Clone, Default)]
pub struct EngageTask {
    pub params: EngageParams,
}

impl EngageTask {
    pub fn new(params: EngageParams) -> Self {
        Self { params }
    }
}

impl TaskStrategy for EngageTask {
    fn name(&self) -> &'static str {
        "engage"
    }

    fn step(&self, agent: &mut Agent, position: Vec3, ctx: &mut TickContext<'_>) -> Step {
        match agent.state {
            TaskState::Idle | TaskState::Seeking => match ctx.nearest_hostile(position) {
                Some((body, _)) => {
                    agent.target = Some(TargetRef::Body(body));
                    agent.state = TaskState::TravelingToTarget;
                    Step::Transition
                }
                None => {
                    agent.state = TaskState::Idle;
                    Step::Hold
                }
            },

            TaskState::TravelingToTarget | TaskState::Engaging => {
                let Some((body, target)) = agent
                    .body_target()
                    .and_then(|b| ctx.hostile_position(b).map(|p| (b, p)))
                else {
                    debug!(agent = %agent.id, "hostile gone, seeking again");
                    agent.clear_target();
                    agent.state = TaskState::Seeking;
                    return Step::Transition;
                };

                if horizontal_distance(position, target) <= self.params.engage_range {
                    agent.state = TaskState::Engaging;
                    Step::Hold
                } else {
                    agent.state = TaskState::TravelingToTarget;
                    Step::MoveTo { goal: target, exclude: Some(body) }
                }
            }

            TaskState::Harvesting | TaskState::Returning | TaskState::Delivering => {
                agent.clear_target();
                agent.payload = None;
                agent.state = TaskState::Seeking;
                Step::Transition
            }
        }
    }
}
