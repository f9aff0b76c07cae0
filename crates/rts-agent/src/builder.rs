//! Fluent builder for [`Agent`] records.
//!
//! # Usage
//!
//! ```rust
//! use rts_agent::{AgentBuilder, AgentStore, TaskState};
//! use rts_core::{BodyId, DepotId};
//!
//! let mut store = AgentStore::new();
//! let id = store.spawn(AgentBuilder::worker(BodyId(3), DepotId(0)).speed(6.0));
//!
//! let agent = store.get(id).unwrap();
//! assert_eq!(agent.state, TaskState::Seeking);
//! assert_eq!(agent.speed, 6.0);
//! ```

use rts_core::{AgentId, BodyId, CohortId, DepotId};

use crate::{Agent, AvoidanceState, Role, TaskState};

/// Nominal worker speed (units/s).
pub const WORKER_SPEED: f32 = 5.0;
/// Seconds between worker decisions.
pub const WORKER_INTERVAL: f32 = 0.3;
/// Nominal soldier speed (units/s).
pub const SOLDIER_SPEED: f32 = 3.0;
/// Seconds between soldier decisions.
pub const SOLDIER_INTERVAL: f32 = 0.2;

/// Fluent builder for an [`Agent`].  The ID is assigned by
/// [`AgentStore::spawn`](crate::AgentStore::spawn).
#[derive(Clone, Debug)]
pub struct AgentBuilder {
    body:     BodyId,
    role:     Role,
    cohort:   Option<CohortId>,
    speed:    f32,
    interval: f32,
}

impl AgentBuilder {
    /// A worker bound to `depot`, with the default worker speed and cadence.
    pub fn worker(body: BodyId, depot: DepotId) -> Self {
        Self {
            body,
            role:     Role::Worker { depot },
            cohort:   None,
            speed:    WORKER_SPEED,
            interval: WORKER_INTERVAL,
        }
    }

    /// A soldier with the default soldier speed and cadence.
    pub fn soldier(body: BodyId) -> Self {
        Self {
            body,
            role:     Role::Soldier,
            cohort:   None,
            speed:    SOLDIER_SPEED,
            interval: SOLDIER_INTERVAL,
        }
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed.max(0.0);
        self
    }

    pub fn decision_interval(mut self, secs: f32) -> Self {
        self.interval = secs.max(0.0);
        self
    }

    /// Join separation cohort `cohort`.  The store does not register the
    /// membership; the caller adds the agent to the cohort itself.
    pub fn cohort(mut self, cohort: CohortId) -> Self {
        self.cohort = Some(cohort);
        self
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn cohort_id(&self) -> Option<CohortId> {
        self.cohort
    }

    pub(crate) fn build(self, id: AgentId) -> Agent {
        Agent {
            id,
            body:              self.body,
            role:              self.role,
            cohort:            self.cohort,
            state:             TaskState::Seeking,
            target:            None,
            payload:           None,
            speed:             self.speed,
            decision_interval: self.interval,
            last_decision:     None,
            phase_started:     None,
            avoidance:         AvoidanceState::default(),
        }
    }
}
