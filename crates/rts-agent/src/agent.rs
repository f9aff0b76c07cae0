//! The agent record and the small value types it carries.

use std::fmt;

use rts_core::{AgentId, BodyId, CohortId, DepotId, NodeId, ResourceKind, SimTime};

// ── Role ──────────────────────────────────────────────────────────────────────

/// What kind of unit an agent is.  Selects the task strategy that drives it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Role {
    /// Harvests resources and delivers them to its home depot.
    Worker { depot: DepotId },
    /// Chases and engages hostile bodies.
    Soldier,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Worker { .. } => "worker",
            Role::Soldier       => "soldier",
        }
    }

    /// The home depot, for workers.
    #[inline]
    pub fn depot(self) -> Option<DepotId> {
        match self {
            Role::Worker { depot } => Some(depot),
            Role::Soldier          => None,
        }
    }
}

// ── TaskState ─────────────────────────────────────────────────────────────────

/// High-level task phase.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TaskState {
    /// No eligible target exists.  Velocity is held at zero.
    Idle,
    /// No target yet; the next decision looks for one.
    #[default]
    Seeking,
    TravelingToTarget,
    Harvesting,
    Engaging,
    /// Carrying a payload back to the depot.
    Returning,
    Delivering,
}

impl TaskState {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::Idle              => "idle",
            TaskState::Seeking           => "seeking",
            TaskState::TravelingToTarget => "traveling",
            TaskState::Harvesting        => "harvesting",
            TaskState::Engaging          => "engaging",
            TaskState::Returning         => "returning",
            TaskState::Delivering        => "delivering",
        }
    }

    /// `true` for states in which the agent has no target and is looking for one.
    #[inline]
    pub fn is_searching(self) -> bool {
        matches!(self, TaskState::Idle | TaskState::Seeking)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Payload & target ──────────────────────────────────────────────────────────

/// Resources an agent carries between harvest and delivery.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Payload {
    pub kind:   ResourceKind,
    pub amount: u32,
}

/// What an agent is currently heading for.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRef {
    /// A reserved node in the home depot's resource registry.
    Resource(NodeId),
    /// A world body (combat targets).
    Body(BodyId),
}

// ── AvoidanceState ────────────────────────────────────────────────────────────

/// Timed commitment to an avoidance deflection.
///
/// While committed, steering rotates the direct heading by `angle` and does
/// not probe for obstacles.  The commitment lapses at `until`.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvoidanceState {
    commitment: Option<(f32, SimTime)>,
}

impl AvoidanceState {
    /// Commit to deflecting by `angle` radians until `until`.
    pub fn commit(&mut self, angle: f32, until: SimTime) {
        self.commitment = Some((angle, until));
    }

    /// The committed angle if the commitment is still live at `now`.
    #[inline]
    pub fn active_angle(&self, now: SimTime) -> Option<f32> {
        match self.commitment {
            Some((angle, until)) if now < until => Some(angle),
            _ => None,
        }
    }

    #[inline]
    pub fn is_committed(&self, now: SimTime) -> bool {
        self.active_angle(now).is_some()
    }

    /// Instant the current commitment ends, live or not.
    pub fn until(&self) -> Option<SimTime> {
        self.commitment.map(|(_, until)| until)
    }

    pub fn clear(&mut self) {
        self.commitment = None;
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One autonomous unit.
///
/// Owns its task state and timers exclusively.  Timers are simulated-time
/// instants, so expiry checks are independent of the frame rate.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:     AgentId,
    pub body:   BodyId,
    pub role:   Role,
    /// Separation peer group, if any.
    pub cohort: Option<CohortId>,

    pub state:   TaskState,
    pub target:  Option<TargetRef>,
    pub payload: Option<Payload>,

    /// Nominal horizontal speed in units per second.
    pub speed:             f32,
    /// Minimum simulated seconds between decisions.
    pub decision_interval: f32,

    /// When the last decision ran.  `None` until the first one.
    pub last_decision: Option<SimTime>,
    /// When the current timed phase (harvesting) began.
    pub phase_started: Option<SimTime>,

    pub avoidance: AvoidanceState,
}

impl Agent {
    /// `true` if a decision is due at `now`.
    ///
    /// The first decision runs immediately; after that at most one per
    /// `decision_interval` seconds.
    #[inline]
    pub fn is_due(&self, now: SimTime) -> bool {
        match self.last_decision {
            None       => true,
            Some(last) => now.since(last) >= self.decision_interval as f64,
        }
    }

    /// Amount currently carried, 0 when empty-handed.
    #[inline]
    pub fn carrying(&self) -> u32 {
        self.payload.map_or(0, |p| p.amount)
    }

    /// The reserved resource node, if the current target is one.
    #[inline]
    pub fn resource_target(&self) -> Option<NodeId> {
        match self.target {
            Some(TargetRef::Resource(node)) => Some(node),
            _ => None,
        }
    }

    /// The targeted body, if the current target is one.
    #[inline]
    pub fn body_target(&self) -> Option<BodyId> {
        match self.target {
            Some(TargetRef::Body(body)) => Some(body),
            _ => None,
        }
    }

    /// Drop the target and any phase timer, returning the old target.
    pub fn clear_target(&mut self) -> Option<TargetRef> {
        self.phase_started = None;
        self.target.take()
    }
}
