//! `AgentStore` — every live agent, ordered by `AgentId`.
//!
//! # Ordering
//!
//! Agents are updated strictly sequentially in ascending `AgentId` order, and
//! each update may claim targets in a shared registry.  A `BTreeMap` keeps
//! that order stable across spawns and despawns, so two runs with the same
//! seed make the same claims.

use std::collections::BTreeMap;

use rts_core::{AgentId, BodyId};

use crate::{Agent, AgentBuilder, TaskState};

/// Owner of all agent records.  IDs are never reused.
#[derive(Debug)]
pub struct AgentStore {
    agents:  BTreeMap<AgentId, Agent>,
    next_id: AgentId,
}

impl AgentStore {
    pub fn new() -> Self {
        Self { agents: BTreeMap::new(), next_id: AgentId(0) }
    }

    /// Insert a new agent and return its ID.
    pub fn spawn(&mut self, builder: AgentBuilder) -> AgentId {
        let id = self.next_id;
        self.next_id = id.next();
        self.agents.insert(id, builder.build(id));
        id
    }

    /// Remove an agent, returning its final record.
    ///
    /// Releasing its reservation and cohort membership is the caller's job;
    /// the returned record carries the target and cohort needed to do so.
    pub fn remove(&mut self, id: AgentId) -> Option<Agent> {
        self.agents.remove(&id)
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    /// The agent driving body `body`, if any.  Linear scan.
    pub fn by_body(&self, body: BodyId) -> Option<AgentId> {
        self.agents.values().find(|a| a.body == body).map(|a| a.id)
    }

    /// Snapshot of all IDs in update order.
    ///
    /// Used by the sim's agent loop, which needs `&mut` access to one agent
    /// at a time while other state is borrowed.
    pub fn ids(&self) -> Vec<AgentId> {
        self.agents.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> + '_ {
        self.agents.values_mut()
    }

    /// Number of agents currently in `state`.
    pub fn count_in(&self, state: TaskState) -> usize {
        self.agents.values().filter(|a| a.state == state).count()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl Default for AgentStore {
    fn default() -> Self {
        Self::new()
    }
}
