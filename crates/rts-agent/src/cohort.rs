//! Separation peer registries.
//!
//! A [`Cohort`] is an explicitly owned group of agents that keep their
//! distance from one another.  Membership follows the agent lifecycle:
//! joined at spawn, left at despawn.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use rts_core::{AgentId, CohortId};

/// One peer group.  Members are kept sorted so peer scans are deterministic.
#[derive(Debug, Clone, Default)]
pub struct Cohort {
    pub id:  CohortId,
    members: BTreeSet<AgentId>,
}

impl Cohort {
    pub fn new(id: CohortId) -> Self {
        Self { id, members: BTreeSet::new() }
    }

    /// Add `agent`.  Returns `false` if it was already a member.
    pub fn join(&mut self, agent: AgentId) -> bool {
        self.members.insert(agent)
    }

    /// Remove `agent`.  Returns `false` if it was not a member.
    pub fn leave(&mut self, agent: AgentId) -> bool {
        self.members.remove(&agent)
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.members.contains(&agent)
    }

    pub fn members(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.members.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// All cohorts, keyed by ID.
#[derive(Debug)]
pub struct CohortStore {
    cohorts: FxHashMap<CohortId, Cohort>,
    next_id: CohortId,
}

impl CohortStore {
    pub fn new() -> Self {
        Self { cohorts: FxHashMap::default(), next_id: CohortId(0) }
    }

    /// Create an empty cohort and return its ID.
    pub fn create(&mut self) -> CohortId {
        let id = self.next_id;
        self.next_id = id.next();
        self.cohorts.insert(id, Cohort::new(id));
        id
    }

    pub fn get(&self, id: CohortId) -> Option<&Cohort> {
        self.cohorts.get(&id)
    }

    pub fn get_mut(&mut self, id: CohortId) -> Option<&mut Cohort> {
        self.cohorts.get_mut(&id)
    }

    /// Add `agent` to cohort `id`.  Returns `false` if the cohort is unknown.
    pub fn join(&mut self, id: CohortId, agent: AgentId) -> bool {
        match self.cohorts.get_mut(&id) {
            Some(c) => {
                c.join(agent);
                true
            }
            None => false,
        }
    }

    /// Remove `agent` from cohort `id`.  Unknown cohorts are a no-op.
    pub fn leave(&mut self, id: CohortId, agent: AgentId) -> bool {
        self.cohorts.get_mut(&id).is_some_and(|c| c.leave(agent))
    }

    /// Cohort IDs in ascending order.
    pub fn ids(&self) -> Vec<CohortId> {
        let mut ids: Vec<CohortId> = self.cohorts.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.cohorts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }
}

impl Default for CohortStore {
    fn default() -> Self {
        Self::new()
    }
}
