//! The target reservation registry.
//!
//! Every mutation of a node's reservation flag goes through this type.  A
//! node is claimed synchronously inside [`ResourceRegistry::claim_nearest`],
//! so the next agent updated in the same frame already sees it as taken.

use std::collections::BTreeMap;

use tracing::{debug, info};

use rts_core::planar::horizontal_distance;
use rts_core::{BodyId, NodeId, ResourceKind, Vec3};

use crate::{Harvest, ResourceNode};

/// All live resource nodes shared by one group of workers.
#[derive(Debug)]
pub struct ResourceRegistry {
    nodes:   BTreeMap<NodeId, ResourceNode>,
    next_id: NodeId,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self { nodes: BTreeMap::new(), next_id: NodeId(0) }
    }

    /// Register a node.  It starts unreserved.
    pub fn insert(&mut self, kind: ResourceKind, position: Vec3, amount: u32, body: BodyId) -> NodeId {
        let id = self.next_id;
        self.next_id = id.next();
        self.nodes.insert(id, ResourceNode { id, kind, position, amount, body, reserved: false });
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&ResourceNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn is_reserved(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.reserved)
    }

    // ── Reservation ───────────────────────────────────────────────────────

    /// Claim the eligible node nearest to `from` (horizontal distance).
    ///
    /// Reserved, empty, and position-less nodes are skipped.  Ties go to the
    /// lower `NodeId`.  Returns `None` when nothing is eligible.
    pub fn claim_nearest(&mut self, from: Vec3) -> Option<NodeId> {
        let (id, dist) = self
            .nodes
            .values()
            .filter(|n| n.is_eligible())
            .map(|n| (n.id, horizontal_distance(from, n.position)))
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))?;

        let node = self.nodes.get_mut(&id)?;
        node.reserved = true;
        debug!(node = %id, kind = %node.kind, dist, "claimed resource node");
        Some(id)
    }

    /// Clear the reservation on `id`.  Missing nodes are a no-op.
    pub fn release(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            if node.reserved {
                debug!(node = %id, "released resource node");
            }
            node.reserved = false;
        }
    }

    /// Take up to `chunk` from node `id`.
    ///
    /// Always clears the reservation.  When the node reaches zero it is
    /// removed from the registry and its body reported in
    /// [`Harvest::depleted`]; this happens exactly once because the node is
    /// gone afterwards.  Returns `None` if the node no longer exists.
    pub fn harvest(&mut self, id: NodeId, chunk: u32) -> Option<Harvest> {
        let node = self.nodes.get_mut(&id)?;
        let taken = chunk.min(node.amount);
        node.amount -= taken;
        node.reserved = false;
        let kind = node.kind;

        let depleted = if node.amount == 0 {
            let body = node.body;
            self.nodes.remove(&id);
            info!(node = %id, %kind, "resource node depleted");
            Some(body)
        } else {
            None
        };

        Some(Harvest { kind, amount: taken, depleted })
    }

    /// Remove a node outright (e.g. destroyed by something outside the core).
    pub fn remove(&mut self, id: NodeId) -> Option<ResourceNode> {
        self.nodes.remove(&id)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn iter(&self) -> impl Iterator<Item = &ResourceNode> + '_ {
        self.nodes.values()
    }

    /// Remaining amount of `kind` across all live nodes.
    pub fn total(&self, kind: ResourceKind) -> u64 {
        self.nodes.values().filter(|n| n.kind == kind).map(|n| n.amount as u64).sum()
    }

    pub fn reserved_count(&self) -> usize {
        self.nodes.values().filter(|n| n.reserved).count()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
