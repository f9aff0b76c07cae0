//! World bodies and their store.
//!
//! The physics engine owns integration; the core only reads `position` and
//! writes `velocity`.  `BodyStore` is the narrow surface both sides share.

use std::collections::BTreeMap;

use rts_core::{BodyId, BodyKind, Vec3};

/// A rigid body as seen by the agent core.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    pub id:             BodyId,
    pub kind:           BodyKind,
    pub position:       Vec3,
    pub velocity:       Vec3,
    /// Static bodies (trees, rocks, buildings) are never moved by physics.
    pub is_static:      bool,
    /// Agents keep their orientation locked; the core never writes rotation.
    pub fixed_rotation: bool,
}

impl Body {
    /// A static body of `kind` at `position`.
    pub fn fixed(id: BodyId, kind: BodyKind, position: Vec3) -> Self {
        Self {
            id,
            kind,
            position,
            velocity:       Vec3::ZERO,
            is_static:      true,
            fixed_rotation: true,
        }
    }

    /// A dynamic body (agent, player) at `position` with zero velocity.
    pub fn dynamic(id: BodyId, kind: BodyKind, position: Vec3) -> Self {
        Self {
            is_static: false,
            ..Self::fixed(id, kind, position)
        }
    }
}

/// Every body in the world, keyed by `BodyId`.
///
/// Iteration is in ascending `BodyId` order so that scans over the world are
/// deterministic.  IDs are never reused.
#[derive(Debug)]
pub struct BodyStore {
    bodies:  BTreeMap<BodyId, Body>,
    next_id: BodyId,
}

impl BodyStore {
    pub fn new() -> Self {
        Self { bodies: BTreeMap::new(), next_id: BodyId(0) }
    }

    fn allocate(&mut self) -> BodyId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    /// Add a static body and return its ID.
    pub fn add_fixed(&mut self, kind: BodyKind, position: Vec3) -> BodyId {
        let id = self.allocate();
        self.bodies.insert(id, Body::fixed(id, kind, position));
        id
    }

    /// Add a dynamic body and return its ID.
    pub fn add_dynamic(&mut self, kind: BodyKind, position: Vec3) -> BodyId {
        let id = self.allocate();
        self.bodies.insert(id, Body::dynamic(id, kind, position));
        id
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    pub fn position(&self, id: BodyId) -> Option<Vec3> {
        self.bodies.get(&id).map(|b| b.position)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.contains_key(&id)
    }

    /// Remove a body.  Returns the removed body, or `None` if it was already gone.
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        self.bodies.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> + '_ {
        self.bodies.values_mut()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for BodyStore {
    fn default() -> Self {
        Self::new()
    }
}
