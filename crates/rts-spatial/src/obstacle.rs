//! Per-tick obstacle snapshot backed by an R-tree.
//!
//! # Snapshot semantics
//!
//! The steering probe scans "every solid body except me and my target".  A
//! linear scan over the world is O(bodies) per probe and each agent probes up
//! to five points per decision, so the sim bulk-loads the obstacle positions
//! into an R-tree once per frame and every agent queries that snapshot.
//! Bodies removed during the frame (a depleted tree) stay visible until the
//! next rebuild; positions never change mid-frame because physics has
//! already run.
//!
//! Distances are measured on the horizontal plane, matching the steering
//! engine.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use rts_core::{BodyId, Vec3};

use crate::BodyStore;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D `[x, z]` point with the body identity.
#[derive(Clone, Debug)]
struct ObstacleEntry {
    point: [f32; 2], // [x, z]
    id:    BodyId,
}

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ObstacleEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dz = self.point[1] - point[1];
        dx * dx + dz * dz
    }
}

#[inline]
fn plane(p: Vec3) -> [f32; 2] {
    [p.x, p.z]
}

// ── ObstacleIndex ─────────────────────────────────────────────────────────────

/// Immutable spatial snapshot of all obstacle bodies.
pub struct ObstacleIndex {
    tree: RTree<ObstacleEntry>,
}

impl ObstacleIndex {
    /// An index with no obstacles.
    pub fn empty() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load every obstacle-tagged body from `bodies`.
    ///
    /// Time complexity: O(N log N).
    pub fn build(bodies: &BodyStore) -> Self {
        let entries: Vec<ObstacleEntry> = bodies
            .iter()
            .filter(|b| b.kind.is_obstacle())
            .map(|b| ObstacleEntry { point: plane(b.position), id: b.id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// The closest obstacle strictly within `radius` of `point`, skipping any
    /// body in `exclude`.  Ties go to the lower `BodyId`.
    pub fn nearest_within(&self, point: Vec3, radius: f32, exclude: &[BodyId]) -> Option<BodyId> {
        if radius <= 0.0 {
            return None;
        }
        let q = plane(point);
        let r2 = radius * radius;
        self.tree
            .locate_within_distance(q, r2)
            .filter(|e| !exclude.contains(&e.id))
            .map(|e| (e.distance_2(&q), e.id))
            .filter(|&(d2, _)| d2 < r2)
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
            .map(|(_, id)| id)
    }

    /// `true` if no obstacle (other than those in `exclude`) lies strictly
    /// within `radius` of `point`.
    #[inline]
    pub fn is_clear(&self, point: Vec3, radius: f32, exclude: &[BodyId]) -> bool {
        self.nearest_within(point, radius, exclude).is_none()
    }
}

impl Default for ObstacleIndex {
    fn default() -> Self {
        Self::empty()
    }
}
