//! Seeded resource cluster placement.
//!
//! Each cluster is a tree group and a rock group placed near a shared
//! centre:
//!
//! ```text
//! centre      = spread(0.4 × extent)
//! tree group  = centre     + spread(pair_offset)
//! rock group  = tree group + spread(pair_offset)
//! node        = group      + spread(node_offset),  y = terrain height
//! ```
//!
//! where `spread(h)` is uniform in `[-h, h]` per axis.

use rts_core::{ResourceKind, SimRng, Vec3};
use rts_spatial::{BodyStore, HeightField};

use crate::ResourceRegistry;

/// Parameters for [`generate_clusters`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClusterLayout {
    pub clusters:         usize,
    /// Trees per cluster; the same number of rocks is placed.
    pub nodes_per_group:  usize,
    pub amount:           u32,
    /// Map size along x and z.
    pub map_width:        f32,
    pub map_depth:        f32,
    pub pair_offset:      f32,
    pub node_offset:      f32,
}

impl Default for ClusterLayout {
    fn default() -> Self {
        Self {
            clusters:        5,
            nodes_per_group: 7,
            amount:          100,
            map_width:       1000.0,
            map_depth:       1000.0,
            pair_offset:     75.0,
            node_offset:     50.0,
        }
    }
}

/// Place clusters, registering each node in `registry` and a static body in
/// `bodies`.  Returns the number of nodes placed.
pub fn generate_clusters(
    layout: &ClusterLayout,
    rng: &mut SimRng,
    terrain: &dyn HeightField,
    registry: &mut ResourceRegistry,
    bodies: &mut BodyStore,
) -> usize {
    let mut placed = 0;
    for _ in 0..layout.clusters {
        let cx = rng.spread(layout.map_width * 0.4);
        let cz = rng.spread(layout.map_depth * 0.4);
        let tx = cx + rng.spread(layout.pair_offset);
        let tz = cz + rng.spread(layout.pair_offset);
        let rx = tx + rng.spread(layout.pair_offset);
        let rz = tz + rng.spread(layout.pair_offset);

        for (kind, gx, gz) in [(ResourceKind::Wood, tx, tz), (ResourceKind::Stone, rx, rz)] {
            for _ in 0..layout.nodes_per_group {
                let x = gx + rng.spread(layout.node_offset);
                let z = gz + rng.spread(layout.node_offset);
                let pos = Vec3::new(x, terrain.height_at(x, z), z);
                let body = bodies.add_fixed(kind.body_kind(), pos);
                registry.insert(kind, pos, layout.amount, body);
                placed += 1;
            }
        }
    }
    placed
}
