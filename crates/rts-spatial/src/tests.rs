//! Unit tests for rts-spatial.
//!
//! All worlds are hand-built so positions and IDs are known up front.

#[cfg(test)]
mod helpers {
    use rts_core::{BodyId, BodyKind, Vec3};

    use crate::BodyStore;

    /// A small world:
    ///
    ///   0: tree    at (5, 0, 0)
    ///   1: rock    at (0, 0, 5)
    ///   2: terrain at (0, 0, 0)   (never an obstacle)
    ///   3: player  at (20, 0, 0)
    ///   4: agent   at (-5, 0, 0)
    pub fn small_world() -> (BodyStore, [BodyId; 5]) {
        let mut s = BodyStore::new();
        let tree = s.add_fixed(BodyKind::Tree, Vec3::new(5.0, 0.0, 0.0));
        let rock = s.add_fixed(BodyKind::Rock, Vec3::new(0.0, 0.0, 5.0));
        let terrain = s.add_fixed(BodyKind::Terrain, Vec3::ZERO);
        let player = s.add_dynamic(BodyKind::Player, Vec3::new(20.0, 0.0, 0.0));
        let agent = s.add_dynamic(BodyKind::Agent, Vec3::new(-5.0, 0.0, 0.0));
        (s, [tree, rock, terrain, player, agent])
    }
}

// ── Body store ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod body {
    use rts_core::{BodyId, BodyKind, Vec3};

    use crate::BodyStore;

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let mut s = BodyStore::new();
        let a = s.add_fixed(BodyKind::Tree, Vec3::ZERO);
        let b = s.add_dynamic(BodyKind::Agent, Vec3::ONE);
        assert_eq!(a, BodyId(0));
        assert_eq!(b, BodyId(1));

        assert!(s.remove(a).is_some());
        let c = s.add_fixed(BodyKind::Rock, Vec3::ZERO);
        assert_eq!(c, BodyId(2));
        assert!(!s.contains(a));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn static_and_dynamic_flags() {
        let mut s = BodyStore::new();
        let tree = s.add_fixed(BodyKind::Tree, Vec3::ZERO);
        let drone = s.add_dynamic(BodyKind::Agent, Vec3::ZERO);
        assert!(s.get(tree).unwrap().is_static);
        let d = s.get(drone).unwrap();
        assert!(!d.is_static);
        assert!(d.fixed_rotation);
        assert_eq!(d.velocity, Vec3::ZERO);
    }

    #[test]
    fn remove_twice_is_none() {
        let mut s = BodyStore::new();
        let id = s.add_fixed(BodyKind::Tree, Vec3::ZERO);
        assert!(s.remove(id).is_some());
        assert!(s.remove(id).is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn iteration_is_ordered_by_id() {
        let (s, ids) = super::helpers::small_world();
        let seen: Vec<BodyId> = s.iter().map(|b| b.id).collect();
        assert_eq!(seen, ids.to_vec());
    }

    #[test]
    fn velocity_writes_are_visible() {
        let mut s = BodyStore::new();
        let id = s.add_dynamic(BodyKind::Agent, Vec3::ZERO);
        s.get_mut(id).unwrap().velocity = Vec3::new(5.0, 0.0, 0.0);
        assert_eq!(s.get(id).unwrap().velocity.x, 5.0);
        assert_eq!(s.position(id), Some(Vec3::ZERO));
    }
}

// ── Obstacle index ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod obstacle {
    use rts_core::{BodyKind, Vec3};

    use super::helpers::small_world;
    use crate::{BodyStore, ObstacleIndex};

    #[test]
    fn terrain_is_not_indexed() {
        let (s, _) = small_world();
        let idx = ObstacleIndex::build(&s);
        assert_eq!(idx.len(), 4);
    }

    #[test]
    fn empty_index_is_clear_everywhere() {
        let idx = ObstacleIndex::empty();
        assert!(idx.is_empty());
        assert!(idx.is_clear(Vec3::ZERO, 100.0, &[]));
    }

    #[test]
    fn radius_is_strict() {
        let (s, [tree, ..]) = small_world();
        let idx = ObstacleIndex::build(&s);
        // Tree sits at x = 5; a probe at x = 3 is exactly 2.0 away.
        let probe = Vec3::new(3.0, 0.0, 0.0);
        assert!(idx.is_clear(probe, 2.0, &[]));
        assert_eq!(idx.nearest_within(probe, 2.01, &[]), Some(tree));
    }

    #[test]
    fn distance_ignores_height() {
        let (s, [tree, ..]) = small_world();
        let idx = ObstacleIndex::build(&s);
        let probe = Vec3::new(4.0, 50.0, 0.0);
        assert_eq!(idx.nearest_within(probe, 2.0, &[]), Some(tree));
    }

    #[test]
    fn exclusions_are_skipped() {
        let (s, [tree, _, _, _, agent]) = small_world();
        let idx = ObstacleIndex::build(&s);
        let probe = Vec3::new(4.0, 0.0, 0.0);
        assert!(idx.is_clear(probe, 2.0, &[tree]));
        assert!(idx.is_clear(Vec3::new(-5.0, 0.0, 0.0), 1.0, &[agent]));
        assert!(!idx.is_clear(Vec3::new(-5.0, 0.0, 0.0), 1.0, &[]));
    }

    #[test]
    fn ties_go_to_lower_id() {
        let mut s = BodyStore::new();
        let a = s.add_fixed(BodyKind::Rock, Vec3::new(1.0, 0.0, 0.0));
        let _b = s.add_fixed(BodyKind::Rock, Vec3::new(-1.0, 0.0, 0.0));
        let idx = ObstacleIndex::build(&s);
        assert_eq!(idx.nearest_within(Vec3::ZERO, 5.0, &[]), Some(a));
    }

    #[test]
    fn non_positive_radius_finds_nothing() {
        let (s, _) = small_world();
        let idx = ObstacleIndex::build(&s);
        assert!(idx.nearest_within(Vec3::new(5.0, 0.0, 0.0), 0.0, &[]).is_none());
    }

    #[test]
    fn snapshot_does_not_track_later_removals() {
        let (mut s, [tree, ..]) = small_world();
        let idx = ObstacleIndex::build(&s);
        s.remove(tree);
        assert!(!idx.is_clear(Vec3::new(5.0, 0.0, 0.0), 1.0, &[]));
        let rebuilt = ObstacleIndex::build(&s);
        assert!(rebuilt.is_clear(Vec3::new(5.0, 0.0, 0.0), 1.0, &[]));
    }
}

// ── Terrain ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod terrain {
    use crate::{FlatTerrain, GridTerrain, HeightField, SpatialError};

    #[test]
    fn flat_is_constant() {
        let t = FlatTerrain::new(2.5);
        assert_eq!(t.height_at(0.0, 0.0), 2.5);
        assert_eq!(t.height_at(-1e6, 1e6), 2.5);
    }

    #[test]
    fn grid_lookup_snaps_to_cell_corner() {
        // 2×2 cells over [-10, 10]²; vertex (gx, gz) holds gx + 10·gz.
        let heights: Vec<f32> = (0..3)
            .flat_map(|gz| (0..3).map(move |gx| (gx + 10 * gz) as f32))
            .collect();
        let t = GridTerrain::new(20.0, 20.0, 2, heights).unwrap();
        assert_eq!(t.height_at(-9.0, -9.0), 0.0);
        assert_eq!(t.height_at(1.0, -9.0), 1.0);
        assert_eq!(t.height_at(-9.0, 1.0), 10.0);
        assert_eq!(t.height_at(9.9, 9.9), 11.0);
    }

    #[test]
    fn grid_out_of_bounds_reads_zero() {
        let t = GridTerrain::from_fn(20.0, 20.0, 4, |_, _| 7.0).unwrap();
        assert_eq!(t.height_at(0.0, 0.0), 7.0);
        assert_eq!(t.height_at(-11.0, 0.0), 0.0);
        assert_eq!(t.height_at(0.0, 10.0), 0.0);
        assert_eq!(t.height_at(f32::NAN, 0.0), 0.0);
    }

    #[test]
    fn grid_from_fn_samples_vertices() {
        let t = GridTerrain::from_fn(10.0, 10.0, 2, |x, z| x + z).unwrap();
        // Lower-left vertex of the grid is (-5, -5).
        assert_eq!(t.height_at(-4.0, -4.0), -10.0);
        assert_eq!(t.segments(), 2);
        assert_eq!(t.width(), 10.0);
    }

    #[test]
    fn grid_rejects_wrong_sample_count() {
        let err = GridTerrain::new(10.0, 10.0, 2, vec![0.0; 8]).unwrap_err();
        assert!(matches!(err, SpatialError::GridSize { expected: 9, got: 8, .. }));
    }

    #[test]
    fn grid_rejects_non_positive_extent() {
        let err = GridTerrain::new(0.0, 10.0, 1, vec![0.0; 4]).unwrap_err();
        assert!(matches!(err, SpatialError::Extent { .. }));
    }
}
