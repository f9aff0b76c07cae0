//! Unit tests for rts-mobility.

use rts_core::{BodyKind, Vec3};
use rts_spatial::BodyStore;

use crate::{KinematicStep, MobilityEngine, MobilityError, PathStore, PhysicsStep, ScriptedPath};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

/// A tree at the origin and a player at (10, 0, 0).
fn two_bodies() -> (BodyStore, rts_core::BodyId, rts_core::BodyId) {
    let mut bodies = BodyStore::new();
    let tree = bodies.add_fixed(BodyKind::Tree, Vec3::ZERO);
    let player = bodies.add_dynamic(BodyKind::Player, Vec3::new(10.0, 0.0, 0.0));
    (bodies, tree, player)
}

// ── KinematicStep ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod kinematic {
    use super::*;

    #[test]
    fn moves_dynamic_bodies_by_velocity() {
        let (mut bodies, _, player) = two_bodies();
        bodies.get_mut(player).unwrap().velocity = Vec3::new(2.0, 1.0, -4.0);
        let moved = KinematicStep.step(&mut bodies, 0.5).unwrap();
        assert_eq!(moved, 1);
        assert!(approx(bodies.position(player).unwrap(), Vec3::new(11.0, 0.5, -2.0)));
    }

    #[test]
    fn static_bodies_stay_put_even_with_velocity() {
        let (mut bodies, tree, _) = two_bodies();
        bodies.get_mut(tree).unwrap().velocity = Vec3::X;
        KinematicStep.step(&mut bodies, 1.0).unwrap();
        assert_eq!(bodies.position(tree), Some(Vec3::ZERO));
    }

    #[test]
    fn zero_velocity_counts_as_not_moved() {
        let (mut bodies, _, _) = two_bodies();
        assert_eq!(KinematicStep.step(&mut bodies, 1.0).unwrap(), 0);
    }

    #[test]
    fn rejects_negative_and_nan_dt() {
        let (mut bodies, _, _) = two_bodies();
        assert!(matches!(KinematicStep.step(&mut bodies, -0.1), Err(MobilityError::InvalidStep(_))));
        assert!(matches!(KinematicStep.step(&mut bodies, f32::NAN), Err(MobilityError::InvalidStep(_))));
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let (mut bodies, _, player) = two_bodies();
        bodies.get_mut(player).unwrap().velocity = Vec3::X;
        assert_eq!(KinematicStep.step(&mut bodies, 0.0).unwrap(), 0);
        assert_eq!(bodies.position(player), Some(Vec3::new(10.0, 0.0, 0.0)));
    }
}

// ── ScriptedPath ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod scripted_path {
    use super::*;

    #[test]
    fn validates_construction() {
        assert!(matches!(ScriptedPath::new(vec![], 1.0), Err(MobilityError::EmptyPath)));
        assert!(matches!(ScriptedPath::new(vec![Vec3::X], 0.0), Err(MobilityError::InvalidSpeed(_))));
        assert!(matches!(ScriptedPath::new(vec![Vec3::X], f32::INFINITY), Err(MobilityError::InvalidSpeed(_))));
    }

    #[test]
    fn heads_to_current_waypoint_at_speed() {
        let mut path = ScriptedPath::new(vec![Vec3::new(0.0, 0.0, 10.0)], 3.0).unwrap();
        let v = path.velocity(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
        assert!(approx(v, Vec3::new(0.0, -1.0, 3.0)), "vertical kept, got {v:?}");
    }

    #[test]
    fn advances_and_stops_at_the_end() {
        let a = Vec3::new(5.0, 0.0, 0.0);
        let b = Vec3::new(5.0, 0.0, 5.0);
        let mut path = ScriptedPath::new(vec![a, b], 1.0).unwrap();

        let v = path.velocity(a, Vec3::ZERO);
        assert_eq!(path.current(), Some(b));
        assert!(approx(v, Vec3::Z));

        let v = path.velocity(b, Vec3::ZERO);
        assert!(path.is_finished());
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn looping_path_wraps_to_start() {
        let a = Vec3::new(5.0, 0.0, 0.0);
        let b = Vec3::new(-5.0, 0.0, 0.0);
        let mut path = ScriptedPath::new(vec![a, b], 2.0).unwrap().looping();
        path.velocity(a, Vec3::ZERO);
        let v = path.velocity(b, Vec3::ZERO);
        assert_eq!(path.current(), Some(a));
        assert!(approx(v, Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn looping_path_with_every_waypoint_in_reach_halts() {
        let mut path = ScriptedPath::new(vec![Vec3::ZERO, Vec3::ZERO], 2.0).unwrap().looping();
        let v = path.velocity(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(v, Vec3::ZERO);
        assert!(!path.is_finished());
    }
}

// ── PathStore / MobilityEngine ────────────────────────────────────────────────

#[cfg(test)]
mod engine {
    use super::*;

    #[test]
    fn attach_rejects_static_and_missing_bodies() {
        let (bodies, tree, _) = two_bodies();
        let mut paths = PathStore::new();
        let path = ScriptedPath::new(vec![Vec3::X], 1.0).unwrap();
        assert!(matches!(
            paths.attach(&bodies, tree, path.clone()),
            Err(MobilityError::StaticBody(id)) if id == tree
        ));
        assert!(matches!(
            paths.attach(&bodies, rts_core::BodyId(99), path),
            Err(MobilityError::BodyNotFound(_))
        ));
        assert!(paths.is_empty());
    }

    #[test]
    fn drive_drops_paths_of_removed_bodies() {
        let (mut bodies, _, player) = two_bodies();
        let mut paths = PathStore::new();
        paths.attach(&bodies, player, ScriptedPath::new(vec![Vec3::ZERO], 1.0).unwrap()).unwrap();
        assert_eq!(paths.drive(&mut bodies), 1);
        bodies.remove(player);
        assert_eq!(paths.drive(&mut bodies), 0);
        assert!(paths.get(player).is_none());
    }

    #[test]
    fn engine_drives_then_integrates() {
        let (mut bodies, _, player) = two_bodies();
        let mut engine = MobilityEngine::new(KinematicStep);
        engine
            .paths
            .attach(&bodies, player, ScriptedPath::new(vec![Vec3::new(20.0, 0.0, 0.0)], 4.0).unwrap())
            .unwrap();

        let moved = engine.step(&mut bodies, 0.25).unwrap();
        assert_eq!(moved, 1);
        assert!(approx(bodies.position(player).unwrap(), Vec3::new(11.0, 0.0, 0.0)));
    }

    #[test]
    fn engine_integrates_agent_velocities_without_paths() {
        let mut bodies = BodyStore::new();
        let drone = bodies.add_dynamic(BodyKind::Agent, Vec3::ZERO);
        bodies.get_mut(drone).unwrap().velocity = Vec3::new(5.0, 0.0, 0.0);
        let mut engine = MobilityEngine::new(KinematicStep);
        engine.step(&mut bodies, 0.1).unwrap();
        assert!(approx(bodies.position(drone).unwrap(), Vec3::new(0.5, 0.0, 0.0)));
    }
}
