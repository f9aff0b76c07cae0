//! Integration tests for rts-sim.

use rts_agent::{Role, TaskState};
use rts_core::planar::horizontal_distance;
use rts_core::{AgentId, Frame, ResourceKind, SimConfig, Vec3};
use rts_mobility::{KinematicStep, MobilityError, ScriptedPath};
use rts_resource::{ClusterLayout, ResourceError, Stockpile};
use rts_spatial::FlatTerrain;

use crate::{FrameStats, NoopObserver, ScenarioConfig, Sim, SimBuilder, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 1/16 s frames keep every decision time exactly representable.
const DT: f32 = 0.0625;

fn scenario(drones: usize, jitter: f32) -> ScenarioConfig {
    ScenarioConfig {
        sim: SimConfig {
            seed:                     7,
            frame_dt_secs:            DT,
            total_frames:             160,
            snapshot_interval_frames: 16,
        },
        drones_per_depot: drones,
        spawn_jitter: jitter,
        ..ScenarioConfig::default()
    }
}

fn build(scenario: ScenarioConfig) -> Sim<KinematicStep> {
    SimBuilder::new(scenario, KinematicStep).build().unwrap()
}

fn only_agent(sim: &Sim<KinematicStep>) -> AgentId {
    sim.agents.ids()[0]
}

fn agent_position(sim: &Sim<KinematicStep>, id: AgentId) -> Vec3 {
    let body = sim.agents.get(id).unwrap().body;
    sim.bodies.position(body).unwrap()
}

/// Step until `done` holds or `max_frames` pass.  Returns whether it held.
fn step_until(sim: &mut Sim<KinematicStep>, max_frames: usize, mut done: impl FnMut(&Sim<KinematicStep>) -> bool) -> bool {
    for _ in 0..max_frames {
        sim.step(DT).unwrap();
        if done(sim) {
            return true;
        }
    }
    false
}

#[derive(Default)]
struct Recorder {
    starts:    usize,
    ends:      Vec<FrameStats>,
    snapshots: Vec<(Frame, usize)>,
    finished:  Option<Frame>,
}

impl SimObserver for Recorder {
    fn on_frame_start(&mut self, _frame: Frame) {
        self.starts += 1;
    }

    fn on_frame_end(&mut self, stats: &FrameStats) {
        self.ends.push(*stats);
    }

    fn on_snapshot(&mut self, frame: Frame, agents: &rts_agent::AgentStore, _bodies: &rts_spatial::BodyStore) {
        self.snapshots.push((frame, agents.len()));
    }

    fn on_sim_end(&mut self, final_frame: Frame) {
        self.finished = Some(final_frame);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_empty_world() {
        let sim = build(scenario(4, 10.0));
        assert!(sim.agents.is_empty());
        assert!(sim.bodies.is_empty());
        assert!(sim.registry.is_empty());
        assert_eq!(sim.depots.stockpile(), Stockpile::STARTING);
        assert_eq!(sim.clock.frame, Frame::ZERO);
    }

    #[test]
    fn zero_frame_dt_is_rejected() {
        let mut s = scenario(4, 10.0);
        s.sim.frame_dt_secs = 0.0;
        let result = SimBuilder::new(s, KinematicStep).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn negative_jitter_is_rejected() {
        let result = SimBuilder::new(scenario(4, -1.0), KinematicStep).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn invalid_behavior_params_are_rejected() {
        let mut s = scenario(4, 10.0);
        s.harvest.chunk = 0;
        assert!(matches!(SimBuilder::new(s, KinematicStep).build(), Err(SimError::Behavior(_))));
    }

    #[test]
    fn clusters_are_generated_deterministically() {
        let mut s = scenario(0, 10.0);
        s.clusters = Some(ClusterLayout { clusters: 2, ..ClusterLayout::default() });
        let a = build(s.clone());
        let b = build(s);
        assert_eq!(a.registry.len(), 28);
        assert_eq!(a.bodies.len(), 28);
        let pa: Vec<Vec3> = a.registry.iter().map(|n| n.position).collect();
        let pb: Vec<Vec3> = b.registry.iter().map(|n| n.position).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn nodes_sit_on_the_terrain() {
        let mut sim = SimBuilder::new(scenario(0, 0.0), KinematicStep)
            .terrain(FlatTerrain::new(4.0))
            .build()
            .unwrap();
        let node = sim.add_node(ResourceKind::Stone, 3.0, -2.0, 50);
        assert_eq!(sim.registry.get(node).unwrap().position, Vec3::new(3.0, 4.0, -2.0));
    }
}

// ── Spawning and building ─────────────────────────────────────────────────────

#[cfg(test)]
mod spawn_tests {
    use super::*;

    #[test]
    fn placed_depot_spawns_hovering_drones_nearby() {
        let mut sim = build(scenario(4, 10.0));
        let depot = sim.place_depot(50.0, -20.0).unwrap();
        assert_eq!(sim.agents.len(), 4);
        let anchor = Vec3::new(50.0, 0.0, -20.0);
        for agent in sim.agents.iter() {
            assert_eq!(agent.role, Role::Worker { depot });
            let p = sim.bodies.position(agent.body).unwrap();
            assert!((p.x - anchor.x).abs() <= 10.0 && (p.z - anchor.z).abs() <= 10.0, "{p:?}");
            assert_eq!(p.y, 1.0, "worker spawns at its hover height");
        }
    }

    #[test]
    fn build_depot_spends_the_stockpile() {
        let mut sim = build(scenario(1, 10.0));
        sim.build_depot(0.0, 0.0).unwrap();
        assert_eq!(sim.depots.stockpile(), Stockpile::new(0, 0));

        let second = sim.build_depot(40.0, 0.0);
        assert!(matches!(second, Err(SimError::Resource(ResourceError::Insufficient { .. }))));
        assert_eq!(sim.depots.len(), 1);
        assert_eq!(sim.agents.len(), 1);
    }

    #[test]
    fn barrack_spawns_a_cohort_of_soldiers() {
        let mut sim = build(scenario(0, 10.0));
        let cohort = sim.build_barrack(0.0, 0.0, 3).unwrap();
        assert_eq!(sim.depots.stockpile(), Stockpile::new(50, 50));
        assert_eq!(sim.cohorts.get(cohort).unwrap().len(), 3);
        for agent in sim.agents.iter() {
            assert_eq!(agent.role, Role::Soldier);
            assert_eq!(agent.cohort, Some(cohort));
            assert_eq!(sim.bodies.position(agent.body).unwrap().y, 3.0);
        }
    }

    #[test]
    fn unknown_depot_and_cohort_are_errors() {
        let mut sim = build(scenario(0, 10.0));
        assert!(matches!(sim.spawn_worker(rts_core::DepotId(3)), Err(SimError::UnknownDepot(_))));
        assert!(matches!(
            sim.spawn_soldier(rts_core::CohortId(9), 0.0, 0.0),
            Err(SimError::UnknownCohort(_))
        ));
        assert!(sim.agents.is_empty());
    }

    #[test]
    fn static_bodies_cannot_follow_paths() {
        let mut sim = build(scenario(0, 0.0));
        let node = sim.add_node(ResourceKind::Wood, 5.0, 5.0, 10);
        let body = sim.registry.get(node).unwrap().body;
        let path = ScriptedPath::new(vec![Vec3::ZERO], 1.0).unwrap();
        assert!(matches!(sim.follow_path(body, path), Err(SimError::Mobility(MobilityError::StaticBody(_)))));
    }
}

// ── Despawn ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod despawn_tests {
    use super::*;

    #[test]
    fn despawn_releases_the_reservation() {
        let mut sim = build(scenario(1, 0.0));
        let node = sim.add_node(ResourceKind::Wood, 20.0, 0.0, 100);
        sim.place_depot(0.0, 0.0).unwrap();
        let worker = only_agent(&sim);
        let body = sim.agents.get(worker).unwrap().body;

        sim.step(DT).unwrap();
        assert!(sim.registry.is_reserved(node), "first decision claims immediately");

        sim.despawn(worker).unwrap();
        assert!(!sim.registry.is_reserved(node));
        assert!(!sim.agents.contains(worker));
        assert!(!sim.bodies.contains(body));
        assert!(matches!(sim.despawn(worker), Err(SimError::UnknownAgent(_))));
    }

    #[test]
    fn released_node_is_claimed_by_another_worker() {
        let mut sim = build(scenario(1, 0.0));
        let node = sim.add_node(ResourceKind::Wood, 20.0, 0.0, 100);
        let depot = sim.place_depot(0.0, 0.0).unwrap();
        sim.step(DT).unwrap();
        sim.despawn(only_agent(&sim)).unwrap();

        let replacement = sim.spawn_worker(depot).unwrap();
        sim.step(DT).unwrap();
        assert_eq!(sim.agents.get(replacement).unwrap().resource_target(), Some(node));
    }

    #[test]
    fn despawned_soldier_leaves_its_cohort() {
        let mut sim = build(scenario(0, 10.0));
        let cohort = sim.build_barrack(0.0, 0.0, 2).unwrap();
        let first = sim.agents.ids()[0];
        sim.despawn(first).unwrap();
        let members: Vec<AgentId> = sim.cohorts.get(cohort).unwrap().members().collect();
        assert_eq!(members.len(), 1);
        assert!(!members.contains(&first));
    }
}

// ── Frame loop ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loop_tests {
    use super::*;

    #[test]
    fn worker_harvests_and_delivers() {
        let mut sim = build(scenario(1, 0.0));
        let node = sim.add_node(ResourceKind::Wood, 20.0, 0.0, 100);
        let depot = sim.place_depot(0.0, 0.0).unwrap();
        let worker = only_agent(&sim);

        let reached = step_until(&mut sim, 200, |s| s.agents.get(worker).unwrap().state == TaskState::Harvesting);
        assert!(reached);
        let at = agent_position(&sim, worker);
        assert!(at.x > 10.0 && at.x < 11.6, "stops just inside the interaction radius, x = {}", at.x);
        assert!(at.z.abs() < 1e-4);

        let delivered = step_until(&mut sim, 400, |s| s.depots.get(depot).unwrap().delivered.wood > 0);
        assert!(delivered);
        assert_eq!(sim.depots.get(depot).unwrap().delivered.wood, 8);
        assert_eq!(sim.depots.stockpile().wood, 108);
        assert_eq!(sim.registry.get(node).unwrap().amount, 92);

        let agent = sim.agents.get(worker).unwrap();
        assert!(agent.payload.is_none());
        assert_eq!(agent.resource_target(), Some(node), "goes straight back to the same node");
    }

    #[test]
    fn depleted_node_body_leaves_the_world() {
        let mut sim = build(scenario(1, 0.0));
        let node = sim.add_node(ResourceKind::Stone, 20.0, 0.0, 8);
        let node_body = sim.registry.get(node).unwrap().body;
        sim.place_depot(0.0, 0.0).unwrap();
        let worker = only_agent(&sim);

        assert!(step_until(&mut sim, 600, |s| !s.registry.contains(node)));
        assert!(!sim.bodies.contains(node_body), "removed in the same frame");
        assert_eq!(sim.agents.get(worker).unwrap().carrying(), 8);

        assert!(step_until(&mut sim, 400, |s| s.agents.get(worker).unwrap().state == TaskState::Idle));
        assert_eq!(sim.depots.stockpile().stone, 108);
    }

    #[test]
    fn soldier_chases_and_holds_at_range() {
        let mut sim = build(scenario(0, 0.0));
        sim.build_barrack(0.0, 0.0, 1).unwrap();
        let player = sim.add_player(30.0, 0.0);
        let soldier = only_agent(&sim);

        assert!(step_until(&mut sim, 400, |s| s.agents.get(soldier).unwrap().state == TaskState::Engaging));
        let gap = horizontal_distance(agent_position(&sim, soldier), sim.bodies.position(player).unwrap());
        assert!(gap <= 5.0, "gap {gap}");

        let before = agent_position(&sim, soldier);
        for _ in 0..8 {
            sim.step(DT).unwrap();
        }
        let after = agent_position(&sim, soldier);
        assert!(horizontal_distance(before, after) < 1e-4, "holds position while engaging");
    }

    #[test]
    fn soldier_resumes_chase_when_player_walks_off() {
        let mut sim = build(scenario(0, 0.0));
        sim.build_barrack(0.0, 0.0, 1).unwrap();
        let player = sim.add_player(30.0, 0.0);
        let soldier = only_agent(&sim);
        assert!(step_until(&mut sim, 400, |s| s.agents.get(soldier).unwrap().state == TaskState::Engaging));

        let path = ScriptedPath::new(vec![Vec3::new(80.0, 0.0, 0.0)], 2.0).unwrap();
        sim.follow_path(player, path).unwrap();
        assert!(step_until(&mut sim, 200, |s| {
            s.agents.get(soldier).unwrap().state == TaskState::TravelingToTarget
        }));
        assert!(step_until(&mut sim, 2000, |s| s.agents.get(soldier).unwrap().state == TaskState::Engaging));
        let gap = horizontal_distance(agent_position(&sim, soldier), sim.bodies.position(player).unwrap());
        assert!(gap <= 5.0);
    }

    #[test]
    fn soldier_goes_idle_when_player_is_removed() {
        let mut sim = build(scenario(0, 0.0));
        sim.build_barrack(0.0, 0.0, 1).unwrap();
        let player = sim.add_player(30.0, 0.0);
        let soldier = only_agent(&sim);
        sim.step(DT).unwrap();
        assert_eq!(sim.agents.get(soldier).unwrap().body_target(), Some(player));

        sim.bodies.remove(player);
        assert!(step_until(&mut sim, 10, |s| s.agents.get(soldier).unwrap().state == TaskState::Idle));
        assert_eq!(sim.agents.get(soldier).unwrap().target, None);
    }

    #[test]
    fn invalid_dt_fails_without_advancing() {
        let mut sim = build(scenario(1, 0.0));
        sim.place_depot(0.0, 0.0).unwrap();
        let result = sim.step(-1.0);
        assert!(matches!(result, Err(SimError::Mobility(MobilityError::InvalidStep(_)))));
        assert_eq!(sim.clock.frame, Frame::ZERO);
    }

    #[test]
    fn missing_agent_body_skips_decision() {
        let mut sim = build(scenario(1, 0.0));
        sim.place_depot(0.0, 0.0).unwrap();
        let worker = only_agent(&sim);
        let body = sim.agents.get(worker).unwrap().body;
        sim.bodies.remove(body);
        assert_eq!(sim.step(DT).unwrap(), 0);
        assert_eq!(sim.agents.get(worker).unwrap().last_decision, None);
    }

    #[test]
    fn bodiless_worker_frees_its_node() {
        let mut sim = build(scenario(2, 0.0));
        let node = sim.add_node(ResourceKind::Wood, 40.0, 0.0, 100);
        sim.place_depot(0.0, 0.0).unwrap();
        let (holder, other) = (sim.agents.ids()[0], sim.agents.ids()[1]);

        sim.step(DT).unwrap();
        assert_eq!(sim.agents.get(holder).unwrap().resource_target(), Some(node));
        assert_eq!(sim.agents.get(other).unwrap().state, TaskState::Idle);

        let body = sim.agents.get(holder).unwrap().body;
        sim.bodies.remove(body);
        sim.step(DT).unwrap();
        assert_eq!(sim.registry.reserved_count(), 0);
        assert_eq!(sim.agents.get(holder).unwrap().target, None);

        assert!(step_until(&mut sim, 20, |s| s.agents.get(other).unwrap().resource_target() == Some(node)));
        assert_eq!(sim.registry.reserved_count(), 1);
    }

    #[test]
    fn velocity_takes_effect_on_the_next_frame() {
        let mut sim = build(scenario(1, 0.0));
        sim.add_node(ResourceKind::Wood, 20.0, 0.0, 100);
        sim.place_depot(0.0, 0.0).unwrap();
        let worker = only_agent(&sim);
        let body = sim.agents.get(worker).unwrap().body;
        let spawn = agent_position(&sim, worker);

        sim.step(DT).unwrap();
        let v = sim.bodies.get(body).unwrap().velocity;
        assert!(v.length() > 0.0, "first decision commands a velocity");
        assert_eq!(agent_position(&sim, worker), spawn, "but the body has not moved yet");

        sim.step(DT).unwrap();
        let moved = agent_position(&sim, worker) - spawn;
        assert!((moved - v * DT).length() < 1e-5, "moved {moved:?}, expected {:?}", v * DT);
    }

    #[test]
    fn removed_node_takes_its_body_along() {
        let mut sim = build(scenario(1, 0.0));
        let first = sim.add_node(ResourceKind::Wood, 20.0, 0.0, 100);
        let second = sim.add_node(ResourceKind::Stone, 0.0, -30.0, 100);
        let first_body = sim.registry.get(first).unwrap().body;
        sim.place_depot(0.0, 0.0).unwrap();
        let worker = only_agent(&sim);
        sim.step(DT).unwrap();
        assert_eq!(sim.agents.get(worker).unwrap().resource_target(), Some(first));

        sim.remove_node(first).unwrap();
        assert!(!sim.registry.contains(first));
        assert!(!sim.bodies.contains(first_body));
        assert!(matches!(sim.remove_node(first), Err(SimError::UnknownNode(_))));

        assert!(step_until(&mut sim, 20, |s| s.agents.get(worker).unwrap().resource_target() == Some(second)));
        assert_eq!(sim.agents.get(worker).unwrap().state, TaskState::TravelingToTarget);
    }

    #[test]
    fn same_seed_same_world() {
        let run = || {
            let mut s = scenario(4, 10.0);
            s.clusters = Some(ClusterLayout { clusters: 2, map_width: 200.0, map_depth: 200.0, ..ClusterLayout::default() });
            let mut sim = build(s);
            sim.place_depot(0.0, 0.0).unwrap();
            sim.place_depot(60.0, 60.0).unwrap();
            sim.run_frames(400, &mut NoopObserver).unwrap();
            let positions: Vec<Vec3> = sim.bodies.iter().map(|b| b.position).collect();
            (positions, sim.depots.stockpile(), sim.registry.reserved_count())
        };
        assert_eq!(run(), run());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[test]
    fn run_reports_every_frame_and_snapshot() {
        let mut s = scenario(2, 5.0);
        s.sim.total_frames = 40;
        s.sim.snapshot_interval_frames = 10;
        let mut sim = build(s);
        sim.place_depot(0.0, 0.0).unwrap();

        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.starts, 40);
        assert_eq!(rec.ends.len(), 40);
        assert_eq!(rec.snapshots, vec![(Frame(10), 2), (Frame(20), 2), (Frame(30), 2), (Frame(40), 2)]);
        assert_eq!(rec.finished, Some(Frame(40)));

        let first = rec.ends[0];
        assert_eq!(first.frame, Frame(1));
        assert_eq!(first.decisions, 2, "first decision is immediate");
        assert_eq!(first.stockpile, Stockpile::STARTING);
    }

    #[test]
    fn run_stops_at_end_frame() {
        let mut s = scenario(0, 0.0);
        s.sim.total_frames = 5;
        let mut sim = build(s);
        sim.run(&mut NoopObserver).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.clock.frame, Frame(5));
        assert!((sim.clock.now.secs() - 5.0 * DT as f64).abs() < 1e-9);
    }

    #[test]
    fn snapshots_disabled_at_zero_interval() {
        let mut s = scenario(1, 0.0);
        s.sim.snapshot_interval_frames = 0;
        let mut sim = build(s);
        let mut rec = Recorder::default();
        sim.run_frames(20, &mut rec).unwrap();
        assert!(rec.snapshots.is_empty());
        assert!(rec.finished.is_none(), "run_frames does not end the sim");
    }
}

// ── Scenario JSON ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "serde"))]
mod scenario_json {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let s = ScenarioConfig::from_json(r#"{ "drones_per_depot": 2, "harvest": { "chunk": 4 } }"#).unwrap();
        assert_eq!(s.drones_per_depot, 2);
        assert_eq!(s.harvest.chunk, 4);
        assert_eq!(s.harvest.interaction_radius, 10.0);
        assert_eq!(s.engage.engage_range, 5.0);
        assert_eq!(s.sim.seed, 42);
    }

    #[test]
    fn invalid_values_are_rejected_after_parsing() {
        let result = ScenarioConfig::from_json(r#"{ "harvest": { "chunk": 0 } }"#);
        assert!(matches!(result, Err(SimError::Behavior(_))));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(ScenarioConfig::from_json("{ nope"), Err(SimError::Json(_))));
    }
}

