//! The `Sim` struct and its frame loop.

use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use rts_agent::{AgentBuilder, AgentStore, CohortStore, Role, TaskState};
use rts_behavior::{EngageTask, HarvestTask, HoverPolicy, TaskMachine, TickContext};
use rts_core::{AgentId, BodyId, BodyKind, CohortId, DepotId, NodeId, ResourceKind, SimClock, SimConfig, SimRng, Vec3};
use rts_mobility::{MobilityEngine, PhysicsStep, ScriptedPath};
use rts_resource::{BuildCost, DepotStore, ResourceRegistry, load_nodes_csv};
use rts_spatial::{BodyStore, HeightField, ObstacleIndex};

use crate::{FrameStats, ScenarioConfig, SimError, SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<P>` holds all world state and drives the five-phase frame loop:
///
/// 1. **Physics**: scripted bodies are steered, then the [`PhysicsStep`]
///    integrates the velocities agents wrote last frame.
/// 2. **Clock**: simulated time advances by `dt`.
/// 3. **Snapshots**: pending removals are flushed, then the obstacle index,
///    the hostile list and per-cohort peer positions are rebuilt.
/// 4. **Decisions** (sequential, ascending `AgentId`): each agent whose
///    decision is due runs its task machine against the shared registry
///    and depots.
/// 5. **Removals**: bodies queued during decisions (depleted nodes) leave
///    the world.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: PhysicsStep> {
    /// Frame timing and seed.
    pub config: SimConfig,

    /// Behavior tuning and setup options the sim was built with.
    pub scenario: ScenarioConfig,

    pub clock: SimClock,

    /// Spawn-jitter stream.
    pub rng: SimRng,

    /// Every rigid body: agents, nodes, buildings, the player.
    pub bodies: BodyStore,

    pub agents: AgentStore,

    /// Soldier groups sharing a separation peer set.
    pub cohorts: CohortStore,

    /// The shared target reservation registry.
    pub registry: ResourceRegistry,

    /// Depots and the shared stockpile.
    pub depots: DepotStore,

    pub terrain: Box<dyn HeightField>,

    /// Integrator plus scripted paths.
    pub mobility: MobilityEngine<P>,

    /// Task machine for worker drones.
    pub workers: TaskMachine<HarvestTask>,

    /// Task machine for soldiers.
    pub soldiers: TaskMachine<EngageTask>,

    pub(crate) obstacles: ObstacleIndex,
    pub(crate) hostiles:  Vec<(BodyId, Vec3)>,
    pub(crate) peers:     FxHashMap<CohortId, Vec<(AgentId, Vec3)>>,
    pub(crate) removals:  Vec<BodyId>,
}

impl<P: PhysicsStep> Sim<P> {
    // ── World setup ───────────────────────────────────────────────────────

    /// Register a resource node at `(x, z)` on the ground, backed by a static
    /// body.
    pub fn add_node(&mut self, kind: ResourceKind, x: f32, z: f32, amount: u32) -> NodeId {
        let position = Vec3::new(x, self.terrain.height_at(x, z), z);
        let body = self.bodies.add_fixed(kind.body_kind(), position);
        self.registry.insert(kind, position, amount, body)
    }

    /// Load resource nodes from a `kind,x,z,amount` CSV file.
    pub fn load_nodes(&mut self, path: &Path) -> SimResult<usize> {
        let n = load_nodes_csv(path, self.terrain.as_ref(), &mut self.registry, &mut self.bodies)?;
        info!(nodes = n, path = %path.display(), "resource nodes loaded");
        Ok(n)
    }

    /// Remove a node and its body from the world.
    ///
    /// A worker holding the node re-seeks on its next decision.
    pub fn remove_node(&mut self, id: NodeId) -> SimResult<()> {
        let node = self.registry.remove(id).ok_or(SimError::UnknownNode(id))?;
        self.bodies.remove(node.body);
        info!(node = %id, "resource node removed");
        Ok(())
    }

    /// Add a hostile player body standing on the ground at `(x, z)`.
    pub fn add_player(&mut self, x: f32, z: f32) -> BodyId {
        let position = Vec3::new(x, self.terrain.height_at(x, z), z);
        self.bodies.add_dynamic(BodyKind::Player, position)
    }

    /// Make a dynamic body walk `path` every frame.
    pub fn follow_path(&mut self, body: BodyId, path: ScriptedPath) -> SimResult<()> {
        self.mobility.paths.attach(&self.bodies, body, path)?;
        Ok(())
    }

    /// Place a depot at `(x, z)` free of charge and spawn its drones.
    pub fn place_depot(&mut self, x: f32, z: f32) -> SimResult<DepotId> {
        let position = Vec3::new(x, self.terrain.height_at(x, z), z);
        let body = self.bodies.add_fixed(BodyKind::Building, position);
        let depot = self.depots.insert(position, body);
        info!(%depot, x, z, "depot placed");
        for _ in 0..self.scenario.drones_per_depot {
            self.spawn_worker(depot)?;
        }
        Ok(depot)
    }

    /// Pay for and place a depot.
    ///
    /// # Errors
    ///
    /// [`SimError::Resource`] when the stockpile cannot cover the cost; the
    /// stockpile is left unchanged.
    pub fn build_depot(&mut self, x: f32, z: f32) -> SimResult<DepotId> {
        self.depots.stockpile_mut().try_spend(BuildCost::COMMAND_CENTER)?;
        self.place_depot(x, z)
    }

    /// Pay for a barrack at `(x, z)` and spawn `soldiers` units around it
    /// into a new cohort.
    pub fn build_barrack(&mut self, x: f32, z: f32, soldiers: usize) -> SimResult<CohortId> {
        self.depots.stockpile_mut().try_spend(BuildCost::BARRACK)?;
        let position = Vec3::new(x, self.terrain.height_at(x, z), z);
        self.bodies.add_fixed(BodyKind::Building, position);
        let cohort = self.cohorts.create();
        info!(%cohort, x, z, soldiers, "barrack built");
        for _ in 0..soldiers {
            self.spawn_soldier(cohort, x, z)?;
        }
        Ok(cohort)
    }

    /// Spawn one worker near `depot`.
    pub fn spawn_worker(&mut self, depot: DepotId) -> SimResult<AgentId> {
        let anchor = self.depots.position(depot).ok_or(SimError::UnknownDepot(depot))?;
        let position = self.spawn_point(anchor, self.scenario.worker_hover);
        let body = self.bodies.add_dynamic(BodyKind::Agent, position);
        let id = self.agents.spawn(AgentBuilder::worker(body, depot));
        debug!(agent = %id, %depot, ?position, "worker spawned");
        Ok(id)
    }

    /// Spawn one soldier near `(x, z)` into `cohort`.
    pub fn spawn_soldier(&mut self, cohort: CohortId, x: f32, z: f32) -> SimResult<AgentId> {
        if self.cohorts.get(cohort).is_none() {
            return Err(SimError::UnknownCohort(cohort));
        }
        let anchor = Vec3::new(x, 0.0, z);
        let position = self.spawn_point(anchor, self.scenario.soldier_hover);
        let body = self.bodies.add_dynamic(BodyKind::Agent, position);
        let id = self.agents.spawn(AgentBuilder::soldier(body).cohort(cohort));
        self.cohorts.join(cohort, id);
        debug!(agent = %id, %cohort, ?position, "soldier spawned");
        Ok(id)
    }

    /// Remove an agent and its body from the world.
    ///
    /// Releases any reserved node and leaves the cohort before the body goes,
    /// so no target stays locked by an agent that no longer exists.  A
    /// payload in flight is discarded.
    pub fn despawn(&mut self, id: AgentId) -> SimResult<()> {
        let mut agent = self.agents.remove(id).ok_or(SimError::UnknownAgent(id))?;
        match agent.role {
            Role::Worker { .. } => self.workers.release(&mut agent, &mut self.registry),
            Role::Soldier => self.soldiers.release(&mut agent, &mut self.registry),
        }
        if let Some(cohort) = agent.cohort {
            self.cohorts.leave(cohort, id);
        }
        self.bodies.remove(agent.body);
        self.mobility.paths.detach(agent.body);
        info!(agent = %id, role = agent.role.as_str(), "agent despawned");
        Ok(())
    }

    /// A random point within the spawn square around `anchor`, at the height
    /// `hover` holds.
    fn spawn_point(&mut self, anchor: Vec3, hover: HoverPolicy) -> Vec3 {
        let x = anchor.x + self.rng.spread(self.scenario.spawn_jitter);
        let z = anchor.z + self.rng.spread(self.scenario.spawn_jitter);
        let y = hover
            .target_height(self.terrain.as_ref(), x, z)
            .unwrap_or_else(|| self.terrain.height_at(x, z));
        Vec3::new(x, y, z)
    }

    // ── Frame loop ────────────────────────────────────────────────────────

    /// Run the simulation from the current frame to `config.end_frame()`.
    ///
    /// Calls observer hooks at every frame boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let remaining = self.config.end_frame() - self.clock.frame.min(self.config.end_frame());
        self.run_frames(remaining, observer)?;
        observer.on_sim_end(self.clock.frame);
        Ok(())
    }

    /// Run exactly `n` frames of `config.frame_dt_secs` (ignores `end_frame`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_frames<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        let dt = self.config.frame_dt_secs;
        let interval = self.config.snapshot_interval_frames;
        for _ in 0..n {
            observer.on_frame_start(self.clock.frame);
            let decisions = self.step(dt)?;
            observer.on_frame_end(&self.stats(decisions));
            if interval > 0 && self.clock.frame.0.is_multiple_of(interval) {
                observer.on_snapshot(self.clock.frame, &self.agents, &self.bodies);
            }
        }
        Ok(())
    }

    /// Advance the world by one frame of `dt` seconds.
    ///
    /// Returns the number of agents that made a decision.
    pub fn step(&mut self, dt: f32) -> SimResult<usize> {
        // ── Phase 1: physics ──────────────────────────────────────────────
        self.mobility.step(&mut self.bodies, dt)?;

        // ── Phase 2: clock ────────────────────────────────────────────────
        self.clock.advance(dt);

        // ── Phase 3: snapshots ────────────────────────────────────────────
        //
        // Removals queued outside the loop (or left over from a failed step)
        // go first so no snapshot sees a body that is already dead.
        self.apply_removals();
        self.rebuild_snapshots();

        // ── Phase 4: decisions ────────────────────────────────────────────
        let decisions = self.decide();

        // ── Phase 5: removals ─────────────────────────────────────────────
        self.apply_removals();

        Ok(decisions)
    }

    /// Totals for the frame just completed.
    pub fn stats(&self, decisions: usize) -> FrameStats {
        FrameStats {
            frame:      self.clock.frame,
            now:        self.clock.now,
            decisions,
            agents:     self.agents.len(),
            stockpile:  self.depots.stockpile(),
            live_nodes: self.registry.len(),
        }
    }

    // ── Core frame processing ─────────────────────────────────────────────

    fn rebuild_snapshots(&mut self) {
        self.obstacles = ObstacleIndex::build(&self.bodies);

        // BodyStore iterates in ascending BodyId, which TickContext's
        // binary search relies on.
        self.hostiles.clear();
        self.hostiles.extend(
            self.bodies
                .iter()
                .filter(|b| b.kind.is_hostile())
                .map(|b| (b.id, b.position)),
        );

        self.peers.clear();
        for cohort_id in self.cohorts.ids() {
            let Some(cohort) = self.cohorts.get(cohort_id) else { continue };
            let positions: Vec<(AgentId, Vec3)> = cohort
                .members()
                .filter_map(|id| {
                    let agent = self.agents.get(id)?;
                    Some((id, self.bodies.position(agent.body)?))
                })
                .collect();
            self.peers.insert(cohort_id, positions);
        }
    }

    fn decide(&mut self) -> usize {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let now      = self.clock.now;
        let agents   = &mut self.agents;
        let bodies   = &mut self.bodies;
        let workers  = &self.workers;
        let soldiers = &self.soldiers;
        let peers    = &self.peers;

        let mut ctx = TickContext {
            now,
            obstacles: &self.obstacles,
            peers:     &[],
            hostiles:  &self.hostiles,
            terrain:   self.terrain.as_ref(),
            registry:  &mut self.registry,
            depots:    &mut self.depots,
            removals:  &mut self.removals,
        };

        let mut decisions = 0;
        for agent in agents.iter_mut() {
            let Some(body) = bodies.get_mut(agent.body) else {
                warn!(agent = %agent.id, body = %agent.body, "agent body missing, skipping decision");
                // A bodiless agent can never finish its task; free the claim.
                if agent.target.is_some() {
                    match agent.role {
                        Role::Worker { .. } => workers.release(agent, &mut *ctx.registry),
                        Role::Soldier => soldiers.release(agent, &mut *ctx.registry),
                    }
                    agent.clear_target();
                    agent.state = TaskState::Seeking;
                }
                continue;
            };
            ctx.peers = agent
                .cohort
                .and_then(|c| peers.get(&c))
                .map_or(&[][..], Vec::as_slice);

            let decided = match agent.role {
                Role::Worker { .. } => workers.update(agent, body, &mut ctx),
                Role::Soldier => soldiers.update(agent, body, &mut ctx),
            };
            if decided {
                decisions += 1;
            }
        }
        decisions
    }

    fn apply_removals(&mut self) {
        for body in self.removals.drain(..) {
            if self.bodies.remove(body).is_some() {
                debug!(%body, "body removed");
            }
        }
    }
}
