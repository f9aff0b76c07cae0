//! Fluent builder for constructing a [`Sim`].

use rustc_hash::FxHashMap;

use rts_agent::{AgentStore, CohortStore};
use rts_behavior::{EngageTask, HarvestTask, Steering, TaskMachine};
use rts_core::{SimClock, SimRng};
use rts_mobility::{MobilityEngine, PhysicsStep};
use rts_resource::{DepotStore, ResourceRegistry, generate_clusters};
use rts_spatial::{BodyStore, FlatTerrain, HeightField, ObstacleIndex};
use tracing::info;

use crate::{ScenarioConfig, Sim, SimResult};

/// RNG stream offsets, one per setup consumer.
const CLUSTER_STREAM: u64 = 1;
const SPAWN_STREAM: u64 = 2;

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`ScenarioConfig`] — timing, seed, behavior tuning, world setup
/// - `P: PhysicsStep` — the integrator (e.g. [`rts_mobility::KinematicStep`])
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default              |
/// |----------------|----------------------|
/// | `.terrain(t)`  | `FlatTerrain` at 0   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(ScenarioConfig::default(), KinematicStep)
///     .terrain(grid)
///     .build()?;
/// sim.place_depot(0.0, 0.0)?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: PhysicsStep> {
    scenario: ScenarioConfig,
    physics:  P,
    terrain:  Option<Box<dyn HeightField>>,
}

impl<P: PhysicsStep> SimBuilder<P> {
    pub fn new(scenario: ScenarioConfig, physics: P) -> Self {
        Self { scenario, physics, terrain: None }
    }

    /// Ground height source for spawning, resource placement and hover.
    pub fn terrain<T: HeightField + 'static>(mut self, terrain: T) -> Self {
        self.terrain = Some(Box::new(terrain));
        self
    }

    /// Validate the scenario, lay out resources, and return a ready-to-run
    /// [`Sim`] with no agents or depots yet.
    pub fn build(self) -> SimResult<Sim<P>> {
        self.scenario.validate()?;
        let scenario = self.scenario;
        let terrain = self.terrain.unwrap_or_else(|| Box::new(FlatTerrain::default()));

        let mut root = SimRng::new(scenario.sim.seed);
        let mut registry = ResourceRegistry::new();
        let mut bodies = BodyStore::new();
        if let Some(layout) = &scenario.clusters {
            let mut rng = root.child(CLUSTER_STREAM);
            let placed = generate_clusters(layout, &mut rng, terrain.as_ref(), &mut registry, &mut bodies);
            info!(nodes = placed, clusters = layout.clusters, "resource clusters generated");
        }
        let rng = root.child(SPAWN_STREAM);

        let steering = Steering::new(scenario.steering.clone());
        let workers = TaskMachine::new(
            HarvestTask::new(scenario.harvest),
            steering.clone(),
            scenario.separation,
            scenario.worker_hover,
        );
        let soldiers = TaskMachine::new(
            EngageTask::new(scenario.engage),
            steering,
            scenario.separation,
            scenario.soldier_hover,
        );

        Ok(Sim {
            clock:     SimClock::new(),
            config:    scenario.sim.clone(),
            depots:    DepotStore::new(scenario.stockpile),
            scenario,
            rng,
            bodies,
            agents:    AgentStore::new(),
            cohorts:   CohortStore::new(),
            registry,
            terrain,
            mobility:  MobilityEngine::new(self.physics),
            workers,
            soldiers,
            obstacles: ObstacleIndex::empty(),
            hostiles:  Vec::new(),
            peers:     FxHashMap::default(),
            removals:  Vec::new(),
        })
    }
}
