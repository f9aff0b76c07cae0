//! outpost — a headless skirmish for the rust_rts agent core.
//!
//! One free command center and its drones harvest a seeded resource field
//! plus a few hand-placed nodes.  A barrack fields a soldier squad that
//! chases a player walking a loop around the base.  Once the stockpile
//! affords it, a second command center goes up and brings four more drones.
//!
//! Pass a scenario JSON path as the first argument to override the built-in
//! scenario.  Set `RUST_LOG=debug` to watch individual decisions.

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rts_agent::{AgentStore, TaskState};
use rts_core::{Frame, ResourceKind, Vec3};
use rts_mobility::{KinematicStep, ScriptedPath};
use rts_output::{CsvWriter, OutputWriter, SimOutputObserver};
use rts_resource::{BuildCost, load_nodes_reader};
use rts_sim::{FrameStats, ScenarioConfig, SimBuilder, SimObserver};
use rts_spatial::{BodyStore, GridTerrain};

// ── Constants ─────────────────────────────────────────────────────────────────

const MAP_SIZE:       f32   = 600.0;
const TERRAIN_CELLS:  usize = 60;
const SQUAD_SIZE:     usize = 4;
const PLAYER_SPEED:   f32   = 2.5;
/// Frames between build checks (10 s at 60 fps).
const CHUNK_FRAMES:   u64   = 600;
const OUTPUT_DIR:     &str  = "output/outpost";

const SECOND_DEPOT: (f32, f32) = (140.0, -120.0);
const BARRACK:      (f32, f32) = (-25.0, 20.0);

// 2 minutes at 60 fps, snapshot every second, five clusters on a 600 m map.
const SCENARIO_JSON: &str = r#"{
    "sim": { "seed": 42, "frame_dt_secs": 0.016666668, "total_frames": 7200, "snapshot_interval_frames": 60 },
    "harvest": { "interaction_radius": 10.0, "chunk": 8, "duration": 3.0 },
    "drones_per_depot": 4,
    "spawn_jitter": 10.0,
    "clusters": { "clusters": 5, "nodes_per_group": 7, "amount": 100, "map_width": 600.0, "map_depth": 600.0 }
}"#;

// A few nodes right next to the base so the first trips are short.
const NODES_CSV: &str = "\
kind,x,z,amount\n\
wood,30,0,40\n\
wood,-20,-30,40\n\
stone,0,35,40\n\
stone,40,40,40\n\
";

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    decisions:     usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, decisions: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_frame_end(&mut self, stats: &FrameStats) {
        self.summary_rows += 1;
        self.decisions += stats.decisions;
        self.inner.on_frame_end(stats);
    }

    fn on_snapshot(&mut self, frame: Frame, agents: &AgentStore, bodies: &BodyStore) {
        self.snapshot_rows += agents.len();
        self.inner.on_snapshot(frame, agents, bodies);
    }

    fn on_sim_end(&mut self, final_frame: Frame) {
        self.inner.on_sim_end(final_frame);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    // 1. Scenario.
    let scenario = match std::env::args().nth(1) {
        Some(path) => ScenarioConfig::load(Path::new(&path))?,
        None => ScenarioConfig::from_json(SCENARIO_JSON)?,
    };
    let total_frames = scenario.sim.total_frames;
    println!("=== outpost — rust_rts agent core ===");
    println!(
        "Seed: {}  |  Frames: {} ({:.0} s)  |  Drones/depot: {}",
        scenario.sim.seed,
        total_frames,
        total_frames as f32 * scenario.sim.frame_dt_secs,
        scenario.drones_per_depot,
    );

    // 2. Rolling terrain.
    let terrain = GridTerrain::from_fn(MAP_SIZE, MAP_SIZE, TERRAIN_CELLS, |x, z| {
        2.0 * (x / 45.0).sin() * (z / 60.0).cos()
    })?;

    // 3. World.
    let mut sim = SimBuilder::new(scenario, KinematicStep).terrain(terrain).build()?;
    let extra = load_nodes_reader(
        Cursor::new(NODES_CSV),
        sim.terrain.as_ref(),
        &mut sim.registry,
        &mut sim.bodies,
    )?;
    println!("Resource nodes: {} ({} hand-placed)", sim.registry.len(), extra);

    let hq = sim.place_depot(0.0, 0.0)?;
    let squad = sim.build_barrack(BARRACK.0, BARRACK.1, SQUAD_SIZE)?;
    let player = sim.add_player(90.0, 90.0);
    let lap = ScriptedPath::new(
        vec![
            Vec3::new(90.0, 0.0, -90.0),
            Vec3::new(-90.0, 0.0, -90.0),
            Vec3::new(-90.0, 0.0, 90.0),
            Vec3::new(90.0, 0.0, 90.0),
        ],
        PLAYER_SPEED,
    )?
    .looping();
    sim.follow_path(player, lap)?;
    info!(%hq, %squad, %player, agents = sim.agents.len(), "base established");

    // 4. Output.
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    // 5. Run in chunks, expanding when the stockpile allows.
    let t0 = Instant::now();
    let mut expanded = false;
    while sim.clock.frame.0 < total_frames {
        let n = CHUNK_FRAMES.min(total_frames - sim.clock.frame.0);
        sim.run_frames(n, &mut obs)?;

        if !expanded && sim.depots.stockpile().can_afford(BuildCost::COMMAND_CENTER) {
            let depot = sim.build_depot(SECOND_DEPOT.0, SECOND_DEPOT.1)?;
            info!(%depot, frame = %sim.clock.frame, "second command center built");
            expanded = true;
        }
    }
    obs.on_sim_end(sim.clock.frame);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    let stock = sim.depots.stockpile();
    println!("Simulation complete in {:.3} s ({} decisions)", elapsed.as_secs_f64(), obs.decisions);
    println!("  agent_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  frame_summaries.csv : {} rows", obs.summary_rows);
    println!("  stockpile           : wood {}  stone {}", stock.wood, stock.stone);
    for depot in sim.depots.iter() {
        println!(
            "  {:<19} : delivered wood {}  stone {}",
            depot.id.to_string(),
            depot.delivered.wood,
            depot.delivered.stone
        );
    }
    println!(
        "  nodes remaining     : {} (wood {}  stone {} left on the map)",
        sim.registry.len(),
        sim.registry.total(ResourceKind::Wood),
        sim.registry.total(ResourceKind::Stone)
    );
    println!();

    println!("{:<8} {:<8} {:<10} {:>9} {:>9} {:>9}", "Agent", "Role", "State", "x", "z", "Carrying");
    println!("{}", "-".repeat(58));
    for agent in sim.agents.iter() {
        let p = sim.bodies.position(agent.body).unwrap_or(Vec3::NAN);
        println!(
            "{:<8} {:<8} {:<10} {:>9.1} {:>9.1} {:>9}",
            agent.id.0,
            agent.role.as_str(),
            agent.state.as_str(),
            p.x,
            p.z,
            agent.carrying(),
        );
    }
    println!();
    println!(
        "Idle: {}  |  Engaging: {}",
        sim.agents.count_in(TaskState::Idle),
        sim.agents.count_in(TaskState::Engaging),
    );

    Ok(())
}
