//! `rts-sim` — frame loop orchestrator for the rust_rts agent core.
//!
//! # Five-phase frame loop
//!
//! ```text
//! every frame (dt):
//!   ① Physics    — scripted bodies steer, PhysicsStep integrates the
//!                  velocities agents wrote last frame.
//!   ② Clock      — now += dt.
//!   ③ Snapshots  — flush removals; rebuild obstacle index, hostile list,
//!                  per-cohort peer positions.
//!   ④ Decisions  — ascending AgentId; each due agent runs
//!                  TaskMachine<HarvestTask> (workers) or
//!                  TaskMachine<EngageTask> (soldiers).
//!   ⑤ Removals   — bodies of depleted nodes leave the world.
//! ```
//!
//! Velocities written in ④ move bodies in the next frame's ①.
//!
//! # Cargo features
//!
//! | Feature | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | `ScenarioConfig::from_json` / `load` via `serde_json`.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rts_mobility::KinematicStep;
//! use rts_sim::{NoopObserver, ScenarioConfig, SimBuilder};
//!
//! let mut sim = SimBuilder::new(ScenarioConfig::default(), KinematicStep).build()?;
//! sim.add_node(ResourceKind::Wood, 20.0, 0.0, 100);
//! sim.place_depot(0.0, 0.0)?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod scenario;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{FrameStats, NoopObserver, SimObserver};
pub use scenario::{DRONES_PER_DEPOT, SPAWN_JITTER, ScenarioConfig};
pub use sim::Sim;
