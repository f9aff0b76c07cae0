//! `rts-mobility` — moving bodies between decision ticks.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`integrator`] | `PhysicsStep` trait, `KinematicStep` default integrator      |
//! | [`path`]       | `ScriptedPath` — waypoint follower for non-agent bodies      |
//! | [`store`]      | `PathStore` — `BodyId → ScriptedPath`                        |
//! | [`engine`]     | `MobilityEngine<P>` — drives paths, then integrates          |
//! | [`error`]      | `MobilityError`, `MobilityResult<T>`                         |
//!
//! # Movement model
//!
//! The agent core never moves a body directly.  It writes velocities, and
//! the next frame's physics step turns them into positions:
//!
//! 1. `Sim::step` calls `MobilityEngine::step(bodies, dt)` first.
//! 2. Scripted bodies (the player stand-in in demos) get a fresh velocity
//!    toward their current waypoint.
//! 3. The [`PhysicsStep`] integrates every dynamic body by `dt`.
//! 4. Agents then decide and write new velocities, which take effect on the
//!    following frame.
//!
//! Collision resolution is out of scope.  A host engine plugs in its own
//! solver by implementing [`PhysicsStep`].

pub mod engine;
pub mod error;
pub mod integrator;
pub mod path;
pub mod store;

#[cfg(test)]
mod tests;

pub use engine::MobilityEngine;
pub use error::{MobilityError, MobilityResult};
pub use integrator::{KinematicStep, PhysicsStep};
pub use path::ScriptedPath;
pub use store::PathStore;
