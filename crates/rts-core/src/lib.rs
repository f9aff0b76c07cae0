//! `rts-core` — foundational types for the `rust_rts` agent core.
//!
//! This crate is a dependency of every other `rts-*` crate.  It intentionally
//! has no `rts-*` dependencies and minimal external ones (`glam`, `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `BodyId`, `NodeId`, `DepotId`, `CohortId`  |
//! | [`planar`]      | Horizontal-plane helpers over `glam::Vec3`            |
//! | [`time`]        | `Frame`, `SimTime`, `SimClock`, `SimConfig`           |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`kind`]        | `ResourceKind`, `BodyKind` capability tags            |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod kind;
pub mod planar;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use glam::Vec3;
pub use ids::{AgentId, BodyId, CohortId, DepotId, NodeId};
pub use kind::{BodyKind, ResourceKind};
pub use rng::SimRng;
pub use time::{Frame, SimClock, SimConfig, SimTime};
