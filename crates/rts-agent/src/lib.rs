//! `rts-agent` — per-agent state for the `rust_rts` agent core.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`agent`]     | `Agent`, `Role`, `TaskState`, `Payload`, `TargetRef`, `AvoidanceState` |
//! | [`store`]     | `AgentStore` (ordered by `AgentId`)                          |
//! | [`cohort`]    | `Cohort`, `CohortStore` — separation peer registries         |
//! | [`builder`]   | `AgentBuilder` (fluent construction with role defaults)      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.     |
//!
//! The agent record holds decision state only.  Position and velocity live
//! on the agent's body in `rts-spatial`, owned by the physics side.

pub mod agent;
pub mod builder;
pub mod cohort;
pub mod store;


pub use agent::{Agent, AvoidanceState, Payload, Role, TargetRef, TaskState};
pub use builder::AgentBuilder;
pub use cohort::{Cohort, CohortStore};
pub use store::AgentStore;
