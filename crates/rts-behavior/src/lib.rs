//! `rts-behavior` — how agents decide and move.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`params`]     | `SteeringParams`, `SeparationParams`, `HarvestParams`, `EngageParams` |
//! | [`context`]    | `TickContext<'a>` — what one agent may see and touch per decision |
//! | [`steering`]   | `Steering` — obstacle probe, waypoint search, timed commitment |
//! | [`separation`] | `separation` — repulsion among cohort peers                    |
//! | [`hover`]      | `HoverPolicy` — vertical control over terrain                  |
//! | [`task`]       | `TaskStrategy` trait, `Step`                                   |
//! | [`harvest`]    | `HarvestTask` — seek, travel, harvest, return, deliver         |
//! | [`engage`]     | `EngageTask` — chase the nearest hostile and hold at range     |
//! | [`machine`]    | `TaskMachine<S>` — throttling, chaining, steering, hover       |
//! | [`error`]      | `BehaviorError`, `BehaviorResult<T>`                           |
//!
//! # Decision step
//!
//! ```text
//! TaskMachine::update(agent, body, ctx)
//!   ├─ skip unless a decision is due (per-agent interval)
//!   ├─ strategy.step()  ──► Hold | MoveTo(goal) | Transition (re-run, bounded)
//!   ├─ MoveTo: separation bias → Steering::compute_velocity
//!   ├─ write horizontal velocity to the body
//!   └─ hover policy sets the vertical component
//! ```
//!
//! Agents are updated strictly one after another, so every registry claim
//! made inside `step` is visible to the next agent in the same frame.

pub mod context;
pub mod engage;
pub mod error;
pub mod harvest;
pub mod hover;
pub mod machine;
pub mod params;
pub mod separation;
pub mod steering;
pub mod task;


pub use context::TickContext;
pub use engage::EngageTask;
pub use error::{BehaviorError, BehaviorResult};
pub use harvest::HarvestTask;
pub use hover::HoverPolicy;
pub use machine::TaskMachine;
pub use params::{EngageParams, HarvestParams, SeparationParams, SteeringParams};
pub use separation::separation;
pub use steering::Steering;
pub use task::{Step, TaskStrategy};
