//! `rts-resource` — harvestable nodes, reservations, and depots.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`node`]      | `ResourceNode`, `Harvest`                                 |
//! | [`registry`]  | `ResourceRegistry` — the target reservation registry      |
//! | [`depot`]     | `Depot`, `DepotStore`, `Stockpile`, `BuildCost`           |
//! | [`cluster`]   | `ClusterLayout`, `generate_clusters` (seeded placement)   |
//! | [`loader`]    | `load_nodes_csv`, `load_nodes_reader`                     |
//! | [`error`]     | `ResourceError`, `ResourceResult<T>`                      |
//!
//! # Reservation model (summary)
//!
//! ```text
//! claim_nearest(from)  → nearest node with !reserved && amount > 0; sets reserved
//! harvest(node, chunk) → takes min(chunk, amount); clears reserved;
//!                        removes the node at 0 and reports its body
//! release(node)        → clears reserved (abandon without depleting)
//! ```
//!
//! Agents are updated one at a time, so a claim is visible to the next agent
//! within the same frame.

pub mod cluster;
pub mod depot;
pub mod error;
pub mod loader;
pub mod node;
pub mod registry;


pub use cluster::{ClusterLayout, generate_clusters};
pub use depot::{BuildCost, Depot, DepotStore, Stockpile};
pub use error::{ResourceError, ResourceResult};
pub use loader::{load_nodes_csv, load_nodes_reader};
pub use node::{Harvest, ResourceNode};
pub use registry::ResourceRegistry;
