//! `rts-spatial` — the spatial query surface the agent core consumes.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`body`]     | `Body`, `BodyStore` — every rigid body in the world         |
//! | [`obstacle`] | `ObstacleIndex` — per-tick R-tree snapshot for probing      |
//! | [`terrain`]  | `HeightField` trait, `FlatTerrain`, `GridTerrain`           |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod body;
pub mod error;
pub mod obstacle;
pub mod terrain;

#[cfg(test)]
mod tests;

pub use body::{Body, BodyStore};
pub use error::{SpatialError, SpatialResult};
pub use obstacle::ObstacleIndex;
pub use terrain::{FlatTerrain, GridTerrain, HeightField};
