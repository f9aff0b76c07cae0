//! CSV resource layout loader.
//!
//! # CSV format
//!
//! One row per resource node.  The node's height is read from the terrain.
//!
//! ```csv
//! kind,x,z,amount
//! wood,20,0,100
//! stone,-35.5,12,60
//! tree,4,4,100
//! ```
//!
//! **`kind`** accepts `wood`/`tree` and `stone`/`rock`.  Rows with a zero
//! amount are skipped since they could never be claimed.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use rts_core::{ResourceKind, Vec3};
use rts_spatial::{BodyStore, HeightField};

use crate::{ResourceError, ResourceRegistry};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    kind:   String,
    x:      f32,
    z:      f32,
    amount: u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load resource nodes from a CSV file into `registry`, registering a static
/// body for each.  Returns the number of nodes loaded.
pub fn load_nodes_csv(
    path: &Path,
    terrain: &dyn HeightField,
    registry: &mut ResourceRegistry,
    bodies: &mut BodyStore,
) -> Result<usize, ResourceError> {
    let file = std::fs::File::open(path).map_err(ResourceError::Io)?;
    load_nodes_reader(file, terrain, registry, bodies)
}

/// Like [`load_nodes_csv`] but accepts any `Read` source.
///
/// The whole file is parsed before anything is registered, so a bad row
/// leaves `registry` and `bodies` untouched.
pub fn load_nodes_reader<R: Read>(
    reader: R,
    terrain: &dyn HeightField,
    registry: &mut ResourceRegistry,
    bodies: &mut BodyStore,
) -> Result<usize, ResourceError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows: Vec<(ResourceKind, f32, f32, u32)> = Vec::new();

    for (line, result) in csv_reader.deserialize::<NodeRecord>().enumerate() {
        let row = result.map_err(|e| ResourceError::Parse(e.to_string()))?;
        let kind: ResourceKind = row.kind.parse()?;
        if !(row.x.is_finite() && row.z.is_finite()) {
            return Err(ResourceError::Parse(format!(
                "row {}: non-finite coordinates ({}, {})",
                line + 1,
                row.x,
                row.z
            )));
        }
        if row.amount > 0 {
            rows.push((kind, row.x, row.z, row.amount));
        }
    }

    for &(kind, x, z, amount) in &rows {
        let pos = Vec3::new(x, terrain.height_at(x, z), z);
        let body = bodies.add_fixed(kind.body_kind(), pos);
        registry.insert(kind, pos, amount, body);
    }
    Ok(rows.len())
}
