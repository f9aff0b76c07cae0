//! Vertical control over the terrain.
//!
//! Steering only ever produces horizontal velocity.  The hover policy owns
//! the vertical axis and runs after steering on every decision.

use rts_spatial::{Body, HeightField};

/// How an agent holds its height above the ground.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum HoverPolicy {
    /// Leave the vertical axis to physics.
    #[default]
    None,
    /// Teleport to `ground + offset` when off by more than `tolerance`,
    /// zeroing vertical velocity.
    Snap { offset: f32, tolerance: f32 },
    /// Proportional vertical velocity toward `ground + offset`.
    Spring { offset: f32, gain: f32, tolerance: f32 },
}

impl HoverPolicy {
    /// Worker drones: snap to one unit above ground.
    pub const WORKER: HoverPolicy = HoverPolicy::Snap { offset: 1.0, tolerance: 0.1 };
    /// Soldiers: spring toward three units above ground.
    pub const SOLDIER: HoverPolicy = HoverPolicy::Spring { offset: 3.0, gain: 5.0, tolerance: 0.01 };

    /// Target height of a body at `(x, z)`, if this policy has one.
    pub fn target_height(&self, terrain: &dyn HeightField, x: f32, z: f32) -> Option<f32> {
        match *self {
            HoverPolicy::None => None,
            HoverPolicy::Snap { offset, .. } | HoverPolicy::Spring { offset, .. } => {
                Some(terrain.height_at(x, z) + offset)
            }
        }
    }

    /// Adjust `body`'s vertical state.
    pub fn apply(&self, body: &mut Body, terrain: &dyn HeightField) {
        let Some(target) = self.target_height(terrain, body.position.x, body.position.z) else {
            return;
        };
        match *self {
            HoverPolicy::None => {}
            HoverPolicy::Snap { tolerance, .. } => {
                if (body.position.y - target).abs() > tolerance {
                    body.position.y = target;
                    body.velocity.y = 0.0;
                }
            }
            HoverPolicy::Spring { gain, tolerance, .. } => {
                let diff = target - body.position.y;
                body.velocity.y = if diff.abs() > tolerance { diff * gain } else { 0.0 };
            }
        }
    }
}
