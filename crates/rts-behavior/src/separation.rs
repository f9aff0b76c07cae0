//! Repulsion among cohort peers.

use rts_core::planar::{flat_direction, horizontal_distance, normalize_flat};
use rts_core::{AgentId, Vec3};

use crate::SeparationParams;

/// Heading bias pushing `current` away from nearby peers.
///
/// Each peer closer than `min_distance` contributes a unit vector pointing
/// away from it, weighted by `(D − d) / D`.  The weighted sum is averaged,
/// normalised, and scaled to `speed_fraction × speed`.  Returns zero when no
/// peer contributes.
///
/// Peers exactly on top of the agent have no "away" direction; they push
/// along the x axis, lower `AgentId` toward −x, so two stacked agents split
/// apart deterministically.
pub fn separation(
    current: Vec3,
    self_id: AgentId,
    peers:   &[(AgentId, Vec3)],
    params:  &SeparationParams,
    speed:   f32,
) -> Vec3 {
    let d_min = params.min_distance;
    let mut sum = Vec3::ZERO;
    let mut count = 0u32;

    for &(id, pos) in peers {
        if id == self_id {
            continue;
        }
        let d = horizontal_distance(current, pos);
        if d.is_nan() || d >= d_min {
            continue;
        }
        let away = flat_direction(pos, current)
            .unwrap_or(if self_id < id { Vec3::NEG_X } else { Vec3::X });
        sum += away * ((d_min - d) / d_min);
        count += 1;
    }

    if count == 0 {
        return Vec3::ZERO;
    }
    normalize_flat(sum / count as f32).map_or(Vec3::ZERO, |v| v * (speed * params.speed_fraction))
}
