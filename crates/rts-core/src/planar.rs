//! Horizontal-plane helpers over `glam::Vec3`.
//!
//! Steering operates on the XZ plane: the vertical axis is owned by terrain
//! height queries and hover policies, so every direction used for movement
//! has its `y` component zeroed before normalisation.

use glam::{Quat, Vec3};

/// Directions shorter than this are treated as "already there".
pub const MIN_DIRECTION_LEN: f32 = 1e-5;

/// `v` with its vertical component zeroed.
#[inline]
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Euclidean distance between `a` and `b` ignoring the vertical axis.
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    flatten(b - a).length()
}

/// Unit horizontal direction from `from` to `to`.
///
/// Returns `None` when the two points coincide on the plane, so callers never
/// normalise a zero vector into NaN.
#[inline]
pub fn flat_direction(from: Vec3, to: Vec3) -> Option<Vec3> {
    normalize_flat(to - from)
}

/// Normalise the horizontal part of `v`, or `None` if it is degenerate.
#[inline]
pub fn normalize_flat(v: Vec3) -> Option<Vec3> {
    let flat = flatten(v);
    let len = flat.length();
    if len < MIN_DIRECTION_LEN || !len.is_finite() {
        None
    } else {
        Some(flat / len)
    }
}

/// Rotate `v` about the vertical axis by `angle` radians (right-handed).
#[inline]
pub fn rotate_y(v: Vec3, angle: f32) -> Vec3 {
    Quat::from_rotation_y(angle) * v
}

/// Replace the horizontal components of `velocity` with `horizontal`'s,
/// keeping the vertical component.
#[inline]
pub fn with_horizontal(velocity: Vec3, horizontal: Vec3) -> Vec3 {
    Vec3::new(horizontal.x, velocity.y, horizontal.z)
}
