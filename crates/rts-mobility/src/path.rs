//! Waypoint paths for bodies that are not driven by an agent task.

use rts_core::planar::{flat_direction, horizontal_distance, with_horizontal};
use rts_core::Vec3;

use crate::{MobilityError, MobilityResult};

/// Default distance at which a waypoint counts as reached.
pub const ARRIVE_RADIUS: f32 = 0.5;

/// A body that walks a fixed list of waypoints at constant speed.
///
/// Only the horizontal velocity is written; the vertical component is left
/// to whatever else acts on the body.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedPath {
    waypoints:     Vec<Vec3>,
    speed:         f32,
    looping:       bool,
    arrive_radius: f32,
    cursor:        usize,
}

impl ScriptedPath {
    /// # Errors
    ///
    /// [`MobilityError::EmptyPath`] for no waypoints and
    /// [`MobilityError::InvalidSpeed`] for a non-positive or non-finite speed.
    pub fn new(waypoints: Vec<Vec3>, speed: f32) -> MobilityResult<Self> {
        if waypoints.is_empty() {
            return Err(MobilityError::EmptyPath);
        }
        if !(speed.is_finite() && speed > 0.0) {
            return Err(MobilityError::InvalidSpeed(speed));
        }
        Ok(Self { waypoints, speed, looping: false, arrive_radius: ARRIVE_RADIUS, cursor: 0 })
    }

    /// Restart from the first waypoint after reaching the last.
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    pub fn arrive_radius(mut self, radius: f32) -> Self {
        self.arrive_radius = radius.max(0.0);
        self
    }

    /// The waypoint currently being walked toward, `None` once finished.
    pub fn current(&self) -> Option<Vec3> {
        self.waypoints.get(self.cursor).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.waypoints.len()
    }

    /// Velocity for a body at `position` whose current velocity is `velocity`.
    ///
    /// Advances past every waypoint already within the arrive radius, so a
    /// body sitting on several stacked waypoints skips them all at once.
    pub fn velocity(&mut self, position: Vec3, velocity: Vec3) -> Vec3 {
        // At most one full lap per call keeps a looped path whose every
        // waypoint is in reach from spinning.
        for _ in 0..=self.waypoints.len() {
            let Some(target) = self.current() else {
                return with_horizontal(velocity, Vec3::ZERO);
            };
            if horizontal_distance(position, target) > self.arrive_radius {
                let heading = flat_direction(position, target).unwrap_or(Vec3::ZERO);
                return with_horizontal(velocity, heading * self.speed);
            }
            self.cursor += 1;
            if self.looping && self.cursor == self.waypoints.len() {
                self.cursor = 0;
            }
        }
        with_horizontal(velocity, Vec3::ZERO)
    }
}
