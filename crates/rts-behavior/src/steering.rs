//! The steering engine.
//!
//! # Algorithm
//!
//! ```text
//! dir = flat unit vector current → goal          (None → zero velocity)
//!
//! committed(now)?  → rotate(dir, angle) × speed × avoidance_factor
//! probe = current + dir × probe_distance
//! probe clear?     → normalise(dir + bias) × speed
//! otherwise, for each candidate angle in priority order:
//!     point = current + rotate(dir, angle) × waypoint_distance
//!     keep the clear point closest to the goal (strictly closer wins)
//! found            → commit(angle, now + duration); avoid at reduced speed
//! none found       → dir × speed
//! ```
//!
//! Committing re-applies the chosen offset to the *current* direct heading
//! on every call, so an agent sliding around an obstacle keeps turning
//! relative to the goal rather than flying off on a fixed world heading.
//!
//! The returned velocity is always horizontal (`y = 0`).

use tracing::debug;

use rts_agent::AvoidanceState;
use rts_core::planar::{flat_direction, horizontal_distance, normalize_flat, rotate_y};
use rts_core::{BodyId, SimTime, Vec3};
use rts_spatial::ObstacleIndex;

use crate::SteeringParams;

/// Obstacle-avoiding velocity computation shared by every task.
#[derive(Debug, Clone, Default)]
pub struct Steering {
    pub params: SteeringParams,
}

impl Steering {
    pub fn new(params: SteeringParams) -> Self {
        Self { params }
    }

    /// Horizontal velocity from `current` toward `goal`.
    ///
    /// `exclude` lists bodies the probe ignores (the agent itself and its
    /// target).  `bias` is the separation vector, added to the direct
    /// heading before normalisation when no avoidance is in effect.
    #[allow(clippy::too_many_arguments)]
    pub fn compute_velocity(
        &self,
        current:   Vec3,
        goal:      Option<Vec3>,
        speed:     f32,
        obstacles: &ObstacleIndex,
        exclude:   &[BodyId],
        avoidance: &mut AvoidanceState,
        bias:      Vec3,
        now:       SimTime,
    ) -> Vec3 {
        let Some(goal) = goal else {
            return Vec3::ZERO;
        };
        let Some(dir) = flat_direction(current, goal) else {
            return Vec3::ZERO;
        };
        let p = &self.params;
        let avoid_speed = speed * p.avoidance_speed_factor;

        if let Some(angle) = avoidance.active_angle(now) {
            return rotate_y(dir, angle) * avoid_speed;
        }
        if avoidance.until().is_some() {
            avoidance.clear();
            debug!(%now, "avoidance commitment expired");
        }

        let probe = current + dir * p.probe_distance;
        if obstacles.is_clear(probe, p.clearance, exclude) {
            let heading = normalize_flat(dir + bias).unwrap_or(dir);
            return heading * speed;
        }

        match self.best_waypoint(current, goal, dir, obstacles, exclude) {
            Some(angle) => {
                let until = now.after(p.avoidance_duration);
                avoidance.commit(angle, until);
                debug!(angle = angle.to_degrees(), %until, "obstacle ahead, committed to avoidance");
                rotate_y(dir, angle) * avoid_speed
            }
            None => {
                debug!("obstacle ahead, no clear waypoint; holding direct heading");
                dir * speed
            }
        }
    }

    /// The candidate angle whose waypoint is clear and closest to `goal`.
    fn best_waypoint(
        &self,
        current:   Vec3,
        goal:      Vec3,
        dir:       Vec3,
        obstacles: &ObstacleIndex,
        exclude:   &[BodyId],
    ) -> Option<f32> {
        let p = &self.params;
        let mut best: Option<(f32, f32)> = None;
        for &angle in &p.candidate_angles {
            let point = current + rotate_y(dir, angle) * p.waypoint_distance;
            if !obstacles.is_clear(point, p.clearance, exclude) {
                continue;
            }
            let d = horizontal_distance(point, goal);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((angle, d));
            }
        }
        best.map(|(angle, _)| angle)
    }
}
