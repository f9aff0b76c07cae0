//! Pluggable body integration.

use rts_core::Vec3;
use rts_spatial::BodyStore;

use crate::{MobilityError, MobilityResult};

/// Advances every body in a [`BodyStore`] by one frame.
///
/// Implementations must leave static bodies where they are and must not
/// touch velocities other than to resolve contacts.
pub trait PhysicsStep {
    /// Integrate `bodies` over `dt` seconds and return how many moved.
    fn step(&mut self, bodies: &mut BodyStore, dt: f32) -> MobilityResult<usize>;
}

/// Explicit Euler integration with no collision response.
///
/// `position += velocity × dt` for every dynamic body.  Enough for headless
/// runs and tests; a host engine substitutes its own solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct KinematicStep;

impl PhysicsStep for KinematicStep {
    fn step(&mut self, bodies: &mut BodyStore, dt: f32) -> MobilityResult<usize> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(MobilityError::InvalidStep(dt));
        }
        let mut moved = 0;
        for body in bodies.iter_mut().filter(|b| !b.is_static) {
            let delta = body.velocity * dt;
            if delta.is_finite() && delta != Vec3::ZERO {
                body.position += delta;
                moved += 1;
            }
        }
        Ok(moved)
    }
}
