//! The per-frame movement driver used by rts-sim.

use rts_spatial::BodyStore;

use crate::{MobilityResult, PathStore, PhysicsStep};

/// Owns the physics integrator and the scripted paths.
///
/// # Type parameter
///
/// `P` must implement [`PhysicsStep`] (e.g. [`crate::KinematicStep`]).  Swap
/// it at compile time for a host engine's solver with no runtime overhead.
pub struct MobilityEngine<P: PhysicsStep> {
    /// The integrator.
    pub physics: P,

    /// Bodies following fixed waypoints.
    pub paths: PathStore,
}

impl<P: PhysicsStep> MobilityEngine<P> {
    pub fn new(physics: P) -> Self {
        Self { physics, paths: PathStore::new() }
    }

    /// Drive scripted bodies, then integrate every dynamic body over `dt`.
    ///
    /// Returns the number of bodies the integrator moved.
    pub fn step(&mut self, bodies: &mut BodyStore, dt: f32) -> MobilityResult<usize> {
        self.paths.drive(bodies);
        self.physics.step(bodies, dt)
    }
}
