//! The `PathStore` — scripted paths keyed by the body they move.

use std::collections::BTreeMap;

use tracing::debug;

use rts_core::BodyId;
use rts_spatial::BodyStore;

use crate::{MobilityError, MobilityResult, ScriptedPath};

/// Scripted paths keyed by `BodyId`, driven in ascending id order.
#[derive(Debug, Default)]
pub struct PathStore {
    paths: BTreeMap<BodyId, ScriptedPath>,
}

impl PathStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `path` to `body`, replacing any previous path.
    ///
    /// # Errors
    ///
    /// Fails if the body does not exist or is static.
    pub fn attach(&mut self, bodies: &BodyStore, body: BodyId, path: ScriptedPath) -> MobilityResult<()> {
        let b = bodies.get(body).ok_or(MobilityError::BodyNotFound(body))?;
        if b.is_static {
            return Err(MobilityError::StaticBody(body));
        }
        self.paths.insert(body, path);
        Ok(())
    }

    pub fn detach(&mut self, body: BodyId) -> Option<ScriptedPath> {
        self.paths.remove(&body)
    }

    pub fn get(&self, body: BodyId) -> Option<&ScriptedPath> {
        self.paths.get(&body)
    }

    /// Write a velocity for every scripted body.
    ///
    /// Paths whose body has left the world are dropped.  Returns the number
    /// of bodies driven.
    pub fn drive(&mut self, bodies: &mut BodyStore) -> usize {
        let mut driven = 0;
        self.paths.retain(|&id, path| match bodies.get_mut(id) {
            Some(body) => {
                body.velocity = path.velocity(body.position, body.velocity);
                driven += 1;
                true
            }
            None => {
                debug!(body = %id, "scripted body gone, dropping path");
                false
            }
        });
        driven
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
