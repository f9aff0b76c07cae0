//! Tunable constants, grouped by the component that reads them.
//!
//! Every struct has a `Default` matching the shipped game feel and a
//! `validate` that rejects values the algorithms cannot work with.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::{BehaviorError, BehaviorResult};

fn positive(name: &str, v: f32) -> BehaviorResult<()> {
    if v > 0.0 && v.is_finite() {
        Ok(())
    } else {
        Err(BehaviorError::Config(format!("{name} must be positive and finite, got {v}")))
    }
}

fn non_negative(name: &str, v: f32) -> BehaviorResult<()> {
    if v >= 0.0 && v.is_finite() {
        Ok(())
    } else {
        Err(BehaviorError::Config(format!("{name} must be non-negative and finite, got {v}")))
    }
}

// ── Steering ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SteeringParams {
    /// How far ahead the obstacle probe point sits.
    pub probe_distance:         f32,
    /// An obstacle closer than this to a probe point blocks it.
    pub clearance:              f32,
    /// Distance of each candidate waypoint from the agent.
    pub waypoint_distance:      f32,
    /// Candidate deflections in radians, in tie-break priority order.
    pub candidate_angles:       Vec<f32>,
    /// Seconds an avoidance heading is held before re-probing.
    pub avoidance_duration:     f32,
    /// Speed multiplier while avoiding.
    pub avoidance_speed_factor: f32,
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            probe_distance:         2.0,
            clearance:              2.0,
            waypoint_distance:      5.0,
            candidate_angles:       vec![-FRAC_PI_2, FRAC_PI_2, -FRAC_PI_4, FRAC_PI_4],
            avoidance_duration:     2.0,
            avoidance_speed_factor: 0.7,
        }
    }
}

impl SteeringParams {
    pub fn validate(&self) -> BehaviorResult<()> {
        positive("probe_distance", self.probe_distance)?;
        positive("clearance", self.clearance)?;
        positive("waypoint_distance", self.waypoint_distance)?;
        non_negative("avoidance_duration", self.avoidance_duration)?;
        non_negative("avoidance_speed_factor", self.avoidance_speed_factor)?;
        if self.candidate_angles.iter().any(|a| !a.is_finite()) {
            return Err(BehaviorError::Config("candidate_angles must be finite".into()));
        }
        Ok(())
    }
}

// ── Separation ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeparationParams {
    /// Peers at or beyond this distance exert no push.
    pub min_distance:   f32,
    /// Magnitude of the bias as a fraction of the agent's speed.
    pub speed_fraction: f32,
}

impl Default for SeparationParams {
    fn default() -> Self {
        Self { min_distance: 5.0, speed_fraction: 0.5 }
    }
}

impl SeparationParams {
    pub fn validate(&self) -> BehaviorResult<()> {
        positive("min_distance", self.min_distance)?;
        non_negative("speed_fraction", self.speed_fraction)
    }
}

// ── Tasks ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HarvestParams {
    /// Arrival distance for both nodes and depots.
    pub interaction_radius: f32,
    /// Most a single harvest takes from a node.
    pub chunk:              u32,
    /// Seconds spent harvesting; 0 harvests on arrival.
    pub duration:           f32,
}

impl Default for HarvestParams {
    fn default() -> Self {
        Self { interaction_radius: 10.0, chunk: 8, duration: 3.0 }
    }
}

impl HarvestParams {
    pub fn validate(&self) -> BehaviorResult<()> {
        positive("interaction_radius", self.interaction_radius)?;
        non_negative("duration", self.duration)?;
        if self.chunk == 0 {
            return Err(BehaviorError::Config("chunk must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngageParams {
    /// Soldiers stop once the target is this close.
    pub engage_range: f32,
}

impl Default for EngageParams {
    fn default() -> Self {
        Self { engage_range: 5.0 }
    }
}

impl EngageParams {
    pub fn validate(&self) -> BehaviorResult<()> {
        positive("engage_range", self.engage_range)
    }
}
