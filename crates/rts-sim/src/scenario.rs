//! Everything a run needs besides the world itself.

use rts_behavior::{EngageParams, HarvestParams, HoverPolicy, SeparationParams, SteeringParams};
use rts_core::SimConfig;
use rts_resource::{ClusterLayout, Stockpile};

use crate::{SimError, SimResult};

/// Workers spawned alongside each new depot.
pub const DRONES_PER_DEPOT: usize = 4;

/// Half-extent of the square around a structure in which its units spawn.
pub const SPAWN_JITTER: f32 = 10.0;

/// Run configuration: timing, behavior tuning, and world setup.
///
/// With the `serde` feature every field is optional in JSON and falls back
/// to its default.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScenarioConfig {
    pub sim:              SimConfig,
    pub steering:         SteeringParams,
    pub separation:       SeparationParams,
    pub harvest:          HarvestParams,
    pub engage:           EngageParams,
    pub worker_hover:     HoverPolicy,
    pub soldier_hover:    HoverPolicy,
    pub drones_per_depot: usize,
    pub spawn_jitter:     f32,
    /// Shared stockpile at the start of the run.
    pub stockpile:        Stockpile,
    /// Generate resource clusters at build time.
    pub clusters:         Option<ClusterLayout>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            sim:              SimConfig::default(),
            steering:         SteeringParams::default(),
            separation:       SeparationParams::default(),
            harvest:          HarvestParams::default(),
            engage:           EngageParams::default(),
            worker_hover:     HoverPolicy::WORKER,
            soldier_hover:    HoverPolicy::SOLDIER,
            drones_per_depot: DRONES_PER_DEPOT,
            spawn_jitter:     SPAWN_JITTER,
            stockpile:        Stockpile::STARTING,
            clusters:         None,
        }
    }
}

impl ScenarioConfig {
    /// Reject values the frame loop or the behaviors cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        let dt = self.sim.frame_dt_secs;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::Config(format!("frame_dt_secs must be positive, got {dt}")));
        }
        if !(self.spawn_jitter.is_finite() && self.spawn_jitter >= 0.0) {
            return Err(SimError::Config(format!(
                "spawn_jitter must be non-negative, got {}",
                self.spawn_jitter
            )));
        }
        self.steering.validate()?;
        self.separation.validate()?;
        self.harvest.validate()?;
        self.engage.validate()?;
        Ok(())
    }

    /// Parse a scenario from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> SimResult<Self> {
        let scenario: ScenarioConfig = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Read and parse a JSON scenario file.
    #[cfg(feature = "serde")]
    pub fn load(path: &std::path::Path) -> SimResult<Self> {
        let text = std::fs::read_to_string(path).map_err(rts_core::CoreError::Io)?;
        Self::from_json(&text)
    }
}
