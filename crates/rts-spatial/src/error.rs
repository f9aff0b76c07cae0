//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `rts-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("height grid has {got} samples, expected {expected} for {segments} segments")]
    GridSize {
        segments: usize,
        expected: usize,
        got:      usize,
    },

    #[error("terrain extent must be positive, got {width} x {depth}")]
    Extent { width: f32, depth: f32 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
