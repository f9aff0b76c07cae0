use rts_core::BodyId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("step duration must be finite and non-negative, got {0}")]
    InvalidStep(f32),

    #[error("scripted path needs at least one waypoint")]
    EmptyPath,

    #[error("path speed must be positive and finite, got {0}")]
    InvalidSpeed(f32),

    #[error("body {0} is not dynamic and cannot follow a path")]
    StaticBody(BodyId),

    #[error("body {0} does not exist")]
    BodyNotFound(BodyId),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
