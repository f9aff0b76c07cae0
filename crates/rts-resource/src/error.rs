use thiserror::Error;

use rts_core::{CoreError, DepotId};

use crate::BuildCost;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("resource layout parse error: {0}")]
    Parse(String),

    #[error("depot {0} does not exist")]
    UnknownDepot(DepotId),

    #[error("insufficient resources: need {need:?}, have wood {wood} / stone {stone}")]
    Insufficient { need: BuildCost, wood: u32, stone: u32 },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ResourceResult<T> = Result<T, ResourceError>;
