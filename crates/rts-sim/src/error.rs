use rts_behavior::BehaviorError;
use rts_core::{AgentId, CohortId, CoreError, DepotId, NodeId};
use rts_mobility::MobilityError;
use rts_resource::ResourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("no depot with id {0}")]
    UnknownDepot(DepotId),

    #[error("no cohort with id {0}")]
    UnknownCohort(CohortId),

    #[error("no agent with id {0}")]
    UnknownAgent(AgentId),

    #[error("no resource node with id {0}")]
    UnknownNode(NodeId),

    #[error("behavior parameters: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("mobility: {0}")]
    Mobility(#[from] MobilityError),

    #[error("resources: {0}")]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[cfg(feature = "serde")]
    #[error("scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
