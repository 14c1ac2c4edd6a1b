use fm_core::AgentId;
use fm_traffic::TrafficError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FleetError {
    #[error("robot {0} not found")]
    AgentNotFound(AgentId),

    #[error("spawn denied: {0}")]
    VertexOccupied(#[from] TrafficError),
}

pub type FleetResult<T> = Result<T, FleetError>;
