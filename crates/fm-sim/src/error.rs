use fm_core::{AgentId, FmError, VertexId};
use fm_fleet::FleetError;
use fm_graph::GraphError;
use fm_traffic::{Owner, TrafficError};
use thiserror::Error;

/// Why a command (`spawn`, `assign_destination`, `stop`) was refused.
///
/// The `Display` text is the failure reason handed back to the presentation
/// layer.  No variant is fatal; the fleet is unchanged when one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("robot {0} not found")]
    AgentNotFound(AgentId),

    #[error("vertex {0} not found in graph")]
    VertexNotFound(VertexId),

    #[error("vertex {vertex} is occupied by {owner}")]
    VertexOccupied { vertex: VertexId, owner: Owner },

    #[error("no path from {from} to {to}")]
    NoPathFound { from: VertexId, to: VertexId },
}

impl From<TrafficError> for CommandError {
    fn from(e: TrafficError) -> Self {
        match e {
            TrafficError::VertexOccupied { vertex, owner } => CommandError::VertexOccupied { vertex, owner },
        }
    }
}

impl From<FleetError> for CommandError {
    fn from(e: FleetError) -> Self {
        match e {
            FleetError::AgentNotFound(agent) => CommandError::AgentNotFound(agent),
            FleetError::VertexOccupied(t) => t.into(),
        }
    }
}

impl From<GraphError> for CommandError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::NoPath { from, to } => CommandError::NoPathFound { from, to },
            GraphError::VertexNotFound(v) => CommandError::VertexNotFound(v),
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Errors building a coordinator.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] FmError),
}

pub type SimResult<T> = Result<T, SimError>;
