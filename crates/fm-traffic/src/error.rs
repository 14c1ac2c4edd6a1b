use thiserror::Error;

use fm_core::VertexId;

use crate::Owner;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrafficError {
    #[error("vertex {vertex} is occupied by {owner}")]
    VertexOccupied { vertex: VertexId, owner: Owner },
}

pub type TrafficResult<T> = Result<T, TrafficError>;
