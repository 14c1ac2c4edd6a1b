//! Graph and planner error type.

use thiserror::Error;

use fm_core::VertexId;

/// Errors produced by `fm-graph`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("no path from {from} to {to}")]
    NoPath { from: VertexId, to: VertexId },

    #[error("vertex {0} not found in graph")]
    VertexNotFound(VertexId),
}

pub type GraphResult<T> = Result<T, GraphError>;
