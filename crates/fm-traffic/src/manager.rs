//! The reservation table.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use fm_core::{AgentId, VertexId};

use crate::{TrafficError, TrafficResult};

/// Who holds a reserved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Agent(AgentId),
    /// Reserved without naming a robot; used for the start vertex at spawn,
    /// before the robot has an id.
    Unassigned,
}

impl From<Option<AgentId>> for Owner {
    fn from(agent: Option<AgentId>) -> Self {
        agent.map_or(Owner::Unassigned, Owner::Agent)
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Agent(id) => write!(f, "{id}"),
            Owner::Unassigned => f.write_str("an unassigned owner"),
        }
    }
}

/// Tracks which vertex is held by whom.  A vertex with no entry is free.
///
/// The map is the only record of occupancy: a robot standing on a vertex
/// without an entry here does not block anyone.
#[derive(Debug, Default, Clone)]
pub struct TrafficManager {
    occupied: HashMap<VertexId, Owner>,
}

impl TrafficManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Test-and-set `vertex` for `agent` (`None` = unassigned owner).
    ///
    /// Returns `false` without touching the table if `vertex` already has an
    /// owner, including when that owner is `agent` itself.  The vertex index
    /// is not checked against any graph.
    pub fn request(&mut self, agent: Option<AgentId>, vertex: VertexId) -> bool {
        self.try_request(agent, vertex).is_ok()
    }

    /// Like [`request`](Self::request) but reports the current owner on
    /// denial.
    pub fn try_request(&mut self, agent: Option<AgentId>, vertex: VertexId) -> TrafficResult<()> {
        let owner = Owner::from(agent);
        if let Some(&held_by) = self.occupied.get(&vertex) {
            trace!(vertex = vertex.0, %held_by, requester = %owner, "reservation denied");
            return Err(TrafficError::VertexOccupied { vertex, owner: held_by });
        }
        self.occupied.insert(vertex, owner);
        debug!(vertex = vertex.0, %owner, "vertex reserved");
        Ok(())
    }

    /// Free `vertex`.  A no-op if it is already free.
    ///
    /// Ownership is not checked: whoever calls this frees the vertex.
    pub fn release(&mut self, vertex: VertexId) {
        if let Some(owner) = self.occupied.remove(&vertex) {
            debug!(vertex = vertex.0, %owner, "vertex released");
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn owner(&self, vertex: VertexId) -> Option<Owner> {
        self.occupied.get(&vertex).copied()
    }

    #[inline]
    pub fn is_reserved(&self, vertex: VertexId) -> bool {
        self.occupied.contains_key(&vertex)
    }

    /// Vertices currently held by `agent`, in no particular order.
    pub fn reserved_by(&self, agent: AgentId) -> impl Iterator<Item = VertexId> + '_ {
        self.occupied
            .iter()
            .filter(move |(_, owner)| **owner == Owner::Agent(agent))
            .map(|(vertex, _)| *vertex)
    }

    /// All reservations, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, Owner)> + '_ {
        self.occupied.iter().map(|(v, o)| (*v, *o))
    }

    /// Number of reserved vertices.
    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }
}
