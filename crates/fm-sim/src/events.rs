//! Domain events emitted by the coordinator.
//!
//! Commands and timer firings append events to a buffer; observers or
//! `drain_events` pull them.  Nothing is pushed to the caller asynchronously.

use fm_core::{AgentId, Tick, VertexId};

#[derive(Debug, Clone, PartialEq)]
pub enum FleetEvent {
    Spawned { agent: AgentId, vertex: VertexId },
    SpawnDenied { vertex: VertexId, reason: String },
    TaskAssigned { agent: AgentId, destination: VertexId, path: Vec<VertexId> },
    TaskRejected { agent: AgentId, destination: VertexId, reason: String },
    Moved { agent: AgentId, from: VertexId, to: VertexId },
    Blocked { agent: AgentId, waiting_for: VertexId },
    TaskCompleted { agent: AgentId, at: VertexId },
    Stopped { agent: AgentId, at: VertexId },
    StopRejected { agent: AgentId, reason: String },
}

impl FleetEvent {
    /// Short snake_case tag, stable for log files.
    pub fn kind(&self) -> &'static str {
        match self {
            FleetEvent::Spawned { .. }       => "spawned",
            FleetEvent::SpawnDenied { .. }   => "spawn_denied",
            FleetEvent::TaskAssigned { .. }  => "task_assigned",
            FleetEvent::TaskRejected { .. }  => "task_rejected",
            FleetEvent::Moved { .. }         => "moved",
            FleetEvent::Blocked { .. }       => "blocked",
            FleetEvent::TaskCompleted { .. } => "task_completed",
            FleetEvent::Stopped { .. }       => "stopped",
            FleetEvent::StopRejected { .. }  => "stop_rejected",
        }
    }

    /// The robot concerned, if any.
    pub fn agent(&self) -> Option<AgentId> {
        match self {
            FleetEvent::SpawnDenied { .. } => None,
            FleetEvent::Spawned { agent, .. }
            | FleetEvent::TaskAssigned { agent, .. }
            | FleetEvent::TaskRejected { agent, .. }
            | FleetEvent::Moved { agent, .. }
            | FleetEvent::Blocked { agent, .. }
            | FleetEvent::TaskCompleted { agent, .. }
            | FleetEvent::Stopped { agent, .. }
            | FleetEvent::StopRejected { agent, .. } => Some(*agent),
        }
    }

    /// The vertex the event is about: where a robot appeared, is heading,
    /// arrived, waits for, or stopped.
    pub fn vertex(&self) -> Option<VertexId> {
        match self {
            FleetEvent::Spawned { vertex, .. } | FleetEvent::SpawnDenied { vertex, .. } => Some(*vertex),
            FleetEvent::TaskAssigned { destination, .. }
            | FleetEvent::TaskRejected { destination, .. } => Some(*destination),
            FleetEvent::Moved { to, .. } => Some(*to),
            FleetEvent::Blocked { waiting_for, .. } => Some(*waiting_for),
            FleetEvent::TaskCompleted { at, .. } | FleetEvent::Stopped { at, .. } => Some(*at),
            FleetEvent::StopRejected { .. } => None,
        }
    }

    /// Free-text detail: a failure reason, the planned path, or the origin
    /// of a move.
    pub fn detail(&self) -> String {
        match self {
            FleetEvent::SpawnDenied { reason, .. }
            | FleetEvent::TaskRejected { reason, .. }
            | FleetEvent::StopRejected { reason, .. } => reason.clone(),
            FleetEvent::TaskAssigned { path, .. } => path
                .iter()
                .map(|v| v.0.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            FleetEvent::Moved { from, .. } => format!("from {}", from.0),
            _ => String::new(),
        }
    }
}

/// An event stamped with the simulated time it happened at.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub tick:  Tick,
    pub event: FleetEvent,
}
