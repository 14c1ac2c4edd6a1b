//! Plain row types written by log backends.

use fm_core::VertexId;
use fm_fleet::Robot;
use fm_sim::EventRecord;

/// One fleet event, flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub tick:     u64,
    pub kind:     &'static str,
    /// `None` for events with no robot (a denied spawn).
    pub agent_id: Option<u32>,
    pub vertex:   Option<u32>,
    pub detail:   String,
}

impl From<&EventRecord> for EventRow {
    fn from(record: &EventRecord) -> Self {
        let event = &record.event;
        Self {
            tick:     record.tick.0,
            kind:     event.kind(),
            agent_id: event.agent().map(|a| a.0),
            vertex:   event.vertex().map(|v| v.0),
            detail:   event.detail(),
        }
    }
}

/// One robot's state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotSnapshotRow {
    pub robot_id:          u32,
    pub tick:              u64,
    pub status:            &'static str,
    pub current_vertex:    u32,
    pub holds_reservation: bool,
    /// Front of the remaining path; `u32::MAX` when the path is empty.
    pub next_vertex:       u32,
    pub remaining:         u32,
}

impl RobotSnapshotRow {
    pub fn new(tick: u64, robot: &Robot) -> Self {
        Self {
            robot_id:          robot.id().0,
            tick,
            status:            robot.status().as_str(),
            current_vertex:    robot.current_vertex().0,
            holds_reservation: robot.holds_reservation(),
            next_vertex:       robot.path().next().unwrap_or(VertexId::INVALID).0,
            remaining:         robot.path().len() as u32,
        }
    }
}
