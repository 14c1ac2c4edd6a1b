//! The fleet registry.

use tracing::{error, info, warn};

use fm_core::{AgentId, VertexId};
use fm_traffic::TrafficManager;

use crate::{FleetError, FleetResult, Robot, StepOutcome};

/// Owns every robot plus the reservation table they share.
///
/// Robots are kept in spawn order and never removed.  Keeping the
/// [`TrafficManager`] here lets each robot method borrow the table mutably
/// alongside the robot itself without any shared ownership.
#[derive(Debug, Default)]
pub struct FleetManager {
    robots:  Vec<Robot>,
    next_id: u32,
    traffic: TrafficManager,
}

impl FleetManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing reservation table (e.g. with fixed obstacles
    /// already reserved).
    pub fn with_traffic(traffic: TrafficManager) -> Self {
        Self { robots: Vec::new(), next_id: 0, traffic }
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Reserve `vertex` and create an idle robot there.
    ///
    /// On denial nothing changes: no robot, no id consumed.
    pub fn spawn(&mut self, vertex: VertexId) -> FleetResult<&Robot> {
        if let Err(e) = self.traffic.try_request(None, vertex) {
            warn!(vertex = vertex.0, "vertex occupied; cannot spawn robot");
            return Err(FleetError::VertexOccupied(e));
        }

        let id = AgentId(self.next_id);
        self.next_id += 1;
        self.robots.push(Robot::new(id, vertex));
        info!(robot = id.0, vertex = vertex.0, "robot spawned");
        Ok(&self.robots[self.robots.len() - 1])
    }

    /// Hand `path` (waypoints after the robot's current vertex) to `agent`.
    pub fn assign_task(&mut self, agent: AgentId, path: Vec<VertexId>) -> FleetResult<&Robot> {
        let Some(robot) = self.robots.iter_mut().find(|r| r.id() == agent) else {
            error!(robot = agent.0, "failed to assign task: robot not found");
            return Err(FleetError::AgentNotFound(agent));
        };
        info!(robot = agent.0, path = ?path, "assigned task");
        robot.assign_task(path, &mut self.traffic);
        Ok(&*robot)
    }

    /// Stop `agent` and release the vertex it holds.
    pub fn stop(&mut self, agent: AgentId) -> FleetResult<&Robot> {
        let Some(robot) = self.robots.iter_mut().find(|r| r.id() == agent) else {
            error!(robot = agent.0, "failed to stop: robot not found");
            return Err(FleetError::AgentNotFound(agent));
        };
        robot.stop(&mut self.traffic);
        info!(robot = agent.0, vertex = robot.current_vertex().0, "robot stopped");
        Ok(&*robot)
    }

    /// Run one step of `agent`'s state machine.
    pub fn step(&mut self, agent: AgentId) -> FleetResult<StepOutcome> {
        let robot = self
            .robots
            .iter_mut()
            .find(|r| r.id() == agent)
            .ok_or(FleetError::AgentNotFound(agent))?;
        Ok(robot.step(&mut self.traffic))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn get(&self, agent: AgentId) -> Option<&Robot> {
        self.robots.iter().find(|r| r.id() == agent)
    }

    /// Robots in spawn order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Robot> + '_ {
        self.robots.iter()
    }

    pub fn len(&self) -> usize {
        self.robots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }

    /// The id the next successful spawn will receive.
    pub fn next_id(&self) -> AgentId {
        AgentId(self.next_id)
    }

    pub fn traffic(&self) -> &TrafficManager {
        &self.traffic
    }

    /// Direct table access for collaborators that reserve vertices outside
    /// any robot (blocked-off areas, tests).
    pub fn traffic_mut(&mut self) -> &mut TrafficManager {
        &mut self.traffic
    }
}
