//! Per-robot movement state machine.

use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, info};

use fm_core::{AgentId, VertexId};
use fm_traffic::TrafficManager;

// ── RobotStatus ───────────────────────────────────────────────────────────────

/// Lifecycle of a robot.
///
/// ```text
/// Idle ──assign──▶ Moving ◀──▶ Blocked
///                    │
///                    ├──last waypoint──▶ TaskComplete
///                    └──stop──────────▶ Stopped
/// ```
///
/// `assign_task` from any state restarts at `Moving`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RobotStatus {
    Idle,
    Moving,
    /// The next waypoint was denied on the last step; retrying.
    Blocked,
    TaskComplete,
    Stopped,
}

impl RobotStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RobotStatus::Idle         => "idle",
            RobotStatus::Moving       => "moving",
            RobotStatus::Blocked      => "blocked",
            RobotStatus::TaskComplete => "task_complete",
            RobotStatus::Stopped      => "stopped",
        }
    }
}

impl fmt::Display for RobotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── StepOutcome ───────────────────────────────────────────────────────────────

/// What a single `step` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing to do: no waypoints left or the timer is not running.
    Idle,
    /// Advanced one vertex; more waypoints remain.
    Moved { from: VertexId, to: VertexId },
    /// `vertex` was denied; it stays at the front of the path.
    Blocked { vertex: VertexId },
    /// Reached the last waypoint and released it.
    Completed { from: VertexId, at: VertexId },
}

// ── RobotSnapshot ─────────────────────────────────────────────────────────────

/// Owned copy of a robot's observable state, returned by commands.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotSnapshot {
    pub id:                AgentId,
    pub status:            RobotStatus,
    pub current_vertex:    VertexId,
    pub path:              Vec<VertexId>,
    pub holds_reservation: bool,
}

// ── Robot ─────────────────────────────────────────────────────────────────────

/// A robot on the graph.
///
/// Created by [`FleetManager::spawn`](crate::FleetManager::spawn) after its
/// start vertex has been reserved, so a new robot holds `current_vertex`.
#[derive(Debug, Clone)]
pub struct Robot {
    id:             AgentId,
    current_vertex: VertexId,
    /// Remaining waypoints, not including `current_vertex`.
    path:           VecDeque<VertexId>,
    status:         RobotStatus,
    /// Whether the table entry for `current_vertex` is ours.  Cleared when we
    /// release it so a later release cannot free a vertex someone else has
    /// since reserved.
    holds_current:  bool,
    /// Epoch of the running step timer; `None` when the timer is stopped.
    timer:          Option<u64>,
    /// Last epoch handed out.
    epoch:          u64,
}

impl Robot {
    pub(crate) fn new(id: AgentId, start: VertexId) -> Self {
        Self {
            id,
            current_vertex: start,
            path:           VecDeque::new(),
            status:         RobotStatus::Idle,
            holds_current:  true,
            timer:          None,
            epoch:          0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn current_vertex(&self) -> VertexId {
        self.current_vertex
    }

    #[inline]
    pub fn status(&self) -> RobotStatus {
        self.status
    }

    /// Remaining waypoints in travel order.
    pub fn path(&self) -> impl ExactSizeIterator<Item = VertexId> + '_ {
        self.path.iter().copied()
    }

    /// `true` while the table entry for `current_vertex` belongs to this
    /// robot.
    #[inline]
    pub fn holds_reservation(&self) -> bool {
        self.holds_current
    }

    /// Epoch of the running step timer, or `None` if it is stopped.
    #[inline]
    pub fn timer_epoch(&self) -> Option<u64> {
        self.timer
    }

    pub fn snapshot(&self) -> RobotSnapshot {
        RobotSnapshot {
            id:                self.id,
            status:            self.status,
            current_vertex:    self.current_vertex,
            path:              self.path.iter().copied().collect(),
            holds_reservation: self.holds_current,
        }
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Replace the path and (re)start the step timer under a fresh epoch.
    ///
    /// Allowed from any status, including mid-move.  An empty path means the
    /// robot is already where it should be: the task completes on the spot
    /// and no timer starts.  That is the one case where the step cadence is
    /// not restarted; a timer armed by an earlier task is cancelled too.
    pub fn assign_task(&mut self, path: Vec<VertexId>, traffic: &mut TrafficManager) {
        self.epoch += 1;
        self.path = path.into();

        if self.path.is_empty() {
            self.release_current(traffic);
            self.status = RobotStatus::TaskComplete;
            self.timer = None;
            info!(robot = self.id.0, at = self.current_vertex.0, "already at destination");
            return;
        }

        self.status = RobotStatus::Moving;
        self.timer = Some(self.epoch);
    }

    /// Advance by at most one vertex.  See the crate docs for the sequence.
    pub fn step(&mut self, traffic: &mut TrafficManager) -> StepOutcome {
        if self.timer.is_none() {
            return StepOutcome::Idle;
        }
        let Some(next) = self.path.pop_front() else {
            return StepOutcome::Idle;
        };

        // Give up the current vertex before asking for the next one.
        self.release_current(traffic);

        if !traffic.request(Some(self.id), next) {
            self.path.push_front(next);
            self.status = RobotStatus::Blocked;
            debug!(robot = self.id.0, waiting_for = next.0, "blocked");
            return StepOutcome::Blocked { vertex: next };
        }

        let from = self.current_vertex;
        self.current_vertex = next;
        self.holds_current = true;

        if self.path.is_empty() {
            self.release_current(traffic);
            self.status = RobotStatus::TaskComplete;
            self.timer = None;
            info!(robot = self.id.0, at = next.0, "task complete");
            return StepOutcome::Completed { from, at: next };
        }

        self.status = RobotStatus::Moving;
        debug!(robot = self.id.0, from = from.0, to = next.0, "moved");
        StepOutcome::Moved { from, to: next }
    }

    /// Halt the timer, mark `Stopped`, and release the current vertex.
    /// The remaining path is kept.  Calling it again changes nothing.
    pub fn stop(&mut self, traffic: &mut TrafficManager) {
        self.timer = None;
        self.status = RobotStatus::Stopped;
        self.release_current(traffic);
    }

    fn release_current(&mut self, traffic: &mut TrafficManager) {
        if self.holds_current {
            traffic.release(self.current_vertex);
            self.holds_current = false;
        }
    }
}
