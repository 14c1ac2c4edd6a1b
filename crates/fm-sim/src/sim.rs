//! The `FleetSim` coordinator: commands plus the timer loop.

use tracing::{debug, info, trace, warn};

use fm_core::{AgentId, FleetConfig, SimClock, Tick, VertexId};
use fm_fleet::{FleetManager, Robot, RobotSnapshot, StepOutcome};
use fm_graph::{NavGraph, Planner};
use fm_traffic::TrafficManager;

use crate::{
    CommandError, CommandResult, EventRecord, FleetEvent, FleetObserver, TimerQueue,
};

/// Acknowledgement for a successful `assign_destination`.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskAck {
    /// The robot right after the assignment.
    pub robot: RobotSnapshot,
    /// Planned route from the robot's vertex to the destination, inclusive.
    pub route: Vec<VertexId>,
}

/// Owns the graph, planner, fleet, and timers, and drives them.
///
/// Create via [`FleetSimBuilder`][crate::FleetSimBuilder].
pub struct FleetSim<P: Planner> {
    pub config: FleetConfig,

    /// Simulated "now".  Only moves forward.
    pub clock: SimClock,

    pub(crate) graph:         NavGraph,
    pub(crate) planner:       P,
    pub(crate) fleet:         FleetManager,
    pub(crate) timers:        TimerQueue,
    pub(crate) events:        Vec<EventRecord>,
    pub(crate) next_snapshot: Option<Tick>,
}

impl<P: Planner> FleetSim<P> {
    // ── Commands ──────────────────────────────────────────────────────────

    /// Spawn a robot at `vertex`.
    ///
    /// Fails with `VertexNotFound` for an index outside the graph (so every
    /// spawn on an empty graph fails) and with `VertexOccupied` if the
    /// vertex is reserved.
    pub fn spawn(&mut self, vertex: VertexId) -> CommandResult<RobotSnapshot> {
        let result = if self.graph.contains(vertex) {
            self.fleet
                .spawn(vertex)
                .map(Robot::snapshot)
                .map_err(CommandError::from)
        } else {
            Err(CommandError::VertexNotFound(vertex))
        };

        match &result {
            Ok(robot) => self.emit(FleetEvent::Spawned { agent: robot.id, vertex }),
            Err(e) => {
                warn!(vertex = vertex.0, reason = %e, "spawn denied");
                self.emit(FleetEvent::SpawnDenied { vertex, reason: e.to_string() });
            }
        }
        result
    }

    /// Plan a route for `agent` to `destination` and start it moving.
    ///
    /// The destination must be free when the command is issued.  That check
    /// reads the table and reserves nothing; the robot claims each vertex,
    /// destination included, when it steps onto it.  The first step fires
    /// one interval after this call.
    pub fn assign_destination(
        &mut self,
        agent:       AgentId,
        destination: VertexId,
    ) -> CommandResult<TaskAck> {
        let result = self.try_assign(agent, destination);
        match &result {
            Ok(ack) => self.emit(FleetEvent::TaskAssigned {
                agent,
                destination,
                path: ack.robot.path.clone(),
            }),
            Err(e) => {
                warn!(robot = agent.0, destination = destination.0, reason = %e, "task rejected");
                self.emit(FleetEvent::TaskRejected { agent, destination, reason: e.to_string() });
            }
        }
        result
    }

    fn try_assign(&mut self, agent: AgentId, destination: VertexId) -> CommandResult<TaskAck> {
        let start = self
            .fleet
            .get(agent)
            .ok_or(CommandError::AgentNotFound(agent))?
            .current_vertex();

        if !self.graph.contains(destination) {
            return Err(CommandError::VertexNotFound(destination));
        }
        if let Some(owner) = self.fleet.traffic().owner(destination) {
            return Err(CommandError::VertexOccupied { vertex: destination, owner });
        }

        let route = self.planner.plan(&self.graph, start, destination)?;
        let waypoints = route[1..].to_vec();

        let (snapshot, epoch) = {
            let robot = self.fleet.assign_task(agent, waypoints)?;
            (robot.snapshot(), robot.timer_epoch())
        };
        if let Some(epoch) = epoch {
            let due = self.now().offset(self.config.step_interval_ms);
            self.timers.push(due, agent, epoch);
        }

        Ok(TaskAck { robot: snapshot, route })
    }

    /// Stop `agent` and release its vertex.  Any timer still queued for it
    /// is dropped when it comes due.
    pub fn stop(&mut self, agent: AgentId) -> CommandResult<RobotSnapshot> {
        let result = self
            .fleet
            .stop(agent)
            .map(Robot::snapshot)
            .map_err(CommandError::from);

        match &result {
            Ok(robot) => self.emit(FleetEvent::Stopped { agent, at: robot.current_vertex }),
            Err(e) => self.emit(FleetEvent::StopRejected { agent, reason: e.to_string() }),
        }
        result
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run from now to `config.end_tick()`, then call `on_run_end`.
    pub fn run<O: FleetObserver>(&mut self, observer: &mut O) {
        let end = self.config.end_tick();
        self.run_until(end, observer);
        observer.on_run_end(self.now());
    }

    /// Run for `ms` simulated milliseconds from now.
    pub fn run_for<O: FleetObserver>(&mut self, ms: u64, observer: &mut O) {
        let until = self.now().offset(ms);
        self.run_until(until, observer);
    }

    /// Fire every timer due at or before `until`, in time order, then leave
    /// the clock at `until`.
    pub fn run_until<O: FleetObserver>(&mut self, until: Tick, observer: &mut O) {
        self.flush_events(observer);

        while let Some(due) = self.timers.next_tick().filter(|&t| t <= until) {
            self.snapshots_before(due, observer);
            self.clock.advance_to(due);
            self.fire(due);
            self.flush_events(observer);
        }

        self.snapshots_before(until.offset(1), observer);
        self.clock.advance_to(until);
    }

    /// Fire only the earliest batch of timers.  Returns the tick fired, or
    /// `None` if no timer is pending.
    pub fn run_next<O: FleetObserver>(&mut self, observer: &mut O) -> Option<Tick> {
        let due = self.timers.next_tick()?;
        self.run_until(due, observer);
        Some(due)
    }

    fn fire(&mut self, now: Tick) {
        let Some(mut due) = self.timers.drain_tick(now) else {
            return;
        };
        due.sort_by_key(|e| e.agent);

        for entry in due {
            let agent = entry.agent;
            if self.timer_epoch(agent) != Some(entry.epoch) {
                trace!(robot = agent.0, epoch = entry.epoch, "stale timer dropped");
                continue;
            }

            let Ok(outcome) = self.fleet.step(agent) else {
                continue;
            };
            match outcome {
                StepOutcome::Idle => {}
                StepOutcome::Moved { from, to } => {
                    self.emit(FleetEvent::Moved { agent, from, to });
                }
                StepOutcome::Blocked { vertex } => {
                    self.emit(FleetEvent::Blocked { agent, waiting_for: vertex });
                }
                StepOutcome::Completed { from, at } => {
                    self.emit(FleetEvent::Moved { agent, from, to: at });
                    self.emit(FleetEvent::TaskCompleted { agent, at });
                }
            }

            if self.timer_epoch(agent) == Some(entry.epoch) {
                self.timers.push(now.offset(self.config.step_interval_ms), agent, entry.epoch);
            }
        }
    }

    fn snapshots_before<O: FleetObserver>(&mut self, limit: Tick, observer: &mut O) {
        let interval = self.config.snapshot_interval_ms;
        while let Some(at) = self.next_snapshot.filter(|&t| t < limit) {
            observer.on_snapshot(at, &self.fleet);
            self.next_snapshot = Some(at.offset(interval));
        }
    }

    // ── Events ────────────────────────────────────────────────────────────

    fn emit(&mut self, event: FleetEvent) {
        let now = self.now();
        match &event {
            FleetEvent::Moved { .. } | FleetEvent::Blocked { .. } => debug!(tick = now.0, ?event, "fleet event"),
            _ => info!(tick = now.0, ?event, "fleet event"),
        }
        self.events.push(EventRecord { tick: now, event });
    }

    /// Deliver buffered events to `observer`, oldest first.
    pub fn flush_events<O: FleetObserver>(&mut self, observer: &mut O) {
        for record in self.events.drain(..) {
            observer.on_event(&record);
        }
    }

    /// Take buffered events without an observer.
    pub fn drain_events(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.events)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn graph(&self) -> &NavGraph {
        &self.graph
    }

    pub fn planner(&self) -> &P {
        &self.planner
    }

    pub fn fleet(&self) -> &FleetManager {
        &self.fleet
    }

    pub fn traffic(&self) -> &TrafficManager {
        self.fleet.traffic()
    }

    pub fn robot(&self, agent: AgentId) -> Option<RobotSnapshot> {
        self.fleet.get(agent).map(Robot::snapshot)
    }

    /// Every robot in spawn order.
    pub fn robots(&self) -> Vec<RobotSnapshot> {
        self.fleet.iter().map(Robot::snapshot).collect()
    }

    /// Queued timer entries, stale ones included.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn timer_epoch(&self, agent: AgentId) -> Option<u64> {
        self.fleet.get(agent).and_then(Robot::timer_epoch)
    }
}
