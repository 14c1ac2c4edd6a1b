//! Fluent builder for constructing a [`FleetSim`].

use fm_core::{FleetConfig, SimClock, Tick};
use fm_fleet::FleetManager;
use fm_graph::{NavGraph, Planner};
use fm_traffic::TrafficManager;

use crate::{FleetSim, SimResult, TimerQueue};

/// Fluent builder for [`FleetSim<P>`].
///
/// # Required inputs
///
/// - [`FleetConfig`]: step interval, snapshot interval, horizon
/// - `P: Planner`: the path search (e.g. [`fm_graph::AStarPlanner`])
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                  |
/// |----------------|--------------------------|
/// | `.graph(g)`    | `NavGraph::empty()`      |
/// | `.traffic(t)`  | empty reservation table  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = FleetSimBuilder::new(config, AStarPlanner)
///     .graph(graph)
///     .build()?;
/// ```
pub struct FleetSimBuilder<P: Planner> {
    config:  FleetConfig,
    planner: P,
    graph:   Option<NavGraph>,
    traffic: Option<TrafficManager>,
}

impl<P: Planner> FleetSimBuilder<P> {
    pub fn new(config: FleetConfig, planner: P) -> Self {
        Self { config, planner, graph: None, traffic: None }
    }

    /// Supply the navigation graph.
    ///
    /// If not called, the graph is empty and every spawn and assignment
    /// fails with `VertexNotFound`.
    pub fn graph(mut self, graph: NavGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Start from a pre-filled reservation table, e.g. vertices blocked off
    /// for maintenance.
    pub fn traffic(mut self, traffic: TrafficManager) -> Self {
        self.traffic = Some(traffic);
        self
    }

    /// Validate the config and return a ready-to-run [`FleetSim`] at tick 0.
    pub fn build(self) -> SimResult<FleetSim<P>> {
        self.config.validate()?;

        let fleet = match self.traffic {
            Some(t) => FleetManager::with_traffic(t),
            None => FleetManager::new(),
        };
        let next_snapshot = (self.config.snapshot_interval_ms > 0).then_some(Tick::ZERO);

        Ok(FleetSim {
            config:  self.config,
            clock:   SimClock::new(),
            graph:   self.graph.unwrap_or_else(NavGraph::empty),
            planner: self.planner,
            fleet,
            timers:  TimerQueue::new(),
            events:  Vec::new(),
            next_snapshot,
        })
    }
}
