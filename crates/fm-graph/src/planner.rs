//! Planner trait and default A* implementation.
//!
//! # Pluggability
//!
//! The coordinator calls planning through the [`Planner`] trait, so
//! applications can swap in another search (lane-weighted costs, precomputed
//! tables) without touching the fleet core.
//!
//! # Cost model
//!
//! Moving along a lane costs the Manhattan distance between its endpoints,
//! and the heuristic is the Manhattan distance to the goal.  Under that cost
//! the heuristic is consistent (triangle inequality), so the first time the
//! goal is popped its cost is optimal.
//!
//! # Ties
//!
//! The frontier is ordered by `(f, VertexId)`: equal estimates pop the lower
//! vertex index first.  Any shortest path is correct; this one is repeatable.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::trace;

use fm_core::VertexId;

use crate::{GraphError, GraphResult, NavGraph};

// ── Planner trait ─────────────────────────────────────────────────────────────

/// Pluggable path search.
///
/// Implementations must be `Send + Sync` so one planner can be shared by
/// several coordinators.
pub trait Planner: Send + Sync {
    /// Compute the full vertex path from `start` to `goal`, both inclusive.
    ///
    /// `start == goal` yields `[start]`.  Unknown vertices produce
    /// [`GraphError::VertexNotFound`]; unreachable goals produce
    /// [`GraphError::NoPath`].
    fn plan(&self, graph: &NavGraph, start: VertexId, goal: VertexId) -> GraphResult<Vec<VertexId>>;
}

// ── AStarPlanner ──────────────────────────────────────────────────────────────

/// A* over the undirected lane graph with the Manhattan metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPlanner;

impl Planner for AStarPlanner {
    fn plan(&self, graph: &NavGraph, start: VertexId, goal: VertexId) -> GraphResult<Vec<VertexId>> {
        for v in [start, goal] {
            if !graph.contains(v) {
                return Err(GraphError::VertexNotFound(v));
            }
        }
        if start == goal {
            return Ok(vec![start]);
        }
        a_star(graph, start, goal).ok_or(GraphError::NoPath { from: start, to: goal })
    }
}

/// Shortest path as a plain vector: `[start]` when `start == goal`, `[]`
/// when no path exists (or either vertex is unknown).  Callers must tell
/// those two apart.
pub fn find_path(graph: &NavGraph, start: VertexId, goal: VertexId) -> Vec<VertexId> {
    AStarPlanner.plan(graph, start, goal).unwrap_or_default()
}

/// Sum of Manhattan lane lengths along `path`.  Zero for paths shorter than
/// two vertices.
pub fn path_cost(graph: &NavGraph, path: &[VertexId]) -> f64 {
    path.windows(2)
        .map(|w| graph.position(w[0]).manhattan(graph.position(w[1])))
        .sum()
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Total-ordered `f64` for the heap.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn a_star(graph: &NavGraph, start: VertexId, goal: VertexId) -> Option<Vec<VertexId>> {
    let n = graph.vertex_count();
    let goal_pos = graph.position(goal);
    let h = |v: VertexId| graph.position(v).manhattan(goal_pos);

    // g[v] = best known cost from start; prev[v] = predecessor on that path.
    let mut g    = vec![f64::INFINITY; n];
    let mut prev = vec![VertexId::INVALID; n];
    g[start.index()] = 0.0;

    // Min-heap on (f, vertex).  A vertex may sit in the heap several times
    // with different estimates; stale entries are skipped on pop.
    let mut open: BinaryHeap<Reverse<(Cost, VertexId)>> = BinaryHeap::new();
    open.push(Reverse((Cost(h(start)), start)));

    while let Some(Reverse((Cost(f), current))) = open.pop() {
        if current == goal {
            return Some(reconstruct(&prev, start, goal));
        }

        let g_current = g[current.index()];
        if f > g_current + h(current) {
            continue;
        }

        let current_pos = graph.position(current);
        for &neighbor in graph.neighbors(current) {
            let tentative = g_current + current_pos.manhattan(graph.position(neighbor));
            if tentative < g[neighbor.index()] {
                g[neighbor.index()] = tentative;
                prev[neighbor.index()] = current;
                open.push(Reverse((Cost(tentative + h(neighbor)), neighbor)));
            }
        }
    }

    trace!(from = start.0, to = goal.0, "frontier exhausted without reaching goal");
    None
}

fn reconstruct(prev: &[VertexId], start: VertexId, goal: VertexId) -> Vec<VertexId> {
    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        cur = prev[cur.index()];
        path.push(cur);
    }
    path.reverse();
    path
}
