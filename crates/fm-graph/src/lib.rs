//! `fm-graph`: navigation graph and path planning.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `NavGraph` (vertices + CSR adjacency), `NavGraphBuilder`, `Vertex`, `Lane` |
//! | [`planner`] | `Planner` trait, `AStarPlanner`, `find_path`, `path_cost`   |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                              |
//!
//! The graph is read-only once built.  Parsing the on-disk nav-graph document
//! is the loader's job; this crate only accepts the already-parsed vertex and
//! lane arrays (both implement `Deserialize` for that shape).

pub mod error;
pub mod network;
pub mod planner;


pub use error::{GraphError, GraphResult};
pub use network::{Lane, NavGraph, NavGraphBuilder, Vertex};
pub use planner::{AStarPlanner, Planner, find_path, path_cost};
