//! `fm-core`: foundational types for the fleet manager workspace.
//!
//! This crate is a dependency of every other `fm-*` crate.  It has no `fm-*`
//! dependencies and only `thiserror` (plus optional `serde`) from outside.
//!
//! # What lives here
//!
//! | Module    | Contents                                            |
//! |-----------|-----------------------------------------------------|
//! | [`ids`]   | `AgentId`, `VertexId`                               |
//! | [`geo`]   | `Point`, Manhattan distance                         |
//! | [`time`]  | `Tick`, `SimClock`, `FleetConfig`                   |
//! | [`error`] | `FmError`, `FmResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{FmError, FmResult};
pub use geo::Point;
pub use ids::{AgentId, VertexId};
pub use time::{FleetConfig, SimClock, Tick};
