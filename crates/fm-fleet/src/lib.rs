//! `fm-fleet`: robots and the registry that owns them.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`robot`]   | `Robot`, `RobotStatus`, `StepOutcome`, `RobotSnapshot`        |
//! | [`manager`] | `FleetManager`: spawn, assign, stop, step; owns the traffic table |
//! | [`error`]   | `FleetError`, `FleetResult<T>`                                |
//!
//! # Movement model
//!
//! A robot advances one vertex per step:
//!
//! 1. Release the vertex it stands on (if it still holds it).
//! 2. Pop the next waypoint and request it.
//! 3. Denied → put the waypoint back and report `Blocked`; the robot retries
//!    on its next step, holding nothing meanwhile.
//! 4. Granted → move there; if that was the last waypoint, release it and
//!    finish the task.
//!
//! Step cadence (when `step` is called) belongs to the coordinator; the robot
//! only records whether its timer is running and under which epoch, so stale
//! timer firings can be told apart from live ones.

pub mod error;
pub mod manager;
pub mod robot;

#[cfg(test)]
mod tests;

pub use error::{FleetError, FleetResult};
pub use manager::FleetManager;
pub use robot::{Robot, RobotSnapshot, RobotStatus, StepOutcome};
