//! `fm-sim`: the coordinator that drives the fleet.
//!
//! # Event loop
//!
//! Every robot with a task has its own periodic step timer.  All timers live
//! in one [`TimerQueue`] and fire from one loop:
//!
//! ```text
//! while next_due <= until:
//!   ① Snapshots: observer.on_snapshot for every snapshot tick before next_due
//!   ② Advance  : clock jumps to next_due
//!   ③ Fire     : for each (robot, epoch) due now, ascending AgentId:
//!                   epoch stale (stopped / reassigned) → drop
//!                   otherwise Robot::step, emit events, re-arm at +interval
//!   ④ Flush    : buffered events go to observer.on_event
//! ```
//!
//! Since only this loop (and the commands, which take `&mut self`) touch the
//! reservation table, every request/release is serialized.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fm_core::{FleetConfig, VertexId};
//! use fm_graph::AStarPlanner;
//! use fm_sim::{FleetSimBuilder, NoopObserver};
//!
//! let mut sim = FleetSimBuilder::new(FleetConfig::default(), AStarPlanner)
//!     .graph(graph)
//!     .build()?;
//! let robot = sim.spawn(VertexId(0))?;
//! sim.assign_destination(robot.id, VertexId(5))?;
//! sim.run_for(10_000, &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod events;
pub mod observer;
pub mod sim;
pub mod timers;


pub use builder::FleetSimBuilder;
pub use error::{CommandError, CommandResult, SimError, SimResult};
pub use events::{EventRecord, FleetEvent};
pub use observer::{FleetObserver, NoopObserver};
pub use sim::{FleetSim, TaskAck};
pub use timers::{TimerEntry, TimerQueue};
