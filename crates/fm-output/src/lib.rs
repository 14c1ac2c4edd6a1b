//! `fm-output`: operational logs for a fleet run.
//!
//! | Writer            | Files created                                 |
//! |-------------------|-----------------------------------------------|
//! | [`CsvEventWriter`]| `fleet_events.csv`, `robot_snapshots.csv`     |
//!
//! Writers implement [`EventWriter`] and are driven by [`EventLogObserver`],
//! which implements `fm_sim::FleetObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fm_output::{CsvEventWriter, EventLogObserver};
//!
//! let writer = CsvEventWriter::new(Path::new("./output"))?;
//! let mut obs = EventLogObserver::new(writer);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvEventWriter;
pub use error::{OutputError, OutputResult};
pub use observer::EventLogObserver;
pub use row::{EventRow, RobotSnapshotRow};
pub use writer::EventWriter;
