//! `EventLogObserver<W>`: bridges `FleetObserver` to an `EventWriter`.

use fm_core::Tick;
use fm_fleet::FleetManager;
use fm_sim::{EventRecord, FleetObserver};
use tracing::warn;

use crate::row::{EventRow, RobotSnapshotRow};
use crate::writer::EventWriter;
use crate::{OutputError, OutputResult};

/// A [`FleetObserver`] that writes every event, plus robot snapshots at the
/// configured interval, to any [`EventWriter`].
///
/// `FleetObserver` methods return nothing, so write errors are stored.  Only
/// the first is kept; check it with [`take_error`][Self::take_error] once the
/// run returns.
pub struct EventLogObserver<W: EventWriter> {
    writer:         W,
    events_written: u64,
    last_error:     Option<OutputError>,
}

impl<W: EventWriter> EventLogObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, events_written: 0, last_error: None }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Number of event rows handed to the writer successfully.
    pub fn events_written(&self) -> u64 {
        self.events_written
    }

    /// Flush the writer.  `FleetSim::run` does this through `on_run_end`;
    /// call it directly after `run_for` / `run_until`.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                warn!(error = %e, "fleet log write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: EventWriter> FleetObserver for EventLogObserver<W> {
    fn on_event(&mut self, record: &EventRecord) {
        let result = self.writer.write_event(&EventRow::from(record));
        if result.is_ok() {
            self.events_written += 1;
        }
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, fleet: &FleetManager) {
        let rows: Vec<RobotSnapshotRow> =
            fleet.iter().map(|robot| RobotSnapshotRow::new(tick.0, robot)).collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        self.finish();
    }
}
