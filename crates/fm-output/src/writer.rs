//! The `EventWriter` trait implemented by log backends.

use crate::{EventRow, OutputResult, RobotSnapshotRow};

/// Sink for fleet events and periodic robot snapshots.
///
/// The observer never sees these errors directly: they are stored and
/// retrieved with [`EventLogObserver::take_error`][crate::EventLogObserver::take_error].
pub trait EventWriter {
    /// Append one event row.
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Append one snapshot row per robot.
    fn write_snapshots(&mut self, rows: &[RobotSnapshotRow]) -> OutputResult<()>;

    /// Flush all underlying handles.  Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
