//! CSV log backend.
//!
//! Creates two files in the configured output directory:
//! - `fleet_events.csv`
//! - `robot_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use tracing::debug;

use crate::writer::EventWriter;
use crate::{EventRow, OutputResult, RobotSnapshotRow};

/// Writes fleet logs to two CSV files.
///
/// Optional fields are written as empty cells.
pub struct CsvEventWriter {
    events:    Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvEventWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("fleet_events.csv"))?;
        events.write_record(["tick_ms", "event", "robot_id", "vertex", "detail"])?;

        let mut snapshots = Writer::from_path(dir.join("robot_snapshots.csv"))?;
        snapshots.write_record([
            "tick_ms",
            "robot_id",
            "status",
            "current_vertex",
            "holds_reservation",
            "next_vertex",
            "remaining",
        ])?;

        debug!(dir = %dir.display(), "csv event writer opened");
        Ok(Self { events, snapshots, finished: false })
    }
}

fn opt(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl EventWriter for CsvEventWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.tick.to_string(),
            row.kind.to_owned(),
            opt(row.agent_id),
            opt(row.vertex),
            row.detail.clone(),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[RobotSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            let next = (row.next_vertex != u32::MAX).then_some(row.next_vertex);
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.robot_id.to_string(),
                row.status.to_owned(),
                row.current_vertex.to_string(),
                (row.holds_reservation as u8).to_string(),
                opt(next),
                row.remaining.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
