//! Integration tests for fm-output.

use fm_core::{AgentId, FleetConfig, Point, VertexId};
use fm_graph::{AStarPlanner, NavGraph, NavGraphBuilder};
use fm_sim::{FleetSim, FleetSimBuilder};

fn line(n: u32) -> NavGraph {
    let mut b = NavGraphBuilder::new();
    let ids: Vec<_> = (0..n).map(|i| b.add_vertex(Point::new(i as f64, 0.0))).collect();
    for w in ids.windows(2) {
        b.add_lane(w[0], w[1]);
    }
    b.build()
}

/// One robot at 0 heading for 3, snapshots every second, 2 s horizon.
fn sim_with_task() -> FleetSim<AStarPlanner> {
    let config = FleetConfig {
        step_interval_ms:     500,
        snapshot_interval_ms: 1_000,
        horizon_ms:           2_000,
    };
    let mut sim = FleetSimBuilder::new(config, AStarPlanner).graph(line(4)).build().unwrap();
    sim.spawn(VertexId(0)).unwrap();
    sim.assign_destination(AgentId(0), VertexId(3)).unwrap();
    sim
}

fn read_rows(path: &std::path::Path) -> Vec<csv::StringRecord> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.records().map(|r| r.unwrap()).collect()
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{CsvEventWriter, EventRow, EventWriter, RobotSnapshotRow};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn files_and_headers() {
        let dir = tmp();
        let mut w = CsvEventWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("fleet_events.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["tick_ms", "event", "robot_id", "vertex", "detail"]);

        let mut rdr = csv::Reader::from_path(dir.path().join("robot_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["tick_ms", "robot_id", "status", "current_vertex", "holds_reservation", "next_vertex", "remaining"]
        );
    }

    #[test]
    fn missing_fields_are_empty_cells() {
        let dir = tmp();
        let mut w = CsvEventWriter::new(dir.path()).unwrap();
        w.write_event(&EventRow {
            tick:     0,
            kind:     "spawn_denied",
            agent_id: None,
            vertex:   Some(4),
            detail:   "vertex VertexId(4) not found in graph".into(),
        })
        .unwrap();
        w.write_snapshots(&[RobotSnapshotRow {
            robot_id:          2,
            tick:              1_000,
            status:            "idle",
            current_vertex:    7,
            holds_reservation: true,
            next_vertex:       u32::MAX,
            remaining:         0,
        }])
        .unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // idempotent

        let events = read_rows(&dir.path().join("fleet_events.csv"));
        assert_eq!(&events[0][2], "");
        assert_eq!(&events[0][3], "4");

        let snaps = read_rows(&dir.path().join("robot_snapshots.csv"));
        assert_eq!(&snaps[0][4], "1");
        assert_eq!(&snaps[0][5], "");
    }
}

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::{CsvEventWriter, EventLogObserver, EventRow, EventWriter, OutputError, OutputResult, RobotSnapshotRow};

    #[test]
    fn full_run_written_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = sim_with_task();
        let mut obs = EventLogObserver::new(CsvEventWriter::new(dir.path()).unwrap());
        sim.run(&mut obs);
        assert!(obs.take_error().is_none());
        assert_eq!(obs.events_written(), 6);

        let events = read_rows(&dir.path().join("fleet_events.csv"));
        let kinds: Vec<_> = events.iter().map(|r| r[1].to_owned()).collect();
        assert_eq!(
            kinds,
            ["spawned", "task_assigned", "moved", "moved", "moved", "task_completed"]
        );
        assert_eq!(&events[1][4], "1 2 3");
        assert_eq!(&events[2][0], "500");
        assert_eq!(&events[2][4], "from 0");
        assert_eq!(&events[5][0], "1500");
        assert_eq!(&events[5][3], "3");

        let snaps = read_rows(&dir.path().join("robot_snapshots.csv"));
        let ticks: Vec<_> = snaps.iter().map(|r| r[0].to_owned()).collect();
        assert_eq!(ticks, ["0", "1000", "2000"]);
        assert_eq!(&snaps[0][2], "moving");
        assert_eq!(&snaps[0][5], "1");
        assert_eq!(&snaps[0][6], "3");
        assert_eq!(&snaps[2][2], "task_complete");
        assert_eq!(&snaps[2][3], "3");
        assert_eq!(&snaps[2][4], "0");
    }

    struct FailingWriter {
        attempts: usize,
    }

    impl EventWriter for FailingWriter {
        fn write_event(&mut self, _row: &EventRow) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other(format!("disk full #{}", self.attempts))))
        }

        fn write_snapshots(&mut self, _rows: &[RobotSnapshotRow]) -> OutputResult<()> {
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_kept() {
        let mut sim = sim_with_task();
        let mut obs = EventLogObserver::new(FailingWriter { attempts: 0 });
        sim.run(&mut obs);

        let err = obs.take_error().unwrap();
        assert_eq!(err.to_string(), "I/O error: disk full #1");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.events_written(), 0);
        // Every event was still offered to the writer.
        assert_eq!(obs.into_writer().attempts, 6);
    }
}
