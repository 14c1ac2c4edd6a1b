//! Unit tests for fm-fleet.

use fm_core::{AgentId, VertexId};
use fm_traffic::Owner;

use crate::{FleetError, FleetManager, RobotStatus, StepOutcome};

fn v(i: u32) -> VertexId {
    VertexId(i)
}

fn path(ids: &[u32]) -> Vec<VertexId> {
    ids.iter().copied().map(VertexId).collect()
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod spawn {
    use super::*;

    #[test]
    fn ids_are_sequential_from_zero() {
        let mut fleet = FleetManager::new();
        assert_eq!(fleet.spawn(v(0)).unwrap().id(), AgentId(0));
        assert_eq!(fleet.spawn(v(1)).unwrap().id(), AgentId(1));
        assert_eq!(fleet.next_id(), AgentId(2));
        assert_eq!(fleet.len(), 2);
    }

    #[test]
    fn spawned_robot_is_idle_and_holds_start() {
        let mut fleet = FleetManager::new();
        let robot = fleet.spawn(v(3)).unwrap();
        assert_eq!(robot.status(), RobotStatus::Idle);
        assert_eq!(robot.current_vertex(), v(3));
        assert!(robot.holds_reservation());
        assert_eq!(robot.path().len(), 0);
        assert_eq!(fleet.traffic().owner(v(3)), Some(Owner::Unassigned));
    }

    #[test]
    fn spawn_on_occupied_vertex_is_denied() {
        let mut fleet = FleetManager::new();
        fleet.spawn(v(3)).unwrap();
        let err = fleet.spawn(v(3)).unwrap_err();
        assert!(matches!(err, FleetError::VertexOccupied(_)));
        // Counter and registry untouched.
        assert_eq!(fleet.next_id(), AgentId(1));
        assert_eq!(fleet.len(), 1);
        assert_eq!(fleet.traffic().len(), 1);
    }

    #[test]
    fn spawn_on_robot_held_vertex_is_denied() {
        let mut fleet = FleetManager::new();
        fleet.traffic_mut().request(Some(AgentId(40)), v(8));
        assert!(fleet.spawn(v(8)).is_err());
        assert!(fleet.is_empty());
    }
}

// ── Task assignment ───────────────────────────────────────────────────────────

#[cfg(test)]
mod assign {
    use super::*;

    #[test]
    fn unknown_robot_reports_not_found() {
        let mut fleet = FleetManager::new();
        fleet.spawn(v(0)).unwrap();
        let err = fleet.assign_task(AgentId(9), path(&[1])).unwrap_err();
        assert_eq!(err, FleetError::AgentNotFound(AgentId(9)));
        assert_eq!(err.to_string(), "robot AgentId(9) not found");
        // No state mutation.
        assert_eq!(fleet.get(AgentId(0)).unwrap().status(), RobotStatus::Idle);
    }

    #[test]
    fn assignment_starts_timer_and_sets_moving() {
        let mut fleet = FleetManager::new();
        fleet.spawn(v(0)).unwrap();
        let robot = fleet.assign_task(AgentId(0), path(&[1, 2])).unwrap();
        assert_eq!(robot.status(), RobotStatus::Moving);
        assert_eq!(robot.path().collect::<Vec<_>>(), path(&[1, 2]));
        assert!(robot.timer_epoch().is_some());
    }

    #[test]
    fn reassignment_overwrites_path_and_bumps_epoch() {
        let mut fleet = FleetManager::new();
        fleet.spawn(v(0)).unwrap();
        let first = fleet.assign_task(AgentId(0), path(&[1, 2])).unwrap().timer_epoch();
        let robot = fleet.assign_task(AgentId(0), path(&[4])).unwrap();
        assert_eq!(robot.path().collect::<Vec<_>>(), path(&[4]));
        assert_ne!(robot.timer_epoch(), first);
    }

    #[test]
    fn empty_path_completes_in_place() {
        let mut fleet = FleetManager::new();
        fleet.spawn(v(2)).unwrap();
        let robot = fleet.assign_task(AgentId(0), vec![]).unwrap();
        assert_eq!(robot.status(), RobotStatus::TaskComplete);
        assert_eq!(robot.timer_epoch(), None);
        assert!(!robot.holds_reservation());
        assert!(fleet.traffic().is_empty());
    }

    #[test]
    fn empty_path_mid_move_cancels_running_timer() {
        let mut fleet = FleetManager::new();
        fleet.spawn(v(0)).unwrap();
        fleet.assign_task(AgentId(0), path(&[1, 2])).unwrap();
        fleet.step(AgentId(0)).unwrap();
        assert!(fleet.get(AgentId(0)).unwrap().timer_epoch().is_some());

        let robot = fleet.assign_task(AgentId(0), vec![]).unwrap();
        assert_eq!(robot.status(), RobotStatus::TaskComplete);
        assert_eq!(robot.timer_epoch(), None);
        assert_eq!(robot.current_vertex(), v(1));
        assert_eq!(fleet.step(AgentId(0)).unwrap(), StepOutcome::Idle);
        assert!(fleet.traffic().is_empty());
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step {
    use super::*;

    #[test]
    fn step_without_task_is_noop() {
        let mut fleet = FleetManager::new();
        fleet.spawn(v(0)).unwrap();
        assert_eq!(fleet.step(AgentId(0)).unwrap(), StepOutcome::Idle);
        // Still holds its spawn vertex.
        assert!(fleet.traffic().is_reserved(v(0)));
    }

    #[test]
    fn step_unknown_robot() {
        let mut fleet = FleetManager::new();
        assert_eq!(fleet.step(AgentId(0)), Err(FleetError::AgentNotFound(AgentId(0))));
    }

    #[test]
    fn moves_one_vertex_per_step() {
        let mut fleet = FleetManager::new();
        fleet.spawn(v(0)).unwrap();
        fleet.assign_task(AgentId(0), path(&[1, 2])).unwrap();

        assert_eq!(fleet.step(AgentId(0)).unwrap(), StepOutcome::Moved { from: v(0), to: v(1) });
        let robot = fleet.get(AgentId(0)).unwrap();
        assert_eq!(robot.current_vertex(), v(1));
        assert_eq!(robot.status(), RobotStatus::Moving);
        assert!(!fleet.traffic().is_reserved(v(0)));
        assert_eq!(fleet.traffic().owner(v(1)), Some(Owner::Agent(AgentId(0))));
    }

    #[test]
    fn blocked_step_keeps_path_and_position() {
        let mut fleet = FleetManager::new();
        fleet.spawn(v(4)).unwrap(); // robot 0
        fleet.spawn(v(5)).unwrap(); // robot 1 sits on 5
        fleet.assign_task(AgentId(0), path(&[5, 6])).unwrap();

        assert_eq!(fleet.step(AgentId(0)).unwrap(), StepOutcome::Blocked { vertex: v(5) });
        let robot = fleet.get(AgentId(0)).unwrap();
        assert_eq!(robot.path().collect::<Vec<_>>(), path(&[5, 6]));
        assert_eq!(robot.current_vertex(), v(4));
        assert_eq!(robot.status(), RobotStatus::Blocked);
        // Released its old vertex and holds nothing while waiting.
        assert!(!fleet.traffic().is_reserved(v(4)));
        assert!(!robot.holds_reservation());
        assert_eq!(fleet.traffic().reserved_by(AgentId(0)).count(), 0);
    }

    #[test]
    fn blocked_retry_does_not_free_someone_elses_vertex() {
        let mut fleet = FleetManager::new();
        fleet.spawn(v(4)).unwrap(); // robot 0
        fleet.spawn(v(5)).unwrap(); // robot 1
        fleet.assign_task(AgentId(0), path(&[5])).unwrap();
        fleet.step(AgentId(0)).unwrap(); // blocked, 4 released

        // Robot 2 takes the vertex robot 0 left.
        fleet.spawn(v(4)).unwrap();
        fleet.step(AgentId(0)).unwrap(); // still blocked
        assert_eq!(fleet.traffic().owner(v(4)), Some(Owner::Unassigned));
    }

    #[test]
    fn retry_succeeds_once_vertex_frees() {
        let mut fleet = FleetManager::new();
        fleet.spawn(v(4)).unwrap();
        fleet.spawn(v(5)).unwrap();
        fleet.assign_task(AgentId(0), path(&[5, 6])).unwrap();
        fleet.step(AgentId(0)).unwrap();

        fleet.stop(AgentId(1)).unwrap(); // frees 5
        assert_eq!(fleet.step(AgentId(0)).unwrap(), StepOutcome::Moved { from: v(4), to: v(5) });
        assert_eq!(fleet.get(AgentId(0)).unwrap().status(), RobotStatus::Moving);
    }

    #[test]
    fn task_completion_releases_everything() {
        let mut fleet = FleetManager::new();
        fleet.spawn(v(0)).unwrap();
        fleet.assign_task(AgentId(0), path(&[1, 2])).unwrap();

        let mut outcomes = Vec::new();
        for _ in 0..5 {
            outcomes.push(fleet.step(AgentId(0)).unwrap());
        }
        assert_eq!(outcomes[1], StepOutcome::Completed { from: v(1), at: v(2) });
        assert!(outcomes[2..].iter().all(|o| *o == StepOutcome::Idle));

        let robot = fleet.get(AgentId(0)).unwrap();
        assert_eq!(robot.status(), RobotStatus::TaskComplete);
        assert_eq!(robot.current_vertex(), v(2));
        assert_eq!(robot.path().len(), 0);
        assert_eq!(robot.timer_epoch(), None);
        assert_eq!(fleet.traffic().reserved_by(AgentId(0)).count(), 0);
        assert!(fleet.traffic().is_empty());
    }
}

// ── Stopping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stop {
    use super::*;

    #[test]
    fn stop_halts_and_releases_but_keeps_path() {
        let mut fleet = FleetManager::new();
        fleet.spawn(v(0)).unwrap();
        fleet.assign_task(AgentId(0), path(&[1, 2, 3])).unwrap();
        fleet.step(AgentId(0)).unwrap();

        let robot = fleet.stop(AgentId(0)).unwrap();
        assert_eq!(robot.status(), RobotStatus::Stopped);
        assert_eq!(robot.timer_epoch(), None);
        assert_eq!(robot.path().collect::<Vec<_>>(), path(&[2, 3]));
        assert!(fleet.traffic().is_empty());

        // A stopped robot does not advance.
        assert_eq!(fleet.step(AgentId(0)).unwrap(), StepOutcome::Idle);
        assert_eq!(fleet.get(AgentId(0)).unwrap().current_vertex(), v(1));
    }

    #[test]
    fn stop_twice_equals_stop_once() {
        let mut fleet = FleetManager::new();
        fleet.spawn(v(0)).unwrap();
        fleet.spawn(v(7)).unwrap();
        fleet.assign_task(AgentId(0), path(&[1, 2])).unwrap();
        fleet.step(AgentId(0)).unwrap();

        let once = fleet.stop(AgentId(0)).unwrap().snapshot();
        let table_once: Vec<_> = {
            let mut t: Vec<_> = fleet.traffic().iter().collect();
            t.sort_by_key(|(v, _)| *v);
            t
        };
        let twice = fleet.stop(AgentId(0)).unwrap().snapshot();
        let mut table_twice: Vec<_> = fleet.traffic().iter().collect();
        table_twice.sort_by_key(|(v, _)| *v);

        assert_eq!(once, twice);
        assert_eq!(table_once, table_twice);
        assert_eq!(table_twice, vec![(v(7), Owner::Unassigned)]);
    }

    #[test]
    fn stop_unknown_robot() {
        let mut fleet = FleetManager::new();
        assert_eq!(fleet.stop(AgentId(3)).unwrap_err(), FleetError::AgentNotFound(AgentId(3)));
    }

    #[test]
    fn reassign_after_stop_resumes() {
        let mut fleet = FleetManager::new();
        fleet.spawn(v(0)).unwrap();
        fleet.assign_task(AgentId(0), path(&[1, 2])).unwrap();
        fleet.stop(AgentId(0)).unwrap();
        fleet.assign_task(AgentId(0), path(&[1])).unwrap();
        assert_eq!(
            fleet.step(AgentId(0)).unwrap(),
            StepOutcome::Completed { from: v(0), at: v(1) }
        );
    }
}
