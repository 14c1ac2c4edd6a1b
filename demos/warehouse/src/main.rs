//! warehouse: headless operator console for the fleet manager.
//!
//! Loads a nav-graph document, spawns robots at random free vertices, and
//! keeps handing idle robots random destinations until the horizon.  Robots
//! found blocked at a dispatch round are stopped and re-routed.  Every event
//! and a periodic robot snapshot go to CSV.
//!
//! ```text
//! warehouse [NAV_GRAPH.json] [CONFIG.json]
//! RUST_LOG=debug warehouse        # include every move and block
//! ```

mod config;
mod nav_file;


use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fm_core::{AgentId, Tick, VertexId};
use fm_fleet::{FleetManager, RobotSnapshot, RobotStatus};
use fm_graph::{AStarPlanner, NavGraph};
use fm_output::{CsvEventWriter, EventLogObserver, EventWriter};
use fm_sim::{EventRecord, FleetEvent, FleetObserver, FleetSim, FleetSimBuilder};

use config::DemoConfig;

const DEFAULT_NAV_GRAPH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/warehouse_floor.json");

/// Destination draws per robot per dispatch round.
const DISPATCH_ATTEMPTS: usize = 3;

// ── Observer wrapper to count outcomes ────────────────────────────────────────

struct CountingObserver<W: EventWriter> {
    inner:         EventLogObserver<W>,
    completed:     BTreeMap<AgentId, usize>,
    blocked:       usize,
    snapshot_rows: usize,
}

impl<W: EventWriter> CountingObserver<W> {
    fn new(inner: EventLogObserver<W>) -> Self {
        Self { inner, completed: BTreeMap::new(), blocked: 0, snapshot_rows: 0 }
    }
}

impl<W: EventWriter> FleetObserver for CountingObserver<W> {
    fn on_event(&mut self, record: &EventRecord) {
        match record.event {
            FleetEvent::TaskCompleted { agent, .. } => *self.completed.entry(agent).or_default() += 1,
            FleetEvent::Blocked { .. } => self.blocked += 1,
            _ => {}
        }
        self.inner.on_event(record);
    }

    fn on_snapshot(&mut self, tick: Tick, fleet: &FleetManager) {
        self.snapshot_rows += fleet.len();
        self.inner.on_snapshot(tick, fleet);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.inner.on_run_end(final_tick);
    }
}

// ── Operator commands ─────────────────────────────────────────────────────────

/// Spawn through the console: the fleet-size ceiling is checked here, before
/// the fleet sees the request.  Failures come back as the reason text shown
/// to the operator.
fn spawn_robot(
    sim:        &mut FleetSim<AStarPlanner>,
    max_robots: usize,
    vertex:     VertexId,
) -> Result<AgentId, String> {
    if sim.fleet().len() >= max_robots {
        warn!(max_robots, "robot limit reached; spawn refused");
        return Err(format!("robot limit of {max_robots} reached"));
    }
    sim.spawn(vertex).map(|r| r.id).map_err(|e| e.to_string())
}

/// Spawn up to `config.robots` robots on distinct random vertices.
fn spawn_fleet(sim: &mut FleetSim<AStarPlanner>, config: &DemoConfig, rng: &mut SmallRng) -> usize {
    let mut candidates: Vec<VertexId> = sim.graph().iter().map(|(v, _)| v).collect();
    candidates.shuffle(rng);

    let mut spawned = 0;
    for vertex in candidates.into_iter().take(config.robots) {
        match spawn_robot(sim, config.max_robots, vertex) {
            Ok(_) => spawned += 1,
            Err(reason) => {
                warn!(vertex = vertex.0, %reason, "spawn failed");
                if sim.fleet().len() >= config.max_robots {
                    break;
                }
            }
        }
    }
    spawned
}

/// Give every robot without work a new random destination.  A robot still
/// blocked from the previous round is stopped first and re-routed.
fn dispatch(sim: &mut FleetSim<AStarPlanner>, rng: &mut SmallRng) -> usize {
    let vertex_count = sim.graph().vertex_count() as u32;
    if vertex_count < 2 {
        return 0;
    }

    let mut assigned = 0;
    for robot in sim.robots() {
        match robot.status {
            RobotStatus::Moving => continue,
            RobotStatus::Blocked => {
                if let Err(e) = sim.stop(robot.id) {
                    warn!(robot = robot.id.0, error = %e, "could not stop blocked robot");
                    continue;
                }
                info!(robot = robot.id.0, waiting_for = ?robot.path.first(), "blocked robot stopped for re-routing");
            }
            RobotStatus::Idle | RobotStatus::TaskComplete | RobotStatus::Stopped => {}
        }

        for _ in 0..DISPATCH_ATTEMPTS {
            let dest = VertexId(rng.gen_range(0..vertex_count));
            if dest == robot.current_vertex {
                continue;
            }
            if sim.assign_destination(robot.id, dest).is_ok() {
                assigned += 1;
                break;
            }
        }
    }
    assigned
}

// ── Run ───────────────────────────────────────────────────────────────────────

struct RunSummary {
    spawned:        usize,
    dispatched:     usize,
    completed:      BTreeMap<AgentId, usize>,
    blocked:        usize,
    events_written: u64,
    snapshot_rows:  usize,
    final_tick:     Tick,
    robots:         Vec<RobotSnapshot>,
}

fn run_demo(config: &DemoConfig, graph: NavGraph, out_dir: &Path) -> Result<RunSummary> {
    let mut sim = FleetSimBuilder::new(config.fleet.clone(), AStarPlanner)
        .graph(graph)
        .build()?;
    let mut rng = SmallRng::seed_from_u64(config.seed);

    let spawned = spawn_fleet(&mut sim, config, &mut rng);
    info!(spawned, requested = config.robots, "fleet spawned");

    fs::create_dir_all(out_dir)?;
    let mut obs = CountingObserver::new(EventLogObserver::new(CsvEventWriter::new(out_dir)?));

    let end = sim.config.end_tick();
    let mut dispatched = 0;
    while sim.now() < end {
        dispatched += dispatch(&mut sim, &mut rng);
        let until = sim.now().offset(config.dispatch_every_ms).min(end);
        sim.run_until(until, &mut obs);
    }
    obs.on_run_end(sim.now());

    if let Some(e) = obs.inner.take_error() {
        warn!(error = %e, "fleet log incomplete");
    }

    Ok(RunSummary {
        spawned,
        dispatched,
        completed: obs.completed,
        blocked: obs.blocked,
        events_written: obs.inner.events_written(),
        snapshot_rows: obs.snapshot_rows,
        final_tick: sim.now(),
        robots: sim.robots(),
    })
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let nav_path = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_NAV_GRAPH));
    let config = match args.next() {
        Some(path) => DemoConfig::load(Path::new(&path))?,
        None => DemoConfig::default(),
    };

    println!("=== warehouse: fleet manager ===");
    println!(
        "Robots: {} (max {})  |  Horizon: {} ms  |  Step: {} ms  |  Seed: {}",
        config.robots, config.max_robots, config.fleet.horizon_ms, config.fleet.step_interval_ms, config.seed
    );

    let graph = nav_file::load_or_empty(&nav_path, config.level.as_deref());
    println!("Nav graph: {} vertices, {} lanes", graph.vertex_count(), graph.lane_count());
    let names: Vec<Option<String>> = graph.iter().map(|(_, v)| v.name().map(str::to_owned)).collect();
    println!();

    let out_dir = PathBuf::from(&config.output_dir);
    let t0 = Instant::now();
    let summary = run_demo(&config, graph, &out_dir)?;
    let elapsed = t0.elapsed();

    println!("Run complete at {} in {:.3} s", summary.final_tick, elapsed.as_secs_f64());
    println!("  robots spawned      : {}", summary.spawned);
    println!("  tasks dispatched    : {}", summary.dispatched);
    println!("  tasks completed     : {}", summary.completed.values().sum::<usize>());
    println!("  blocked steps       : {}", summary.blocked);
    println!("  fleet_events.csv    : {} rows", summary.events_written);
    println!("  robot_snapshots.csv : {} rows", summary.snapshot_rows);
    println!();

    println!("{:<8} {:<14} {:<8} {:<12} {:<6}", "Robot", "Status", "Vertex", "Name", "Done");
    println!("{}", "-".repeat(52));
    for robot in &summary.robots {
        let name = names
            .get(robot.current_vertex.index())
            .and_then(|n| n.as_deref())
            .unwrap_or("");
        println!(
            "{:<8} {:<14} {:<8} {:<12} {:<6}",
            robot.id.0,
            robot.status.as_str(),
            robot.current_vertex.0,
            name,
            summary.completed.get(&robot.id).copied().unwrap_or(0),
        );
    }
    println!();
    println!("{}", serde_json::to_string_pretty(&summary.robots)?);

    Ok(())
}
