//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter measured in simulated
//! **milliseconds**.  Robot timers fire at arbitrary millisecond offsets, so
//! the clock jumps straight to the next due timer instead of stepping one
//! tick at a time:
//!
//!   now = max(now, next_timer_due)
//!
//! Integer milliseconds keep timer arithmetic exact (no floating-point drift)
//! and comparisons O(1).

use std::fmt;

use crate::{FmError, FmResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation time in milliseconds since the run started.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `ms` milliseconds after `self`.
    #[inline]
    pub fn offset(self, ms: u64) -> Tick {
        Tick(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self` (zero if `earlier` is
    /// in the future).
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        self.offset(rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T+{}ms", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The coordinator's notion of "now".  Never moves backwards.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward to `tick`.  Earlier ticks are ignored.
    #[inline]
    pub fn advance_to(&mut self, tick: Tick) {
        if tick > self.current_tick {
            self.current_tick = tick;
        }
    }

    /// Elapsed simulated seconds since tick 0 (truncated).
    #[inline]
    pub fn elapsed_secs(&self) -> u64 {
        self.current_tick.0 / 1_000
    }

    /// Break elapsed time into (minutes, seconds, millis) for log lines.
    pub fn elapsed_msm(&self) -> (u64, u32, u32) {
        let ms = self.current_tick.0;
        let minutes = ms / 60_000;
        let secs = ((ms % 60_000) / 1_000) as u32;
        let millis = (ms % 1_000) as u32;
        (minutes, secs, millis)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s, ms) = self.elapsed_msm();
        write!(f, "{} ({}m {:02}.{:03}s)", self.current_tick, m, s, ms)
    }
}

// ── FleetConfig ───────────────────────────────────────────────────────────────

/// Coordinator configuration.
///
/// Typically embedded in an application's JSON config and handed to
/// `FleetSimBuilder`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    /// Period of every robot's step timer, in milliseconds.  Default: 500.
    pub step_interval_ms: u64,

    /// Emit a fleet snapshot to the observer every N milliseconds.
    /// 0 disables snapshots.
    pub snapshot_interval_ms: u64,

    /// Length of a full `run()` in milliseconds.
    pub horizon_ms: u64,
}

impl FleetConfig {
    pub const DEFAULT_STEP_INTERVAL_MS: u64 = 500;

    /// The tick at which `run()` stops (inclusive).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.horizon_ms)
    }

    /// Reject configurations the coordinator cannot run.
    pub fn validate(&self) -> FmResult<()> {
        if self.step_interval_ms == 0 {
            return Err(FmError::Config("step_interval_ms must be > 0".into()));
        }
        if self.snapshot_interval_ms != 0 && self.snapshot_interval_ms < self.step_interval_ms {
            return Err(FmError::Config(format!(
                "snapshot_interval_ms ({}) is shorter than step_interval_ms ({})",
                self.snapshot_interval_ms, self.step_interval_ms
            )));
        }
        Ok(())
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            step_interval_ms:     Self::DEFAULT_STEP_INTERVAL_MS,
            snapshot_interval_ms: 0,
            horizon_ms:           60_000,
        }
    }
}
