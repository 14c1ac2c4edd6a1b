//! `TimerQueue`: every robot's step timer in one ordered map.
//!
//! A robot's periodic timer is represented by exactly one pending entry: when
//! it fires, the coordinator pushes the next one `step_interval_ms` later.
//! Entries carry the robot's timer epoch at arming time.  Stopping or
//! reassigning a robot bumps its epoch, which turns any entry still queued
//! for it into a no-op without having to search for and remove it.
//!
//! `BTreeMap` gives O(log T) push and pop where T = number of distinct due
//! ticks; with a fixed interval T is at most the number of robots.

use std::collections::BTreeMap;

use fm_core::{AgentId, Tick};

/// One armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEntry {
    pub agent: AgentId,
    pub epoch: u64,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    inner: BTreeMap<Tick, Vec<TimerEntry>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `agent`'s timer (under `epoch`) to fire at `tick`.
    pub fn push(&mut self, tick: Tick, agent: AgentId, epoch: u64) {
        self.inner.entry(tick).or_default().push(TimerEntry { agent, epoch });
        self.total += 1;
    }

    /// Remove and return every entry due at exactly `tick`.
    ///
    /// Returns `None` if nothing is queued for that tick.
    pub fn drain_tick(&mut self, tick: Tick) -> Option<Vec<TimerEntry>> {
        let entries = self.inner.remove(&tick)?;
        self.total -= entries.len();
        Some(entries)
    }

    /// The earliest tick with at least one entry, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Total number of queued entries, stale ones included.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct future ticks with at least one entry.
    pub fn tick_count(&self) -> usize {
        self.inner.len()
    }
}
