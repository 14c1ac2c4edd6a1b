//! Observer trait for event logging and state snapshots.

use fm_core::Tick;
use fm_fleet::FleetManager;

use crate::EventRecord;

/// Callbacks invoked by [`FleetSim::run_until`][crate::FleetSim::run_until].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: blocked-robot counter
///
/// ```rust,ignore
/// struct BlockedCounter(usize);
///
/// impl FleetObserver for BlockedCounter {
///     fn on_event(&mut self, record: &EventRecord) {
///         if let FleetEvent::Blocked { .. } = record.event {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait FleetObserver {
    /// Called once per event, in emission order.
    fn on_event(&mut self, _record: &EventRecord) {}

    /// Called every `config.snapshot_interval_ms` with read-only access to
    /// the fleet (robots and reservation table).
    fn on_snapshot(&mut self, _tick: Tick, _fleet: &FleetManager) {}

    /// Called once at the end of [`FleetSim::run`][crate::FleetSim::run].
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`FleetObserver`] that does nothing.
pub struct NoopObserver;

impl FleetObserver for NoopObserver {}
