//! Poll scheduler.
//!
//! Owns the pending set, the heartbeat counter, and the "run again"
//! request that the host reads after every dispatch.
//!
//! ```text
//!   explicit toggle ──▶ mark_pending(g) ──▶ request_tick()
//!                                              │
//!                                              ▼
//!   host fires ("", Scheduled) ──▶ heartbeat()
//!                                   │
//!                   counter % sweep_interval == 0 ?
//!                    ├── yes ──▶ Sweep(snapshot of pending)
//!                    └── no  ──▶ Wait (request_tick)
//! ```
//!
//! The scheduler never loops and never touches devices.  The controller
//! walks the sweep snapshot and reports each group's outcome back through
//! [`mark_pending`](PollScheduler::mark_pending) /
//! [`clear_pending`](PollScheduler::clear_pending), so membership may
//! change freely while the sweep is in progress.

use log::debug;

use crate::config::DockConfig;

/// What a heartbeat asks the controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeartbeatAction {
    /// Re-check every group in this snapshot, in order.
    Sweep(Vec<String>),
    /// Throttled tick; another tick has already been requested.
    Wait,
}

/// Process-wide polling state.
pub struct PollScheduler {
    /// Groups awaiting a re-check.  At most one entry per name.
    pending: Vec<String>,
    /// Heartbeat counter in `[0, period)`.
    tick_index: u32,
    period: u32,
    sweep_interval: u32,
    /// Set when the host should invoke a heartbeat next tick.
    tick_requested: bool,
}

impl PollScheduler {
    /// The config is assumed validated (non-zero, interval divides period).
    pub fn new(config: &DockConfig) -> Self {
        Self {
            pending: Vec::new(),
            tick_index: 0,
            period: config.heartbeat_period,
            sweep_interval: config.sweep_interval,
            tick_requested: false,
        }
    }

    /// Advance the heartbeat counter and decide whether to sweep.
    pub fn heartbeat(&mut self) -> HeartbeatAction {
        self.tick_index += 1;
        if self.tick_index >= self.period {
            self.tick_index = 0;
        }

        if self.tick_index % self.sweep_interval == 0 {
            debug!(
                "Scheduler: sweep at tick {} ({} pending)",
                self.tick_index,
                self.pending.len()
            );
            HeartbeatAction::Sweep(self.pending.clone())
        } else {
            debug!("Scheduler: tick {} throttled", self.tick_index);
            self.request_tick();
            HeartbeatAction::Wait
        }
    }

    /// Add `group` to the pending set.  Re-adding is a no-op.
    pub fn mark_pending(&mut self, group: &str) {
        if !self.is_pending(group) {
            self.pending.push(group.to_string());
        }
    }

    /// Remove `group` from the pending set.  Returns whether it was present.
    pub fn clear_pending(&mut self, group: &str) -> bool {
        let before = self.pending.len();
        self.pending.retain(|g| g != group);
        self.pending.len() != before
    }

    pub fn is_pending(&self, group: &str) -> bool {
        self.pending.iter().any(|g| g == group)
    }

    /// Pending groups in insertion order.
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Current heartbeat counter value.
    pub fn tick_index(&self) -> u32 {
        self.tick_index
    }

    /// Ask for one more heartbeat.  Idempotent.
    pub fn request_tick(&mut self) {
        self.tick_requested = true;
    }

    pub fn tick_requested(&self) -> bool {
        self.tick_requested
    }

    /// Clear the request flag at the start of an invocation.
    pub(crate) fn begin_invocation(&mut self) {
        self.tick_requested = false;
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
