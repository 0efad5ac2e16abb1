//! Outbound controller events.
//!
//! The [`DockController`](super::service::DockController) emits these
//! through the [`EventSink`](super::ports::EventSink) port, alongside the
//! human-readable debug lines it writes to displays.

use crate::error::DockError;
use crate::fsm::DockCommand;

/// Structured events emitted by the docking core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockEvent {
    /// A command was sent to one of the group's actuators.
    CommandIssued { group: String, command: DockCommand },

    /// The group was (re-)added to the pending set.
    Pending(String),

    /// The group needs no further polling.
    Settled(String),

    /// The group could not be sequenced and was dropped.
    Fault { group: String, error: DockError },

    /// A heartbeat was handled; `swept` is true when pending groups were re-checked.
    Heartbeat { tick_index: u32, swept: bool },
}
