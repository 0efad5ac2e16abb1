//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured controller events to
//! whichever `log` backend the host installed.

use log::{debug, info, warn};

use crate::app::events::DockEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`DockEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &DockEvent) {
        match event {
            DockEvent::CommandIssued { group, command } => {
                info!("CMD | group='{}' | {}", group, command);
            }
            DockEvent::Pending(group) => {
                info!("POLL | group='{}' pending", group);
            }
            DockEvent::Settled(group) => {
                info!("POLL | group='{}' settled", group);
            }
            DockEvent::Fault { group, error } => {
                warn!("FAULT | group='{}' | {}", group, error);
            }
            DockEvent::Heartbeat { tick_index, swept } => {
                debug!("BEAT | tick={} swept={}", tick_index, swept);
            }
        }
    }
}
