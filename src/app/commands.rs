//! Inbound invocations to the docking controller.
//!
//! The host's cooperative scheduler calls
//! [`DockController::dispatch`](super::service::DockController::dispatch)
//! with one of these, either because someone asked to toggle a group or
//! because the controller previously requested a heartbeat.

use core::fmt;

/// What caused an invocation.  Mirrors the host's update-source flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    /// No source flags set.
    None,
    /// An external request (button, terminal, another script).
    Explicit,
    /// The controller's own "run again" request fired.
    Scheduled,
    /// Both flags set in the same invocation.
    Both,
}

impl TriggerKind {
    /// True when the scheduled flag is present.  Selects the re-check branch
    /// of the docking sequence.
    pub fn is_scheduled(self) -> bool {
        matches!(self, Self::Scheduled | Self::Both)
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Explicit => "Explicit",
            Self::Scheduled => "Scheduled",
            Self::Both => "Both",
        };
        f.write_str(name)
    }
}

/// One call from the host scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Group name, or empty for a heartbeat.
    pub argument: String,
    pub trigger: TriggerKind,
}

impl Invocation {
    /// An explicit toggle request for `group`.
    pub fn toggle(group: impl Into<String>) -> Self {
        Self {
            argument: group.into(),
            trigger: TriggerKind::Explicit,
        }
    }

    /// The argument-less self re-invocation.
    pub fn heartbeat() -> Self {
        Self {
            argument: String::new(),
            trigger: TriggerKind::Scheduled,
        }
    }

    /// Only `("", Scheduled)` takes the heartbeat path; every other
    /// combination is treated as a named group request.
    pub fn is_heartbeat(&self) -> bool {
        self.argument.is_empty() && self.trigger == TriggerKind::Scheduled
    }
}
