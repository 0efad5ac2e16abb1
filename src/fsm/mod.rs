//! Docking sequence decision table.
//!
//! Pure logic, no device access.  Given the trigger and the observed
//! actuator statuses, [`plan`] returns the commands to issue and whether
//! the group must be polled again.
//!
//! ```text
//!  trigger     piston                connector      commands              recheck
//!  ─────────   ───────────────────   ────────────   ───────────────────   ───────
//!  scheduled   Extended              *              connect               no
//!  scheduled   Extending             Connectable    connect               no
//!  scheduled   Retracted             *              -                     no
//!  scheduled   anything else         *              -                     yes
//!  explicit    *                     Connected      disconnect, retract   yes
//!  explicit    *                     not Connected  extend                yes
//! ```
//!
//! Statuses are re-observed on every visit; nothing is remembered between
//! invocations, so the same inputs always give the same plan.

use core::fmt;

use crate::app::commands::TriggerKind;

// ---------------------------------------------------------------------------
// Observed statuses
// ---------------------------------------------------------------------------

/// Travel state reported by a piston.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PistonStatus {
    Stopped,
    Extending,
    Extended,
    Retracting,
    Retracted,
}

impl PistonStatus {
    pub const ALL: [Self; 5] = [
        Self::Stopped,
        Self::Extending,
        Self::Extended,
        Self::Retracting,
        Self::Retracted,
    ];
}

impl fmt::Display for PistonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Latch state reported by a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorStatus {
    Unconnectable,
    Connectable,
    Connected,
}

impl ConnectorStatus {
    pub const ALL: [Self; 3] = [Self::Unconnectable, Self::Connectable, Self::Connected];
}

impl fmt::Display for ConnectorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ---------------------------------------------------------------------------
// Planned commands
// ---------------------------------------------------------------------------

/// A fire-and-forget command for one of the group's actuators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DockCommand {
    ExtendPiston,
    RetractPiston,
    Connect,
    Disconnect,
}

impl fmt::Display for DockCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ExtendPiston => "piston.extend",
            Self::RetractPiston => "piston.retract",
            Self::Connect => "connector.connect",
            Self::Disconnect => "connector.disconnect",
        };
        f.write_str(name)
    }
}

/// Result of [`plan`]: commands in issue order, and whether the group stays pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub commands: Vec<DockCommand>,
    pub needs_recheck: bool,
}

impl Transition {
    fn settled(commands: Vec<DockCommand>) -> Self {
        Self {
            commands,
            needs_recheck: false,
        }
    }

    fn pending(commands: Vec<DockCommand>) -> Self {
        Self {
            commands,
            needs_recheck: true,
        }
    }
}

/// Decide the next step for one group.
pub fn plan(trigger: TriggerKind, piston: PistonStatus, connector: ConnectorStatus) -> Transition {
    if trigger.is_scheduled() {
        recheck(piston, connector)
    } else {
        toggle(connector)
    }
}

/// Re-check branch: a motion was in progress.
fn recheck(piston: PistonStatus, connector: ConnectorStatus) -> Transition {
    let reached = piston == PistonStatus::Extended
        || (connector == ConnectorStatus::Connectable && piston == PistonStatus::Extending);

    if reached {
        // The latch finishes on its own once commanded.
        Transition::settled(vec![DockCommand::Connect])
    } else if piston == PistonStatus::Retracted {
        Transition::settled(Vec::new())
    } else {
        Transition::pending(Vec::new())
    }
}

/// Explicit branch: undock if docked, otherwise start docking.
fn toggle(connector: ConnectorStatus) -> Transition {
    if connector == ConnectorStatus::Connected {
        Transition::pending(vec![DockCommand::Disconnect, DockCommand::RetractPiston])
    } else {
        Transition::pending(vec![DockCommand::ExtendPiston])
    }
}
