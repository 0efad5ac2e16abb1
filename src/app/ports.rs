//! Port traits: the hexagonal boundary between the docking core and the device registry.
//!
//! ```text
//!   Device registry ──▶ DeviceDirectory ──▶ DockController (domain)
//!                                              │
//!                       EventSink ◀────────────┘
//! ```
//!
//! The host implements [`DeviceDirectory`] over whatever device registry
//! it has.  The controller resolves groups on every invocation and never
//! keeps a handle across calls.

use crate::fsm::{ConnectorStatus, PistonStatus};

// ───────────────────────────────────────────────────────────────
// Actuator ports (domain → device)
// ───────────────────────────────────────────────────────────────

/// Linear extender.  Commands are requests; the status changes over later ticks.
pub trait Piston {
    fn status(&self) -> PistonStatus;

    fn extend(&mut self);

    fn retract(&mut self);
}

/// Latching connector.
pub trait Connector {
    fn status(&self) -> ConnectorStatus;

    fn connect(&mut self);

    fn disconnect(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Display port
// ───────────────────────────────────────────────────────────────

/// Rendering mode of a text surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    None,
    TextAndImage,
}

/// Any text surface attached to a device in the group.
pub trait DisplaySurface {
    /// User-assigned configuration tag (free-form).
    fn tag(&self) -> &str;

    fn content_type(&self) -> ContentType;

    fn set_content_type(&mut self, content_type: ContentType);

    /// Replace the full surface content.
    fn write_text(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Device directory (registry → domain)
// ───────────────────────────────────────────────────────────────

/// Typed view of one resolved group.
///
/// `piston` and `connector` are the first device of each kind found in
/// the group, or `None` when the group has none.
pub struct GroupMembers<'a> {
    pub piston: Option<&'a mut dyn Piston>,
    pub connector: Option<&'a mut dyn Connector>,
    pub displays: Vec<&'a mut dyn DisplaySurface>,
}

/// Resolves group names to their member devices.
pub trait DeviceDirectory {
    /// Look up a group by exact (case-sensitive) name.
    fn group(&mut self, name: &str) -> Option<GroupMembers<'_>>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`DockEvent`](super::events::DockEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::DockEvent);
}

/// Sink that discards everything.
impl EventSink for () {
    fn emit(&mut self, _event: &super::events::DockEvent) {}
}
