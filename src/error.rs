//! Error types for the docking controller.
//!
//! Nothing here is fatal.  Sequencing errors are caught by the
//! [`DockController`](crate::app::service::DockController), written to the
//! debug buffer and dropped; configuration errors are rejected once at
//! construction time.

use core::fmt;

// ---------------------------------------------------------------------------
// Sequencing errors
// ---------------------------------------------------------------------------

/// Reasons a group could not be sequenced on this invocation.
///
/// Each variant carries the group name as it was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockError {
    /// The directory has no group with this name.
    GroupNotFound(String),
    /// The group resolved but contains no piston.
    PistonMissing(String),
    /// The group resolved but contains no connector.
    ConnectorMissing(String),
}

impl DockError {
    /// Name of the group the error refers to.
    pub fn group(&self) -> &str {
        match self {
            Self::GroupNotFound(g) | Self::PistonMissing(g) | Self::ConnectorMissing(g) => g,
        }
    }
}

impl fmt::Display for DockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GroupNotFound(g) => write!(f, "Group does not exist: '{g}'."),
            Self::PistonMissing(g) => write!(f, "No piston detected in group: '{g}'."),
            Self::ConnectorMissing(g) => write!(f, "No connector detected in group: '{g}'."),
        }
    }
}

impl std::error::Error for DockError {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `heartbeat_period` is zero.
    ZeroPeriod,
    /// `sweep_interval` is zero.
    ZeroSweepInterval,
    /// `sweep_interval` does not divide `heartbeat_period`.
    IntervalNotDivisor { period: u32, interval: u32 },
    /// `debug_tag` is empty, so no surface could ever match.
    EmptyDebugTag,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPeriod => write!(f, "heartbeat period must be non-zero"),
            Self::ZeroSweepInterval => write!(f, "sweep interval must be non-zero"),
            Self::IntervalNotDivisor { period, interval } => write!(
                f,
                "sweep interval {interval} does not divide heartbeat period {period}"
            ),
            Self::EmptyDebugTag => write!(f, "debug tag must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}
