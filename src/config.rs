//! Controller configuration parameters
//!
//! Heartbeat throttling and the debug display marker.  The defaults are
//! the values the controller has always shipped with; a host may override
//! them from JSON.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    // --- Heartbeat ---
    /// Heartbeat counter wraps to 0 when it reaches this value.
    pub heartbeat_period: u32,
    /// Pending groups are re-checked when `counter % sweep_interval == 0`.
    pub sweep_interval: u32,

    // --- Display ---
    /// Surfaces whose tag equals this (ASCII case-insensitive) receive debug output.
    pub debug_tag: String,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            heartbeat_period: 60,
            sweep_interval: 20,
            debug_tag: "PistonConnector.Debug".to_string(),
        }
    }
}

impl DockConfig {
    /// Range-check every field.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.heartbeat_period == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.sweep_interval == 0 {
            return Err(ConfigError::ZeroSweepInterval);
        }
        if self.heartbeat_period % self.sweep_interval != 0 {
            return Err(ConfigError::IntervalNotDivisor {
                period: self.heartbeat_period,
                interval: self.sweep_interval,
            });
        }
        if self.debug_tag.trim().is_empty() {
            return Err(ConfigError::EmptyDebugTag);
        }
        Ok(())
    }

    /// Parse and validate a JSON document.  Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("parsing dock config")?;
        config.validate().context("validating dock config")?;
        Ok(config)
    }

    /// Number of sweeps per heartbeat wrap.
    pub fn sweeps_per_period(&self) -> u32 {
        self.heartbeat_period / self.sweep_interval.max(1)
    }
}
