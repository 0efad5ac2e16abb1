//! Docking controller, the hexagonal core.
//!
//! [`DockController`] owns the configuration and the [`PollScheduler`].
//! Devices are reached only through the [`DeviceDirectory`] passed in on
//! each call, so the controller is testable with mock adapters.
//!
//! ```text
//!  Invocation ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │      DockController       │
//! DeviceDirectory◀│  dispatch · sequence      │ ──▶ DispatchOutcome
//!                 │  PollScheduler            │     (run_again, debug)
//!                 └──────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::DockConfig;
use crate::display::render_debug;
use crate::error::{ConfigError, DockError};
use crate::fsm::{DockCommand, Transition, plan};
use crate::scheduler::{HeartbeatAction, PollScheduler};

use super::commands::{Invocation, TriggerKind};
use super::events::DockEvent;
use super::ports::{DeviceDirectory, EventSink, GroupMembers};

/// What the host needs back from one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Invoke again on the next tick with [`Invocation::heartbeat`].
    pub run_again: bool,
    /// Debug lines produced during this invocation, in order.
    pub debug: Vec<String>,
}

// ───────────────────────────────────────────────────────────────
// DockController
// ───────────────────────────────────────────────────────────────

pub struct DockController {
    config: DockConfig,
    scheduler: PollScheduler,
}

impl DockController {
    /// Build a controller with an empty pending set and a zero heartbeat counter.
    pub fn new(config: DockConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let scheduler = PollScheduler::new(&config);
        info!(
            "DockController ready (heartbeat period {}, sweep every {}, {} sweeps per wrap)",
            config.heartbeat_period,
            config.sweep_interval,
            config.sweeps_per_period()
        );
        Ok(Self { config, scheduler })
    }

    // ── Entry point ───────────────────────────────────────────

    /// Handle one invocation from the host scheduler.
    ///
    /// Never fails: unresolved groups and missing devices are reported in
    /// the debug lines and as [`DockEvent::Fault`].
    pub fn dispatch(
        &mut self,
        invocation: &Invocation,
        devices: &mut impl DeviceDirectory,
        sink: &mut impl EventSink,
    ) -> DispatchOutcome {
        self.scheduler.begin_invocation();
        let mut debug = Vec::new();

        if invocation.is_heartbeat() {
            self.heartbeat(invocation.trigger, devices, sink, &mut debug);
        } else {
            self.control_group(&invocation.argument, invocation.trigger, devices, sink, &mut debug);
        }

        if self.scheduler.has_pending() {
            self.scheduler.request_tick();
        }

        DispatchOutcome {
            run_again: self.scheduler.tick_requested(),
            debug,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &PollScheduler {
        &self.scheduler
    }

    pub fn is_pending(&self, group: &str) -> bool {
        self.scheduler.is_pending(group)
    }

    // ── Internal ──────────────────────────────────────────────

    fn heartbeat(
        &mut self,
        trigger: TriggerKind,
        devices: &mut impl DeviceDirectory,
        sink: &mut impl EventSink,
        debug: &mut Vec<String>,
    ) {
        let action = self.scheduler.heartbeat();
        let tick_index = self.scheduler.tick_index();
        debug.push(format!("Tick index: {tick_index}"));

        let swept = match action {
            HeartbeatAction::Sweep(groups) => {
                if !groups.is_empty() {
                    info!("Heartbeat {}: re-checking {} group(s)", tick_index, groups.len());
                }
                for group in &groups {
                    self.control_group(group, trigger, devices, sink, debug);
                }
                true
            }
            HeartbeatAction::Wait => false,
        };

        sink.emit(&DockEvent::Heartbeat { tick_index, swept });
    }

    /// Visit one group: drop it from the pending set, sequence it, and
    /// re-add it only if the sequence says so.
    fn control_group(
        &mut self,
        name: &str,
        trigger: TriggerKind,
        devices: &mut impl DeviceDirectory,
        sink: &mut impl EventSink,
        debug: &mut Vec<String>,
    ) {
        debug.push(format!("Group name: '{name}'"));
        debug.push(format!("Update source: {trigger}"));

        self.scheduler.clear_pending(name);

        match self.sequence(name, trigger, devices, sink, debug) {
            Ok(transition) if transition.needs_recheck => {
                self.scheduler.mark_pending(name);
                self.scheduler.request_tick();
                sink.emit(&DockEvent::Pending(name.to_string()));
            }
            Ok(_) => sink.emit(&DockEvent::Settled(name.to_string())),
            Err(error) => {
                warn!("Dock '{}': {}", error.group(), error);
                sink.emit(&DockEvent::Fault {
                    group: error.group().to_string(),
                    error,
                });
            }
        }
    }

    /// Resolve the group, drive its actuators, and render the debug buffer
    /// to its tagged displays.
    fn sequence(
        &self,
        name: &str,
        trigger: TriggerKind,
        devices: &mut impl DeviceDirectory,
        sink: &mut impl EventSink,
        debug: &mut Vec<String>,
    ) -> Result<Transition, DockError> {
        let Some(mut members) = devices.group(name) else {
            let error = DockError::GroupNotFound(name.to_string());
            debug.push(error.to_string());
            return Err(error);
        };

        let result = drive(name, trigger, &mut members, sink, debug);
        if let Err(error) = &result {
            debug.push(error.to_string());
        }

        render_debug(&mut members.displays, &self.config.debug_tag, debug);
        result
    }
}

/// Plan from the observed statuses and issue the commands in order.
fn drive(
    name: &str,
    trigger: TriggerKind,
    members: &mut GroupMembers<'_>,
    sink: &mut impl EventSink,
    debug: &mut Vec<String>,
) -> Result<Transition, DockError> {
    let piston = members
        .piston
        .as_deref_mut()
        .ok_or_else(|| DockError::PistonMissing(name.to_string()))?;
    let connector = members
        .connector
        .as_deref_mut()
        .ok_or_else(|| DockError::ConnectorMissing(name.to_string()))?;

    debug.push(format!("Piston status (before): {}", piston.status()));
    debug.push(format!("Connector status (before): {}", connector.status()));

    let transition = plan(trigger, piston.status(), connector.status());
    for &command in &transition.commands {
        match command {
            DockCommand::ExtendPiston => piston.extend(),
            DockCommand::RetractPiston => piston.retract(),
            DockCommand::Connect => connector.connect(),
            DockCommand::Disconnect => connector.disconnect(),
        }
        info!("Dock '{}': {}", name, command);
        sink.emit(&DockEvent::CommandIssued {
            group: name.to_string(),
            command,
        });
    }

    debug.push(format!("Piston status (after): {}", piston.status()));
    debug.push(format!("Connector status (after): {}", connector.status()));
    Ok(transition)
}
