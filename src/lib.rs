//! Piston + connector docking controller.
//!
//! A polling state machine for docking groups made of one linear
//! extender and one latching connector.  The host's cooperative
//! scheduler calls [`DockController::dispatch`](app::service::DockController::dispatch)
//! either with a group name (toggle dock/undock) or with an empty
//! heartbeat invocation the controller asked for on a previous call.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  Host scheduler ──▶ Invocation ──▶ DockController          │
//! │                                      │                     │
//! │            ┌─────────────────────────┼──────────────┐      │
//! │            ▼                         ▼              ▼      │
//! │      PollScheduler            fsm::plan       render_debug │
//! │  (pending set, heartbeat)  (decision table)   (displays)   │
//! │                                                            │
//! │  ──────────────── Port Trait Boundary ──────────────────   │
//! │  DeviceDirectory · Piston · Connector · DisplaySurface     │
//! │  EventSink                                                 │
//! └────────────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod fsm;
pub mod scheduler;

pub use app::commands::{Invocation, TriggerKind};
pub use app::service::{DispatchOutcome, DockController};
pub use config::DockConfig;
pub use error::{ConfigError, DockError};
