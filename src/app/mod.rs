//! Application core: docking orchestration, zero direct I/O.
//!
//! Devices, displays and event consumers are reached only through the
//! **port traits** in [`ports`], keeping this layer testable without a
//! real device registry.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
