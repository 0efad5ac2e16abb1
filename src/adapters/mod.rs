//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements | Connects to        |
//! |------------|------------|--------------------|
//! | `log_sink` | EventSink  | `log` facade       |
//!
//! [`DeviceDirectory`](crate::app::ports::DeviceDirectory) is always
//! supplied by the host, which owns the device registry.

pub mod log_sink;
