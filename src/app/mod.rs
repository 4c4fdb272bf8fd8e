//! Application layer — what the host sees of the state machine.
//!
//! The state machine reports to the application through the
//! [`EventSink`](ports::EventSink) port and is run by the
//! [`Host`](service::Host) service, which owns the driver thread.

pub mod events;
pub mod ports;
pub mod service;
