//! TUIO host library.
//!
//! Exposes the lifecycle state machine, its event queues, the peer link
//! boundary and the driver thread for integration testing and for the
//! `tuio` operator binary.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod driver;
pub mod events;
pub mod fsm;
pub mod link;

mod error;

pub use error::{Error, Result};
