//! Host configuration parameters
//!
//! Session markers and driver thread settings. Values can be overridden
//! from a JSON file passed to the `tuio` binary; absent fields keep
//! their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Smallest driver stack the host accepts.
pub const MIN_DRIVER_STACK_KB: usize = 16;

/// Largest driver stack the host accepts (64 MiB).
pub const MAX_DRIVER_STACK_KB: usize = 64 * 1024;

/// Core state machine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsmConfig {
    // --- Session markers ---
    /// Tag relayed to the peer when a session starts
    pub start_marker: String,
    /// Tag relayed to the peer when a session stops
    pub stop_marker: String,

    // --- Link ---
    /// Ask the collaborator to bring the link up when the FSM is created
    pub open_link_on_start: bool,

    // --- Driver ---
    /// Name of the driver thread
    pub driver_thread_name: String,
    /// Driver thread stack size (KB)
    pub driver_stack_kb: usize,
}

impl Default for FsmConfig {
    fn default() -> Self {
        Self {
            start_marker: "start_game".into(),
            stop_marker: "stop_game".into(),

            open_link_on_start: true,

            driver_thread_name: "tuio-fsm".into(),
            driver_stack_kb: 64,
        }
    }
}

impl FsmConfig {
    /// Parse a JSON document and validate the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the state machine or driver cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.start_marker.is_empty() || self.stop_marker.is_empty() {
            return Err(Error::Config("session markers must not be empty"));
        }
        if self.start_marker == self.stop_marker {
            return Err(Error::Config("start and stop markers must differ"));
        }
        if self.driver_thread_name.is_empty() {
            return Err(Error::Config("driver thread name must not be empty"));
        }
        if self.driver_stack_kb < MIN_DRIVER_STACK_KB {
            return Err(Error::Config("driver stack is too small"));
        }
        if self.driver_stack_kb > MAX_DRIVER_STACK_KB {
            return Err(Error::Config("driver stack is too large"));
        }
        Ok(())
    }
}
