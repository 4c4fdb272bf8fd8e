//! Host service — the application object.
//!
//! [`Host`] builds the state machine, moves it onto its driver thread
//! and keeps only what producers need: a local handle and the published
//! state.
//!
//! ```text
//!  Host::post ──▶ LocalHandle ──▶ ┌────────────────────┐ ──▶ EventSink
//!                                 │ Driver thread      │
//!  PeerLink   ──▶ peer queue  ──▶ │   StateMachine     │ ──▶ PeerLink
//!                                 └────────────────────┘
//! ```

use std::time::{Duration, Instant};

use log::info;

use crate::config::FsmConfig;
use crate::driver::{self, DriverHandle};
use crate::error::Result;
use crate::events::Event;
use crate::fsm::{LocalHandle, StateId, StateMachine};
use crate::link::PeerLink;

use super::ports::EventSink;

// ───────────────────────────────────────────────────────────────
// Host
// ───────────────────────────────────────────────────────────────

pub struct Host<S: EventSink> {
    handle: LocalHandle,
    driver: DriverHandle<S>,
}

impl<S: EventSink + Send + 'static> Host<S> {
    /// Validate `config`, create the state machine and start its driver.
    pub fn start(config: &FsmConfig, link: PeerLink, sink: S) -> Result<Self> {
        config.validate()?;
        let machine = StateMachine::new(config, link, sink);
        let handle = machine.handle();
        let driver = driver::spawn(
            machine,
            &config.driver_thread_name,
            config.driver_stack_kb,
        )?;
        info!("Host started");
        Ok(Self { handle, driver })
    }
}

impl<S: EventSink> Host<S> {
    // ── Producers ─────────────────────────────────────────────

    /// Handle for posting from other threads.
    pub fn handle(&self) -> LocalHandle {
        self.handle.clone()
    }

    pub fn post(&self, event: Event) {
        self.handle.post(event);
    }

    /// Request shutdown.  The driver exits once the event is processed.
    pub fn shutdown(&self) {
        info!("Host: shutdown requested");
        self.handle.post(Event::Shutdown);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> StateId {
        self.driver.state()
    }

    /// Poll the published state every millisecond until it equals
    /// `target` or `timeout` elapses.  Returns whether `target` was
    /// observed.  A state held for less than the poll interval can be
    /// missed, so wait on states the machine stays in.
    pub fn wait_for(&self, target: StateId, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.state() == target {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    pub fn is_finished(&self) -> bool {
        self.driver.is_finished()
    }

    /// Wait for the driver to finish and take the machine back.
    pub fn join(self) -> Result<StateMachine<S>> {
        self.driver.join()
    }
}
