//! Driver — runs the state machine on a dedicated thread.
//!
//! The loop steps the machine until it reaches `Exit`.  When both queues
//! are empty it parks on their readiness signals instead of spinning,
//! and wakes as soon as anything is posted to either one.
//!
//! ```text
//!  ┌────────────────────────────────────────────────┐
//!  │  Driver Thread                                 │
//!  │                                                │
//!  │  loop {                                        │
//!  │    step() ── event ──▶ transition / relay      │
//!  │      │                                         │
//!  │      └─ idle ──▶ block_on(or(local, peer))     │
//!  │  } until Exit                                  │
//!  └────────────────────────────────────────────────┘
//! ```

use std::thread::JoinHandle;

use futures_lite::future;
use log::info;

use crate::app::ports::EventSink;
use crate::error::{Error, Result};
use crate::fsm::{StateCell, StateId, StateMachine, Step};

/// Step `machine` until it is terminal, parking while there is no work.
pub fn run_to_exit<S: EventSink>(machine: &mut StateMachine<S>) {
    let (local, peer) = machine.queues();

    while !machine.is_terminal() {
        if machine.step() == Step::Idle {
            future::block_on(future::or(local.ready(), peer.ready()));
        }
    }

    let stats = machine.stats();
    info!(
        "Driver: reached {} after {} events ({} local, {} peer, {} ignored)",
        machine.current_state(),
        stats.dispatched(),
        stats.local,
        stats.peer,
        stats.ignored
    );
}

/// Join handle for a running driver thread.
pub struct DriverHandle<S: EventSink> {
    thread: JoinHandle<StateMachine<S>>,
    state: StateCell,
}

impl<S: EventSink> DriverHandle<S> {
    /// Current state as last published by the machine.
    pub fn state(&self) -> StateId {
        self.state.get()
    }

    pub fn state_cell(&self) -> StateCell {
        self.state.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the machine to reach `Exit` and take it back.
    pub fn join(self) -> Result<StateMachine<S>> {
        self.thread.join().map_err(|_| Error::DriverPanicked)
    }
}

/// Move `machine` onto a named thread and run it to `Exit`.
pub fn spawn<S>(machine: StateMachine<S>, name: &str, stack_kb: usize) -> Result<DriverHandle<S>>
where
    S: EventSink + Send + 'static,
{
    let stack_bytes = stack_kb
        .checked_mul(1024)
        .ok_or(Error::Config("driver stack is too large"))?;
    let state = machine.state_cell();
    info!("Spawning '{}' (stack={}KB)", name, stack_kb);

    let thread = std::thread::Builder::new()
        .name(name.into())
        .stack_size(stack_bytes)
        .spawn(move || {
            let mut machine = machine;
            run_to_exit(&mut machine);
            machine
        })
        .map_err(Error::Spawn)?;

    Ok(DriverHandle { thread, state })
}
