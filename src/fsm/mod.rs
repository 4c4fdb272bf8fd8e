//! Event-driven lifecycle state machine.
//!
//! ```text
//!            peer_connected          start_session
//!   ┌──────┐ ─────────────▶ ┌──────┐ ─────────────▶ ┌─────────┐
//!   │ Idle │                │ Main │                │ Session │
//!   └──────┘ ◀───────────── └──────┘ ◀───────────── └─────────┘
//!       ▲     peer_disconnected          stop_session      │
//!       └──────────────────────────────────────────────────┘
//!                         peer_disconnected
//!
//!   shutdown (from any of the above) ──▶ Exit (terminal)
//! ```
//!
//! Each [`StateMachine::step`] takes at most one event, local queue
//! first, and applies the table in [`states`].  Accepted events may
//! request a relay from the peer link or deliver data to the
//! application through the [`EventSink`] port.  Rejected events are
//! dropped and reported, never treated as errors.

pub mod states;

use core::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use log::{debug, error, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::config::FsmConfig;
use crate::error::Result;
use crate::events::{Event, EventKind, EventQueue, Frame};
use crate::link::{PeerEvent, PeerLink, RelayCommand};

use states::{Action, SessionMarkers};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Idle = 0,
    Main = 1,
    Session = 2,
    Exit = 3,
}

impl StateId {
    pub const COUNT: usize = 4;

    pub const ALL: [Self; Self::COUNT] = [Self::Idle, Self::Main, Self::Session, Self::Exit];

    /// Convert a `u8` back to `StateId`.  Panics on out-of-range in debug
    /// builds; returns `Exit` in release.
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Idle,
            1 => Self::Main,
            2 => Self::Session,
            3 => Self::Exit,
            _ => {
                debug_assert!(false, "invalid state id: {raw}");
                Self::Exit
            }
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Main => "Main",
            Self::Session => "Session",
            Self::Exit => "Exit",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Exit)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Published state
// ---------------------------------------------------------------------------

/// Read-only view of the machine's current state for other threads.
///
/// Only the state machine writes it, right after each transition.
#[derive(Debug, Clone)]
pub struct StateCell(Arc<AtomicU8>);

impl StateCell {
    fn new(initial: StateId) -> Self {
        Self(Arc::new(AtomicU8::new(initial as u8)))
    }

    pub fn get(&self) -> StateId {
        StateId::from_u8(self.0.load(Ordering::Acquire))
    }

    fn set(&self, state: StateId) {
        self.0.store(state as u8, Ordering::Release);
    }
}

// ---------------------------------------------------------------------------
// Local producer handle
// ---------------------------------------------------------------------------

/// Cloneable handle producers use to post into the machine's local queue.
#[derive(Clone)]
pub struct LocalHandle {
    queue: Arc<EventQueue<Event>>,
}

impl LocalHandle {
    pub fn post(&self, event: Event) {
        self.queue.post(event);
    }

    /// Post an event by its textual kind.  An unknown kind is a
    /// programmer error: it is logged and returned, never enqueued.
    pub fn post_named(&self, kind: &str, payload: Frame) -> Result<()> {
        match Event::parse(kind, payload) {
            Ok(event) => {
                self.post(event);
                Ok(())
            }
            Err(e) => {
                error!("FSM: rejected local event: {}", e);
                Err(e)
            }
        }
    }

    /// Local events not yet consumed.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

// ---------------------------------------------------------------------------
// Step results
// ---------------------------------------------------------------------------

/// Which queue an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Local,
    Peer,
}

/// What the machine did with a dequeued event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Accepted and the state changed.
    Transitioned { from: StateId, to: StateId },
    /// Accepted without a state change.
    Handled,
    /// Rejected by the guard and dropped.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Both queues were empty.
    Idle,
    Dispatched {
        source: Source,
        kind: EventKind,
        outcome: Outcome,
    },
}

/// Counters kept across the machine's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Events taken from the local queue.
    pub local: u64,
    /// Events taken from the peer queue.
    pub peer: u64,
    /// Events dropped by the guard.
    pub ignored: u64,
}

impl StepStats {
    pub fn dispatched(&self) -> u64 {
        self.local + self.peer
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// The lifecycle state machine.
///
/// Owns its local queue and reads the peer link's inbound queue.  Must be
/// stepped from a single thread (normally the [driver](crate::driver)).
pub struct StateMachine<S: EventSink> {
    current: StateId,
    published: StateCell,
    local: Arc<EventQueue<Event>>,
    link: PeerLink,
    markers: SessionMarkers,
    sink: S,
    stats: StepStats,
}

impl<S: EventSink> StateMachine<S> {
    /// Create the machine in `Idle`.  When configured, asks the link to
    /// open before any event is processed.
    pub fn new(config: &FsmConfig, link: PeerLink, mut sink: S) -> Self {
        let current = StateId::Idle;
        info!("FSM starting in state: {}", current);
        if config.open_link_on_start {
            link.request(RelayCommand::Open);
        }
        sink.emit(&AppEvent::Started(current));

        Self {
            current,
            published: StateCell::new(current),
            local: Arc::new(EventQueue::new()),
            link,
            markers: SessionMarkers::from_config(config),
            sink,
            stats: StepStats::default(),
        }
    }

    /// Enqueue an event for this machine.  Always succeeds.
    pub fn post_local(&self, event: Event) {
        self.local.post(event);
    }

    /// Handle for producers on other threads.
    pub fn handle(&self) -> LocalHandle {
        LocalHandle {
            queue: Arc::clone(&self.local),
        }
    }

    /// Consume at most one pending event, local queue first.
    pub fn step(&mut self) -> Step {
        let (source, event) = if let Some(event) = self.local.try_take() {
            self.stats.local += 1;
            (Source::Local, event)
        } else if let Some(event) = self.link.poll_event() {
            self.stats.peer += 1;
            (Source::Peer, Event::from(event))
        } else {
            return Step::Idle;
        };

        let kind = event.kind();
        let outcome = self.dispatch(event);
        Step::Dispatched {
            source,
            kind,
            outcome,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn current_state(&self) -> StateId {
        self.current
    }

    pub fn is_terminal(&self) -> bool {
        self.current.is_terminal()
    }

    /// Shared view of the current state for other threads.
    pub fn state_cell(&self) -> StateCell {
        self.published.clone()
    }

    pub fn stats(&self) -> StepStats {
        self.stats
    }

    pub fn link(&self) -> &PeerLink {
        &self.link
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub(crate) fn queues(&self) -> (Arc<EventQueue<Event>>, Arc<EventQueue<PeerEvent>>) {
        (Arc::clone(&self.local), self.link.peer_queue())
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn dispatch(&mut self, event: Event) -> Outcome {
        let kind = event.kind();
        let from = self.current;

        let Some(reaction) = states::react(from, event, &self.markers) else {
            self.stats.ignored += 1;
            debug!("FSM: {} ignored in {}", kind, from);
            self.sink.emit(&AppEvent::EventIgnored { kind, state: from });
            return Outcome::Ignored;
        };

        let outcome = if reaction.next == from {
            Outcome::Handled
        } else {
            self.transition(reaction.next);
            Outcome::Transitioned {
                from,
                to: reaction.next,
            }
        };

        match reaction.action {
            Some(Action::Relay(command)) => {
                debug!("FSM: relay {:?}", command);
                self.link.request(command);
            }
            Some(Action::Deliver(frame)) => {
                info!(
                    "FSM: data received from peer ({} tag bytes, {} arg bytes)",
                    frame.tag.len(),
                    frame.args.len()
                );
                self.sink.emit(&AppEvent::DataReceived(frame));
            }
            None => {}
        }

        outcome
    }

    fn transition(&mut self, next: StateId) {
        let from = self.current;
        info!("FSM transition: {} -> {}", from, next);

        self.current = next;
        self.published.set(next);
        self.sink.emit(&AppEvent::StateChanged { from, to: next });
    }
}
