//! Outbound application events.
//!
//! The [`StateMachine`](crate::fsm::StateMachine) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log them, render them, record them
//! in a test.

use crate::events::{EventKind, Frame};
use crate::fsm::StateId;

/// Structured events emitted by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The state machine was created (carries initial state).
    Started(StateId),

    /// The state machine transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// Data from the peer, delivered during a session.
    DataReceived(Frame),

    /// An event was dropped because the current state does not accept it.
    EventIgnored { kind: EventKind, state: StateId },
}
