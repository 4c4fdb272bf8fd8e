//! Transition table.
//!
//! ```text
//!  event              valid from         next      action
//!  ─────────────────  ─────────────────  ────────  ─────────────────────
//!  peer_connected     Idle               Main      —
//!  peer_disconnected  Idle|Main|Session  Idle      —
//!  data_received      Session            Session   deliver to application
//!  data_requested     Session            Session   Send(payload)
//!  start_session      Main               Session   Send(start marker)
//!  stop_session       Session            Main      Send(stop marker)
//!  shutdown           Idle|Main|Session  Exit      Close
//! ```
//!
//! Anything else is rejected and the caller drops the event.  `Exit`
//! rejects everything.

use crate::config::FsmConfig;
use crate::events::{Event, Frame};
use crate::link::RelayCommand;

use super::StateId;

/// Side effect of an accepted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Ask the collaborator to act on the peer.
    Relay(RelayCommand),
    /// Hand a received payload to the application.
    Deliver(Frame),
}

/// Result of an accepted event: where to go and what to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub next: StateId,
    pub action: Option<Action>,
}

impl Reaction {
    fn go(next: StateId) -> Self {
        Self { next, action: None }
    }

    fn relay(next: StateId, command: RelayCommand) -> Self {
        Self {
            next,
            action: Some(Action::Relay(command)),
        }
    }
}

/// The two reserved frames that bracket a session on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMarkers {
    pub start: Frame,
    pub stop: Frame,
}

impl SessionMarkers {
    pub fn from_config(config: &FsmConfig) -> Self {
        Self {
            start: Frame::marker(&config.start_marker),
            stop: Frame::marker(&config.stop_marker),
        }
    }
}

impl Default for SessionMarkers {
    fn default() -> Self {
        Self::from_config(&FsmConfig::default())
    }
}

/// Apply `event` to `current`.  Returns `None` when the guard rejects it.
pub fn react(current: StateId, event: Event, markers: &SessionMarkers) -> Option<Reaction> {
    use StateId::{Exit, Idle, Main, Session};

    match (current, event) {
        (Exit, _) => None,

        (_, Event::Shutdown) => Some(Reaction::relay(Exit, RelayCommand::Close)),
        (_, Event::PeerDisconnected) => Some(Reaction::go(Idle)),

        (Idle, Event::PeerConnected) => Some(Reaction::go(Main)),

        (Main, Event::StartSession) => Some(Reaction::relay(
            Session,
            RelayCommand::Send(markers.start.clone()),
        )),

        (Session, Event::StopSession) => Some(Reaction::relay(
            Main,
            RelayCommand::Send(markers.stop.clone()),
        )),
        (Session, Event::DataRequested(frame)) => {
            Some(Reaction::relay(Session, RelayCommand::Send(frame)))
        }
        (Session, Event::DataReceived(frame)) => Some(Reaction {
            next: Session,
            action: Some(Action::Deliver(frame)),
        }),

        _ => None,
    }
}
