//! Event model shared by every producer and the state machine.
//!
//! Events are produced by:
//! - the hosting application (session control, data requests, shutdown)
//! - the peer link (connect, disconnect, received data)
//!
//! Events are consumed by the driver thread, which feeds them to the
//! state machine one at a time, local queue first.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐
//! │ Application │────▶│ Local Queue  │──┐   ┌──────────────┐
//! └─────────────┘     └──────────────┘  ├──▶│ Driver Loop  │
//! ┌─────────────┐     ┌──────────────┐  │   │  (consumer)  │
//! │ Peer Link   │────▶│ Peer Queue   │──┘   └──────────────┘
//! └─────────────┘     └──────────────┘
//! ```

pub mod queue;

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use queue::EventQueue;

// ---------------------------------------------------------------------------
// Relay payload
// ---------------------------------------------------------------------------

/// Opaque `(tag, args)` payload carried by data events and relayed to the
/// peer verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    pub tag: Vec<u8>,
    pub args: Vec<u8>,
}

impl Frame {
    pub fn new(tag: impl Into<Vec<u8>>, args: impl Into<Vec<u8>>) -> Self {
        Self {
            tag: tag.into(),
            args: args.into(),
        }
    }

    /// A session-boundary marker: the tag alone, no arguments.
    pub fn marker(tag: &str) -> Self {
        Self::new(tag.as_bytes(), Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.tag.is_empty() && self.args.is_empty()
    }

    /// Compact binary encoding for collaborators that put frames on a wire.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(postcard::to_allocvec(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(postcard::from_bytes(bytes)?)
    }
}

// ---------------------------------------------------------------------------
// Event kinds
// ---------------------------------------------------------------------------

/// The fixed set of event tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PeerConnected,
    PeerDisconnected,
    DataReceived,
    DataRequested,
    StartSession,
    StopSession,
    Shutdown,
}

impl EventKind {
    pub const ALL: [Self; 7] = [
        Self::PeerConnected,
        Self::PeerDisconnected,
        Self::DataReceived,
        Self::DataRequested,
        Self::StartSession,
        Self::StopSession,
        Self::Shutdown,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PeerConnected => "peer_connected",
            Self::PeerDisconnected => "peer_disconnected",
            Self::DataReceived => "data_received",
            Self::DataRequested => "data_requested",
            Self::StartSession => "start_session",
            Self::StopSession => "stop_session",
            Self::Shutdown => "shutdown",
        }
    }

    /// Kinds accepted regardless of the current (non-terminal) state.
    pub const fn is_unconditional(self) -> bool {
        matches!(self, Self::PeerDisconnected | Self::Shutdown)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| Error::UnknownEventKind(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A `(kind, payload)` message. Control events carry no payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PeerConnected,
    PeerDisconnected,
    DataReceived(Frame),
    DataRequested(Frame),
    StartSession,
    StopSession,
    Shutdown,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PeerConnected => EventKind::PeerConnected,
            Self::PeerDisconnected => EventKind::PeerDisconnected,
            Self::DataReceived(_) => EventKind::DataReceived,
            Self::DataRequested(_) => EventKind::DataRequested,
            Self::StartSession => EventKind::StartSession,
            Self::StopSession => EventKind::StopSession,
            Self::Shutdown => EventKind::Shutdown,
        }
    }

    /// Build an event from a kind and a payload. The payload is dropped
    /// for control kinds.
    pub fn from_kind(kind: EventKind, payload: Frame) -> Self {
        match kind {
            EventKind::PeerConnected => Self::PeerConnected,
            EventKind::PeerDisconnected => Self::PeerDisconnected,
            EventKind::DataReceived => Self::DataReceived(payload),
            EventKind::DataRequested => Self::DataRequested(payload),
            EventKind::StartSession => Self::StartSession,
            EventKind::StopSession => Self::StopSession,
            EventKind::Shutdown => Self::Shutdown,
        }
    }

    /// Parse a textual kind. Unknown kinds are an error, not a drop.
    pub fn parse(kind: &str, payload: Frame) -> Result<Self> {
        Ok(Self::from_kind(kind.parse()?, payload))
    }

    pub fn payload(&self) -> Option<&Frame> {
        match self {
            Self::DataReceived(frame) | Self::DataRequested(frame) => Some(frame),
            _ => None,
        }
    }
}
