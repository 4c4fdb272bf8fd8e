//! Peer link — the boundary with the network-server collaborator.
//!
//! The collaborator owns two queues and shares them with the state
//! machine through a cloneable [`PeerLink`]:
//!
//! ```text
//! ┌──────────────┐  PeerEvent     ┌───────────────┐
//! │ Collaborator │──────────────▶│ State Machine │
//! │ (server)     │◀──────────────│ (driver)      │
//! └──────────────┘  RelayCommand  └───────────────┘
//! ```
//!
//! The state machine only ever reads `from_peer` and only ever writes
//! `to_peer`; the collaborator does the opposite.

use std::sync::Arc;

use crate::events::{Event, EventQueue, Frame};

/// Something the collaborator observed on the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerEvent {
    Connected,
    Disconnected,
    DataReceived(Frame),
}

impl From<PeerEvent> for Event {
    fn from(ev: PeerEvent) -> Self {
        match ev {
            PeerEvent::Connected => Self::PeerConnected,
            PeerEvent::Disconnected => Self::PeerDisconnected,
            PeerEvent::DataReceived(frame) => Self::DataReceived(frame),
        }
    }
}

/// An outbound action the state machine asks the collaborator to take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayCommand {
    /// Bring the link up and start accepting the peer.
    Open,
    /// Transmit a frame to the peer.
    Send(Frame),
    /// Tear the connection down and stop.
    Close,
}

/// Shared handle on the collaborator's queue pair.
#[derive(Clone, Default)]
pub struct PeerLink {
    from_peer: Arc<EventQueue<PeerEvent>>,
    to_peer: Arc<EventQueue<RelayCommand>>,
}

impl PeerLink {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Collaborator side ─────────────────────────────────────

    /// Report a network observation to the state machine.
    pub fn notify(&self, event: PeerEvent) {
        self.from_peer.post(event);
    }

    /// Take the next relay command, if any.
    pub fn next_command(&self) -> Option<RelayCommand> {
        self.to_peer.try_take()
    }

    /// Resolves when a relay command has been requested since the last
    /// time this resolved.
    pub async fn command_ready(&self) {
        self.to_peer.ready().await;
    }

    // ── State machine side ────────────────────────────────────

    pub(crate) fn request(&self, command: RelayCommand) {
        self.to_peer.post(command);
    }

    pub(crate) fn poll_event(&self) -> Option<PeerEvent> {
        self.from_peer.try_take()
    }

    pub(crate) fn peer_queue(&self) -> Arc<EventQueue<PeerEvent>> {
        Arc::clone(&self.from_peer)
    }

    // ── Inspection ────────────────────────────────────────────

    /// Number of peer events the state machine has not consumed yet.
    pub fn pending_events(&self) -> usize {
        self.from_peer.len()
    }

    /// Number of relay commands the collaborator has not consumed yet.
    pub fn pending_commands(&self) -> usize {
        self.to_peer.len()
    }

    /// Take every pending relay command, oldest first.
    pub fn drain_commands(&self) -> Vec<RelayCommand> {
        self.to_peer.drain()
    }
}
