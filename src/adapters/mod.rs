//! Adapter layer — concrete implementations of the host-facing ports.
//!
//! - [`log_sink`]: [`EventSink`](crate::app::ports::EventSink) that logs
//! - [`echo_peer`]: stand-in collaborator serving a [`PeerLink`](crate::link::PeerLink)

pub mod echo_peer;
pub mod log_sink;
