//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  A UI or telemetry adapter would implement the same
//! trait.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from, to);
            }
            AppEvent::DataReceived(frame) => {
                info!(
                    "DATA  | tag={} args={}",
                    String::from_utf8_lossy(&frame.tag),
                    String::from_utf8_lossy(&frame.args)
                );
            }
            AppEvent::EventIgnored { kind, state } => {
                debug!("DROP  | {} in {}", kind, state);
            }
        }
    }
}
