//! Port traits — the boundary between the state machine and the host.
//!
//! ```text
//!   StateMachine ──▶ EventSink ──▶ Adapter (log, UI, test recorder)
//! ```

use super::events::AppEvent;

/// The state machine emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

/// Collects events in memory.
impl EventSink for Vec<AppEvent> {
    fn emit(&mut self, event: &AppEvent) {
        self.push(event.clone());
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: &AppEvent) {
        (**self).emit(event);
    }
}
