//! Fuzz target: `Event::parse` + `StateMachine::step`
//!
//! Splits each input line into `kind` and payload, posts whatever parses
//! into a state machine and steps it.  Parsing must never panic, unknown
//! kinds must be rejected, and the machine must stay in a valid state.
//!
//! cargo fuzz run fuzz_event_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use tuio::app::events::AppEvent;
use tuio::config::FsmConfig;
use tuio::events::{Event, EventKind, Frame};
use tuio::fsm::{StateId, StateMachine};
use tuio::link::PeerLink;

fuzz_target!(|data: &[u8]| {
    let mut fsm = StateMachine::new(&FsmConfig::default(), PeerLink::new(), Vec::<AppEvent>::new());

    for line in data.split(|b| *b == b'\n') {
        let mut fields = line.splitn(2, |b| *b == b' ');
        let kind = String::from_utf8_lossy(fields.next().unwrap_or_default());
        let payload = Frame::new(fields.next().unwrap_or_default(), Vec::new());

        match Event::parse(&kind, payload) {
            Ok(event) => {
                fsm.post_local(event);
                fsm.step();
            }
            Err(_) => assert!(kind.parse::<EventKind>().is_err()),
        }
        assert!(StateId::ALL.contains(&fsm.current_state()));
    }
});
