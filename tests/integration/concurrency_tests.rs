//! Concurrent producers on both queues against a running driver.

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use tuio::app::service::Host;
use tuio::config::FsmConfig;
use tuio::events::{Event, Frame};
use tuio::fsm::StateId;
use tuio::link::{PeerEvent, PeerLink, RelayCommand};

use super::mock_sink::RecordingSink;

const PER_SOURCE: u32 = 1_000;
const TIMEOUT: Duration = Duration::from_secs(10);

fn numbered(tag: &str, i: u32) -> Frame {
    Frame::new(tag.as_bytes(), i.to_le_bytes().to_vec())
}

#[test]
fn thousand_local_and_thousand_peer_events_all_dispatched_in_order() {
    let link = PeerLink::new();
    let host = Host::start(&FsmConfig::default(), link.clone(), RecordingSink::new()).unwrap();

    link.notify(PeerEvent::Connected);
    assert!(host.wait_for(StateId::Main, TIMEOUT));
    host.post(Event::StartSession);
    assert!(host.wait_for(StateId::Session, TIMEOUT));

    let start = Arc::new(Barrier::new(2));
    let local = {
        let handle = host.handle();
        let start = Arc::clone(&start);
        thread::spawn(move || {
            start.wait();
            for i in 0..PER_SOURCE {
                handle.post(Event::DataRequested(numbered("req", i)));
            }
        })
    };
    let peer = {
        let link = link.clone();
        let start = Arc::clone(&start);
        thread::spawn(move || {
            start.wait();
            for i in 0..PER_SOURCE {
                link.notify(PeerEvent::DataReceived(numbered("rx", i)));
            }
        })
    };
    local.join().unwrap();
    peer.join().unwrap();

    // Shutdown is local and would overtake anything still queued.
    while link.pending_events() > 0 || host.handle().pending() > 0 {
        thread::yield_now();
    }
    host.shutdown();
    let fsm = host.join().unwrap();

    // Connected + StartSession + Shutdown around the 2,000 data events.
    let stats = fsm.stats();
    assert_eq!(stats.dispatched(), u64::from(2 * PER_SOURCE) + 3);
    assert_eq!(stats.local, u64::from(PER_SOURCE) + 2);
    assert_eq!(stats.peer, u64::from(PER_SOURCE) + 1);
    assert_eq!(stats.ignored, 0);

    let expected_rx: Vec<_> = (0..PER_SOURCE).map(|i| numbered("rx", i)).collect();
    assert_eq!(fsm.sink().delivered(), expected_rx);

    let mut expected_relays = vec![
        RelayCommand::Open,
        RelayCommand::Send(Frame::marker("start_game")),
    ];
    expected_relays.extend((0..PER_SOURCE).map(|i| RelayCommand::Send(numbered("req", i))));
    expected_relays.push(RelayCommand::Close);
    assert_eq!(link.drain_commands(), expected_relays);
}

#[test]
fn many_local_producers_keep_per_producer_order() {
    const PRODUCERS: u32 = 4;
    const PER_PRODUCER: u32 = 250;

    let link = PeerLink::new();
    let host = Host::start(&FsmConfig::default(), link.clone(), RecordingSink::new()).unwrap();
    link.notify(PeerEvent::Connected);
    assert!(host.wait_for(StateId::Main, TIMEOUT));
    host.post(Event::StartSession);
    assert!(host.wait_for(StateId::Session, TIMEOUT));

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let handle = host.handle();
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    handle.post(Event::DataRequested(numbered(&format!("p{p}"), i)));
                }
            })
        })
        .collect();
    for p in producers {
        p.join().unwrap();
    }
    host.shutdown();
    host.join().unwrap();

    let mut next = vec![0u32; PRODUCERS as usize];
    let mut sends = 0;
    for command in link.drain_commands() {
        let RelayCommand::Send(frame) = command else {
            continue;
        };
        let Some(p) = frame
            .tag
            .strip_prefix(b"p")
            .and_then(|d| std::str::from_utf8(d).ok())
            .and_then(|d| d.parse::<usize>().ok())
        else {
            continue;
        };
        let i = u32::from_le_bytes(frame.args[..4].try_into().unwrap());
        assert_eq!(i, next[p], "producer {p} reordered");
        next[p] += 1;
        sends += 1;
    }
    assert_eq!(sends, PRODUCERS * PER_PRODUCER);
}
