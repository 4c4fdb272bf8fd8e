//! Host running against the echo peer collaborator.

use std::time::Duration;

use tuio::adapters::echo_peer;
use tuio::app::service::Host;
use tuio::config::FsmConfig;
use tuio::events::{Event, Frame};
use tuio::fsm::StateId;
use tuio::link::{PeerLink, RelayCommand};

use super::mock_sink::RecordingSink;

const TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn echo_peer_connects_on_open_and_stops_on_close() {
    let link = PeerLink::new();
    let peer = echo_peer::spawn(link.clone()).unwrap();
    let host = Host::start(&FsmConfig::default(), link, RecordingSink::new()).unwrap();

    assert!(host.wait_for(StateId::Main, TIMEOUT));
    host.post(Event::StartSession);
    assert!(host.wait_for(StateId::Session, TIMEOUT));

    let request = Frame::new(b"mpu_9255".as_slice(), b"data_sensor".as_slice());
    host.post(Event::DataRequested(request.clone()));
    host.shutdown();

    let fsm = host.join().unwrap();
    assert_eq!(fsm.current_state(), StateId::Exit);
    assert_eq!(
        peer.join().unwrap(),
        vec![
            RelayCommand::Open,
            RelayCommand::Send(Frame::marker("start_game")),
            RelayCommand::Send(request),
            RelayCommand::Close,
        ]
    );
}

#[test]
fn custom_markers_reach_the_peer() {
    let config = FsmConfig {
        start_marker: "begin".into(),
        stop_marker: "end".into(),
        ..FsmConfig::default()
    };
    let link = PeerLink::new();
    let peer = echo_peer::spawn(link.clone()).unwrap();
    let host = Host::start(&config, link, RecordingSink::new()).unwrap();

    assert!(host.wait_for(StateId::Main, TIMEOUT));
    host.post(Event::StartSession);
    host.post(Event::StopSession);
    host.shutdown();
    host.join().unwrap();

    assert_eq!(
        peer.join().unwrap(),
        vec![
            RelayCommand::Open,
            RelayCommand::Send(Frame::marker("begin")),
            RelayCommand::Send(Frame::marker("end")),
            RelayCommand::Close,
        ]
    );
}

#[test]
fn unknown_kind_is_reported_and_not_enqueued() {
    let link = PeerLink::new();
    let host = Host::start(&FsmConfig::default(), link, RecordingSink::new()).unwrap();
    let handle = host.handle();

    assert!(handle.post_named("exit_tuio1", Frame::default()).is_err());
    assert!(handle.post_named("shutdown", Frame::default()).is_ok());

    let fsm = host.join().unwrap();
    assert_eq!(fsm.current_state(), StateId::Exit);
    assert_eq!(fsm.stats().dispatched(), 1);
}
