//! End-to-end session flow with the test acting as the collaborator.

use std::time::Duration;

use tuio::app::service::Host;
use tuio::config::FsmConfig;
use tuio::events::{Event, Frame};
use tuio::fsm::StateId;
use tuio::link::{PeerEvent, PeerLink, RelayCommand};

use super::mock_sink::RecordingSink;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Block until the driver has taken every pending peer event.
fn drain_peer_queue(link: &PeerLink) {
    while link.pending_events() > 0 {
        std::thread::yield_now();
    }
}

fn sensor_request() -> Frame {
    Frame::new(b"mpu_9255".as_slice(), b"data_sensor".as_slice())
}

#[test]
fn connect_session_request_stop_shutdown() {
    let link = PeerLink::new();
    let host = Host::start(&FsmConfig::default(), link.clone(), RecordingSink::new()).unwrap();

    link.notify(PeerEvent::Connected);
    assert!(host.wait_for(StateId::Main, TIMEOUT));

    host.post(Event::StartSession);
    host.post(Event::DataRequested(sensor_request()));
    host.post(Event::StopSession);
    host.shutdown();

    let fsm = host.join().unwrap();
    assert_eq!(fsm.current_state(), StateId::Exit);
    assert_eq!(
        fsm.sink().state_trace(),
        vec![
            StateId::Idle,
            StateId::Main,
            StateId::Session,
            StateId::Main,
            StateId::Exit,
        ]
    );
    assert_eq!(
        link.drain_commands(),
        vec![
            RelayCommand::Open,
            RelayCommand::Send(Frame::marker("start_game")),
            RelayCommand::Send(sensor_request()),
            RelayCommand::Send(Frame::marker("stop_game")),
            RelayCommand::Close,
        ]
    );
}

#[test]
fn session_commands_before_connect_are_dropped() {
    let link = PeerLink::new();
    let host = Host::start(&FsmConfig::default(), link.clone(), RecordingSink::new()).unwrap();

    host.post(Event::StartSession);
    host.post(Event::DataRequested(sensor_request()));
    host.post(Event::StopSession);
    host.shutdown();

    let fsm = host.join().unwrap();
    assert_eq!(fsm.sink().state_trace(), vec![StateId::Idle, StateId::Exit]);
    assert_eq!(fsm.sink().ignored_count(), 3);
    assert_eq!(
        link.drain_commands(),
        vec![RelayCommand::Open, RelayCommand::Close]
    );
}

#[test]
fn peer_data_reaches_application_only_in_session() {
    let link = PeerLink::new();
    let host = Host::start(&FsmConfig::default(), link.clone(), RecordingSink::new()).unwrap();
    let early = Frame::new(b"mpu_9255".as_slice(), b"early".as_slice());
    let live = Frame::new(b"mpu_9255".as_slice(), b"live".as_slice());

    link.notify(PeerEvent::Connected);
    link.notify(PeerEvent::DataReceived(early));
    drain_peer_queue(&link);
    assert!(host.wait_for(StateId::Main, TIMEOUT));

    host.post(Event::StartSession);
    assert!(host.wait_for(StateId::Session, TIMEOUT));
    link.notify(PeerEvent::DataReceived(live.clone()));

    // A local shutdown would overtake a pending peer event.
    drain_peer_queue(&link);
    host.shutdown();

    let fsm = host.join().unwrap();
    assert_eq!(fsm.sink().delivered(), vec![live]);
}

#[test]
fn disconnect_mid_session_returns_to_idle_and_allows_reconnect() {
    let link = PeerLink::new();
    let host = Host::start(&FsmConfig::default(), link.clone(), RecordingSink::new()).unwrap();

    link.notify(PeerEvent::Connected);
    assert!(host.wait_for(StateId::Main, TIMEOUT));
    host.post(Event::StartSession);
    assert!(host.wait_for(StateId::Session, TIMEOUT));

    link.notify(PeerEvent::Disconnected);
    assert!(host.wait_for(StateId::Idle, TIMEOUT));
    link.notify(PeerEvent::Connected);
    assert!(host.wait_for(StateId::Main, TIMEOUT));

    host.shutdown();
    let fsm = host.join().unwrap();
    assert_eq!(
        fsm.sink().state_trace(),
        vec![
            StateId::Idle,
            StateId::Main,
            StateId::Session,
            StateId::Idle,
            StateId::Main,
            StateId::Exit,
        ]
    );
    assert_eq!(
        link.drain_commands(),
        vec![
            RelayCommand::Open,
            RelayCommand::Send(Frame::marker("start_game")),
            RelayCommand::Close,
        ]
    );
}
