mod support;

use mqtt_sn::config::Config;
use mqtt_sn::limits::{RETRY, RETRY_PING};
use mqtt_sn::session::{Session, State};
use mqtt_sn::timers::TimerId;
use support::{MockTimers, MockTransport, RecordingHandler};

fn new_session() -> Session<MockTransport, MockTimers, RecordingHandler> {
    let config = Config::new("C", 5).unwrap();
    Session::new(
        MockTransport::default(),
        MockTimers::default(),
        RecordingHandler::default(),
        config,
    )
}

#[test]
fn happy_connect_and_register() {
    let mut session = new_session();
    session.create_session(&["/a", "/b"]).unwrap();
    assert_eq!(session.status(), State::WaitingConnAck);

    session.on_datagram(&[3, 0x05, 0x00]).unwrap();
    assert_eq!(session.status(), State::WaitingRegAck);

    session
        .on_datagram(&[7, 0x0B, 0x00, 0x01, 0x00, 0x01, 0x00])
        .unwrap();
    session
        .on_datagram(&[7, 0x0B, 0x00, 0x02, 0x00, 0x02, 0x00])
        .unwrap();
    assert_eq!(session.status(), State::TopicRegistered);
    assert_eq!(session.status_string(), "topic_registered");
}

#[test]
fn connect_retry_exhaustion_triggers_session_reset() {
    let mut session = new_session();
    session.create_session(&["/a"]).unwrap();

    // RETRY firings each retransmit the same CONNECT; the retry budget isn't
    // exhausted yet, so the session must not have reset.
    for _ in 0..RETRY {
        session.on_timer(TimerId::Connect);
    }
    assert_eq!(session.status(), State::WaitingConnAck);

    // One more firing exhausts the retry budget: session reset, then
    // auto-reconnect immediately replays CONNECT from scratch.
    session.on_timer(TimerId::Connect);
    assert_eq!(session.status(), State::WaitingConnAck);

    // The replayed handshake completes normally, showing the reset actually
    // rebuilt a fresh registry/queue rather than leaving the old ones in place.
    session.on_datagram(&[3, 0x05, 0x00]).unwrap();
    assert_eq!(session.status(), State::WaitingRegAck);
    session
        .on_datagram(&[7, 0x0B, 0x00, 0x01, 0x00, 0x01, 0x00])
        .unwrap();
    assert_eq!(session.status(), State::TopicRegistered);
}

#[test]
fn publish_before_topic_registered_is_rejected() {
    let mut session = new_session();
    session.create_session(&["/a"]).unwrap();
    assert!(session.publish("/a", b"x", false, 0).is_err());
}

#[test]
fn inbound_publish_is_delivered_to_handler() {
    let mut session = new_session();
    session.create_session(&["/a"]).unwrap();
    session.on_datagram(&[3, 0x05, 0x00]).unwrap();
    session
        .on_datagram(&[7, 0x0B, 0x00, 0x01, 0x00, 0x01, 0x00])
        .unwrap();
    assert_eq!(session.status(), State::TopicRegistered);

    session
        .on_datagram(&[8, 0x0C, 0b0000_0000, 0x00, 0x01, 0x00, 0x00, b'h'])
        .unwrap();
}

#[test]
fn ping_loss_past_retry_limit_resets_and_reconnects() {
    let mut session = new_session();
    session.create_session(&["/a"]).unwrap();
    session.on_datagram(&[3, 0x05, 0x00]).unwrap();
    session
        .on_datagram(&[7, 0x0B, 0x00, 0x01, 0x00, 0x01, 0x00])
        .unwrap();
    assert_eq!(session.status(), State::TopicRegistered);

    for _ in 0..=RETRY_PING {
        session.on_timer(TimerId::Ping);
    }
    assert_eq!(session.status(), State::WaitingConnAck);
}

#[test]
fn wildcard_subscribe_and_server_register() {
    let mut session = new_session();
    session.create_session(&["/a"]).unwrap();
    session.on_datagram(&[3, 0x05, 0x00]).unwrap();
    session
        .on_datagram(&[7, 0x0B, 0x00, 0x01, 0x00, 0x01, 0x00])
        .unwrap();

    session.subscribe("/a/#", 0).unwrap();
    assert_eq!(session.status(), State::WaitingSubAck);

    session
        .on_datagram(&[8, 0x13, 0b0000_0000, 0x00, 0x00, 0x00, 0x01, 0x00])
        .unwrap();
    assert_eq!(session.status(), State::TopicRegistered);

    let mut register = heapless::Vec::<u8, 32>::new();
    register.extend_from_slice(&[10, 0x0A, 0x00, 0x09, 0x00, 0x07]).unwrap();
    register.extend_from_slice(b"/a/x").unwrap();
    session.on_datagram(&register).unwrap();

    // A server-initiated REGISTER must be acknowledged.
    assert_eq!(session.status(), State::TopicRegistered);
}
