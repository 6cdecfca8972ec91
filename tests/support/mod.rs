//! Mock transport, timer driver and message handler shared by the scenario tests.
//!
//! Mirrors the byte-slice-backed mock connection pattern this codebase already
//! uses for protocol tests: no real I/O, everything recorded into `heapless`
//! buffers so assertions can inspect exactly what the engine sent.

use heapless::{String, Vec};
use mqtt_sn::session::MessageHandler;
use mqtt_sn::timers::{Seconds, TimerDriver, TimerId};
use mqtt_sn::transport::UdpTransport;

/// Records every datagram the engine attempts to send, in order.
#[derive(Default)]
pub struct MockTransport {
    pub sent: Vec<Vec<u8, 255>, 64>,
}

impl UdpTransport for MockTransport {
    type Error = ();

    fn send(&mut self, buf: &[u8]) -> Result<(), ()> {
        self.sent.push(Vec::from_slice(buf).map_err(|_| ())?).map_err(|_| ())
    }
}

/// Tracks which logical timers are armed without measuring real time; tests
/// fire timers explicitly via `Session::on_timer`.
#[derive(Default)]
pub struct MockTimers {
    pub armed: Vec<(TimerId, Seconds), 8>,
}

impl TimerDriver for MockTimers {
    fn arm(&mut self, which: TimerId, duration: Seconds) {
        self.armed.retain(|(id, _)| *id != which);
        let _ = self.armed.push((which, duration));
    }

    fn cancel(&mut self, which: TimerId) {
        self.armed.retain(|(id, _)| *id != which);
    }
}

/// Collects every inbound PUBLISH delivered to the application.
#[derive(Default)]
pub struct RecordingHandler {
    pub received: Vec<(String<64>, Vec<u8, 64>), 8>,
}

impl MessageHandler for RecordingHandler {
    fn on_message(&mut self, topic: &str, payload: &[u8]) {
        let _ = self.received.push((
            String::try_from(topic).unwrap(),
            Vec::from_slice(payload).unwrap(),
        ));
    }
}
