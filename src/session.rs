//! The protocol engine: state machine plus session manager.
//!
//! [`Session`] owns every piece of mutable state the engine touches — registry,
//! queue, timers, retry counters — and exposes two inbound entry points,
//! [`Session::on_datagram`] and [`Session::on_timer`], plus the user-facing
//! operations from the module-level docs (`create_session`, `publish`,
//! `subscribe`, `disconnect`, `status`). Nothing here spawns a thread or owns
//! an event loop: the embedder's scheduler calls in whenever something
//! happens.

#![allow(missing_docs)]

use heapless::{String, Vec};

use crate::codec::{self, Flags, Packet, ReturnCode, TopicIdType};
use crate::config::Config;
use crate::error::Error;
use crate::limits::{MAX_DECLARED_TOPICS, MAX_TOPIC_LENGTH, RETRY, RETRY_PING};
use crate::queue::Queue;
use crate::registry::{Registry, SubState};
use crate::task::{Task, TaskKind};
use crate::timers::{ArmedTimers, Seconds, TimerDriver, TimerId};
use crate::transport::UdpTransport;

/// Engine state, matching the gateway handshake's natural phases.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum State {
    Disconnected,
    WaitingWillTopicReq,
    WaitingWillMsgReq,
    WaitingConnAck,
    Connected,
    WaitingRegAck,
    /// Idle and ready: connected, no REGISTER or SUBSCRIBE in flight.
    TopicRegistered,
    WaitingSubAck,
}

impl State {
    /// Human-readable name, for logs and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            State::Disconnected => "disconnected",
            State::WaitingWillTopicReq => "waiting_willtopicreq",
            State::WaitingWillMsgReq => "waiting_willmsgreq",
            State::WaitingConnAck => "waiting_connack",
            State::Connected => "connected",
            State::WaitingRegAck => "waiting_regack",
            State::TopicRegistered => "topic_registered",
            State::WaitingSubAck => "waiting_suback",
        }
    }
}

/// Receiver for inbound application payloads.
///
/// Implemented by the embedder; `on_message` is called synchronously from
/// inside [`Session::on_datagram`] while decoding a PUBLISH, so it must not
/// block or re-enter the session.
pub trait MessageHandler {
    fn on_message(&mut self, topic: &str, payload: &[u8]);
}

/// The protocol engine. Generic over the transport, timer backend and message
/// handler so it never needs a heap-allocated trait object.
pub struct Session<T, D, H>
where
    T: UdpTransport,
    D: TimerDriver,
    H: MessageHandler,
{
    transport: T,
    timers: D,
    handler: H,
    config: Config,
    registry: Registry,
    queue: Queue,
    armed: ArmedTimers,
    state: State,
    retry: u8,
    ping_pending: bool,
    ping_retry: u8,
    wildcard_scratch: Option<String<MAX_TOPIC_LENGTH>>,
    declared_topics: Vec<String<MAX_TOPIC_LENGTH>, MAX_DECLARED_TOPICS>,
    transport_registered: bool,
}

impl<T, D, H> Session<T, D, H>
where
    T: UdpTransport,
    D: TimerDriver,
    H: MessageHandler,
{
    /// Build a fresh engine. Equivalent to calling `init()` on the reference
    /// implementation: registry and queue start empty, state is
    /// [`State::Disconnected`].
    pub fn new(transport: T, timers: D, handler: H, config: Config) -> Self {
        Session {
            transport,
            timers,
            handler,
            config,
            registry: Registry::new(),
            queue: Queue::new(),
            armed: ArmedTimers::new(),
            state: State::Disconnected,
            retry: 0,
            ping_pending: false,
            ping_retry: 0,
            wildcard_scratch: None,
            declared_topics: Vec::new(),
            transport_registered: false,
        }
    }

    /// Current engine state.
    pub fn status(&self) -> State {
        self.state
    }

    /// Human-readable current state, for logs.
    pub fn status_string(&self) -> &'static str {
        self.state.as_str()
    }

    /// Start (or restart) a session: enqueue CONNECT, optional WILLTOPIC/WILLMSG,
    /// and a REGISTER per pre-declared topic, then run the head of the queue.
    ///
    /// Only the first call actually registers the transport's endpoint; later
    /// calls (session replay after a reset) reuse the existing registration,
    /// matching the reference engine's `g_recon`-gated behaviour.
    pub fn create_session(&mut self, topics: &[&str]) -> Result<(), Error> {
        if self.config.client_id.len() > crate::limits::MAX_CLIENT_ID_LENGTH {
            return Err(Error::InvalidClientId);
        }
        self.declared_topics.clear();
        for name in topics {
            self.declared_topics
                .push(String::try_from(*name).map_err(|_| Error::TooLong)?)
                .map_err(|_| Error::RegistryFull)?;
        }
        self.transport_registered = true;
        self.begin_handshake()
    }

    /// Re-run the handshake against the already-declared topic list, used both
    /// by `create_session` and by session-reset auto-reconnect.
    fn begin_handshake(&mut self) -> Result<(), Error> {
        self.registry.reset();
        self.queue.reset();

        self.queue.push(Task::new(TaskKind::Connect, 0, 0, false))?;
        if self.config.has_will() {
            self.queue.push(Task::new(TaskKind::WillTopic, 0, 0, false))?;
            self.queue.push(Task::new(TaskKind::WillMsg, 0, 0, false))?;
        }
        for name in self.declared_topics.clone().iter() {
            let idx = self.registry.declare(name)?;
            self.queue
                .push(Task::new(TaskKind::Register, idx, 0, false))?;
        }

        self.state = State::Disconnected;
        self.retry = 0;
        self.run_task();
        Ok(())
    }

    /// Publish to an already-registered topic. Rejected unless the engine is
    /// idle (no REGISTER/SUBSCRIBE in flight) and the topic is known.
    pub fn publish(&mut self, topic: &str, payload: &[u8], retain: bool, qos: i8) -> Result<(), Error> {
        if self.state != State::TopicRegistered {
            return Err(Error::NotReady);
        }
        let idx = self.registry.lookup_by_name(topic).ok_or(Error::UnknownTopic)?;
        let topic_id = self.registry.id(idx).ok_or(Error::UnknownTopic)? as u16;
        let flags = Flags {
            qos,
            retain,
            topic_id_type: Some(TopicIdType::Predefined),
            ..Default::default()
        };
        let packet = codec::encode_publish(flags, topic_id, 0, payload)?;
        self.transport.send(&packet).map_err(|_| Error::TransportError)?;
        Ok(())
    }

    /// Subscribe to a topic. Wildcard patterns (containing `#` or `+`) go
    /// through the single-slot wildcard path; at most one may be outstanding.
    pub fn subscribe(&mut self, topic: &str, qos: i8) -> Result<(), Error> {
        if topic.contains('#') || topic.contains('+') {
            if self.wildcard_scratch.is_some() {
                return Err(Error::WildcardBusy);
            }
            self.wildcard_scratch = Some(String::try_from(topic).map_err(|_| Error::TooLong)?);
            self.queue.push(Task::new(TaskKind::SubWildcard, 0, qos, false))?;
        } else {
            let idx = self.registry.lookup_by_name(topic).ok_or(Error::UnknownTopic)?;
            if self.registry.sub_state(idx) != Some(SubState::None) {
                return Err(Error::NotReady);
            }
            self.registry.set_sub_state(idx, SubState::Pending)?;
            self.queue.push(Task::new(TaskKind::Subscribe, idx, qos, false))?;
        }
        self.run_task();
        Ok(())
    }

    /// Send DISCONNECT and stop all timers. Does not wait for a reply.
    pub fn disconnect(&mut self, duration: u16) -> Result<(), Error> {
        let packet = codec::encode_disconnect(duration)?;
        self.transport.send(&packet).map_err(|_| Error::TransportError)?;
        self.stop_all_timers();
        self.state = State::Disconnected;
        Ok(())
    }

    /// Feed one inbound UDP datagram (exactly one MQTT-SN packet) to the engine.
    pub fn on_datagram(&mut self, buf: &[u8]) -> Result<(), Error> {
        let packet = codec::decode(buf)?;
        self.handle_packet(packet)
    }

    /// Notify the engine that a previously armed timer fired.
    pub fn on_timer(&mut self, which: TimerId) {
        match which {
            TimerId::Ping => self.handle_ping_tick(),
            other => self.handle_retransmit_timeout(other),
        }
    }

    // -- internal: outbound packet construction -----------------------------

    fn send_connect(&mut self) -> Result<(), Error> {
        let flags = Flags {
            clean_session: self.config.clean_session,
            will: self.config.has_will(),
            ..Default::default()
        };
        let packet = codec::encode_connect(flags, self.config.keep_alive_seconds, &self.config.client_id)?;
        self.transport.send(&packet).map_err(|_| Error::TransportError)?;
        self.arm_retransmit(TimerId::Connect);
        self.state = if self.config.has_will() {
            State::WaitingWillTopicReq
        } else {
            State::WaitingConnAck
        };
        Ok(())
    }

    fn send_will_topic(&mut self) -> Result<(), Error> {
        let topic = self.config.will_topic.as_deref().ok_or(Error::NotReady)?;
        let flags = Flags::default();
        let packet = codec::encode_will_topic(flags, topic)?;
        self.transport.send(&packet).map_err(|_| Error::TransportError)?;
        self.state = State::WaitingWillMsgReq;
        Ok(())
    }

    fn send_will_msg(&mut self) -> Result<(), Error> {
        let msg = self.config.will_message.as_deref().ok_or(Error::NotReady)?;
        let packet = codec::encode_will_msg(msg)?;
        self.transport.send(&packet).map_err(|_| Error::TransportError)?;
        self.state = State::WaitingConnAck;
        Ok(())
    }

    /// REGISTER's outbound MsgId is the task's registry slot index, not its
    /// own task id: the reference engine correlates the REGACK back to a slot
    /// via the echoed MsgId, which only works because tasks run strictly
    /// sequentially (at most one REGISTER is ever in flight at a time).
    fn send_register(&mut self, task: Task) -> Result<(), Error> {
        let name = self.registry.name(task.short_topic).ok_or(Error::UnknownTopic)?;
        let packet = codec::encode_register(task.short_topic as u16, name)?;
        self.transport.send(&packet).map_err(|_| Error::TransportError)?;
        self.arm_retransmit(TimerId::Register);
        self.state = State::WaitingRegAck;
        Ok(())
    }

    /// SUBSCRIBE is sent with `TopicIdType::Predefined` carrying the id this
    /// client itself assigned during REGISTER, which is not how predefined
    /// ids are meant to be used (they should be agreed out of band with the
    /// gateway ahead of time). Kept for wire-compatibility with the engine
    /// this crate reimplements; see the registry module docs for the related
    /// low-byte-id quirk this interacts with.
    fn send_subscribe(&mut self, task: Task) -> Result<(), Error> {
        let packet = match task.kind {
            TaskKind::Subscribe => {
                let topic_id = self.registry.id(task.short_topic).ok_or(Error::UnknownTopic)? as u16;
                let flags = Flags {
                    qos: task.qos,
                    topic_id_type: Some(TopicIdType::Predefined),
                    ..Default::default()
                };
                codec::encode_subscribe_predefined(flags, task.id_task, topic_id)?
            }
            TaskKind::SubWildcard => {
                let name = self.wildcard_scratch.as_deref().ok_or(Error::NotReady)?;
                let flags = Flags {
                    qos: task.qos,
                    topic_id_type: Some(TopicIdType::Normal),
                    ..Default::default()
                };
                codec::encode_subscribe_name(flags, task.id_task, name)?
            }
            _ => return Err(Error::NotReady),
        };
        self.transport.send(&packet).map_err(|_| Error::TransportError)?;
        self.arm_retransmit(TimerId::Subscribe);
        self.state = State::WaitingSubAck;
        Ok(())
    }

    fn send_pingreq(&mut self) -> Result<(), Error> {
        let packet = codec::encode_pingreq(&self.config.client_id)?;
        self.transport.send(&packet).map_err(|_| Error::TransportError)
    }

    // -- internal: inbound packet handling -----------------------------------

    fn handle_packet(&mut self, packet: Packet<'_>) -> Result<(), Error> {
        match packet {
            Packet::WillTopicReq => {
                if self.state == State::WaitingWillTopicReq {
                    self.send_will_topic()?;
                    self.queue.pop_head();
                }
            }
            Packet::WillMsgReq => {
                if self.state == State::WaitingWillMsgReq {
                    self.send_will_msg()?;
                    self.queue.pop_head();
                }
            }
            Packet::ConnAck { return_code } => {
                if self.state == State::WaitingConnAck && return_code.is_accepted() {
                    self.stop_retransmit();
                    self.queue.pop_head();
                    self.state = State::Connected;
                    self.arm_ping();
                    self.run_task();
                }
            }
            Packet::RegAck {
                topic_id,
                msg_id,
                return_code,
            } => {
                if self.state == State::WaitingRegAck && return_code.is_accepted() {
                    self.registry.bind(msg_id as usize, topic_id)?;
                    self.queue.pop_head();
                    self.stop_retransmit();
                    self.state = State::TopicRegistered;
                    self.run_task();
                }
            }
            Packet::Register {
                topic_id,
                msg_id,
                topic_name,
            } => {
                let idx = self.registry.declare(topic_name)?;
                self.registry.bind(idx, topic_id)?;
                self.registry.set_sub_state(idx, SubState::Subscribed)?;
                let packet = codec::encode_regack(topic_id, msg_id, ReturnCode::Accepted)?;
                self.transport.send(&packet).map_err(|_| Error::TransportError)?;
            }
            Packet::Publish { topic_id, data, .. } => {
                if let Some(idx) = self.registry.lookup_by_id(topic_id) {
                    if let Some(name) = self.registry.name(idx) {
                        self.handler.on_message(name, data);
                    }
                }
            }
            Packet::SubAck {
                topic_id,
                return_code,
                ..
            } => {
                if self.state == State::WaitingSubAck {
                    if topic_id == 0 {
                        // Wildcard acknowledgement: index 0 is reserved and never
                        // bound to a real topic, so this value is unambiguous.
                        self.queue.pop_head();
                        self.stop_retransmit();
                        self.wildcard_scratch = None;
                        self.state = State::TopicRegistered;
                        self.run_task();
                    } else if return_code.is_accepted() {
                        if let Some(idx) = self.registry.lookup_by_id(topic_id) {
                            self.registry.set_sub_state(idx, SubState::Subscribed)?;
                        }
                        self.queue.pop_head();
                        self.stop_retransmit();
                        self.state = State::TopicRegistered;
                        self.run_task();
                    }
                }
            }
            Packet::PingReq => {
                // A gateway-initiated keep-alive probe; answered with our own
                // PINGREQ rather than a PINGRESP, matching the engine this
                // crate reimplements (which has no distinct client-side
                // PINGRESP encoder).
                self.send_pingreq()?;
            }
            Packet::PingResp => {
                self.ping_pending = false;
            }
            Packet::Disconnect { .. } => {
                // No rx-DISCONNECT transition is defined anywhere in the state
                // machine; discarded like any other unsolicited packet.
            }
        }
        Ok(())
    }

    // -- internal: timers -----------------------------------------------------

    fn arm_retransmit(&mut self, which: TimerId) {
        self.timers.arm(which, which.default_timeout().expect("retransmit timers have a fixed timeout"));
        self.armed.set_retransmit(which);
    }

    fn stop_retransmit(&mut self) {
        if let Some(which) = self.armed.retransmit() {
            self.timers.cancel(which);
            self.armed.clear_retransmit();
        }
    }

    fn arm_ping(&mut self) {
        self.timers.arm(TimerId::Ping, Seconds(self.config.keep_alive_seconds as u32));
        self.armed.set_ping_armed(true);
        self.ping_pending = false;
        self.ping_retry = 0;
    }

    fn stop_all_timers(&mut self) {
        self.stop_retransmit();
        if self.armed.ping_armed() {
            self.timers.cancel(TimerId::Ping);
            self.armed.set_ping_armed(false);
        }
    }

    fn handle_ping_tick(&mut self) {
        if self.ping_pending {
            self.ping_retry += 1;
            if self.ping_retry >= RETRY_PING {
                self.session_reset();
                return;
            }
            let _ = self.send_pingreq();
        } else {
            self.ping_pending = true;
            self.ping_retry = 0;
            let _ = self.send_pingreq();
        }
        // Always re-armed: a missed reply is detected on the next tick, not
        // by withholding the re-arm.
        self.timers.arm(TimerId::Ping, Seconds(self.config.keep_alive_seconds as u32));
    }

    fn handle_retransmit_timeout(&mut self, which: TimerId) {
        if self.armed.retransmit() != Some(which) {
            return; // stray expiry from a timer we already cancelled
        }
        if self.retry >= RETRY {
            self.session_reset();
            return;
        }
        self.retry += 1;
        let result = match which {
            TimerId::Connect => self.send_connect(),
            TimerId::Register => self
                .queue
                .peek_head()
                .copied()
                .map(|t| self.send_register(t))
                .unwrap_or(Ok(())),
            TimerId::Subscribe => self
                .queue
                .peek_head()
                .copied()
                .map(|t| self.send_subscribe(t))
                .unwrap_or(Ok(())),
            TimerId::Ping => unreachable!("ping timer handled in handle_ping_tick"),
        };
        let _ = result;
    }

    /// Tear the session down and, if configured, replay the handshake against
    /// the pre-declared topic list without re-registering the transport.
    fn session_reset(&mut self) {
        self.stop_all_timers();
        self.registry.reset();
        self.queue.reset();
        self.wildcard_scratch = None;
        self.ping_pending = false;
        self.ping_retry = 0;
        self.state = State::Disconnected;
        if self.config.auto_reconnect && self.transport_registered {
            // `declared_topics`'s capacity (`MAX_DECLARED_TOPICS`) is sized so this
            // replay always fits the freshly-reset queue and registry; it cannot fail.
            let _ = self.begin_handshake();
        }
    }

    /// Execute the queue head if the engine is idle for that task kind. Starting
    /// a task always resets the retry counter: it only ever tracks retries of
    /// whatever is currently at the head.
    fn run_task(&mut self) {
        let Some(task) = self.queue.peek_head().copied() else {
            return;
        };
        self.retry = 0;
        match (self.state, task.kind) {
            (State::Disconnected, TaskKind::Connect) => {
                let _ = self.send_connect();
            }
            (State::Connected, TaskKind::Register) | (State::TopicRegistered, TaskKind::Register) => {
                let _ = self.send_register(task);
            }
            (State::TopicRegistered, TaskKind::Subscribe)
            | (State::TopicRegistered, TaskKind::SubWildcard) => {
                let _ = self.send_subscribe(task);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec as HVec;

    #[derive(Default)]
    struct MockTransport {
        sent: HVec<HVec<u8, 255>, 32>,
    }

    impl UdpTransport for MockTransport {
        type Error = ();
        fn send(&mut self, buf: &[u8]) -> Result<(), ()> {
            self.sent
                .push(HVec::from_slice(buf).map_err(|_| ())?)
                .map_err(|_| ())
        }
    }

    #[derive(Default)]
    struct MockTimers {
        armed: HVec<(TimerId, Seconds), 8>,
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

    #[derive(Default)]
    struct RecordingHandler {
        received: HVec<(String<64>, HVec<u8, 64>), 8>,
    }

    impl MessageHandler for RecordingHandler {
        fn on_message(&mut self, topic: &str, payload: &[u8]) {
            let _ = self.received.push((
                String::try_from(topic).unwrap(),
                HVec::from_slice(payload).unwrap(),
            ));
        }
    }

    fn session() -> Session<MockTransport, MockTimers, RecordingHandler> {
        let config = Config::new("C", 5).unwrap();
        Session::new(MockTransport::default(), MockTimers::default(), RecordingHandler::default(), config)
    }

    #[test]
    fn happy_path_connects_registers_and_becomes_ready() {
        let mut s = session();
        s.create_session(&["/a", "/b"]).unwrap();
        assert_eq!(s.status(), State::WaitingConnAck);

        let connack = codec::decode(&[3, 0x05, 0x00]).unwrap();
        s.handle_packet(connack).unwrap();
        assert_eq!(s.status(), State::WaitingRegAck);

        let regack_a = [7u8, 0x0B, 0x00, 0x01, 0x00, 0x01, 0x00];
        s.on_datagram(&regack_a).unwrap();
        assert_eq!(s.status(), State::WaitingRegAck);

        let regack_b = [7u8, 0x0B, 0x00, 0x02, 0x00, 0x02, 0x00];
        s.on_datagram(&regack_b).unwrap();
        assert_eq!(s.status(), State::TopicRegistered);

        assert_eq!(s.registry.id(1), Some(1));
        assert_eq!(s.registry.id(2), Some(2));
    }

    #[test]
    fn publish_rejected_before_registered() {
        let mut s = session();
        s.create_session(&["/a"]).unwrap();
        assert_eq!(s.publish("/a", b"x", false, 0), Err(Error::NotReady));
    }

    #[test]
    fn inbound_publish_invokes_handler() {
        let mut s = session();
        s.create_session(&["/a"]).unwrap();
        s.on_datagram(&[3, 0x05, 0x00]).unwrap();
        s.on_datagram(&[7, 0x0B, 0x00, 0x01, 0x00, 0x01, 0x00]).unwrap();
        assert_eq!(s.status(), State::TopicRegistered);

        let publish = [8u8, 0x0C, 0b0000_0000, 0x00, 0x01, 0x00, 0x00, b'x'];
        s.on_datagram(&publish).unwrap();
        assert_eq!(s.handler.received.len(), 1);
        assert_eq!(s.handler.received[0].0.as_str(), "/a");
    }

    #[test]
    fn ping_loss_past_retry_limit_resets_session() {
        let mut s = session();
        s.create_session(&["/a"]).unwrap();
        s.on_datagram(&[3, 0x05, 0x00]).unwrap();
        s.on_datagram(&[7, 0x0B, 0x00, 0x01, 0x00, 0x01, 0x00]).unwrap();
        assert_eq!(s.status(), State::TopicRegistered);

        for _ in 0..(RETRY_PING + 1) {
            s.on_timer(TimerId::Ping);
        }
        // Auto-reconnect replays the handshake from scratch.
        assert_eq!(s.status(), State::WaitingConnAck);
    }

    #[test]
    fn connect_retry_exhaustion_resets_and_replays() {
        let mut s = session();
        s.create_session(&["/a"]).unwrap();
        assert_eq!(s.status(), State::WaitingConnAck);
        assert_eq!(s.transport.sent.len(), 1); // the initial CONNECT

        // RETRY timer firings each retransmit (retry counter checked before
        // incrementing), so the initial send plus RETRY resends survive before
        // the session gives up on the next firing.
        for _ in 0..RETRY {
            s.on_timer(TimerId::Connect);
        }
        assert_eq!(s.status(), State::WaitingConnAck);
        assert_eq!(s.transport.sent.len(), (RETRY as usize) + 1);
        assert_eq!(s.retry, RETRY);

        // One more firing exhausts the retry budget: session resets and
        // auto-reconnect immediately replays CONNECT.
        s.on_timer(TimerId::Connect);
        assert_eq!(s.status(), State::WaitingConnAck);
        assert_eq!(s.retry, 0);
        assert_eq!(s.transport.sent.len(), (RETRY as usize) + 2);
    }

    #[test]
    fn wildcard_subscribe_then_server_register_delivers() {
        let mut s = session();
        s.create_session(&["/a"]).unwrap();
        s.on_datagram(&[3, 0x05, 0x00]).unwrap();
        s.on_datagram(&[7, 0x0B, 0x00, 0x01, 0x00, 0x01, 0x00]).unwrap();

        s.subscribe("/a/#", 0).unwrap();
        assert_eq!(s.status(), State::WaitingSubAck);

        let suback_wildcard = [8u8, 0x13, 0b0000_0000, 0x00, 0x00, 0x00, 0x01, 0x00];
        s.on_datagram(&suback_wildcard).unwrap();
        assert_eq!(s.status(), State::TopicRegistered);

        let mut raw: HVec<u8, 32> = HVec::new();
        raw.extend_from_slice(&[10, 0x0A, 0x00, 0x09, 0x00, 0x07]).unwrap();
        raw.extend_from_slice(b"/a/x").unwrap();
        s.on_datagram(&raw).unwrap();

        let idx = s.registry.lookup_by_id(9).unwrap();
        assert_eq!(s.registry.sub_state(idx), Some(SubState::Subscribed));
        assert_eq!(s.transport.sent.last().unwrap()[1], 0x0B); // REGACK
    }
}
