//! Tunable protocol constants.
//!
//! These mirror the compile-time configuration knobs of the reference MQTT-SN client:
//! retry counts, timeout durations, and the fixed-capacity bounds used throughout
//! [`crate::registry`] and [`crate::queue`].

/// Number of retransmissions attempted for CONNECT/WILLTOPIC/WILLMSG/REGISTER/SUBSCRIBE
/// before the session is reset.
pub const RETRY: u8 = 5;

/// Number of missed PINGRESP replies tolerated before the session is reset.
pub const RETRY_PING: u8 = 5;

/// Retransmission timeout for CONNECT, in seconds.
pub const TIMEOUT_CONNECT_SECS: u32 = 9;

/// Retransmission timeout for REGISTER/WILLTOPIC/WILLMSG, in seconds.
pub const TIMEOUT_SECS: u32 = 3;

/// Retransmission timeout for SUBSCRIBE, in seconds (3x the base timeout).
pub const TIMEOUT_SUBSCRIBE_SECS: u32 = TIMEOUT_SECS * 3;

/// Maximum number of tasks the queue can hold at once.
pub const MAX_QUEUE: usize = 100;

/// Maximum number of distinct topics tracked by the registry, including the
/// reserved index 0.
pub const MAX_TOPIC_USED: usize = 100;

/// Maximum MQTT-SN packet length, including the one-byte Length field itself.
pub const MAX_PACKET_LENGTH: usize = 255;

/// Maximum topic name length in bytes.
pub const MAX_TOPIC_LENGTH: usize = 249;

/// Maximum client identifier length in bytes, per the MQTT-SN specification.
pub const MAX_CLIENT_ID_LENGTH: usize = 23;

/// Default UDP port a gateway listens on.
pub const DEFAULT_PORT: u16 = 1884;

/// Maximum number of topics that can be pre-declared to [`crate::session::Session::create_session`]
/// and replayed on reconnect. `begin_handshake` also queues a CONNECT task and, when a will is
/// configured, a WILLTOPIC and a WILLMSG task ahead of the REGISTERs, so this leaves three of
/// `MAX_QUEUE`'s slots for those rather than reserving only against the registry's index 0.
pub const MAX_DECLARED_TOPICS: usize = MAX_QUEUE - 3;
