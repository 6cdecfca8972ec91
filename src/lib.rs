//! # mqtt-sn - MQTT-SN v1.2 client protocol engine
//!
//! A `no_std` implementation of the client side of MQTT-SN (MQTT for Sensor
//! Networks) v1.2: the UDP-based publish/subscribe protocol used by
//! constrained wireless nodes to talk to a gateway. This crate implements the
//! protocol engine only — the state machine, topic registry, task queue,
//! timers, and wire codec — and leaves the UDP socket and the scheduling of
//! timers to the embedding application.
//!
//! ## What this crate does
//!
//! - Encodes and decodes MQTT-SN packets ([`codec`]).
//! - Tracks topic name &lt;-&gt; numeric id mappings ([`registry`]).
//! - Serialises pending operations into a bounded FIFO ([`queue`]).
//! - Drives CONNECT/REGISTER/SUBSCRIBE handshakes, keep-alive, retry and
//!   session-reset logic from a single entry point ([`session`]).
//!
//! ## What it does not do
//!
//! - Open or manage a UDP socket (see [`transport::UdpTransport`]).
//! - Provide timers itself (see [`timers::TimerDriver`]).
//! - Implement QoS 1/2 acknowledgement tracking, gateway discovery
//!   (ADVERTISE/SEARCHGW/GWINFO), UNSUBSCRIBE, or multiple concurrent
//!   sessions.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mqtt_sn::config::Config;
//! use mqtt_sn::session::{MessageHandler, Session};
//! use mqtt_sn::timers::{Seconds, TimerDriver, TimerId};
//! use mqtt_sn::transport::UdpTransport;
//!
//! struct Socket;
//! impl UdpTransport for Socket {
//!     type Error = ();
//!     fn send(&mut self, _buf: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! struct Scheduler;
//! impl TimerDriver for Scheduler {
//!     fn arm(&mut self, _which: TimerId, _duration: Seconds) {}
//!     fn cancel(&mut self, _which: TimerId) {}
//! }
//!
//! struct Printer;
//! impl MessageHandler for Printer {
//!     fn on_message(&mut self, _topic: &str, _payload: &[u8]) {}
//! }
//!
//! let config = Config::new("sensor-01", 60).unwrap();
//! let mut session = Session::new(Socket, Scheduler, Printer, config);
//! session.create_session(&["sensors/temperature"]).unwrap();
//! ```
//!
//! ## Optional Features
//!
//! - `std`: enable standard library support (default: disabled).
//! - `defmt`: enable [`defmt`] logging support for embedded debugging.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]
#![doc(html_root_url = "https://docs.rs/mqtt-sn")]

/// Crate-wide error type.
pub mod error;

/// Tunable protocol constants.
pub mod limits;

/// Wire encoding and decoding of MQTT-SN packets.
pub mod codec;

/// Topic name to numeric id registry.
pub mod registry;

/// Queued protocol operations.
pub mod task;

/// Bounded task queue.
pub mod queue;

/// Logical one-shot timers for retransmission and keep-alive.
pub mod timers;

/// The UDP transport boundary.
pub mod transport;

/// Session configuration.
pub mod config;

/// The protocol engine: state machine and session manager.
pub mod session;
