//! UDP transport boundary.
//!
//! The engine never opens a socket itself. An embedding application supplies a
//! [`UdpTransport`] wired to its real datagram socket (or, in tests, to an
//! in-memory stand-in); this crate only calls `send` and expects the caller to
//! feed inbound bytes to [`crate::session::Session::on_datagram`].

/// A best-effort, connectionless datagram sender.
///
/// Unlike [`crate::error::Error`]'s variants, the concrete send error type is
/// left to the implementor — the engine only distinguishes "sent" from
/// "failed" and maps the latter to [`crate::error::Error::TransportError`].
pub trait UdpTransport {
    /// Error type reported by the underlying socket.
    type Error: core::fmt::Debug;

    /// Send one datagram to the broker endpoint this transport was configured
    /// with. MQTT-SN packets never need fragmentation across datagrams.
    fn send(&mut self, buf: &[u8]) -> Result<(), Self::Error>;
}
