//! Common error types for the protocol engine.

/// A common error type for MQTT-SN operations.
///
/// This enum defines the set of errors that can occur while encoding, decoding,
/// or driving the protocol engine. It is designed to be simple and portable for
/// `no_std` environments.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A buffer was too small to hold the requested data.
    BufferTooSmall,
    /// A decoded or supplied packet length did not match its declared Length field.
    LengthMismatch,
    /// The message type byte did not match any known MQTT-SN packet.
    UnknownMessageType,
    /// A packet was shorter than its fixed-size fields require.
    Truncated,
    /// A topic name or client id exceeded its maximum length.
    TooLong,
    /// The task queue is full.
    QueueFull,
    /// The topic registry is full.
    RegistryFull,
    /// The requested topic is not present in the registry.
    UnknownTopic,
    /// The operation is not valid in the engine's current state.
    NotReady,
    /// A wildcard subscription is already outstanding.
    WildcardBusy,
    /// The client id exceeds the protocol's 23-byte limit.
    InvalidClientId,
    /// The underlying transport reported a send failure.
    TransportError,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::BufferTooSmall => defmt::write!(f, "BufferTooSmall"),
            Error::LengthMismatch => defmt::write!(f, "LengthMismatch"),
            Error::UnknownMessageType => defmt::write!(f, "UnknownMessageType"),
            Error::Truncated => defmt::write!(f, "Truncated"),
            Error::TooLong => defmt::write!(f, "TooLong"),
            Error::QueueFull => defmt::write!(f, "QueueFull"),
            Error::RegistryFull => defmt::write!(f, "RegistryFull"),
            Error::UnknownTopic => defmt::write!(f, "UnknownTopic"),
            Error::NotReady => defmt::write!(f, "NotReady"),
            Error::WildcardBusy => defmt::write!(f, "WildcardBusy"),
            Error::InvalidClientId => defmt::write!(f, "InvalidClientId"),
            Error::TransportError => defmt::write!(f, "TransportError"),
        }
    }
}
