//! Session configuration.

use heapless::String;

use crate::limits::{MAX_CLIENT_ID_LENGTH, MAX_TOPIC_LENGTH};

/// Connection parameters fixed for the lifetime of a session.
///
/// Analogous to the options struct other protocol clients in this codebase take:
/// a plain, `Copy`-free struct literal supplied by the embedding application
/// rather than anything loaded from a file.
#[derive(Debug, Clone)]
pub struct Config {
    /// Client identifier sent in CONNECT and PINGREQ; 1..=23 ASCII bytes.
    pub client_id: String<MAX_CLIENT_ID_LENGTH>,
    /// Keep-alive interval in seconds; also the CONNECT Duration field.
    pub keep_alive_seconds: u16,
    /// Whether to request a clean session.
    pub clean_session: bool,
    /// Last Will topic, if a will is configured.
    pub will_topic: Option<String<MAX_TOPIC_LENGTH>>,
    /// Last Will payload, if a will is configured.
    pub will_message: Option<heapless::Vec<u8, 128>>,
    /// Whether to automatically replay the CONNECT/WILL/REGISTER sequence
    /// after a session reset caused by retry exhaustion.
    pub auto_reconnect: bool,
}

impl Config {
    /// A minimal configuration: no will, clean session, auto-reconnect enabled.
    pub fn new(client_id: &str, keep_alive_seconds: u16) -> Result<Self, crate::error::Error> {
        Ok(Config {
            client_id: String::try_from(client_id)
                .map_err(|_| crate::error::Error::InvalidClientId)?,
            keep_alive_seconds,
            clean_session: true,
            will_topic: None,
            will_message: None,
            auto_reconnect: true,
        })
    }

    /// Whether both halves of a Last Will are present.
    pub fn has_will(&self) -> bool {
        self.will_topic.is_some() && self.will_message.is_some()
    }
}
