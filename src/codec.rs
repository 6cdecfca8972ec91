//! Wire encoding and decoding of MQTT-SN packets.
//!
//! Only the one-byte Length variant of the framing is supported (packets longer than
//! 255 bytes, which would require the 3-byte 0x01-prefixed extended length, are rejected).
//! Every packet on the wire is `[Length][MsgType][payload...]` in network byte order.

#![allow(missing_docs)]

use crate::error::Error;
use crate::limits::MAX_PACKET_LENGTH;
use heapless::Vec;

/// A buffer sized to hold one encoded MQTT-SN packet.
pub type PacketBuf = Vec<u8, MAX_PACKET_LENGTH>;

/// MQTT-SN message type byte.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum MsgType {
    Connect = 0x04,
    ConnAck = 0x05,
    WillTopicReq = 0x06,
    WillTopic = 0x07,
    WillMsgReq = 0x08,
    WillMsg = 0x09,
    Register = 0x0A,
    RegAck = 0x0B,
    Publish = 0x0C,
    Subscribe = 0x12,
    SubAck = 0x13,
    PingReq = 0x16,
    PingResp = 0x17,
    Disconnect = 0x18,
}

impl MsgType {
    fn from_byte(b: u8) -> Result<Self, Error> {
        Ok(match b {
            0x04 => MsgType::Connect,
            0x05 => MsgType::ConnAck,
            0x06 => MsgType::WillTopicReq,
            0x07 => MsgType::WillTopic,
            0x08 => MsgType::WillMsgReq,
            0x09 => MsgType::WillMsg,
            0x0A => MsgType::Register,
            0x0B => MsgType::RegAck,
            0x0C => MsgType::Publish,
            0x12 => MsgType::Subscribe,
            0x13 => MsgType::SubAck,
            0x16 => MsgType::PingReq,
            0x17 => MsgType::PingResp,
            0x18 => MsgType::Disconnect,
            _ => return Err(Error::UnknownMessageType),
        })
    }
}

/// Broker return code carried by CONNACK, REGACK and SUBACK.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ReturnCode {
    Accepted,
    RejectedCongestion,
    RejectedInvalidTopicId,
    RejectedNotSupported,
    /// A value outside the four defined codes; kept rather than rejected outright
    /// so callers can log the raw byte.
    Unknown(u8),
}

impl ReturnCode {
    fn from_byte(b: u8) -> Self {
        match b {
            0 => ReturnCode::Accepted,
            1 => ReturnCode::RejectedCongestion,
            2 => ReturnCode::RejectedInvalidTopicId,
            3 => ReturnCode::RejectedNotSupported,
            other => ReturnCode::Unknown(other),
        }
    }

    /// Whether the broker accepted the request this return code answers.
    pub fn is_accepted(self) -> bool {
        matches!(self, ReturnCode::Accepted)
    }
}

/// How a PUBLISH/SUBSCRIBE topic id is encoded: a broker-assigned id, a
/// pre-agreed id, or (SUBSCRIBE only) a raw short topic name.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TopicIdType {
    Normal = 0,
    Predefined = 1,
    ShortName = 2,
}

impl TopicIdType {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            1 => TopicIdType::Predefined,
            2 => TopicIdType::ShortName,
            _ => TopicIdType::Normal,
        }
    }
}

/// The single Flags byte shared by WILLTOPIC, PUBLISH, SUBSCRIBE and SUBACK.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Flags {
    pub dup: bool,
    /// -1, 0, 1 or 2. -1 ("no registration required") is carried on the wire as 0b11.
    pub qos: i8,
    pub retain: bool,
    pub will: bool,
    pub clean_session: bool,
    pub topic_id_type: Option<TopicIdType>,
}

impl Flags {
    fn qos_bits(qos: i8) -> u8 {
        match qos {
            -1 => 0b11,
            1 => 0b01,
            2 => 0b10,
            _ => 0b00,
        }
    }

    fn qos_from_bits(bits: u8) -> i8 {
        match bits & 0b11 {
            0b11 => -1,
            0b01 => 1,
            0b10 => 2,
            _ => 0,
        }
    }

    pub fn to_byte(self) -> u8 {
        let mut b = 0u8;
        if self.dup {
            b |= 1 << 7;
        }
        b |= Self::qos_bits(self.qos) << 5;
        if self.retain {
            b |= 1 << 4;
        }
        if self.will {
            b |= 1 << 3;
        }
        if self.clean_session {
            b |= 1 << 2;
        }
        if let Some(tt) = self.topic_id_type {
            b |= tt as u8;
        }
        b
    }

    pub fn from_byte(b: u8) -> Self {
        Flags {
            dup: b & (1 << 7) != 0,
            qos: Self::qos_from_bits(b >> 5),
            retain: b & (1 << 4) != 0,
            will: b & (1 << 3) != 0,
            clean_session: b & (1 << 2) != 0,
            topic_id_type: Some(TopicIdType::from_bits(b)),
        }
    }
}

/// A decoded inbound packet, borrowing variable-length fields from the receive buffer.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Packet<'a> {
    ConnAck {
        return_code: ReturnCode,
    },
    WillTopicReq,
    WillMsgReq,
    RegAck {
        topic_id: u16,
        msg_id: u16,
        return_code: ReturnCode,
    },
    Register {
        topic_id: u16,
        msg_id: u16,
        topic_name: &'a str,
    },
    Publish {
        flags: Flags,
        topic_id: u16,
        msg_id: u16,
        data: &'a [u8],
    },
    SubAck {
        flags: Flags,
        topic_id: u16,
        msg_id: u16,
        return_code: ReturnCode,
    },
    PingReq,
    PingResp,
    Disconnect {
        duration: u16,
    },
}

fn push_u16(buf: &mut PacketBuf, v: u16) -> Result<(), Error> {
    buf.push((v >> 8) as u8).map_err(|_| Error::BufferTooSmall)?;
    buf.push((v & 0xFF) as u8).map_err(|_| Error::BufferTooSmall)
}

fn read_u16(buf: &[u8], at: usize) -> Result<u16, Error> {
    if buf.len() < at + 2 {
        return Err(Error::Truncated);
    }
    Ok(((buf[at] as u16) << 8) | buf[at + 1] as u16)
}

/// Finish a packet being built in `buf` (which already holds the body after the
/// two-byte header placeholder) by writing the header in place.
fn finish(buf: PacketBuf, msg_type: MsgType) -> Result<PacketBuf, Error> {
    let total = buf.len() + 2;
    if total > MAX_PACKET_LENGTH {
        return Err(Error::BufferTooSmall);
    }
    let mut framed = PacketBuf::new();
    framed.push(total as u8).map_err(|_| Error::BufferTooSmall)?;
    framed
        .push(msg_type as u8)
        .map_err(|_| Error::BufferTooSmall)?;
    framed
        .extend_from_slice(&buf)
        .map_err(|_| Error::BufferTooSmall)?;
    Ok(framed)
}

/// Encode a CONNECT packet.
pub fn encode_connect(
    flags: Flags,
    duration_secs: u16,
    client_id: &str,
) -> Result<PacketBuf, Error> {
    if client_id.len() > crate::limits::MAX_CLIENT_ID_LENGTH {
        return Err(Error::InvalidClientId);
    }
    let mut buf = PacketBuf::new();
    buf.push(flags.to_byte()).map_err(|_| Error::BufferTooSmall)?;
    buf.push(0x01).map_err(|_| Error::BufferTooSmall)?; // ProtocolId
    push_u16(&mut buf, duration_secs)?;
    buf.extend_from_slice(client_id.as_bytes())
        .map_err(|_| Error::BufferTooSmall)?;
    finish(buf, MsgType::Connect)
}

/// Encode a WILLTOPIC packet.
pub fn encode_will_topic(flags: Flags, will_topic: &str) -> Result<PacketBuf, Error> {
    let mut buf = PacketBuf::new();
    buf.push(flags.to_byte()).map_err(|_| Error::BufferTooSmall)?;
    buf.extend_from_slice(will_topic.as_bytes())
        .map_err(|_| Error::BufferTooSmall)?;
    finish(buf, MsgType::WillTopic)
}

/// Encode a WILLMSG packet.
pub fn encode_will_msg(will_msg: &[u8]) -> Result<PacketBuf, Error> {
    let mut buf = PacketBuf::new();
    buf.extend_from_slice(will_msg)
        .map_err(|_| Error::BufferTooSmall)?;
    finish(buf, MsgType::WillMsg)
}

/// Encode a REGISTER packet. `topic_id` is always sent as 0 from a client.
pub fn encode_register(msg_id: u16, topic_name: &str) -> Result<PacketBuf, Error> {
    if topic_name.len() > crate::limits::MAX_TOPIC_LENGTH {
        return Err(Error::TooLong);
    }
    let mut buf = PacketBuf::new();
    push_u16(&mut buf, 0)?;
    push_u16(&mut buf, msg_id)?;
    buf.extend_from_slice(topic_name.as_bytes())
        .map_err(|_| Error::BufferTooSmall)?;
    finish(buf, MsgType::Register)
}

/// Encode a REGACK packet (sent in reply to a server-initiated REGISTER).
pub fn encode_regack(topic_id: u16, msg_id: u16, return_code: ReturnCode) -> Result<PacketBuf, Error> {
    let mut buf = PacketBuf::new();
    push_u16(&mut buf, topic_id)?;
    push_u16(&mut buf, msg_id)?;
    buf.push(return_code_to_byte(return_code))
        .map_err(|_| Error::BufferTooSmall)?;
    finish(buf, MsgType::RegAck)
}

/// Encode a PUBLISH packet.
pub fn encode_publish(
    flags: Flags,
    topic_id: u16,
    msg_id: u16,
    data: &[u8],
) -> Result<PacketBuf, Error> {
    let mut buf = PacketBuf::new();
    buf.push(flags.to_byte()).map_err(|_| Error::BufferTooSmall)?;
    push_u16(&mut buf, topic_id)?;
    push_u16(&mut buf, msg_id)?;
    buf.extend_from_slice(data)
        .map_err(|_| Error::BufferTooSmall)?;
    finish(buf, MsgType::Publish)
}

/// Encode a SUBSCRIBE packet carrying a pre-assigned topic id.
pub fn encode_subscribe_predefined(flags: Flags, msg_id: u16, topic_id: u16) -> Result<PacketBuf, Error> {
    let mut buf = PacketBuf::new();
    buf.push(flags.to_byte()).map_err(|_| Error::BufferTooSmall)?;
    push_u16(&mut buf, msg_id)?;
    push_u16(&mut buf, topic_id)?;
    finish(buf, MsgType::Subscribe)
}

/// Encode a SUBSCRIBE packet carrying a raw topic name (used for wildcard subscriptions).
pub fn encode_subscribe_name(flags: Flags, msg_id: u16, topic_name: &str) -> Result<PacketBuf, Error> {
    if topic_name.len() > crate::limits::MAX_TOPIC_LENGTH {
        return Err(Error::TooLong);
    }
    let mut buf = PacketBuf::new();
    buf.push(flags.to_byte()).map_err(|_| Error::BufferTooSmall)?;
    push_u16(&mut buf, msg_id)?;
    buf.extend_from_slice(topic_name.as_bytes())
        .map_err(|_| Error::BufferTooSmall)?;
    finish(buf, MsgType::Subscribe)
}

/// Encode a PINGREQ packet. A client includes its client id; a gateway-directed
/// keep-alive reply (PINGREQ answering a gateway's own PINGREQ) carries none.
pub fn encode_pingreq(client_id: &str) -> Result<PacketBuf, Error> {
    let mut buf = PacketBuf::new();
    buf.extend_from_slice(client_id.as_bytes())
        .map_err(|_| Error::BufferTooSmall)?;
    finish(buf, MsgType::PingReq)
}

/// Encode a DISCONNECT packet. `duration` is non-zero only when requesting sleep mode.
pub fn encode_disconnect(duration: u16) -> Result<PacketBuf, Error> {
    let mut buf = PacketBuf::new();
    push_u16(&mut buf, duration)?;
    finish(buf, MsgType::Disconnect)
}

fn return_code_to_byte(rc: ReturnCode) -> u8 {
    match rc {
        ReturnCode::Accepted => 0,
        ReturnCode::RejectedCongestion => 1,
        ReturnCode::RejectedInvalidTopicId => 2,
        ReturnCode::RejectedNotSupported => 3,
        ReturnCode::Unknown(b) => b,
    }
}

/// Decode one MQTT-SN packet from `buf`. `buf` must contain exactly one packet
/// (the Length field must equal `buf.len()`); extra trailing bytes are rejected
/// rather than silently ignored, since the caller is expected to have already
/// split the datagram on packet boundaries.
pub fn decode(buf: &[u8]) -> Result<Packet<'_>, Error> {
    if buf.len() < 2 {
        return Err(Error::Truncated);
    }
    let length = buf[0] as usize;
    if length != buf.len() {
        return Err(Error::LengthMismatch);
    }
    let msg_type = MsgType::from_byte(buf[1])?;
    let body = &buf[2..];
    Ok(match msg_type {
        MsgType::ConnAck => {
            if body.is_empty() {
                return Err(Error::Truncated);
            }
            Packet::ConnAck {
                return_code: ReturnCode::from_byte(body[0]),
            }
        }
        MsgType::WillTopicReq => Packet::WillTopicReq,
        MsgType::WillMsgReq => Packet::WillMsgReq,
        MsgType::RegAck => {
            if body.len() < 5 {
                return Err(Error::Truncated);
            }
            Packet::RegAck {
                topic_id: read_u16(body, 0)?,
                msg_id: read_u16(body, 2)?,
                return_code: ReturnCode::from_byte(body[4]),
            }
        }
        MsgType::Register => {
            if body.len() < 4 {
                return Err(Error::Truncated);
            }
            let topic_id = read_u16(body, 0)?;
            let msg_id = read_u16(body, 2)?;
            let topic_name =
                core::str::from_utf8(&body[4..]).map_err(|_| Error::Truncated)?;
            Packet::Register {
                topic_id,
                msg_id,
                topic_name,
            }
        }
        MsgType::Publish => {
            if body.len() < 5 {
                return Err(Error::Truncated);
            }
            Packet::Publish {
                flags: Flags::from_byte(body[0]),
                topic_id: read_u16(body, 1)?,
                msg_id: read_u16(body, 3)?,
                data: &body[5..],
            }
        }
        MsgType::SubAck => {
            if body.len() < 6 {
                return Err(Error::Truncated);
            }
            Packet::SubAck {
                flags: Flags::from_byte(body[0]),
                topic_id: read_u16(body, 1)?,
                msg_id: read_u16(body, 3)?,
                return_code: ReturnCode::from_byte(body[5]),
            }
        }
        MsgType::PingReq => Packet::PingReq,
        MsgType::PingResp => Packet::PingResp,
        MsgType::Disconnect => Packet::Disconnect {
            duration: if body.len() >= 2 { read_u16(body, 0)? } else { 0 },
        },
        MsgType::Connect | MsgType::WillTopic | MsgType::WillMsg | MsgType::Subscribe => {
            // These are client->server only; a well-behaved gateway never sends them.
            return Err(Error::UnknownMessageType);
        }
    })
}
