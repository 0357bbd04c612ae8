// SMPP PDU codec - header, shared field codecs and the encode/decode traits
//
// Every PDU type implements Encodable/Decodable. All fixed-width integers go
// through the big-endian helpers below, and every variable field (C-Octet
// String, short_message, TLV list) has exactly one reader and one writer here.

use crate::datatypes::{
    COctetString, CommandId, CommandStatus, ShortMessage, SmppTime, Tlv, command_id,
};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::Cursor;
use thiserror::Error;

/// Maximum allowed PDU size accepted from a stream
/// Largest PDU the stream reader accepts: 64 KiB for a full message_payload
/// TLV plus 8 KiB for mandatory fields and other TLVs.
pub const MAX_PDU_SIZE: u32 = 72 * 1024;

/// SMPP PDU Header (16 bytes, common to all PDUs)
///
/// `command_id` and `command_status` stay raw so that ids outside the command
/// table and vendor status codes survive decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduHeader {
    pub command_length: u32,
    pub command_id: u32,
    pub command_status: u32,
    pub sequence_number: u32,
}

impl PduHeader {
    pub const SIZE: usize = 16;

    /// Read the four header fields from a stream cursor.
    ///
    /// Only the presence of 16 bytes is checked; `command_length` is checked
    /// against the buffer by [`PduHeader::parse`] or the stream reader.
    pub fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        if buf.remaining() < Self::SIZE {
            return Err(CodecError::TruncatedHeader {
                available: buf.remaining(),
            });
        }

        let header = PduHeader {
            command_length: buf.get_u32(),
            command_id: buf.get_u32(),
            command_status: buf.get_u32(),
            sequence_number: buf.get_u32(),
        };

        if !header.is_response() && header.command_status != 0 {
            tracing::warn!(
                command_id = header.command_id,
                command_status = header.command_status,
                "request PDU carries a non-zero command_status, ignoring it"
            );
        }

        Ok(header)
    }

    /// Read the header of a buffer holding exactly one PDU and check that
    /// `command_length` agrees with the buffer.
    pub fn parse(bytes: &[u8]) -> Result<Self, CodecError> {
        let header = Self::decode(&mut Cursor::new(bytes))?;
        header.check_length(bytes.len())?;
        Ok(header)
    }

    pub fn check_length(&self, actual: usize) -> Result<(), CodecError> {
        if (self.command_length as usize) < Self::SIZE || self.command_length as usize != actual {
            return Err(CodecError::LengthMismatch {
                declared: self.command_length,
                actual,
            });
        }
        Ok(())
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u32(self.command_length);
        buf.put_u32(self.command_id);
        buf.put_u32(self.command_status);
        buf.put_u32(self.sequence_number);
    }

    /// The command table entry for this header, if the id is known.
    pub fn command(&self) -> Option<CommandId> {
        CommandId::try_from(self.command_id).ok()
    }

    pub fn is_response(&self) -> bool {
        command_id::is_response(self.command_id)
    }

    /// Declared body length; zero when `command_length` is below the header size.
    pub fn body_len(&self) -> usize {
        (self.command_length as usize).saturating_sub(Self::SIZE)
    }
}

/// Trait for PDUs that can be encoded to bytes
///
/// Encoding never fails: field types validate their content on construction,
/// and `command_length` is computed here rather than supplied by the caller.
pub trait Encodable {
    fn pdu_command_id(&self) -> CommandId;

    /// Requests always send zero.
    fn command_status(&self) -> u32 {
        0
    }

    fn sequence_number(&self) -> u32;

    /// Write the mandatory fields and TLVs that follow the header.
    fn encode_body(&self, buf: &mut BytesMut);

    /// Append the whole PDU to `buf`.
    fn encode(&self, buf: &mut BytesMut) {
        let start = buf.len();
        PduHeader {
            command_length: 0,
            command_id: self.pdu_command_id().into(),
            command_status: self.command_status(),
            sequence_number: self.sequence_number(),
        }
        .encode(buf);
        self.encode_body(buf);

        let length = (buf.len() - start) as u32;
        buf[start..start + 4].copy_from_slice(&length.to_be_bytes());
    }

    fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(64);
        self.encode(&mut buf);
        buf.freeze()
    }
}

/// Trait for PDUs that can be decoded from bytes
pub trait Decodable: Sized {
    /// Return the expected command_id for this PDU type
    fn command_id() -> CommandId;

    /// Decode the body. `buf` is bounded to exactly the declared body.
    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError>;

    /// Validate the header is appropriate for this PDU type
    fn validate_header(header: &PduHeader) -> Result<(), CodecError> {
        if header.command_id != u32::from(Self::command_id()) {
            return Err(CodecError::UnsupportedCommandId {
                expected: Self::command_id(),
                actual: header.command_id,
            });
        }
        Ok(())
    }

    /// Decode a buffer holding exactly one PDU.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let header = PduHeader::parse(bytes)?;
        let mut body = Cursor::new(&bytes[PduHeader::SIZE..]);
        Self::decode(&header, &mut body)
    }
}

/// Codec errors with detailed context for debugging
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Truncated header: {available} of 16 bytes available")]
    TruncatedHeader { available: usize },

    #[error("command_length {declared} does not match the {actual} bytes supplied")]
    LengthMismatch { declared: u32, actual: usize },

    #[error("command_length {declared} exceeds the {max} byte PDU limit")]
    PduTooLarge { declared: u32, max: u32 },

    #[error("Malformed field '{field}': {reason}")]
    MalformedField {
        field: &'static str,
        reason: &'static str,
    },

    /// `declared` is the value length, or 4 when the tag/length pair itself
    /// is cut short.
    #[error("TLV {tag:#06x} needs {declared} bytes but only {remaining} remain")]
    TruncatedTlv {
        tag: u16,
        declared: usize,
        remaining: usize,
    },

    #[error("Unexpected command_id: expected {expected:?}, got {actual:#010x}")]
    UnsupportedCommandId { expected: CommandId, actual: u32 },

    #[error("Field '{field}' too long: {actual} bytes (max {max})")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

impl CodecError {
    /// The command_status a peer should answer with (usually in a
    /// generic_nack) after failing to decode its PDU.
    pub fn to_command_status(&self) -> CommandStatus {
        match self {
            CodecError::TruncatedHeader { .. }
            | CodecError::LengthMismatch { .. }
            | CodecError::PduTooLarge { .. } => CommandStatus::InvalidCommandLength,
            CodecError::UnsupportedCommandId { .. } => CommandStatus::InvalidCommandId,
            CodecError::TruncatedTlv { .. } => CommandStatus::ErrorInOptionalPartofPduBody,
            CodecError::MalformedField { field, .. } => match *field {
                "source_addr" => CommandStatus::InvalidSourceAddress,
                "destination_addr" => CommandStatus::InvalidDestinationAddress,
                "short_message" | "sm_length" => CommandStatus::InvalidMsgLength,
                "service_type" => CommandStatus::InvalidServiceType,
                "schedule_delivery_time" => CommandStatus::InvalidScheduledDeliveryTime,
                "validity_period" => CommandStatus::InvalidExpiryTime,
                _ => CommandStatus::SystemError,
            },
            CodecError::FieldTooLong { .. } => CommandStatus::SystemError,
        }
    }
}

fn past_end(field: &'static str) -> CodecError {
    CodecError::MalformedField {
        field,
        reason: "runs past the end of the body",
    }
}

/// Decode a single byte
pub fn decode_u8(buf: &mut Cursor<&[u8]>, field: &'static str) -> Result<u8, CodecError> {
    if buf.remaining() < 1 {
        return Err(past_end(field));
    }
    Ok(buf.get_u8())
}

/// Decode a 16-bit big-endian integer
pub fn decode_u16(buf: &mut Cursor<&[u8]>, field: &'static str) -> Result<u16, CodecError> {
    if buf.remaining() < 2 {
        return Err(past_end(field));
    }
    Ok(buf.get_u16())
}

/// Decode a 32-bit big-endian integer
pub fn decode_u32(buf: &mut Cursor<&[u8]>, field: &'static str) -> Result<u32, CodecError> {
    if buf.remaining() < 4 {
        return Err(past_end(field));
    }
    Ok(buf.get_u32())
}

pub fn encode_u8(buf: &mut BytesMut, value: u8) {
    buf.put_u8(value);
}

pub fn encode_u16(buf: &mut BytesMut, value: u16) {
    buf.put_u16(value);
}

pub fn encode_u32(buf: &mut BytesMut, value: u32) {
    buf.put_u32(value);
}

/// Decode a NUL-terminated field of at most `N` octets, terminator included.
///
/// Fails if no NUL appears before the end of the body or within `N` octets.
pub fn decode_cstring<const N: usize>(
    buf: &mut Cursor<&[u8]>,
    field: &'static str,
) -> Result<COctetString<N>, CodecError> {
    let chunk = buf.chunk();
    let Some(end) = chunk.iter().position(|&b| b == 0) else {
        return Err(CodecError::MalformedField {
            field,
            reason: "missing NUL terminator",
        });
    };
    if end >= N {
        return Err(CodecError::MalformedField {
            field,
            reason: "longer than the field maximum",
        });
    }

    let value = COctetString::new(&chunk[..end]).map_err(|_| CodecError::MalformedField {
        field,
        reason: "longer than the field maximum",
    })?;
    buf.advance(end + 1);
    Ok(value)
}

/// Write the content followed by a single NUL. No padding.
pub fn encode_cstring<const N: usize>(buf: &mut BytesMut, value: &COctetString<N>) {
    buf.put_slice(value.as_bytes());
    buf.put_u8(0);
}

/// Decode an optional time field: an empty C-Octet String means "not set".
pub fn decode_time(
    buf: &mut Cursor<&[u8]>,
    field: &'static str,
) -> Result<Option<SmppTime>, CodecError> {
    let raw = decode_cstring::<17>(buf, field)?;
    if raw.is_empty() {
        return Ok(None);
    }
    SmppTime::from_bytes(raw.as_bytes())
        .map(Some)
        .map_err(|_| CodecError::MalformedField {
            field,
            reason: "not a valid YYMMDDhhmmsstnnp time",
        })
}

pub fn encode_time(buf: &mut BytesMut, value: Option<&SmppTime>) {
    if let Some(time) = value {
        buf.put_slice(time.as_bytes());
    }
    buf.put_u8(0);
}

/// Decode `sm_length` followed by that many octets of short_message.
pub fn decode_short_message(buf: &mut Cursor<&[u8]>) -> Result<ShortMessage, CodecError> {
    let sm_length = decode_u8(buf, "sm_length")? as usize;
    if sm_length > ShortMessage::MAX_LEN {
        return Err(CodecError::MalformedField {
            field: "sm_length",
            reason: "exceeds 254 octets",
        });
    }
    if buf.remaining() < sm_length {
        return Err(past_end("short_message"));
    }
    let message = ShortMessage::new(&buf.chunk()[..sm_length]).map_err(|_| {
        CodecError::MalformedField {
            field: "short_message",
            reason: "exceeds 254 octets",
        }
    })?;
    buf.advance(sm_length);
    Ok(message)
}

pub fn encode_short_message(buf: &mut BytesMut, message: &ShortMessage) {
    buf.put_u8(message.len());
    buf.put_slice(message.as_bytes());
}

/// Decode TLVs until the body is exhausted, keeping wire order and duplicates.
pub fn decode_tlvs(buf: &mut Cursor<&[u8]>) -> Result<Vec<Tlv>, CodecError> {
    let mut tlvs = Vec::new();
    while buf.has_remaining() {
        tlvs.push(Tlv::decode(buf)?);
    }
    Ok(tlvs)
}

pub fn encode_tlvs(buf: &mut BytesMut, tlvs: &[Tlv]) {
    for tlv in tlvs {
        tlv.encode(buf);
    }
}

/// Fail if a PDU without optional parameters has bytes left over.
pub fn expect_end(buf: &Cursor<&[u8]>, pdu: &'static str) -> Result<(), CodecError> {
    if buf.has_remaining() {
        return Err(CodecError::MalformedField {
            field: pdu,
            reason: "unexpected trailing bytes in body",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::{Address, MessageId, tags};

    #[test]
    fn pdu_header_encode_decode() {
        let header = PduHeader {
            command_length: 16,
            command_id: CommandId::EnquireLink.into(),
            command_status: 0,
            sequence_number: 42,
        };

        let mut buf = BytesMut::new();
        header.encode(&mut buf);
        assert_eq!(
            buf.as_ref(),
            &[0, 0, 0, 16, 0, 0, 0, 0x15, 0, 0, 0, 0, 0, 0, 0, 42]
        );

        let decoded = PduHeader::parse(&buf).unwrap();
        assert_eq!(header, decoded);
        assert_eq!(decoded.command(), Some(CommandId::EnquireLink));
    }

    #[test]
    fn header_too_short() {
        let data = [0u8; 15];
        assert_eq!(
            PduHeader::parse(&data),
            Err(CodecError::TruncatedHeader { available: 15 })
        );
    }

    #[test]
    fn header_length_checks() {
        let mut buf = BytesMut::new();
        PduHeader {
            command_length: 12,
            command_id: 0x15,
            command_status: 0,
            sequence_number: 1,
        }
        .encode(&mut buf);
        assert_eq!(
            PduHeader::parse(&buf),
            Err(CodecError::LengthMismatch {
                declared: 12,
                actual: 16
            })
        );

        buf[3] = 20;
        assert_eq!(
            PduHeader::parse(&buf),
            Err(CodecError::LengthMismatch {
                declared: 20,
                actual: 16
            })
        );
    }

    #[test]
    fn decode_cstring_stops_at_first_nul() {
        let data = b"hello\0world\0";
        let mut cursor = Cursor::new(&data[..]);
        let first: Address = decode_cstring(&mut cursor, "source_addr").unwrap();
        assert_eq!(first, "hello");
        assert_eq!(cursor.position(), 6);
        let second: Address = decode_cstring(&mut cursor, "destination_addr").unwrap();
        assert_eq!(second, "world");
        assert!(!cursor.has_remaining());
    }

    #[test]
    fn decode_cstring_without_terminator() {
        let data = b"hello";
        let mut cursor = Cursor::new(&data[..]);
        let result = decode_cstring::<21>(&mut cursor, "source_addr");
        assert_eq!(
            result,
            Err(CodecError::MalformedField {
                field: "source_addr",
                reason: "missing NUL terminator"
            })
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn decode_cstring_too_long_for_field() {
        let data = b"0123456789012345678901\0";
        let mut cursor = Cursor::new(&data[..]);
        assert!(matches!(
            decode_cstring::<21>(&mut cursor, "destination_addr"),
            Err(CodecError::MalformedField { .. })
        ));
    }

    #[test]
    fn encode_cstring_is_not_padded() {
        let mut buf = BytesMut::new();
        let id: MessageId = "abc".parse().unwrap();
        encode_cstring(&mut buf, &id);
        assert_eq!(buf.as_ref(), b"abc\0");
    }

    #[test]
    fn empty_time_is_none() {
        let mut buf = BytesMut::new();
        encode_time(&mut buf, None);
        let t: SmppTime = "220612123000000+".parse().unwrap();
        encode_time(&mut buf, Some(&t));

        let mut cursor = Cursor::new(buf.as_ref());
        assert_eq!(decode_time(&mut cursor, "schedule_delivery_time"), Ok(None));
        assert_eq!(decode_time(&mut cursor, "validity_period"), Ok(Some(t)));
    }

    #[test]
    fn short_message_length_must_fit_body() {
        let data = [5u8, b'a', b'b'];
        let mut cursor = Cursor::new(&data[..]);
        assert!(matches!(
            decode_short_message(&mut cursor),
            Err(CodecError::MalformedField {
                field: "short_message",
                ..
            })
        ));
    }

    #[test]
    fn tlv_list_keeps_order_and_duplicates() {
        let tlvs = vec![
            Tlv::new_u16(tags::USER_MESSAGE_REFERENCE, 7),
            Tlv::new_u8(tags::PAYLOAD_TYPE, 1),
            Tlv::new_u16(tags::USER_MESSAGE_REFERENCE, 8),
        ];
        let mut buf = BytesMut::new();
        encode_tlvs(&mut buf, &tlvs);

        let mut cursor = Cursor::new(buf.as_ref());
        assert_eq!(decode_tlvs(&mut cursor).unwrap(), tlvs);
    }

    #[test]
    fn error_status_mapping() {
        let err = CodecError::LengthMismatch {
            declared: 10,
            actual: 16,
        };
        assert_eq!(err.to_command_status(), CommandStatus::InvalidCommandLength);
    }
}
