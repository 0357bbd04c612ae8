//! SMPP frame: one complete PDU of any type
//!
//! `Frame` is the closed set of PDUs this crate understands plus an
//! `Unknown` variant that keeps the raw header and body of anything else.
//! Stream readers call [`Frame::check`] until a whole PDU is buffered and
//! then [`Frame::parse`]; callers holding exactly one PDU use
//! [`Frame::decode`].

use crate::codec::{CodecError, Decodable, Encodable, MAX_PDU_SIZE, PduHeader};
use crate::datatypes::{
    AlertNotification, BindRequest, BindResponse, BroadcastSm, BroadcastSmResponse,
    CancelBroadcastSm, CancelBroadcastSmResponse, CancelSm, CancelSmResponse, CommandId, DataSm,
    DataSmResponse, DeliverSm, DeliverSmResponse, EnquireLink, EnquireLinkResponse, GenericNack,
    Outbind, QueryBroadcastSm, QueryBroadcastSmResponse, QuerySm, QuerySmResponse, ReplaceSm,
    ReplaceSmResponse, SubmitMulti, SubmitMultiResponse, SubmitSm, SubmitSmResponse, Unbind,
    UnbindResponse, command_id,
};
use bytes::{Buf, Bytes, BytesMut};
use std::io::Cursor;
use thiserror::Error;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    GenericNack(GenericNack),
    Bind(BindRequest),
    BindResp(BindResponse),
    Outbind(Outbind),
    Unbind(Unbind),
    UnbindResp(UnbindResponse),
    EnquireLink(EnquireLink),
    EnquireLinkResp(EnquireLinkResponse),
    SubmitSm(Box<SubmitSm>),
    SubmitSmResp(SubmitSmResponse),
    SubmitMulti(Box<SubmitMulti>),
    SubmitMultiResp(SubmitMultiResponse),
    DeliverSm(Box<DeliverSm>),
    DeliverSmResp(DeliverSmResponse),
    DataSm(Box<DataSm>),
    DataSmResp(DataSmResponse),
    QuerySm(QuerySm),
    QuerySmResp(QuerySmResponse),
    CancelSm(CancelSm),
    CancelSmResp(CancelSmResponse),
    ReplaceSm(Box<ReplaceSm>),
    ReplaceSmResp(ReplaceSmResponse),
    AlertNotification(AlertNotification),
    BroadcastSm(Box<BroadcastSm>),
    BroadcastSmResp(BroadcastSmResponse),
    QueryBroadcastSm(QueryBroadcastSm),
    QueryBroadcastSmResp(QueryBroadcastSmResponse),
    CancelBroadcastSm(CancelBroadcastSm),
    CancelBroadcastSmResp(CancelBroadcastSmResponse),
    /// A command id outside the command table. Encodes back byte for byte.
    Unknown(UnknownPdu),
}

/// Header and raw body of a PDU whose command id is not in the command table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownPdu {
    header: PduHeader,
    body: Bytes,
}

impl UnknownPdu {
    /// Returns `None` for ids in the command table, which always decode to
    /// their own variant. `command_length` is set from `body`.
    pub fn new(header: PduHeader, body: Bytes) -> Option<Self> {
        if header.command().is_some() {
            return None;
        }
        Some(UnknownPdu {
            header: PduHeader {
                command_length: (PduHeader::SIZE + body.len()) as u32,
                ..header
            },
            body,
        })
    }

    pub fn header(&self) -> &PduHeader {
        &self.header
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Not enough data is available to parse a message
    #[error("incomplete frame")]
    Incomplete,

    #[error(transparent)]
    Codec(#[from] CodecError),
}

fn decode_as<T: Decodable>(header: &PduHeader, body: &[u8]) -> Result<T, CodecError> {
    T::decode(header, &mut Cursor::new(body))
}

impl Frame {
    /// Checks whether an entire PDU can be read from `src`, advancing the
    /// cursor past it if so.
    pub fn check(src: &mut Cursor<&[u8]>) -> Result<(), Error> {
        if src.remaining() < PduHeader::SIZE {
            return Err(Error::Incomplete);
        }

        let start = src.position() as usize;
        let length_bytes = &src.get_ref()[start..start + 4];
        let command_length = u32::from_be_bytes([
            length_bytes[0],
            length_bytes[1],
            length_bytes[2],
            length_bytes[3],
        ]);

        if command_length > MAX_PDU_SIZE {
            return Err(CodecError::PduTooLarge {
                declared: command_length,
                max: MAX_PDU_SIZE,
            }
            .into());
        }
        if (command_length as usize) < PduHeader::SIZE {
            return Err(CodecError::LengthMismatch {
                declared: command_length,
                actual: src.remaining(),
            }
            .into());
        }

        if src.remaining() < command_length as usize {
            return Err(Error::Incomplete);
        }

        src.advance(command_length as usize);
        Ok(())
    }

    /// Parse the PDU at the cursor position. [`Frame::check`] must have
    /// succeeded on the same data first.
    pub fn parse(src: &mut Cursor<&[u8]>) -> Result<Frame, Error> {
        let start = src.position() as usize;
        Frame::check(src)?;
        let end = src.position() as usize;
        Ok(Frame::decode(&src.get_ref()[start..end])?)
    }

    /// Decode a buffer holding exactly one PDU.
    pub fn decode(bytes: &[u8]) -> Result<Frame, CodecError> {
        let header = PduHeader::parse(bytes)?;
        let body = &bytes[PduHeader::SIZE..];

        let Some(id) = header.command() else {
            warn!(
                command_id = header.command_id,
                sequence_number = header.sequence_number,
                "unknown command_id, passing PDU through undecoded"
            );
            return Ok(Frame::Unknown(UnknownPdu {
                header,
                body: Bytes::copy_from_slice(body),
            }));
        };

        let h = &header;
        let frame = match id {
            CommandId::GenericNack => Frame::GenericNack(decode_as(h, body)?),
            CommandId::BindReceiver | CommandId::BindTransmitter | CommandId::BindTransceiver => {
                Frame::Bind(decode_as(h, body)?)
            }
            CommandId::BindReceiverResp
            | CommandId::BindTransmitterResp
            | CommandId::BindTransceiverResp => Frame::BindResp(decode_as(h, body)?),
            CommandId::Outbind => Frame::Outbind(decode_as(h, body)?),
            CommandId::Unbind => Frame::Unbind(decode_as(h, body)?),
            CommandId::UnbindResp => Frame::UnbindResp(decode_as(h, body)?),
            CommandId::EnquireLink => Frame::EnquireLink(decode_as(h, body)?),
            CommandId::EnquireLinkResp => Frame::EnquireLinkResp(decode_as(h, body)?),
            CommandId::SubmitSm => Frame::SubmitSm(Box::new(decode_as(h, body)?)),
            CommandId::SubmitSmResp => Frame::SubmitSmResp(decode_as(h, body)?),
            CommandId::SubmitMulti => Frame::SubmitMulti(Box::new(decode_as(h, body)?)),
            CommandId::SubmitMultiResp => Frame::SubmitMultiResp(decode_as(h, body)?),
            CommandId::DeliverSm => Frame::DeliverSm(Box::new(decode_as(h, body)?)),
            CommandId::DeliverSmResp => Frame::DeliverSmResp(decode_as(h, body)?),
            CommandId::DataSm => Frame::DataSm(Box::new(decode_as(h, body)?)),
            CommandId::DataSmResp => Frame::DataSmResp(decode_as(h, body)?),
            CommandId::QuerySm => Frame::QuerySm(decode_as(h, body)?),
            CommandId::QuerySmResp => Frame::QuerySmResp(decode_as(h, body)?),
            CommandId::CancelSm => Frame::CancelSm(decode_as(h, body)?),
            CommandId::CancelSmResp => Frame::CancelSmResp(decode_as(h, body)?),
            CommandId::ReplaceSm => Frame::ReplaceSm(Box::new(decode_as(h, body)?)),
            CommandId::ReplaceSmResp => Frame::ReplaceSmResp(decode_as(h, body)?),
            CommandId::AlertNotification => Frame::AlertNotification(decode_as(h, body)?),
            CommandId::BroadcastSm => Frame::BroadcastSm(Box::new(decode_as(h, body)?)),
            CommandId::BroadcastSmResp => Frame::BroadcastSmResp(decode_as(h, body)?),
            CommandId::QueryBroadcastSm => Frame::QueryBroadcastSm(decode_as(h, body)?),
            CommandId::QueryBroadcastSmResp => Frame::QueryBroadcastSmResp(decode_as(h, body)?),
            CommandId::CancelBroadcastSm => Frame::CancelBroadcastSm(decode_as(h, body)?),
            CommandId::CancelBroadcastSmResp => {
                Frame::CancelBroadcastSmResp(decode_as(h, body)?)
            }
        };

        Ok(frame)
    }

    fn pdu(&self) -> Option<&dyn Encodable> {
        let pdu: &dyn Encodable = match self {
            Frame::GenericNack(p) => p,
            Frame::Bind(p) => p,
            Frame::BindResp(p) => p,
            Frame::Outbind(p) => p,
            Frame::Unbind(p) => p,
            Frame::UnbindResp(p) => p,
            Frame::EnquireLink(p) => p,
            Frame::EnquireLinkResp(p) => p,
            Frame::SubmitSm(p) => &**p,
            Frame::SubmitSmResp(p) => p,
            Frame::SubmitMulti(p) => &**p,
            Frame::SubmitMultiResp(p) => p,
            Frame::DeliverSm(p) => &**p,
            Frame::DeliverSmResp(p) => p,
            Frame::DataSm(p) => &**p,
            Frame::DataSmResp(p) => p,
            Frame::QuerySm(p) => p,
            Frame::QuerySmResp(p) => p,
            Frame::CancelSm(p) => p,
            Frame::CancelSmResp(p) => p,
            Frame::ReplaceSm(p) => &**p,
            Frame::ReplaceSmResp(p) => p,
            Frame::AlertNotification(p) => p,
            Frame::BroadcastSm(p) => &**p,
            Frame::BroadcastSmResp(p) => p,
            Frame::QueryBroadcastSm(p) => p,
            Frame::QueryBroadcastSmResp(p) => p,
            Frame::CancelBroadcastSm(p) => p,
            Frame::CancelBroadcastSmResp(p) => p,
            Frame::Unknown(_) => return None,
        };
        Some(pdu)
    }

    /// Raw command id, including ids outside the command table.
    pub fn command_id(&self) -> u32 {
        match (self.pdu(), self) {
            (Some(pdu), _) => pdu.pdu_command_id().into(),
            (None, Frame::Unknown(pdu)) => pdu.header.command_id,
            (None, _) => 0,
        }
    }

    pub fn command_status(&self) -> u32 {
        match (self.pdu(), self) {
            (Some(pdu), _) => pdu.command_status(),
            (None, Frame::Unknown(pdu)) => pdu.header.command_status,
            (None, _) => 0,
        }
    }

    pub fn sequence_number(&self) -> u32 {
        match (self.pdu(), self) {
            (Some(pdu), _) => pdu.sequence_number(),
            (None, Frame::Unknown(pdu)) => pdu.header.sequence_number,
            (None, _) => 0,
        }
    }

    pub fn is_response(&self) -> bool {
        command_id::is_response(self.command_id())
    }

    /// Protocol name for logging, `"unknown"` outside the command table.
    pub fn name(&self) -> &'static str {
        self.pdu().map_or("unknown", |pdu| pdu.pdu_command_id().name())
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        match (self.pdu(), self) {
            (Some(pdu), _) => pdu.encode(buf),
            (None, Frame::Unknown(pdu)) => {
                PduHeader {
                    command_length: (PduHeader::SIZE + pdu.body.len()) as u32,
                    ..pdu.header
                }
                .encode(buf);
                buf.extend_from_slice(&pdu.body);
            }
            (None, _) => {}
        }
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(64);
        self.encode(&mut buf);
        buf.freeze()
    }
}

macro_rules! impl_from_pdu {
    ($($pdu:ty => $variant:ident),* $(,)?) => {
        $(impl From<$pdu> for Frame {
            fn from(pdu: $pdu) -> Self {
                Frame::$variant(pdu)
            }
        })*
    };
}

macro_rules! impl_from_boxed_pdu {
    ($($pdu:ty => $variant:ident),* $(,)?) => {
        $(impl From<$pdu> for Frame {
            fn from(pdu: $pdu) -> Self {
                Frame::$variant(Box::new(pdu))
            }
        })*
    };
}

impl_from_pdu! {
    GenericNack => GenericNack,
    BindRequest => Bind,
    BindResponse => BindResp,
    Outbind => Outbind,
    Unbind => Unbind,
    UnbindResponse => UnbindResp,
    EnquireLink => EnquireLink,
    EnquireLinkResponse => EnquireLinkResp,
    SubmitSmResponse => SubmitSmResp,
    SubmitMultiResponse => SubmitMultiResp,
    DeliverSmResponse => DeliverSmResp,
    DataSmResponse => DataSmResp,
    QuerySm => QuerySm,
    QuerySmResponse => QuerySmResp,
    CancelSm => CancelSm,
    CancelSmResponse => CancelSmResp,
    ReplaceSmResponse => ReplaceSmResp,
    AlertNotification => AlertNotification,
    BroadcastSmResponse => BroadcastSmResp,
    QueryBroadcastSm => QueryBroadcastSm,
    QueryBroadcastSmResponse => QueryBroadcastSmResp,
    CancelBroadcastSm => CancelBroadcastSm,
    CancelBroadcastSmResponse => CancelBroadcastSmResp,
}

impl_from_boxed_pdu! {
    SubmitSm => SubmitSm,
    SubmitMulti => SubmitMulti,
    DeliverSm => DeliverSm,
    DataSm => DataSm,
    ReplaceSm => ReplaceSm,
    BroadcastSm => BroadcastSm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_waits_for_whole_pdu() {
        let bytes = EnquireLink::new(3).to_bytes();

        let mut partial = Cursor::new(&bytes[..10]);
        assert!(matches!(Frame::check(&mut partial), Err(Error::Incomplete)));

        let mut joined = bytes.to_vec();
        joined.extend_from_slice(&bytes[..4]);
        let mut cursor = Cursor::new(&joined[..]);
        Frame::check(&mut cursor).unwrap();
        assert_eq!(cursor.position(), 16);
    }

    #[test]
    fn check_rejects_impossible_lengths() {
        let mut bytes = EnquireLink::new(3).to_bytes().to_vec();
        bytes[..4].copy_from_slice(&8u32.to_be_bytes());
        assert!(matches!(
            Frame::check(&mut Cursor::new(&bytes[..])),
            Err(Error::Codec(CodecError::LengthMismatch { declared: 8, .. }))
        ));

        bytes[..4].copy_from_slice(&(MAX_PDU_SIZE + 1).to_be_bytes());
        assert!(matches!(
            Frame::check(&mut Cursor::new(&bytes[..])),
            Err(Error::Codec(CodecError::PduTooLarge {
                max: MAX_PDU_SIZE,
                ..
            }))
        ));
    }

    #[test]
    fn parse_consumes_one_pdu_at_a_time() {
        let mut stream = BytesMut::new();
        EnquireLink::new(1).encode(&mut stream);
        UnbindResponse::new(2).encode(&mut stream);

        let mut cursor = Cursor::new(&stream[..]);
        let first = Frame::parse(&mut cursor).unwrap();
        let second = Frame::parse(&mut cursor).unwrap();

        assert_eq!(first, Frame::EnquireLink(EnquireLink::new(1)));
        assert_eq!(second, Frame::UnbindResp(UnbindResponse::new(2)));
        assert!(second.is_response());
        assert!(matches!(Frame::parse(&mut cursor), Err(Error::Incomplete)));
    }

    #[test]
    fn unknown_command_id_passes_through() {
        let bytes = [
            0x00, 0x00, 0x00, 0x13, // command_length 19
            0x00, 0x01, 0x02, 0x00, // vendor command id
            0x00, 0x00, 0x00, 0x00, // command_status
            0x00, 0x00, 0x00, 0x2A, // sequence_number 42
            0xDE, 0xAD, 0x00,
        ];

        let frame = Frame::decode(&bytes).unwrap();
        match &frame {
            Frame::Unknown(pdu) => {
                assert_eq!(pdu.header().command_id, 0x0001_0200);
                assert_eq!(&pdu.body()[..], &[0xDE, 0xAD, 0x00]);
            }
            other => panic!("expected Unknown, got {other:?}"),
        }
        assert_eq!(frame.command_id(), 0x0001_0200);
        assert_eq!(frame.sequence_number(), 42);
        assert_eq!(frame.name(), "unknown");
        assert_eq!(&frame.to_bytes()[..], &bytes[..]);
    }

    #[test]
    fn unknown_pdu_refuses_table_ids() {
        let header = |command_id| PduHeader {
            command_length: 0,
            command_id,
            command_status: 0,
            sequence_number: 3,
        };

        assert_eq!(UnknownPdu::new(header(0x0000_0015), Bytes::new()), None);
        assert_eq!(UnknownPdu::new(header(0x8000_0004), Bytes::new()), None);

        let pdu = UnknownPdu::new(header(0x0001_0200), Bytes::from_static(b"\x01\x02")).unwrap();
        assert_eq!(pdu.header().command_length, 18);

        let frame = Frame::Unknown(pdu);
        assert_eq!(Frame::decode(&frame.to_bytes()).unwrap(), frame);
    }

    #[test]
    fn accessors_follow_the_pdu() {
        let frame: Frame = GenericNack::invalid_command_id(7).into();
        assert_eq!(frame.command_id(), 0x8000_0000);
        assert_eq!(frame.command_status(), 0x0000_0003);
        assert_eq!(frame.sequence_number(), 7);
        assert_eq!(frame.name(), "generic_nack");
        assert!(frame.is_response());
    }
}
