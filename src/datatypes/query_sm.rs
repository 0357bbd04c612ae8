use crate::codec::{
    CodecError, Decodable, Encodable, PduHeader, decode_cstring, decode_time, decode_u8,
    encode_cstring, encode_time, encode_u8, expect_end,
};
use crate::datatypes::{
    Address, CommandId, MessageId, MessageState, NumericPlanIndicator, SmppTime, TypeOfNumber,
};
use bytes::{Buf, BytesMut};
use std::io::Cursor;

/// Query the state of a previously submitted message.
///
/// The source address must match the one used when the message was submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuerySm {
    pub sequence_number: u32,
    /// The id the SMSC returned in submit_sm_resp.
    pub message_id: MessageId,
    pub source_addr_ton: TypeOfNumber,
    pub source_addr_npi: NumericPlanIndicator,
    pub source_addr: Address,
}

impl Encodable for QuerySm {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::QuerySm
    }

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.message_id);
        encode_u8(buf, self.source_addr_ton.into());
        encode_u8(buf, self.source_addr_npi.into());
        encode_cstring(buf, &self.source_addr);
    }
}

impl Decodable for QuerySm {
    fn command_id() -> CommandId {
        CommandId::QuerySm
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        let pdu = QuerySm {
            sequence_number: header.sequence_number,
            message_id: decode_cstring(buf, "message_id")?,
            source_addr_ton: decode_u8(buf, "source_addr_ton")?.into(),
            source_addr_npi: decode_u8(buf, "source_addr_npi")?.into(),
            source_addr: decode_cstring(buf, "source_addr")?,
        };
        expect_end(buf, "query_sm")?;
        Ok(pdu)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuerySmResponse {
    pub command_status: u32,
    pub sequence_number: u32,
    pub message_id: MessageId,
    /// When the message reached its final state; `None` while it is still pending.
    pub final_date: Option<SmppTime>,
    pub message_state: MessageState,
    /// Network specific error code, zero when there is none.
    pub error_code: u8,
}

impl Encodable for QuerySmResponse {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::QuerySmResp
    }

    fn command_status(&self) -> u32 {
        self.command_status
    }

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.message_id);
        encode_time(buf, self.final_date.as_ref());
        encode_u8(buf, self.message_state.into());
        encode_u8(buf, self.error_code);
    }
}

impl Decodable for QuerySmResponse {
    fn command_id() -> CommandId {
        CommandId::QuerySmResp
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        // Error responses may omit the body entirely.
        if !buf.has_remaining() {
            return Ok(QuerySmResponse {
                command_status: header.command_status,
                sequence_number: header.sequence_number,
                message_id: MessageId::default(),
                final_date: None,
                message_state: MessageState::Unknown,
                error_code: 0,
            });
        }

        let pdu = QuerySmResponse {
            command_status: header.command_status,
            sequence_number: header.sequence_number,
            message_id: decode_cstring(buf, "message_id")?,
            final_date: decode_time(buf, "final_date")?,
            message_state: decode_u8(buf, "message_state")?.into(),
            error_code: decode_u8(buf, "error_code")?,
        };
        expect_end(buf, "query_sm_resp")?;
        Ok(pdu)
    }
}
