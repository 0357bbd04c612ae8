use crate::codec::{
    CodecError, Decodable, Encodable, PduHeader, decode_cstring, decode_tlvs, decode_u8,
    encode_cstring, encode_tlvs, encode_u8,
};
use crate::datatypes::{
    Address, CommandId, MessageId, MessageState, NumericPlanIndicator, Tlv, TypeOfNumber, tags,
    tlv,
};
use bytes::{Buf, BytesMut};
use std::io::Cursor;

/// Query the state of a previously submitted broadcast message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryBroadcastSm {
    pub sequence_number: u32,
    pub message_id: MessageId,
    pub source_addr_ton: TypeOfNumber,
    pub source_addr_npi: NumericPlanIndicator,
    pub source_addr: Address,
    pub tlvs: Vec<Tlv>,
}

impl Encodable for QueryBroadcastSm {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::QueryBroadcastSm
    }

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.message_id);
        encode_u8(buf, self.source_addr_ton.into());
        encode_u8(buf, self.source_addr_npi.into());
        encode_cstring(buf, &self.source_addr);
        encode_tlvs(buf, &self.tlvs);
    }
}

impl Decodable for QueryBroadcastSm {
    fn command_id() -> CommandId {
        CommandId::QueryBroadcastSm
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        Ok(QueryBroadcastSm {
            sequence_number: header.sequence_number,
            message_id: decode_cstring(buf, "message_id")?,
            source_addr_ton: decode_u8(buf, "source_addr_ton")?.into(),
            source_addr_npi: decode_u8(buf, "source_addr_npi")?.into(),
            source_addr: decode_cstring(buf, "source_addr")?,
            tlvs: decode_tlvs(buf)?,
        })
    }
}

/// The broadcast's state travels in the message_state TLV, alongside
/// broadcast_area_identifier and broadcast_area_success.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryBroadcastSmResponse {
    pub command_status: u32,
    pub sequence_number: u32,
    pub message_id: MessageId,
    pub tlvs: Vec<Tlv>,
}

impl QueryBroadcastSmResponse {
    pub fn message_state(&self) -> Option<MessageState> {
        tlv::find(&self.tlvs, tags::MESSAGE_STATE)
            .and_then(Tlv::value_as_u8)
            .map(MessageState::from)
    }
}

impl Encodable for QueryBroadcastSmResponse {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::QueryBroadcastSmResp
    }

    fn command_status(&self) -> u32 {
        self.command_status
    }

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.message_id);
        encode_tlvs(buf, &self.tlvs);
    }
}

impl Decodable for QueryBroadcastSmResponse {
    fn command_id() -> CommandId {
        CommandId::QueryBroadcastSmResp
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        let message_id = if buf.has_remaining() {
            decode_cstring(buf, "message_id")?
        } else {
            MessageId::default()
        };

        Ok(QueryBroadcastSmResponse {
            command_status: header.command_status,
            sequence_number: header.sequence_number,
            message_id,
            tlvs: decode_tlvs(buf)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_broadcast_round_trip() {
        let pdu = QueryBroadcastSm {
            sequence_number: 5,
            message_id: "bc-1".parse().unwrap(),
            source_addr_ton: TypeOfNumber::Alphanumeric,
            source_addr_npi: NumericPlanIndicator::Unknown,
            source_addr: "ALERTS".parse().unwrap(),
            tlvs: Vec::new(),
        };
        assert_eq!(QueryBroadcastSm::from_bytes(&pdu.to_bytes()).unwrap(), pdu);

        let resp = QueryBroadcastSmResponse {
            command_status: 0,
            sequence_number: 5,
            message_id: "bc-1".parse().unwrap(),
            tlvs: vec![Tlv::new_u8(tags::MESSAGE_STATE, 1)],
        };
        let decoded = QueryBroadcastSmResponse::from_bytes(&resp.to_bytes()).unwrap();
        assert_eq!(decoded, resp);
        assert_eq!(decoded.message_state(), Some(MessageState::Enroute));
    }
}
