use crate::codec::{
    CodecError, Decodable, Encodable, PduHeader, decode_cstring, decode_u8, encode_cstring,
    encode_u8, expect_end,
};
use crate::datatypes::{
    Address, CommandId, MessageId, NumericPlanIndicator, ServiceType, TypeOfNumber,
};
use crate::macros::impl_header_only_response;
use bytes::BytesMut;
use std::io::Cursor;

/// Cancel one or more outstanding messages.
///
/// With a message_id, that message is cancelled. With an empty message_id,
/// every message matching the source address, destination address and
/// (if set) service_type is cancelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CancelSm {
    pub sequence_number: u32,
    pub service_type: ServiceType,
    pub message_id: MessageId,
    pub source_addr_ton: TypeOfNumber,
    pub source_addr_npi: NumericPlanIndicator,
    pub source_addr: Address,
    pub dest_addr_ton: TypeOfNumber,
    pub dest_addr_npi: NumericPlanIndicator,
    pub destination_addr: Address,
}

impl Encodable for CancelSm {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::CancelSm
    }

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.service_type);
        encode_cstring(buf, &self.message_id);
        encode_u8(buf, self.source_addr_ton.into());
        encode_u8(buf, self.source_addr_npi.into());
        encode_cstring(buf, &self.source_addr);
        encode_u8(buf, self.dest_addr_ton.into());
        encode_u8(buf, self.dest_addr_npi.into());
        encode_cstring(buf, &self.destination_addr);
    }
}

impl Decodable for CancelSm {
    fn command_id() -> CommandId {
        CommandId::CancelSm
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        let pdu = CancelSm {
            sequence_number: header.sequence_number,
            service_type: decode_cstring(buf, "service_type")?,
            message_id: decode_cstring(buf, "message_id")?,
            source_addr_ton: decode_u8(buf, "source_addr_ton")?.into(),
            source_addr_npi: decode_u8(buf, "source_addr_npi")?.into(),
            source_addr: decode_cstring(buf, "source_addr")?,
            dest_addr_ton: decode_u8(buf, "dest_addr_ton")?.into(),
            dest_addr_npi: decode_u8(buf, "dest_addr_npi")?.into(),
            destination_addr: decode_cstring(buf, "destination_addr")?,
        };
        expect_end(buf, "cancel_sm")?;
        Ok(pdu)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CancelSmResponse {
    pub command_status: u32,
    pub sequence_number: u32,
}

impl_header_only_response!(CancelSmResponse, CommandId::CancelSmResp);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_sm_round_trip() {
        let pdu = CancelSm {
            sequence_number: 8,
            service_type: ServiceType::default(),
            message_id: MessageId::default(),
            source_addr_ton: TypeOfNumber::Unknown,
            source_addr_npi: NumericPlanIndicator::Unknown,
            source_addr: "1234".parse().unwrap(),
            dest_addr_ton: TypeOfNumber::International,
            dest_addr_npi: NumericPlanIndicator::Isdn,
            destination_addr: "447700900123".parse().unwrap(),
        };
        assert_eq!(CancelSm::from_bytes(&pdu.to_bytes()).unwrap(), pdu);

        let resp = CancelSmResponse::new(8);
        assert_eq!(CancelSmResponse::from_bytes(&resp.to_bytes()).unwrap(), resp);
    }
}
