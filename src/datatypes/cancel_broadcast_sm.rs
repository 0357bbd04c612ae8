use crate::codec::{
    CodecError, Decodable, Encodable, PduHeader, decode_cstring, decode_tlvs, decode_u8,
    encode_cstring, encode_tlvs, encode_u8,
};
use crate::datatypes::{
    Address, CommandId, MessageId, NumericPlanIndicator, ServiceType, Tlv, TypeOfNumber,
};
use crate::macros::impl_header_only_response;
use bytes::BytesMut;
use std::io::Cursor;

/// Cancel a broadcast message, by message_id or by service_type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CancelBroadcastSm {
    pub sequence_number: u32,
    pub service_type: ServiceType,
    pub message_id: MessageId,
    pub source_addr_ton: TypeOfNumber,
    pub source_addr_npi: NumericPlanIndicator,
    pub source_addr: Address,
    pub tlvs: Vec<Tlv>,
}

impl Encodable for CancelBroadcastSm {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::CancelBroadcastSm
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
        encode_tlvs(buf, &self.tlvs);
    }
}

impl Decodable for CancelBroadcastSm {
    fn command_id() -> CommandId {
        CommandId::CancelBroadcastSm
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        Ok(CancelBroadcastSm {
            sequence_number: header.sequence_number,
            service_type: decode_cstring(buf, "service_type")?,
            message_id: decode_cstring(buf, "message_id")?,
            source_addr_ton: decode_u8(buf, "source_addr_ton")?.into(),
            source_addr_npi: decode_u8(buf, "source_addr_npi")?.into(),
            source_addr: decode_cstring(buf, "source_addr")?,
            tlvs: decode_tlvs(buf)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CancelBroadcastSmResponse {
    pub command_status: u32,
    pub sequence_number: u32,
}

impl_header_only_response!(CancelBroadcastSmResponse, CommandId::CancelBroadcastSmResp);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_broadcast_round_trip() {
        let pdu = CancelBroadcastSm {
            sequence_number: 6,
            service_type: ServiceType::default(),
            message_id: "bc-1".parse().unwrap(),
            source_addr_ton: TypeOfNumber::Alphanumeric,
            source_addr_npi: NumericPlanIndicator::Unknown,
            source_addr: "ALERTS".parse().unwrap(),
            tlvs: Vec::new(),
        };
        assert_eq!(CancelBroadcastSm::from_bytes(&pdu.to_bytes()).unwrap(), pdu);

        let resp = CancelBroadcastSmResponse::new(6);
        let bytes = resp.to_bytes();
        assert_eq!(&bytes[4..8], &[0x80, 0, 0x01, 0x13]);
        assert_eq!(CancelBroadcastSmResponse::from_bytes(&bytes).unwrap(), resp);
    }
}
