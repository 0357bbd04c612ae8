use crate::codec::{
    CodecError, Decodable, Encodable, PduHeader, decode_cstring, decode_short_message,
    decode_time, decode_tlvs, decode_u8, encode_cstring, encode_short_message, encode_time,
    encode_tlvs, encode_u8,
};
use crate::datatypes::{
    Address, CommandId, MessageId, NumericPlanIndicator, ShortMessage, SmppTime, Tlv,
    TypeOfNumber,
};
use crate::macros::impl_header_only_response;
use bytes::BytesMut;
use std::io::Cursor;

/// Replace a previously submitted message that is still pending delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplaceSm {
    pub sequence_number: u32,
    pub message_id: MessageId,
    pub source_addr_ton: TypeOfNumber,
    pub source_addr_npi: NumericPlanIndicator,
    pub source_addr: Address,
    pub schedule_delivery_time: Option<SmppTime>,
    pub validity_period: Option<SmppTime>,
    pub registered_delivery: u8,
    pub sm_default_msg_id: u8,
    pub short_message: ShortMessage,
    /// Only message_payload is defined here, for replacements longer than 254 octets.
    pub tlvs: Vec<Tlv>,
}

impl Encodable for ReplaceSm {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::ReplaceSm
    }

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.message_id);
        encode_u8(buf, self.source_addr_ton.into());
        encode_u8(buf, self.source_addr_npi.into());
        encode_cstring(buf, &self.source_addr);
        encode_time(buf, self.schedule_delivery_time.as_ref());
        encode_time(buf, self.validity_period.as_ref());
        encode_u8(buf, self.registered_delivery);
        encode_u8(buf, self.sm_default_msg_id);
        encode_short_message(buf, &self.short_message);
        encode_tlvs(buf, &self.tlvs);
    }
}

impl Decodable for ReplaceSm {
    fn command_id() -> CommandId {
        CommandId::ReplaceSm
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        Ok(ReplaceSm {
            sequence_number: header.sequence_number,
            message_id: decode_cstring(buf, "message_id")?,
            source_addr_ton: decode_u8(buf, "source_addr_ton")?.into(),
            source_addr_npi: decode_u8(buf, "source_addr_npi")?.into(),
            source_addr: decode_cstring(buf, "source_addr")?,
            schedule_delivery_time: decode_time(buf, "schedule_delivery_time")?,
            validity_period: decode_time(buf, "validity_period")?,
            registered_delivery: decode_u8(buf, "registered_delivery")?,
            sm_default_msg_id: decode_u8(buf, "sm_default_msg_id")?,
            short_message: decode_short_message(buf)?,
            tlvs: decode_tlvs(buf)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplaceSmResponse {
    pub command_status: u32,
    pub sequence_number: u32,
}

impl_header_only_response!(ReplaceSmResponse, CommandId::ReplaceSmResp);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_sm_round_trip() {
        let pdu = ReplaceSm {
            sequence_number: 12,
            message_id: "msg123".parse().unwrap(),
            source_addr_ton: TypeOfNumber::International,
            source_addr_npi: NumericPlanIndicator::Isdn,
            source_addr: "447700900123".parse().unwrap(),
            schedule_delivery_time: None,
            validity_period: Some("000001000000000R".parse().unwrap()),
            registered_delivery: 1,
            sm_default_msg_id: 0,
            short_message: "replacement text".parse().unwrap(),
            tlvs: Vec::new(),
        };
        assert_eq!(ReplaceSm::from_bytes(&pdu.to_bytes()).unwrap(), pdu);

        let resp = ReplaceSmResponse::error(12, crate::datatypes::CommandStatus::ReplacedSmFailed);
        assert_eq!(ReplaceSmResponse::from_bytes(&resp.to_bytes()).unwrap(), resp);
    }
}
