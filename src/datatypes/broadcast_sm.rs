// ABOUTME: broadcast_sm and broadcast_sm_resp (SMPP 5.0 cell broadcast submission)
// ABOUTME: Broadcast area, content type, repetition and frequency travel as TLVs

use crate::codec::{
    CodecError, Decodable, Encodable, PduHeader, decode_cstring, decode_time, decode_tlvs,
    decode_u8, encode_cstring, encode_time, encode_tlvs, encode_u8,
};
use crate::datatypes::{
    Address, CommandId, MessageId, NumericPlanIndicator, ServiceType, SmppTime, Tlv, TypeOfNumber,
};
use bytes::{Buf, BytesMut};
use std::io::Cursor;

/// Submit a message for cell broadcast.
///
/// The protocol requires the broadcast_area_identifier,
/// broadcast_content_type, broadcast_rep_num and broadcast_frequency_interval
/// TLVs; they are carried in `tlvs` like any other optional parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BroadcastSm {
    pub sequence_number: u32,
    pub service_type: ServiceType,
    pub source_addr_ton: TypeOfNumber,
    pub source_addr_npi: NumericPlanIndicator,
    pub source_addr: Address,
    /// Empty for a new broadcast, or the id of a broadcast to replace.
    pub message_id: MessageId,
    pub priority_flag: u8,
    pub schedule_delivery_time: Option<SmppTime>,
    pub validity_period: Option<SmppTime>,
    pub replace_if_present_flag: u8,
    pub data_coding: u8,
    pub sm_default_msg_id: u8,
    pub tlvs: Vec<Tlv>,
}

impl Encodable for BroadcastSm {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::BroadcastSm
    }

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.service_type);
        encode_u8(buf, self.source_addr_ton.into());
        encode_u8(buf, self.source_addr_npi.into());
        encode_cstring(buf, &self.source_addr);
        encode_cstring(buf, &self.message_id);
        encode_u8(buf, self.priority_flag);
        encode_time(buf, self.schedule_delivery_time.as_ref());
        encode_time(buf, self.validity_period.as_ref());
        encode_u8(buf, self.replace_if_present_flag);
        encode_u8(buf, self.data_coding);
        encode_u8(buf, self.sm_default_msg_id);
        encode_tlvs(buf, &self.tlvs);
    }
}

impl Decodable for BroadcastSm {
    fn command_id() -> CommandId {
        CommandId::BroadcastSm
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        Ok(BroadcastSm {
            sequence_number: header.sequence_number,
            service_type: decode_cstring(buf, "service_type")?,
            source_addr_ton: decode_u8(buf, "source_addr_ton")?.into(),
            source_addr_npi: decode_u8(buf, "source_addr_npi")?.into(),
            source_addr: decode_cstring(buf, "source_addr")?,
            message_id: decode_cstring(buf, "message_id")?,
            priority_flag: decode_u8(buf, "priority_flag")?,
            schedule_delivery_time: decode_time(buf, "schedule_delivery_time")?,
            validity_period: decode_time(buf, "validity_period")?,
            replace_if_present_flag: decode_u8(buf, "replace_if_present_flag")?,
            data_coding: decode_u8(buf, "data_coding")?,
            sm_default_msg_id: decode_u8(buf, "sm_default_msg_id")?,
            tlvs: decode_tlvs(buf)?,
        })
    }
}

/// On failure the broadcast_error_status and failed_broadcast_area_identifier
/// TLVs explain which areas were rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BroadcastSmResponse {
    pub command_status: u32,
    pub sequence_number: u32,
    pub message_id: MessageId,
    pub tlvs: Vec<Tlv>,
}

impl Encodable for BroadcastSmResponse {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::BroadcastSmResp
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

impl Decodable for BroadcastSmResponse {
    fn command_id() -> CommandId {
        CommandId::BroadcastSmResp
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        let message_id = if buf.has_remaining() {
            decode_cstring(buf, "message_id")?
        } else {
            MessageId::default()
        };

        Ok(BroadcastSmResponse {
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
    use crate::datatypes::tags;

    #[test]
    fn broadcast_sm_round_trip() {
        let pdu = BroadcastSm {
            sequence_number: 100,
            service_type: "CMT".parse().unwrap(),
            source_addr_ton: TypeOfNumber::Alphanumeric,
            source_addr_npi: NumericPlanIndicator::Unknown,
            source_addr: "ALERTS".parse().unwrap(),
            message_id: MessageId::default(),
            priority_flag: 1,
            schedule_delivery_time: None,
            validity_period: None,
            replace_if_present_flag: 0,
            data_coding: 0,
            sm_default_msg_id: 0,
            tlvs: vec![
                Tlv::new_bytes(tags::BROADCAST_AREA_IDENTIFIER, &[0x00, 0x01, 0x02][..]).unwrap(),
                Tlv::new_bytes(tags::BROADCAST_CONTENT_TYPE, &[0x00, 0x00, 0x01][..]).unwrap(),
                Tlv::new_u16(tags::BROADCAST_REP_NUM, 3),
                Tlv::new_bytes(tags::BROADCAST_FREQUENCY_INTERVAL, &[0x09, 0x00, 0x05][..])
                    .unwrap(),
            ],
        };
        let decoded = BroadcastSm::from_bytes(&pdu.to_bytes()).unwrap();
        assert_eq!(decoded, pdu);
    }

    #[test]
    fn broadcast_sm_resp_round_trip() {
        let resp = BroadcastSmResponse {
            command_status: 0,
            sequence_number: 100,
            message_id: "bc-1".parse().unwrap(),
            tlvs: Vec::new(),
        };
        assert_eq!(BroadcastSmResponse::from_bytes(&resp.to_bytes()).unwrap(), resp);
    }
}
