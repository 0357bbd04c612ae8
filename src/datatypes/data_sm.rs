use crate::codec::{
    CodecError, Decodable, Encodable, PduHeader, decode_cstring, decode_tlvs, decode_u8,
    encode_cstring, encode_tlvs, encode_u8,
};
use crate::datatypes::{
    CommandId, MessageId, NumericPlanIndicator, ServiceType, Tlv, TypeOfNumber, WideAddress, tlv,
};
use bytes::{Buf, BytesMut};
use std::io::Cursor;

/// data_sm transfers data between the SMSC and an ESME in either direction.
///
/// It carries no short_message field: user data travels in the
/// message_payload TLV. Addresses may be up to 64 octets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataSm {
    pub sequence_number: u32,
    pub service_type: ServiceType,
    pub source_addr_ton: TypeOfNumber,
    pub source_addr_npi: NumericPlanIndicator,
    pub source_addr: WideAddress,
    pub dest_addr_ton: TypeOfNumber,
    pub dest_addr_npi: NumericPlanIndicator,
    pub destination_addr: WideAddress,
    pub esm_class: u8,
    pub registered_delivery: u8,
    pub data_coding: u8,
    pub tlvs: Vec<Tlv>,
}

impl DataSm {
    pub fn tlv(&self, tag: u16) -> Option<&Tlv> {
        tlv::find(&self.tlvs, tag)
    }
}

impl Encodable for DataSm {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::DataSm
    }

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.service_type);
        encode_u8(buf, self.source_addr_ton.into());
        encode_u8(buf, self.source_addr_npi.into());
        encode_cstring(buf, &self.source_addr);
        encode_u8(buf, self.dest_addr_ton.into());
        encode_u8(buf, self.dest_addr_npi.into());
        encode_cstring(buf, &self.destination_addr);
        encode_u8(buf, self.esm_class);
        encode_u8(buf, self.registered_delivery);
        encode_u8(buf, self.data_coding);
        encode_tlvs(buf, &self.tlvs);
    }
}

impl Decodable for DataSm {
    fn command_id() -> CommandId {
        CommandId::DataSm
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        Ok(DataSm {
            sequence_number: header.sequence_number,
            service_type: decode_cstring(buf, "service_type")?,
            source_addr_ton: decode_u8(buf, "source_addr_ton")?.into(),
            source_addr_npi: decode_u8(buf, "source_addr_npi")?.into(),
            source_addr: decode_cstring(buf, "source_addr")?,
            dest_addr_ton: decode_u8(buf, "dest_addr_ton")?.into(),
            dest_addr_npi: decode_u8(buf, "dest_addr_npi")?.into(),
            destination_addr: decode_cstring(buf, "destination_addr")?,
            esm_class: decode_u8(buf, "esm_class")?,
            registered_delivery: decode_u8(buf, "registered_delivery")?,
            data_coding: decode_u8(buf, "data_coding")?,
            tlvs: decode_tlvs(buf)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataSmResponse {
    pub command_status: u32,
    pub sequence_number: u32,
    pub message_id: MessageId,
    pub tlvs: Vec<Tlv>,
}

impl Encodable for DataSmResponse {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::DataSmResp
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

impl Decodable for DataSmResponse {
    fn command_id() -> CommandId {
        CommandId::DataSmResp
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        let message_id = if buf.has_remaining() {
            decode_cstring(buf, "message_id")?
        } else {
            MessageId::default()
        };

        Ok(DataSmResponse {
            command_status: header.command_status,
            sequence_number: header.sequence_number,
            message_id,
            tlvs: decode_tlvs(buf)?,
        })
    }
}
