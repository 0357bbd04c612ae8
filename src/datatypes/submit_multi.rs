// ABOUTME: submit_multi and submit_multi_resp, submission to up to 255 SME addresses or distribution lists
// ABOUTME: Destination and failure lists are counted by a single octet, so their length is bounded on construction

use crate::codec::{
    CodecError, Decodable, Encodable, PduHeader, decode_cstring, decode_short_message,
    decode_time, decode_tlvs, decode_u8, decode_u32, encode_cstring, encode_short_message,
    encode_time, encode_tlvs, encode_u8, encode_u32,
};
use crate::datatypes::{
    Address, CommandId, DistributionListName, MessageId, NumericPlanIndicator, ServiceType,
    ShortMessage, SmppTime, Tlv, TypeOfNumber,
};
use bytes::{Buf, BytesMut};
use std::io::Cursor;
use std::ops::Deref;

/// A list whose length travels in one octet, so it holds at most 255 items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OctetCountedList<T> {
    items: Vec<T>,
}

impl<T> OctetCountedList<T> {
    pub const MAX_ITEMS: usize = u8::MAX as usize;

    pub fn new(items: Vec<T>) -> Result<Self, CodecError> {
        if items.len() > Self::MAX_ITEMS {
            return Err(CodecError::FieldTooLong {
                field: "list",
                max: Self::MAX_ITEMS,
                actual: items.len(),
            });
        }
        Ok(Self { items })
    }

    pub fn push(&mut self, item: T) -> Result<(), CodecError> {
        if self.items.len() == Self::MAX_ITEMS {
            return Err(CodecError::FieldTooLong {
                field: "list",
                max: Self::MAX_ITEMS,
                actual: Self::MAX_ITEMS + 1,
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// The count octet written before the items.
    pub fn count(&self) -> u8 {
        self.items.len() as u8
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for OctetCountedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Deref for OctetCountedList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

const DEST_FLAG_SME_ADDRESS: u8 = 0x01;
const DEST_FLAG_DISTRIBUTION_LIST: u8 = 0x02;

/// One entry of the submit_multi dest_address list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    SmeAddress {
        ton: TypeOfNumber,
        npi: NumericPlanIndicator,
        address: Address,
    },
    /// A distribution list held on the SMSC.
    DistributionList(DistributionListName),
}

impl Destination {
    fn encode(&self, buf: &mut BytesMut) {
        match self {
            Destination::SmeAddress { ton, npi, address } => {
                encode_u8(buf, DEST_FLAG_SME_ADDRESS);
                encode_u8(buf, (*ton).into());
                encode_u8(buf, (*npi).into());
                encode_cstring(buf, address);
            }
            Destination::DistributionList(name) => {
                encode_u8(buf, DEST_FLAG_DISTRIBUTION_LIST);
                encode_cstring(buf, name);
            }
        }
    }

    fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        match decode_u8(buf, "dest_flag")? {
            DEST_FLAG_SME_ADDRESS => Ok(Destination::SmeAddress {
                ton: decode_u8(buf, "dest_addr_ton")?.into(),
                npi: decode_u8(buf, "dest_addr_npi")?.into(),
                address: decode_cstring(buf, "destination_addr")?,
            }),
            DEST_FLAG_DISTRIBUTION_LIST => Ok(Destination::DistributionList(decode_cstring(
                buf, "dl_name",
            )?)),
            _ => Err(CodecError::MalformedField {
                field: "dest_flag",
                reason: "neither an SME address (1) nor a distribution list (2)",
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitMulti {
    pub sequence_number: u32,
    pub service_type: ServiceType,
    pub source_addr_ton: TypeOfNumber,
    pub source_addr_npi: NumericPlanIndicator,
    pub source_addr: Address,
    pub destinations: OctetCountedList<Destination>,
    pub esm_class: u8,
    pub protocol_id: u8,
    pub priority_flag: u8,
    pub schedule_delivery_time: Option<SmppTime>,
    pub validity_period: Option<SmppTime>,
    pub registered_delivery: u8,
    pub replace_if_present_flag: u8,
    pub data_coding: u8,
    pub sm_default_msg_id: u8,
    pub short_message: ShortMessage,
    pub tlvs: Vec<Tlv>,
}

impl Encodable for SubmitMulti {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::SubmitMulti
    }

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.service_type);
        encode_u8(buf, self.source_addr_ton.into());
        encode_u8(buf, self.source_addr_npi.into());
        encode_cstring(buf, &self.source_addr);
        encode_u8(buf, self.destinations.count());
        for destination in self.destinations.iter() {
            destination.encode(buf);
        }
        encode_u8(buf, self.esm_class);
        encode_u8(buf, self.protocol_id);
        encode_u8(buf, self.priority_flag);
        encode_time(buf, self.schedule_delivery_time.as_ref());
        encode_time(buf, self.validity_period.as_ref());
        encode_u8(buf, self.registered_delivery);
        encode_u8(buf, self.replace_if_present_flag);
        encode_u8(buf, self.data_coding);
        encode_u8(buf, self.sm_default_msg_id);
        encode_short_message(buf, &self.short_message);
        encode_tlvs(buf, &self.tlvs);
    }
}

impl Decodable for SubmitMulti {
    fn command_id() -> CommandId {
        CommandId::SubmitMulti
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        let service_type = decode_cstring(buf, "service_type")?;
        let source_addr_ton = decode_u8(buf, "source_addr_ton")?.into();
        let source_addr_npi = decode_u8(buf, "source_addr_npi")?.into();
        let source_addr = decode_cstring(buf, "source_addr")?;

        let number_of_dests = decode_u8(buf, "number_of_dests")?;
        let mut destinations = Vec::with_capacity(number_of_dests as usize);
        for _ in 0..number_of_dests {
            destinations.push(Destination::decode(buf)?);
        }

        Ok(SubmitMulti {
            sequence_number: header.sequence_number,
            service_type,
            source_addr_ton,
            source_addr_npi,
            source_addr,
            destinations: OctetCountedList { items: destinations },
            esm_class: decode_u8(buf, "esm_class")?,
            protocol_id: decode_u8(buf, "protocol_id")?,
            priority_flag: decode_u8(buf, "priority_flag")?,
            schedule_delivery_time: decode_time(buf, "schedule_delivery_time")?,
            validity_period: decode_time(buf, "validity_period")?,
            registered_delivery: decode_u8(buf, "registered_delivery")?,
            replace_if_present_flag: decode_u8(buf, "replace_if_present_flag")?,
            data_coding: decode_u8(buf, "data_coding")?,
            sm_default_msg_id: decode_u8(buf, "sm_default_msg_id")?,
            short_message: decode_short_message(buf)?,
            tlvs: decode_tlvs(buf)?,
        })
    }
}

/// A destination the SMSC could not accept, with the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsuccessfulDelivery {
    pub ton: TypeOfNumber,
    pub npi: NumericPlanIndicator,
    pub address: Address,
    /// A command_status value.
    pub error_status: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitMultiResponse {
    pub command_status: u32,
    pub sequence_number: u32,
    pub message_id: MessageId,
    pub unsuccess_smes: OctetCountedList<UnsuccessfulDelivery>,
    pub tlvs: Vec<Tlv>,
}

impl Encodable for SubmitMultiResponse {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::SubmitMultiResp
    }

    fn command_status(&self) -> u32 {
        self.command_status
    }

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.message_id);
        encode_u8(buf, self.unsuccess_smes.count());
        for sme in self.unsuccess_smes.iter() {
            encode_u8(buf, sme.ton.into());
            encode_u8(buf, sme.npi.into());
            encode_cstring(buf, &sme.address);
            encode_u32(buf, sme.error_status);
        }
        encode_tlvs(buf, &self.tlvs);
    }
}

impl Decodable for SubmitMultiResponse {
    fn command_id() -> CommandId {
        CommandId::SubmitMultiResp
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        if !buf.has_remaining() {
            return Ok(SubmitMultiResponse {
                command_status: header.command_status,
                sequence_number: header.sequence_number,
                message_id: MessageId::default(),
                unsuccess_smes: OctetCountedList::default(),
                tlvs: Vec::new(),
            });
        }

        let message_id = decode_cstring(buf, "message_id")?;
        let no_unsuccess = decode_u8(buf, "no_unsuccess")?;
        let mut unsuccess_smes = Vec::with_capacity(no_unsuccess as usize);
        for _ in 0..no_unsuccess {
            unsuccess_smes.push(UnsuccessfulDelivery {
                ton: decode_u8(buf, "dest_addr_ton")?.into(),
                npi: decode_u8(buf, "dest_addr_npi")?.into(),
                address: decode_cstring(buf, "destination_addr")?,
                error_status: decode_u32(buf, "error_status_code")?,
            });
        }

        Ok(SubmitMultiResponse {
            command_status: header.command_status,
            sequence_number: header.sequence_number,
            message_id,
            unsuccess_smes: OctetCountedList {
                items: unsuccess_smes,
            },
            tlvs: decode_tlvs(buf)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SubmitMulti {
        let destinations = OctetCountedList::new(vec![
            Destination::SmeAddress {
                ton: TypeOfNumber::International,
                npi: NumericPlanIndicator::Isdn,
                address: "447700900001".parse().unwrap(),
            },
            Destination::DistributionList("friends".parse().unwrap()),
        ])
        .unwrap();

        SubmitMulti {
            sequence_number: 21,
            service_type: ServiceType::default(),
            source_addr_ton: TypeOfNumber::Alphanumeric,
            source_addr_npi: NumericPlanIndicator::Unknown,
            source_addr: "SENDER".parse().unwrap(),
            destinations,
            esm_class: 0,
            protocol_id: 0,
            priority_flag: 0,
            schedule_delivery_time: None,
            validity_period: None,
            registered_delivery: 0,
            replace_if_present_flag: 0,
            data_coding: 0,
            sm_default_msg_id: 0,
            short_message: "to everyone".parse().unwrap(),
            tlvs: Vec::new(),
        }
    }

    #[test]
    fn submit_multi_round_trip() {
        let pdu = sample();
        let bytes = pdu.to_bytes();
        // number_of_dests follows service_type, ton, npi and "SENDER\0"
        assert_eq!(bytes[16 + 1 + 2 + 7], 2);
        assert_eq!(SubmitMulti::from_bytes(&bytes).unwrap(), pdu);
    }

    #[test]
    fn bad_dest_flag() {
        let mut bytes = sample().to_bytes().to_vec();
        bytes[16 + 1 + 2 + 7 + 1] = 0x07;
        assert!(matches!(
            SubmitMulti::from_bytes(&bytes),
            Err(CodecError::MalformedField {
                field: "dest_flag",
                ..
            })
        ));
    }

    #[test]
    fn list_is_bounded() {
        let too_many = vec![Destination::DistributionList(Default::default()); 256];
        assert!(matches!(
            OctetCountedList::new(too_many),
            Err(CodecError::FieldTooLong { max: 255, actual: 256, .. })
        ));

        let mut list = OctetCountedList::new(vec![0u8; 255]).unwrap();
        assert!(list.push(1).is_err());
        assert_eq!(list.count(), 255);
    }

    #[test]
    fn response_round_trip() {
        let resp = SubmitMultiResponse {
            command_status: 0,
            sequence_number: 21,
            message_id: "m-77".parse().unwrap(),
            unsuccess_smes: OctetCountedList::new(vec![UnsuccessfulDelivery {
                ton: TypeOfNumber::International,
                npi: NumericPlanIndicator::Isdn,
                address: "447700900002".parse().unwrap(),
                error_status: 0x0000_000B,
            }])
            .unwrap(),
            tlvs: Vec::new(),
        };
        assert_eq!(SubmitMultiResponse::from_bytes(&resp.to_bytes()).unwrap(), resp);
    }
}
