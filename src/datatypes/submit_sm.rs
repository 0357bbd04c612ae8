use crate::codec::{
    CodecError, Decodable, Encodable, PduHeader, decode_cstring, decode_short_message,
    decode_time, decode_tlvs, decode_u8, encode_cstring, encode_short_message, encode_time,
    encode_tlvs, encode_u8,
};
use crate::datatypes::{
    Address, CommandId, FixedStringError, MessageId, NumericPlanIndicator, ServiceType,
    ShortMessage, SmppTime, Tlv, TypeOfNumber, tlv,
};
use crate::macros::builder_setters;
use bytes::{Buf, BytesMut};
use std::io::Cursor;

/// This operation is used by an ESME to submit a short message to the SMSC for onward transmission
/// to a specified short message entity (SME).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitSm {
    pub sequence_number: u32,

    /// service_type: indicates the SMS application service associated with the message.
    ///     Empty if not applicable.
    pub service_type: ServiceType,

    pub source_addr_ton: TypeOfNumber,
    pub source_addr_npi: NumericPlanIndicator,

    /// source_addr: address of the SME which originated this message. Up to 20 octets.
    pub source_addr: Address,

    pub dest_addr_ton: TypeOfNumber,
    pub dest_addr_npi: NumericPlanIndicator,

    /// destination_addr: for mobile terminated messages, the directory number of the
    ///     recipient MS. Up to 20 octets.
    pub destination_addr: Address,

    /// esm_class: message mode, message type and GSM network features such as UDHI.
    ///     See [`crate::datatypes::esm_class`].
    pub esm_class: u8,

    /// protocol_id: network specific protocol identifier.
    pub protocol_id: u8,

    /// priority_flag: level 0 (lowest) to level 3 (highest).
    pub priority_flag: u8,

    /// schedule_delivery_time: `None` for immediate delivery.
    pub schedule_delivery_time: Option<SmppTime>,

    /// validity_period: `None` requests the SMSC default validity period.
    pub validity_period: Option<SmppTime>,

    /// registered_delivery: receipt and acknowledgement requests.
    ///     Bits 1-0: SMSC delivery receipt, bits 3-2: SME acknowledgement,
    ///     bit 4: intermediate notification.
    pub registered_delivery: u8,

    pub replace_if_present_flag: u8,

    /// data_coding: encoding scheme of the short message user data, e.g.
    ///     0x00 SMSC default alphabet, 0x03 Latin-1, 0x08 UCS2.
    pub data_coding: u8,

    /// sm_default_msg_id: index of a canned message stored on the SMSC, or 0.
    pub sm_default_msg_id: u8,

    /// short_message: up to 254 octets. sm_length is derived from it.
    ///     Longer content travels in the message_payload TLV with an empty short_message.
    pub short_message: ShortMessage,

    /// Optional parameters in wire order.
    pub tlvs: Vec<Tlv>,
}

impl SubmitSm {
    pub fn builder() -> SubmitSmBuilder {
        SubmitSmBuilder::default()
    }

    /// First optional parameter with the given tag.
    pub fn tlv(&self, tag: u16) -> Option<&Tlv> {
        tlv::find(&self.tlvs, tag)
    }
}

impl Encodable for SubmitSm {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::SubmitSm
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

impl Decodable for SubmitSm {
    fn command_id() -> CommandId {
        CommandId::SubmitSm
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        Ok(SubmitSm {
            sequence_number: header.sequence_number,
            service_type: decode_cstring(buf, "service_type")?,
            source_addr_ton: decode_u8(buf, "source_addr_ton")?.into(),
            source_addr_npi: decode_u8(buf, "source_addr_npi")?.into(),
            source_addr: decode_cstring(buf, "source_addr")?,
            dest_addr_ton: decode_u8(buf, "dest_addr_ton")?.into(),
            dest_addr_npi: decode_u8(buf, "dest_addr_npi")?.into(),
            destination_addr: decode_cstring(buf, "destination_addr")?,
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

/// Builder for creating SubmitSm PDUs with validation and sensible defaults
#[derive(Default)]
pub struct SubmitSmBuilder {
    sequence_number: u32,
    service_type: String,
    source_addr_ton: TypeOfNumber,
    source_addr_npi: NumericPlanIndicator,
    source_addr: String,
    dest_addr_ton: TypeOfNumber,
    dest_addr_npi: NumericPlanIndicator,
    destination_addr: String,
    esm_class: u8,
    protocol_id: u8,
    priority_flag: u8,
    schedule_delivery_time: Option<SmppTime>,
    validity_period: Option<SmppTime>,
    registered_delivery: u8,
    replace_if_present_flag: u8,
    data_coding: u8,
    sm_default_msg_id: u8,
    short_message: Vec<u8>,
    tlvs: Vec<Tlv>,
}

impl SubmitSmBuilder {
    builder_setters! {
        sequence_number: u32,
        source_addr_ton: TypeOfNumber,
        source_addr_npi: NumericPlanIndicator,
        dest_addr_ton: TypeOfNumber,
        dest_addr_npi: NumericPlanIndicator,
        esm_class: u8,
        protocol_id: u8,
        priority_flag: u8,
        registered_delivery: u8,
        replace_if_present_flag: u8,
        data_coding: u8,
        sm_default_msg_id: u8,
    }

    pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }

    pub fn source_addr(mut self, addr: impl Into<String>) -> Self {
        self.source_addr = addr.into();
        self
    }

    pub fn destination_addr(mut self, addr: impl Into<String>) -> Self {
        self.destination_addr = addr.into();
        self
    }

    pub fn schedule_delivery_time(mut self, time: SmppTime) -> Self {
        self.schedule_delivery_time = Some(time);
        self
    }

    pub fn validity_period(mut self, time: SmppTime) -> Self {
        self.validity_period = Some(time);
        self
    }

    pub fn short_message(mut self, message: impl AsRef<[u8]>) -> Self {
        self.short_message = message.as_ref().to_vec();
        self
    }

    pub fn tlv(mut self, tlv: Tlv) -> Self {
        self.tlvs.push(tlv);
        self
    }

    /// Build the SubmitSm, checking every variable field against its size
    pub fn build(self) -> Result<SubmitSm, FixedStringError> {
        Ok(SubmitSm {
            sequence_number: self.sequence_number,
            service_type: self.service_type.parse()?,
            source_addr_ton: self.source_addr_ton,
            source_addr_npi: self.source_addr_npi,
            source_addr: self.source_addr.parse()?,
            dest_addr_ton: self.dest_addr_ton,
            dest_addr_npi: self.dest_addr_npi,
            destination_addr: self.destination_addr.parse()?,
            esm_class: self.esm_class,
            protocol_id: self.protocol_id,
            priority_flag: self.priority_flag,
            schedule_delivery_time: self.schedule_delivery_time,
            validity_period: self.validity_period,
            registered_delivery: self.registered_delivery,
            replace_if_present_flag: self.replace_if_present_flag,
            data_coding: self.data_coding,
            sm_default_msg_id: self.sm_default_msg_id,
            short_message: ShortMessage::new(&self.short_message)?,
            tlvs: self.tlvs,
        })
    }
}

/// The SMSC's answer to submit_sm, carrying the id it assigned to the message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitSmResponse {
    pub command_status: u32,
    pub sequence_number: u32,
    /// Empty on an error response without a body.
    pub message_id: MessageId,
    pub tlvs: Vec<Tlv>,
}

impl SubmitSmResponse {
    pub fn new(sequence_number: u32, message_id: MessageId) -> Self {
        Self {
            command_status: 0,
            sequence_number,
            message_id,
            tlvs: Vec::new(),
        }
    }
}

impl Encodable for SubmitSmResponse {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::SubmitSmResp
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

impl Decodable for SubmitSmResponse {
    fn command_id() -> CommandId {
        CommandId::SubmitSmResp
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        let message_id = if buf.has_remaining() {
            decode_cstring(buf, "message_id")?
        } else {
            MessageId::default()
        };

        Ok(SubmitSmResponse {
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

    fn sample() -> SubmitSm {
        SubmitSm::builder()
            .sequence_number(2)
            .source_addr_ton(TypeOfNumber::International)
            .source_addr_npi(NumericPlanIndicator::Isdn)
            .source_addr("123456")
            .destination_addr("9876543210")
            .short_message("Hello SubmitSm")
            .tlv(Tlv::new_u16(tags::USER_MESSAGE_REFERENCE, 1))
            .build()
            .unwrap()
    }

    #[test]
    fn submit_sm_wire_layout() {
        let bytes = sample().to_bytes();

        let mut body = Vec::new();
        body.push(0); // service_type
        body.extend_from_slice(&[0x01, 0x01]);
        body.extend_from_slice(b"123456\0");
        body.extend_from_slice(&[0x00, 0x00]);
        body.extend_from_slice(b"9876543210\0");
        body.extend_from_slice(&[0, 0, 0]); // esm_class, protocol_id, priority_flag
        body.extend_from_slice(&[0, 0]); // schedule_delivery_time, validity_period
        body.extend_from_slice(&[0, 0, 0, 0]);
        body.push(14);
        body.extend_from_slice(b"Hello SubmitSm");
        body.extend_from_slice(&[0x02, 0x04, 0x00, 0x02, 0x00, 0x01]);

        assert_eq!(&bytes[16..], body.as_slice());
        assert_eq!(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize, bytes.len());
    }

    #[test]
    fn submit_sm_round_trip() {
        let mut pdu = sample();
        pdu.schedule_delivery_time = Some("220612123000000+".parse().unwrap());
        pdu.validity_period = Some("000002000000000R".parse().unwrap());
        let decoded = SubmitSm::from_bytes(&pdu.to_bytes()).unwrap();
        assert_eq!(decoded, pdu);
        assert_eq!(
            decoded.tlv(tags::USER_MESSAGE_REFERENCE).and_then(Tlv::value_as_u16),
            Some(1)
        );
    }

    #[test]
    fn builder_rejects_long_address() {
        let result = SubmitSm::builder().destination_addr("1".repeat(21)).build();
        assert_eq!(
            result,
            Err(FixedStringError::TooLong {
                max_len: 20,
                actual_len: 21
            })
        );
    }

    #[test]
    fn response_round_trip() {
        let resp = SubmitSmResponse::new(2, "msg-0001".parse().unwrap());
        let bytes = resp.to_bytes();
        assert_eq!(&bytes[16..], b"msg-0001\0");
        assert_eq!(SubmitSmResponse::from_bytes(&bytes).unwrap(), resp);
    }

    #[test]
    fn bad_time_is_malformed() {
        let mut bytes = sample().to_bytes().to_vec();
        // Replace the empty schedule_delivery_time with a short bogus value.
        let at = 16 + 1 + 2 + 7 + 2 + 11 + 3;
        bytes.splice(at..at, b"12".iter().copied());
        let len = bytes.len() as u32;
        bytes[..4].copy_from_slice(&len.to_be_bytes());
        assert_eq!(
            SubmitSm::from_bytes(&bytes),
            Err(CodecError::MalformedField {
                field: "schedule_delivery_time",
                reason: "not a valid YYMMDDhhmmsstnnp time"
            })
        );
    }
}
