use crate::codec::{
    CodecError, Decodable, Encodable, PduHeader, decode_cstring, decode_short_message,
    decode_time, decode_tlvs, decode_u8, encode_cstring, encode_short_message, encode_time,
    encode_tlvs, encode_u8,
};
use crate::datatypes::{
    Address, CommandId, DeliveryReceipt, DeliveryReceiptError, FixedStringError, MessageId,
    NumericPlanIndicator, ServiceType, ShortMessage, SmppTime, Tlv, TypeOfNumber, esm_class, tlv,
};
use crate::macros::builder_setters;
use bytes::{Buf, BytesMut};
use std::io::Cursor;

/// Issued by the SMSC to route a short message to an ESME, either a mobile
/// originated message or a delivery receipt for an earlier submission.
///
/// The body layout matches submit_sm field for field. The SMSC sends
/// schedule_delivery_time and validity_period empty, but they are kept so the
/// PDU round-trips whatever the peer sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliverSm {
    pub sequence_number: u32,
    pub service_type: ServiceType,
    pub source_addr_ton: TypeOfNumber,
    pub source_addr_npi: NumericPlanIndicator,
    pub source_addr: Address,
    pub dest_addr_ton: TypeOfNumber,
    pub dest_addr_npi: NumericPlanIndicator,
    pub destination_addr: Address,
    /// Bit 2 marks a delivery receipt; see [`esm_class`].
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

impl DeliverSm {
    pub fn builder() -> DeliverSmBuilder {
        DeliverSmBuilder::default()
    }

    pub fn tlv(&self, tag: u16) -> Option<&Tlv> {
        tlv::find(&self.tlvs, tag)
    }

    pub fn is_delivery_receipt(&self) -> bool {
        esm_class::is_delivery_receipt(self.esm_class)
    }

    /// Parse the short_message as a delivery receipt.
    ///
    /// Returns `None` when esm_class does not flag a receipt.
    pub fn delivery_receipt(&self) -> Option<Result<DeliveryReceipt, DeliveryReceiptError>> {
        if !self.is_delivery_receipt() {
            return None;
        }
        Some(DeliveryReceipt::parse_bytes(self.short_message.as_bytes()))
    }
}

impl Encodable for DeliverSm {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::DeliverSm
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

impl Decodable for DeliverSm {
    fn command_id() -> CommandId {
        CommandId::DeliverSm
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        Ok(DeliverSm {
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

#[derive(Default)]
pub struct DeliverSmBuilder {
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
    registered_delivery: u8,
    data_coding: u8,
    short_message: Vec<u8>,
    tlvs: Vec<Tlv>,
}

impl DeliverSmBuilder {
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
        data_coding: u8,
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

    pub fn short_message(mut self, message: impl AsRef<[u8]>) -> Self {
        self.short_message = message.as_ref().to_vec();
        self
    }

    /// Format `receipt` into the short_message and flag it in esm_class.
    pub fn delivery_receipt(mut self, receipt: &DeliveryReceipt) -> Self {
        self.short_message = receipt.to_string().into_bytes();
        self.esm_class = (self.esm_class & !esm_class::MESSAGE_TYPE_MASK) | esm_class::DELIVERY_RECEIPT;
        self
    }

    pub fn tlv(mut self, tlv: Tlv) -> Self {
        self.tlvs.push(tlv);
        self
    }

    pub fn build(self) -> Result<DeliverSm, FixedStringError> {
        Ok(DeliverSm {
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
            schedule_delivery_time: None,
            validity_period: None,
            registered_delivery: self.registered_delivery,
            replace_if_present_flag: 0,
            data_coding: self.data_coding,
            sm_default_msg_id: 0,
            short_message: ShortMessage::new(&self.short_message)?,
            tlvs: self.tlvs,
        })
    }
}

/// message_id is unused and normally empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliverSmResponse {
    pub command_status: u32,
    pub sequence_number: u32,
    pub message_id: MessageId,
    pub tlvs: Vec<Tlv>,
}

impl DeliverSmResponse {
    pub fn new(sequence_number: u32) -> Self {
        Self {
            command_status: 0,
            sequence_number,
            message_id: MessageId::default(),
            tlvs: Vec::new(),
        }
    }
}

impl Encodable for DeliverSmResponse {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::DeliverSmResp
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

impl Decodable for DeliverSmResponse {
    fn command_id() -> CommandId {
        CommandId::DeliverSmResp
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        let message_id = if buf.has_remaining() {
            decode_cstring(buf, "message_id")?
        } else {
            MessageId::default()
        };

        Ok(DeliverSmResponse {
            command_status: header.command_status,
            sequence_number: header.sequence_number,
            message_id,
            tlvs: decode_tlvs(buf)?,
        })
    }
}
