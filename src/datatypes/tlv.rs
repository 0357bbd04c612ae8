use crate::codec::CodecError;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::Cursor;

/// Well-known optional parameter tags.
pub mod tags {
    pub const DEST_ADDR_SUBUNIT: u16 = 0x0005;
    pub const DEST_NETWORK_TYPE: u16 = 0x0006;
    pub const DEST_BEARER_TYPE: u16 = 0x0007;
    pub const DEST_TELEMATICS_ID: u16 = 0x0008;
    pub const SOURCE_ADDR_SUBUNIT: u16 = 0x000D;
    pub const SOURCE_NETWORK_TYPE: u16 = 0x000E;
    pub const SOURCE_BEARER_TYPE: u16 = 0x000F;
    pub const SOURCE_TELEMATICS_ID: u16 = 0x0010;
    pub const QOS_TIME_TO_LIVE: u16 = 0x0017;
    pub const PAYLOAD_TYPE: u16 = 0x0019;
    pub const ADDITIONAL_STATUS_INFO_TEXT: u16 = 0x001D;
    pub const RECEIPTED_MESSAGE_ID: u16 = 0x001E;
    pub const MS_MSG_WAIT_FACILITIES: u16 = 0x0030;
    pub const PRIVACY_INDICATOR: u16 = 0x0201;
    pub const SOURCE_SUBADDRESS: u16 = 0x0202;
    pub const DEST_SUBADDRESS: u16 = 0x0203;
    pub const USER_MESSAGE_REFERENCE: u16 = 0x0204;
    pub const USER_RESPONSE_CODE: u16 = 0x0205;
    pub const SOURCE_PORT: u16 = 0x020A;
    pub const DESTINATION_PORT: u16 = 0x020B;
    pub const SAR_MSG_REF_NUM: u16 = 0x020C;
    pub const LANGUAGE_INDICATOR: u16 = 0x020D;
    pub const SAR_TOTAL_SEGMENTS: u16 = 0x020E;
    pub const SAR_SEGMENT_SEQNUM: u16 = 0x020F;
    pub const SC_INTERFACE_VERSION: u16 = 0x0210;
    pub const CALLBACK_NUM_PRES_IND: u16 = 0x0302;
    pub const CALLBACK_NUM_ATAG: u16 = 0x0303;
    pub const NUMBER_OF_MESSAGES: u16 = 0x0304;
    pub const CALLBACK_NUM: u16 = 0x0381;
    pub const DPF_RESULT: u16 = 0x0420;
    pub const SET_DPF: u16 = 0x0421;
    pub const MS_AVAILABILITY_STATUS: u16 = 0x0422;
    pub const NETWORK_ERROR_CODE: u16 = 0x0423;
    pub const MESSAGE_PAYLOAD: u16 = 0x0424;
    pub const DELIVERY_FAILURE_REASON: u16 = 0x0425;
    pub const MORE_MESSAGES_TO_SEND: u16 = 0x0426;
    pub const MESSAGE_STATE: u16 = 0x0427;
    pub const USSD_SERVICE_OP: u16 = 0x0501;
    pub const BROADCAST_CHANNEL_INDICATOR: u16 = 0x0600;
    pub const BROADCAST_CONTENT_TYPE: u16 = 0x0601;
    pub const BROADCAST_CONTENT_TYPE_INFO: u16 = 0x0602;
    pub const BROADCAST_MESSAGE_CLASS: u16 = 0x0603;
    pub const BROADCAST_REP_NUM: u16 = 0x0604;
    pub const BROADCAST_FREQUENCY_INTERVAL: u16 = 0x0605;
    pub const BROADCAST_AREA_IDENTIFIER: u16 = 0x0606;
    pub const BROADCAST_ERROR_STATUS: u16 = 0x0607;
    pub const BROADCAST_AREA_SUCCESS: u16 = 0x0608;
    pub const BROADCAST_END_TIME: u16 = 0x0609;
    pub const BROADCAST_SERVICE_GROUP: u16 = 0x060A;
    pub const DISPLAY_TIME: u16 = 0x1201;
    pub const SMS_SIGNAL: u16 = 0x1203;
    pub const MS_VALIDITY: u16 = 0x1204;
    pub const ALERT_ON_MESSAGE_DELIVERY: u16 = 0x130C;
    pub const ITS_REPLY_TYPE: u16 = 0x1380;
    pub const ITS_SESSION_INFO: u16 = 0x1383;

    const NAMES: &[(&str, u16)] = &[
        ("dest_addr_subunit", DEST_ADDR_SUBUNIT),
        ("dest_network_type", DEST_NETWORK_TYPE),
        ("dest_bearer_type", DEST_BEARER_TYPE),
        ("dest_telematics_id", DEST_TELEMATICS_ID),
        ("source_addr_subunit", SOURCE_ADDR_SUBUNIT),
        ("source_network_type", SOURCE_NETWORK_TYPE),
        ("source_bearer_type", SOURCE_BEARER_TYPE),
        ("source_telematics_id", SOURCE_TELEMATICS_ID),
        ("qos_time_to_live", QOS_TIME_TO_LIVE),
        ("payload_type", PAYLOAD_TYPE),
        ("additional_status_info_text", ADDITIONAL_STATUS_INFO_TEXT),
        ("receipted_message_id", RECEIPTED_MESSAGE_ID),
        ("ms_msg_wait_facilities", MS_MSG_WAIT_FACILITIES),
        ("privacy_indicator", PRIVACY_INDICATOR),
        ("source_subaddress", SOURCE_SUBADDRESS),
        ("dest_subaddress", DEST_SUBADDRESS),
        ("user_message_reference", USER_MESSAGE_REFERENCE),
        ("user_response_code", USER_RESPONSE_CODE),
        ("source_port", SOURCE_PORT),
        ("destination_port", DESTINATION_PORT),
        ("sar_msg_ref_num", SAR_MSG_REF_NUM),
        ("language_indicator", LANGUAGE_INDICATOR),
        ("sar_total_segments", SAR_TOTAL_SEGMENTS),
        ("sar_segment_seqnum", SAR_SEGMENT_SEQNUM),
        ("sc_interface_version", SC_INTERFACE_VERSION),
        ("callback_num_pres_ind", CALLBACK_NUM_PRES_IND),
        ("callback_num_atag", CALLBACK_NUM_ATAG),
        ("number_of_messages", NUMBER_OF_MESSAGES),
        ("callback_num", CALLBACK_NUM),
        ("dpf_result", DPF_RESULT),
        ("set_dpf", SET_DPF),
        ("ms_availability_status", MS_AVAILABILITY_STATUS),
        ("network_error_code", NETWORK_ERROR_CODE),
        ("message_payload", MESSAGE_PAYLOAD),
        ("delivery_failure_reason", DELIVERY_FAILURE_REASON),
        ("more_messages_to_send", MORE_MESSAGES_TO_SEND),
        ("message_state", MESSAGE_STATE),
        ("ussd_service_op", USSD_SERVICE_OP),
        ("broadcast_channel_indicator", BROADCAST_CHANNEL_INDICATOR),
        ("broadcast_content_type", BROADCAST_CONTENT_TYPE),
        ("broadcast_content_type_info", BROADCAST_CONTENT_TYPE_INFO),
        ("broadcast_message_class", BROADCAST_MESSAGE_CLASS),
        ("broadcast_rep_num", BROADCAST_REP_NUM),
        ("broadcast_frequency_interval", BROADCAST_FREQUENCY_INTERVAL),
        ("broadcast_area_identifier", BROADCAST_AREA_IDENTIFIER),
        ("broadcast_error_status", BROADCAST_ERROR_STATUS),
        ("broadcast_area_success", BROADCAST_AREA_SUCCESS),
        ("broadcast_end_time", BROADCAST_END_TIME),
        ("broadcast_service_group", BROADCAST_SERVICE_GROUP),
        ("display_time", DISPLAY_TIME),
        ("sms_signal", SMS_SIGNAL),
        ("ms_validity", MS_VALIDITY),
        ("alert_on_message_delivery", ALERT_ON_MESSAGE_DELIVERY),
        ("its_reply_type", ITS_REPLY_TYPE),
        ("its_session_info", ITS_SESSION_INFO),
    ];

    /// Look a tag up by its protocol name, e.g. `"sar_msg_ref_num"`.
    pub fn by_name(name: &str) -> Option<u16> {
        NAMES.iter().find(|(n, _)| *n == name).map(|&(_, tag)| tag)
    }

    /// The protocol name of a well-known tag.
    pub fn name(tag: u16) -> Option<&'static str> {
        NAMES.iter().find(|(_, t)| *t == tag).map(|&(n, _)| n)
    }
}

/// An optional parameter.
///
/// The length field is derived from the value, so a `Tlv` can never
/// disagree with itself on the wire. Tags outside [`tags`] are carried
/// opaquely.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tlv {
    tag: u16,
    value: Bytes,
}

impl Tlv {
    /// Size of the tag and length fields.
    pub const HEADER_SIZE: usize = 4;

    pub fn new_u8(tag: u16, value: u8) -> Self {
        Self {
            tag,
            value: Bytes::copy_from_slice(&[value]),
        }
    }

    pub fn new_u16(tag: u16, value: u16) -> Self {
        Self {
            tag,
            value: Bytes::copy_from_slice(&value.to_be_bytes()),
        }
    }

    pub fn new_u32(tag: u16, value: u32) -> Self {
        Self {
            tag,
            value: Bytes::copy_from_slice(&value.to_be_bytes()),
        }
    }

    /// Arbitrary octets; the value must fit the 16-bit length field.
    pub fn new_bytes(tag: u16, value: impl Into<Bytes>) -> Result<Self, CodecError> {
        let value = value.into();
        if value.len() > u16::MAX as usize {
            return Err(CodecError::FieldTooLong {
                field: "tlv_value",
                max: u16::MAX as usize,
                actual: value.len(),
            });
        }
        Ok(Self { tag, value })
    }

    /// A C-Octet String value: the text followed by a NUL terminator.
    pub fn new_cstring(tag: u16, value: &str) -> Result<Self, CodecError> {
        if value.as_bytes().contains(&0) {
            return Err(CodecError::MalformedField {
                field: "tlv_value",
                reason: "embedded NUL in C-Octet String",
            });
        }
        let mut buf = BytesMut::with_capacity(value.len() + 1);
        buf.put_slice(value.as_bytes());
        buf.put_u8(0);
        Self::new_bytes(tag, buf.freeze())
    }

    /// The three SAR parameters describing one segment of a long message.
    pub fn sar(reference: u16, total: u8, seqnum: u8) -> [Tlv; 3] {
        [
            Tlv::new_u16(tags::SAR_MSG_REF_NUM, reference),
            Tlv::new_u8(tags::SAR_TOTAL_SEGMENTS, total),
            Tlv::new_u8(tags::SAR_SEGMENT_SEQNUM, seqnum),
        ]
    }

    pub fn tag(&self) -> u16 {
        self.tag
    }

    /// The length field: octets in the value.
    pub fn length(&self) -> u16 {
        self.value.len() as u16
    }

    pub fn value(&self) -> &Bytes {
        &self.value
    }

    pub fn name(&self) -> Option<&'static str> {
        tags::name(self.tag)
    }

    /// Returns `None` unless the value is exactly one octet.
    pub fn value_as_u8(&self) -> Option<u8> {
        match self.value.as_ref() {
            [b] => Some(*b),
            _ => None,
        }
    }

    /// Returns `None` unless the value is exactly two octets.
    pub fn value_as_u16(&self) -> Option<u16> {
        let bytes: [u8; 2] = self.value.as_ref().try_into().ok()?;
        Some(u16::from_be_bytes(bytes))
    }

    /// Returns `None` unless the value is exactly four octets.
    pub fn value_as_u32(&self) -> Option<u32> {
        let bytes: [u8; 4] = self.value.as_ref().try_into().ok()?;
        Some(u32::from_be_bytes(bytes))
    }

    /// The value as text, with one trailing NUL stripped if present.
    pub fn value_as_str(&self) -> Option<&str> {
        let bytes = self.value.as_ref();
        let bytes = bytes.strip_suffix(&[0]).unwrap_or(bytes);
        std::str::from_utf8(bytes).ok()
    }

    pub fn encoded_size(&self) -> usize {
        Self::HEADER_SIZE + self.value.len()
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u16(self.tag);
        buf.put_u16(self.length());
        buf.put_slice(&self.value);
    }

    /// Decode one TLV. The cursor must be bounded to the PDU body.
    pub fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let remaining = buf.remaining();
        if remaining < Self::HEADER_SIZE {
            let tag = if remaining >= 2 {
                let chunk = buf.chunk();
                u16::from_be_bytes([chunk[0], chunk[1]])
            } else {
                0
            };
            return Err(CodecError::TruncatedTlv {
                tag,
                declared: Self::HEADER_SIZE,
                remaining,
            });
        }

        let tag = buf.get_u16();
        let length = buf.get_u16() as usize;
        if buf.remaining() < length {
            return Err(CodecError::TruncatedTlv {
                tag,
                declared: length,
                remaining: buf.remaining(),
            });
        }

        let value = buf.copy_to_bytes(length);
        Ok(Self { tag, value })
    }
}

/// First TLV with the given tag.
pub fn find(tlvs: &[Tlv], tag: u16) -> Option<&Tlv> {
    tlvs.iter().find(|tlv| tlv.tag == tag)
}

/// First TLV whose tag has the given protocol name.
pub fn find_by_name<'a>(tlvs: &'a [Tlv], name: &str) -> Option<&'a Tlv> {
    tags::by_name(name).and_then(|tag| find(tlvs, tag))
}
