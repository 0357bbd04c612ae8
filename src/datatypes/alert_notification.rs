use crate::codec::{
    CodecError, Decodable, Encodable, PduHeader, decode_cstring, decode_tlvs, decode_u8,
    encode_cstring, encode_tlvs, encode_u8,
};
use crate::datatypes::{CommandId, NumericPlanIndicator, Tlv, TypeOfNumber, WideAddress, tags, tlv};
use bytes::BytesMut;
use std::io::Cursor;

/// Sent by the SMSC to an ESME when a mobile subscriber becomes available,
/// after an earlier delivery set the `set_dpf` flag. There is no response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertNotification {
    pub sequence_number: u32,
    pub source_addr_ton: TypeOfNumber,
    pub source_addr_npi: NumericPlanIndicator,
    /// The MS that became available.
    pub source_addr: WideAddress,
    pub esme_addr_ton: TypeOfNumber,
    pub esme_addr_npi: NumericPlanIndicator,
    /// The ESME that asked to be alerted.
    pub esme_addr: WideAddress,
    pub tlvs: Vec<Tlv>,
}

impl AlertNotification {
    /// ms_availability_status: 0 available, 1 denied, 2 unavailable.
    pub fn ms_availability_status(&self) -> Option<u8> {
        tlv::find(&self.tlvs, tags::MS_AVAILABILITY_STATUS).and_then(Tlv::value_as_u8)
    }
}

impl Encodable for AlertNotification {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::AlertNotification
    }

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        encode_u8(buf, self.source_addr_ton.into());
        encode_u8(buf, self.source_addr_npi.into());
        encode_cstring(buf, &self.source_addr);
        encode_u8(buf, self.esme_addr_ton.into());
        encode_u8(buf, self.esme_addr_npi.into());
        encode_cstring(buf, &self.esme_addr);
        encode_tlvs(buf, &self.tlvs);
    }
}

impl Decodable for AlertNotification {
    fn command_id() -> CommandId {
        CommandId::AlertNotification
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;

        Ok(AlertNotification {
            sequence_number: header.sequence_number,
            source_addr_ton: decode_u8(buf, "source_addr_ton")?.into(),
            source_addr_npi: decode_u8(buf, "source_addr_npi")?.into(),
            source_addr: decode_cstring(buf, "source_addr")?,
            esme_addr_ton: decode_u8(buf, "esme_addr_ton")?.into(),
            esme_addr_npi: decode_u8(buf, "esme_addr_npi")?.into(),
            esme_addr: decode_cstring(buf, "esme_addr")?,
            tlvs: decode_tlvs(buf)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_notification_round_trip() {
        let pdu = AlertNotification {
            sequence_number: 4,
            source_addr_ton: TypeOfNumber::International,
            source_addr_npi: NumericPlanIndicator::Isdn,
            source_addr: "447700900123".parse().unwrap(),
            esme_addr_ton: TypeOfNumber::from(0x09u8),
            esme_addr_npi: NumericPlanIndicator::Unknown,
            esme_addr: "esme".parse().unwrap(),
            tlvs: vec![Tlv::new_u8(tags::MS_AVAILABILITY_STATUS, 0)],
        };
        let bytes = pdu.to_bytes();
        assert_eq!(&bytes[4..8], &[0, 0, 0x01, 0x02]);

        let decoded = AlertNotification::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, pdu);
        assert_eq!(decoded.esme_addr_ton, TypeOfNumber::Unrecognized(9));
        assert_eq!(decoded.ms_availability_status(), Some(0));
    }
}
