// ABOUTME: bind_receiver, bind_transmitter and bind_transceiver requests and their responses
// ABOUTME: The three binds share one body layout, so one type per direction carries a BindMode

use crate::codec::{
    CodecError, Decodable, Encodable, PduHeader, decode_cstring, decode_tlvs, decode_u8,
    encode_cstring, encode_tlvs, encode_u8,
};
use crate::datatypes::{
    AddressRange, CommandId, FixedStringError, InterfaceVersion, NumericPlanIndicator, Password,
    SystemId, SystemType, Tlv, TypeOfNumber,
};
use bytes::{Buf, BytesMut};
use std::io::Cursor;

/// Which of the three bind operations a PDU represents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BindMode {
    Receiver,
    Transmitter,
    Transceiver,
}

impl BindMode {
    pub fn request_id(self) -> CommandId {
        match self {
            BindMode::Receiver => CommandId::BindReceiver,
            BindMode::Transmitter => CommandId::BindTransmitter,
            BindMode::Transceiver => CommandId::BindTransceiver,
        }
    }

    pub fn response_id(self) -> CommandId {
        match self {
            BindMode::Receiver => CommandId::BindReceiverResp,
            BindMode::Transmitter => CommandId::BindTransmitterResp,
            BindMode::Transceiver => CommandId::BindTransceiverResp,
        }
    }

    fn for_request(header: &PduHeader) -> Result<Self, CodecError> {
        match CommandId::try_from(header.command_id) {
            Ok(CommandId::BindReceiver) => Ok(BindMode::Receiver),
            Ok(CommandId::BindTransmitter) => Ok(BindMode::Transmitter),
            Ok(CommandId::BindTransceiver) => Ok(BindMode::Transceiver),
            _ => Err(CodecError::UnsupportedCommandId {
                expected: <BindRequest as Decodable>::command_id(),
                actual: header.command_id,
            }),
        }
    }

    fn for_response(header: &PduHeader) -> Result<Self, CodecError> {
        match CommandId::try_from(header.command_id) {
            Ok(CommandId::BindReceiverResp) => Ok(BindMode::Receiver),
            Ok(CommandId::BindTransmitterResp) => Ok(BindMode::Transmitter),
            Ok(CommandId::BindTransceiverResp) => Ok(BindMode::Transceiver),
            _ => Err(CodecError::UnsupportedCommandId {
                expected: <BindResponse as Decodable>::command_id(),
                actual: header.command_id,
            }),
        }
    }
}

/// A bind request, used by an ESME to open a session with the SMSC.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindRequest {
    pub mode: BindMode,
    pub sequence_number: u32,

    /// Identifies the ESME requesting to bind. Up to 15 characters.
    pub system_id: SystemId,

    /// Password for authentication; empty when the SMSC requires none.
    pub password: Password,

    /// Categorizes the type of ESME, e.g. "VMS" or "OTA".
    pub system_type: SystemType,

    pub interface_version: InterfaceVersion,

    /// Type of Number of the ESME address(es) served via this session.
    pub addr_ton: TypeOfNumber,

    /// Numbering Plan Indicator of the ESME address(es) served via this session.
    pub addr_npi: NumericPlanIndicator,

    /// Range of SME addresses serviced by the ESME, often a regular expression.
    pub address_range: AddressRange,
}

impl BindRequest {
    pub fn builder(mode: BindMode) -> BindRequestBuilder {
        BindRequestBuilder::new(mode)
    }
}

impl Encodable for BindRequest {
    fn pdu_command_id(&self) -> CommandId {
        self.mode.request_id()
    }

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.system_id);
        encode_cstring(buf, &self.password);
        encode_cstring(buf, &self.system_type);
        encode_u8(buf, self.interface_version.into());
        encode_u8(buf, self.addr_ton.into());
        encode_u8(buf, self.addr_npi.into());
        encode_cstring(buf, &self.address_range);
    }
}

impl Decodable for BindRequest {
    /// Nominal id; all three bind request ids are accepted.
    fn command_id() -> CommandId {
        CommandId::BindTransceiver
    }

    fn validate_header(header: &PduHeader) -> Result<(), CodecError> {
        BindMode::for_request(header).map(|_| ())
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let mode = BindMode::for_request(header)?;

        let pdu = BindRequest {
            mode,
            sequence_number: header.sequence_number,
            system_id: decode_cstring(buf, "system_id")?,
            password: decode_cstring(buf, "password")?,
            system_type: decode_cstring(buf, "system_type")?,
            interface_version: decode_u8(buf, "interface_version")?.into(),
            addr_ton: decode_u8(buf, "addr_ton")?.into(),
            addr_npi: decode_u8(buf, "addr_npi")?.into(),
            address_range: decode_cstring(buf, "address_range")?,
        };
        crate::codec::expect_end(buf, "bind")?;
        Ok(pdu)
    }
}

/// Builder for bind requests with validation and sensible defaults
pub struct BindRequestBuilder {
    mode: BindMode,
    sequence_number: u32,
    system_id: String,
    password: String,
    system_type: String,
    interface_version: InterfaceVersion,
    addr_ton: TypeOfNumber,
    addr_npi: NumericPlanIndicator,
    address_range: String,
}

impl BindRequestBuilder {
    pub fn new(mode: BindMode) -> Self {
        Self {
            mode,
            sequence_number: 1,
            system_id: String::new(),
            password: String::new(),
            system_type: String::new(),
            interface_version: InterfaceVersion::SmppV34,
            addr_ton: TypeOfNumber::Unknown,
            addr_npi: NumericPlanIndicator::Unknown,
            address_range: String::new(),
        }
    }

    pub fn sequence_number(mut self, seq: u32) -> Self {
        self.sequence_number = seq;
        self
    }

    pub fn system_id(mut self, system_id: impl Into<String>) -> Self {
        self.system_id = system_id.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn system_type(mut self, system_type: impl Into<String>) -> Self {
        self.system_type = system_type.into();
        self
    }

    pub fn interface_version(mut self, version: InterfaceVersion) -> Self {
        self.interface_version = version;
        self
    }

    pub fn addr_ton(mut self, ton: TypeOfNumber) -> Self {
        self.addr_ton = ton;
        self
    }

    pub fn addr_npi(mut self, npi: NumericPlanIndicator) -> Self {
        self.addr_npi = npi;
        self
    }

    pub fn address_range(mut self, range: impl Into<String>) -> Self {
        self.address_range = range.into();
        self
    }

    /// Build the request, checking every string against its field size
    pub fn build(self) -> Result<BindRequest, FixedStringError> {
        Ok(BindRequest {
            mode: self.mode,
            sequence_number: self.sequence_number,
            system_id: self.system_id.parse()?,
            password: self.password.parse()?,
            system_type: self.system_type.parse()?,
            interface_version: self.interface_version,
            addr_ton: self.addr_ton,
            addr_npi: self.addr_npi,
            address_range: self.address_range.parse()?,
        })
    }
}

/// The SMSC's answer to a bind request.
///
/// An error response may arrive with an empty body; it decodes with an empty
/// `system_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindResponse {
    pub mode: BindMode,
    pub command_status: u32,
    pub sequence_number: u32,

    /// Identifies the SMSC to the ESME.
    pub system_id: SystemId,

    /// Usually just `sc_interface_version`.
    pub tlvs: Vec<Tlv>,
}

impl BindResponse {
    pub fn new(mode: BindMode, sequence_number: u32, system_id: SystemId) -> Self {
        Self {
            mode,
            command_status: 0,
            sequence_number,
            system_id,
            tlvs: Vec::new(),
        }
    }

    /// The interface version the SMSC advertised, if any.
    pub fn sc_interface_version(&self) -> Option<InterfaceVersion> {
        crate::datatypes::tlv::find(&self.tlvs, crate::datatypes::tags::SC_INTERFACE_VERSION)
            .and_then(Tlv::value_as_u8)
            .map(InterfaceVersion::from)
    }
}

impl Encodable for BindResponse {
    fn pdu_command_id(&self) -> CommandId {
        self.mode.response_id()
    }

    fn command_status(&self) -> u32 {
        self.command_status
    }

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.system_id);
        encode_tlvs(buf, &self.tlvs);
    }
}

impl Decodable for BindResponse {
    /// Nominal id; all three bind response ids are accepted.
    fn command_id() -> CommandId {
        CommandId::BindTransceiverResp
    }

    fn validate_header(header: &PduHeader) -> Result<(), CodecError> {
        BindMode::for_response(header).map(|_| ())
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let mode = BindMode::for_response(header)?;

        let system_id = if buf.has_remaining() {
            decode_cstring(buf, "system_id")?
        } else {
            SystemId::default()
        };

        Ok(BindResponse {
            mode,
            command_status: header.command_status,
            sequence_number: header.sequence_number,
            system_id,
            tlvs: decode_tlvs(buf)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::tags;

    #[test]
    fn bind_transmitter_wire_layout() {
        let bind = BindRequest::builder(BindMode::Transmitter)
            .sequence_number(1)
            .system_id("SMPP3TEST")
            .password("secret08")
            .system_type("SUBMIT1")
            .build()
            .unwrap();

        let bytes = bind.to_bytes();
        assert_eq!(&bytes[4..8], &[0, 0, 0, 0x02]);

        let mut expected = Vec::new();
        expected.extend_from_slice(b"SMPP3TEST\0secret08\0SUBMIT1\0");
        expected.extend_from_slice(&[0x34, 0x00, 0x00, 0x00]);
        assert_eq!(&bytes[16..], expected.as_slice());
        assert_eq!(bytes.len(), 16 + expected.len());

        assert_eq!(BindRequest::from_bytes(&bytes).unwrap(), bind);
    }

    #[test]
    fn all_modes_decode() {
        for mode in [BindMode::Receiver, BindMode::Transmitter, BindMode::Transceiver] {
            let bind = BindRequest::builder(mode).system_id("esme").build().unwrap();
            let decoded = BindRequest::from_bytes(&bind.to_bytes()).unwrap();
            assert_eq!(decoded.mode, mode);
        }
    }

    #[test]
    fn bind_decoders_reject_other_directions() {
        let request = BindRequest::builder(BindMode::Receiver).build().unwrap().to_bytes();
        let response = BindResponse::new(BindMode::Receiver, 1, SystemId::default()).to_bytes();

        assert_eq!(
            BindResponse::from_bytes(&request),
            Err(CodecError::UnsupportedCommandId {
                expected: CommandId::BindTransceiverResp,
                actual: 0x0000_0001,
            })
        );
        assert_eq!(
            BindRequest::from_bytes(&response),
            Err(CodecError::UnsupportedCommandId {
                expected: CommandId::BindTransceiver,
                actual: 0x8000_0001,
            })
        );

        let header = PduHeader::parse(&response).unwrap();
        assert!(BindResponse::validate_header(&header).is_ok());
        assert!(BindRequest::validate_header(&header).is_err());
    }

    #[test]
    fn builder_rejects_long_password() {
        let result = BindRequest::builder(BindMode::Receiver)
            .password("far too long")
            .build();
        assert!(matches!(result, Err(FixedStringError::TooLong { .. })));
    }

    #[test]
    fn response_with_interface_version() {
        let mut resp = BindResponse::new(BindMode::Transceiver, 4, "SMSC".parse().unwrap());
        resp.tlvs
            .push(Tlv::new_u8(tags::SC_INTERFACE_VERSION, 0x34));

        let decoded = BindResponse::from_bytes(&resp.to_bytes()).unwrap();
        assert_eq!(decoded, resp);
        assert_eq!(decoded.sc_interface_version(), Some(InterfaceVersion::SmppV34));
    }

    #[test]
    fn error_response_without_body() {
        let mut bytes = BytesMut::new();
        PduHeader {
            command_length: 16,
            command_id: 0x8000_0002,
            command_status: 0x0E,
            sequence_number: 1,
        }
        .encode(&mut bytes);

        let resp = BindResponse::from_bytes(&bytes).unwrap();
        assert_eq!(resp.mode, BindMode::Transmitter);
        assert_eq!(resp.command_status, 0x0E);
        assert!(resp.system_id.is_empty());
    }
}
