//! The purpose of the outbind operation is to allow the SMSC to signal an
//! ESME to originate a bind_receiver request to the SMSC, for example when
//! the SMSC has outstanding messages for delivery to the ESME.
//!
//! The ESME answers with bind_receiver rather than an outbind response; if it
//! does not accept the session it simply drops the connection.

use crate::codec::{
    CodecError, Decodable, Encodable, PduHeader, decode_cstring, encode_cstring, expect_end,
};
use crate::datatypes::{CommandId, Password, SystemId};
use bytes::BytesMut;
use std::io::Cursor;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outbind {
    pub sequence_number: u32,
    /// Identifies the SMSC to the ESME.
    pub system_id: SystemId,
    /// Empty when no password is required.
    pub password: Password,
}

impl Outbind {
    pub fn new(sequence_number: u32, system_id: SystemId, password: Password) -> Self {
        Self {
            sequence_number,
            system_id,
            password,
        }
    }
}

impl Encodable for Outbind {
    fn pdu_command_id(&self) -> CommandId {
        CommandId::Outbind
    }

    fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        encode_cstring(buf, &self.system_id);
        encode_cstring(buf, &self.password);
    }
}

impl Decodable for Outbind {
    fn command_id() -> CommandId {
        CommandId::Outbind
    }

    fn decode(header: &PduHeader, buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        Self::validate_header(header)?;
        let pdu = Outbind {
            sequence_number: header.sequence_number,
            system_id: decode_cstring(buf, "system_id")?,
            password: decode_cstring(buf, "password")?,
        };
        expect_end(buf, "outbind")?;
        Ok(pdu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbind_round_trip() {
        let pdu = Outbind::new(3, "SMSC".parse().unwrap(), Password::default());
        let bytes = pdu.to_bytes();
        assert_eq!(&bytes[16..], b"SMSC\0\0");
        assert_eq!(Outbind::from_bytes(&bytes).unwrap(), pdu);
    }

    #[test]
    fn missing_password_terminator() {
        let pdu = Outbind::new(3, "SMSC".parse().unwrap(), "pw".parse().unwrap());
        let mut bytes = pdu.to_bytes().to_vec();
        bytes.pop();
        bytes[3] -= 1;
        assert_eq!(
            Outbind::from_bytes(&bytes),
            Err(CodecError::MalformedField {
                field: "password",
                reason: "missing NUL terminator"
            })
        );
    }
}
