use crate::datatypes::CommandId;
use crate::macros::{impl_header_only_request, impl_header_only_response};

/// Keep-alive probe; either peer may send it at any time on a bound session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnquireLink {
    pub sequence_number: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnquireLinkResponse {
    pub command_status: u32,
    pub sequence_number: u32,
}

impl_header_only_request!(EnquireLink, CommandId::EnquireLink);
impl_header_only_response!(EnquireLinkResponse, CommandId::EnquireLinkResp);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{CodecError, Decodable, Encodable};

    #[test]
    fn enquire_link_is_header_only() {
        let bytes = EnquireLink::new(7).to_bytes();
        assert_eq!(
            bytes.as_ref(),
            &[0, 0, 0, 16, 0, 0, 0, 0x15, 0, 0, 0, 0, 0, 0, 0, 7]
        );
        assert_eq!(EnquireLink::from_bytes(&bytes).unwrap(), EnquireLink::new(7));
    }

    #[test]
    fn response_keeps_status() {
        let resp = EnquireLinkResponse::error(9, crate::datatypes::CommandStatus::SystemError);
        let decoded = EnquireLinkResponse::from_bytes(&resp.to_bytes()).unwrap();
        assert_eq!(decoded.command_status, 8);
    }

    #[test]
    fn body_is_rejected() {
        let mut bytes = EnquireLink::new(1).to_bytes().to_vec();
        bytes.push(0);
        bytes[3] = 17;
        assert!(matches!(
            EnquireLink::from_bytes(&bytes),
            Err(CodecError::MalformedField { .. })
        ));
    }

    #[test]
    fn wrong_command_id() {
        let bytes = EnquireLinkResponse::new(1).to_bytes();
        assert_eq!(
            EnquireLink::from_bytes(&bytes),
            Err(CodecError::UnsupportedCommandId {
                expected: CommandId::EnquireLink,
                actual: 0x8000_0015
            })
        );
    }
}
