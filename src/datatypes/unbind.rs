use crate::datatypes::CommandId;
use crate::macros::{impl_header_only_request, impl_header_only_response};

/// Ends a bound session. Either side may send it; the peer answers with
/// unbind_resp before the connection is closed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unbind {
    pub sequence_number: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnbindResponse {
    pub command_status: u32,
    pub sequence_number: u32,
}

impl_header_only_request!(Unbind, CommandId::Unbind);
impl_header_only_response!(UnbindResponse, CommandId::UnbindResp);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Decodable, Encodable};

    #[test]
    fn unbind_round_trip() {
        let pdu = Unbind::new(0xFFFF_FFFF);
        assert_eq!(Unbind::from_bytes(&pdu.to_bytes()).unwrap(), pdu);

        let resp = UnbindResponse::new(3);
        let bytes = resp.to_bytes();
        assert_eq!(&bytes[4..8], &[0x80, 0, 0, 0x06]);
        assert_eq!(UnbindResponse::from_bytes(&bytes).unwrap(), resp);
    }
}
