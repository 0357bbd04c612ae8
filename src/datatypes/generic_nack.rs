use crate::codec::CodecError;
use crate::datatypes::{CommandId, CommandStatus};
use crate::macros::impl_header_only_response;

/// GenericNack is used to acknowledge the receipt of a PDU when the receiving
/// entity cannot process the PDU due to errors such as invalid command_id,
/// invalid command_length, or other format errors.
///
/// It is typically sent in response to a malformed PDU where the command_id
/// cannot be determined or the PDU cannot be parsed correctly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericNack {
    /// The reason for the generic_nack
    pub command_status: u32,
    /// The sequence_number from the original PDU that caused the error.
    /// If the original sequence_number cannot be determined, this should be 0.
    pub sequence_number: u32,
}

impl_header_only_response!(GenericNack, CommandId::GenericNack);

impl GenericNack {
    pub fn invalid_command_id(sequence_number: u32) -> Self {
        Self::error(sequence_number, CommandStatus::InvalidCommandId)
    }

    pub fn invalid_command_length(sequence_number: u32) -> Self {
        Self::error(sequence_number, CommandStatus::InvalidCommandLength)
    }

    /// The nack a peer should send after failing to decode a PDU.
    pub fn for_decode_error(sequence_number: u32, err: &CodecError) -> Self {
        Self::error(sequence_number, err.to_command_status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Decodable, Encodable};

    #[test]
    fn generic_nack_wire_form() {
        let nack = GenericNack::invalid_command_id(5);
        let bytes = nack.to_bytes();
        assert_eq!(
            bytes.as_ref(),
            &[0, 0, 0, 16, 0x80, 0, 0, 0, 0, 0, 0, 0x03, 0, 0, 0, 5]
        );
        assert_eq!(GenericNack::from_bytes(&bytes).unwrap(), nack);
    }

    #[test]
    fn nack_from_decode_error() {
        let err = CodecError::TruncatedHeader { available: 3 };
        let nack = GenericNack::for_decode_error(0, &err);
        assert_eq!(nack.command_status, CommandStatus::InvalidCommandLength as u32);
    }
}
