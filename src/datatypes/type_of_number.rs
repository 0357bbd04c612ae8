use crate::macros::impl_wire_value_eq;
use num_enum::FromPrimitive;

/// Type of Number (TON) for an SME address.
///
/// Values outside the table decode to `Unrecognized` and re-encode unchanged.
#[derive(FromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug)]
pub enum TypeOfNumber {
    Unknown = 0b0000_0000,
    International = 0b0000_0001,
    National = 0b0000_0010,
    NetworkSpecific = 0b0000_0011,
    SubscriberNumber = 0b0000_0100,
    Alphanumeric = 0b0000_0101,
    Abbreviated = 0b0000_0110,
    #[num_enum(catch_all)]
    Unrecognized(u8),
}

pub type Ton = TypeOfNumber;

// A derived `#[default]` is rejected next to num_enum's `catch_all`.
impl Default for TypeOfNumber {
    fn default() -> Self {
        TypeOfNumber::Unknown
    }
}

impl_wire_value_eq!(TypeOfNumber);

impl From<TypeOfNumber> for u8 {
    fn from(ton: TypeOfNumber) -> Self {
        match ton {
            TypeOfNumber::Unknown => 0x00,
            TypeOfNumber::International => 0x01,
            TypeOfNumber::National => 0x02,
            TypeOfNumber::NetworkSpecific => 0x03,
            TypeOfNumber::SubscriberNumber => 0x04,
            TypeOfNumber::Alphanumeric => 0x05,
            TypeOfNumber::Abbreviated => 0x06,
            TypeOfNumber::Unrecognized(raw) => raw,
        }
    }
}
