use crate::macros::impl_wire_value_eq;
use num_enum::FromPrimitive;

/// Numbering Plan Indicator (NPI) for an SME address.
#[derive(FromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug)]
pub enum NumericPlanIndicator {
    Unknown = 0b0000_0000,
    Isdn = 0b0000_0001,
    Data = 0b0000_0011,
    Telex = 0b0000_0100,
    LandMobile = 0b0000_0110,
    National = 0b0000_1000,
    Private = 0b0000_1001,
    Ermes = 0b0000_1010,
    Internet = 0b0000_1110,
    WapClientId = 0b0001_0010,
    #[num_enum(catch_all)]
    Unrecognized(u8),
}

pub type Npi = NumericPlanIndicator;

// A derived `#[default]` is rejected next to num_enum's `catch_all`.
impl Default for NumericPlanIndicator {
    fn default() -> Self {
        NumericPlanIndicator::Unknown
    }
}

impl_wire_value_eq!(NumericPlanIndicator);

impl From<NumericPlanIndicator> for u8 {
    fn from(npi: NumericPlanIndicator) -> Self {
        match npi {
            NumericPlanIndicator::Unknown => 0x00,
            NumericPlanIndicator::Isdn => 0x01,
            NumericPlanIndicator::Data => 0x03,
            NumericPlanIndicator::Telex => 0x04,
            NumericPlanIndicator::LandMobile => 0x06,
            NumericPlanIndicator::National => 0x08,
            NumericPlanIndicator::Private => 0x09,
            NumericPlanIndicator::Ermes => 0x0A,
            NumericPlanIndicator::Internet => 0x0E,
            NumericPlanIndicator::WapClientId => 0x12,
            NumericPlanIndicator::Unrecognized(raw) => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_byte_survives() {
        for raw in 0..=u8::MAX {
            assert_eq!(u8::from(NumericPlanIndicator::from(raw)), raw);
        }
    }

    #[test]
    fn isdn() {
        assert_eq!(NumericPlanIndicator::from(1u8), NumericPlanIndicator::Isdn);
    }
}
