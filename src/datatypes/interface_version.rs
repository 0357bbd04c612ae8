use crate::macros::impl_wire_value_eq;
use num_enum::FromPrimitive;

/// This parameter is used to indicate the version of the SMPP protocol.
#[derive(FromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug)]
pub enum InterfaceVersion {
    SmppV33 = 0x33,
    SmppV34 = 0x34,
    SmppV50 = 0x50,
    #[num_enum(catch_all)]
    Unrecognized(u8),
}

// A derived `#[default]` is rejected next to num_enum's `catch_all`.
impl Default for InterfaceVersion {
    fn default() -> Self {
        InterfaceVersion::SmppV34
    }
}

impl_wire_value_eq!(InterfaceVersion);

impl From<InterfaceVersion> for u8 {
    fn from(version: InterfaceVersion) -> Self {
        match version {
            InterfaceVersion::SmppV33 => 0x33,
            InterfaceVersion::SmppV34 => 0x34,
            InterfaceVersion::SmppV50 => 0x50,
            InterfaceVersion::Unrecognized(raw) => raw,
        }
    }
}
