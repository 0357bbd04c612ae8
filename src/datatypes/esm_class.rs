//! Bit values for the esm_class octet.
//!
//! esm_class is carried as a plain `u8`; these constants name the bits this
//! crate sets or inspects.

/// Message mode mask (bits 1-0).
pub const MESSAGE_MODE_MASK: u8 = 0b0000_0011;
pub const DEFAULT_MODE: u8 = 0b0000_0000;
pub const DATAGRAM_MODE: u8 = 0b0000_0001;
pub const FORWARD_MODE: u8 = 0b0000_0010;
pub const STORE_AND_FORWARD_MODE: u8 = 0b0000_0011;

/// Message type mask (bits 5-2).
pub const MESSAGE_TYPE_MASK: u8 = 0b0011_1100;
/// Set by the SMSC on a deliver_sm that carries a delivery receipt.
pub const DELIVERY_RECEIPT: u8 = 0b0000_0100;
pub const INTERMEDIATE_NOTIFICATION: u8 = 0b0010_0000;

/// User Data Header Indicator: the short_message begins with a UDH.
pub const UDHI: u8 = 0b0100_0000;
pub const REPLY_PATH: u8 = 0b1000_0000;

pub fn has_udhi(esm_class: u8) -> bool {
    esm_class & UDHI != 0
}

pub fn is_delivery_receipt(esm_class: u8) -> bool {
    esm_class & MESSAGE_TYPE_MASK == DELIVERY_RECEIPT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits() {
        assert!(has_udhi(UDHI | STORE_AND_FORWARD_MODE));
        assert!(!has_udhi(DEFAULT_MODE));
        assert!(is_delivery_receipt(DELIVERY_RECEIPT));
        assert!(!is_delivery_receipt(INTERMEDIATE_NOTIFICATION));
    }
}
