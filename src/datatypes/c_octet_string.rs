// ABOUTME: Bounded C-Octet String and short_message field types for SMPP PDU bodies
// ABOUTME: Content is validated NUL-free at construction so encoding never fails

use std::fmt;
use std::str;
use std::str::FromStr;
use thiserror::Error;

/// A NUL-terminated string field whose wire form, terminator included, is at
/// most `N` octets.
///
/// The content is stored inline and padded with zeros, so the type is `Copy`
/// and two values compare equal exactly when their contents do.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct COctetString<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> COctetString<N> {
    /// Largest content length, the terminator excluded.
    pub const MAX_LEN: usize = N - 1;

    pub fn new(s: &[u8]) -> Result<Self, FixedStringError> {
        if s.len() >= N {
            return Err(FixedStringError::TooLong {
                max_len: N - 1,
                actual_len: s.len(),
            });
        }
        if let Some(position) = s.iter().position(|&b| b == 0) {
            return Err(FixedStringError::EmbeddedNul { position });
        }

        let mut data = [0u8; N];
        data[..s.len()].copy_from_slice(s);
        Ok(Self { data })
    }

    /// Returns the string content as a byte slice, excluding null padding
    pub fn as_bytes(&self) -> &[u8] {
        let len = self.data.iter().position(|&b| b == 0).unwrap_or(N);
        &self.data[..len]
    }

    pub fn as_str(&self) -> Result<&str, str::Utf8Error> {
        str::from_utf8(self.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data[0] == 0
    }

    /// Size on the wire: content plus the terminating NUL.
    pub fn encoded_len(&self) -> usize {
        self.len() + 1
    }
}

impl<const N: usize> fmt::Display for COctetString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Ok(s) => write!(f, "{s}"),
            Err(_) => write!(f, "<invalid UTF-8>"),
        }
    }
}

impl<const N: usize> fmt::Debug for COctetString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Ok(s) => write!(f, "COctetString<{N}>(\"{s}\")"),
            Err(_) => write!(f, "COctetString<{}>({:?})", N, self.as_bytes()),
        }
    }
}

impl<const N: usize> Default for COctetString<N> {
    fn default() -> Self {
        Self { data: [0u8; N] }
    }
}

impl<const N: usize> TryFrom<&str> for COctetString<N> {
    type Error = FixedStringError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s.as_bytes())
    }
}

impl<const N: usize> TryFrom<String> for COctetString<N> {
    type Error = FixedStringError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s.as_bytes())
    }
}

impl<const N: usize> FromStr for COctetString<N> {
    type Err = FixedStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.as_bytes())
    }
}

impl<const N: usize> AsRef<[u8]> for COctetString<N> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<const N: usize> PartialEq<str> for COctetString<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> PartialEq<&str> for COctetString<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

/// Errors raised while building string and octet fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixedStringError {
    #[error("String too long: {actual_len} bytes (max {max_len})")]
    TooLong { max_len: usize, actual_len: usize },

    #[error("String contains a NUL byte at position {position}")]
    EmbeddedNul { position: usize },
}

// Sizes include the NUL terminator.
pub type ServiceType = COctetString<6>;
pub type Address = COctetString<21>;
pub type WideAddress = COctetString<65>;
pub type SystemId = COctetString<16>;
pub type Password = COctetString<9>;
pub type SystemType = COctetString<13>;
pub type AddressRange = COctetString<41>;
pub type MessageId = COctetString<65>;
pub type DistributionListName = COctetString<21>;

/// The short_message field: up to 254 octets of arbitrary data whose length
/// travels in the preceding sm_length octet.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ShortMessage {
    data: [u8; 254],
    length: u8,
}

impl ShortMessage {
    pub const MAX_LEN: usize = 254;

    pub fn new(data: &[u8]) -> Result<Self, FixedStringError> {
        if data.len() > Self::MAX_LEN {
            return Err(FixedStringError::TooLong {
                max_len: Self::MAX_LEN,
                actual_len: data.len(),
            });
        }

        let mut msg_data = [0u8; 254];
        msg_data[..data.len()].copy_from_slice(data);
        Ok(Self {
            data: msg_data,
            length: data.len() as u8,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.length as usize]
    }

    pub fn as_str(&self) -> Result<&str, str::Utf8Error> {
        str::from_utf8(self.as_bytes())
    }

    /// The sm_length value.
    pub fn len(&self) -> u8 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl fmt::Debug for ShortMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Ok(s) => write!(f, "ShortMessage(\"{s}\")"),
            Err(_) => write!(f, "ShortMessage({:?})", self.as_bytes()),
        }
    }
}

impl Default for ShortMessage {
    fn default() -> Self {
        Self {
            data: [0u8; 254],
            length: 0,
        }
    }
}

impl TryFrom<&[u8]> for ShortMessage {
    type Error = FixedStringError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        Self::new(data)
    }
}

impl FromStr for ShortMessage {
    type Err = FixedStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_octet_string_creation() {
        let system_id = "test_system".parse::<SystemId>().unwrap();
        assert_eq!(system_id.as_str().unwrap(), "test_system");
        assert_eq!(system_id.len(), 11);
        assert_eq!(system_id.encoded_len(), 12);
    }

    #[test]
    fn test_limit_counts_the_terminator() {
        assert!("12345678".parse::<Password>().is_ok());
        let result = "123456789".parse::<Password>();
        assert_eq!(
            result,
            Err(FixedStringError::TooLong {
                max_len: 8,
                actual_len: 9
            })
        );
    }

    #[test]
    fn test_embedded_nul_rejected() {
        let result = Address::new(b"12\x0034");
        assert_eq!(result, Err(FixedStringError::EmbeddedNul { position: 2 }));
    }

    #[test]
    fn test_display_and_compare() {
        let addr: Address = "447700900123".parse().unwrap();
        assert_eq!(format!("{addr}"), "447700900123");
        assert_eq!(addr, "447700900123");
    }

    #[test]
    fn test_empty() {
        let empty = SystemId::default();
        assert!(empty.is_empty());
        assert_eq!(empty.encoded_len(), 1);
    }

    #[test]
    fn test_short_message() {
        let msg = "Hello, world!".parse::<ShortMessage>().unwrap();
        assert_eq!(msg.as_bytes(), b"Hello, world!");
        assert_eq!(msg.len(), 13);

        assert!(ShortMessage::new(&[0u8; 254]).is_ok());
        assert!(matches!(
            ShortMessage::new(&[0u8; 255]),
            Err(FixedStringError::TooLong { .. })
        ));
    }
}
