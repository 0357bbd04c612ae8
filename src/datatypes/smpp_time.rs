// ABOUTME: Strongly-typed SMPP absolute and relative time values in YYMMDDhhmmsstnnp format
// ABOUTME: Optional time fields are modelled as Option<SmppTime>; None travels as an empty C-Octet String

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Wire length of a time value, terminator excluded.
pub const SMPP_TIME_LEN: usize = 16;

/// A validated `YYMMDDhhmmsstnnp` time.
///
/// `p` is `+` or `-` for an absolute time with a UTC offset of `nn` quarter
/// hours, or `R` for a time relative to the SMSC's current time.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SmppTime {
    data: [u8; SMPP_TIME_LEN],
}

/// Date and time components for constructing an `SmppTime`
#[derive(Debug, Clone, Copy)]
pub struct TimeComponents {
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub tenth: u8,
    pub utc_offset: u8,
    pub sign: char,
}

impl SmppTime {
    pub fn new(s: &str) -> Result<Self, SmppTimeError> {
        Self::from_bytes(s.as_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SmppTimeError> {
        if bytes.len() != SMPP_TIME_LEN {
            return Err(SmppTimeError::InvalidLength {
                actual: bytes.len(),
            });
        }

        for (position, &byte) in bytes.iter().enumerate() {
            let ok = match position {
                0..=14 => byte.is_ascii_digit(),
                _ => matches!(byte, b'+' | b'-' | b'R'),
            };
            if !ok {
                return Err(SmppTimeError::InvalidCharacter {
                    position,
                    character: byte as char,
                });
            }
        }

        let mut data = [0u8; SMPP_TIME_LEN];
        data.copy_from_slice(bytes);
        let time = Self { data };

        // Relative times are durations, so zero months and days are valid there.
        if !time.is_relative() {
            check_range("month", time.month(), 1, 12)?;
            check_range("day", time.day(), 1, 31)?;
            check_range("hour", time.hour(), 0, 23)?;
            check_range("minute", time.minute(), 0, 59)?;
            check_range("second", time.second(), 0, 59)?;
            check_range("UTC offset", time.utc_offset(), 0, 48)?;
        }

        Ok(time)
    }

    pub fn from_components(c: TimeComponents) -> Result<Self, SmppTimeError> {
        let s = format!(
            "{:02}{:02}{:02}{:02}{:02}{:02}{}{:02}{}",
            c.year, c.month, c.day, c.hour, c.minute, c.second, c.tenth, c.utc_offset, c.sign
        );
        Self::new(&s)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_str(&self) -> &str {
        // Every byte was checked to be ASCII on construction.
        std::str::from_utf8(&self.data).unwrap_or_default()
    }

    pub fn is_relative(&self) -> bool {
        self.data[15] == b'R'
    }

    pub fn year(&self) -> u8 {
        self.two_digits(0)
    }

    pub fn month(&self) -> u8 {
        self.two_digits(2)
    }

    pub fn day(&self) -> u8 {
        self.two_digits(4)
    }

    pub fn hour(&self) -> u8 {
        self.two_digits(6)
    }

    pub fn minute(&self) -> u8 {
        self.two_digits(8)
    }

    pub fn second(&self) -> u8 {
        self.two_digits(10)
    }

    pub fn tenth(&self) -> u8 {
        self.data[12] - b'0'
    }

    /// Offset from UTC in quarter hours.
    pub fn utc_offset(&self) -> u8 {
        self.two_digits(13)
    }

    /// `+`, `-` or `R`.
    pub fn sign(&self) -> char {
        self.data[15] as char
    }

    fn two_digits(&self, at: usize) -> u8 {
        (self.data[at] - b'0') * 10 + (self.data[at + 1] - b'0')
    }
}

fn check_range(field: &'static str, value: u8, min: u8, max: u8) -> Result<(), SmppTimeError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SmppTimeError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl fmt::Display for SmppTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for SmppTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SmppTime(\"{}\")", self.as_str())
    }
}

impl FromStr for SmppTime {
    type Err = SmppTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for SmppTime {
    type Error = SmppTimeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmppTimeError {
    #[error("Invalid time length: {actual} chars (expected 16)")]
    InvalidLength { actual: usize },

    #[error("Invalid character '{character}' at position {position}")]
    InvalidCharacter { position: usize, character: char },

    #[error("Invalid {field} value: {value} (must be {min}-{max})")]
    OutOfRange {
        field: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },
}
