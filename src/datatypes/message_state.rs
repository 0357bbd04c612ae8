use crate::macros::impl_wire_value_eq;
use num_enum::FromPrimitive;
use std::fmt;
use std::str::FromStr;

/// State of a submitted message, as reported by query_sm_resp, the
/// message_state TLV and delivery receipts.
#[derive(FromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug)]
pub enum MessageState {
    Scheduled = 0,
    Enroute = 1,
    Delivered = 2,
    Expired = 3,
    Deleted = 4,
    Undeliverable = 5,
    Accepted = 6,
    Unknown = 7,
    Rejected = 8,
    Skipped = 9,
    #[num_enum(catch_all)]
    Unrecognized(u8),
}

impl MessageState {
    /// The seven character form used in the `stat:` field of delivery receipts.
    pub fn abbreviation(self) -> &'static str {
        match self.canonical() {
            MessageState::Scheduled => "SCHEDUL",
            MessageState::Enroute => "ENROUTE",
            MessageState::Delivered => "DELIVRD",
            MessageState::Expired => "EXPIRED",
            MessageState::Deleted => "DELETED",
            MessageState::Undeliverable => "UNDELIV",
            MessageState::Accepted => "ACCEPTD",
            MessageState::Unknown | MessageState::Unrecognized(_) => "UNKNOWN",
            MessageState::Rejected => "REJECTD",
            MessageState::Skipped => "SKIPPED",
        }
    }

    /// The named variant for a known value held in `Unrecognized`.
    fn canonical(self) -> Self {
        MessageState::from(u8::from(self))
    }

    /// No further state changes will be reported.
    pub fn is_final(self) -> bool {
        !matches!(
            self.canonical(),
            MessageState::Scheduled | MessageState::Enroute | MessageState::Accepted
        )
    }
}

// A derived `#[default]` is rejected next to num_enum's `catch_all`.
impl Default for MessageState {
    fn default() -> Self {
        MessageState::Unknown
    }
}

impl_wire_value_eq!(MessageState);

impl From<MessageState> for u8 {
    fn from(state: MessageState) -> Self {
        match state {
            MessageState::Scheduled => 0,
            MessageState::Enroute => 1,
            MessageState::Delivered => 2,
            MessageState::Expired => 3,
            MessageState::Deleted => 4,
            MessageState::Undeliverable => 5,
            MessageState::Accepted => 6,
            MessageState::Unknown => 7,
            MessageState::Rejected => 8,
            MessageState::Skipped => 9,
            MessageState::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for MessageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for MessageState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let state = match s {
            "SCHEDUL" => MessageState::Scheduled,
            "ENROUTE" => MessageState::Enroute,
            "DELIVRD" => MessageState::Delivered,
            "EXPIRED" => MessageState::Expired,
            "DELETED" => MessageState::Deleted,
            "UNDELIV" => MessageState::Undeliverable,
            "ACCEPTD" => MessageState::Accepted,
            "UNKNOWN" => MessageState::Unknown,
            "REJECTD" => MessageState::Rejected,
            "SKIPPED" => MessageState::Skipped,
            _ => return Err(()),
        };
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values() {
        assert_eq!(MessageState::from(2u8), MessageState::Delivered);
        assert_eq!(u8::from(MessageState::Rejected), 8);
        assert_eq!(MessageState::from(0x20u8), MessageState::Unrecognized(0x20));
    }

    #[test]
    fn unrecognized_known_value_is_the_named_state() {
        let state = MessageState::Unrecognized(2);
        assert_eq!(state, MessageState::Delivered);
        assert_eq!(state.abbreviation(), "DELIVRD");
        assert!(state.is_final());
        assert_ne!(MessageState::Unrecognized(0x20), MessageState::Unknown);
    }

    #[test]
    fn abbreviations_parse_back() {
        for raw in 0..=9u8 {
            let state = MessageState::from(raw);
            assert_eq!(state.abbreviation().parse::<MessageState>(), Ok(state));
        }
    }
}
