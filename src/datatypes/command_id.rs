use num_enum::TryFromPrimitive;

/// Bit set on every response command_id.
pub const RESPONSE_BIT: u32 = 0x8000_0000;

/// The command table. Every PDU this crate models has exactly one entry here;
/// ids that are absent decode to `Frame::Unknown` rather than failing.
#[derive(TryFromPrimitive)]
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommandId {
    GenericNack = 0x8000_0000,
    BindReceiver = 0x0000_0001,
    BindReceiverResp = 0x8000_0001,
    BindTransmitter = 0x0000_0002,
    BindTransmitterResp = 0x8000_0002,
    QuerySm = 0x0000_0003,
    QuerySmResp = 0x8000_0003,
    SubmitSm = 0x0000_0004,
    SubmitSmResp = 0x8000_0004,
    DeliverSm = 0x0000_0005,
    DeliverSmResp = 0x8000_0005,
    Unbind = 0x0000_0006,
    UnbindResp = 0x8000_0006,
    ReplaceSm = 0x0000_0007,
    ReplaceSmResp = 0x8000_0007,
    CancelSm = 0x0000_0008,
    CancelSmResp = 0x8000_0008,
    BindTransceiver = 0x0000_0009,
    BindTransceiverResp = 0x8000_0009,
    // Reserved 0x0000000A - 0x8000000A
    Outbind = 0x0000_000B,
    // Reserved 0x0000000C - 0x00000014
    //          0x8000000B - 0x80000014
    EnquireLink = 0x0000_0015,
    EnquireLinkResp = 0x8000_0015,
    // Reserved 0x00000016 - 0x00000020
    //          0x80000016 - 0x80000020
    SubmitMulti = 0x0000_0021,
    SubmitMultiResp = 0x8000_0021,
    // Reserved 0x00000022 - 0x000000FF
    //          0x80000022 - 0x800000FF
    AlertNotification = 0x0000_0102,
    // Reserved 0x80000102 (alert_notification has no response)
    DataSm = 0x0000_0103,
    DataSmResp = 0x8000_0103,
    // Reserved 0x00000104 - 0x00000110
    BroadcastSm = 0x0000_0111,
    BroadcastSmResp = 0x8000_0111,
    QueryBroadcastSm = 0x0000_0112,
    QueryBroadcastSmResp = 0x8000_0112,
    CancelBroadcastSm = 0x0000_0113,
    CancelBroadcastSmResp = 0x8000_0113,
    // Reserved for SMPP extension
    //          0x00000114 - 0x0000FFFF
    // Reserved for SMSC Vendor
    //          0x00010200 - 0x000102FF
}

impl CommandId {
    /// Check if this command_id represents a response PDU
    pub fn is_response(self) -> bool {
        is_response(self as u32)
    }

    /// The response id paired with this request id.
    ///
    /// Returns `None` for responses and for requests that have no response
    /// (alert_notification, outbind).
    pub fn response(self) -> Option<CommandId> {
        if self.is_response() {
            return None;
        }
        CommandId::try_from(self as u32 | RESPONSE_BIT).ok()
    }

    /// The protocol name of the PDU, e.g. `submit_sm_resp`.
    pub fn name(self) -> &'static str {
        match self {
            CommandId::GenericNack => "generic_nack",
            CommandId::BindReceiver => "bind_receiver",
            CommandId::BindReceiverResp => "bind_receiver_resp",
            CommandId::BindTransmitter => "bind_transmitter",
            CommandId::BindTransmitterResp => "bind_transmitter_resp",
            CommandId::QuerySm => "query_sm",
            CommandId::QuerySmResp => "query_sm_resp",
            CommandId::SubmitSm => "submit_sm",
            CommandId::SubmitSmResp => "submit_sm_resp",
            CommandId::DeliverSm => "deliver_sm",
            CommandId::DeliverSmResp => "deliver_sm_resp",
            CommandId::Unbind => "unbind",
            CommandId::UnbindResp => "unbind_resp",
            CommandId::ReplaceSm => "replace_sm",
            CommandId::ReplaceSmResp => "replace_sm_resp",
            CommandId::CancelSm => "cancel_sm",
            CommandId::CancelSmResp => "cancel_sm_resp",
            CommandId::BindTransceiver => "bind_transceiver",
            CommandId::BindTransceiverResp => "bind_transceiver_resp",
            CommandId::Outbind => "outbind",
            CommandId::EnquireLink => "enquire_link",
            CommandId::EnquireLinkResp => "enquire_link_resp",
            CommandId::SubmitMulti => "submit_multi",
            CommandId::SubmitMultiResp => "submit_multi_resp",
            CommandId::AlertNotification => "alert_notification",
            CommandId::DataSm => "data_sm",
            CommandId::DataSmResp => "data_sm_resp",
            CommandId::BroadcastSm => "broadcast_sm",
            CommandId::BroadcastSmResp => "broadcast_sm_resp",
            CommandId::QueryBroadcastSm => "query_broadcast_sm",
            CommandId::QueryBroadcastSmResp => "query_broadcast_sm_resp",
            CommandId::CancelBroadcastSm => "cancel_broadcast_sm",
            CommandId::CancelBroadcastSmResp => "cancel_broadcast_sm_resp",
        }
    }
}

impl From<CommandId> for u32 {
    fn from(id: CommandId) -> Self {
        id as u32
    }
}

/// Response check on a raw id, usable for ids outside the command table.
pub fn is_response(raw: u32) -> bool {
    raw & RESPONSE_BIT != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_ids_are_request_ids_with_high_bit() {
        assert_eq!(CommandId::SubmitSm.response(), Some(CommandId::SubmitSmResp));
        assert_eq!(
            CommandId::BroadcastSm.response(),
            Some(CommandId::BroadcastSmResp)
        );
        assert_eq!(CommandId::AlertNotification.response(), None);
        assert_eq!(CommandId::Outbind.response(), None);
        assert_eq!(CommandId::SubmitSmResp.response(), None);
    }

    #[test]
    fn unknown_ids_are_rejected_by_table() {
        assert!(CommandId::try_from(0x0000_000Au32).is_err());
        assert!(CommandId::try_from(0x8000_0102u32).is_err());
        assert_eq!(
            CommandId::try_from(0x0000_0113u32).ok(),
            Some(CommandId::CancelBroadcastSm)
        );
    }

    #[test]
    fn is_response_on_raw_values() {
        assert!(is_response(0x8001_0200));
        assert!(!is_response(0x0001_0200));
        assert!(CommandId::GenericNack.is_response());
    }
}
