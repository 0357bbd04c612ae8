// ABOUTME: SMPP v3.4/v5.0 field types and PDU structures
// ABOUTME: Each PDU module implements Encodable and Decodable from crate::codec

mod alert_notification;
mod bind;
mod broadcast_sm;
mod c_octet_string;
mod cancel_broadcast_sm;
mod cancel_sm;
pub mod command_id;
mod command_status;
mod data_sm;
mod deliver_sm;
mod delivery_receipt;
mod enquire_link;
pub mod esm_class;
mod generic_nack;
mod interface_version;
mod message_state;
mod numeric_plan_indicator;
mod outbind;
mod query_broadcast_sm;
mod query_sm;
mod replace_sm;
mod smpp_time;
mod submit_multi;
mod submit_sm;
pub mod tlv;
mod type_of_number;
mod unbind;

pub use alert_notification::AlertNotification;
pub use bind::{BindMode, BindRequest, BindRequestBuilder, BindResponse};
pub use broadcast_sm::{BroadcastSm, BroadcastSmResponse};
pub use c_octet_string::{
    Address, AddressRange, COctetString, DistributionListName, FixedStringError, MessageId,
    Password, ServiceType, ShortMessage, SystemId, SystemType, WideAddress,
};
pub use cancel_broadcast_sm::{CancelBroadcastSm, CancelBroadcastSmResponse};
pub use cancel_sm::{CancelSm, CancelSmResponse};
pub use command_id::CommandId;
pub use command_status::{CommandStatus, status_description};
pub use data_sm::{DataSm, DataSmResponse};
pub use deliver_sm::{DeliverSm, DeliverSmBuilder, DeliverSmResponse};
pub use delivery_receipt::{DeliveryReceipt, DeliveryReceiptError};
pub use enquire_link::{EnquireLink, EnquireLinkResponse};
pub use generic_nack::GenericNack;
pub use interface_version::InterfaceVersion;
pub use message_state::MessageState;
pub use numeric_plan_indicator::{Npi, NumericPlanIndicator};
pub use outbind::Outbind;
pub use query_broadcast_sm::{QueryBroadcastSm, QueryBroadcastSmResponse};
pub use query_sm::{QuerySm, QuerySmResponse};
pub use replace_sm::{ReplaceSm, ReplaceSmResponse};
pub use smpp_time::{SMPP_TIME_LEN, SmppTime, SmppTimeError, TimeComponents};
pub use submit_multi::{
    Destination, OctetCountedList, SubmitMulti, SubmitMultiResponse, UnsuccessfulDelivery,
};
pub use submit_sm::{SubmitSm, SubmitSmBuilder, SubmitSmResponse};
pub use tlv::{Tlv, tags};
pub use type_of_number::{Ton, TypeOfNumber};
pub use unbind::{Unbind, UnbindResponse};
