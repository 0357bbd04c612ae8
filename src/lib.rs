//! SMPP v3.4 / v5.0 PDU codec and long-message segmentation.
//!
//! [`codec`] holds the header, the `Encodable`/`Decodable` traits and the
//! shared field readers and writers. [`datatypes`] has one module per PDU
//! family. [`frame::Frame`] is the closed union used to decode a PDU whose
//! type is not known in advance, and [`splitter`] turns long text into the
//! short_message parts of a concatenated SMS.
//!
//! ```rust
//! use smpp_codec::datatypes::{SubmitSm, Tlv, tags};
//! use smpp_codec::{Decodable, Encodable};
//!
//! let pdu = SubmitSm::builder()
//!     .sequence_number(2)
//!     .source_addr("123456")
//!     .destination_addr("9876543210")
//!     .short_message("Hello SubmitSm")
//!     .tlv(Tlv::new_u16(tags::USER_MESSAGE_REFERENCE, 1))
//!     .build()?;
//!
//! let bytes = pdu.to_bytes();
//! assert_eq!(SubmitSm::from_bytes(&bytes)?, pdu);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod connection;
pub mod datatypes;
pub mod frame;
mod macros;
pub mod splitter;


pub use codec::{CodecError, Decodable, Encodable, PduHeader};
pub use connection::Connection;
pub use frame::{Frame, UnknownPdu};
pub use splitter::{Encoding, MessageSplitter, SplitError, SplitMode, SplitResult, split_message};

/// Error returned by the async transport.
///
/// Codec and splitter functions return their own typed errors; this boxed
/// form only collects I/O and framing failures in [`Connection`].
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// A specialized `Result` type for SMPP transport operations.
pub type Result<T> = std::result::Result<T, Error>;
