// ABOUTME: Macros that remove boilerplate from SMPP PDU implementations
// ABOUTME: Covers header-only requests and responses plus builder setters

/// Encodable/Decodable plus a `new` constructor for a request PDU that has no
/// body. The struct must have a single `sequence_number: u32` field.
macro_rules! impl_header_only_request {
    ($pdu_type:ident, $command_id:expr) => {
        impl $pdu_type {
            pub fn new(sequence_number: u32) -> Self {
                Self { sequence_number }
            }
        }

        impl $crate::codec::Encodable for $pdu_type {
            fn pdu_command_id(&self) -> $crate::datatypes::CommandId {
                $command_id
            }

            fn sequence_number(&self) -> u32 {
                self.sequence_number
            }

            fn encode_body(&self, _buf: &mut bytes::BytesMut) {}
        }

        impl $crate::codec::Decodable for $pdu_type {
            fn command_id() -> $crate::datatypes::CommandId {
                $command_id
            }

            fn decode(
                header: &$crate::codec::PduHeader,
                buf: &mut std::io::Cursor<&[u8]>,
            ) -> Result<Self, $crate::codec::CodecError> {
                Self::validate_header(header)?;
                $crate::codec::expect_end(buf, $command_id.name())?;
                Ok($pdu_type {
                    sequence_number: header.sequence_number,
                })
            }
        }
    };
}

/// Encodable/Decodable plus `new`/`error` constructors for a response PDU that
/// has no body. The struct must have `command_status: u32` and
/// `sequence_number: u32` fields.
macro_rules! impl_header_only_response {
    ($pdu_type:ident, $command_id:expr) => {
        impl $pdu_type {
            /// Create a new PDU with Ok status
            pub fn new(sequence_number: u32) -> Self {
                Self {
                    command_status: 0,
                    sequence_number,
                }
            }

            /// Create a PDU with error status
            pub fn error(sequence_number: u32, status: $crate::datatypes::CommandStatus) -> Self {
                Self {
                    command_status: status.into(),
                    sequence_number,
                }
            }
        }

        impl $crate::codec::Encodable for $pdu_type {
            fn pdu_command_id(&self) -> $crate::datatypes::CommandId {
                $command_id
            }

            fn command_status(&self) -> u32 {
                self.command_status
            }

            fn sequence_number(&self) -> u32 {
                self.sequence_number
            }

            fn encode_body(&self, _buf: &mut bytes::BytesMut) {}
        }

        impl $crate::codec::Decodable for $pdu_type {
            fn command_id() -> $crate::datatypes::CommandId {
                $command_id
            }

            fn decode(
                header: &$crate::codec::PduHeader,
                buf: &mut std::io::Cursor<&[u8]>,
            ) -> Result<Self, $crate::codec::CodecError> {
                Self::validate_header(header)?;
                $crate::codec::expect_end(buf, $command_id.name())?;
                Ok($pdu_type {
                    command_status: header.command_status,
                    sequence_number: header.sequence_number,
                })
            }
        }
    };
}

/// Fluent setters for builder structs: each takes the value, stores it and
/// returns the builder.
macro_rules! builder_setters {
    ($($field:ident: $type:ty),* $(,)?) => {
        $(
            pub fn $field(mut self, $field: $type) -> Self {
                self.$field = $field;
                self
            }
        )*
    };
}

/// PartialEq, Eq and Hash for a one-byte enum with a `catch_all` variant,
/// going through its wire value so `Unrecognized(1)` and the named variant
/// for 1 are the same value.
macro_rules! impl_wire_value_eq {
    ($($enum_type:ty),* $(,)?) => {
        $(
            impl PartialEq for $enum_type {
                fn eq(&self, other: &Self) -> bool {
                    u8::from(*self) == u8::from(*other)
                }
            }

            impl Eq for $enum_type {}

            impl std::hash::Hash for $enum_type {
                fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                    u8::from(*self).hash(state);
                }
            }
        )*
    };
}

// Make macros available to the rest of the crate
pub(crate) use {
    builder_setters, impl_header_only_request, impl_header_only_response, impl_wire_value_eq,
};
