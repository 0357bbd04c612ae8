// ABOUTME: Long-message segmentation into short_message parts using UDH or SAR concatenation
// ABOUTME: Counts capacity in the encoding's own unit and never splits escape or surrogate pairs

//! Text in, short_message payloads out.
//!
//! ```rust
//! use smpp_codec::splitter::{Encoding, SplitMode, split_message};
//!
//! let text = "x".repeat(161);
//! let result = split_message(&text, Encoding::Gsm7, SplitMode::Udh)?;
//! assert_eq!(result.parts.len(), 2);
//! assert_eq!(&result.parts[0][..3], &[0x05, 0x00, 0x03]);
//! # Ok::<(), smpp_codec::SplitError>(())
//! ```

pub mod gsm7;

use crate::codec::CodecError;
use crate::datatypes::{FixedStringError, ShortMessage, SubmitSm, Tlv, esm_class, tags};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

/// Most parts a one-octet total count can describe.
pub const MAX_SEGMENTS: usize = 255;

/// Largest message_payload TLV value.
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

/// Length of the concatenation UDH written before each part.
pub const UDH_LEN: usize = 6;

/// Character encoding of the parts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// GSM default alphabet, one septet per octet. Most SMSCs pack it
    /// themselves for data_coding 0.
    #[default]
    Gsm7,
    /// GSM default alphabet packed eight septets to seven octets.
    Gsm7Packed,
    /// ISO-8859-1, one octet per character.
    Latin1,
    /// UCS-2 big endian. Characters outside the BMP take two code units.
    Ucs2,
}

impl Encoding {
    /// The SMPP data_coding value.
    pub fn data_coding(self) -> u8 {
        match self {
            Encoding::Gsm7 | Encoding::Gsm7Packed => 0x00,
            Encoding::Latin1 => 0x03,
            Encoding::Ucs2 => 0x08,
        }
    }

    /// Units that fit in one PDU: septets, octets or UTF-16 code units.
    pub fn single_capacity(self) -> usize {
        match self {
            Encoding::Gsm7 | Encoding::Gsm7Packed => 160,
            Encoding::Latin1 => 140,
            Encoding::Ucs2 => 70,
        }
    }

    /// Units that fit in one part after the concatenation UDH.
    pub fn udh_capacity(self) -> usize {
        match self {
            Encoding::Gsm7 | Encoding::Gsm7Packed => 153,
            Encoding::Latin1 => 134,
            Encoding::Ucs2 => 67,
        }
    }

    /// The smallest encoding that can carry `text`: GSM 7-bit, else UCS-2.
    pub fn detect(text: &str) -> Encoding {
        if gsm7::is_encodable(text) {
            Encoding::Gsm7
        } else {
            Encoding::Ucs2
        }
    }

    pub fn charset_name(self) -> &'static str {
        match self {
            Encoding::Gsm7 => "GSM 7-bit",
            Encoding::Gsm7Packed => "GSM 7-bit packed",
            Encoding::Latin1 => "Latin-1",
            Encoding::Ucs2 => "UCS-2",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.charset_name())
    }
}

/// How the parts of a long message are tied together.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SplitMode {
    /// A 6-octet UDH at the front of each part; set UDHI in esm_class.
    #[default]
    Udh,
    /// sar_msg_ref_num, sar_total_segments and sar_segment_seqnum TLVs.
    Sar,
    /// One part holding the whole message, for the message_payload TLV.
    Payload,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("message needs {required} segments, at most 255 can be numbered")]
    TooManySegments { required: usize },

    #[error("{character:?} cannot be represented in {encoding}")]
    InvalidEncodingForText { character: char, encoding: Encoding },

    #[error("message of {actual} bytes exceeds the {max} byte message_payload limit")]
    PayloadTooLarge { actual: usize, max: usize },

    #[error(transparent)]
    Field(#[from] FixedStringError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// The parts of one message, ready for short_message or message_payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitResult {
    /// In send order. UDH parts start with their header.
    pub parts: Vec<Bytes>,
    pub data_coding: u8,
    pub encoding: Encoding,
    pub mode: SplitMode,
    /// The concatenation reference. Only the low octet travels in a UDH.
    pub reference: u16,
}

impl SplitResult {
    pub fn total(&self) -> u8 {
        self.parts.len() as u8
    }

    pub fn is_concatenated(&self) -> bool {
        self.parts.len() > 1
    }

    /// esm_class bits the parts need: UDHI for multi-part UDH messages.
    pub fn esm_class(&self) -> u8 {
        if self.mode == SplitMode::Udh && self.is_concatenated() {
            esm_class::UDHI
        } else {
            0
        }
    }

    /// SAR TLVs for the part at `index`, if this is a multi-part SAR message.
    pub fn sar_tlvs(&self, index: usize) -> Option<[Tlv; 3]> {
        if self.mode != SplitMode::Sar || !self.is_concatenated() || index >= self.parts.len() {
            return None;
        }
        Some(Tlv::sar(self.reference, self.total(), index as u8 + 1))
    }

    /// One submit_sm per part, copied from `template`.
    ///
    /// Each copy gets the part's payload, data_coding, any UDHI bit and any
    /// SAR or message_payload TLV. Sequence numbers count up from
    /// `first_sequence_number`.
    pub fn apply_to(
        &self,
        template: &SubmitSm,
        first_sequence_number: u32,
    ) -> Result<Vec<SubmitSm>, SplitError> {
        self.parts
            .iter()
            .enumerate()
            .map(|(index, part)| {
                let mut pdu = template.clone();
                pdu.sequence_number = first_sequence_number.wrapping_add(index as u32);
                pdu.data_coding = self.data_coding;
                pdu.esm_class |= self.esm_class();

                if self.mode == SplitMode::Payload {
                    pdu.short_message = ShortMessage::default();
                    pdu.tlvs
                        .push(Tlv::new_bytes(tags::MESSAGE_PAYLOAD, part.clone())?);
                } else {
                    pdu.short_message = ShortMessage::new(part)?;
                    if let Some(sar) = self.sar_tlvs(index) {
                        pdu.tlvs.extend(sar);
                    }
                }
                Ok(pdu)
            })
            .collect()
    }
}

/// Concatenation information element read back from a received UDH.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConcatHeader {
    pub reference: u16,
    pub total: u8,
    /// 1-based.
    pub index: u8,
}

impl ConcatHeader {
    /// Find the concatenation IE (8-bit id 0x00 or 16-bit id 0x08) in the
    /// UDH at the front of `short_message`. Returns the header and the text
    /// after the UDH.
    pub fn parse(short_message: &[u8]) -> Option<(ConcatHeader, &[u8])> {
        let udhl = *short_message.first()? as usize;
        let udh = short_message.get(1..=udhl)?;
        let rest = &short_message[udhl + 1..];

        let mut ies = udh;
        while let [id, len, tail @ ..] = ies {
            let data = tail.get(..*len as usize)?;
            let header = match (*id, data) {
                (0x00, &[reference, total, index]) => Some(ConcatHeader {
                    reference: reference.into(),
                    total,
                    index,
                }),
                (0x08, &[hi, lo, total, index]) => Some(ConcatHeader {
                    reference: u16::from_be_bytes([hi, lo]),
                    total,
                    index,
                }),
                _ => None,
            };
            if let Some(header) = header {
                return Some((header, rest));
            }
            ies = &tail[*len as usize..];
        }
        None
    }
}

/// Split settings. `MessageSplitter::default()` is GSM 7-bit with UDH.
#[derive(Clone, Debug, Default)]
pub struct MessageSplitter {
    encoding: Encoding,
    mode: SplitMode,
    reference: Option<u16>,
}

impl MessageSplitter {
    pub fn new(encoding: Encoding, mode: SplitMode) -> Self {
        Self {
            encoding,
            mode,
            reference: None,
        }
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn mode(mut self, mode: SplitMode) -> Self {
        self.mode = mode;
        self
    }

    /// Fix the concatenation reference instead of deriving it from the text.
    pub fn reference(mut self, reference: u16) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn split(&self, text: &str) -> Result<SplitResult, SplitError> {
        let encoding = self.encoding;
        let mut reference = self.reference.unwrap_or_else(|| text_reference(text));
        if self.mode == SplitMode::Udh {
            reference &= 0x00FF;
        }

        let parts = match encoding {
            Encoding::Gsm7 | Encoding::Gsm7Packed => {
                let septets = gsm7::encode(text).map_err(|gsm7::NotInAlphabet(character)| {
                    SplitError::InvalidEncodingForText {
                        character,
                        encoding,
                    }
                })?;
                let packed = encoding == Encoding::Gsm7Packed;
                self.build_parts(
                    &septets,
                    reference,
                    |&s| s == gsm7::ESC,
                    |chunk, after_udh| {
                        if packed {
                            gsm7::pack_septets(chunk, usize::from(after_udh))
                        } else {
                            chunk.to_vec()
                        }
                    },
                )?
            }
            Encoding::Latin1 => {
                let octets = text
                    .chars()
                    .map(|character| {
                        u8::try_from(character).map_err(|_| SplitError::InvalidEncodingForText {
                            character,
                            encoding,
                        })
                    })
                    .collect::<Result<Vec<u8>, _>>()?;
                self.build_parts(&octets, reference, |_| false, |chunk, _| chunk.to_vec())?
            }
            Encoding::Ucs2 => {
                let units: Vec<u16> = text.encode_utf16().collect();
                self.build_parts(
                    &units,
                    reference,
                    |&u| (0xD800..=0xDBFF).contains(&u),
                    |chunk, _| chunk.iter().flat_map(|u| u.to_be_bytes()).collect(),
                )?
            }
        };

        Ok(SplitResult {
            parts,
            data_coding: encoding.data_coding(),
            encoding,
            mode: self.mode,
            reference,
        })
    }

    /// `opens_pair` marks a unit that must stay with the unit after it.
    /// `to_bytes` gets a chunk and whether a UDH precedes it.
    fn build_parts<T: Copy>(
        &self,
        units: &[T],
        reference: u16,
        opens_pair: impl Fn(&T) -> bool,
        to_bytes: impl Fn(&[T], bool) -> Vec<u8>,
    ) -> Result<Vec<Bytes>, SplitError> {
        let encoding = self.encoding;

        if self.mode == SplitMode::Payload {
            let payload = to_bytes(units, false);
            if payload.len() > MAX_PAYLOAD_LEN {
                return Err(SplitError::PayloadTooLarge {
                    actual: payload.len(),
                    max: MAX_PAYLOAD_LEN,
                });
            }
            debug!(%encoding, units = units.len(), bytes = payload.len(), "message_payload plan");
            return Ok(vec![Bytes::from(payload)]);
        }

        if units.len() <= encoding.single_capacity() {
            debug!(%encoding, units = units.len(), "message fits a single part");
            return Ok(vec![Bytes::from(to_bytes(units, false))]);
        }

        let with_udh = self.mode == SplitMode::Udh;
        let capacity = if with_udh {
            encoding.udh_capacity()
        } else {
            encoding.single_capacity()
        };

        let chunks = chunk(units, capacity, opens_pair);
        if chunks.len() > MAX_SEGMENTS {
            return Err(SplitError::TooManySegments {
                required: chunks.len(),
            });
        }
        debug!(
            %encoding,
            mode = ?self.mode,
            units = units.len(),
            parts = chunks.len(),
            reference,
            "split plan"
        );

        let total = chunks.len() as u8;
        let parts = chunks
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| {
                let body = to_bytes(chunk, with_udh);
                let mut part = BytesMut::with_capacity(UDH_LEN + body.len());
                if with_udh {
                    part.put_slice(&concat_udh(reference as u8, total, i as u8 + 1));
                }
                part.put_slice(&body);
                trace!(index = i + 1, units = chunk.len(), bytes = part.len(), "part");
                part.freeze()
            })
            .collect();
        Ok(parts)
    }
}

/// Split with a reference derived from the text.
pub fn split_message(
    text: &str,
    encoding: Encoding,
    mode: SplitMode,
) -> Result<SplitResult, SplitError> {
    MessageSplitter::new(encoding, mode).split(text)
}

/// UDHL, IEI 0x00 (8-bit reference), IEDL, reference, total, index.
fn concat_udh(reference: u8, total: u8, index: u8) -> [u8; UDH_LEN] {
    [0x05, 0x00, 0x03, reference, total, index]
}

/// Contiguous chunks of at most `capacity` units. A chunk never ends on a
/// unit that opens a pair unless the pair is the whole chunk.
fn chunk<T>(units: &[T], capacity: usize, opens_pair: impl Fn(&T) -> bool) -> Vec<&[T]> {
    let mut chunks = Vec::with_capacity(units.len().div_ceil(capacity));
    let mut rest = units;
    while !rest.is_empty() {
        let mut end = capacity.min(rest.len());
        if end < rest.len() && end > 1 && opens_pair(&rest[end - 1]) {
            end -= 1;
        }
        let (head, tail) = rest.split_at(end);
        chunks.push(head);
        rest = tail;
    }
    chunks
}

/// FNV-1a over the UTF-8 bytes, folded to 16 bits.
fn text_reference(text: &str) -> u16 {
    let hash = text
        .bytes()
        .fold(0x811C_9DC5u32, |h, b| (h ^ u32::from(b)).wrapping_mul(0x0100_0193));
    (hash ^ (hash >> 16)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part_lens(result: &SplitResult) -> Vec<usize> {
        result.parts.iter().map(|p| p.len()).collect()
    }

    #[test]
    fn seven_bit_boundaries() {
        let cases: [(usize, &[usize], &[usize]); 7] = [
            (1, &[1], &[1]),
            (7, &[7], &[7]),
            (8, &[8], &[7]),
            (153, &[153], &[134]),
            (154, &[154], &[135]),
            (160, &[160], &[140]),
            (161, &[159, 14], &[140, 14]),
        ];

        for (chars, unpacked, packed) in cases {
            let text = "A".repeat(chars);

            let result = split_message(&text, Encoding::Gsm7, SplitMode::Udh).unwrap();
            assert_eq!(part_lens(&result), unpacked, "unpacked, {chars} chars");
            assert_eq!(result.data_coding, 0x00);

            let result = split_message(&text, Encoding::Gsm7Packed, SplitMode::Udh).unwrap();
            assert_eq!(part_lens(&result), packed, "packed, {chars} chars");
        }
    }

    #[test]
    fn udh_parts_carry_concat_header() {
        let text = "A".repeat(161);
        let result = MessageSplitter::new(Encoding::Gsm7Packed, SplitMode::Udh)
            .reference(0x1234)
            .split(&text)
            .unwrap();

        assert_eq!(result.reference, 0x34);
        assert_eq!(result.esm_class(), esm_class::UDHI);
        assert_eq!(&result.parts[0][..6], &[0x05, 0x00, 0x03, 0x34, 0x02, 0x01]);
        assert_eq!(&result.parts[1][..6], &[0x05, 0x00, 0x03, 0x34, 0x02, 0x02]);

        let septets = gsm7::unpack_septets(&result.parts[0][6..], 1, 153);
        assert_eq!(gsm7::decode(&septets), "A".repeat(153));
        let septets = gsm7::unpack_septets(&result.parts[1][6..], 1, 8);
        assert_eq!(gsm7::decode(&septets), "A".repeat(8));

        let (header, rest) = ConcatHeader::parse(&result.parts[1]).unwrap();
        assert_eq!(
            header,
            ConcatHeader {
                reference: 0x34,
                total: 2,
                index: 2
            }
        );
        assert_eq!(rest.len(), 8);
    }

    #[test]
    fn sar_parts_have_no_header() {
        let text = "A".repeat(161);
        let result = split_message(&text, Encoding::Gsm7Packed, SplitMode::Sar).unwrap();
        assert_eq!(part_lens(&result), vec![140, 1]);
        assert_eq!(result.esm_class(), 0);

        let tlvs = result.sar_tlvs(1).unwrap();
        assert_eq!(tlvs[0].value_as_u16(), Some(result.reference));
        assert_eq!(tlvs[1].value_as_u8(), Some(2));
        assert_eq!(tlvs[2].value_as_u8(), Some(2));
        assert!(result.sar_tlvs(2).is_none());
    }

    #[test]
    fn segment_count_limit() {
        let text = "a".repeat(153 * 255);
        let result = split_message(&text, Encoding::Gsm7, SplitMode::Udh).unwrap();
        assert_eq!(result.total(), 255);

        let text = "a".repeat(153 * 255 + 1);
        assert_eq!(
            split_message(&text, Encoding::Gsm7, SplitMode::Udh),
            Err(SplitError::TooManySegments { required: 256 })
        );

        let text = "a".repeat(160 * 255 + 1);
        assert_eq!(
            split_message(&text, Encoding::Gsm7Packed, SplitMode::Sar),
            Err(SplitError::TooManySegments { required: 256 })
        );
    }

    #[test]
    fn escape_pairs_stay_together() {
        let text = format!("{}€{}", "a".repeat(152), "b".repeat(10));
        let result = split_message(&text, Encoding::Gsm7, SplitMode::Udh).unwrap();

        assert_eq!(part_lens(&result), vec![158, 18]);
        assert_eq!(result.parts[0][157], b'a');
        assert_eq!(&result.parts[1][6..8], &[gsm7::ESC, 0x65]);
    }

    #[test]
    fn surrogate_pairs_stay_together() {
        let text = format!("{}😀{}", "a".repeat(66), "b".repeat(5));
        let result = split_message(&text, Encoding::Ucs2, SplitMode::Udh).unwrap();

        assert_eq!(result.data_coding, 0x08);
        assert_eq!(part_lens(&result), vec![138, 20]);
        assert_eq!(&result.parts[1][6..10], &[0xD8, 0x3D, 0xDE, 0x00]);
    }

    #[test]
    fn ucs2_capacities() {
        let result = split_message(&"ж".repeat(70), Encoding::Ucs2, SplitMode::Udh).unwrap();
        assert_eq!(part_lens(&result), vec![140]);

        let result = split_message(&"ж".repeat(71), Encoding::Ucs2, SplitMode::Udh).unwrap();
        assert_eq!(part_lens(&result), vec![140, 14]);
    }

    #[test]
    fn latin1_octets() {
        let result = split_message(&"é".repeat(141), Encoding::Latin1, SplitMode::Sar).unwrap();
        assert_eq!(result.data_coding, 0x03);
        assert_eq!(part_lens(&result), vec![140, 1]);
        assert_eq!(result.parts[0][0], 0xE9);

        let result = split_message(&"é".repeat(141), Encoding::Latin1, SplitMode::Udh).unwrap();
        assert_eq!(part_lens(&result), vec![140, 13]);
    }

    #[test]
    fn unrepresentable_characters() {
        assert_eq!(
            split_message("price: 5€", Encoding::Latin1, SplitMode::Udh),
            Err(SplitError::InvalidEncodingForText {
                character: '€',
                encoding: Encoding::Latin1
            })
        );
        assert_eq!(
            split_message("🚀", Encoding::Gsm7Packed, SplitMode::Sar),
            Err(SplitError::InvalidEncodingForText {
                character: '🚀',
                encoding: Encoding::Gsm7Packed
            })
        );
        assert_eq!(Encoding::detect("Hello World 🚀"), Encoding::Ucs2);
        assert_eq!(Encoding::detect("Hello {World}"), Encoding::Gsm7);
    }

    #[test]
    fn payload_mode() {
        let text = "A".repeat(1000);
        let result = split_message(&text, Encoding::Latin1, SplitMode::Payload).unwrap();
        assert_eq!(part_lens(&result), vec![1000]);

        let result = split_message(&text, Encoding::Gsm7Packed, SplitMode::Payload).unwrap();
        assert_eq!(part_lens(&result), vec![875]);

        let text = "A".repeat(MAX_PAYLOAD_LEN + 1);
        assert_eq!(
            split_message(&text, Encoding::Latin1, SplitMode::Payload),
            Err(SplitError::PayloadTooLarge {
                actual: 65536,
                max: 65535
            })
        );
    }

    #[test]
    fn empty_text_is_one_empty_part() {
        let result = split_message("", Encoding::Gsm7, SplitMode::Udh).unwrap();
        assert_eq!(result.parts, vec![Bytes::new()]);
        assert!(!result.is_concatenated());
        assert_eq!(result.esm_class(), 0);
    }

    #[test]
    fn reference_is_deterministic() {
        let text = "B".repeat(400);
        let a = split_message(&text, Encoding::Gsm7, SplitMode::Sar).unwrap();
        let b = split_message(&text, Encoding::Gsm7, SplitMode::Sar).unwrap();
        assert_eq!(a.reference, b.reference);

        let fixed = MessageSplitter::new(Encoding::Gsm7, SplitMode::Sar)
            .reference(0x1234)
            .split(&text)
            .unwrap();
        assert_eq!(fixed.reference, 0x1234);
    }

    #[test]
    fn apply_to_submit_sm() {
        let template = SubmitSm::builder()
            .source_addr("123456")
            .destination_addr("9876543210")
            .registered_delivery(1)
            .build()
            .unwrap();
        let text = "A".repeat(200);

        let sar = MessageSplitter::new(Encoding::Gsm7, SplitMode::Sar)
            .reference(77)
            .split(&text)
            .unwrap();
        let pdus = sar.apply_to(&template, 10).unwrap();
        assert_eq!(pdus.len(), 2);
        assert_eq!(pdus[1].sequence_number, 11);
        assert_eq!(pdus[1].registered_delivery, 1);
        assert_eq!(pdus[1].short_message.len(), 40);
        assert_eq!(pdus[1].tlvs, Tlv::sar(77, 2, 2).to_vec());

        let udh = split_message(&text, Encoding::Gsm7, SplitMode::Udh).unwrap();
        let pdus = udh.apply_to(&template, 1).unwrap();
        assert!(pdus.iter().all(|p| esm_class::has_udhi(p.esm_class)));
        assert!(pdus.iter().all(|p| p.tlvs.is_empty()));

        let payload = split_message(&text, Encoding::Ucs2, SplitMode::Payload).unwrap();
        let pdus = payload.apply_to(&template, 1).unwrap();
        assert_eq!(pdus.len(), 1);
        assert!(pdus[0].short_message.is_empty());
        assert_eq!(pdus[0].data_coding, 0x08);
        assert_eq!(pdus[0].tlvs[0].tag(), tags::MESSAGE_PAYLOAD);
        assert_eq!(pdus[0].tlvs[0].length(), 400);
    }

    #[test]
    fn concat_header_with_16_bit_reference() {
        let message = [0x06, 0x08, 0x04, 0x12, 0x34, 0x03, 0x01, b'h', b'i'];
        let (header, rest) = ConcatHeader::parse(&message).unwrap();
        assert_eq!(header.reference, 0x1234);
        assert_eq!(header.total, 3);
        assert_eq!(header.index, 1);
        assert_eq!(rest, b"hi");

        assert!(ConcatHeader::parse(&[0x03, 0x24, 0x01, 0x01]).is_none());
        assert!(ConcatHeader::parse(&[0x05, 0x00]).is_none());
    }
}
