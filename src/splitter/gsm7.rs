//! GSM 03.38 default alphabet: character mapping and 7-bit packing.
//!
//! Text maps to septets (values 0..=0x7F). Characters from the extension
//! table take two septets, an escape (0x1B) followed by the extension code.

use thiserror::Error;

/// Escape to the extension table.
pub const ESC: u8 = 0x1B;

/// Basic table, indexed by septet. Position 0x1B is the escape and never
/// matches text.
const BASIC: [char; 128] = [
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', 'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å', //
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', 'Σ', 'Θ', 'Ξ', '\u{1B}', 'Æ', 'æ', 'ß', 'É', //
    ' ', '!', '"', '#', '¤', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', //
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?', //
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', //
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§', //
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', //
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à', //
];

/// Extension table as (code after ESC, character).
const EXTENSION: [(u8, char); 10] = [
    (0x0A, '\u{0C}'),
    (0x14, '^'),
    (0x28, '{'),
    (0x29, '}'),
    (0x2F, '\\'),
    (0x3C, '['),
    (0x3D, '~'),
    (0x3E, ']'),
    (0x40, '|'),
    (0x65, '€'),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0:?} is not in the GSM 7-bit default alphabet")]
pub struct NotInAlphabet(pub char);

fn basic_septet(c: char) -> Option<u8> {
    if c == '\u{1B}' {
        return None;
    }
    BASIC.iter().position(|&b| b == c).map(|i| i as u8)
}

fn extension_septet(c: char) -> Option<u8> {
    EXTENSION
        .iter()
        .find(|&&(_, ext)| ext == c)
        .map(|&(code, _)| code)
}

/// Septets needed for `c`: 1, 2 for the extension table, `None` if the
/// alphabet lacks it.
pub fn septets_for(c: char) -> Option<usize> {
    if basic_septet(c).is_some() {
        Some(1)
    } else if extension_septet(c).is_some() {
        Some(2)
    } else {
        None
    }
}

pub fn is_encodable(text: &str) -> bool {
    text.chars().all(|c| septets_for(c).is_some())
}

/// Map text to unpacked septets.
pub fn encode(text: &str) -> Result<Vec<u8>, NotInAlphabet> {
    let mut septets = Vec::with_capacity(text.len());
    for c in text.chars() {
        if let Some(s) = basic_septet(c) {
            septets.push(s);
        } else if let Some(code) = extension_septet(c) {
            septets.push(ESC);
            septets.push(code);
        } else {
            return Err(NotInAlphabet(c));
        }
    }
    Ok(septets)
}

/// Map septets back to text.
///
/// An escape followed by a code missing from the extension table reads as
/// the basic character for that code. A trailing lone escape is dropped.
pub fn decode(septets: &[u8]) -> String {
    let mut text = String::with_capacity(septets.len());
    let mut iter = septets.iter().map(|s| s & 0x7F);
    while let Some(s) = iter.next() {
        if s != ESC {
            text.push(BASIC[s as usize]);
            continue;
        }
        let Some(code) = iter.next() else { break };
        match EXTENSION.iter().find(|&&(ext, _)| ext == code) {
            Some(&(_, c)) => text.push(c),
            None => text.push(BASIC[code as usize]),
        }
    }
    text
}

/// Pack septets into octets, least significant bit first.
///
/// `fill_bits` zero bits precede the first septet; after a 6-octet UDH one
/// fill bit puts the text on a septet boundary. Unused high bits of the last
/// octet are set to 1.
pub fn pack_septets(septets: &[u8], fill_bits: usize) -> Vec<u8> {
    let total_bits = fill_bits + septets.len() * 7;
    let mut packed = vec![0u8; total_bits.div_ceil(8)];

    for (i, &septet) in septets.iter().enumerate() {
        let bit = fill_bits + i * 7;
        let (byte, shift) = (bit / 8, bit % 8);
        let value = u16::from(septet & 0x7F) << shift;
        packed[byte] |= value as u8;
        if shift > 1 {
            packed[byte + 1] |= (value >> 8) as u8;
        }
    }

    let used = total_bits % 8;
    if used != 0 {
        if let Some(last) = packed.last_mut() {
            *last |= 0xFFu8 << used;
        }
    }
    packed
}

/// Unpack `count` septets starting `fill_bits` into `packed`. Stops early if
/// the data runs out.
pub fn unpack_septets(packed: &[u8], fill_bits: usize, count: usize) -> Vec<u8> {
    let mut septets = Vec::with_capacity(count);
    for i in 0..count {
        let bit = fill_bits + i * 7;
        let (byte, shift) = (bit / 8, bit % 8);
        if bit + 7 > packed.len() * 8 {
            break;
        }
        let low = u16::from(packed[byte]);
        let high = packed.get(byte + 1).map_or(0, |&b| u16::from(b));
        septets.push((((high << 8) | low) >> shift) as u8 & 0x7F);
    }
    septets
}
