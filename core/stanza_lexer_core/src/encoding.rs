//! Byte-order-mark detection and conversion to UTF-8.
//!
//! Raw configuration bytes may arrive as UTF-8 (with or without BOM),
//! UTF-16 LE/BE, or UTF-32 LE/BE. Detection is BOM-driven; BOM-less input is
//! treated as UTF-8. Conversion is lossy: undecodable units become U+FFFD,
//! because the source buffer invariant is "valid UTF-8 once set".

/// Source encoding detected from the leading bytes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

/// Detect the encoding of raw bytes, returning the encoding and the length
/// of the BOM to skip.
///
/// UTF-32 LE must be checked before UTF-16 LE: `FF FE 00 00` is a UTF-32 LE
/// BOM whose first two bytes alone would read as UTF-16 LE.
pub fn detect_encoding(raw: &[u8]) -> (Encoding, usize) {
    if raw.len() >= 4 && raw[0] == 0xFF && raw[1] == 0xFE && raw[2] == 0x00 && raw[3] == 0x00 {
        return (Encoding::Utf32Le, 4);
    }
    if raw.len() >= 4 && raw[0] == 0x00 && raw[1] == 0x00 && raw[2] == 0xFE && raw[3] == 0xFF {
        return (Encoding::Utf32Be, 4);
    }
    if raw.len() >= 2 && raw[0] == 0xFF && raw[1] == 0xFE {
        return (Encoding::Utf16Le, 2);
    }
    if raw.len() >= 2 && raw[0] == 0xFE && raw[1] == 0xFF {
        return (Encoding::Utf16Be, 2);
    }
    if raw.len() >= 3 && raw[0] == 0xEF && raw[1] == 0xBB && raw[2] == 0xBF {
        return (Encoding::Utf8, 3);
    }
    (Encoding::Utf8, 0)
}

/// Convert raw bytes to UTF-8 text, detecting the encoding from its BOM.
///
/// The BOM itself is stripped. Incomplete trailing code units and invalid
/// sequences decode to U+FFFD.
pub fn decode_to_utf8(raw: &[u8]) -> String {
    let (encoding, bom_len) = detect_encoding(raw);
    let body = &raw[bom_len..];
    match encoding {
        Encoding::Utf8 => String::from_utf8_lossy(body).into_owned(),
        Encoding::Utf16Le => decode_utf16(body, u16::from_le_bytes),
        Encoding::Utf16Be => decode_utf16(body, u16::from_be_bytes),
        Encoding::Utf32Le => decode_utf32(body, u32::from_le_bytes),
        Encoding::Utf32Be => decode_utf32(body, u32::from_be_bytes),
    }
}

/// Decode UTF-16 code units assembled by `read` (LE or BE byte order).
fn decode_utf16(body: &[u8], read: fn([u8; 2]) -> u16) -> String {
    let mut units = Vec::with_capacity(body.len() / 2);
    let mut chunks = body.chunks_exact(2);
    for pair in &mut chunks {
        units.push(read([pair[0], pair[1]]));
    }
    let mut text: String = char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if !chunks.remainder().is_empty() {
        // Truncated trailing code unit.
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

/// Decode UTF-32 code points assembled by `read` (LE or BE byte order).
fn decode_utf32(body: &[u8], read: fn([u8; 4]) -> u32) -> String {
    let mut text = String::with_capacity(body.len() / 4);
    let mut chunks = body.chunks_exact(4);
    for quad in &mut chunks {
        let point = read([quad[0], quad[1], quad[2], quad[3]]);
        text.push(char::from_u32(point).unwrap_or(char::REPLACEMENT_CHARACTER));
    }
    if !chunks.remainder().is_empty() {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}
