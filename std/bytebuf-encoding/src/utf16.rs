///
/// bytebuf_encoding::utf16 - UTF-16LE / UCS-2
///
/// Each code unit is two little-endian bytes. A trailing odd byte is ignored
/// when decoding; unpaired surrogates decode as U+FFFD.
///

use crate::utf8::REPLACEMENT;

pub fn encode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

pub fn decode(bytes: &[u8]) -> String {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|r| r.unwrap_or(REPLACEMENT))
        .collect()
}

pub fn byte_length(text: &str) -> usize {
    text.encode_utf16().count() * 2
}
