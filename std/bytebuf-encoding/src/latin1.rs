///
/// bytebuf_encoding::latin1 - Latin-1 (binary) and ASCII
///
/// Latin-1 maps bytes 0-255 to code points 0-255 and back, so it can carry
/// any byte sequence through a string unchanged. Encoding keeps the low byte
/// of each UTF-16 code unit.
///
/// ASCII is the lossy 7-bit variant: the high bit is dropped on both the
/// encode and the decode path, so byte 0xFF reads back as 0x7F.
///

pub fn encode(text: &str) -> Vec<u8> {
    text.encode_utf16().map(|unit| unit as u8).collect()
}

pub fn decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

pub fn byte_length(text: &str) -> usize {
    text.encode_utf16().count()
}

pub fn encode_ascii(text: &str) -> Vec<u8> {
    text.encode_utf16().map(|unit| (unit as u8) & 0x7F).collect()
}

pub fn decode_ascii(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| (b & 0x7F) as char).collect()
}

pub fn is_ascii(bytes: &[u8]) -> bool {
    bytes.is_ascii()
}
