///
/// bytebuf_encoding::hex - Hexadecimal
///
/// Bytes render as lowercase digit pairs using the `hex` crate. Parsing text
/// into bytes is lenient: it consumes complete digit pairs and stops at the
/// first invalid character or a trailing odd digit, never failing.
///

/// Length of the leading run of complete, valid digit pairs.
fn valid_prefix(text: &str) -> usize {
    let digits = text
        .bytes()
        .take_while(u8::is_ascii_hexdigit)
        .count();
    digits & !1
}

pub fn encode(text: &str) -> Vec<u8> {
    let prefix = &text[..valid_prefix(text)];
    hex::decode(prefix).unwrap_or_default()
}

pub fn decode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

pub fn byte_length(text: &str) -> usize {
    valid_prefix(text) / 2
}
