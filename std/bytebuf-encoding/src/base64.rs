///
/// bytebuf_encoding::base64 - Base64 and Base64URL (RFC 4648)
///
/// Rendering uses the `base64` crate: the standard alphabet with `=` padding,
/// or the URL-safe alphabet without padding.
///
/// Parsing accepts both alphabets, skips ASCII whitespace, tolerates missing
/// padding and stops at the first `=` or invalid character. A dangling
/// single character at the end carries no full byte and is dropped.
///

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

fn normalize(c: u8) -> Option<u8> {
    match c {
        b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'+' | b'/' => Some(c),
        b'-' => Some(b'+'),
        b'_' => Some(b'/'),
        _ => None,
    }
}

/// Alphabet characters before the first stop character, normalized to the
/// standard alphabet.
fn symbols(text: &str) -> impl Iterator<Item = u8> + '_ {
    text.bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .map_while(normalize)
}

fn usable_symbols(count: usize) -> usize {
    if count % 4 == 1 { count - 1 } else { count }
}

/// Parses base64 or base64url text into bytes.
pub fn encode(text: &str) -> Vec<u8> {
    let mut cleaned: Vec<u8> = symbols(text).collect();
    cleaned.truncate(usable_symbols(cleaned.len()));
    LENIENT.decode(&cleaned).unwrap_or_default()
}

pub fn decode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode_url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Number of bytes `encode(text)` produces, computed without allocating.
pub fn byte_length(text: &str) -> usize {
    usable_symbols(symbols(text).count()) * 3 / 4
}
