///
/// bytebuf-encoding - Text Codecs and Binary Layouts
///
/// This crate converts between raw bytes and text, and packs numbers into
/// byte fields:
/// - encoding: the `Encoding` tag and its alias table
/// - utf8: validating state machine and lossy decoding
/// - utf16: UTF-16LE / UCS-2
/// - latin1: Latin-1 (binary) and 7-bit ASCII
/// - hex: lowercase hex, lenient parsing
/// - base64: standard and URL-safe alphabets, lenient parsing
/// - binary: integer and IEEE-754 field layouts in both byte orders
///
/// Text parsing never fails: malformed UTF-8 becomes U+FFFD, hex and base64
/// stop at the first character they cannot use.
///

pub mod base64;
pub mod binary;
pub mod encoding;
pub mod hex;
pub mod latin1;
pub mod utf16;
pub mod utf8;

pub use binary::{Endian, NumericField, NumericKind};
pub use encoding::{Encoding, is_encoding};
pub use utf8::{Utf8State, Utf8Validator, is_valid_utf8};

/// Re-encodes bytes from one encoding to another by way of text.
pub fn transcode(bytes: &[u8], from: Encoding, to: Encoding) -> Vec<u8> {
    tracing::trace!(len = bytes.len(), %from, %to, "transcoding");
    if from == to {
        return bytes.to_vec();
    }
    to.encode(&from.decode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcode_latin1_to_utf8() {
        assert_eq!(
            transcode(&[0x63, 0x61, 0x66, 0xE9], Encoding::Latin1, Encoding::Utf8),
            "caf\u{E9}".as_bytes()
        );
    }

    #[test]
    fn test_transcode_utf8_to_utf16le() {
        assert_eq!(
            transcode(b"hi", Encoding::Utf8, Encoding::Utf16Le),
            vec![0x68, 0, 0x69, 0]
        );
    }

    #[test]
    fn test_transcode_identity_copies() {
        let bytes = [0xFF, 0xFE];
        assert_eq!(transcode(&bytes, Encoding::Utf8, Encoding::Utf8), bytes);
    }
}
