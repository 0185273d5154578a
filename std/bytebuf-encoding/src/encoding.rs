///
/// Encoding Tags
///
/// `Encoding` names one text encoding. Names are matched case-insensitively
/// against a fixed alias table, so `utf8`, `UTF-8` and `Utf8` all resolve to
/// `Encoding::Utf8`, and `ucs2`, `ucs-2`, `utf16le` and `utf-16le` to
/// `Encoding::Utf16Le`.
///
/// Direction follows the buffer API: `encode` turns text into bytes (for hex
/// and base64 this parses the text), `decode` renders bytes as text.
///

use crate::{base64, hex, latin1, utf16, utf8};
use bytebuf_core::{BufferError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Latin1,
    Ascii,
    Hex,
    Base64,
    Base64Url,
}

static ALIASES: &[(&str, Encoding)] = &[
    ("utf8", Encoding::Utf8),
    ("utf-8", Encoding::Utf8),
    ("utf16le", Encoding::Utf16Le),
    ("utf-16le", Encoding::Utf16Le),
    ("ucs2", Encoding::Utf16Le),
    ("ucs-2", Encoding::Utf16Le),
    ("latin1", Encoding::Latin1),
    ("binary", Encoding::Latin1),
    ("ascii", Encoding::Ascii),
    ("hex", Encoding::Hex),
    ("base64", Encoding::Base64),
    ("base64url", Encoding::Base64Url),
];

impl Encoding {
    pub fn parse(name: &str) -> Option<Encoding> {
        ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
            .map(|&(_, encoding)| encoding)
    }

    /// Absent names default to UTF-8; unrecognised ones (including the empty
    /// string) are an error.
    pub fn resolve(name: Option<&str>) -> Result<Encoding> {
        match name {
            None => Ok(Encoding::Utf8),
            Some(name) => {
                Encoding::parse(name).ok_or_else(|| BufferError::unknown_encoding(name))
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Utf16Le => "utf16le",
            Encoding::Latin1 => "latin1",
            Encoding::Ascii => "ascii",
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
            Encoding::Base64Url => "base64url",
        }
    }

    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Encoding::Utf8 => utf8::encode(text),
            Encoding::Utf16Le => utf16::encode(text),
            Encoding::Latin1 => latin1::encode(text),
            Encoding::Ascii => latin1::encode_ascii(text),
            Encoding::Hex => hex::encode(text),
            Encoding::Base64 | Encoding::Base64Url => base64::encode(text),
        }
    }

    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => utf8::decode(bytes),
            Encoding::Utf16Le => utf16::decode(bytes),
            Encoding::Latin1 => latin1::decode(bytes),
            Encoding::Ascii => latin1::decode_ascii(bytes),
            Encoding::Hex => hex::decode(bytes),
            Encoding::Base64 => base64::decode(bytes),
            Encoding::Base64Url => base64::decode_url(bytes),
        }
    }

    /// Length of `encode(text)` without building it.
    pub fn byte_length(self, text: &str) -> usize {
        match self {
            Encoding::Utf8 => text.len(),
            Encoding::Utf16Le => utf16::byte_length(text),
            Encoding::Latin1 | Encoding::Ascii => latin1::byte_length(text),
            Encoding::Hex => hex::byte_length(text),
            Encoding::Base64 | Encoding::Base64Url => base64::byte_length(text),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Encoding {
    type Err = BufferError;

    fn from_str(s: &str) -> Result<Self> {
        Encoding::resolve(Some(s))
    }
}

pub fn is_encoding(name: &str) -> bool {
    Encoding::parse(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytebuf_core::ErrorKind;

    #[test]
    fn test_aliases_case_insensitive() {
        assert_eq!(Encoding::parse("UTF-8"), Some(Encoding::Utf8));
        assert_eq!(Encoding::parse("Utf8"), Some(Encoding::Utf8));
        assert_eq!(Encoding::parse("UCS-2"), Some(Encoding::Utf16Le));
        assert_eq!(Encoding::parse("utf-16LE"), Some(Encoding::Utf16Le));
        assert_eq!(Encoding::parse("BINARY"), Some(Encoding::Latin1));
        assert_eq!(Encoding::parse("Base64URL"), Some(Encoding::Base64Url));
        assert_eq!(Encoding::parse("utf16"), None);
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Encoding::resolve(None).unwrap(), Encoding::Utf8);
        assert_eq!(
            Encoding::resolve(Some("")).unwrap_err().kind(),
            ErrorKind::UnknownEncoding
        );
        assert_eq!(
            "nope".parse::<Encoding>().unwrap_err().kind(),
            ErrorKind::UnknownEncoding
        );
        assert!(is_encoding("hex"));
        assert!(!is_encoding("utf-7"));
    }

    #[test]
    fn test_byte_length_matches_encode() {
        let samples = ["", "hello", "\u{E9}t\u{E9}", "\u{1F600}!", "68656c6c6f", "SGVsbG8="];
        for encoding in [
            Encoding::Utf8,
            Encoding::Utf16Le,
            Encoding::Latin1,
            Encoding::Ascii,
            Encoding::Hex,
            Encoding::Base64,
            Encoding::Base64Url,
        ] {
            for s in samples {
                assert_eq!(
                    encoding.byte_length(s),
                    encoding.encode(s).len(),
                    "{} {:?}",
                    encoding,
                    s
                );
            }
        }
    }

    #[test]
    fn test_round_trip_well_formed() {
        let bytes: Vec<u8> = vec![0x00, 0x10, 0x7F, 0x80, 0xFE, 0xFF];
        for encoding in [Encoding::Latin1, Encoding::Hex, Encoding::Base64, Encoding::Base64Url] {
            assert_eq!(encoding.encode(&encoding.decode(&bytes)), bytes, "{}", encoding);
        }
        let text_bytes = "h\u{E9}llo \u{1F600}".as_bytes();
        assert_eq!(Encoding::Utf8.encode(&Encoding::Utf8.decode(text_bytes)), text_bytes);
        let units = [0x68, 0x00, 0x3D, 0xD8, 0x00, 0xDE];
        assert_eq!(Encoding::Utf16Le.encode(&Encoding::Utf16Le.decode(&units)), units);
    }
}
