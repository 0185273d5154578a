///
/// Byte patterns for search and fill.
///
/// A pattern is a single byte value, a byte sequence, or text that is
/// encoded under the caller's encoding before use.
///

use crate::buffer::Buffer;
use bytebuf_core::value::wrap_unsigned;
use bytebuf_encoding::Encoding;
use std::borrow::Cow;

#[derive(Debug, Clone)]
pub enum Pattern<'a> {
    /// A number reduced modulo 256.
    Byte(f64),
    Bytes(Cow<'a, [u8]>),
    Text(&'a str),
}

impl Pattern<'_> {
    pub fn to_bytes(&self, encoding: Encoding) -> Vec<u8> {
        match self {
            Pattern::Byte(n) => vec![wrap_unsigned(*n, 8) as u8],
            Pattern::Bytes(bytes) => bytes.to_vec(),
            Pattern::Text(text) => encoding.encode(text),
        }
    }
}

macro_rules! byte_pattern_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Pattern<'_> {
                fn from(n: $t) -> Self {
                    Pattern::Byte(n as f64)
                }
            }
        )*
    };
}

byte_pattern_from!(u8, i8, i16, u16, i32, u32, i64, u64, usize, f64);

impl<'a> From<&'a str> for Pattern<'a> {
    fn from(text: &'a str) -> Self {
        Pattern::Text(text)
    }
}

impl<'a> From<&'a String> for Pattern<'a> {
    fn from(text: &'a String) -> Self {
        Pattern::Text(text.as_str())
    }
}

impl<'a> From<&'a [u8]> for Pattern<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Pattern::Bytes(Cow::Borrowed(bytes))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Pattern<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Pattern::Bytes(Cow::Borrowed(bytes.as_slice()))
    }
}

impl From<&Buffer> for Pattern<'_> {
    fn from(buf: &Buffer) -> Self {
        Pattern::Bytes(Cow::Owned(buf.to_vec()))
    }
}
