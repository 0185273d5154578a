///
/// Text helpers that sit beside `Buffer`: byte length of encoded text,
/// UTF-8 and ASCII checks over buffer ranges, the `atob`/`btoa` pair and
/// whole-buffer transcoding.
///

use crate::buffer::Buffer;
use bytebuf_core::{BufferError, Result};
use bytebuf_encoding::{Encoding, base64, latin1, utf8};

/// Number of bytes `text` occupies once encoded.
pub fn byte_length(text: &str, encoding: Option<&str>) -> Result<usize> {
    Ok(Encoding::resolve(encoding)?.byte_length(text))
}

/// Whether `buf[offset..offset + length]` is well-formed UTF-8. The range
/// defaults to the rest of the buffer and must lie inside it.
pub fn is_valid_utf8(buf: &Buffer, offset: Option<usize>, length: Option<usize>) -> Result<bool> {
    let offset = offset.unwrap_or(0);
    if offset > buf.len() {
        return Err(BufferError::out_of_range(
            "offset",
            format!(">= 0 and <= {}", buf.len()),
            offset,
        ));
    }
    let available = buf.len() - offset;
    let length = length.unwrap_or(available);
    if length > available {
        return Err(BufferError::out_of_range(
            "length",
            format!(">= 0 and <= {}", available),
            length,
        ));
    }
    Ok(buf.with_bytes(|b| utf8::is_valid_utf8(&b[offset..offset + length])))
}

pub fn is_utf8(buf: &Buffer) -> bool {
    buf.with_bytes(utf8::is_valid_utf8)
}

pub fn is_ascii(buf: &Buffer) -> bool {
    buf.with_bytes(latin1::is_ascii)
}

/// Decodes base64 text into a string with one char per byte. Invalid input
/// ends the decode instead of failing it.
pub fn atob(data: &str) -> String {
    latin1::decode(&base64::encode(data))
}

/// Base64-encodes a string whose chars are all in U+0000..=U+00FF.
pub fn btoa(data: &str) -> Result<String> {
    let mut bytes = Vec::with_capacity(data.len());
    for (i, c) in data.chars().enumerate() {
        let code = c as u32;
        if code > 0xFF {
            return Err(BufferError::invalid_input(
                "latin1",
                format!("character at index {} is outside the Latin-1 range", i),
            ));
        }
        bytes.push(code as u8);
    }
    Ok(base64::decode(&bytes))
}

/// Re-encodes the contents of `source` from one encoding to another.
pub fn transcode(source: &Buffer, from: &str, to: &str) -> Result<Buffer> {
    let from = Encoding::resolve(Some(from))?;
    let to = Encoding::resolve(Some(to))?;
    Ok(Buffer::from_vec(
        source.with_bytes(|b| bytebuf_encoding::transcode(b, from, to)),
    ))
}
