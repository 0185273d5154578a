///
/// Buffer - Construction, Introspection, Slicing and Text
///
/// A `Buffer` is a handle to a View. Cloning the handle aliases the same
/// bytes; `Buffer::from_buffer` is the copying constructor.
///
/// Mutating methods take `&self`: the bytes live in a shared store, and a
/// write through one buffer is visible through every overlapping buffer.
///

use crate::pattern::Pattern;
use bytebuf_core::{BufferError, ByteStore, Result, Value, View, allocate_pooled, validate_size};
use bytebuf_encoding::{Encoding, utf8};
use std::any::Any;
use std::fmt;

#[derive(Clone)]
pub struct Buffer {
    view: View,
}

impl From<View> for Buffer {
    fn from(view: View) -> Self {
        Self { view }
    }
}

impl Buffer {
    /// Zero-filled buffer of `size` bytes.
    pub fn alloc(size: impl Into<Value>) -> Result<Buffer> {
        let size = validate_size(&size.into())?;
        Ok(View::full(ByteStore::allocate(size, true)?).into())
    }

    /// Zero-filled buffer of `size` bytes, then filled with `fill`.
    pub fn alloc_filled<'a>(
        size: impl Into<Value>,
        fill: impl Into<Pattern<'a>>,
        encoding: Option<&str>,
    ) -> Result<Buffer> {
        let buf = Buffer::alloc(size)?;
        if !buf.is_empty() {
            buf.fill_range(fill, None, None, encoding)?;
        }
        Ok(buf)
    }

    /// Buffer with unspecified content. Small sizes are carved out of the
    /// shared allocation pool.
    pub fn allocate_unsafe(size: impl Into<Value>) -> Result<Buffer> {
        let size = validate_size(&size.into())?;
        Ok(allocate_pooled(size)?.into())
    }

    /// Buffer with unspecified content in its own store.
    pub fn allocate_unsafe_slow(size: impl Into<Value>) -> Result<Buffer> {
        let size = validate_size(&size.into())?;
        Ok(View::full(ByteStore::allocate(size, false)?).into())
    }

    pub fn from_bytes(bytes: &[u8]) -> Buffer {
        View::full(ByteStore::from_slice(bytes)).into()
    }

    pub fn from_vec(bytes: Vec<u8>) -> Buffer {
        View::full(ByteStore::from_vec(bytes)).into()
    }

    /// Copies an array of loosely typed values, each reduced modulo 256.
    pub fn from_values(values: &[Value]) -> Result<Buffer> {
        let mut bytes = Vec::with_capacity(values.len());
        for value in values {
            let n = value.to_number("value")?;
            bytes.push(bytebuf_core::value::wrap_unsigned(n, 8) as u8);
        }
        Ok(Buffer::from_vec(bytes))
    }

    /// An independent copy of `other`'s bytes.
    pub fn from_buffer(other: &Buffer) -> Buffer {
        Buffer::from_vec(other.to_vec())
    }

    pub fn from_text(text: &str, encoding: Option<&str>) -> Result<Buffer> {
        let encoding = Encoding::resolve(encoding)?;
        Ok(Buffer::from_vec(encoding.encode(text)))
    }

    /// Aliases `length` bytes of `store` starting at `offset`, without copying.
    pub fn from_store(
        store: ByteStore,
        offset: impl Into<Value>,
        length: impl Into<Value>,
    ) -> Result<Buffer> {
        let capacity = store.capacity();
        let (offset, length) = alias_range(capacity, &offset.into(), &length.into())?;
        Ok(View::new(store, offset, length)?.into())
    }

    /// Aliases a range of `other`, relative to its own start.
    pub fn from_view(
        other: &Buffer,
        offset: impl Into<Value>,
        length: impl Into<Value>,
    ) -> Result<Buffer> {
        let (offset, length) = alias_range(other.len(), &offset.into(), &length.into())?;
        Ok(other.view.sub(offset, length).into())
    }

    /// Copies a clamped range of `other` into a new store.
    pub fn copy_bytes_from(other: &Buffer, offset: Option<usize>, length: Option<usize>) -> Buffer {
        let start = offset.unwrap_or(0).min(other.len());
        let len = length.unwrap_or(usize::MAX).min(other.len() - start);
        Buffer::from_vec(other.view.sub(start, len).to_vec())
    }

    pub fn is_buffer(value: &dyn Any) -> bool {
        value.is::<Buffer>()
    }

    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    pub fn byte_offset(&self) -> usize {
        self.view.byte_offset()
    }

    pub fn store(&self) -> &ByteStore {
        self.view.store()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.view.get(index)
    }

    pub fn set(&self, index: usize, byte: u8) -> Result<()> {
        self.view.set(index, byte)
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.view.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len()).filter_map(move |i| self.view.get(i))
    }

    pub fn entries(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.iter().enumerate()
    }

    pub(crate) fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        self.view.with_bytes(f)
    }

    pub(crate) fn with_bytes_mut<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        self.view.with_bytes_mut(f)
    }

    /// Zero-copy sub-buffer. Negative indices count from the end, indices
    /// clamp to the buffer, and `start > end` yields an empty buffer.
    pub fn slice(&self, start: i64, end: i64) -> Buffer {
        self.view.slice(start, end).into()
    }

    pub fn slice_from(&self, start: i64) -> Buffer {
        self.slice(start, self.len() as i64)
    }

    /// Same as `slice`.
    pub fn subarray(&self, start: i64, end: i64) -> Buffer {
        self.slice(start, end)
    }

    pub fn to_text(&self, encoding: Option<&str>) -> Result<String> {
        let encoding = Encoding::resolve(encoding)?;
        Ok(self.with_bytes(|b| encoding.decode(b)))
    }

    /// Decodes `[start, end)`; the range is clamped and an empty or inverted
    /// range gives an empty string.
    pub fn to_text_range(
        &self,
        encoding: Option<&str>,
        start: Option<usize>,
        end: Option<usize>,
    ) -> Result<String> {
        let encoding = Encoding::resolve(encoding)?;
        let start = start.unwrap_or(0);
        let end = end.unwrap_or(self.len()).min(self.len());
        if start >= end {
            return Ok(String::new());
        }
        Ok(self.with_bytes(|b| encoding.decode(&b[start..end])))
    }

    /// Encodes `text` into this buffer at `offset`, writing at most `length`
    /// bytes. Returns the number of bytes written. UTF-8 never writes a
    /// partial character and UTF-16LE never writes half a code unit.
    pub fn write(
        &self,
        text: &str,
        offset: Option<usize>,
        length: Option<usize>,
        encoding: Option<&str>,
    ) -> Result<usize> {
        let encoding = Encoding::resolve(encoding)?;
        let offset = offset.unwrap_or(0);
        if offset > self.len() {
            return Err(BufferError::out_of_range(
                "offset",
                format!(">= 0 && <= {}", self.len()),
                offset,
            ));
        }
        let limit = length.unwrap_or(usize::MAX).min(self.len() - offset);
        let bytes = match encoding {
            Encoding::Utf8 => utf8::truncate_to_boundary(text, limit).as_bytes().to_vec(),
            Encoding::Utf16Le => {
                let mut bytes = encoding.encode(text);
                bytes.truncate(limit & !1);
                bytes
            }
            _ => {
                let mut bytes = encoding.encode(text);
                bytes.truncate(limit);
                bytes
            }
        };
        self.with_bytes_mut(|b| b[offset..offset + bytes.len()].copy_from_slice(&bytes));
        Ok(bytes.len())
    }
}

fn alias_range(capacity: usize, offset: &Value, length: &Value) -> Result<(usize, usize)> {
    let offset = offset.to_strict_integer("offset")?.unwrap_or(0);
    if offset < 0 || offset as u64 > capacity as u64 {
        return Err(BufferError::out_of_bounds(Some("offset")));
    }
    let offset = offset as usize;
    let max_length = capacity - offset;
    let length = match length.to_strict_integer("length")? {
        None => max_length,
        Some(n) if n < 0 || n as u64 > max_length as u64 => {
            return Err(BufferError::out_of_bounds(Some("length")));
        }
        Some(n) => n as usize,
    };
    Ok((offset, length))
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.view == other.view
    }
}

impl Eq for Buffer {}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.with_bytes(utf8::decode))
    }
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Self {
        Buffer::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Buffer::from_vec(bytes)
    }
}
