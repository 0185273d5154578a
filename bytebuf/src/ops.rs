///
/// Buffer Operations
///
/// Concatenation, ordering, searching, filling, copying and in-place byte
/// reordering. Operations that touch two buffers handle the case where both
/// alias the same store.
///

use crate::buffer::Buffer;
use crate::pattern::Pattern;
use bytebuf_core::{BufferError, Result};
use bytebuf_encoding::{Encoding, binary};
use memchr::memmem;
use std::cmp::Ordering;

impl Buffer {
    /// Joins `list` into a fresh buffer. With `total_length` the result is
    /// exactly that long: truncated, or zero-padded at the end.
    pub fn concat(list: &[Buffer], total_length: Option<usize>) -> Result<Buffer> {
        let total = total_length.unwrap_or_else(|| list.iter().map(Buffer::len).sum());
        tracing::trace!(parts = list.len(), total, "concatenating buffers");
        let out = Buffer::alloc(total)?;
        let mut pos = 0;
        for item in list {
            if pos >= total {
                break;
            }
            let n = item.len().min(total - pos);
            item.with_bytes(|src| out.with_bytes_mut(|dst| dst[pos..pos + n].copy_from_slice(&src[..n])));
            pos += n;
        }
        Ok(out)
    }

    /// Lexicographic byte comparison; a strict prefix orders first.
    pub fn compare(&self, other: &Buffer) -> Ordering {
        self.with_bytes(|a| other.with_bytes(|b| a.cmp(b)))
    }

    /// Compares `self[source_start..source_end]` against
    /// `target[target_start..target_end]`. Absent bounds cover the whole
    /// buffer; bounds past the end are rejected.
    pub fn compare_range(
        &self,
        target: &Buffer,
        target_start: Option<usize>,
        target_end: Option<usize>,
        source_start: Option<usize>,
        source_end: Option<usize>,
    ) -> Result<Ordering> {
        let target_start = bound("targetStart", target_start, 0, target.len())?;
        let target_end = bound("targetEnd", target_end, target.len(), target.len())?;
        let source_start = bound("sourceStart", source_start, 0, self.len())?;
        let source_end = bound("sourceEnd", source_end, self.len(), self.len())?;

        if source_start >= source_end {
            return Ok(if target_start >= target_end {
                Ordering::Equal
            } else {
                Ordering::Less
            });
        }
        if target_start >= target_end {
            return Ok(Ordering::Greater);
        }
        Ok(self.with_bytes(|a| {
            target.with_bytes(|b| a[source_start..source_end].cmp(&b[target_start..target_end]))
        }))
    }

    pub fn equals(&self, other: &Buffer) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// First position at or after `byte_offset` where `needle` occurs.
    pub fn index_of<'a>(
        &self,
        needle: impl Into<Pattern<'a>>,
        byte_offset: Option<i64>,
        encoding: Option<&str>,
    ) -> Result<Option<usize>> {
        self.search(needle.into(), byte_offset, encoding, true)
    }

    /// Last position at or before `byte_offset` where `needle` occurs.
    pub fn last_index_of<'a>(
        &self,
        needle: impl Into<Pattern<'a>>,
        byte_offset: Option<i64>,
        encoding: Option<&str>,
    ) -> Result<Option<usize>> {
        self.search(needle.into(), byte_offset, encoding, false)
    }

    pub fn includes<'a>(
        &self,
        needle: impl Into<Pattern<'a>>,
        byte_offset: Option<i64>,
        encoding: Option<&str>,
    ) -> Result<bool> {
        Ok(self.index_of(needle, byte_offset, encoding)?.is_some())
    }

    fn search(
        &self,
        needle: Pattern<'_>,
        byte_offset: Option<i64>,
        encoding: Option<&str>,
        forward: bool,
    ) -> Result<Option<usize>> {
        let (needle, encoding) = match needle {
            Pattern::Text(text) => {
                let encoding = Encoding::resolve(encoding)?;
                (encoding.encode(text), encoding)
            }
            other => (other.to_bytes(Encoding::Utf8), Encoding::Utf8),
        };
        let len = self.len();
        let offset = byte_offset.unwrap_or(if forward { 0 } else { len as i64 });
        let Some(start) = search_start(len, offset, needle.len(), forward) else {
            return Ok(None);
        };
        if needle.is_empty() {
            return Ok(Some(start));
        }
        if len == 0 || needle.len() > len || (forward && start + needle.len() > len) {
            return Ok(None);
        }

        // UTF-16 matches must land on a code unit boundary.
        let aligned = encoding == Encoding::Utf16Le;
        Ok(self.with_bytes(|hay| {
            if forward {
                if aligned {
                    find_aligned(hay, &needle, start)
                } else {
                    memmem::find(&hay[start..], &needle).map(|pos| pos + start)
                }
            } else {
                let prefix = &hay[..start.min(len - needle.len()) + needle.len()];
                if aligned {
                    rfind_aligned(prefix, &needle)
                } else {
                    memmem::rfind(prefix, &needle)
                }
            }
        }))
    }

    pub fn fill<'a>(&self, value: impl Into<Pattern<'a>>) -> Result<&Self> {
        self.fill_range(value, None, None, None)
    }

    /// Repeats `value` across `[start, end)`, truncating the last repetition.
    pub fn fill_range<'a>(
        &self,
        value: impl Into<Pattern<'a>>,
        start: Option<usize>,
        end: Option<usize>,
        encoding: Option<&str>,
    ) -> Result<&Self> {
        let start = bound("offset", start, 0, self.len())?;
        let end = bound("end", end, self.len(), self.len())?;
        let value = value.into();
        let encoding = match value {
            Pattern::Text(_) => Encoding::resolve(encoding)?,
            _ => Encoding::Utf8,
        };
        if end <= start {
            return Ok(self);
        }

        let pattern = match value {
            Pattern::Text("") => vec![0],
            ref other => {
                let bytes = other.to_bytes(encoding);
                if bytes.is_empty() {
                    return Err(BufferError::invalid_input(
                        encoding.name(),
                        "fill value encodes to zero bytes",
                    ));
                }
                bytes
            }
        };
        self.with_bytes_mut(|b| {
            let span = &mut b[start..end];
            if let [byte] = pattern.as_slice() {
                span.fill(*byte);
            } else {
                for chunk in span.chunks_mut(pattern.len()) {
                    chunk.copy_from_slice(&pattern[..chunk.len()]);
                }
            }
        });
        Ok(self)
    }

    /// Copies `self[source_start..source_end]` into `target` at
    /// `target_start`, as much as fits. Overlapping ranges in the same store
    /// copy as if through an intermediate buffer. Returns the byte count.
    pub fn copy(
        &self,
        target: &Buffer,
        target_start: Option<usize>,
        source_start: Option<usize>,
        source_end: Option<usize>,
    ) -> Result<usize> {
        let target_start = target_start.unwrap_or(0);
        let source_start = bound("sourceStart", source_start, 0, self.len())?;
        let source_end = source_end.unwrap_or(self.len()).min(self.len());
        if target_start >= target.len() || source_start >= source_end {
            return Ok(0);
        }
        let n = (source_end - source_start).min(target.len() - target_start);

        if self.view().shares_store(target.view()) {
            let from = self.byte_offset() + source_start;
            let to = target.byte_offset() + target_start;
            tracing::trace!(from, to, n, "copying within one store");
            self.store().with_bytes_mut(|b| b.copy_within(from..from + n, to));
        } else {
            self.with_bytes(|src| {
                target.with_bytes_mut(|dst| {
                    dst[target_start..target_start + n]
                        .copy_from_slice(&src[source_start..source_start + n])
                })
            });
        }
        Ok(n)
    }

    pub fn reverse(&self) -> &Self {
        self.with_bytes_mut(|b| b.reverse());
        self
    }

    pub fn swap16(&self) -> Result<&Self> {
        self.swap_chunks(2)
    }

    pub fn swap32(&self) -> Result<&Self> {
        self.swap_chunks(4)
    }

    pub fn swap64(&self) -> Result<&Self> {
        self.swap_chunks(8)
    }

    fn swap_chunks(&self, chunk: usize) -> Result<&Self> {
        if self.len() % chunk != 0 {
            return Err(BufferError::out_of_range(
                "length",
                format!("a multiple of {}", chunk),
                self.len(),
            ));
        }
        self.with_bytes_mut(|b| binary::swap_chunks(b, chunk));
        Ok(self)
    }
}

/// Resolves an optional bound, rejecting values past `max`.
fn bound(name: &str, value: Option<usize>, default: usize, max: usize) -> Result<usize> {
    match value {
        None => Ok(default),
        Some(v) if v > max => Err(BufferError::out_of_range(
            name,
            format!(">= 0 and <= {}", max),
            v,
        )),
        Some(v) => Ok(v),
    }
}

/// First even position at or after `from` where `needle` occurs. Odd hits
/// restart the search one byte later, so overlapping even hits are not lost.
fn find_aligned(hay: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    let mut pos = from;
    loop {
        let found = pos + memmem::find(&hay[pos..], needle)?;
        if found % 2 == 0 {
            return Some(found);
        }
        pos = found + 1;
    }
}

/// Last even position where `needle` occurs entirely inside `hay`.
fn rfind_aligned(hay: &[u8], needle: &[u8]) -> Option<usize> {
    let mut end = hay.len();
    loop {
        let found = memmem::rfind(&hay[..end], needle)?;
        if found % 2 == 0 {
            return Some(found);
        }
        end = found + needle.len() - 1;
    }
}

/// Where a search begins. Negative offsets count from the end; offsets that
/// leave no room for the needle either clamp or end the search, depending on
/// direction.
fn search_start(len: usize, offset: i64, needle_len: usize, forward: bool) -> Option<usize> {
    let len_i = len as i64;
    if offset < 0 {
        if offset + len_i >= 0 {
            Some((len_i + offset) as usize)
        } else if forward || needle_len == 0 {
            Some(0)
        } else {
            None
        }
    } else if offset.saturating_add(needle_len as i64) <= len_i {
        Some(offset as usize)
    } else if needle_len == 0 {
        Some(len)
    } else if forward {
        None
    } else {
        len.checked_sub(1)
    }
}

impl PartialOrd for Buffer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Buffer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}
