///
/// View - Zero-Copy Windows Over a ByteStore
///
/// A View is `(store, byte_offset, len)`. It never copies: writes through any
/// view are visible through every other view that overlaps the same bytes.
/// Cloning a View clones the handle, not the bytes.
///
/// Invariant: `byte_offset + len <= store.capacity()`, checked on creation.
///

use crate::error::{BufferError, Result};
use crate::store::ByteStore;

#[derive(Clone, Debug)]
pub struct View {
    store: ByteStore,
    offset: usize,
    len: usize,
}

impl View {
    pub fn new(store: ByteStore, offset: usize, len: usize) -> Result<Self> {
        let capacity = store.capacity();
        if offset > capacity {
            return Err(BufferError::out_of_bounds(Some("offset")));
        }
        if len > capacity - offset {
            return Err(BufferError::out_of_bounds(Some("length")));
        }
        Ok(Self { store, offset, len })
    }

    pub fn full(store: ByteStore) -> Self {
        let len = store.capacity();
        Self {
            store,
            offset: 0,
            len,
        }
    }

    pub fn store(&self) -> &ByteStore {
        &self.store
    }

    pub fn byte_offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A new view over `[start, end)` of this one. Negative indices count from
    /// the end, out-of-range indices clamp, and `start > end` gives an empty view.
    pub fn slice(&self, start: i64, end: i64) -> View {
        let start = resolve_index(start, self.len);
        let end = resolve_index(end, self.len).max(start);
        self.sub(start, end - start)
    }

    /// Sub-view from already validated bounds.
    pub fn sub(&self, start: usize, len: usize) -> View {
        debug_assert!(start + len <= self.len);
        View {
            store: self.store.clone(),
            offset: self.offset + start,
            len,
        }
    }

    pub fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        self.store
            .with_bytes(|all| f(&all[self.offset..self.offset + self.len]))
    }

    pub fn with_bytes_mut<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        self.store
            .with_bytes_mut(|all| f(&mut all[self.offset..self.offset + self.len]))
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        if index >= self.len {
            return None;
        }
        Some(self.with_bytes(|b| b[index]))
    }

    pub fn set(&self, index: usize, byte: u8) -> Result<()> {
        if index >= self.len {
            return Err(BufferError::out_of_range(
                "index",
                format!(">= 0 and < {}", self.len),
                index,
            ));
        }
        self.with_bytes_mut(|b| b[index] = byte);
        Ok(())
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.with_bytes(<[u8]>::to_vec)
    }

    pub fn shares_store(&self, other: &View) -> bool {
        self.store.ptr_eq(&other.store)
    }

    /// True when both views share a store and their byte ranges intersect.
    pub fn overlaps(&self, other: &View) -> bool {
        self.shares_store(other)
            && self.offset < other.offset + other.len
            && other.offset < self.offset + self.len
    }
}

impl PartialEq for View {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        if self.shares_store(other) && self.offset == other.offset {
            return true;
        }
        self.with_bytes(|a| other.with_bytes(|b| a == b))
    }
}

impl Eq for View {}

/// Maps a possibly negative index onto `[0, len]`.
pub fn resolve_index(index: i64, len: usize) -> usize {
    if index < 0 {
        let from_end = len as i64 + index;
        from_end.max(0) as usize
    } else {
        (index as u64).min(len as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_of(bytes: &[u8]) -> View {
        View::full(ByteStore::from_slice(bytes))
    }

    #[test]
    fn test_slice_aliases_store() {
        let view = view_of(&[1, 2, 3, 4, 5]);
        let sub = view.slice(1, 4);
        assert_eq!(sub.len(), 3);
        assert_eq!(sub.byte_offset(), 1);
        sub.set(0, 42).unwrap();
        assert_eq!(view.get(1), Some(42));
        assert!(sub.overlaps(&view));
    }

    #[test]
    fn test_slice_negative_and_clamped() {
        let view = view_of(&[1, 2, 3, 4, 5]);
        assert_eq!(view.slice(-2, 5).to_vec(), vec![4, 5]);
        assert_eq!(view.slice(-100, 2).to_vec(), vec![1, 2]);
        assert_eq!(view.slice(3, 100).to_vec(), vec![4, 5]);
        assert!(view.slice(4, 1).is_empty());
        assert!(view.slice(10, 20).is_empty());
    }

    #[test]
    fn test_nested_slices_accumulate_offset() {
        let view = view_of(&[0, 1, 2, 3, 4, 5, 6, 7]);
        let inner = view.slice(2, 7).slice(1, 3);
        assert_eq!(inner.byte_offset(), 3);
        assert_eq!(inner.to_vec(), vec![3, 4]);
    }

    #[test]
    fn test_new_checks_bounds() {
        let store = ByteStore::from_slice(&[0; 4]);
        assert!(View::new(store.clone(), 4, 0).is_ok());
        assert!(View::new(store.clone(), 5, 0).is_err());
        assert!(View::new(store, 2, 3).is_err());
    }

    #[test]
    fn test_equality_by_content() {
        let a = view_of(b"abc");
        let b = view_of(b"abc");
        assert_eq!(a, b);
        assert!(!a.shares_store(&b));
        assert_ne!(a, view_of(b"abd"));
    }

    #[test]
    fn test_set_out_of_range() {
        let view = view_of(&[0; 2]);
        assert_eq!(
            view.set(2, 1).unwrap_err().kind(),
            crate::ErrorKind::OutOfRange
        );
        assert_eq!(view.get(2), None);
    }
}
