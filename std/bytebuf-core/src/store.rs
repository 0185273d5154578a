///
/// ByteStore - Shared Backing Memory
///
/// A ByteStore owns a fixed-capacity byte region. Every view over it holds a
/// strong reference, so the region lives until the last view is dropped.
/// Capacity never changes after creation.
///
/// Mutation goes through `with_bytes_mut`; the borrow lasts for the closure
/// only, so overlapping views can be read and written in sequence.
///

use crate::config;
use crate::error::{BufferError, Result};
use crate::value::{Value, format_number};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct ByteStore {
    bytes: Rc<RefCell<Box<[u8]>>>,
}

impl ByteStore {
    /// Allocates `len` bytes. With `zero == false` the content is unspecified
    /// to callers; it is still initialized memory.
    pub fn allocate(len: usize, zero: bool) -> Result<Self> {
        let max = config::current().max_length;
        if len > max {
            return Err(BufferError::invalid_size(len));
        }
        let mut data: Vec<u8> = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| BufferError::invalid_size(len))?;
        data.resize(len, 0);
        tracing::trace!(len, zero, "allocated byte store");
        Ok(Self::from_vec(data))
    }

    pub fn from_vec(data: Vec<u8>) -> Self {
        Self {
            bytes: Rc::new(RefCell::new(data.into_boxed_slice())),
        }
    }

    pub fn from_slice(data: &[u8]) -> Self {
        Self::from_vec(data.to_vec())
    }

    pub fn capacity(&self) -> usize {
        self.bytes.borrow().len()
    }

    /// Number of live handles (views and stores) sharing this region.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.bytes)
    }

    pub fn ptr_eq(&self, other: &ByteStore) -> bool {
        Rc::ptr_eq(&self.bytes, &other.bytes)
    }

    pub fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(&self.bytes.borrow())
    }

    pub fn with_bytes_mut<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        f(&mut self.bytes.borrow_mut())
    }
}

impl std::fmt::Debug for ByteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteStore")
            .field("capacity", &self.capacity())
            .field("ref_count", &self.ref_count())
            .finish()
    }
}

/// Validates an allocation size argument. Fractional sizes truncate toward
/// zero first; anything negative, non-finite, non-numeric or above the
/// configured maximum is rejected.
pub fn validate_size(size: &Value) -> Result<usize> {
    let n = match size {
        Value::Number(n) => *n,
        other => return Err(BufferError::invalid_size(other.describe())),
    };
    if !n.is_finite() {
        return Err(BufferError::invalid_size(format_number(n)));
    }
    let n = n.trunc();
    if n < 0.0 || n > config::current().max_length as f64 {
        return Err(BufferError::invalid_size(format_number(n)));
    }
    Ok(n as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_allocate_zeroed() {
        let store = ByteStore::allocate(16, true).unwrap();
        assert_eq!(store.capacity(), 16);
        store.with_bytes(|b| assert!(b.iter().all(|&x| x == 0)));
    }

    #[test]
    fn test_allocate_rejects_oversized() {
        let err = ByteStore::allocate(config::current().max_length + 1, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSize);
    }

    #[test]
    fn test_shared_ownership() {
        let store = ByteStore::from_slice(&[1, 2, 3]);
        let other = store.clone();
        assert_eq!(store.ref_count(), 2);
        other.with_bytes_mut(|b| b[0] = 9);
        store.with_bytes(|b| assert_eq!(b[0], 9));
        assert!(store.ptr_eq(&other));
        drop(other);
        assert_eq!(store.ref_count(), 1);
    }

    #[test]
    fn test_validate_size() {
        assert_eq!(validate_size(&Value::from(10.9)).unwrap(), 10);
        assert_eq!(validate_size(&Value::from(0)).unwrap(), 0);
        assert_eq!(validate_size(&Value::from(-0.5)).unwrap(), 0);
        for bad in [
            Value::from(-1),
            Value::from(f64::NAN),
            Value::from(f64::INFINITY),
            Value::from("10"),
            Value::Undefined,
            Value::from(1e300),
        ] {
            let err = validate_size(&bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidSize, "{:?}", bad);
        }
    }
}
