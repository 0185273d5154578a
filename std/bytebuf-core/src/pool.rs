///
/// Thread-Local Allocation Pool
///
/// Small uninitialized allocations are carved out of a shared slab instead of
/// each getting their own store. Views handed out by the pool therefore share
/// a ByteStore and usually have a non-zero byte offset.
///
/// Requests of at least half the configured pool size get a dedicated store.
/// The carve offset is kept 8-byte aligned. When the current slab cannot fit
/// a request a fresh slab replaces it; views into the old slab keep it alive.
///

use crate::config;
use crate::error::Result;
use crate::store::ByteStore;
use crate::view::View;
use std::cell::RefCell;

struct Slab {
    store: ByteStore,
    offset: usize,
}

impl Slab {
    fn new(size: usize) -> Result<Self> {
        tracing::debug!(size, "refilling allocation pool");
        Ok(Self {
            store: ByteStore::allocate(size, false)?,
            offset: 0,
        })
    }

    fn remaining(&self) -> usize {
        self.store.capacity() - self.offset
    }

    fn carve(&mut self, len: usize) -> View {
        let view = View::full(self.store.clone()).sub(self.offset, len);
        self.offset = align8(self.offset + len).min(self.store.capacity());
        view
    }
}

thread_local! {
    static POOL: RefCell<Option<Slab>> = const { RefCell::new(None) };
}

#[inline(always)]
fn align8(offset: usize) -> usize {
    (offset + 7) & !7
}

/// Whether a request of `len` bytes is served from the pool.
pub fn is_pooled_size(len: usize) -> bool {
    len > 0 && len < config::current().pool_size >> 1
}

pub fn allocate_pooled(len: usize) -> Result<View> {
    if !is_pooled_size(len) {
        return Ok(View::full(ByteStore::allocate(len, false)?));
    }
    let pool_size = config::current().pool_size;
    POOL.with(|cell| {
        let mut slot = cell.borrow_mut();
        let mut slab = match slot.take() {
            Some(slab) if slab.remaining() >= len => slab,
            _ => Slab::new(pool_size)?,
        };
        let view = slab.carve(len);
        tracing::trace!(len, offset = view.byte_offset(), "carved pooled allocation");
        *slot = Some(slab);
        Ok(view)
    })
}
