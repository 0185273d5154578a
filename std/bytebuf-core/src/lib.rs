//!
//! bytebuf-core - Storage, Views and Argument Coercion
//!
//! This crate provides the fundamental types shared across the bytebuf crates:
//!
//! - `ByteStore` for reference-counted, fixed-capacity byte regions
//! - `View` for zero-copy `(offset, length)` windows over a store
//! - `Value` for loosely typed arguments and their numeric coercion
//! - `BufferError` / `ErrorKind` for the error taxonomy
//! - `BufferConfig` for process-wide tunables
//! - a thread-local pool for small uninitialized allocations
//!
//! Stores are single-threaded (`Rc`); hosts that share buffers across threads
//! must provide their own synchronization.
//!

pub mod config;
pub mod error;
pub mod pool;
pub mod store;
pub mod value;
pub mod view;

pub use config::BufferConfig;
pub use error::{BufferError, ErrorKind, Result};
pub use pool::allocate_pooled;
pub use store::{ByteStore, validate_size};
pub use value::Value;
pub use view::{View, resolve_index};
