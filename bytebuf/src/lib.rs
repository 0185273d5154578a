///
/// bytebuf - Fixed-Capacity Byte Buffers
///
/// `Buffer` is a zero-copy window onto a shared, fixed-capacity byte store.
/// The API is split by concern:
/// - buffer: construction, slicing, element access and string write/decode
/// - numeric: bounds-checked integer, float and bigint fields
/// - ops: concat, compare, search, fill, copy, reverse and byte swaps
/// - text: byte lengths, UTF-8/ASCII checks, atob/btoa, transcoding
/// - inspect: `<Buffer ..>` rendering and the JSON form
///
/// Slices alias their parent. Write through one and every overlapping
/// buffer sees the change; use `Buffer::from_buffer` for an independent copy.
///

pub mod buffer;
pub mod inspect;
pub mod numeric;
pub mod ops;
pub mod pattern;
pub mod text;

pub use buffer::Buffer;
pub use pattern::Pattern;
pub use text::{atob, btoa, byte_length, is_ascii, is_utf8, is_valid_utf8, transcode};

pub use bytebuf_core::{BufferConfig, BufferError, ByteStore, ErrorKind, Result, Value, config};
pub use bytebuf_encoding::{Encoding, Endian, is_encoding};
pub use num_bigint::BigInt;
