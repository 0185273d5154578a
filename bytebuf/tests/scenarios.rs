///
/// # Buffer Behaviour Scenarios
///
/// End-to-end checks of the public `Buffer` API: numeric round trips, text
/// conversions, UTF-8 validation, concatenation, and the laws that tie the
/// pieces together (wraparound, endian mirroring, aliasing, swap idempotence).
///

use bytebuf::{BigInt, Buffer, ErrorKind, Value, atob, byte_length, is_valid_utf8};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

#[test]
fn test_mixed_width_writes_read_back() {
    init_tracing();
    let buf = Buffer::alloc(6).unwrap();
    assert_eq!(buf.write_int16_be(12345, 0).unwrap(), 2);
    assert_eq!(buf.write_int32_le(67890, 2).unwrap(), 6);
    assert_eq!(buf.read_int16_be(0).unwrap(), 12345);
    assert_eq!(buf.read_int32_le(2).unwrap(), 67890);
}

#[test]
fn test_write_past_end_leaves_buffer_untouched() {
    let buf = Buffer::alloc(4).unwrap();
    buf.write_int16_be(12345, 0).unwrap();
    let err = buf.write_int32_le(67890, 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert_eq!(buf.to_vec(), vec![0x30, 0x39, 0, 0]);
}

#[test]
fn test_hex_text_decodes_to_utf8() {
    let buf = Buffer::from_text("68656c6c6f", Some("hex")).unwrap();
    assert_eq!(buf.to_text(Some("utf8")).unwrap(), "hello");
    assert!(Buffer::from_text("hello", Some("hex")).unwrap().is_empty());
}

#[test]
fn test_malformed_base64_is_lenient_but_unknown_encoding_is_not() {
    assert!(Buffer::from_text("!!!", Some("base64url")).unwrap().is_empty());
    assert_eq!(atob("!!!"), "");
    let err = Buffer::from_text("a", Some("base65")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownEncoding);
}

#[test]
fn test_truncated_sequence_is_invalid_utf8() {
    let buf = Buffer::from_bytes(&[0xC2]);
    assert!(!is_valid_utf8(&buf, None, None).unwrap());
    assert_eq!(buf.to_text(None).unwrap(), "\u{FFFD}");
}

#[test]
fn test_concat_with_total_length() {
    let parts = [
        Buffer::from_text("Hello", None).unwrap(),
        Buffer::from_text(" World", None).unwrap(),
    ];
    let joined = Buffer::concat(&parts, Some(8)).unwrap();
    assert_eq!(joined.to_text(None).unwrap(), "Hello Wo");
}

#[test]
fn test_uint8_wraparound() {
    let buf = Buffer::alloc(1).unwrap();
    buf.write_uint8(256, 0).unwrap();
    assert_eq!(buf.read_uint8(0).unwrap(), 0);
    buf.write_uint8(-1, 0).unwrap();
    assert_eq!(buf.read_uint8(0).unwrap(), 255);
    buf.write_int8(Value::from("130"), 0).unwrap();
    assert_eq!(buf.read_int8(0).unwrap(), -126);
}

#[test]
fn test_endian_mirror() {
    let be = Buffer::alloc(8).unwrap();
    let le = Buffer::alloc(8).unwrap();
    be.write_uint32_be(0xDEAD_BEEFu32, 0).unwrap();
    le.write_uint32_le(0xDEAD_BEEFu32, 0).unwrap();
    let mut mirrored = le.slice(0, 4).to_vec();
    mirrored.reverse();
    assert_eq!(be.slice(0, 4).to_vec(), mirrored);

    be.write_double_be(-2.5, 0).unwrap();
    le.write_double_le(-2.5, 0).unwrap();
    let mut mirrored = le.to_vec();
    mirrored.reverse();
    assert_eq!(be.to_vec(), mirrored);

    be.write_big_int64_be(Value::bigint(-42), 0).unwrap();
    le.write_big_int64_le(Value::bigint(-42), 0).unwrap();
    let mut mirrored = le.to_vec();
    mirrored.reverse();
    assert_eq!(be.to_vec(), mirrored);
}

#[test]
fn test_slices_alias_their_parent() {
    let parent = Buffer::from_text("abcdef", None).unwrap();
    let child = parent.slice(2, 4);
    child.set(0, b'X').unwrap();
    assert_eq!(parent.get(2), Some(b'X'));

    let grandchild = child.slice_from(-1);
    grandchild.write_uint8(b'Y', 0).unwrap();
    assert_eq!(parent.to_text(None).unwrap(), "abXYef");

    let copy = Buffer::from_buffer(&parent);
    copy.fill(0).unwrap();
    assert_eq!(parent.to_text(None).unwrap(), "abXYef");
}

#[test]
fn test_slice_clamps_and_counts_from_end() {
    let buf = Buffer::from_text("abcdef", None).unwrap();
    assert_eq!(buf.slice(-2, 100).to_text(None).unwrap(), "ef");
    assert_eq!(buf.slice(-100, 2).to_text(None).unwrap(), "ab");
    assert!(buf.slice(4, 2).is_empty());
    assert_eq!(buf.subarray(1, -1).to_text(None).unwrap(), "bcde");
}

#[test]
fn test_swap_is_idempotent() {
    let original: Vec<u8> = (0..16).collect();
    let buf = Buffer::from_vec(original.clone());
    for swap in [Buffer::swap16, Buffer::swap32, Buffer::swap64] {
        swap(&buf).unwrap();
        assert_ne!(buf.to_vec(), original);
        swap(&buf).unwrap();
        assert_eq!(buf.to_vec(), original);
    }
}

#[test]
fn test_byte_length_matches_encoded_length() {
    for text in ["", "plain", "caf\u{E9}", "\u{1F600} emoji", "\u{20AC}\u{20AC}"] {
        for encoding in ["utf8", "utf16le", "latin1", "ascii"] {
            let encoded = Buffer::from_text(text, Some(encoding)).unwrap();
            assert_eq!(
                byte_length(text, Some(encoding)).unwrap(),
                encoded.len(),
                "{:?} as {}",
                text,
                encoding
            );
        }
    }
    for (text, expected) in [("aGVsbG8=", 5), ("aGVsbG8", 5), ("aGk", 2), ("a", 0)] {
        assert_eq!(byte_length(text, Some("base64")).unwrap(), expected);
        assert_eq!(Buffer::from_text(text, Some("base64")).unwrap().len(), expected);
    }
}

#[test]
fn test_pooled_allocations_share_a_store() {
    let a = Buffer::allocate_unsafe(10).unwrap();
    let b = Buffer::allocate_unsafe(10).unwrap();
    assert_eq!(a.len(), 10);
    assert!(a.store().ptr_eq(b.store()));
    assert_eq!(b.byte_offset() % 8, 0);
    assert_ne!(a.byte_offset(), b.byte_offset());

    let slow = Buffer::allocate_unsafe_slow(10).unwrap();
    assert_eq!(slow.byte_offset(), 0);
    assert_eq!(slow.store().capacity(), 10);
}

#[test]
fn test_alloc_with_fill() {
    let buf = Buffer::alloc_filled(5, "ab", None).unwrap();
    assert_eq!(buf.to_text(None).unwrap(), "ababa");
    let buf = Buffer::alloc_filled(4, "aGk=", Some("base64")).unwrap();
    assert_eq!(buf.to_text(None).unwrap(), "hihi");
    let buf = Buffer::alloc_filled(3, 0xFF, None).unwrap();
    assert_eq!(buf.to_vec(), vec![0xFF; 3]);
}

#[test]
fn test_bigint_fields_accept_reexported_bigint() {
    let buf = Buffer::alloc(8).unwrap();
    assert_eq!(buf.write_big_uint64_le(Value::bigint(BigInt::from(u64::MAX)), 0).unwrap(), 8);
    assert_eq!(buf.read_big_uint64_le(0).unwrap(), u64::MAX);
    let err = buf
        .write_big_int64_be(Value::bigint(BigInt::from(i64::MIN) - 1), 0)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
}
