///
/// bytebuf_encoding::utf8 - UTF-8 Validation and Decoding
///
/// A byte-at-a-time state machine shared by the validity predicate and the
/// lossy decoder:
///
/// - Start: expecting a leading byte
/// - NeedCont: `remaining` continuation bytes still expected; the next one
///   must fall in `[lower, upper]` (narrowed after E0/ED/F0/F4 to exclude
///   overlong forms, surrogates and code points above U+10FFFF)
/// - Invalid: terminal, used only by `Utf8Validator`
///
/// The decoder substitutes one U+FFFD per maximal ill-formed subpart.
///

pub const REPLACEMENT: char = '\u{FFFD}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8State {
    Start,
    NeedCont {
        remaining: u8,
        lower: u8,
        upper: u8,
        code_point: u32,
    },
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A complete scalar value.
    Char(char),
    /// The byte was consumed; the sequence continues.
    Pending,
    /// The bytes seen so far form one ill-formed subpart. When `reprocess`
    /// is set the current byte was not consumed and starts a new sequence.
    Malformed { reprocess: bool },
}

fn lead(byte: u8) -> Option<Utf8State> {
    let (remaining, lower, upper, code_point) = match byte {
        0xC2..=0xDF => (1, 0x80, 0xBF, (byte & 0x1F) as u32),
        0xE0 => (2, 0xA0, 0xBF, 0),
        0xE1..=0xEC | 0xEE..=0xEF => (2, 0x80, 0xBF, (byte & 0x0F) as u32),
        0xED => (2, 0x80, 0x9F, 0x0D),
        0xF0 => (3, 0x90, 0xBF, 0),
        0xF1..=0xF3 => (3, 0x80, 0xBF, (byte & 0x07) as u32),
        0xF4 => (3, 0x80, 0x8F, 0x04),
        _ => return None,
    };
    Some(Utf8State::NeedCont {
        remaining,
        lower,
        upper,
        code_point,
    })
}

/// Advances the decoder by one byte. `Invalid` is treated like `Start`.
pub fn step(state: Utf8State, byte: u8) -> (Utf8State, Step) {
    match state {
        Utf8State::Start | Utf8State::Invalid => {
            if byte < 0x80 {
                return (Utf8State::Start, Step::Char(byte as char));
            }
            match lead(byte) {
                Some(next) => (next, Step::Pending),
                None => (Utf8State::Start, Step::Malformed { reprocess: false }),
            }
        }
        Utf8State::NeedCont {
            remaining,
            lower,
            upper,
            code_point,
        } => {
            if byte < lower || byte > upper {
                return (Utf8State::Start, Step::Malformed { reprocess: true });
            }
            let code_point = (code_point << 6) | (byte & 0x3F) as u32;
            if remaining == 1 {
                let c = char::from_u32(code_point).unwrap_or(REPLACEMENT);
                (Utf8State::Start, Step::Char(c))
            } else {
                (
                    Utf8State::NeedCont {
                        remaining: remaining - 1,
                        lower: 0x80,
                        upper: 0xBF,
                        code_point,
                    },
                    Step::Pending,
                )
            }
        }
    }
}

/// Streaming validity check. Once a malformed byte is seen the validator
/// stays `Invalid`.
#[derive(Debug, Clone)]
pub struct Utf8Validator {
    state: Utf8State,
}

impl Default for Utf8Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Utf8Validator {
    pub fn new() -> Self {
        Self {
            state: Utf8State::Start,
        }
    }

    pub fn state(&self) -> Utf8State {
        self.state
    }

    pub fn feed(&mut self, byte: u8) {
        if self.state == Utf8State::Invalid {
            return;
        }
        let (next, step) = step(self.state, byte);
        self.state = match step {
            Step::Malformed { .. } => Utf8State::Invalid,
            _ => next,
        };
    }

    pub fn feed_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            if self.state == Utf8State::Invalid {
                break;
            }
            self.feed(b);
        }
    }

    /// Valid only when every sequence is complete.
    pub fn is_valid(&self) -> bool {
        self.state == Utf8State::Start
    }
}

pub fn is_valid_utf8(bytes: &[u8]) -> bool {
    let ascii_prefix = bytes.iter().take_while(|b| b.is_ascii()).count();
    let mut validator = Utf8Validator::new();
    validator.feed_all(&bytes[ascii_prefix..]);
    validator.is_valid()
}

/// Decodes UTF-8, replacing each maximal ill-formed subpart with U+FFFD.
pub fn decode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut state = Utf8State::Start;
    let mut i = 0;
    while i < bytes.len() {
        let (next, result) = step(state, bytes[i]);
        state = next;
        match result {
            Step::Char(c) => {
                out.push(c);
                i += 1;
            }
            Step::Pending => i += 1,
            Step::Malformed { reprocess } => {
                out.push(REPLACEMENT);
                if !reprocess {
                    i += 1;
                }
            }
        }
    }
    if state != Utf8State::Start {
        out.push(REPLACEMENT);
    }
    out
}

pub fn encode(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Largest prefix of `text` that fits in `limit` bytes without splitting a
/// character.
pub fn truncate_to_boundary(text: &str, limit: usize) -> &str {
    if limit >= text.len() {
        return text;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sequences() {
        assert!(is_valid_utf8(b""));
        assert!(is_valid_utf8(b"Hello"));
        assert!(is_valid_utf8("caf\u{e9}".as_bytes()));
        assert!(is_valid_utf8("\u{20AC}".as_bytes()));
        assert!(is_valid_utf8("\u{1F600}".as_bytes()));
        assert!(is_valid_utf8(&[0xF4, 0x8F, 0xBF, 0xBF]));
    }

    #[test]
    fn test_invalid_sequences() {
        assert!(!is_valid_utf8(&[0xC2]));
        assert!(!is_valid_utf8(&[0xC0, 0x80]));
        assert!(!is_valid_utf8(&[0xC1, 0xBF]));
        assert!(!is_valid_utf8(&[0xE0, 0x80, 0x80]));
        assert!(!is_valid_utf8(&[0xED, 0xA0, 0x80]));
        assert!(!is_valid_utf8(&[0xF0, 0x80, 0x80, 0x80]));
        assert!(!is_valid_utf8(&[0xF4, 0x90, 0x80, 0x80]));
        assert!(!is_valid_utf8(&[0xF5, 0x80, 0x80, 0x80]));
        assert!(!is_valid_utf8(&[0xFF]));
        assert!(!is_valid_utf8(&[0x80]));
        assert!(!is_valid_utf8(&[b'a', 0xE2, 0x82]));
    }

    #[test]
    fn test_validator_is_terminal_once_invalid() {
        let mut v = Utf8Validator::new();
        v.feed(0xFF);
        assert_eq!(v.state(), Utf8State::Invalid);
        v.feed(b'a');
        assert!(!v.is_valid());
    }

    #[test]
    fn test_decode_replaces_maximal_subparts() {
        assert_eq!(decode(b"abc"), "abc");
        assert_eq!(decode(&[0xFF]), "\u{FFFD}");
        assert_eq!(decode(&[0xE2, 0x82, b'a']), "\u{FFFD}a");
        assert_eq!(decode(&[0xC0, 0x80]), "\u{FFFD}\u{FFFD}");
        assert_eq!(decode(&[0xED, 0xA0, 0x80]), "\u{FFFD}\u{FFFD}\u{FFFD}");
        assert_eq!(decode(&[0xF0, 0x9F, 0x98]), "\u{FFFD}");
        assert_eq!(decode(&[b'x', 0xF0, 0x9F, 0x98, 0x80]), "x\u{1F600}");
    }

    #[test]
    fn test_decode_matches_std_lossy() {
        let samples: [&[u8]; 5] = [
            &[0x61, 0xF1, 0x80, 0x80, 0xE1, 0x80, 0xC2, 0x62],
            &[0xF4, 0x91, 0x92, 0x93, 0xFF, 0x41, 0x80, 0xBF, 0x42],
            &[0xE1, 0x80, 0xE2, 0xF0, 0x91, 0x92, 0xF1, 0xBF, 0x41],
            &[0xEF, 0xBB, 0xBF, 0x68, 0x69],
            &[0xC3],
        ];
        for sample in samples {
            assert_eq!(decode(sample), String::from_utf8_lossy(sample));
        }
    }

    #[test]
    fn test_truncate_to_boundary() {
        let s = "a\u{20AC}b";
        assert_eq!(truncate_to_boundary(s, 1), "a");
        assert_eq!(truncate_to_boundary(s, 3), "a");
        assert_eq!(truncate_to_boundary(s, 4), "a\u{20AC}");
        assert_eq!(truncate_to_boundary(s, 10), s);
    }
}
