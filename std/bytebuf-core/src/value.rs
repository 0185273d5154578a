//!
//! Argument Values and Numeric Coercion
//!
//! Buffer accessors accept loosely typed arguments the way a scripting host
//! hands them over: numbers, numeric strings, booleans, bigints and objects
//! that expose a primitive conversion hook. `Value` models those inputs and
//! this module is the single place where they are coerced:
//!
//! - `to_number`: primitive conversion followed by string/boolean parsing
//! - `to_strict_integer`: the stricter rule used for offsets and lengths
//! - `wrap_unsigned` / `wrap_signed`: modular reduction into a field width
//!
//! BigInt values never coerce to numbers; numbers never coerce to bigints.
//!

use crate::error::{BufferError, Result};
use num_bigint::BigInt;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    BigInt(BigInt),
    /// An object; `Some` carries the result of its primitive conversion hook.
    Object(Option<Box<Value>>),
}

impl Value {
    pub fn bigint(value: impl Into<BigInt>) -> Self {
        Value::BigInt(value.into())
    }

    /// An object whose primitive conversion yields `primitive`.
    pub fn object_with_primitive(primitive: impl Into<Value>) -> Self {
        Value::Object(Some(Box::new(primitive.into())))
    }

    /// An object without a usable primitive conversion.
    pub fn plain_object() -> Self {
        Value::Object(None)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn to_primitive(&self) -> Result<Value> {
        match self {
            Value::Object(Some(inner)) => match inner.as_ref() {
                Value::Object(_) => Err(BufferError::type_mismatch(
                    "value",
                    "convertible to a primitive",
                    self.describe(),
                )),
                primitive => Ok(primitive.clone()),
            },
            Value::Object(None) => Err(BufferError::type_mismatch(
                "value",
                "convertible to a primitive",
                self.describe(),
            )),
            other => Ok(other.clone()),
        }
    }

    /// Numeric conversion applied to values written through integer and
    /// float accessors.
    pub fn to_number(&self, name: &str) -> Result<f64> {
        match self.to_primitive()? {
            Value::Undefined => Ok(f64::NAN),
            Value::Null => Ok(0.0),
            Value::Bool(b) => Ok(if b { 1.0 } else { 0.0 }),
            Value::Number(n) => Ok(n),
            Value::String(s) => Ok(string_to_number(&s)),
            Value::BigInt(_) | Value::Object(_) => Err(BufferError::type_mismatch(
                name,
                "of type number",
                self.describe(),
            )),
        }
    }

    /// Offsets and lengths: `None` when absent, otherwise a finite integer.
    pub fn to_strict_integer(&self, name: &str) -> Result<Option<i64>> {
        match self {
            Value::Undefined => Ok(None),
            Value::Number(n) if n.is_finite() && n.fract() == 0.0 => Ok(Some(*n as i64)),
            Value::Number(_) => Err(BufferError::type_mismatch(
                name,
                "an integer",
                self.describe(),
            )),
            _ => Err(BufferError::type_mismatch(
                name,
                "of type number",
                self.describe(),
            )),
        }
    }

    /// The description used in error messages, e.g. `type string ('1')`.
    pub fn describe(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => format!("type boolean ({})", b),
            Value::Number(n) => format!("type number ({})", format_number(*n)),
            Value::String(s) => {
                let shown: String = s.chars().take(25).collect();
                if s.chars().count() > 25 {
                    format!("type string ('{}...')", shown)
                } else {
                    format!("type string ('{}')", shown)
                }
            }
            Value::BigInt(b) => format!("type bigint ({}n)", b),
            Value::Object(_) => "an instance of Object".to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::BigInt(b) => write!(f, "{}n", b),
            Value::Object(_) => write!(f, "[object Object]"),
        }
    }
}

macro_rules! number_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

number_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<BigInt> for Value {
    fn from(b: BigInt) -> Self {
        Value::BigInt(b)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Undefined, Into::into)
    }
}

/// Formats a number the way script hosts print it: integral values without a
/// fraction, `NaN`, `Infinity`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

fn is_script_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}' | '\u{000A}' | '\u{000B}' | '\u{000C}' | '\u{000D}' | '\u{0020}' | '\u{00A0}'
            | '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{2028}' | '\u{2029}' | '\u{202F}'
            | '\u{205F}' | '\u{3000}' | '\u{FEFF}'
    )
}

/// String to number conversion. Unparseable text yields NaN.
pub fn string_to_number(s: &str) -> f64 {
    let s = s.trim_matches(is_script_whitespace);
    if s.is_empty() {
        return 0.0;
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        let mut value = 0.0f64;
        for c in digits.chars() {
            match c.to_digit(radix) {
                Some(d) => value = value * radix as f64 + d as f64,
                None => return f64::NAN,
            }
        }
        return value;
    }

    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if unsigned == "Infinity" {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    if !is_decimal_literal(unsigned) {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return false;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

/// Truncates toward zero and reduces modulo 2^bits. Non-finite input maps to 0.
pub fn wrap_unsigned(n: f64, bits: u32) -> u64 {
    if !n.is_finite() {
        return 0;
    }
    let modulus = 2f64.powi(bits as i32);
    n.trunc().rem_euclid(modulus) as u64
}

/// Like `wrap_unsigned`, reinterpreted as a two's-complement value of `bits`.
pub fn wrap_signed(n: f64, bits: u32) -> i64 {
    let unsigned = wrap_unsigned(n, bits);
    let shift = 64 - bits;
    ((unsigned << shift) as i64) >> shift
}
