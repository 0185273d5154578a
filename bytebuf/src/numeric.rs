///
/// Numeric Accessors
///
/// `read_*` / `write_*` for every integer, float and bigint field. Writes
/// return the offset just past the field so calls can be chained.
///
/// Offsets are strict: absent means 0, anything that is not an integral
/// number is a type mismatch, and the field must fit inside the buffer.
/// Every check runs before the first byte is written.
///
/// Overflow policy per family:
/// - fixed-width integers (8/16/32-bit): value wraps modulo 2^width
/// - variable-width integers (`*_int_be/le`, `*_uint_be/le`, 1-6 bytes):
///   values outside the field's range are rejected
/// - 64-bit bigints: value must be a bigint within range
/// - floats: IEEE-754 conversion, no range check
///

use crate::buffer::Buffer;
use bytebuf_core::value::{format_number, wrap_unsigned};
use bytebuf_core::{BufferError, Result, Value};
use bytebuf_encoding::binary::{self, Endian, NumericField};
use num_traits::ToPrimitive;

const MAX_VARIABLE_WIDTH: usize = 6;

impl Buffer {
    fn check_offset(&self, raw: &Value, width: usize) -> Result<usize> {
        let offset = raw.to_strict_integer("offset")?.unwrap_or(0);
        let len = self.len();
        if len < width {
            return Err(BufferError::out_of_bounds(None));
        }
        let max = len - width;
        if offset < 0 || offset as u64 > max as u64 {
            let received = match raw {
                Value::Number(n) => format_number(*n),
                _ => offset.to_string(),
            };
            return Err(BufferError::out_of_range(
                "offset",
                format!(">= 0 and <= {}", max),
                received,
            ));
        }
        Ok(offset as usize)
    }

    fn read_field(&self, field: NumericField, offset: &Value) -> Result<i64> {
        let at = self.check_offset(offset, field.width)?;
        Ok(self.with_bytes(|b| field.read_int(&b[at..at + field.width])))
    }

    fn store_bits(&self, field: NumericField, at: usize, bits: u64) -> usize {
        self.with_bytes_mut(|b| field.write_bits(&mut b[at..at + field.width], bits));
        at + field.width
    }

    fn write_wrapping(&self, field: NumericField, value: &Value, offset: &Value) -> Result<usize> {
        let n = value.to_number("value")?;
        let at = self.check_offset(offset, field.width)?;
        Ok(self.store_bits(field, at, wrap_unsigned(n, field.bits())))
    }

    fn write_checked(&self, field: NumericField, value: &Value, offset: &Value) -> Result<usize> {
        let n = value.to_number("value")?;
        let (min, max) = (field.min_value(), field.max_value());
        if n < min as f64 || n > max as f64 {
            return Err(BufferError::out_of_range(
                "value",
                format!(">= {} and <= {}", min, max),
                format_number(n),
            ));
        }
        let at = self.check_offset(offset, field.width)?;
        Ok(self.store_bits(field, at, wrap_unsigned(n, field.bits())))
    }

    fn variable_field(byte_length: usize, signed: bool, endian: Endian) -> Result<NumericField> {
        if byte_length == 0 || byte_length > MAX_VARIABLE_WIDTH {
            return Err(BufferError::out_of_range(
                "byteLength",
                format!(">= 1 and <= {}", MAX_VARIABLE_WIDTH),
                byte_length,
            ));
        }
        Ok(NumericField::int(byte_length, signed, endian))
    }

    fn read_float_field(&self, field: NumericField, offset: &Value) -> Result<f64> {
        let at = self.check_offset(offset, field.width)?;
        Ok(self.with_bytes(|b| {
            let bytes = &b[at..at + field.width];
            if field.width == 4 {
                binary::read_f32(bytes, field.endian) as f64
            } else {
                binary::read_f64(bytes, field.endian)
            }
        }))
    }

    fn write_float_field(&self, field: NumericField, value: &Value, offset: &Value) -> Result<usize> {
        let n = value.to_number("value")?;
        let at = self.check_offset(offset, field.width)?;
        self.with_bytes_mut(|b| {
            let bytes = &mut b[at..at + field.width];
            if field.width == 4 {
                binary::write_f32(bytes, n as f32, field.endian);
            } else {
                binary::write_f64(bytes, n, field.endian);
            }
        });
        Ok(at + field.width)
    }

    fn write_bigint_field(&self, field: NumericField, value: &Value, offset: &Value) -> Result<usize> {
        let big = match value {
            Value::BigInt(big) => big,
            other => {
                return Err(BufferError::type_mismatch(
                    "value",
                    "of type bigint",
                    other.describe(),
                ));
            }
        };
        let bits = if field.signed {
            big.to_i64().map(|v| v as u64)
        } else {
            big.to_u64()
        };
        let bits = bits.ok_or_else(|| {
            let range = if field.signed {
                ">= -(2n ** 63n) and < 2n ** 63n"
            } else {
                ">= 0n and < 2n ** 64n"
            };
            BufferError::out_of_range("value", range, format!("{}n", big))
        })?;
        let at = self.check_offset(offset, field.width)?;
        Ok(self.store_bits(field, at, bits))
    }

    pub fn read_int_be(&self, offset: impl Into<Value>, byte_length: usize) -> Result<i64> {
        self.read_field(Self::variable_field(byte_length, true, Endian::Big)?, &offset.into())
    }

    pub fn read_int_le(&self, offset: impl Into<Value>, byte_length: usize) -> Result<i64> {
        self.read_field(Self::variable_field(byte_length, true, Endian::Little)?, &offset.into())
    }

    pub fn read_uint_be(&self, offset: impl Into<Value>, byte_length: usize) -> Result<i64> {
        self.read_field(Self::variable_field(byte_length, false, Endian::Big)?, &offset.into())
    }

    pub fn read_uint_le(&self, offset: impl Into<Value>, byte_length: usize) -> Result<i64> {
        self.read_field(Self::variable_field(byte_length, false, Endian::Little)?, &offset.into())
    }

    pub fn write_int_be(&self, value: impl Into<Value>, offset: impl Into<Value>, byte_length: usize) -> Result<usize> {
        let field = Self::variable_field(byte_length, true, Endian::Big)?;
        self.write_checked(field, &value.into(), &offset.into())
    }

    pub fn write_int_le(&self, value: impl Into<Value>, offset: impl Into<Value>, byte_length: usize) -> Result<usize> {
        let field = Self::variable_field(byte_length, true, Endian::Little)?;
        self.write_checked(field, &value.into(), &offset.into())
    }

    pub fn write_uint_be(&self, value: impl Into<Value>, offset: impl Into<Value>, byte_length: usize) -> Result<usize> {
        let field = Self::variable_field(byte_length, false, Endian::Big)?;
        self.write_checked(field, &value.into(), &offset.into())
    }

    pub fn write_uint_le(&self, value: impl Into<Value>, offset: impl Into<Value>, byte_length: usize) -> Result<usize> {
        let field = Self::variable_field(byte_length, false, Endian::Little)?;
        self.write_checked(field, &value.into(), &offset.into())
    }

    pub fn read_big_int64_be(&self, offset: impl Into<Value>) -> Result<i64> {
        self.read_field(NumericField::bigint(true, Endian::Big), &offset.into())
    }

    pub fn read_big_int64_le(&self, offset: impl Into<Value>) -> Result<i64> {
        self.read_field(NumericField::bigint(true, Endian::Little), &offset.into())
    }

    pub fn read_big_uint64_be(&self, offset: impl Into<Value>) -> Result<u64> {
        Ok(self.read_field(NumericField::bigint(false, Endian::Big), &offset.into())? as u64)
    }

    pub fn read_big_uint64_le(&self, offset: impl Into<Value>) -> Result<u64> {
        Ok(self.read_field(NumericField::bigint(false, Endian::Little), &offset.into())? as u64)
    }

    pub fn write_big_int64_be(&self, value: impl Into<Value>, offset: impl Into<Value>) -> Result<usize> {
        self.write_bigint_field(NumericField::bigint(true, Endian::Big), &value.into(), &offset.into())
    }

    pub fn write_big_int64_le(&self, value: impl Into<Value>, offset: impl Into<Value>) -> Result<usize> {
        self.write_bigint_field(NumericField::bigint(true, Endian::Little), &value.into(), &offset.into())
    }

    pub fn write_big_uint64_be(&self, value: impl Into<Value>, offset: impl Into<Value>) -> Result<usize> {
        self.write_bigint_field(NumericField::bigint(false, Endian::Big), &value.into(), &offset.into())
    }

    pub fn write_big_uint64_le(&self, value: impl Into<Value>, offset: impl Into<Value>) -> Result<usize> {
        self.write_bigint_field(NumericField::bigint(false, Endian::Little), &value.into(), &offset.into())
    }
}

macro_rules! fixed_int_accessors {
    ($($read:ident, $write:ident => $width:expr, $signed:expr, $endian:expr;)*) => {
        impl Buffer {
            $(
                pub fn $read(&self, offset: impl Into<Value>) -> Result<i64> {
                    self.read_field(NumericField::int($width, $signed, $endian), &offset.into())
                }

                pub fn $write(&self, value: impl Into<Value>, offset: impl Into<Value>) -> Result<usize> {
                    self.write_wrapping(
                        NumericField::int($width, $signed, $endian),
                        &value.into(),
                        &offset.into(),
                    )
                }
            )*
        }
    };
}

fixed_int_accessors! {
    read_uint8, write_uint8 => 1, false, Endian::Big;
    read_int8, write_int8 => 1, true, Endian::Big;
    read_uint16_be, write_uint16_be => 2, false, Endian::Big;
    read_uint16_le, write_uint16_le => 2, false, Endian::Little;
    read_int16_be, write_int16_be => 2, true, Endian::Big;
    read_int16_le, write_int16_le => 2, true, Endian::Little;
    read_uint32_be, write_uint32_be => 4, false, Endian::Big;
    read_uint32_le, write_uint32_le => 4, false, Endian::Little;
    read_int32_be, write_int32_be => 4, true, Endian::Big;
    read_int32_le, write_int32_le => 4, true, Endian::Little;
}

macro_rules! float_accessors {
    ($($read:ident, $write:ident => $width:expr, $endian:expr;)*) => {
        impl Buffer {
            $(
                pub fn $read(&self, offset: impl Into<Value>) -> Result<f64> {
                    self.read_float_field(NumericField::float($width, $endian), &offset.into())
                }

                pub fn $write(&self, value: impl Into<Value>, offset: impl Into<Value>) -> Result<usize> {
                    self.write_float_field(NumericField::float($width, $endian), &value.into(), &offset.into())
                }
            )*
        }
    };
}

float_accessors! {
    read_float_be, write_float_be => 4, Endian::Big;
    read_float_le, write_float_le => 4, Endian::Little;
    read_double_be, write_double_be => 8, Endian::Big;
    read_double_le, write_double_le => 8, Endian::Little;
}
