///
/// bytebuf_encoding::binary - Binary Numeric Field Layouts
///
/// Packs and unpacks fixed-width numbers in either byte order. Every function
/// works on a slice that is exactly as long as the field; bounds checking is
/// the caller's job.
///
/// **Integer fields:** widths 1 through 8 bytes, signed (two's complement,
///   sign-extended on read) or unsigned.
///
/// **Float fields:** IEEE-754 binary32 and binary64, bit-exact including the
///   sign of zero, NaN payloads and subnormals.
///
/// Big-endian and little-endian layouts are byte-reversed mirrors of each
/// other.
///

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    Big,
    Little,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    Int,
    Float,
    BigInt,
}

/// Layout of one numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericField {
    pub width: usize,
    pub signed: bool,
    pub endian: Endian,
    pub kind: NumericKind,
}

impl NumericField {
    pub const fn int(width: usize, signed: bool, endian: Endian) -> Self {
        Self {
            width,
            signed,
            endian,
            kind: NumericKind::Int,
        }
    }

    pub const fn float(width: usize, endian: Endian) -> Self {
        Self {
            width,
            signed: true,
            endian,
            kind: NumericKind::Float,
        }
    }

    pub const fn bigint(signed: bool, endian: Endian) -> Self {
        Self {
            width: 8,
            signed,
            endian,
            kind: NumericKind::BigInt,
        }
    }

    pub fn bits(&self) -> u32 {
        (self.width * 8) as u32
    }

    /// Smallest representable integer value.
    pub fn min_value(&self) -> i128 {
        if self.signed {
            -(1i128 << (self.bits() - 1))
        } else {
            0
        }
    }

    /// Largest representable integer value.
    pub fn max_value(&self) -> i128 {
        if self.signed {
            (1i128 << (self.bits() - 1)) - 1
        } else {
            (1i128 << self.bits()) - 1
        }
    }

    /// Reads an integer field, sign-extending signed fields.
    pub fn read_int(&self, bytes: &[u8]) -> i64 {
        let raw = read_uint(bytes, self.endian);
        if self.signed {
            sign_extend(raw, self.width)
        } else {
            raw as i64
        }
    }

    pub fn write_bits(&self, bytes: &mut [u8], bits: u64) {
        write_uint(bytes, bits, self.endian);
    }
}

pub fn read_uint(bytes: &[u8], endian: Endian) -> u64 {
    match endian {
        Endian::Big => bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64),
        Endian::Little => bytes.iter().rev().fold(0u64, |acc, &b| (acc << 8) | b as u64),
    }
}

/// Stores the low `bytes.len()` bytes of `value`.
pub fn write_uint(bytes: &mut [u8], value: u64, endian: Endian) {
    let width = bytes.len();
    for (i, slot) in bytes.iter_mut().enumerate() {
        let shift = match endian {
            Endian::Big => (width - 1 - i) * 8,
            Endian::Little => i * 8,
        };
        *slot = (value >> shift) as u8;
    }
}

pub fn sign_extend(value: u64, width: usize) -> i64 {
    let shift = 64 - (width * 8) as u32;
    ((value << shift) as i64) >> shift
}

pub fn read_f32(bytes: &[u8], endian: Endian) -> f32 {
    f32::from_bits(read_uint(bytes, endian) as u32)
}

pub fn write_f32(bytes: &mut [u8], value: f32, endian: Endian) {
    write_uint(bytes, value.to_bits() as u64, endian);
}

pub fn read_f64(bytes: &[u8], endian: Endian) -> f64 {
    f64::from_bits(read_uint(bytes, endian))
}

pub fn write_f64(bytes: &mut [u8], value: f64, endian: Endian) {
    write_uint(bytes, value.to_bits(), endian);
}

/// Reverses each `chunk`-byte group in place. `bytes.len()` must be a
/// multiple of `chunk`.
pub fn swap_chunks(bytes: &mut [u8], chunk: usize) {
    for group in bytes.chunks_exact_mut(chunk) {
        group.reverse();
    }
}
