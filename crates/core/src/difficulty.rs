//! Packed difficulty codec.
//!
//! A packed difficulty is a `u32` whose high 8 bits are an `order` and low 24
//! bits a mantissa with an implicit leading one:
//!
//! ```text
//! packed = order << 24 | (mantissa & 0xFFFFFF)
//! raw    = (1 << 24 | mantissa) << order
//! ```
//!
//! `raw` is a fixed-point multiplier with 24 fractional bits. A proof hash `h`
//! (256-bit big-endian) satisfies the difficulty iff `h * raw < 2^280`, so the
//! expanded target is `floor((2^280 - 1) / raw)` and the comparison becomes
//! `h <= target`. Packed `0` is difficulty 1 and accepts every hash.
//!
//! [`INFINITE`] stands for an all-ones raw value; anything above it is out of
//! range and never satisfied.

use core::fmt;

use num_bigint::BigUint;

use crate::error::Error;

/// Mantissa bits below the order
pub const MANTISSA_BITS: u32 = 24;

/// Largest order whose shifted mantissa still fits in 256 bits
pub const MAX_ORDER: u32 = 256 - MANTISSA_BITS - 1;

/// Packed value standing for infinite difficulty
pub const INFINITE: u32 = (MAX_ORDER + 1) << MANTISSA_BITS;

/// Width of a target in bytes
pub const TARGET_LEN: usize = 32;

const LEADING_BIT: u32 = 1 << MANTISSA_BITS;
const MANTISSA_MASK: u32 = LEADING_BIT - 1;

/// A packed difficulty value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(pub u32);

impl Difficulty {
    pub const fn new(packed: u32) -> Self {
        Self(packed)
    }

    /// Pack an order and a 24-bit mantissa (leading one implied).
    pub fn from_parts(order: u32, mantissa: u32) -> Result<Self, Error> {
        if mantissa > MANTISSA_MASK {
            return Err(Error::InvalidMantissa(mantissa));
        }
        if order > MAX_ORDER {
            return Err(Error::DifficultyOutOfRange(order << MANTISSA_BITS | mantissa));
        }
        Ok(Self(order << MANTISSA_BITS | mantissa))
    }

    pub const fn packed(self) -> u32 {
        self.0
    }

    /// `(order, mantissa)` with the leading mantissa bit restored
    pub const fn unpack(self) -> (u32, u32) {
        (self.0 >> MANTISSA_BITS, LEADING_BIT | (self.0 & MANTISSA_MASK))
    }

    pub const fn is_infinite(self) -> bool {
        self.0 == INFINITE
    }

    /// Approximate magnitude, `mantissa * 2^(order - 24)`.
    ///
    /// Display and estimation only; consensus compares [`Difficulty::expand`].
    pub fn to_float(self) -> f64 {
        let (order, mantissa) = self.unpack();
        f64::from(mantissa) * pow2(order as i32 - MANTISSA_BITS as i32)
    }

    /// The 256-bit raw multiplier
    pub fn raw(self) -> Result<BigUint, Error> {
        match self.0 {
            INFINITE => Ok((BigUint::from(1u8) << (TARGET_LEN * 8)) - 1u8),
            packed if packed > INFINITE => Err(Error::DifficultyOutOfRange(packed)),
            _ => {
                let (order, mantissa) = self.unpack();
                Ok(BigUint::from(mantissa) << order)
            }
        }
    }

    /// Expand into the threshold a proof hash must not exceed.
    pub fn expand(self) -> Result<Target, Error> {
        let raw = self.raw()?;
        let bound = (BigUint::from(1u8) << (TARGET_LEN * 8 + MANTISSA_BITS as usize)) - 1u8;
        Ok(Target::from_biguint(&(bound / raw)))
    }
}

impl From<u32> for Difficulty {
    fn from(packed: u32) -> Self {
        Self(packed)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Exact power of two for exponents well inside the normal f64 range
fn pow2(exp: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&exp));
    f64::from_bits(((exp + 1023) as u64) << 52)
}

/// A 256-bit big-endian threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target([u8; TARGET_LEN]);

impl Target {
    /// The largest target; reached by every hash
    pub const MAX: Target = Target([0xFF; TARGET_LEN]);

    pub const fn from_be_bytes(bytes: [u8; TARGET_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn to_be_bytes(self) -> [u8; TARGET_LEN] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; TARGET_LEN] {
        &self.0
    }

    /// Saturates at [`Target::MAX`].
    fn from_biguint(value: &BigUint) -> Self {
        let bytes = value.to_bytes_be();
        if bytes.len() > TARGET_LEN {
            return Self::MAX;
        }
        let mut out = [0u8; TARGET_LEN];
        out[TARGET_LEN - bytes.len()..].copy_from_slice(&bytes);
        Self(out)
    }

    /// Whether `digest`, read big-endian, is at most this target
    pub fn is_reached_by(&self, digest: &[u8; TARGET_LEN]) -> bool {
        digest <= &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|byte| write!(f, "{byte:02x}"))
    }
}
