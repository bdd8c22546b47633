//! Q16.16 Fixed-Point Scalar
//!
//! ## Format
//!
//! ```text
//!  31 30           16 15            0
//! ┌──┬───────────────┬───────────────┐
//! │ S│  integer (15) │ fraction (16) │   value = bits / 65536
//! └──┴───────────────┴───────────────┘
//! range: [-32768, 32768 - 2^-16], LSB = 2^-16 ≈ 1.53e-5
//! ```
//!
//! Storage is [`fixed::types::I16F16`]. The arithmetic the estimator relies on
//! is pinned down here rather than inherited from operator defaults:
//!
//! | Operation | Rounding | Overflow |
//! |-----------|----------|----------|
//! | add / sub / neg | exact | saturate |
//! | multiply | toward −∞ (arithmetic shift of the 64-bit product) | saturate |
//! | reciprocal square root | toward zero | `x ≤ 0` ⇒ [`Q16::MAX`] |
//!
//! ## Raw Sensor Counts
//!
//! Raw 16-bit sensor counts enter the math as Q16 *bits*
//! ([`Q16::from_raw_sample`]), so a count `n` is the value `n / 65536`. Every
//! formula in this crate is homogeneous in that scale, which keeps the outputs
//! of the vector transforms in raw counts as well.
//!
//! ## Reciprocal Square Root
//!
//! For an operand with raw bits `b > 0` the result bits are
//!
//! ```text
//! 2^16 / sqrt(b / 2^16) = 2^40 / sqrt(b · 2^32)
//! ```
//!
//! computed as one integer square root of the 64-bit widened operand and one
//! 64-bit division. The integer square root is a bounded 32-step loop, so the
//! cost does not depend on the operand.

use core::fmt;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use fixed::types::I16F16;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::fixed_point::{FRAC_BITS, ONE_BITS},
    errors::{AhrsError, AhrsResult},
};

/// Left shift applied to the operand before the integer square root
const RSQRT_WIDEN_SHIFT: u32 = 2 * FRAC_BITS;

/// Numerator of the final division: `2^(16 + 16 + 8)`
const RSQRT_NUMERATOR: u64 = 1 << (FRAC_BITS + FRAC_BITS + FRAC_BITS / 2);

/// Signed Q16.16 fixed-point scalar with saturating arithmetic
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Q16(I16F16);

impl Q16 {
    /// `0.0`
    pub const ZERO: Self = Self::from_bits(0);

    /// `1.0`
    pub const ONE: Self = Self::from_bits(ONE_BITS);

    /// Largest representable value, also the result of `rsqrt(0)`
    pub const MAX: Self = Self(I16F16::MAX);

    /// Smallest representable value
    pub const MIN: Self = Self(I16F16::MIN);

    /// Build from raw Q16.16 bits
    pub const fn from_bits(bits: i32) -> Self {
        Self(I16F16::from_bits(bits))
    }

    /// Raw Q16.16 bits
    pub const fn to_bits(self) -> i32 {
        self.0.to_bits()
    }

    /// Reinterpret a raw sensor count as Q16 bits (`n` ↦ `n / 65536`)
    pub const fn from_raw_sample(count: i16) -> Self {
        Self::from_bits(count as i32)
    }

    /// Exact integer value
    pub const fn from_int(n: i16) -> Self {
        Self::from_bits((n as i32) << FRAC_BITS)
    }

    /// Nearest representable value, saturating; NaN maps to zero.
    ///
    /// Host-side bridge for configuration tooling and tests. The estimator
    /// never calls it.
    pub fn from_f32(x: f32) -> Self {
        if x.is_nan() {
            return Self::ZERO;
        }
        Self(I16F16::saturating_from_num(x))
    }

    /// Convert to `f32` (exact for every Q16.16 value up to f32 rounding)
    pub fn to_f32(self) -> f32 {
        self.0.to_num::<f32>()
    }

    /// Multiply, rounding toward −∞ and saturating on overflow
    pub fn saturating_mul(self, rhs: Self) -> Self {
        let wide = (self.to_bits() as i64 * rhs.to_bits() as i64) >> FRAC_BITS;
        Self::from_bits(saturate_i64(wide))
    }

    /// Add, saturating on overflow
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Subtract, saturating on overflow
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Negate; `-MIN` saturates to `MAX`
    pub fn saturating_neg(self) -> Self {
        Self(self.0.saturating_neg())
    }

    /// `2 · self`, saturating
    pub fn double(self) -> Self {
        self.saturating_add(self)
    }

    /// True for exactly zero
    pub const fn is_zero(self) -> bool {
        self.to_bits() == 0
    }

    /// Distance between two values in LSB
    pub fn abs_diff_bits(self, other: Self) -> u32 {
        self.to_bits().abs_diff(other.to_bits())
    }

    /// Narrow the raw bits back into a 16-bit sensor count, saturating at the rails
    pub fn saturate_to_i16(self) -> i16 {
        self.to_bits().clamp(i16::MIN as i32, i16::MAX as i32) as i16
    }

    /// Approximate `1 / sqrt(self)`.
    ///
    /// Total: zero and negative operands return [`Q16::MAX`]. Use
    /// [`Q16::checked_rsqrt`] where those cases must be told apart.
    pub fn rsqrt(self) -> Self {
        self.checked_rsqrt().unwrap_or(Self::MAX)
    }

    /// Approximate `1 / sqrt(self)`, rejecting operands outside `(0, MAX]`.
    ///
    /// The result is within one part in 2^15 of the exact value, plus one LSB.
    pub fn checked_rsqrt(self) -> AhrsResult<Self> {
        let bits = self.to_bits();
        if bits == 0 {
            return Err(AhrsError::ZeroOperand);
        }
        if bits < 0 {
            return Err(AhrsError::NegativeOperand { bits });
        }

        // bits >= 1 so root >= 2^16 and the quotient is at most 2^24
        let root = isqrt_u64((bits as u64) << RSQRT_WIDEN_SHIFT);
        let recip = RSQRT_NUMERATOR / root;
        Ok(Self::from_bits(recip.min(i32::MAX as u64) as i32))
    }
}

/// Clamp a widened product into the i32 range
fn saturate_i64(wide: i64) -> i32 {
    wide.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Floor of the square root, digit by digit (at most 32 iterations)
pub(crate) fn isqrt_u64(n: u64) -> u64 {
    let mut remainder = n;
    let mut root = 0u64;
    let mut bit = 1u64 << 62;

    while bit > remainder {
        bit >>= 2;
    }

    while bit != 0 {
        if remainder >= root + bit {
            remainder -= root + bit;
            root = (root >> 1) + bit;
        } else {
            root >>= 1;
        }
        bit >>= 2;
    }

    root
}

impl Add for Q16 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl Sub for Q16 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.saturating_sub(rhs)
    }
}

impl Mul for Q16 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.saturating_mul(rhs)
    }
}

impl Neg for Q16 {
    type Output = Self;

    fn neg(self) -> Self {
        self.saturating_neg()
    }
}

impl AddAssign for Q16 {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

impl SubAssign for Q16 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.saturating_sub(rhs);
    }
}

impl fmt::Display for Q16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Q16 {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Q16({=i32})", self.to_bits())
    }
}
