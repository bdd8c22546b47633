//! Quaternion Algebra in Q16.16
//!
//! ## Convention
//!
//! Scalar-first `(q0, q1, q2, q3)`. The filter maintains the orientation of the
//! earth frame relative to the sensor frame, so
//!
//! ```text
//! v_world  = q ⊗ v_body ⊗ q*          (rotate)
//! g_body   = q* ⊗ (0, 0, 0, 1) ⊗ q    (predicted gravity direction)
//! ```
//!
//! ## Hamilton Product
//!
//! ```text
//! r0 = a0·b0 − a1·b1 − a2·b2 − a3·b3
//! r1 = a0·b1 + a1·b0 + a2·b3 − a3·b2
//! r2 = a0·b2 − a1·b3 + a2·b0 + a3·b1
//! r3 = a0·b3 + a1·b2 − a2·b1 + a3·b0
//! ```
//!
//! Every term is one [`Q16`] multiply (floor, saturating) and the sums
//! saturate as well, so no intermediate can wrap.

use core::ops::Mul;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::fixed_point::{FRAC_BITS, NORM_TOLERANCE_BITS, ONE_BITS},
    fixed_point::{isqrt_u64, Q16},
    sample::RawVector,
};

/// Quaternion with Q16.16 components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quaternion {
    /// Scalar part
    pub q0: Q16,
    /// Vector part, X
    pub q1: Q16,
    /// Vector part, Y
    pub q2: Q16,
    /// Vector part, Z
    pub q3: Q16,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// No rotation
    pub const IDENTITY: Self = Self::new(Q16::ONE, Q16::ZERO, Q16::ZERO, Q16::ZERO);

    /// Build from components
    pub const fn new(q0: Q16, q1: Q16, q2: Q16, q3: Q16) -> Self {
        Self { q0, q1, q2, q3 }
    }

    /// Build from raw Q16.16 bits, scalar first
    pub const fn from_bits(bits: [i32; 4]) -> Self {
        Self::new(
            Q16::from_bits(bits[0]),
            Q16::from_bits(bits[1]),
            Q16::from_bits(bits[2]),
            Q16::from_bits(bits[3]),
        )
    }

    /// Raw Q16.16 bits, scalar first
    pub const fn to_bits(&self) -> [i32; 4] {
        [
            self.q0.to_bits(),
            self.q1.to_bits(),
            self.q2.to_bits(),
            self.q3.to_bits(),
        ]
    }

    /// Pure-vector quaternion `(0, x, y, z)` from raw sensor counts
    pub const fn pure(v: &RawVector) -> Self {
        Self::new(
            Q16::ZERO,
            Q16::from_raw_sample(v.x),
            Q16::from_raw_sample(v.y),
            Q16::from_raw_sample(v.z),
        )
    }

    /// Negate the vector part
    pub fn conjugate(&self) -> Self {
        Self::new(self.q0, -self.q1, -self.q2, -self.q3)
    }

    /// Hamilton product `self ⊗ rhs`
    pub fn product(&self, rhs: &Self) -> Self {
        let a = self;
        let b = rhs;
        Self {
            q0: a.q0 * b.q0 - a.q1 * b.q1 - a.q2 * b.q2 - a.q3 * b.q3,
            q1: a.q0 * b.q1 + a.q1 * b.q0 + a.q2 * b.q3 - a.q3 * b.q2,
            q2: a.q0 * b.q2 - a.q1 * b.q3 + a.q2 * b.q0 + a.q3 * b.q1,
            q3: a.q0 * b.q3 + a.q1 * b.q2 - a.q2 * b.q1 + a.q3 * b.q0,
        }
    }

    /// Rotate a pure-vector quaternion: `self ⊗ (v ⊗ self*)`.
    ///
    /// `self` must be a unit quaternion so that its conjugate is its inverse.
    /// The scalar part of the result is rounding residue and should be ignored.
    pub fn rotate(&self, v: &Self) -> Self {
        let tmp = v.product(&self.conjugate());
        self.product(&tmp)
    }

    /// `q0² + q1² + q2² + q3²` with the same floor-rounded multiplies the filter uses
    pub fn norm_squared(&self) -> Q16 {
        self.q0 * self.q0 + self.q1 * self.q1 + self.q2 * self.q2 + self.q3 * self.q3
    }

    /// True when the exact squared norm is within
    /// [`NORM_TOLERANCE_BITS`] LSB of one
    pub fn is_normalized(&self) -> bool {
        let sum: i128 = self
            .to_bits()
            .iter()
            .map(|&c| c as i128 * c as i128)
            .sum();
        let norm_sq_bits = sum >> FRAC_BITS;
        (norm_sq_bits - ONE_BITS as i128).abs() <= NORM_TOLERANCE_BITS as i128
    }

    /// Scale to unit length using the exact squared norm of the raw bits.
    ///
    /// Unlike [`Quaternion::norm_squared`] nothing is floored before the square
    /// root, so a quaternion with components of a few LSB still has a well
    /// defined direction. Returns `None` only when every component is zero.
    pub fn direction(&self) -> Option<Self> {
        let sum: i128 = self
            .to_bits()
            .iter()
            .map(|&c| c as i128 * c as i128)
            .sum();
        if sum == 0 {
            return None;
        }

        // four i32::MIN squares overflow u64 by exactly one
        let root = isqrt_u64(u64::try_from(sum).unwrap_or(u64::MAX)) as i64;
        // root >= max |component| so every quotient fits in ±ONE
        let unit = |c: Q16| Q16::from_bits((((c.to_bits() as i64) << FRAC_BITS) / root) as i32);

        Some(Self::new(unit(self.q0), unit(self.q1), unit(self.q2), unit(self.q3)))
    }

    /// Vector part narrowed back into raw counts
    pub fn vector(&self) -> RawVector {
        RawVector::new(
            self.q1.saturate_to_i16(),
            self.q2.saturate_to_i16(),
            self.q3.saturate_to_i16(),
        )
    }

    /// Components as `f32`, scalar first (host-side inspection)
    pub fn to_f32(&self) -> [f32; 4] {
        [
            self.q0.to_f32(),
            self.q1.to_f32(),
            self.q2.to_f32(),
            self.q3.to_f32(),
        ]
    }
}

impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.product(&rhs)
    }
}
