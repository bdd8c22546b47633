//! Q16.16 Format Parameters
//!
//! Values backing the [`Q16`](crate::Q16) scalar: 32-bit two's complement
//! storage with 16 fractional bits.

// ===== FORMAT =====

/// Number of fractional bits.
pub const FRAC_BITS: u32 = 16;

/// Raw bit pattern of `1.0`.
pub const ONE_BITS: i32 = 1 << FRAC_BITS;

/// Tolerance on the squared quaternion norm after renormalisation (raw bits).
///
/// 16 LSB is `2^-12`. Renormalisation floors each component and the
/// reciprocal square root rounds toward zero, which together stay within a
/// handful of LSB; the margin covers accumulated rounding of the squares.
pub const NORM_TOLERANCE_BITS: i32 = 16;

// ===== MATHEMATICAL CONSTANTS =====

/// π in Q16.16 (`round(π · 65536)`).
pub const PI_BITS: u64 = 205_887;

/// √3 scaled by 1000.
///
/// Madgwick's gain is `β = √(3/4) · ω_err`; the filter works with doubled
/// derivatives so the factor becomes `√3`.
///
/// Source: Madgwick, "An efficient orientation filter for inertial and
/// inertial/magnetic sensor arrays", section 3.6
pub const SQRT_3_PER_MILLE: u64 = 1732;
