//! Error Types for the Orientation Core
//!
//! ## Design Philosophy
//!
//! The estimation path itself never fails: every arithmetic hazard is absorbed by
//! the saturating policy of [`Q16`](crate::Q16) and the filter always produces a
//! quaternion. Errors only exist at the edges where a caller asks for something
//! that has no sensible fixed-point answer:
//!
//! 1. **Small Size**: Each variant carries at most one word of context so the
//!    error can be returned from tight loops and stored in diagnostics.
//!
//! 2. **No Heap Allocation**: Messages are `&'static str`, never `String`.
//!
//! 3. **Copy Semantics**: Errors implement `Copy` like every other value type in
//!    this crate.
//!
//! ## Error Categories
//!
//! ### Numeric Domain
//! - `ZeroOperand`: reciprocal square root of zero
//! - `NegativeOperand`: reciprocal square root of a negative value
//!
//! ### Configuration
//! - `InvalidGain`: a filter gain outside its usable range
//! - `InvalidSampleRate`: a sample rate that cannot define an integration step
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use fixahrs_core::{AhrsConfig, AhrsError, GyroRange};
//!
//! match AhrsConfig::for_gyro_range(GyroRange::Dps2000, 0) {
//!     Ok(_config) => {
//!         // start the filter
//!     }
//!     Err(AhrsError::InvalidSampleRate { rate_hz }) => {
//!         // sampling timer misconfigured
//!         assert_eq!(rate_hz, 0);
//!     }
//!     Err(_) => {}
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for fallible configuration and checked numeric operations
pub type AhrsResult<T> = Result<T, AhrsError>;

/// Errors raised outside the estimation hot path
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AhrsError {
    /// Reciprocal square root requested for exactly zero
    #[error("Reciprocal square root of zero")]
    ZeroOperand,

    /// Reciprocal square root requested for a negative operand
    #[error("Reciprocal square root of negative operand ({bits} raw bits)")]
    NegativeOperand {
        /// Raw Q16.16 bits of the rejected operand
        bits: i32,
    },

    /// Filter gain cannot be used (negative beta, non-positive step)
    #[error("Invalid filter gain: {reason}")]
    InvalidGain {
        /// Which gain was rejected
        reason: &'static str,
    },

    /// Sample rate of zero or one too high to resolve in Q16.16
    #[error("Invalid sample rate: {rate_hz} Hz")]
    InvalidSampleRate {
        /// The rejected rate
        rate_hz: u32,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for AhrsError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ZeroOperand =>
                defmt::write!(fmt, "rsqrt of zero"),
            Self::NegativeOperand { bits } =>
                defmt::write!(fmt, "rsqrt of negative operand {}", bits),
            Self::InvalidGain { reason } =>
                defmt::write!(fmt, "Invalid gain: {}", reason),
            Self::InvalidSampleRate { rate_hz } =>
                defmt::write!(fmt, "Invalid sample rate: {} Hz", rate_hz),
        }
    }
}
