//! Gyroscope/Accelerometer Fusion
//!
//! ## Overview
//!
//! Orientation is tracked as a unit quaternion and advanced once per sampling
//! tick. The gyroscope alone integrates cleanly over short spans but drifts;
//! the accelerometer knows where "down" is but is noisy and corrupted by
//! motion. Madgwick's gradient-descent filter blends the two with one gain:
//!
//! ```text
//! gyro ──→ q̇_ω = q ⊗ (0, ω)          ┐
//!                                     ├─→ q̇ = q̇_ω − β·∇f/|∇f| ─→ q += q̇·k ─→ normalise
//! accel ─→ ∇f(q, â)  (gravity error) ┘
//! ```
//!
//! ## Heading
//!
//! Without a magnetometer nothing observes rotation about the gravity vector,
//! so yaw is pure gyro integration and drifts. Roll and pitch converge.
//!
//! ## Numeric Behaviour
//!
//! All arithmetic is [`Q16`](crate::Q16) with saturation, so the update has no
//! failure path. The outcome is reported as an [`UpdateStatus`] for
//! diagnostics only.

pub mod madgwick;

pub use madgwick::{update, FilterStats, MadgwickFilter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What one update call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateStatus {
    /// Gyro integration corrected toward the accelerometer
    Fused,
    /// Accelerometer sample was all zero; gyro integration only
    GyroOnly,
    /// Integrated quaternion collapsed to zero and was reset to identity
    Recovered,
}

impl UpdateStatus {
    /// True when the accelerometer contributed to this step
    pub fn is_fused(self) -> bool {
        matches!(self, UpdateStatus::Fused)
    }
}
