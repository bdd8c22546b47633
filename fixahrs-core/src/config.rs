//! Filter configuration
//!
//! The update takes two gains, both in Q16.16:
//!
//! - **beta**: how hard each tick pulls toward the accelerometer's idea of
//!   "down". Expressed in the filter's derivative units, i.e. raw gyro counts
//!   divided by 65536, doubled.
//! - **gyro integration factor**: converts one tick's doubled, raw-count
//!   quaternion derivative into a quaternion increment. It folds in the
//!   sample period, the gyro sensitivity, deg→rad and the omitted ½.
//!
//! ```text
//! k     = π · 2^32 / (360 · sensitivity · rate_hz)        raw bits
//! beta  = √3 · ω_err[°/s] · sensitivity                    raw bits
//! ```
//!
//! with `sensitivity` in LSB per °/s. Both derivations stay in integer
//! arithmetic so they can run on the target.
//!
//! ```rust
//! use fixahrs_core::{AhrsConfig, AccelRange, GyroRange};
//!
//! let config = AhrsConfig::for_gyro_range(GyroRange::Dps500, 200)
//!     .unwrap()
//!     .with_accel_range(AccelRange::G4);
//! assert!(config.validate().is_ok());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        fixed_point::{FRAC_BITS, PI_BITS, SQRT_3_PER_MILLE},
        sensors::{
            DEFAULT_GYRO_ERROR_DPS, DEFAULT_SAMPLE_RATE_HZ, DEGREES_PER_TURN,
            GRAVITY_COUNTS_16G, GRAVITY_COUNTS_4G, GRAVITY_COUNTS_8G,
            GYRO_SENSITIVITY_1000DPS_TENTHS, GYRO_SENSITIVITY_2000DPS_TENTHS,
            GYRO_SENSITIVITY_250DPS_TENTHS, GYRO_SENSITIVITY_500DPS_TENTHS,
            STANDARD_GRAVITY_COUNTS,
        },
    },
    errors::{AhrsError, AhrsResult},
    fixed_point::Q16,
};

/// Sensitivity is kept in tenths of LSB per °/s
const SENSITIVITY_SCALE: u64 = 10;

/// Largest integration factor [`AhrsConfig::validate`] accepts.
///
/// Above one, a full-scale gyro reading moves the quaternion further than its
/// own length in a single tick and the renormalised result no longer tracks
/// the rotation.
pub const MAX_GYRO_INTEGRATION_FACTOR: Q16 = Q16::ONE;

/// Gyroscope full scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    /// ±250 °/s
    Dps250,
    /// ±500 °/s
    Dps500,
    /// ±1000 °/s
    Dps1000,
    /// ±2000 °/s
    #[default]
    Dps2000,
}

impl GyroRange {
    /// Sensitivity in tenths of LSB per °/s
    pub const fn sensitivity_tenths(self) -> u32 {
        match self {
            GyroRange::Dps250 => GYRO_SENSITIVITY_250DPS_TENTHS,
            GyroRange::Dps500 => GYRO_SENSITIVITY_500DPS_TENTHS,
            GyroRange::Dps1000 => GYRO_SENSITIVITY_1000DPS_TENTHS,
            GyroRange::Dps2000 => GYRO_SENSITIVITY_2000DPS_TENTHS,
        }
    }

    /// Gyro integration factor for a sensor sampled at `sample_rate_hz`.
    ///
    /// Rates so high that the factor underflows, or so low that it exceeds
    /// [`MAX_GYRO_INTEGRATION_FACTOR`], are rejected.
    pub fn integration_factor(self, sample_rate_hz: u32) -> AhrsResult<Q16> {
        if sample_rate_hz == 0 {
            return Err(AhrsError::InvalidSampleRate { rate_hz: sample_rate_hz });
        }

        let bits = integration_factor_bits(self.sensitivity_tenths(), sample_rate_hz);
        if bits == 0 {
            log_warn!("sample rate {} Hz underflows the integration factor", sample_rate_hz);
            return Err(AhrsError::InvalidSampleRate { rate_hz: sample_rate_hz });
        }
        if bits > MAX_GYRO_INTEGRATION_FACTOR.to_bits() {
            log_warn!("sample rate {} Hz is too slow for the gyro range", sample_rate_hz);
            return Err(AhrsError::InvalidSampleRate { rate_hz: sample_rate_hz });
        }

        Ok(Q16::from_bits(bits))
    }

    /// Beta matching a gyroscope measurement error of `error_dps` °/s.
    ///
    /// Madgwick's `β = √(3/4) · ω_err`, converted to the filter's doubled
    /// raw-count units. Independent of the sample rate.
    pub fn beta_for_gyro_error(self, error_dps: u16) -> Q16 {
        let bits = SQRT_3_PER_MILLE
            * error_dps as u64
            * self.sensitivity_tenths() as u64
            / (1000 * SENSITIVITY_SCALE);
        Q16::from_bits(bits.min(i32::MAX as u64) as i32)
    }
}

/// `π · 2^32 / (360 · sensitivity · rate)` in raw bits; `rate` must be non-zero
const fn integration_factor_bits(sensitivity_tenths: u32, sample_rate_hz: u32) -> i32 {
    let numerator = (PI_BITS << FRAC_BITS) * SENSITIVITY_SCALE;
    let denominator = DEGREES_PER_TURN * sensitivity_tenths as u64 * sample_rate_hz as u64;
    let bits = numerator / denominator;
    if bits > i32::MAX as u64 {
        i32::MAX
    } else {
        bits as i32
    }
}

/// Accelerometer full scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    /// ±2 g
    #[default]
    G2,
    /// ±4 g
    G4,
    /// ±8 g
    G8,
    /// ±16 g
    G16,
}

impl AccelRange {
    /// Raw counts for one standard gravity
    pub const fn gravity_counts(self) -> i16 {
        match self {
            AccelRange::G2 => STANDARD_GRAVITY_COUNTS,
            AccelRange::G4 => GRAVITY_COUNTS_4G,
            AccelRange::G8 => GRAVITY_COUNTS_8G,
            AccelRange::G16 => GRAVITY_COUNTS_16G,
        }
    }
}

/// Gains and sensor scale for the Madgwick update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AhrsConfig {
    /// Accelerometer trust
    pub beta: Q16,
    /// Converts one tick's derivative into a quaternion increment
    pub gyro_integration_factor: Q16,
    /// Raw accelerometer counts for 1 g, used for gravity cancellation
    pub gravity_counts: i16,
}

impl Default for AhrsConfig {
    /// ±2000 °/s gyro at 100 Hz, ±2 g accelerometer
    fn default() -> Self {
        let range = GyroRange::default();
        Self {
            beta: range.beta_for_gyro_error(DEFAULT_GYRO_ERROR_DPS),
            gyro_integration_factor: Q16::from_bits(integration_factor_bits(
                range.sensitivity_tenths(),
                DEFAULT_SAMPLE_RATE_HZ,
            )),
            gravity_counts: AccelRange::default().gravity_counts(),
        }
    }
}

impl AhrsConfig {
    /// Explicit gains, ±2 g gravity reference
    pub const fn new(beta: Q16, gyro_integration_factor: Q16) -> Self {
        Self {
            beta,
            gyro_integration_factor,
            gravity_counts: STANDARD_GRAVITY_COUNTS,
        }
    }

    /// Derive the integration factor from the gyro range and sample rate.
    ///
    /// Beta assumes [`DEFAULT_GYRO_ERROR_DPS`]; override with
    /// [`AhrsConfig::with_beta`].
    pub fn for_gyro_range(range: GyroRange, sample_rate_hz: u32) -> AhrsResult<Self> {
        Ok(Self {
            beta: range.beta_for_gyro_error(DEFAULT_GYRO_ERROR_DPS),
            gyro_integration_factor: range.integration_factor(sample_rate_hz)?,
            ..Self::default()
        })
    }

    /// Set beta
    pub fn with_beta(mut self, beta: Q16) -> Self {
        self.beta = beta;
        self
    }

    /// Set the gyro integration factor
    pub fn with_gyro_integration_factor(mut self, factor: Q16) -> Self {
        self.gyro_integration_factor = factor;
        self
    }

    /// Take the gravity reference from an accelerometer range
    pub fn with_accel_range(mut self, range: AccelRange) -> Self {
        self.gravity_counts = range.gravity_counts();
        self
    }

    /// Set the gravity reference directly
    pub fn with_gravity_counts(mut self, counts: i16) -> Self {
        self.gravity_counts = counts;
        self
    }

    /// Reject gains the update cannot use: negative beta, an integration
    /// factor outside `(0, MAX_GYRO_INTEGRATION_FACTOR]` or a non-positive
    /// gravity reference
    pub fn validate(&self) -> AhrsResult<()> {
        if self.beta < Q16::ZERO {
            return Err(AhrsError::InvalidGain {
                reason: "beta must not be negative",
            });
        }
        if self.gyro_integration_factor <= Q16::ZERO {
            return Err(AhrsError::InvalidGain {
                reason: "gyro integration factor must be positive",
            });
        }
        if self.gyro_integration_factor > MAX_GYRO_INTEGRATION_FACTOR {
            return Err(AhrsError::InvalidGain {
                reason: "gyro integration factor must not exceed one",
            });
        }
        if self.gravity_counts <= 0 {
            return Err(AhrsError::InvalidGain {
                reason: "gravity reference must be a positive count",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integration_factor_for_2000dps_at_100hz() {
        // π / (360 · 16.4 · 100) · 2^32 ≈ 22854.3
        let k = GyroRange::Dps2000.integration_factor(100).unwrap();
        assert_eq!(k.to_bits(), 22854);
    }

    #[test]
    fn integration_factor_scales_with_rate_and_range() {
        let slow = GyroRange::Dps2000.integration_factor(50).unwrap();
        let fast = GyroRange::Dps2000.integration_factor(100).unwrap();
        assert!(slow.to_bits().abs_diff(2 * fast.to_bits()) <= 1);

        let fine = GyroRange::Dps250.integration_factor(100).unwrap();
        assert!(fine < fast);
    }

    #[test]
    fn zero_sample_rate_rejected() {
        assert_eq!(
            GyroRange::Dps500.integration_factor(0),
            Err(AhrsError::InvalidSampleRate { rate_hz: 0 })
        );
        assert!(AhrsConfig::for_gyro_range(GyroRange::Dps500, 0).is_err());
    }

    #[test]
    fn absurd_sample_rate_rejected() {
        assert!(GyroRange::Dps250.integration_factor(u32::MAX).is_err());
    }

    #[test]
    fn too_slow_sample_rate_rejected() {
        // ±2000 °/s needs at least 35 Hz to keep the factor at or below one
        assert_eq!(
            GyroRange::Dps2000.integration_factor(10),
            Err(AhrsError::InvalidSampleRate { rate_hz: 10 })
        );
        assert!(GyroRange::Dps2000.integration_factor(34).is_err());
        let k = GyroRange::Dps2000.integration_factor(35).unwrap();
        assert!(k <= MAX_GYRO_INTEGRATION_FACTOR);
        assert!(AhrsConfig::for_gyro_range(GyroRange::Dps2000, 10).is_err());
    }

    #[test]
    fn beta_from_gyro_error() {
        // √3 · 5 · 16.4 ≈ 142
        assert_eq!(GyroRange::Dps2000.beta_for_gyro_error(5).to_bits(), 142);
        assert_eq!(GyroRange::Dps2000.beta_for_gyro_error(0), Q16::ZERO);
    }

    #[test]
    fn default_config_is_valid() {
        let config = AhrsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gyro_integration_factor.to_bits(), 22854);
        assert_eq!(config.gravity_counts, STANDARD_GRAVITY_COUNTS);
    }

    #[test]
    fn builders_override_fields() {
        let config = AhrsConfig::default()
            .with_beta(Q16::from_bits(1000))
            .with_gyro_integration_factor(Q16::from_bits(2000))
            .with_accel_range(AccelRange::G8);
        assert_eq!(config.beta.to_bits(), 1000);
        assert_eq!(config.gyro_integration_factor.to_bits(), 2000);
        assert_eq!(config.gravity_counts, 4096);

        assert_eq!(config.with_gravity_counts(1000).gravity_counts, 1000);
    }

    #[test]
    fn validation_rejects_bad_gains() {
        let negative_beta = AhrsConfig::default().with_beta(Q16::from_bits(-1));
        assert!(matches!(
            negative_beta.validate(),
            Err(AhrsError::InvalidGain { .. })
        ));

        let zero_step = AhrsConfig::default().with_gyro_integration_factor(Q16::ZERO);
        assert!(zero_step.validate().is_err());

        let no_gravity = AhrsConfig::default().with_gravity_counts(0);
        assert!(no_gravity.validate().is_err());
    }

    #[test]
    fn validation_caps_integration_factor_at_one() {
        let unit = AhrsConfig::default().with_gyro_integration_factor(Q16::ONE);
        assert!(unit.validate().is_ok());

        let just_over = AhrsConfig::default()
            .with_gyro_integration_factor(Q16::from_bits(Q16::ONE.to_bits() + 1));
        assert!(matches!(
            just_over.validate(),
            Err(AhrsError::InvalidGain { .. })
        ));

        let saturated = AhrsConfig::default().with_gyro_integration_factor(Q16::MAX);
        assert!(matches!(
            saturated.validate(),
            Err(AhrsError::InvalidGain { .. })
        ));
    }
}
