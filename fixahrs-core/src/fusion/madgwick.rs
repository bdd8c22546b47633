//! Madgwick IMU Update in Q16.16
//!
//! ## Algorithm
//!
//! ```text
//! 1. q̇  = q ⊗ (0, gx, gy, gz)                 doubled, no ½
//! 2. if a ≠ 0:
//!      â  = a / |a|
//!      s  = ∇f(q, â)                           closed form below
//!      q̇ -= β · s / |s|
//! 3. q  += q̇ · k
//! 4. q   = q / |q|
//! ```
//!
//! The gradient of the gravity error, with `k = q1² + q2²`, `t = 2(az + k)` and
//! `K = 2k`:
//!
//! ```text
//! s0 = q0·K + q2·ax − q1·ay
//! s1 = q1·t − q3·ax − q0·ay
//! s2 = q2·t + q0·ax − q3·ay
//! s3 = q3·K − q1·ax − q2·ay
//! ```
//!
//! This is Madgwick's optimised form divided by two; normalisation removes the
//! common factor.
//!
//! ## Degenerate Inputs
//!
//! - All-zero accelerometer: no correction, [`UpdateStatus::GyroOnly`].
//! - Gradient of exactly zero: nothing to correct. The gradient is normalised
//!   from the exact squared norm of its raw bits ([`Quaternion::direction`]),
//!   so even a residue of a few LSB still produces a full `β` step. A Q16
//!   squared norm would floor to zero once every component is below 256 LSB
//!   and leave a permanent tilt bias.
//! - Once settled the estimate alternates around the true attitude within one
//!   correction step `β·k` of the quaternion, i.e. within `2·β·k` in
//!   `sin(roll)` and `sin(pitch)`.
//! - Integrated quaternion whose squared norm floors to zero: the state is
//!   reset to identity, [`UpdateStatus::Recovered`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    config::AhrsConfig,
    errors::AhrsResult,
    fixed_point::Q16,
    quaternion::Quaternion,
    sample::{ImuSample, RawVector},
    traits::AttitudeEstimator,
    transforms::{self, Tilt, XyProjection},
};

use super::UpdateStatus;

/// Advance `state` by one sample.
///
/// `beta` and `gyro_integration_factor` are Q16.16 gains (see
/// [`AhrsConfig`]); the samples are raw sensor counts. `state` should be a unit
/// quaternion and is left as one.
pub fn update(
    beta: Q16,
    gyro_integration_factor: Q16,
    raw_accel: &RawVector,
    raw_gyro: &RawVector,
    state: &mut Quaternion,
) -> UpdateStatus {
    let Quaternion { q0, q1, q2, q3 } = *state;

    let gx = Q16::from_raw_sample(raw_gyro.x);
    let gy = Q16::from_raw_sample(raw_gyro.y);
    let gz = Q16::from_raw_sample(raw_gyro.z);

    let mut q_dot = Quaternion::new(
        -(q1 * gx) - q2 * gy - q3 * gz,
        q0 * gx + q2 * gz - q3 * gy,
        q0 * gy - q1 * gz + q3 * gx,
        q0 * gz + q1 * gy - q2 * gx,
    );

    let status = if raw_accel.is_zero() {
        UpdateStatus::GyroOnly
    } else {
        let ax = Q16::from_raw_sample(raw_accel.x);
        let ay = Q16::from_raw_sample(raw_accel.y);
        let az = Q16::from_raw_sample(raw_accel.z);

        let recip_norm = (ax * ax + ay * ay + az * az).rsqrt();
        let ax = ax * recip_norm;
        let ay = ay * recip_norm;
        let az = az * recip_norm;

        let k = q1 * q1 + q2 * q2;
        let t = (az + k).double();
        let k2 = k.double();

        let s0 = q0 * k2 + q2 * ax - q1 * ay;
        let s1 = q1 * t - q3 * ax - q0 * ay;
        let s2 = q2 * t + q0 * ax - q3 * ay;
        let s3 = q3 * k2 - q1 * ax - q2 * ay;

        if let Some(s) = Quaternion::new(s0, s1, s2, s3).direction() {
            q_dot.q0 -= beta * s.q0;
            q_dot.q1 -= beta * s.q1;
            q_dot.q2 -= beta * s.q2;
            q_dot.q3 -= beta * s.q3;
        }

        UpdateStatus::Fused
    };

    let q0 = q0 + q_dot.q0 * gyro_integration_factor;
    let q1 = q1 + q_dot.q1 * gyro_integration_factor;
    let q2 = q2 + q_dot.q2 * gyro_integration_factor;
    let q3 = q3 + q_dot.q3 * gyro_integration_factor;

    let norm_sq = q0 * q0 + q1 * q1 + q2 * q2 + q3 * q3;
    if norm_sq.is_zero() {
        log_warn!("orientation collapsed to zero norm, resetting to identity");
        *state = Quaternion::IDENTITY;
        return UpdateStatus::Recovered;
    }

    let recip_norm = norm_sq.rsqrt();
    *state = Quaternion::new(
        q0 * recip_norm,
        q1 * recip_norm,
        q2 * recip_norm,
        q3 * recip_norm,
    );

    status
}

/// Running counters kept by [`MadgwickFilter`] (all wrap on overflow)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilterStats {
    /// Update calls since construction or reset
    pub updates: u32,
    /// Updates that ran without an accelerometer correction
    pub gyro_only: u32,
    /// Updates that reset a collapsed orientation
    pub recoveries: u32,
}

impl FilterStats {
    fn record(&mut self, status: UpdateStatus) {
        self.updates = self.updates.wrapping_add(1);
        match status {
            UpdateStatus::Fused => {}
            UpdateStatus::GyroOnly => self.gyro_only = self.gyro_only.wrapping_add(1),
            UpdateStatus::Recovered => self.recoveries = self.recoveries.wrapping_add(1),
        }
    }
}

/// Madgwick filter state: gains, orientation and counters.
///
/// The orientation describes the earth frame relative to the sensor frame and
/// starts at identity (sensor level, axes aligned with the world).
///
/// ```rust
/// use fixahrs_core::{AhrsConfig, AttitudeEstimator, ImuSample, MadgwickFilter, RawVector};
///
/// let mut filter = MadgwickFilter::new(AhrsConfig::default())?;
/// let sample = ImuSample::from_interleaved(&[0, 0, 16383, 0, 0, 0]);
/// filter.update(&sample);
///
/// let linear = filter.linear_acceleration(&sample.accel);
/// assert!(linear.z.abs() < 16);
/// # Ok::<(), fixahrs_core::AhrsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MadgwickFilter {
    config: AhrsConfig,
    orientation: Quaternion,
    stats: FilterStats,
}

impl MadgwickFilter {
    /// Filter at identity orientation; rejects gains [`AhrsConfig::validate`] refuses
    pub fn new(config: AhrsConfig) -> AhrsResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            orientation: Quaternion::IDENTITY,
            stats: FilterStats::default(),
        })
    }

    /// Start from a known orientation instead of identity
    pub fn with_orientation(mut self, orientation: Quaternion) -> Self {
        self.orientation = orientation;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &AhrsConfig {
        &self.config
    }

    /// Counters since construction or the last reset
    pub fn stats(&self) -> FilterStats {
        self.stats
    }

    /// Roll/pitch sines of the current orientation
    pub fn tilt(&self) -> Tilt {
        Tilt::from_orientation(&self.orientation)
    }

    /// World-frame acceleration with the configured gravity removed
    pub fn linear_acceleration(&self, raw_accel: &RawVector) -> RawVector {
        transforms::linear_acceleration_with_gravity(
            &self.orientation,
            raw_accel,
            self.config.gravity_counts,
        )
    }

    /// Horizontal part of a world-frame acceleration, seen from the sensor
    pub fn linear_acceleration_xy_projection(&self, linear_accel: &RawVector) -> XyProjection {
        transforms::linear_acceleration_xy_projection(&self.orientation, linear_accel)
    }
}

impl AttitudeEstimator for MadgwickFilter {
    fn update(&mut self, sample: &ImuSample) -> UpdateStatus {
        let status = update(
            self.config.beta,
            self.config.gyro_integration_factor,
            &sample.accel,
            &sample.gyro,
            &mut self.orientation,
        );
        self.stats.record(status);
        status
    }

    fn orientation(&self) -> Quaternion {
        self.orientation
    }

    /// Identity orientation and cleared counters; the configuration is kept
    fn reset(&mut self) {
        log_debug!("filter reset after {} updates", self.stats.updates);
        self.orientation = Quaternion::IDENTITY;
        self.stats = FilterStats::default();
    }
}
