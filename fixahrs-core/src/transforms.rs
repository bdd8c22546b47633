//! Derived Vector Transforms
//!
//! Readouts computed from the current orientation and raw sensor vectors.
//! Nothing here carries state; callers usually take one snapshot of the
//! quaternion and run whichever transforms they need against it.
//!
//! ## Linear Acceleration
//!
//! ```text
//! a_world = q ⊗ (0, ax, ay, az) ⊗ q*
//! linear  = a_world − (0, 0, g)
//! ```
//!
//! ## Body-Frame XY Projection
//!
//! Only the top-left 2×2 block of the rotation matrix is needed to bring a
//! world-frame horizontal acceleration back onto the sensor's X/Y axes:
//!
//! ```text
//! ┌     ┐   ┌                                ┐ ┌   ┐
//! │ x_b │   │ q0²+q1²−q2²−q3²   2(q1q2+q0q3) │ │ x │
//! │ y_b │ = │ 2(q1q2−q0q3)   q0²−q1²+q2²−q3² │ │ y │
//! └     ┘   └                                ┘ └   ┘
//! ```
//!
//! ## Tilt
//!
//! `sin(roll) = 2(q0q1 + q2q3)` and `sin(pitch) = 2(q1q3 − q0q2)` are the Y and
//! X components of the predicted gravity direction. They are sines only; the
//! angle itself needs an inverse sine and is ambiguous beyond ±90°.

use libm::asinf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::sensors::STANDARD_GRAVITY_COUNTS,
    fixed_point::Q16,
    quaternion::Quaternion,
    sample::RawVector,
};

const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Linear acceleration projected onto the sensor's X/Y axes, in raw counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct XyProjection {
    /// Component along body X
    pub x: i16,
    /// Component along body Y
    pub y: i16,
}

/// Accelerometer reading rotated into the world frame with gravity removed.
///
/// Uses [`STANDARD_GRAVITY_COUNTS`] (1 g at ±2 g full scale).
pub fn linear_acceleration(orientation: &Quaternion, raw_accel: &RawVector) -> RawVector {
    linear_acceleration_with_gravity(orientation, raw_accel, STANDARD_GRAVITY_COUNTS)
}

/// [`linear_acceleration`] for an accelerometer whose 1 g reads `gravity_counts`
pub fn linear_acceleration_with_gravity(
    orientation: &Quaternion,
    raw_accel: &RawVector,
    gravity_counts: i16,
) -> RawVector {
    let world = orientation.rotate(&Quaternion::pure(raw_accel));

    RawVector::new(
        world.q1.saturate_to_i16(),
        world.q2.saturate_to_i16(),
        (world.q3 - Q16::from_raw_sample(gravity_counts)).saturate_to_i16(),
    )
}

/// Project world-frame X/Y acceleration back onto body-frame X/Y.
///
/// The Z component of `linear_accel` is not used.
pub fn linear_acceleration_xy_projection(
    orientation: &Quaternion,
    linear_accel: &RawVector,
) -> XyProjection {
    let Quaternion { q0, q1, q2, q3 } = *orientation;

    let q0q0 = q0 * q0;
    let q1q1 = q1 * q1;
    let q2q2 = q2 * q2;
    let q3q3 = q3 * q3;
    let q1q2 = q1 * q2;
    let q0q3 = q0 * q3;

    let sensor_x_x = q0q0 + q1q1 - q2q2 - q3q3;
    let sensor_x_y = (q1q2 + q0q3).double();
    let sensor_y_x = (q1q2 - q0q3).double();
    let sensor_y_y = q0q0 - q1q1 + q2q2 - q3q3;

    let x = Q16::from_raw_sample(linear_accel.x);
    let y = Q16::from_raw_sample(linear_accel.y);

    XyProjection {
        x: (sensor_x_x * x + sensor_x_y * y).saturate_to_i16(),
        y: (sensor_y_x * x + sensor_y_y * y).saturate_to_i16(),
    }
}

/// Sine of the roll angle, `2(q0q1 + q2q3)`
pub fn sin_roll(q: &Quaternion) -> Q16 {
    (q.q0 * q.q1 + q.q2 * q.q3).double()
}

/// Sine of the pitch angle, `2(q1q3 − q0q2)`
pub fn sin_pitch(q: &Quaternion) -> Q16 {
    (q.q1 * q.q3 - q.q0 * q.q2).double()
}

/// Roll/pitch sines taken from one orientation snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tilt {
    /// `sin(roll)`
    pub sin_roll: Q16,
    /// `sin(pitch)`
    pub sin_pitch: Q16,
}

impl Tilt {
    /// Read both sines from `q`
    pub fn from_orientation(q: &Quaternion) -> Self {
        Self {
            sin_roll: sin_roll(q),
            sin_pitch: sin_pitch(q),
        }
    }

    /// Roll in degrees within [-90, 90].
    ///
    /// Applies a floating-point inverse sine; meant for display and logging
    /// on the host, not for the sampling loop.
    pub fn roll_degrees(&self) -> f32 {
        asin_degrees(self.sin_roll)
    }

    /// Pitch in degrees within [-90, 90], see [`Tilt::roll_degrees`]
    pub fn pitch_degrees(&self) -> f32 {
        asin_degrees(self.sin_pitch)
    }
}

fn asin_degrees(s: Q16) -> f32 {
    // rounding can push |sin| a few LSB past one
    asinf(s.to_f32().clamp(-1.0, 1.0)) * RAD_TO_DEG
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: i16 = STANDARD_GRAVITY_COUNTS;

    /// 90° about Z
    const YAW_90: Quaternion = Quaternion::from_bits([46341, 0, 0, 46341]);

    /// 30° about X: (cos 15°, sin 15°, 0, 0)
    const ROLL_30: Quaternion = Quaternion::from_bits([63303, 16962, 0, 0]);

    #[test]
    fn gravity_cancelled_at_rest() {
        let linear = linear_acceleration(&Quaternion::IDENTITY, &RawVector::new(0, 0, G));
        assert_eq!(linear, RawVector::ZERO);
    }

    #[test]
    fn identity_passes_motion_through() {
        let linear = linear_acceleration(&Quaternion::IDENTITY, &RawVector::new(500, -300, G + 100));
        assert_eq!(linear, RawVector::new(500, -300, 100));
    }

    #[test]
    fn custom_gravity_constant() {
        let linear = linear_acceleration_with_gravity(
            &Quaternion::IDENTITY,
            &RawVector::new(0, 0, 4096),
            4096,
        );
        assert_eq!(linear, RawVector::ZERO);
    }

    #[test]
    fn output_saturates_at_sensor_rails() {
        let linear = linear_acceleration(&Quaternion::IDENTITY, &RawVector::new(0, 0, i16::MIN));
        assert_eq!(linear.z, i16::MIN);
    }

    #[test]
    fn tilted_gravity_cancelled() {
        // sensor rolled 30°: gravity shows up on +Y and +Z
        let accel = RawVector::new(0, 8192, 14188);
        let linear = linear_acceleration(&ROLL_30, &accel);
        assert!(linear.x.abs() <= 4, "{:?}", linear);
        assert!(linear.y.abs() <= 8, "{:?}", linear);
        assert!(linear.z.abs() <= 8, "{:?}", linear);
    }

    #[test]
    fn xy_projection_of_zero_is_zero() {
        for q in [Quaternion::IDENTITY, YAW_90, ROLL_30] {
            let xy = linear_acceleration_xy_projection(&q, &RawVector::new(0, 0, 1234));
            assert_eq!(xy, XyProjection::default());
        }
    }

    #[test]
    fn xy_projection_undoes_yaw() {
        // world +X seen from a sensor yawed 90° is body −Y
        let xy = linear_acceleration_xy_projection(&YAW_90, &RawVector::new(1000, 0, 0));
        assert!(xy.x.abs() <= 2, "{:?}", xy);
        assert!((xy.y + 1000).abs() <= 2, "{:?}", xy);
    }

    #[test]
    fn identity_has_no_tilt() {
        assert_eq!(sin_roll(&Quaternion::IDENTITY), Q16::ZERO);
        assert_eq!(sin_pitch(&Quaternion::IDENTITY), Q16::ZERO);
        assert_eq!(Tilt::from_orientation(&Quaternion::IDENTITY), Tilt::default());
    }

    #[test]
    fn roll_sine_of_known_rotation() {
        let tilt = Tilt::from_orientation(&ROLL_30);
        // sin 30° = 0.5
        assert!(tilt.sin_roll.abs_diff_bits(Q16::from_bits(32768)) <= 4);
        assert_eq!(tilt.sin_pitch, Q16::ZERO);
        assert!((tilt.roll_degrees() - 30.0).abs() < 0.01);
        assert!(tilt.pitch_degrees().abs() < 1e-6);
    }
}
