//! Estimator interface
//!
//! One static seam so firmware can swap attitude estimators without touching
//! the sampling loop. Implementations own their state; nothing here allocates
//! or dispatches dynamically.

use crate::{fusion::UpdateStatus, quaternion::Quaternion, sample::ImuSample};

/// Fixed-rate attitude estimator fed with raw IMU samples
///
/// ```rust
/// use fixahrs_core::{AhrsConfig, AttitudeEstimator, ImuSample, MadgwickFilter, RawVector};
///
/// fn run<E: AttitudeEstimator>(estimator: &mut E, samples: &[ImuSample]) {
///     for sample in samples {
///         estimator.update(sample);
///     }
/// }
///
/// let mut filter = MadgwickFilter::new(AhrsConfig::default()).unwrap();
/// let level = ImuSample::new(RawVector::new(0, 0, 16383), RawVector::ZERO);
/// run(&mut filter, &[level; 10]);
/// assert!(filter.orientation().is_normalized());
/// ```
pub trait AttitudeEstimator {
    /// Advance the estimate by one sampling period
    fn update(&mut self, sample: &ImuSample) -> UpdateStatus;

    /// Current orientation (earth frame relative to sensor frame)
    fn orientation(&self) -> Quaternion;

    /// Back to the initial orientation
    fn reset(&mut self);
}
