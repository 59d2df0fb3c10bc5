//! Velocity estimation by trapezoidal integration of the acceleration stream.

use crate::types::Vec3;

/// Conversion factor from units of gravity to m/s².
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Running velocity estimate fed one acceleration sample per tick.
///
/// Each `add` applies one interval of the composite trapezoidal rule: the
/// area contribution is the average of the previous and current sample times
/// the measured elapsed time. Callers must pass the true elapsed time between
/// deliveries; feeding a nominal sampling period instead lets timer jitter
/// accumulate as silent drift.
pub struct VelocityIntegrator {
    value: Vec3,
    last_sample: Vec3,
}

impl VelocityIntegrator {
    /// Creates an integrator whose first trapezoid starts at `initial_g`.
    ///
    /// The initial sample only establishes the left endpoint; no area is
    /// accumulated until the first `add`.
    pub fn new(initial_g: Vec3) -> Self {
        Self {
            value: Vec3::ZERO,
            last_sample: initial_g.scaled(STANDARD_GRAVITY),
        }
    }

    /// Integrates one interval. `sample_g` is in units of gravity, `dt` in
    /// measured seconds since the previous sample.
    pub fn add(&mut self, sample_g: Vec3, dt: f64) {
        let accel = sample_g.scaled(STANDARD_GRAVITY);
        let mid = (accel + self.last_sample).scaled(0.5);
        self.last_sample = accel;
        self.value += mid.scaled(dt);
    }

    /// Clears the accumulated velocity. The last seen sample is kept so the
    /// next interval stays numerically well-posed: the input signal is
    /// continuous even though the output was zeroed.
    pub fn reset(&mut self) {
        self.value = Vec3::ZERO;
    }

    pub fn value(&self) -> Vec3 {
        self.value
    }

    /// Euclidean norm of the velocity vector, in m/s.
    pub fn magnitude(&self) -> f64 {
        self.value.magnitude()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_rule_exact_values() {
        let mut integ = VelocityIntegrator::new(Vec3::ZERO);
        integ.add(Vec3::new(1.0, 0.0, 0.0), 1.0);
        // First interval averages 0 and 1 g: 9.81 * 1.0 * 0.5.
        assert_eq!(integ.value().x, 4.905);
        integ.add(Vec3::new(1.0, 0.0, 0.0), 1.0);
        // Second interval is flat at 1 g.
        assert_eq!(integ.value().x, 4.905 + 9.81);
        assert!((integ.value().x - 14.715).abs() < 1e-12);
        assert_eq!(integ.value().y, 0.0);
        assert_eq!(integ.value().z, 0.0);
    }

    #[test]
    fn constant_input_integrates_linearly() {
        // Starting the integrator on the same constant makes every trapezoid
        // flat, so the discretization error is exactly zero.
        let a = Vec3::new(0.3, -0.2, 0.1);
        let mut integ = VelocityIntegrator::new(a);
        let dt = 0.05;
        let steps = 200;
        for _ in 0..steps {
            integ.add(a, dt);
        }
        let expected = a.scaled(STANDARD_GRAVITY * dt * steps as f64);
        assert!((integ.value().x - expected.x).abs() < 1e-9);
        assert!((integ.value().y - expected.y).abs() < 1e-9);
        assert!((integ.value().z - expected.z).abs() < 1e-9);
    }

    #[test]
    fn zero_input_stays_zero() {
        let mut integ = VelocityIntegrator::new(Vec3::ZERO);
        for _ in 0..100 {
            integ.add(Vec3::ZERO, 0.033);
        }
        assert_eq!(integ.value(), Vec3::ZERO);
        assert_eq!(integ.magnitude(), 0.0);
    }

    #[test]
    fn reset_is_idempotent_and_keeps_last_sample() {
        let mut integ = VelocityIntegrator::new(Vec3::ZERO);
        integ.add(Vec3::new(1.0, 0.0, 0.0), 1.0);
        integ.reset();
        integ.reset();
        assert_eq!(integ.value(), Vec3::ZERO);
        // The left endpoint survived the reset: the next flat interval
        // integrates at full height, not from zero again.
        integ.add(Vec3::new(1.0, 0.0, 0.0), 1.0);
        assert_eq!(integ.value().x, 9.81);
    }
}
