//! Range-reduced trigonometry and non-finite sample recovery.

use std::f64::consts::TAU;

/*
Why Range Reduction?
====================

A naive oscillator computes sin(2π · f · i / sample_rate) from the absolute
sample index. After a minute at 44.1 kHz the argument is in the hundreds of
thousands of radians, and every ulp of the argument is a visible chunk of
phase. Keeping θ inside [0, 2π) means the trig functions always see a small,
well-conditioned argument no matter how long the buffer is.

Asymptotes
----------

tan(θ) blows up where cos(θ) = 0, cot(θ) where sin(θ) = 0:

      tan                         cot
       │   ╱      ╱                ╲      ╲   │
       │  ╱      ╱                  ╲      ╲  │
    ───┼─╱──────╱───            ─────╲──────╲─┼──
       │╱      ╱                      ╲      ╲│
      π/2    3π/2                     0      π

Inside ASYMPTOTE_EPSILON of a pole these helpers return NaN on purpose. The
Sanitizer then decides what the sample becomes, so there is exactly one place
where non-finite values are turned back into audio.
*/

/// Closest distance to a pole before tangent/cotangent report NaN.
pub const ASYMPTOTE_EPSILON: f64 = 1e-3;

/// Substituted samples, and every sample passed to `Sanitizer::sanitize`, are
/// clamped into `[-SANITIZE_LIMIT, SANITIZE_LIMIT]`.
pub const SANITIZE_LIMIT: f64 = 4.0;

/// Wrap an angle in radians into `[0, 2π)`.
#[inline]
pub fn wrap_phase(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TAU);
    // rem_euclid rounds up to TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[inline]
pub fn sine(theta: f64) -> f64 {
    wrap_phase(theta).sin()
}

#[inline]
pub fn cosine(theta: f64) -> f64 {
    wrap_phase(theta).cos()
}

/// tan(θ), or NaN within [`ASYMPTOTE_EPSILON`] of a pole.
#[inline]
pub fn tangent(theta: f64) -> f64 {
    let theta = wrap_phase(theta);
    let cos = theta.cos();
    if cos.abs() < ASYMPTOTE_EPSILON {
        return f64::NAN;
    }
    theta.sin() / cos
}

/// cot(θ), or NaN within [`ASYMPTOTE_EPSILON`] of a pole.
#[inline]
pub fn cotangent(theta: f64) -> f64 {
    let theta = wrap_phase(theta);
    let sin = theta.sin();
    if sin.abs() < ASYMPTOTE_EPSILON {
        return f64::NAN;
    }
    theta.cos() / sin
}

/// Per-call recovery state for non-finite samples.
///
/// [`recover`](Self::recover) replaces a NaN or ±Infinity with the last finite
/// value seen (0 before the first one), clamped to the sanitizer's limit.
/// Finite values pass through untouched, so a linear filter stays linear.
/// Recursive filters feed the recovered value back into their delay line, so
/// one bad sample cannot poison the rest of the buffer.
///
/// [`sanitize`](Self::sanitize) additionally clamps every value. The generator
/// uses it for tangent and cotangent, whose finite samples near a pole are
/// otherwise in the hundreds.
///
/// Each replacement is counted; the count is the only trace a recovered
/// instability leaves behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sanitizer {
    last_finite: f64,
    limit: f64,
    substitutions: usize,
}

impl Sanitizer {
    pub fn new() -> Self {
        Self::with_limit(SANITIZE_LIMIT)
    }

    pub fn with_limit(limit: f64) -> Self {
        Self {
            last_finite: 0.0,
            limit: limit.abs(),
            substitutions: 0,
        }
    }

    #[inline]
    pub fn recover(&mut self, value: f64) -> f64 {
        if value.is_finite() {
            self.last_finite = value;
            value
        } else {
            self.substitutions += 1;
            self.last_finite.clamp(-self.limit, self.limit)
        }
    }

    #[inline]
    pub fn sanitize(&mut self, value: f64) -> f64 {
        self.recover(value).clamp(-self.limit, self.limit)
    }

    /// Number of non-finite values replaced so far.
    pub fn substitutions(&self) -> usize {
        self.substitutions
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// Fold another sanitizer's substitution count into this one.
    pub fn merge(&mut self, other: &Sanitizer) {
        self.substitutions += other.substitutions;
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn wrap_phase_stays_in_range() {
        for &theta in &[0.0, 1.0, TAU, -1e-18, -PI, 1e6, -1e6, 7.5 * TAU] {
            let wrapped = wrap_phase(theta);
            assert!(
                (0.0..TAU).contains(&wrapped),
                "wrap_phase({theta}) = {wrapped}"
            );
        }
        assert!((wrap_phase(TAU + 0.25) - 0.25).abs() < 1e-12);
        assert!((wrap_phase(-0.25) - (TAU - 0.25)).abs() < 1e-12);
    }

    #[test]
    fn reduced_trig_matches_std_for_large_arguments() {
        let theta = 2.0 * PI * 440.0 * 120.0 + 0.3;
        assert!((sine(theta) - 0.3f64.sin()).abs() < 1e-9);
        assert!((cosine(theta) - 0.3f64.cos()).abs() < 1e-9);
    }

    #[test]
    fn tangent_is_nan_at_poles() {
        assert!(tangent(FRAC_PI_2).is_nan());
        assert!(tangent(3.0 * FRAC_PI_2).is_nan());
        assert!(cotangent(0.0).is_nan());
        assert!(cotangent(PI).is_nan());
        assert!((tangent(PI / 4.0) - 1.0).abs() < 1e-12);
        assert!((cotangent(PI / 4.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sanitizer_substitutes_last_finite_value() {
        let mut sanitizer = Sanitizer::new();
        assert_eq!(sanitizer.sanitize(f64::NAN), 0.0);
        assert_eq!(sanitizer.sanitize(0.5), 0.5);
        assert_eq!(sanitizer.sanitize(f64::INFINITY), 0.5);
        assert_eq!(sanitizer.sanitize(f64::NEG_INFINITY), 0.5);
        assert_eq!(sanitizer.substitutions(), 3);
    }

    #[test]
    fn sanitize_clamps_finite_values() {
        let mut sanitizer = Sanitizer::new();
        assert_eq!(sanitizer.sanitize(100.0), SANITIZE_LIMIT);
        assert_eq!(sanitizer.sanitize(-100.0), -SANITIZE_LIMIT);
        assert_eq!(sanitizer.sanitize(f64::NAN), -SANITIZE_LIMIT);
        assert_eq!(sanitizer.substitutions(), 1);
    }

    #[test]
    fn recover_passes_finite_values_through() {
        let mut sanitizer = Sanitizer::new();
        assert_eq!(sanitizer.recover(6.0), 6.0);
        assert_eq!(sanitizer.recover(-250.0), -250.0);
        assert_eq!(sanitizer.substitutions(), 0);
    }

    #[test]
    fn recover_clamps_only_the_substitute() {
        let mut sanitizer = Sanitizer::new();
        sanitizer.recover(250.0);
        assert_eq!(sanitizer.recover(f64::NAN), SANITIZE_LIMIT);
        sanitizer.recover(0.25);
        assert_eq!(sanitizer.recover(f64::INFINITY), 0.25);
        assert_eq!(sanitizer.substitutions(), 2);
    }

    #[test]
    fn merge_accumulates_counts() {
        let mut a = Sanitizer::new();
        let mut b = Sanitizer::new();
        a.sanitize(f64::NAN);
        b.sanitize(f64::NAN);
        b.sanitize(f64::NAN);
        a.merge(&b);
        assert_eq!(a.substitutions(), 3);
    }
}
