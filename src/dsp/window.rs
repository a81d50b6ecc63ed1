//! Hann window coefficients.
//!
//! The Hann (raised cosine) window starts and ends at zero and peaks at one in
//! the middle:
//!
//! ```text
//!   1.0 ┤      ▄▀▀▀▄
//!       │    ▄▀     ▀▄
//!       │  ▄▀         ▀▄
//!   0.0 ┼▀▀─────────────▀▀
//!       0      N/2     N-1
//! ```
//!
//! The generator uses it as an amplitude envelope for click-free tone bursts;
//! the analysis module uses it to tame spectral leakage before an FFT.

use std::f64::consts::TAU;

use super::math::cosine;

/// `0.5 · (1 − cos(2πu))` for a position `u` in `[0, 1]`.
#[inline]
pub fn raised_cosine(position: f64) -> f64 {
    0.5 * (1.0 - cosine(TAU * position))
}

/// Coefficient for sample `n` of a symmetric Hann window of `len` samples.
///
/// Windows of length 0 or 1 have no taper and return 1.
#[inline]
pub fn hann(n: usize, len: usize) -> f64 {
    if len <= 1 {
        return 1.0;
    }
    raised_cosine(n as f64 / (len - 1) as f64)
}

/// The full window as a buffer.
pub fn hann_window(len: usize) -> Vec<f32> {
    (0..len).map(|n| hann(n, len) as f32).collect()
}
