//! Low-level DSP primitives behind the crate-level entry points.
//!
//! These functions take a caller-owned [`Sanitizer`](math::Sanitizer) so the
//! number of recovered non-finite samples can be inspected after a call; the
//! facade functions in the crate root create one per call and log the count.

/// Biquad low-pass, high-pass and band-pass filters.
pub mod filter;
/// Parallel band-pass bank tuned to interpolated vowel formants.
pub mod formant;
/// Phase wrapping, reduced trigonometry and non-finite sample recovery.
pub mod math;
/// Waveform shapes and the phase accumulator that drives them.
pub mod oscillator;
/// Hann window coefficients.
pub mod window;

pub use math::Sanitizer;
pub use oscillator::Shape;
