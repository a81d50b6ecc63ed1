//! Waveform synthesis and stateless recursive filters.
//!
//! Every operation is a pure transform over a fully materialized buffer:
//! [`generate`] produces a [`Signal`], and the filters take any `&[f32]` and
//! return a new `Signal` of the same length. No filter keeps state between
//! calls.
//!
//! ```
//! use resonix::{generate, lowpass, Shape, BUTTERWORTH_Q};
//!
//! let saw = generate(Shape::Sawtooth, 0.5, 110.0)?;
//! let mellow = lowpass(&saw, 800.0, BUTTERWORTH_Q)?;
//! assert_eq!(mellow.len(), saw.len());
//! # Ok::<(), resonix::DspError>(())
//! ```

pub mod analysis;
pub mod dsp;
pub mod error;
pub mod signal;

pub use dsp::filter::{BandpassParams, CutoffParams, FilterType, BUTTERWORTH_Q};
pub use dsp::formant::{FormantParams, Vowel};
pub use dsp::math::Sanitizer;
pub use dsp::oscillator::Shape;
pub use error::{DspError, DspResult};
pub use signal::Signal;

/// Every signal in the crate is clocked at this rate.
pub const SAMPLE_RATE: u32 = 44_100;

/// Highest representable frequency.
pub const NYQUIST_HZ: f32 = SAMPLE_RATE as f32 / 2.0;

/// Longest buffer `generate` will allocate (about 27 hours).
pub const MAX_SAMPLES: usize = u32::MAX as usize;

/// `round(duration_secs · SAMPLE_RATE)`.
pub fn sample_count(duration_secs: f32) -> usize {
    (duration_secs as f64 * SAMPLE_RATE as f64).round().max(0.0) as usize
}

/// Synthesize `duration_secs` of `shape` at `frequency_hz`.
///
/// Fails with [`DspError::InvalidArgument`] if the duration or frequency is
/// non-positive or non-finite, or if the buffer would exceed [`MAX_SAMPLES`].
pub fn generate(shape: Shape, duration_secs: f32, frequency_hz: f32) -> DspResult<Signal> {
    let mut sanitizer = Sanitizer::new();
    let signal = generate_with(shape, duration_secs, frequency_hz, &mut sanitizer)?;
    report(&sanitizer);
    Ok(signal)
}

/// [`generate`] with a caller-owned sanitizer, so recovered tangent and
/// cotangent poles can be counted across a longer chain.
pub fn generate_with(
    shape: Shape,
    duration_secs: f32,
    frequency_hz: f32,
    sanitizer: &mut Sanitizer,
) -> DspResult<Signal> {
    error::require_positive("duration_secs", duration_secs)?;
    error::require_positive("frequency_hz", frequency_hz)?;
    let len = sample_count(duration_secs);
    if len > MAX_SAMPLES {
        return Err(DspError::invalid(
            "duration_secs",
            duration_secs,
            "a duration of at most MAX_SAMPLES samples",
        ));
    }

    let _span = tracing::debug_span!("generate", %shape, duration_secs, frequency_hz).entered();
    let mut samples = vec![0.0f32; len];
    dsp::oscillator::render(shape, frequency_hz as f64, &mut samples, sanitizer);

    Ok(Signal::from_samples(samples))
}

/// Second-order resonant low-pass at `cutoff_hz` with Q = `resonance`.
pub fn lowpass(input: &[f32], cutoff_hz: f32, resonance: f32) -> DspResult<Signal> {
    let _span = tracing::debug_span!("lowpass", cutoff_hz, resonance).entered();
    let mut sanitizer = Sanitizer::new();
    let out = dsp::filter::lowpass(input, CutoffParams::new(cutoff_hz, resonance), &mut sanitizer)?;
    report(&sanitizer);
    Ok(out.into())
}

/// Second-order resonant high-pass at `cutoff_hz` with Q = `resonance`.
pub fn highpass(input: &[f32], cutoff_hz: f32, resonance: f32) -> DspResult<Signal> {
    let _span = tracing::debug_span!("highpass", cutoff_hz, resonance).entered();
    let mut sanitizer = Sanitizer::new();
    let out =
        dsp::filter::highpass(input, CutoffParams::new(cutoff_hz, resonance), &mut sanitizer)?;
    report(&sanitizer);
    Ok(out.into())
}

/// Band-pass around `center_hz`, `bandwidth_hz` wide.
///
/// `resonance` above [`BUTTERWORTH_Q`] sharpens the peak further.
pub fn bandpass(
    input: &[f32],
    center_hz: f32,
    bandwidth_hz: f32,
    resonance: f32,
) -> DspResult<Signal> {
    let _span = tracing::debug_span!("bandpass", center_hz, bandwidth_hz, resonance).entered();
    let mut sanitizer = Sanitizer::new();
    let params = BandpassParams::new(center_hz, bandwidth_hz, resonance);
    let out = dsp::filter::bandpass(input, params, &mut sanitizer)?;
    report(&sanitizer);
    Ok(out.into())
}

/// Vowel formant filter. `peak` picks the vowel, `spread` widens the bands,
/// `mix` blends filtered and dry signal (0 = untouched input).
pub fn formant(input: &[f32], peak: f32, mix: f32, spread: f32) -> DspResult<Signal> {
    let _span = tracing::debug_span!("formant", peak, mix, spread).entered();
    let mut sanitizer = Sanitizer::new();
    let out = dsp::formant::formant(input, FormantParams::new(peak, mix, spread), &mut sanitizer)?;
    report(&sanitizer);
    Ok(out.into())
}

fn report(sanitizer: &Sanitizer) {
    let substitutions = sanitizer.substitutions();
    if substitutions > 0 {
        tracing::debug!(substitutions, "recovered non-finite samples");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count_rounds() {
        assert_eq!(sample_count(1.0), 44_100);
        assert_eq!(sample_count(0.5), 22_050);
        assert_eq!(sample_count(1.0 / 44_100.0 * 2.4), 2);
        assert_eq!(sample_count(1.0 / 44_100.0 * 2.6), 3);
    }

    #[test]
    fn generate_rejects_bad_arguments() {
        for (duration, frequency, name) in [
            (0.0, 440.0, "duration_secs"),
            (-1.0, 440.0, "duration_secs"),
            (f32::NAN, 440.0, "duration_secs"),
            (1.0, 0.0, "frequency_hz"),
            (1.0, f32::INFINITY, "frequency_hz"),
            (1e9, 440.0, "duration_secs"),
        ] {
            let err = generate(Shape::Sine, duration, frequency).unwrap_err();
            assert_eq!(err.parameter(), Some(name), "({duration}, {frequency})");
        }
    }

    #[test]
    fn tiny_duration_yields_empty_signal() {
        let signal = generate(Shape::Hann, 1e-6, 440.0).unwrap();
        assert!(signal.is_empty());
    }

    #[test]
    fn generate_with_counts_recovered_poles() {
        let mut sanitizer = Sanitizer::new();
        let signal = generate_with(Shape::Tangent, 0.01, 11_025.0, &mut sanitizer).unwrap();
        assert_eq!(signal.len(), 441);
        assert!(sanitizer.substitutions() > 0);
    }

    #[test]
    fn filters_accept_signals_directly() {
        let signal = generate(Shape::Square, 0.05, 220.0).unwrap();
        let low = lowpass(&signal, 1_000.0, BUTTERWORTH_Q).unwrap();
        let high = highpass(&low, 100.0, BUTTERWORTH_Q).unwrap();
        let band = bandpass(&high, 440.0, 200.0, 1.0).unwrap();
        let vowel = formant(&band, Vowel::Oh.peak(), 0.5, 0.2).unwrap();
        assert_eq!(vowel.len(), signal.len());
    }
}
