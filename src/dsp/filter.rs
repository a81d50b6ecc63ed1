use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::math::Sanitizer;
use crate::error::{require_audible, require_positive, DspError, DspResult};
use crate::SAMPLE_RATE;

/*
| type      | coefficients            | passes         | rejects        |
| --------- | ----------------------- | -------------- | -------------- |
| low-pass  | RBJ LPF, Q = resonance  | below cutoff   | above cutoff   |
| high-pass | RBJ HPF, Q = resonance  | above cutoff   | below cutoff   |
| band-pass | RBJ BPF (0 dB peak)     | center ± bw/2  | outside        |
*/

/*
Biquad Filters
==============

All three filters are the same second-order recursion with different
coefficients (Robert Bristow-Johnson's "Audio EQ Cookbook"):

    y[n] = b0·x[n] + b1·x[n-1] + b2·x[n-2] − a1·y[n-1] − a2·y[n-2]

The coefficients are computed once per call from the cutoff (or center),
the Q and the sample rate:

    ω = 2π · cutoff / sample_rate
    α = sin ω / (2Q)

Vocabulary
----------

  cutoff      The corner frequency. For low/high-pass the response is −3 dB
              there when Q = 0.707.

  Q           Resonance. 0.707 is Butterworth: maximally flat, no bump.
              Higher values add a peak at the cutoff; lower values round the
              corner off earlier.

                gain
                 │      Q = 4
                 │       ╱╲
                 │──────╯  ╲    Q = 0.707
                 │──────────╲
                 │           ╲___
                 └──────────────── freq
                          cutoff

  delay line  The previous two inputs and outputs (x1, x2, y1, y2). This is
              the only state a biquad has.


Stateless Per Call
------------------

The delay line lives in a BiquadState created at the top of each call and
dropped at the end. Nothing rings over from a previous buffer, and two calls
with the same input always produce the same output.

Stability
---------

For any Q > 0 and any cutoff strictly inside (0, Nyquist) the poles of these
designs sit inside the unit circle. What can still go wrong is the input:
a NaN or Infinity in the caller's buffer would otherwise circulate in the
feedback path forever. Every output goes through Sanitizer::recover before it
is written back into y1, so the recursion only ever sees finite values.
Finite outputs are never clamped: a Q of 10 at the cutoff really peaks at 10,
and a loud buffer comes out as loud as it went in.
*/

/// Butterworth Q: the flattest passband without a resonant bump.
pub const BUTTERWORTH_Q: f32 = 0.707;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
}

/// Parameters for the low-pass and high-pass filters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoffParams {
    pub cutoff_hz: f32,
    pub resonance: f32,
}

impl CutoffParams {
    pub fn new(cutoff_hz: f32, resonance: f32) -> Self {
        Self {
            cutoff_hz,
            resonance,
        }
    }

    /// Butterworth response at `cutoff_hz`.
    pub fn butterworth(cutoff_hz: f32) -> Self {
        Self::new(cutoff_hz, BUTTERWORTH_Q)
    }

    pub fn validate(&self) -> DspResult<()> {
        require_audible("cutoff_hz", self.cutoff_hz)?;
        require_positive("resonance", self.resonance)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandpassParams {
    pub center_hz: f32,
    pub bandwidth_hz: f32,
    pub resonance: f32,
}

impl BandpassParams {
    pub fn new(center_hz: f32, bandwidth_hz: f32, resonance: f32) -> Self {
        Self {
            center_hz,
            bandwidth_hz,
            resonance,
        }
    }

    pub fn validate(&self) -> DspResult<()> {
        require_audible("center_hz", self.center_hz)?;
        require_positive("bandwidth_hz", self.bandwidth_hz)?;
        require_positive("resonance", self.resonance)?;
        if self.center_hz - self.bandwidth_hz / 2.0 <= 0.0 {
            return Err(DspError::invalid(
                "bandwidth_hz",
                self.bandwidth_hz,
                "a bandwidth whose lower edge stays above 0 Hz",
            ));
        }
        Ok(())
    }

    /// Q of the band-pass: `center / bandwidth`, sharpened (never widened)
    /// by resonance above Butterworth.
    pub fn q(&self) -> f64 {
        let mut q = self.center_hz as f64 / self.bandwidth_hz as f64;
        if self.resonance > BUTTERWORTH_Q {
            q *= self.resonance as f64 / BUTTERWORTH_Q as f64;
        }
        q
    }
}

/// Normalized biquad coefficients (a0 divided out).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    pub fn new(filter_type: FilterType, frequency_hz: f64, q: f64) -> Self {
        let omega = TAU * frequency_hz / SAMPLE_RATE as f64;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let (b0, b1, b2) = match filter_type {
            FilterType::LowPass => {
                let b = (1.0 - cos_omega) / 2.0;
                (b, 1.0 - cos_omega, b)
            }
            FilterType::HighPass => {
                let b = (1.0 + cos_omega) / 2.0;
                (b, -(1.0 + cos_omega), b)
            }
            FilterType::BandPass => (alpha, 0.0, -alpha),
        };
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    pub fn lowpass(cutoff_hz: f64, q: f64) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz, q)
    }

    pub fn highpass(cutoff_hz: f64, q: f64) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz, q)
    }

    pub fn bandpass(center_hz: f64, q: f64) -> Self {
        Self::new(FilterType::BandPass, center_hz, q)
    }
}

/// Direct form I delay line. Lives for exactly one call.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BiquadState {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadState {
    #[inline]
    pub(crate) fn process(
        &mut self,
        coeffs: &BiquadCoeffs,
        sample: f64,
        sanitizer: &mut Sanitizer,
    ) -> f64 {
        let y = coeffs.b0 * sample + coeffs.b1 * self.x1 + coeffs.b2 * self.x2
            - coeffs.a1 * self.y1
            - coeffs.a2 * self.y2;
        let y = sanitizer.recover(y);

        self.x2 = self.x1;
        self.x1 = sample;
        self.y2 = self.y1;
        self.y1 = y;

        y
    }
}

/// Run `input` through one biquad with a fresh delay line.
pub fn render(coeffs: &BiquadCoeffs, input: &[f32], sanitizer: &mut Sanitizer) -> Vec<f32> {
    let mut state = BiquadState::default();
    let mut out = Vec::with_capacity(input.len());
    out.extend(
        input
            .iter()
            .map(|&x| state.process(coeffs, x as f64, sanitizer) as f32),
    );
    out
}

pub fn lowpass(
    input: &[f32],
    params: CutoffParams,
    sanitizer: &mut Sanitizer,
) -> DspResult<Vec<f32>> {
    params.validate()?;
    let coeffs = BiquadCoeffs::lowpass(params.cutoff_hz as f64, params.resonance as f64);
    Ok(render(&coeffs, input, sanitizer))
}

pub fn highpass(
    input: &[f32],
    params: CutoffParams,
    sanitizer: &mut Sanitizer,
) -> DspResult<Vec<f32>> {
    params.validate()?;
    let coeffs = BiquadCoeffs::highpass(params.cutoff_hz as f64, params.resonance as f64);
    Ok(render(&coeffs, input, sanitizer))
}

pub fn bandpass(
    input: &[f32],
    params: BandpassParams,
    sanitizer: &mut Sanitizer,
) -> DspResult<Vec<f32>> {
    params.validate()?;
    let coeffs = BiquadCoeffs::bandpass(params.center_hz as f64, params.q());
    Ok(render(&coeffs, input, sanitizer))
}
