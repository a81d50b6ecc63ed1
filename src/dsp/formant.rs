//! Vowel-shaped formant filter.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::filter::{BiquadCoeffs, BiquadState};
use super::math::Sanitizer;
use crate::error::{require_unit, DspResult};

/*
Formants
========

A vowel is recognisable by a handful of resonant peaks in its spectrum, the
formants. F1 tracks how open the mouth is, F2 how far forward the tongue
sits; F3 and F4 mostly colour the voice. Running a buzzy source (a sawtooth
is the classic choice) through band-passes tuned to those peaks is enough to
make it say "ah" or "oo".

Vocabulary
----------

  peak      Position along the vowel continuum, 0.0 to 1.0. Five anchors sit at
            0.1, 0.3, 0.5, 0.7 and 0.9; anything in between is a linear blend
            of the two nearest, anything outside clamps to the end anchor.

                 ah     eh     ee     oh     oo
            ─────┼──────┼──────┼──────┼──────┼─────
            0   0.1    0.3    0.5    0.7    0.9   1

  spread    Bandwidth of every peak. 0.0 is the narrowest, ringing setting;
            1.0 makes each band SPREAD_WIDENING + 1 times wider and the
            result diffuse.

  mix       Dry/wet balance: output = mix · filtered + (1 − mix) · input.
            0.0 returns the input untouched, 1.0 is fully wet.


Topology
--------

The four bands run in PARALLEL and are summed with falling gains:

              ┌─ BPF(F1) × 1.0 ─┐
              ├─ BPF(F2) × 0.7 ─┤
    input ────┤                 ├──(+)── wet
              ├─ BPF(F3) × 0.5 ─┤
              └─ BPF(F4) × 0.3 ─┘

In series, four narrow band-passes at different frequencies would multiply
their skirts together and leave almost nothing. In parallel each one
contributes its own peak.
*/

pub const FORMANT_COUNT: usize = 4;

/// Relative level of F1..F4 in the wet sum.
pub const FORMANT_GAINS: [f64; FORMANT_COUNT] = [1.0, 0.7, 0.5, 0.3];

/// Bandwidth of F1..F4 in Hz at `spread = 0`.
pub const BASE_BANDWIDTHS_HZ: [f64; FORMANT_COUNT] = [60.0, 90.0, 120.0, 150.0];

/// At `spread = 1` every band is `1 + SPREAD_WIDENING` times its base width.
pub const SPREAD_WIDENING: f64 = 4.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vowel {
    /// "father"
    Ah,
    /// "bed"
    Eh,
    /// "feet"
    Ee,
    /// "boat"
    Oh,
    /// "boot"
    Oo,
}

impl Vowel {
    pub const ALL: [Vowel; 5] = [Vowel::Ah, Vowel::Eh, Vowel::Ee, Vowel::Oh, Vowel::Oo];

    /// Anchor position of this vowel on the `peak` axis.
    pub fn peak(self) -> f32 {
        match self {
            Vowel::Ah => 0.1,
            Vowel::Eh => 0.3,
            Vowel::Ee => 0.5,
            Vowel::Oh => 0.7,
            Vowel::Oo => 0.9,
        }
    }

    /// F1..F4 in Hz.
    pub fn formants(self) -> [f64; FORMANT_COUNT] {
        match self {
            Vowel::Ah => [800.0, 1150.0, 2900.0, 3900.0],
            Vowel::Eh => [400.0, 1600.0, 2700.0, 3300.0],
            Vowel::Ee => [350.0, 1700.0, 2700.0, 3700.0],
            Vowel::Oh => [450.0, 800.0, 2830.0, 3800.0],
            Vowel::Oo => [325.0, 700.0, 2530.0, 3500.0],
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormantParams {
    pub peak: f32,
    pub mix: f32,
    pub spread: f32,
}

impl FormantParams {
    pub fn new(peak: f32, mix: f32, spread: f32) -> Self {
        Self { peak, mix, spread }
    }

    /// Fully wet, narrowest bands, centred on `vowel`.
    pub fn vowel(vowel: Vowel) -> Self {
        Self::new(vowel.peak(), 1.0, 0.0)
    }

    pub fn validate(&self) -> DspResult<()> {
        require_unit("peak", self.peak)?;
        require_unit("mix", self.mix)?;
        require_unit("spread", self.spread)
    }
}

/// Formant centers for a position on the vowel continuum.
pub fn formant_frequencies(peak: f32) -> [f64; FORMANT_COUNT] {
    let peak = peak as f64;
    let first = Vowel::ALL[0];
    if peak <= first.peak() as f64 {
        return first.formants();
    }

    for pair in Vowel::ALL.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        let hi = upper.peak() as f64;
        if peak <= hi {
            let lo = lower.peak() as f64;
            let t = (peak - lo) / (hi - lo);
            let a = lower.formants();
            let b = upper.formants();
            return std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t);
        }
    }

    // past the last anchor
    Vowel::ALL[Vowel::ALL.len() - 1].formants()
}

struct Band {
    coeffs: BiquadCoeffs,
    state: BiquadState,
    guard: Sanitizer,
    gain: f64,
}

fn bank(params: &FormantParams) -> [Band; FORMANT_COUNT] {
    let centers = formant_frequencies(params.peak);
    let widening = 1.0 + SPREAD_WIDENING * params.spread as f64;

    std::array::from_fn(|i| {
        let bandwidth = BASE_BANDWIDTHS_HZ[i] * widening;
        Band {
            coeffs: BiquadCoeffs::bandpass(centers[i], centers[i] / bandwidth),
            state: BiquadState::default(),
            guard: Sanitizer::new(),
            gain: FORMANT_GAINS[i],
        }
    })
}

pub fn formant(
    input: &[f32],
    params: FormantParams,
    sanitizer: &mut Sanitizer,
) -> DspResult<Vec<f32>> {
    params.validate()?;

    let mut bands = bank(&params);
    let wet = params.mix as f64;
    let dry = 1.0 - wet;

    // the dry path needs its own guard: NaN · 0 is still NaN
    let mut input_guard = Sanitizer::new();

    let mut out = Vec::with_capacity(input.len());
    for &sample in input {
        let x = input_guard.recover(sample as f64);
        let filtered: f64 = bands
            .iter_mut()
            .map(|band| band.gain * band.state.process(&band.coeffs, x, &mut band.guard))
            .sum();
        let filtered = sanitizer.recover(filtered);
        out.push((x * dry + filtered * wet) as f32);
    }

    sanitizer.merge(&input_guard);
    for band in &bands {
        sanitizer.merge(&band.guard);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_return_table_rows() {
        for vowel in Vowel::ALL {
            assert_eq!(formant_frequencies(vowel.peak()), vowel.formants());
        }
    }

    #[test]
    fn out_of_range_peaks_clamp_to_end_anchors() {
        assert_eq!(formant_frequencies(0.0), Vowel::Ah.formants());
        assert_eq!(formant_frequencies(1.0), Vowel::Oo.formants());
    }

    #[test]
    fn midpoint_interpolates_linearly() {
        let mid = formant_frequencies(0.2);
        let ah = Vowel::Ah.formants();
        let eh = Vowel::Eh.formants();
        for i in 0..FORMANT_COUNT {
            assert!((mid[i] - (ah[i] + eh[i]) / 2.0).abs() < 1e-3);
        }
    }

    #[test]
    fn zero_mix_is_identity() {
        let input: Vec<f32> = (0..1_000).map(|i| ((i as f32) * 0.37).sin() * 0.8).collect();
        for &(peak, spread) in &[(0.0, 0.0), (0.5, 0.5), (1.0, 1.0)] {
            let out = formant(&input, FormantParams::new(peak, 0.0, spread), &mut Sanitizer::new())
                .unwrap();
            assert_eq!(out, input);
        }
    }

    #[test]
    fn interpolation_covers_every_segment() {
        let oh = Vowel::Oh.formants();
        let oo = Vowel::Oo.formants();
        let mid = formant_frequencies(0.8);
        for i in 0..FORMANT_COUNT {
            assert!((mid[i] - (oh[i] + oo[i]) / 2.0).abs() < 1e-3);
        }
    }

    #[test]
    fn non_finite_input_is_recovered_on_both_paths() {
        let mut input: Vec<f32> = (0..1_000).map(|i| ((i as f32) * 0.37).sin() * 0.8).collect();
        input[100] = f32::NAN;
        input[400] = f32::INFINITY;
        for mix in [0.0, 0.5, 1.0] {
            let mut sanitizer = Sanitizer::new();
            let out = formant(&input, FormantParams::new(0.5, mix, 0.0), &mut sanitizer).unwrap();
            assert!(out.iter().all(|s| s.is_finite()), "mix {mix}");
            assert!(sanitizer.substitutions() >= 2);
        }
    }

    #[test]
    fn rejects_out_of_range_parameters() {
        let mut sanitizer = Sanitizer::new();
        for params in [
            FormantParams::new(-0.1, 0.5, 0.5),
            FormantParams::new(0.5, 1.5, 0.5),
            FormantParams::new(0.5, 0.5, f32::NAN),
        ] {
            assert!(formant(&[0.0; 8], params, &mut sanitizer).is_err());
        }
    }

    #[test]
    fn wet_output_keeps_length_and_stays_finite() {
        let input: Vec<f32> = (0..4_096).map(|i| if i % 100 < 50 { 1.0 } else { -1.0 }).collect();
        let mut sanitizer = Sanitizer::new();
        let out = formant(&input, FormantParams::vowel(Vowel::Ee), &mut sanitizer).unwrap();
        assert_eq!(out.len(), input.len());
        assert!(out.iter().all(|s| s.is_finite()));
        assert_eq!(sanitizer.substitutions(), 0);
    }
}
