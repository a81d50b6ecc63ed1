use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::math::{cosine, cotangent, sine, tangent, wrap_phase, Sanitizer};
use super::window::{hann, raised_cosine};
use crate::error::DspError;
use crate::SAMPLE_RATE;

/*
Waveform Generator
==================

Every shape is a function of one number: the wrapped phase θ in [0, 2π).
The generator advances θ by 2π·f/sample_rate per sample and asks the shape
what the amplitude is at that phase.

Vocabulary
----------

  phase       Position within one cycle, in radians. 0 is the start of the
              cycle, 2π is the start of the next one.

  increment   How far the phase moves per sample: 2π · f / sample_rate.
              At 440 Hz and 44.1 kHz that is ≈ 0.0627 rad.

  wrap        Subtracting 2π whenever θ passes it. The accumulator never grows,
              so a 60 second buffer is as precise as a 10 ms one.


Shapes
------

  Sine        sin θ. One partial, no harmonics.

  Cosine      cos θ. Sine shifted by a quarter cycle.

  Tangent     tan θ. Poles at π/2 and 3π/2; samples near a pole are sanitized
              (held at the last finite value and clamped to ±4).

  Cotangent   cos θ / sin θ. Poles at 0 and π, sanitized the same way.

  Square      +1 for the first half cycle, −1 for the second. The sign of sin θ.

  Sawtooth    2·(x − floor(x + 0.5)) with x = θ/2π. Rises from 0 to +1, jumps to
              −1 at the half cycle, rises back to 0.

                 ╱│  ╱│
                ╱ │ ╱ │
              ─╱──│╱──│─
                  │   │

  Triangle    2·|saw(θ + π/2)| − 1. The quarter-cycle shift puts the zero
              crossings where Sine has them (rising through 0 at θ = 0).

  Hann        sin θ under one Hann envelope that spans the whole buffer. Starts
              and ends at exactly zero: no click at onset or release.

  PhasedHann  A train of overlapping Hann-windowed bursts. Each frame is about
              BURST_CYCLES periods long, frames overlap by half, and every
              frame's carrier is BURST_PHASE_STEP further along than the last:

                frame 0   ╱‾‾‾‾╲
                frame 1      ╱‾‾‾‾╲
                frame 2         ╱‾‾‾‾╲
                          ───────────────
                sum       ╱‾‾‾‾‾‾‾‾‾‾‾‾╲

              Overlapping raised cosines at half-frame hop sum to one, so the
              envelope is flat in the middle and tapers to zero at both ends.
              Where two frames overlap their carriers are out of phase, which
              is what makes the bursts audible as separate events.
*/

/// Carrier periods per PhasedHann frame.
pub const BURST_CYCLES: f64 = 16.0;

/// Carrier phase advance between successive PhasedHann frames.
pub const BURST_PHASE_STEP: f64 = FRAC_PI_2;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Sine,
    Cosine,
    Tangent,
    Cotangent,
    Square,
    Sawtooth,
    Triangle,
    Hann,
    PhasedHann,
}

impl Shape {
    pub const ALL: [Shape; 9] = [
        Shape::Sine,
        Shape::Cosine,
        Shape::Tangent,
        Shape::Cotangent,
        Shape::Square,
        Shape::Sawtooth,
        Shape::Triangle,
        Shape::Hann,
        Shape::PhasedHann,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Shape::Sine => "sine",
            Shape::Cosine => "cosine",
            Shape::Tangent => "tangent",
            Shape::Cotangent => "cotangent",
            Shape::Square => "square",
            Shape::Sawtooth => "sawtooth",
            Shape::Triangle => "triangle",
            Shape::Hann => "hann",
            Shape::PhasedHann => "phased_hann",
        }
    }

    /// Shapes whose raw output is not confined to [-1, 1].
    pub fn is_unbounded(self) -> bool {
        matches!(self, Shape::Tangent | Shape::Cotangent)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = DspError;

    /// Accepts `phased_hann`, `PHASED_HANN` and `phased-hann` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name() == normalized)
            .ok_or_else(|| DspError::UnknownShape(s.to_string()))
    }
}

/// Phase accumulator wrapped into [0, 2π) every period.
#[derive(Debug, Clone, Copy)]
pub struct PhaseAccumulator {
    phase: f64,
    increment: f64,
}

impl PhaseAccumulator {
    pub fn new(frequency_hz: f64, sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            increment: TAU * frequency_hz / sample_rate,
        }
    }

    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    #[inline]
    pub fn advance(&mut self) {
        self.phase += self.increment;
        if self.phase >= TAU {
            self.phase -= TAU;
            // frequencies above the sample rate skip whole cycles per sample
            if self.phase >= TAU {
                self.phase = wrap_phase(self.phase);
            }
        }
    }
}

/// Bipolar ramp through zero at θ = 0, in [-1, 1).
#[inline]
pub fn sawtooth(theta: f64) -> f64 {
    let x = wrap_phase(theta) / TAU;
    2.0 * (x - (x + 0.5).floor())
}

#[inline]
pub fn triangle(theta: f64) -> f64 {
    2.0 * sawtooth(theta + FRAC_PI_2).abs() - 1.0
}

#[inline]
pub fn square(theta: f64) -> f64 {
    if wrap_phase(theta) < PI {
        1.0
    } else {
        -1.0
    }
}

/// Amplitude of a periodic shape at phase `theta`.
///
/// The windowed shapes report their carrier (a sine); their envelopes depend
/// on the position in the buffer and are applied by [`render`].
#[inline]
pub fn waveform(shape: Shape, theta: f64) -> f64 {
    match shape {
        Shape::Sine | Shape::Hann | Shape::PhasedHann => sine(theta),
        Shape::Cosine => cosine(theta),
        Shape::Tangent => tangent(theta),
        Shape::Cotangent => cotangent(theta),
        Shape::Square => square(theta),
        Shape::Sawtooth => sawtooth(theta),
        Shape::Triangle => triangle(theta),
    }
}

/// Fill `out` with `shape` at `frequency_hz`, clocked at [`SAMPLE_RATE`].
///
/// Tangent and cotangent poles go through `sanitizer`; the other shapes never
/// produce non-finite values but are passed through it all the same.
pub fn render(shape: Shape, frequency_hz: f64, out: &mut [f32], sanitizer: &mut Sanitizer) {
    let mut phase = PhaseAccumulator::new(frequency_hz, SAMPLE_RATE as f64);

    match shape {
        Shape::Hann => {
            let len = out.len();
            for (i, sample) in out.iter_mut().enumerate() {
                *sample = (sine(phase.phase()) * hann(i, len)) as f32;
                phase.advance();
            }
        }
        Shape::PhasedHann => render_bursts(frequency_hz, out),
        periodic => {
            for sample in out.iter_mut() {
                *sample = sanitizer.sanitize(waveform(periodic, phase.phase())) as f32;
                phase.advance();
            }
        }
    }
}

/// Frame layout for PhasedHann: `frames` windows of length `2 · hop`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BurstLayout {
    frames: usize,
    hop: f64,
}

impl BurstLayout {
    /// Stretch the hop so frames tile `[0, len − 1]` exactly:
    /// `(frames + 1) · hop = len − 1`.
    fn new(len: usize, frequency_hz: f64) -> Self {
        let span = len.saturating_sub(1) as f64;
        let target_hop = BURST_CYCLES * SAMPLE_RATE as f64 / frequency_hz / 2.0;
        let hops = (span / target_hop).round().max(2.0);
        Self {
            frames: hops as usize - 1,
            hop: span / hops,
        }
    }
}

fn render_bursts(frequency_hz: f64, out: &mut [f32]) {
    if out.len() < 2 {
        out.fill(0.0);
        return;
    }

    let layout = BurstLayout::new(out.len(), frequency_hz);
    let frame_len = 2.0 * layout.hop;
    let mut phase = PhaseAccumulator::new(frequency_hz, SAMPLE_RATE as f64);

    for (i, sample) in out.iter_mut().enumerate() {
        let t = i as f64;
        let theta = phase.phase();
        // at most two frames cover any position
        let newest = ((t / layout.hop) as usize).min(layout.frames - 1);
        let oldest = newest.saturating_sub(1);

        let mut acc = 0.0;
        for k in oldest..=newest {
            let position = (t - k as f64 * layout.hop) / frame_len;
            if (0.0..=1.0).contains(&position) {
                acc += raised_cosine(position) * sine(theta + k as f64 * BURST_PHASE_STEP);
            }
        }

        *sample = acc.clamp(-1.0, 1.0) as f32;
        phase.advance();
    }
}
