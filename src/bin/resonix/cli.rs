//! Command-line arguments and the processing chain they describe.

use clap::{Args, Parser, Subcommand};
use resonix::dsp::{filter, formant};
use resonix::{
    generate_with, BandpassParams, CutoffParams, DspResult, FormantParams, Sanitizer, Shape,
    Signal, BUTTERWORTH_Q,
};

/// resonix - waveform synthesis and recursive filters
#[derive(Parser)]
#[command(name = "resonix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render a signal and print its statistics
    Render(SignalArgs),

    /// Render a signal and open the terminal viewer
    View(SignalArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct SignalArgs {
    /// Waveform: sine, cosine, tangent, cotangent, square, sawtooth, triangle, hann, phased_hann
    pub shape: Shape,

    /// Length in seconds
    #[arg(short, long, default_value_t = 1.0)]
    pub duration: f32,

    /// Oscillator frequency in Hz
    #[arg(short, long, default_value_t = 440.0)]
    pub frequency: f32,

    /// Low-pass cutoff in Hz
    #[arg(long, value_name = "HZ")]
    pub lowpass: Option<f32>,

    /// High-pass cutoff in Hz
    #[arg(long, value_name = "HZ")]
    pub highpass: Option<f32>,

    /// Band-pass center in Hz
    #[arg(long, value_name = "HZ", requires = "bandwidth")]
    pub bandpass: Option<f32>,

    /// Band-pass width in Hz
    #[arg(long, value_name = "HZ", requires = "bandpass")]
    pub bandwidth: Option<f32>,

    /// Q shared by the low-pass, high-pass and band-pass stages
    #[arg(long, value_name = "Q", default_value_t = BUTTERWORTH_Q)]
    pub resonance: f32,

    /// Formant filter vowel position, 0.0 (ah) to 1.0 (oo)
    #[arg(long, value_name = "PEAK")]
    pub formant: Option<f32>,

    /// Formant dry/wet balance
    #[arg(long, value_name = "M", default_value_t = 1.0)]
    pub mix: f32,

    /// Formant band widening
    #[arg(long, value_name = "S", default_value_t = 0.0)]
    pub spread: f32,
}

/// A signal together with a description of how it was made.
pub(crate) struct Rendered {
    pub signal: Signal,
    pub stages: Vec<String>,
    pub substitutions: usize,
}

impl Rendered {
    pub fn title(&self) -> String {
        self.stages.join(" → ")
    }
}

impl SignalArgs {
    /// Generate, then apply low-pass, high-pass, band-pass and formant in
    /// that order, skipping any stage whose flag is absent.
    pub fn render(&self) -> DspResult<Rendered> {
        let mut sanitizer = Sanitizer::new();
        let mut stages = vec![format!("{} {} Hz", self.shape, self.frequency)];

        let mut samples =
            generate_with(self.shape, self.duration, self.frequency, &mut sanitizer)?.into_vec();

        if let Some(cutoff) = self.lowpass {
            let params = CutoffParams::new(cutoff, self.resonance);
            samples = filter::lowpass(&samples, params, &mut sanitizer)?;
            stages.push(format!("lowpass {cutoff} Hz"));
        }
        if let Some(cutoff) = self.highpass {
            let params = CutoffParams::new(cutoff, self.resonance);
            samples = filter::highpass(&samples, params, &mut sanitizer)?;
            stages.push(format!("highpass {cutoff} Hz"));
        }
        if let (Some(center), Some(bandwidth)) = (self.bandpass, self.bandwidth) {
            let params = BandpassParams::new(center, bandwidth, self.resonance);
            samples = filter::bandpass(&samples, params, &mut sanitizer)?;
            stages.push(format!("bandpass {center}±{} Hz", bandwidth / 2.0));
        }
        if let Some(peak) = self.formant {
            let params = FormantParams::new(peak, self.mix, self.spread);
            samples = formant::formant(&samples, params, &mut sanitizer)?;
            stages.push(format!("formant {peak}"));
        }

        let substitutions = sanitizer.substitutions();
        if substitutions > 0 {
            tracing::info!(substitutions, "recovered non-finite samples");
        }

        Ok(Rendered {
            signal: Signal::from_samples(samples),
            stages,
            substitutions,
        })
    }
}
