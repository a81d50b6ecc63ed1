//! Benchmarks for generate-then-filter chains.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use resonix::{bandpass, formant, generate, highpass, lowpass, DspResult, Shape, Signal};

use crate::DURATIONS;

/// Saw through a low-pass: the classic subtractive voice.
fn mellow_saw(duration: f32) -> DspResult<Signal> {
    let saw = generate(Shape::Sawtooth, duration, 110.0)?;
    lowpass(&saw, 800.0, 4.0)
}

/// Every filter in a row, the longest chain the CLI can build.
fn full_chain(duration: f32) -> DspResult<Signal> {
    let square = generate(Shape::Square, duration, 220.0)?;
    let low = lowpass(&square, 4_000.0, 1.0)?;
    let high = highpass(&low, 80.0, 0.707)?;
    let band = bandpass(&high, 1_200.0, 800.0, 1.0)?;
    formant(&band, 0.3, 0.8, 0.2)
}

pub fn bench_chains(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/chains");

    for &duration in DURATIONS {
        let len = resonix::sample_count(duration);

        group.bench_with_input(BenchmarkId::new("mellow_saw", len), &duration, |b, &d| {
            b.iter(|| mellow_saw(black_box(d)))
        });

        group.bench_with_input(BenchmarkId::new("full_chain", len), &duration, |b, &d| {
            b.iter(|| full_chain(black_box(d)))
        });
    }

    // One minute of sine: the accumulator never leaves [0, 2π)
    group.sample_size(10);
    group.bench_function("sine_60s", |b| {
        b.iter(|| generate(black_box(Shape::Sine), 60.0, 440.0))
    });

    group.finish();
}
