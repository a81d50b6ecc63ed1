//! Benchmarks for the biquad filters.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use resonix::dsp::filter;
use resonix::{generate, BandpassParams, CutoffParams, Sanitizer, Shape};

use crate::DURATIONS;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &duration in DURATIONS {
        let Ok(input) = generate(Shape::Sawtooth, duration, 110.0) else {
            continue;
        };
        let len = input.len();

        group.bench_with_input(BenchmarkId::new("lowpass", len), &len, |b, _| {
            b.iter(|| {
                filter::lowpass(
                    black_box(&input),
                    CutoffParams::new(1_000.0, 2.0),
                    &mut Sanitizer::new(),
                )
            })
        });

        group.bench_with_input(BenchmarkId::new("highpass", len), &len, |b, _| {
            b.iter(|| {
                filter::highpass(
                    black_box(&input),
                    CutoffParams::new(1_000.0, 2.0),
                    &mut Sanitizer::new(),
                )
            })
        });

        group.bench_with_input(BenchmarkId::new("bandpass", len), &len, |b, _| {
            b.iter(|| {
                filter::bandpass(
                    black_box(&input),
                    BandpassParams::new(1_000.0, 300.0, 2.0),
                    &mut Sanitizer::new(),
                )
            })
        });
    }

    group.finish();
}
