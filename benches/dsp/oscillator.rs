//! Benchmarks for waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use resonix::dsp::oscillator;
use resonix::{sample_count, Sanitizer, Shape};

use crate::DURATIONS;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &duration in DURATIONS {
        let len = sample_count(duration);
        let mut buffer = vec![0.0f32; len];

        for shape in Shape::ALL {
            group.bench_with_input(BenchmarkId::new(shape.name(), len), &len, |b, _| {
                b.iter(|| {
                    let mut sanitizer = Sanitizer::new();
                    oscillator::render(
                        black_box(shape),
                        black_box(440.0),
                        black_box(&mut buffer),
                        &mut sanitizer,
                    );
                })
            });
        }
    }

    group.finish();
}
