//! Benchmarks for the four-band formant filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use resonix::dsp::formant;
use resonix::{generate, FormantParams, Sanitizer, Shape, Vowel};

use crate::DURATIONS;

pub fn bench_formant(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/formant");

    for &duration in DURATIONS {
        let Ok(input) = generate(Shape::Sawtooth, duration, 110.0) else {
            continue;
        };
        let len = input.len();

        // Anchor vowel: no interpolation between table rows
        group.bench_with_input(BenchmarkId::new("ah", len), &len, |b, _| {
            b.iter(|| {
                formant::formant(
                    black_box(&input),
                    FormantParams::vowel(Vowel::Ah),
                    &mut Sanitizer::new(),
                )
            })
        });

        // Between two vowels, wide bands, half wet
        group.bench_with_input(BenchmarkId::new("blend", len), &len, |b, _| {
            b.iter(|| {
                formant::formant(
                    black_box(&input),
                    FormantParams::new(0.42, 0.5, 0.6),
                    &mut Sanitizer::new(),
                )
            })
        });
    }

    group.finish();
}
