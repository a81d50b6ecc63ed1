//! Benchmarks for the synthesis primitives and complete processing chains.
//!
//! Run with: cargo bench
//!
//! Every operation works on a whole buffer, so sizes are given as durations
//! at 44.1 kHz rather than audio-callback block sizes:
//!   - 10 ms   =    441 samples
//!   - 100 ms  =  4_410 samples
//!   - 1 s     = 44_100 samples
//!
//! Benchmark groups:
//!   - dsp/*        Oscillator shapes, biquad filters, formant bank
//!   - scenarios/*  Generate-then-filter chains and long renders

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Buffer lengths, in seconds, shared by every group.
pub const DURATIONS: &[f32] = &[0.01, 0.1, 1.0];

criterion_group!(
    benches,
    // Primitives
    dsp::bench_oscillator,
    dsp::bench_filter,
    dsp::bench_formant,
    // Chains
    scenarios::bench_chains,
);
criterion_main!(benches);
