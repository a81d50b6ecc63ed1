//! Benchmarks for the DSP primitives.

mod filter;
mod formant;
mod oscillator;

pub use filter::bench_filter;
pub use formant::bench_formant;
pub use oscillator::bench_oscillator;
