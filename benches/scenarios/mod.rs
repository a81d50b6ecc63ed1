//! Scenario benchmarks.
//!
//! These run the public entry points end to end, the way the CLI and the
//! integration tests use them.

mod chains;

pub use chains::bench_chains;
