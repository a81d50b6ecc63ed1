//! Owned sample buffers.

use std::ops::Deref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SAMPLE_RATE;

/// A fully materialized mono buffer clocked at [`SAMPLE_RATE`].
///
/// Signals are immutable once produced. Every generator and filter returns a
/// fresh `Signal`; filters accept any `&[f32]`, so a `Signal` can be passed
/// straight back in through deref coercion.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signal {
    samples: Vec<f32>,
}

impl Signal {
    pub fn from_samples(samples: Vec<f32>) -> Self {
        Self { samples }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback length in seconds at the global sample rate.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / SAMPLE_RATE as f64
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.samples
    }
}

impl Deref for Signal {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.samples
    }
}

impl AsRef<[f32]> for Signal {
    fn as_ref(&self) -> &[f32] {
        &self.samples
    }
}

impl From<Vec<f32>> for Signal {
    fn from(samples: Vec<f32>) -> Self {
        Self::from_samples(samples)
    }
}

impl From<Signal> for Vec<f32> {
    fn from(signal: Signal) -> Self {
        signal.samples
    }
}

impl FromIterator<f32> for Signal {
    fn from_iter<I: IntoIterator<Item = f32>>(iter: I) -> Self {
        Self::from_samples(iter.into_iter().collect())
    }
}
