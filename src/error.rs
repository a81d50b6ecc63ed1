//! Error types for synthesis and filtering.
//!
//! Every entry point validates its arguments up front and reports the first
//! offending parameter before any buffer is allocated. Non-finite samples that
//! show up *during* processing are not errors: they are recovered in place by
//! [`Sanitizer`](crate::dsp::math::Sanitizer) and only counted.

use thiserror::Error;

/// Result type for all fallible DSP operations.
pub type DspResult<T> = Result<T, DspError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DspError {
    /// A parameter was non-finite or outside its documented range.
    #[error("invalid argument '{name}' = {value}: expected {expected}")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// A shape name from the host boundary did not match any [`Shape`](crate::Shape).
    #[error("unknown waveform shape '{0}'")]
    UnknownShape(String),
}

impl DspError {
    pub fn invalid(name: &'static str, value: impl Into<f64>, expected: &'static str) -> Self {
        let value = value.into();
        tracing::warn!(name, value, expected, "rejected argument");
        Self::InvalidArgument {
            name,
            value,
            expected,
        }
    }

    /// Name of the offending parameter, if this is an argument error.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { name, .. } => Some(name),
            Self::UnknownShape(_) => None,
        }
    }
}

/// Finite and strictly greater than zero.
pub(crate) fn require_positive(name: &'static str, value: f32) -> DspResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DspError::invalid(name, value, "a finite value > 0"))
    }
}

/// Finite and inside the closed unit interval.
pub(crate) fn require_unit(name: &'static str, value: f32) -> DspResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DspError::invalid(name, value, "a finite value in [0, 1]"))
    }
}

/// Finite and inside the open interval (0, Nyquist).
pub(crate) fn require_audible(name: &'static str, value: f32) -> DspResult<()> {
    if value.is_finite() && value > 0.0 && value < crate::NYQUIST_HZ {
        Ok(())
    } else {
        Err(DspError::invalid(
            name,
            value,
            "a frequency in (0, 22050) Hz",
        ))
    }
}
