//! Errors raised by gradient construction, access and sampling.

/// Errors that can occur while building, indexing or sampling a gradient.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GradientError {
    #[error("gradient has no stops")]
    Empty,

    #[error("stop index {index} out of range for {len} stops")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("stop position must be finite, got {0}")]
    NonFinitePosition(f32),

    #[error("sampling phase must be finite, got {0}")]
    NonFinitePhase(f32),
}
