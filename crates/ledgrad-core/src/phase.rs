//! Offset/repeat phase math.
//!
//! ```text
//! t     = offset + progress × repeat
//! phase = t − floor(t)            ∈ [0, 1)
//! ```
//!
//! The wrap is a floored modulo, so negative phases wrap forward
//! (`−0.25 → 0.75`). `repeat = 0` pins the phase to `offset mod 1`.

use serde::{Deserialize, Serialize};

use crate::error::GradientError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Shift applied before wrapping. Animations advance this over time.
    pub offset: f32,
    /// How many times the gradient is traversed as progress goes 0 → 1.
    pub repeat: f32,
}

impl Default for Phase {
    fn default() -> Self {
        Self {
            offset: 0.0,
            repeat: 1.0,
        }
    }
}

impl Phase {
    pub const fn new(offset: f32, repeat: f32) -> Self {
        Self { offset, repeat }
    }

    /// Map `progress` to a phase in `[0, 1)`.
    pub fn wrap(&self, progress: f32) -> Result<f32, GradientError> {
        let t = self.offset + progress * self.repeat;
        if !t.is_finite() {
            return Err(GradientError::NonFinitePhase(t));
        }
        Ok(wrap_unit(t))
    }

    /// True if every progress in `[0, 1]` maps to a finite phase.
    pub(crate) fn is_bounded(&self) -> bool {
        (self.offset.abs() + self.repeat.abs()).is_finite()
    }
}

/// Floored modulo into `[0, 1)`. `t` must be finite.
pub(crate) fn wrap_unit(t: f32) -> f32 {
    let wrapped = t - t.floor();
    // Tiny negative inputs can round up to exactly 1.0.
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_wrap_identity_inside_unit_interval() {
        let phase = Phase::default();
        assert_eq!(phase.wrap(0.0), Ok(0.0));
        assert_eq!(phase.wrap(0.25), Ok(0.25));
        assert_eq!(phase.wrap(1.0), Ok(0.0));
    }

    #[test]
    fn test_wrap_is_floored_for_negative_phase() {
        let wrapped = Phase::new(-0.25, 1.0).wrap(0.0).unwrap();
        assert!((wrapped - 0.75).abs() < EPSILON);
        let wrapped = Phase::default().wrap(-1.25).unwrap();
        assert!((wrapped - 0.75).abs() < EPSILON);
    }

    #[test]
    fn test_wrap_never_reaches_one() {
        let wrapped = Phase::default().wrap(-1e-10).unwrap();
        assert!((0.0..1.0).contains(&wrapped));
    }

    #[test]
    fn test_zero_repeat_pins_to_offset() {
        let phase = Phase::new(2.3, 0.0);
        for progress in [0.0, 0.4, 17.0] {
            let wrapped = phase.wrap(progress).unwrap();
            assert!((wrapped - 0.3).abs() < 1e-5);
        }
    }

    #[test]
    fn test_wrap_rejects_non_finite() {
        assert!(matches!(
            Phase::default().wrap(f32::NAN),
            Err(GradientError::NonFinitePhase(_))
        ));
        assert!(Phase::new(f32::INFINITY, 1.0).wrap(0.0).is_err());
    }
}
