//! Blending policies: how two bracketing stop colors combine at a fraction.
//!
//! Sampling takes a policy at every call site. Built-in policies are selected
//! with [`BlendMode`]; any `Fn(C, C, f32) -> C` works as a custom policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Lerp;

/// Something that can combine `left` and `right` at local fraction `t`.
pub trait BlendPolicy<C> {
    fn blend(&self, left: C, right: C, t: f32) -> C;
}

impl<C, F> BlendPolicy<C> for F
where
    F: Fn(C, C, f32) -> C,
{
    fn blend(&self, left: C, right: C, t: f32) -> C {
        self(left, right, t)
    }
}

/// Built-in blending policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Per-channel `left × (1 − t) + right × t`.
    #[default]
    Linear,
    /// Step function, always the left stop.
    RoundDown,
    /// Step function, always the right stop.
    RoundUp,
    /// Left below `t = 0.5`, right from `0.5` on.
    NearestNeighbor,
}

/// Policy used when a caller has no preference.
pub const DEFAULT_BLEND: BlendMode = BlendMode::Linear;

impl BlendMode {
    pub const ALL: [BlendMode; 4] = [
        BlendMode::Linear,
        BlendMode::RoundDown,
        BlendMode::RoundUp,
        BlendMode::NearestNeighbor,
    ];

    /// Name used in configuration files and environment variables.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::RoundDown => "round_down",
            Self::RoundUp => "round_up",
            Self::NearestNeighbor => "nearest_neighbor",
        }
    }
}

impl<C: Lerp> BlendPolicy<C> for BlendMode {
    fn blend(&self, left: C, right: C, t: f32) -> C {
        match self {
            Self::Linear => blend_linear(left, right, t),
            Self::RoundDown => blend_round_down(left, right, t),
            Self::RoundUp => blend_round_up(left, right, t),
            Self::NearestNeighbor => blend_nearest_neighbor(left, right, t),
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown blend mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown blend mode: {0}")]
pub struct ParseBlendModeError(pub String);

impl FromStr for BlendMode {
    type Err = ParseBlendModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseBlendModeError(name.to_string()))
    }
}

pub fn blend_linear<C: Lerp>(left: C, right: C, t: f32) -> C {
    left.lerp(right, t)
}

pub fn blend_round_down<C>(left: C, _right: C, _t: f32) -> C {
    left
}

pub fn blend_round_up<C>(_left: C, right: C, _t: f32) -> C {
    right
}

pub fn blend_nearest_neighbor<C>(left: C, right: C, t: f32) -> C {
    if t < 0.5 { left } else { right }
}
