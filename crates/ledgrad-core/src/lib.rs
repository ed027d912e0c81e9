//! Sorted color-stop gradients.
//!
//! This crate owns the stop ordering rules, insertion and merge, normalization,
//! and the sampling math that maps an arbitrary phase onto an interpolated
//! color. No hardware or timing dependencies.

pub mod blend;
pub mod codec;
pub mod color;
pub mod error;
pub mod gradient;
pub mod ordering;
pub mod phase;
pub mod stop;
pub mod stop_list;

// Re-exports for convenience.
pub use blend::{BlendMode, BlendPolicy, DEFAULT_BLEND};
pub use codec::{CodecError, ColorCodec};
pub use color::{Lerp, ToRgb8};
pub use error::GradientError;
pub use gradient::{Emplace, Gradient, Samples};
pub use ordering::{POSITION_EPSILON, PositionedCompare};
pub use phase::Phase;
pub use stop::{Stop, StopMut};
pub use stop_list::StopList;
