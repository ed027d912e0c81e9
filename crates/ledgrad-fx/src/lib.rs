//! Drives a gradient onto an LED strip over time.
//!
//! [`GradientFx`] turns elapsed wall-clock time into a sampling offset and
//! fills one color per LED. Hardware sits behind the [`LedStrip`] trait, so the
//! same effect runs against a real transmitter or an in-memory strip.

pub mod config;
pub mod error;
pub mod fx;
pub mod strip;

pub use config::FxConfig;
pub use error::FxError;
pub use fx::{FrameDriver, GradientFx, SharedGradient};
pub use strip::{Channel, LedStrip, MemoryStrip, StripError};
