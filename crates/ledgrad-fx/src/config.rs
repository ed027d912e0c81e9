//! Effect configuration.
//!
//! Defaults come from `LEDGRAD_*` environment variables, falling back to the
//! constants below. JSON presets may set any subset of fields.

use std::time::Duration;

use ledgrad_core::{BlendMode, DEFAULT_BLEND};
use serde::{Deserialize, Serialize};

use crate::error::FxError;

/// Default scroll period in milliseconds.
const DEFAULT_DURATION_MS: u64 = 1000;
/// Default number of gradient repetitions across the strip.
const DEFAULT_REPEATS: f32 = 1.0;
/// Default output channel.
const DEFAULT_CHANNEL: u8 = 0;

/// Runtime configuration for a [`GradientFx`](crate::GradientFx).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    /// Time for the gradient to scroll one full length.
    pub duration_ms: u64,
    /// Gradient repetitions across the strip; may be negative or fractional.
    pub repeats: f32,
    pub blend: BlendMode,
    /// Output channel the strip is driven on.
    pub channel: u8,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            duration_ms: env_or("LEDGRAD_DURATION_MS", DEFAULT_DURATION_MS),
            repeats: env_or("LEDGRAD_REPEATS", DEFAULT_REPEATS),
            blend: env_or("LEDGRAD_BLEND", DEFAULT_BLEND),
            channel: env_or("LEDGRAD_CHANNEL", DEFAULT_CHANNEL),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("ignoring unparsable {key}={raw:?}");
            default
        }),
        Err(_) => default,
    }
}

impl FxConfig {
    /// Parse a JSON preset. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, FxError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_full() {
        let config = FxConfig::from_json(
            r#"{"duration_ms": 2500, "repeats": -2.0, "blend": "nearest_neighbor", "channel": 3}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            FxConfig {
                duration_ms: 2500,
                repeats: -2.0,
                blend: BlendMode::NearestNeighbor,
                channel: 3,
            }
        );
        assert_eq!(config.duration(), Duration::from_millis(2500));
    }

    #[test]
    fn test_from_json_partial_keeps_other_fields() {
        let config = FxConfig::from_json(r#"{"blend": "round_up"}"#).unwrap();
        let defaults = FxConfig::default();
        assert_eq!(config.blend, BlendMode::RoundUp);
        assert_eq!(config.duration_ms, defaults.duration_ms);
        assert_eq!(config.channel, defaults.channel);
    }

    #[test]
    fn test_from_json_rejects_unknown_blend() {
        assert!(matches!(
            FxConfig::from_json(r#"{"blend": "cubic"}"#),
            Err(FxError::Config(_))
        ));
    }

    #[test]
    fn test_env_or_falls_back() {
        assert_eq!(env_or("LEDGRAD_TEST_UNSET_KEY", 42u64), 42);
    }
}
