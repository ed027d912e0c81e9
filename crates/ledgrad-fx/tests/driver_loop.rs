//! End-to-end tests for the frame driver against in-memory strips.
//!
//! Run with: `cargo test -p ledgrad-fx`

use std::sync::Arc;
use std::time::Duration;

use ledgrad_core::{BlendMode, Gradient};
use ledgrad_fx::{
    Channel, FrameDriver, FxConfig, FxError, GradientFx, LedStrip, MemoryStrip, SharedGradient,
    StripError,
};
use palette::Srgb;
use parking_lot::RwLock;

fn rgb_gradient() -> SharedGradient<Srgb<f32>> {
    let gradient = Gradient::from_positioned_pairs([
        (0.0, Srgb::new(1.0, 0.0, 0.0)),
        (0.5, Srgb::new(0.0, 1.0, 0.0)),
        (1.0, Srgb::new(0.0, 0.0, 1.0)),
    ])
    .expect("finite positions");
    Arc::new(RwLock::new(gradient))
}

/// Strip that fails every `n`th frame.
struct FlakyStrip {
    inner: MemoryStrip,
    calls: usize,
    fail_every: usize,
}

impl LedStrip for FlakyStrip {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn update(&mut self, frame: &[[u8; 3]], channel: Channel) -> Result<(), StripError> {
        self.calls += 1;
        if self.calls % self.fail_every == 0 {
            return Err(StripError::Transmit("bus busy".into()));
        }
        self.inner.update(frame, channel)
    }
}

#[test]
fn tick_writes_quantized_frame() {
    let fx = GradientFx::new(rgb_gradient(), Duration::from_secs(1), 1.0);
    let mut driver = FrameDriver::new(fx, MemoryStrip::new(4, Channel(0)), Channel(0));
    driver.tick(Duration::ZERO).unwrap();

    let strip = driver.strip();
    assert_eq!(strip.frames_sent(), 1);
    assert_eq!(strip.bytes().len(), 12);
    assert_eq!(strip.pixel(0), Some([255, 0, 0]));
    assert_eq!(strip.pixel(2), Some([0, 255, 0]));
}

#[test]
fn scrolls_with_elapsed_time() {
    let fx = GradientFx::new(rgb_gradient(), Duration::from_secs(2), 1.0);
    let mut driver = FrameDriver::new(fx, MemoryStrip::new(4, Channel(0)), Channel(0));

    // Half a period shifts the pattern by half the strip.
    driver.tick(Duration::from_secs(1)).unwrap();
    assert_eq!(driver.strip().pixel(0), Some([0, 255, 0]));
    assert_eq!(driver.strip().pixel(2), Some([255, 0, 0]));

    // A whole number of periods looks like the start.
    driver.tick(Duration::from_secs(6)).unwrap();
    assert_eq!(driver.strip().pixel(0), Some([255, 0, 0]));
}

#[test]
fn wrong_channel_is_reported_by_tick() {
    let fx = GradientFx::new(rgb_gradient(), Duration::from_secs(1), 1.0);
    let mut driver = FrameDriver::new(fx, MemoryStrip::new(3, Channel(1)), Channel(2));
    assert!(matches!(
        driver.tick(Duration::ZERO),
        Err(FxError::Strip(StripError::ChannelUnavailable(2)))
    ));
}

#[test]
fn timer_callback_survives_failures() {
    let fx = GradientFx::new(rgb_gradient(), Duration::from_millis(100), 1.0);
    let mut strip = FlakyStrip {
        inner: MemoryStrip::new(8, Channel(0)),
        calls: 0,
        fail_every: 3,
    };
    {
        let mut callback = fx.steady_timer_callback(&mut strip, Channel(0));
        for ms in 0..9 {
            callback(Duration::from_millis(ms * 10));
        }
    }
    assert_eq!(strip.calls, 9);
    assert_eq!(strip.inner.frames_sent(), 6);
}

#[test]
fn driver_counts_dropped_frames() {
    let empty: SharedGradient<Srgb<f32>> = Arc::new(RwLock::new(Gradient::new()));
    let fx = GradientFx::new(empty.clone(), Duration::from_secs(1), 1.0);
    let mut driver = FrameDriver::new(fx, MemoryStrip::new(2, Channel(0)), Channel(0));

    driver.on_tick(Duration::ZERO);
    driver.on_tick(Duration::from_millis(10));
    assert_eq!(driver.dropped_frames(), 2);
    assert_eq!(driver.strip().frames_sent(), 0);

    // Recovers as soon as the gradient has a stop.
    empty.write().emplace(0.3, Srgb::new(1.0, 1.0, 1.0)).unwrap();
    driver.on_tick(Duration::from_millis(20));
    assert_eq!(driver.dropped_frames(), 2);
    assert_eq!(driver.strip().pixel(1), Some([255, 255, 255]));
}

#[test]
fn edits_through_shared_gradient_show_next_frame() {
    let gradient = rgb_gradient();
    let fx = GradientFx::new(gradient.clone(), Duration::from_secs(1), 1.0);
    let mut driver = FrameDriver::new(fx, MemoryStrip::new(4, Channel(0)), Channel(0));

    driver.tick(Duration::ZERO).unwrap();
    assert_eq!(driver.strip().pixel(0), Some([255, 0, 0]));

    gradient
        .write()
        .get_mut(0)
        .unwrap()
        .set_color(Srgb::new(1.0, 1.0, 1.0));
    driver.tick(Duration::ZERO).unwrap();
    assert_eq!(driver.strip().pixel(0), Some([255, 255, 255]));
}

#[test]
fn from_config_applies_settings() {
    let config = FxConfig::from_json(
        r#"{"duration_ms": 500, "repeats": 2.0, "blend": "round_down", "channel": 1}"#,
    )
    .unwrap();
    let fx = GradientFx::from_config(rgb_gradient(), &config);
    assert_eq!(fx.duration(), Duration::from_millis(500));
    assert_eq!(fx.repeats(), 2.0);
    assert_eq!(fx.blend(), BlendMode::RoundDown);

    let mut driver = FrameDriver::new(
        fx,
        MemoryStrip::new(4, Channel(config.channel)),
        Channel(config.channel),
    );
    driver.tick(Duration::ZERO).unwrap();
    // Two repetitions of a stepped red/green/blue gradient.
    let pixels: Vec<_> = (0..4).filter_map(|i| driver.strip().pixel(i)).collect();
    assert_eq!(
        pixels,
        vec![[255, 0, 0], [0, 255, 0], [255, 0, 0], [0, 255, 0]]
    );
    assert_eq!(driver.into_strip().frames_sent(), 1);
}
