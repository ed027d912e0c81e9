//! Time-driven gradient effect.
//!
//! Elapsed time is folded into one period of `duration` and used as the
//! sampling offset, so the gradient scrolls along the strip once per period:
//!
//! ```text
//! offset = (elapsed mod duration) / duration
//! led[i] = gradient.sample_phased(i / n_leds, Phase { offset, repeat: repeats })
//! ```
//!
//! The gradient itself lives behind `Arc<RwLock<_>>` so an editor can change
//! stops while a timer keeps rendering frames.

use std::sync::Arc;
use std::time::Duration;

use ledgrad_core::{BlendMode, DEFAULT_BLEND, Gradient, Lerp, Phase, ToRgb8};
use palette::Srgb;
use parking_lot::RwLock;

use crate::config::FxConfig;
use crate::error::FxError;
use crate::strip::{Channel, LedStrip};

/// A gradient shared between editors and the frame driver.
pub type SharedGradient<C> = Arc<RwLock<Gradient<C>>>;

/// Scrolls a gradient along a strip over time.
#[derive(Debug, Clone)]
pub struct GradientFx<C = Srgb<f32>> {
    gradient: SharedGradient<C>,
    duration: Duration,
    repeats: f32,
    blend: BlendMode,
}

impl<C: Lerp> GradientFx<C> {
    pub fn new(gradient: SharedGradient<C>, duration: Duration, repeats: f32) -> Self {
        Self {
            gradient,
            duration,
            repeats,
            blend: DEFAULT_BLEND,
        }
    }

    pub fn from_config(gradient: SharedGradient<C>, config: &FxConfig) -> Self {
        Self {
            gradient,
            duration: config.duration(),
            repeats: config.repeats,
            blend: config.blend,
        }
    }

    pub fn gradient(&self) -> &SharedGradient<C> {
        &self.gradient
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn repeats(&self) -> f32 {
        self.repeats
    }

    pub fn blend(&self) -> BlendMode {
        self.blend
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn set_repeats(&mut self, repeats: f32) {
        self.repeats = repeats;
    }

    pub fn set_blend(&mut self, blend: BlendMode) {
        self.blend = blend;
    }

    /// Fraction of the current period elapsed, in `[0, 1)`.
    ///
    /// A zero duration never scrolls and always yields `0`.
    pub fn offset_at(&self, elapsed: Duration) -> f32 {
        let period = self.duration.as_nanos();
        if period == 0 {
            return 0.0;
        }
        ((elapsed.as_nanos() % period) as f64 / period as f64) as f32
    }

    pub fn phase_at(&self, elapsed: Duration) -> Phase {
        Phase::new(self.offset_at(elapsed), self.repeats)
    }

    /// Sample `n_leds` colors for time `elapsed`.
    ///
    /// `recycle_buffer` is cleared and refilled, so passing the previous
    /// frame back in avoids a fresh allocation every tick.
    pub fn sample(
        &self,
        n_leds: usize,
        elapsed: Duration,
        mut recycle_buffer: Vec<C>,
    ) -> Result<Vec<C>, FxError> {
        recycle_buffer.clear();
        let gradient = self.gradient.read();
        recycle_buffer.extend(gradient.samples(n_leds, self.phase_at(elapsed), self.blend)?);
        Ok(recycle_buffer)
    }
}

impl<C: Lerp + ToRgb8> GradientFx<C> {
    /// Like [`sample`](Self::sample), but quantized for transmission.
    pub fn render_frame(
        &self,
        n_leds: usize,
        elapsed: Duration,
        frame: &mut Vec<[u8; 3]>,
    ) -> Result<(), FxError> {
        frame.clear();
        let gradient = self.gradient.read();
        let samples = gradient.samples(n_leds, self.phase_at(elapsed), self.blend)?;
        frame.extend(samples.map(ToRgb8::to_rgb8));
        Ok(())
    }

    /// Closure for a steady timer: every call renders and transmits a frame.
    ///
    /// Failures are logged and the frame is dropped; the closure keeps
    /// working on the next tick.
    pub fn steady_timer_callback<S: LedStrip>(
        &self,
        strip: S,
        channel: Channel,
    ) -> impl FnMut(Duration) + use<C, S> {
        let mut driver = FrameDriver::new(self.clone(), strip, channel);
        move |elapsed| driver.on_tick(elapsed)
    }
}

/// Owns a strip and a recycled frame buffer, and pushes one frame per tick.
#[derive(Debug)]
pub struct FrameDriver<C, S> {
    fx: GradientFx<C>,
    strip: S,
    channel: Channel,
    frame: Vec<[u8; 3]>,
    dropped_frames: u64,
}

impl<C: Lerp + ToRgb8, S: LedStrip> FrameDriver<C, S> {
    pub fn new(fx: GradientFx<C>, strip: S, channel: Channel) -> Self {
        let frame = Vec::with_capacity(strip.len());
        Self {
            fx,
            strip,
            channel,
            frame,
            dropped_frames: 0,
        }
    }

    pub fn fx(&self) -> &GradientFx<C> {
        &self.fx
    }

    pub fn fx_mut(&mut self) -> &mut GradientFx<C> {
        &mut self.fx
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    pub fn into_strip(self) -> S {
        self.strip
    }

    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames
    }

    /// Render and transmit the frame for `elapsed`.
    pub fn tick(&mut self, elapsed: Duration) -> Result<(), FxError> {
        self.fx
            .render_frame(self.strip.len(), elapsed, &mut self.frame)?;
        self.strip.update(&self.frame, self.channel)?;
        Ok(())
    }

    /// [`tick`](Self::tick), logging instead of returning failures.
    pub fn on_tick(&mut self, elapsed: Duration) {
        if let Err(e) = self.tick(elapsed) {
            self.dropped_frames += 1;
            tracing::warn!(
                dropped = self.dropped_frames,
                "dropped frame at {elapsed:?}: {e}"
            );
        }
    }
}
