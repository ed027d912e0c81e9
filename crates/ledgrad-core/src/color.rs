//! Color capabilities the gradient engine relies on.
//!
//! The engine never looks inside a color. It only needs to interpolate two of
//! them ([`Lerp`]) and, at the hardware boundary, to turn one into three 8-bit
//! channels ([`ToRgb8`]). Both traits are implemented for the `palette` types
//! used across the workspace.

use palette::{FromColor, Hsv, LinSrgb, Srgb};

/// Per-component linear interpolation in the value's own component space.
///
/// `t = 0` yields `self`, `t = 1` yields `other`.
pub trait Lerp: Copy {
    fn lerp(self, other: Self, t: f32) -> Self;
}

/// Quantization to an 8-bit RGB triple for transmission to a strip.
pub trait ToRgb8: Copy {
    fn to_rgb8(self) -> [u8; 3];
}

#[inline]
fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

impl Lerp for f32 {
    fn lerp(self, other: Self, t: f32) -> Self {
        lerp_f32(self, other, t)
    }
}

impl<const N: usize> Lerp for [f32; N] {
    fn lerp(self, other: Self, t: f32) -> Self {
        let mut out = self;
        for (o, b) in out.iter_mut().zip(other) {
            *o = lerp_f32(*o, b, t);
        }
        out
    }
}

impl Lerp for Srgb<f32> {
    fn lerp(self, other: Self, t: f32) -> Self {
        Srgb::new(
            lerp_f32(self.red, other.red, t),
            lerp_f32(self.green, other.green, t),
            lerp_f32(self.blue, other.blue, t),
        )
    }
}

impl Lerp for LinSrgb<f32> {
    fn lerp(self, other: Self, t: f32) -> Self {
        LinSrgb::new(
            lerp_f32(self.red, other.red, t),
            lerp_f32(self.green, other.green, t),
            lerp_f32(self.blue, other.blue, t),
        )
    }
}

impl Lerp for Srgb<u8> {
    fn lerp(self, other: Self, t: f32) -> Self {
        let l: Srgb<f32> = self.into_format();
        let r: Srgb<f32> = other.into_format();
        l.lerp(r, t).into_format()
    }
}

/// Hue travels along the shorter arc; saturation and value are linear.
impl Lerp for Hsv {
    fn lerp(self, other: Self, t: f32) -> Self {
        let from = self.hue.into_positive_degrees();
        let to = other.hue.into_positive_degrees();
        let mut delta = to - from;
        if delta > 180.0 {
            delta -= 360.0;
        } else if delta < -180.0 {
            delta += 360.0;
        }
        Hsv::new(
            from + delta * t,
            lerp_f32(self.saturation, other.saturation, t),
            lerp_f32(self.value, other.value, t),
        )
    }
}

impl ToRgb8 for Srgb<u8> {
    fn to_rgb8(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl ToRgb8 for Srgb<f32> {
    fn to_rgb8(self) -> [u8; 3] {
        // `into_format` rounds and clamps to the u8 range.
        self.into_format::<u8>().to_rgb8()
    }
}

impl ToRgb8 for LinSrgb<f32> {
    fn to_rgb8(self) -> [u8; 3] {
        Srgb::<f32>::from_linear(self).to_rgb8()
    }
}

impl ToRgb8 for Hsv {
    fn to_rgb8(self) -> [u8; 3] {
        Srgb::<f32>::from_color(self).to_rgb8()
    }
}

impl ToRgb8 for [f32; 3] {
    fn to_rgb8(self) -> [u8; 3] {
        Srgb::new(self[0], self[1], self[2]).to_rgb8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let black = Srgb::<f32>::new(0.0, 0.0, 0.0);
        let white = Srgb::<f32>::new(1.0, 1.0, 1.0);
        assert_eq!(black.lerp(white, 0.0), black);
        assert_eq!(black.lerp(white, 1.0), white);
        let mid = black.lerp(white, 0.5);
        assert!((mid.red - 0.5).abs() < EPSILON);
        assert!((mid.green - 0.5).abs() < EPSILON);
        assert!((mid.blue - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_lerp_array_is_per_channel() {
        let out = [0.0_f32, 1.0, 0.5, 1.0].lerp([1.0, 0.0, 0.5, 0.0], 0.25);
        let expected = [0.25, 0.75, 0.5, 0.75];
        for i in 0..4 {
            assert!(
                (out[i] - expected[i]).abs() < EPSILON,
                "channel {i}: {:.6} vs {:.6}",
                out[i],
                expected[i]
            );
        }
    }

    #[test]
    fn test_lerp_u8_rounds_back() {
        let out = Srgb::<u8>::new(0, 100, 255).lerp(Srgb::new(255, 100, 0), 0.5);
        assert_eq!(out.to_rgb8(), [128, 100, 128]);
    }

    #[test]
    fn test_hsv_lerp_takes_short_arc() {
        let a = Hsv::new(350.0, 1.0, 1.0);
        let b = Hsv::new(10.0, 1.0, 1.0);
        let mid = a.lerp(b, 0.5).hue.into_positive_degrees();
        assert!(mid < 1.0 || mid > 359.0, "hue went the long way: {mid}");
    }

    #[test]
    fn test_to_rgb8_clamps_out_of_gamut() {
        assert_eq!(Srgb::<f32>::new(-0.5, 0.5, 2.0).to_rgb8(), [0, 128, 255]);
        assert_eq!([1.0_f32, 0.0, 0.0].to_rgb8(), [255, 0, 0]);
    }
}
