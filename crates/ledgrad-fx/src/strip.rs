//! LED strip abstraction.
//!
//! A strip receives whole frames of 8-bit RGB pixels. Wire order, timing and
//! the transmitter peripheral are the implementation's business.

use serde::{Deserialize, Serialize};

/// Output channel a strip is driven on (e.g. an RMT or SPI channel index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Channel(pub u8);

/// Errors that can occur while pushing a frame to a strip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StripError {
    #[error("frame has {got} pixels, strip has {expected}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("channel {0} is not available")]
    ChannelUnavailable(u8),

    #[error("transmission failed: {0}")]
    Transmit(String),
}

/// A strip of addressable LEDs.
pub trait LedStrip {
    /// Number of pixels on the strip.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Transmit one frame. `frame.len()` must equal [`len`](Self::len).
    fn update(&mut self, frame: &[[u8; 3]], channel: Channel) -> Result<(), StripError>;
}

impl<S: LedStrip + ?Sized> LedStrip for &mut S {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn update(&mut self, frame: &[[u8; 3]], channel: Channel) -> Result<(), StripError> {
        (**self).update(frame, channel)
    }
}

/// Strip that keeps the last frame in memory as packed RGB bytes.
///
/// Useful headless and in tests; only accepts frames on its own channel.
#[derive(Debug, Clone, Default)]
pub struct MemoryStrip {
    len: usize,
    channel: Channel,
    bytes: Vec<u8>,
    frames_sent: usize,
}

impl MemoryStrip {
    pub fn new(len: usize, channel: Channel) -> Self {
        Self {
            len,
            channel,
            bytes: Vec::with_capacity(len * 3),
            frames_sent: 0,
        }
    }

    /// Last transmitted frame, `R G B R G B ...`.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn pixel(&self, index: usize) -> Option<[u8; 3]> {
        self.bytes.get(index * 3..index * 3 + 3)?.try_into().ok()
    }

    pub fn frames_sent(&self) -> usize {
        self.frames_sent
    }
}

impl LedStrip for MemoryStrip {
    fn len(&self) -> usize {
        self.len
    }

    fn update(&mut self, frame: &[[u8; 3]], channel: Channel) -> Result<(), StripError> {
        if channel != self.channel {
            return Err(StripError::ChannelUnavailable(channel.0));
        }
        if frame.len() != self.len {
            return Err(StripError::LengthMismatch {
                expected: self.len,
                got: frame.len(),
            });
        }
        self.bytes.clear();
        self.bytes.extend_from_slice(bytemuck::cast_slice(frame));
        self.frames_sent += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_strip_packs_frame() {
        let mut strip = MemoryStrip::new(2, Channel(0));
        strip.update(&[[1, 2, 3], [4, 5, 6]], Channel(0)).unwrap();
        assert_eq!(strip.bytes(), &[1u8, 2, 3, 4, 5, 6]);
        assert_eq!(strip.pixel(1), Some([4, 5, 6]));
        assert_eq!(strip.pixel(2), None);
        assert_eq!(strip.frames_sent(), 1);
    }

    #[test]
    fn test_memory_strip_rejects_bad_frames() {
        let mut strip = MemoryStrip::new(2, Channel(1));
        assert_eq!(
            strip.update(&[[0, 0, 0]], Channel(1)),
            Err(StripError::LengthMismatch {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            strip.update(&[[0, 0, 0]; 2], Channel(0)),
            Err(StripError::ChannelUnavailable(0))
        );
        assert_eq!(strip.frames_sent(), 0);
    }

    #[test]
    fn test_mut_ref_is_a_strip() {
        let mut strip = MemoryStrip::new(1, Channel(0));
        {
            let mut borrowed = &mut strip;
            assert_eq!(LedStrip::len(&borrowed), 1);
            LedStrip::update(&mut borrowed, &[[9, 9, 9]], Channel(0)).unwrap();
        }
        assert_eq!(strip.pixel(0), Some([9, 9, 9]));
    }
}
