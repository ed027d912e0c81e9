//! Compact binary encoding of gradient stops.
//!
//! # Layout
//! ```text
//! frame  = count:u32le  record × count
//! record = position:f32le  color:[u8; C::ENCODED_LEN]
//! ```
//!
//! Decoding validates but never re-sorts: a frame whose stops are out of
//! order, or that holds two stops in one equivalence class, is rejected.

use palette::Srgb;

use crate::gradient::Gradient;
use crate::ordering::PositionedCompare;
use crate::stop::Stop;

const COUNT_LEN: usize = 4;
const POSITION_LEN: usize = 4;

/// Errors produced while decoding stops.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    #[error("truncated input: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },

    #[error("{0} trailing bytes after the last stop")]
    TrailingBytes(usize),

    #[error("stop {index} has non-finite position {position}")]
    NonFinitePosition { index: usize, position: f32 },

    #[error("stop {index} is out of order")]
    Unsorted { index: usize },

    #[error("stop {index} shares its position with the previous stop")]
    DuplicatePosition { index: usize },

    #[error("invalid color: {0}")]
    InvalidColor(&'static str),
}

/// Fixed-size binary form of a color.
pub trait ColorCodec: Sized {
    const ENCODED_LEN: usize;

    fn encode(&self, out: &mut Vec<u8>);

    /// `bytes` is exactly [`ENCODED_LEN`](Self::ENCODED_LEN) long.
    fn decode(bytes: &[u8]) -> Result<Self, CodecError>;
}

fn read_f32(bytes: &[u8]) -> Option<f32> {
    let raw: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
    Some(f32::from_le_bytes(raw))
}

fn truncated(needed: usize, available: usize) -> CodecError {
    CodecError::Truncated { needed, available }
}

/// Three little-endian `f32` channels.
impl ColorCodec for Srgb<f32> {
    const ENCODED_LEN: usize = 12;

    fn encode(&self, out: &mut Vec<u8>) {
        for channel in [self.red, self.green, self.blue] {
            out.extend_from_slice(&channel.to_le_bytes());
        }
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut channels = [0.0_f32; 3];
        for (i, channel) in channels.iter_mut().enumerate() {
            *channel = bytes
                .get(i * 4..)
                .and_then(read_f32)
                .ok_or_else(|| truncated(Self::ENCODED_LEN, bytes.len()))?;
        }
        if channels.iter().any(|c| !c.is_finite()) {
            return Err(CodecError::InvalidColor("non-finite channel"));
        }
        Ok(Srgb::new(channels[0], channels[1], channels[2]))
    }
}

/// Three 8-bit channels.
impl ColorCodec for Srgb<u8> {
    const ENCODED_LEN: usize = 3;

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.red, self.green, self.blue]);
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        match bytes {
            [r, g, b, ..] => Ok(Srgb::new(*r, *g, *b)),
            _ => Err(truncated(Self::ENCODED_LEN, bytes.len())),
        }
    }
}

pub fn encode_stops<C: ColorCodec>(stops: &[Stop<C>]) -> Vec<u8> {
    let record = POSITION_LEN + C::ENCODED_LEN;
    let mut out = Vec::with_capacity(COUNT_LEN + stops.len() * record);
    out.extend_from_slice(&(stops.len() as u32).to_le_bytes());
    for stop in stops {
        out.extend_from_slice(&stop.position().to_le_bytes());
        stop.color_ref().encode(&mut out);
    }
    out
}

pub fn decode_stops<C: ColorCodec>(bytes: &[u8]) -> Result<Vec<Stop<C>>, CodecError> {
    let count_raw: [u8; 4] = bytes
        .get(..COUNT_LEN)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| truncated(COUNT_LEN, bytes.len()))?;
    let count = u32::from_le_bytes(count_raw) as usize;
    let body = &bytes[COUNT_LEN..];

    let record = POSITION_LEN + C::ENCODED_LEN;
    let needed = count
        .checked_mul(record)
        .ok_or_else(|| truncated(usize::MAX, body.len()))?;
    if body.len() < needed {
        return Err(truncated(COUNT_LEN + needed, bytes.len()));
    }
    if body.len() > needed {
        return Err(CodecError::TrailingBytes(body.len() - needed));
    }

    let cmp = PositionedCompare::new();
    let mut stops: Vec<Stop<C>> = Vec::with_capacity(count);
    for (index, chunk) in body.chunks_exact(record).enumerate() {
        let position = read_f32(chunk).ok_or_else(|| truncated(record, chunk.len()))?;
        if !position.is_finite() {
            return Err(CodecError::NonFinitePosition { index, position });
        }
        if let Some(prev) = stops.last() {
            if cmp.less(position, prev.position()) {
                return Err(CodecError::Unsorted { index });
            }
            if cmp.equivalent(position, prev.position()) {
                return Err(CodecError::DuplicatePosition { index });
            }
        }
        let color = C::decode(&chunk[POSITION_LEN..])?;
        stops.push(Stop::new(position, color));
    }
    Ok(stops)
}

impl<C: ColorCodec> Gradient<C> {
    pub fn to_bytes(&self) -> Vec<u8> {
        encode_stops(self.as_slice())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        decode_stops(bytes).map(Gradient::from_sorted_unique)
    }
}
