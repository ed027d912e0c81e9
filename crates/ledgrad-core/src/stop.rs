//! Color stops and the two ways of accessing them.
//!
//! A [`Stop`] is a plain `(position, color)` value. Containers hand it out as
//! `&Stop` (read-only), and only [`Gradient`](crate::Gradient) hands out a
//! [`StopMut`], which can recolor or move a stop without breaking ordering.

use serde::{Deserialize, Serialize};

use crate::error::GradientError;
use crate::gradient::Gradient;

/// A gradient control point.
///
/// Positions are conceptually in `[0, 1]` but are not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Stop<C> {
    position: f32,
    color: C,
}

impl<C> Stop<C> {
    pub const fn new(position: f32, color: C) -> Self {
        Self { position, color }
    }

    pub const fn position(&self) -> f32 {
        self.position
    }

    pub const fn color_ref(&self) -> &C {
        &self.color
    }

    pub fn into_parts(self) -> (f32, C) {
        (self.position, self.color)
    }

    pub(crate) fn set_position(&mut self, position: f32) {
        self.position = position;
    }

    pub(crate) fn set_color(&mut self, color: C) {
        self.color = color;
    }

    /// Keep this position but adopt `other`'s color.
    pub(crate) fn take_color_from(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.color, &mut other.color);
    }
}

impl<C: Copy> Stop<C> {
    pub fn color(&self) -> C {
        self.color
    }
}

impl<C> From<(f32, C)> for Stop<C> {
    fn from((position, color): (f32, C)) -> Self {
        Self::new(position, color)
    }
}

/// Mutable handle to one stop of a [`Gradient`].
///
/// Obtained from [`Gradient::get_mut`]. Changing the color is always safe;
/// changing the position re-slots the stop so the gradient stays sorted.
pub struct StopMut<'a, C> {
    gradient: &'a mut Gradient<C>,
    index: usize,
}

impl<'a, C: Copy> StopMut<'a, C> {
    pub(crate) fn new(gradient: &'a mut Gradient<C>, index: usize) -> Self {
        Self { gradient, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn position(&self) -> f32 {
        self.gradient[self.index].position()
    }

    pub fn color(&self) -> C {
        self.gradient[self.index].color()
    }

    pub fn set_color(&mut self, color: C) {
        self.gradient.stop_at_mut(self.index).set_color(color);
    }

    /// Move this stop to `position`.
    ///
    /// If another stop already sits within epsilon of `position`, that stop
    /// takes this stop's color and this stop is removed. Returns the index
    /// the color ended up at, which the handle now points to.
    pub fn set_position(&mut self, position: f32) -> Result<usize, GradientError> {
        self.index = self.gradient.relocate(self.index, position)?;
        Ok(self.index)
    }
}
