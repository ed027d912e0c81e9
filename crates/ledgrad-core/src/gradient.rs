//! Mutable gradient: insertion with merge, normalization and sampling.
//!
//! A [`Gradient`] keeps its stops sorted under the epsilon order after every
//! mutation and holds at most one stop per equivalence class of positions.
//!
//! # Sampling
//! ```text
//! t      = wrap(offset + progress × repeat)        floored, ∈ [0, 1)
//! lo, hi = bracket(t)                              clamped at the ends
//! f      = clamp((t − lo.pos) / (hi.pos − lo.pos), 0, 1)
//! color  = blend(lo.color, hi.color, f)            or lo.color if lo == hi
//! ```
//!
//! # Complexity
//! - Sample: O(log N)
//! - Emplace: O(log N) search + O(N) shift
//! - Fill: O(count × log N)

use std::ops::Index;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::blend::BlendPolicy;
use crate::error::GradientError;
use crate::ordering::{POSITION_EPSILON, PositionedCompare};
use crate::phase::{Phase, wrap_unit};
use crate::stop::{Stop, StopMut};
use crate::stop_list::{StopList, evenly_spaced};

/// Outcome of [`Gradient::emplace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emplace {
    /// A new stop was inserted at this index.
    Inserted(usize),
    /// A stop already occupied the position; its color was overwritten.
    Updated(usize),
}

impl Emplace {
    pub fn index(self) -> usize {
        match self {
            Self::Inserted(i) | Self::Updated(i) => i,
        }
    }

    pub fn inserted(self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

/// Sorted, deduplicated color stops that can be edited and sampled.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<Stop<C>>",
    into = "Vec<Stop<C>>",
    bound(serialize = "C: Clone + Serialize", deserialize = "C: Deserialize<'de>")
)]
pub struct Gradient<C = Srgb<f32>> {
    stops: Vec<Stop<C>>,
}

impl<C> Gradient<C> {
    pub const fn new() -> Self {
        Self { stops: Vec::new() }
    }

    /// Build from positioned stops.
    ///
    /// Stops are emplaced in input order, so when two stops share an
    /// equivalence class the later one's color wins.
    pub fn from_stops<I>(stops: I) -> Result<Self, GradientError>
    where
        I: IntoIterator<Item = Stop<C>>,
    {
        let mut gradient = Self::new();
        for stop in stops {
            let (position, color) = stop.into_parts();
            gradient.emplace(position, color)?;
        }
        Ok(gradient)
    }

    /// Build from `(position, color)` pairs, see [`from_stops`](Self::from_stops).
    pub fn from_positioned_pairs<I>(pairs: I) -> Result<Self, GradientError>
    where
        I: IntoIterator<Item = (f32, C)>,
    {
        Self::from_stops(pairs.into_iter().map(Stop::from))
    }

    /// Build from bare colors spread evenly over `[0, 1]`.
    pub fn from_colors_evenly_spaced<I>(colors: I) -> Self
    where
        I: IntoIterator<Item = C>,
    {
        let mut gradient = Self::new();
        for stop in evenly_spaced(colors) {
            let (position, color) = stop.into_parts();
            gradient.insert_or_update(position, color);
        }
        gradient
    }

    /// Adopt stops that are already sorted with one stop per class.
    pub(crate) fn from_sorted_unique(stops: Vec<Stop<C>>) -> Self {
        debug_assert!(PositionedCompare::new().is_sorted(&stops));
        Self { stops }
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stop<C>> {
        self.stops.iter()
    }

    pub fn as_slice(&self) -> &[Stop<C>] {
        &self.stops
    }

    pub fn front(&self) -> Result<&Stop<C>, GradientError> {
        self.stops.first().ok_or(GradientError::Empty)
    }

    pub fn back(&self) -> Result<&Stop<C>, GradientError> {
        self.stops.last().ok_or(GradientError::Empty)
    }

    pub fn get(&self, index: usize) -> Result<&Stop<C>, GradientError> {
        self.stops.get(index).ok_or(GradientError::IndexOutOfRange {
            index,
            len: self.stops.len(),
        })
    }

    /// Index of the first stop not less than `t`.
    pub fn lower_bound(&self, t: f32) -> usize {
        PositionedCompare::new().lower_bound(&self.stops, t)
    }

    /// Index of the first stop greater than `t`.
    pub fn upper_bound(&self, t: f32) -> usize {
        PositionedCompare::new().upper_bound(&self.stops, t)
    }

    /// Indices of the stops enclosing `t`, see [`PositionedCompare::bracket`].
    pub fn low_upp_bounds(&self, t: f32) -> Result<(usize, usize), GradientError> {
        PositionedCompare::new()
            .bracket(&self.stops, t)
            .ok_or(GradientError::Empty)
    }

    /// Insert a stop, or recolor the stop already at `position`.
    ///
    /// "At `position`" means within [`POSITION_EPSILON`]; the existing stop
    /// keeps its own position. Never creates a second stop in a class.
    pub fn emplace(&mut self, position: f32, color: C) -> Result<Emplace, GradientError> {
        if !position.is_finite() {
            return Err(GradientError::NonFinitePosition(position));
        }
        Ok(self.insert_or_update(position, color))
    }

    fn insert_or_update(&mut self, position: f32, color: C) -> Emplace {
        let cmp = PositionedCompare::new();
        let index = cmp.lower_bound(&self.stops, position);
        match self.stops.get_mut(index) {
            Some(existing) if cmp.equivalent(existing.position(), position) => {
                existing.set_color(color);
                Emplace::Updated(index)
            }
            _ => {
                self.stops.insert(index, Stop::new(position, color));
                Emplace::Inserted(index)
            }
        }
    }

    pub fn remove(&mut self, index: usize) -> Result<Stop<C>, GradientError> {
        if index >= self.stops.len() {
            return Err(GradientError::IndexOutOfRange {
                index,
                len: self.stops.len(),
            });
        }
        Ok(self.stops.remove(index))
    }

    pub fn clear(&mut self) {
        self.stops.clear();
    }

    /// Move the stop at `index` to `position`, merging on collision.
    pub(crate) fn relocate(&mut self, index: usize, position: f32) -> Result<usize, GradientError> {
        if !position.is_finite() {
            return Err(GradientError::NonFinitePosition(position));
        }
        let (_, color) = self.remove(index)?.into_parts();
        let placed = self.insert_or_update(position, color);
        if !placed.inserted() {
            tracing::debug!(position, "moved stop merged into an existing stop");
        }
        Ok(placed.index())
    }

    pub(crate) fn stop_at_mut(&mut self, index: usize) -> &mut Stop<C> {
        &mut self.stops[index]
    }

    /// Rescale positions so the first stop sits at `0` and the last at `1`.
    ///
    /// Relative spacing is preserved. Fewer than two stops, or stops spanning
    /// no more than epsilon, are left untouched. Stops that the rescale
    /// squeezes into one equivalence class are merged: the earlier position
    /// survives with the later color.
    pub fn normalize(&mut self) {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return;
        };
        if self.stops.len() < 2 {
            return;
        }
        // f64 keeps the span finite for any pair of finite f32 positions.
        let min = f64::from(first.position());
        let span = f64::from(last.position()) - min;
        if span <= f64::from(POSITION_EPSILON) {
            tracing::debug!(span, "degenerate gradient span, skipping normalization");
            return;
        }

        for stop in &mut self.stops {
            stop.set_position(((f64::from(stop.position()) - min) / span) as f32);
        }

        let before = self.stops.len();
        let cmp = PositionedCompare::new();
        self.stops.dedup_by(|later, kept| {
            let same = cmp.equivalent(later.position(), kept.position());
            if same {
                kept.take_color_from(later);
            }
            same
        });
        if self.stops.len() < before {
            tracing::debug!(
                merged = before - self.stops.len(),
                "normalization merged collapsed stops"
            );
        }

        if let [first, .., last] = self.stops.as_mut_slice() {
            first.set_position(0.0);
            last.set_position(1.0);
        }
    }
}

impl<C: Copy> Gradient<C> {
    /// Mutable handle to the stop at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<StopMut<'_, C>, GradientError> {
        self.get(index)?;
        Ok(StopMut::new(self, index))
    }

    /// Evaluate the gradient directly at `t`, without wrapping.
    ///
    /// Positions before the first stop return its color, positions after the
    /// last stop return the last color. `sample(1.0)` on a `[0, 1]` gradient
    /// is therefore the last stop, while [`sample_phased`](Self::sample_phased)
    /// would wrap `1.0` back to `0.0`.
    pub fn sample<B: BlendPolicy<C>>(&self, t: f32, blend: B) -> Result<C, GradientError> {
        if !t.is_finite() {
            return Err(GradientError::NonFinitePhase(t));
        }
        self.blend_at(t, &blend).ok_or(GradientError::Empty)
    }

    /// Sample at `progress` after applying `phase` (offset, repeat, wrap).
    pub fn sample_phased<B: BlendPolicy<C>>(
        &self,
        progress: f32,
        phase: Phase,
        blend: B,
    ) -> Result<C, GradientError> {
        let t = phase.wrap(progress)?;
        self.blend_at(t, &blend).ok_or(GradientError::Empty)
    }

    /// Lazy sequence of `count` samples at progress `i / count`.
    ///
    /// The iterator owns no state beyond its index: cloning it restarts from
    /// the same position, and every call recomputes from scratch.
    pub fn samples<B: BlendPolicy<C>>(
        &self,
        count: usize,
        phase: Phase,
        blend: B,
    ) -> Result<Samples<'_, C, B>, GradientError> {
        if !phase.is_bounded() {
            return Err(GradientError::NonFinitePhase(phase.offset + phase.repeat));
        }
        if count > 0 && self.is_empty() {
            return Err(GradientError::Empty);
        }
        Ok(Samples {
            gradient: self,
            phase,
            blend,
            index: 0,
            count,
        })
    }

    /// `count` evenly spaced samples, see [`samples`](Self::samples).
    pub fn fill_n<B: BlendPolicy<C>>(
        &self,
        count: usize,
        phase: Phase,
        blend: B,
    ) -> Result<Vec<C>, GradientError> {
        Ok(self.samples(count, phase, blend)?.collect())
    }

    /// Fill `out` as [`fill_n`](Self::fill_n) would with `count = out.len()`.
    pub fn fill<B: BlendPolicy<C>>(
        &self,
        out: &mut [C],
        phase: Phase,
        blend: B,
    ) -> Result<(), GradientError> {
        let samples = self.samples(out.len(), phase, blend)?;
        for (slot, color) in out.iter_mut().zip(samples) {
            *slot = color;
        }
        Ok(())
    }

    /// Core lookup on an already-wrapped, finite `t`. `None` if empty.
    fn blend_at<B: BlendPolicy<C>>(&self, t: f32, blend: &B) -> Option<C> {
        let (lo, hi) = PositionedCompare::new().bracket(&self.stops, t)?;
        let left = &self.stops[lo];
        if lo == hi {
            return Some(left.color());
        }
        let right = &self.stops[hi];
        let f = ((t - left.position()) / (right.position() - left.position())).clamp(0.0, 1.0);
        Some(blend.blend(left.color(), right.color(), f))
    }
}

/// Iterator returned by [`Gradient::samples`].
#[derive(Debug, Clone)]
pub struct Samples<'a, C, B> {
    gradient: &'a Gradient<C>,
    phase: Phase,
    blend: B,
    index: usize,
    count: usize,
}

impl<C: Copy, B: BlendPolicy<C>> Iterator for Samples<'_, C, B> {
    type Item = C;

    fn next(&mut self) -> Option<C> {
        if self.index >= self.count {
            return None;
        }
        let progress = self.index as f32 / self.count as f32;
        self.index += 1;
        let t = wrap_unit(self.phase.offset + progress * self.phase.repeat);
        self.gradient.blend_at(t, &self.blend)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl<C: Copy, B: BlendPolicy<C>> ExactSizeIterator for Samples<'_, C, B> {}

impl<C> Index<usize> for Gradient<C> {
    type Output = Stop<C>;

    fn index(&self, index: usize) -> &Stop<C> {
        &self.stops[index]
    }
}

impl<'a, C> IntoIterator for &'a Gradient<C> {
    type Item = &'a Stop<C>;
    type IntoIter = std::slice::Iter<'a, Stop<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.iter()
    }
}

/// Collapses near-duplicates the way repeated [`Gradient::emplace`] would.
impl<C> From<StopList<C>> for Gradient<C> {
    fn from(list: StopList<C>) -> Self {
        let mut gradient = Self::new();
        for stop in list.into_stops() {
            let (position, color) = stop.into_parts();
            gradient.insert_or_update(position, color);
        }
        gradient
    }
}

impl<C> TryFrom<Vec<Stop<C>>> for Gradient<C> {
    type Error = GradientError;

    fn try_from(stops: Vec<Stop<C>>) -> Result<Self, Self::Error> {
        Self::from_stops(stops)
    }
}

impl<C> From<Gradient<C>> for Vec<Stop<C>> {
    fn from(gradient: Gradient<C>) -> Self {
        gradient.stops
    }
}
