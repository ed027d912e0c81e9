//! Read-only sorted stop sequence.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::GradientError;
use crate::ordering::{PositionedCompare, sort_stops};
use crate::stop::Stop;

/// An immutable sequence of stops sorted by position.
///
/// Sorting happens once, at construction. Near-duplicate positions are kept
/// as-is; bound queries treat them as one equivalence class.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<Stop<C>>",
    into = "Vec<Stop<C>>",
    bound(serialize = "C: Clone + Serialize", deserialize = "C: Deserialize<'de>")
)]
pub struct StopList<C> {
    stops: Vec<Stop<C>>,
}

impl<C> StopList<C> {
    /// Build from stops that already carry a position.
    pub fn from_stops(mut stops: Vec<Stop<C>>) -> Result<Self, GradientError> {
        if let Some(bad) = stops.iter().find(|s| !s.position().is_finite()) {
            return Err(GradientError::NonFinitePosition(bad.position()));
        }
        sort_stops(&mut stops);
        Ok(Self { stops })
    }

    /// Build from `(position, color)` pairs.
    pub fn from_positioned_pairs<I>(pairs: I) -> Result<Self, GradientError>
    where
        I: IntoIterator<Item = (f32, C)>,
    {
        Self::from_stops(pairs.into_iter().map(Stop::from).collect())
    }

    /// Build from bare colors, spread evenly over `[0, 1]`.
    ///
    /// The `i`-th of `n` colors lands at `i / (n − 1)`; a single color lands
    /// at `0`.
    pub fn from_colors_evenly_spaced<I>(colors: I) -> Self
    where
        I: IntoIterator<Item = C>,
    {
        Self {
            stops: evenly_spaced(colors),
        }
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

    pub fn into_stops(self) -> Vec<Stop<C>> {
        self.stops
    }
}

pub(crate) fn evenly_spaced<C, I>(colors: I) -> Vec<Stop<C>>
where
    I: IntoIterator<Item = C>,
{
    let colors: Vec<C> = colors.into_iter().collect();
    let denom = colors.len().saturating_sub(1).max(1) as f32;
    colors
        .into_iter()
        .enumerate()
        .map(|(i, color)| Stop::new(i as f32 / denom, color))
        .collect()
}

impl<C> Index<usize> for StopList<C> {
    type Output = Stop<C>;

    fn index(&self, index: usize) -> &Stop<C> {
        &self.stops[index]
    }
}

impl<'a, C> IntoIterator for &'a StopList<C> {
    type Item = &'a Stop<C>;
    type IntoIter = std::slice::Iter<'a, Stop<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.iter()
    }
}

impl<C> TryFrom<Vec<Stop<C>>> for StopList<C> {
    type Error = GradientError;

    fn try_from(stops: Vec<Stop<C>>) -> Result<Self, Self::Error> {
        Self::from_stops(stops)
    }
}

impl<C> From<StopList<C>> for Vec<Stop<C>> {
    fn from(list: StopList<C>) -> Self {
        list.stops
    }
}
