//! Epsilon-tolerant ordering of stop positions and binary-search bounds.
//!
//! Two positions within [`POSITION_EPSILON`] of each other are *equivalent*:
//! neither is less than the other. A run of equivalent positions therefore
//! collapses into one equal-range under [`PositionedCompare::lower_bound`] and
//! [`PositionedCompare::upper_bound`].
//!
//! # Complexity
//! - Bound queries: O(log N) via `partition_point`
//! - Sort: O(N log N)

use std::cmp::Ordering;

use crate::stop::Stop;

/// Positions closer than this are treated as the same stop position.
pub const POSITION_EPSILON: f32 = f32::EPSILON;

/// Strict-weak "less than" on positions with an epsilon dead zone.
///
/// ```text
/// less(a, b) = |a − b| > ε  and  a < b
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedCompare {
    epsilon: f32,
}

impl Default for PositionedCompare {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionedCompare {
    pub const fn new() -> Self {
        Self {
            epsilon: POSITION_EPSILON,
        }
    }

    pub const fn with_epsilon(epsilon: f32) -> Self {
        Self { epsilon }
    }

    pub const fn epsilon(&self) -> f32 {
        self.epsilon
    }

    #[inline]
    pub fn less(&self, l: f32, r: f32) -> bool {
        (l - r).abs() > self.epsilon && l < r
    }

    #[inline]
    pub fn equivalent(&self, l: f32, r: f32) -> bool {
        !self.less(l, r) && !self.less(r, l)
    }

    /// Three-way form of [`less`](Self::less); `Equal` means equivalent.
    pub fn ordering(&self, l: f32, r: f32) -> Ordering {
        if self.less(l, r) {
            Ordering::Less
        } else if self.less(r, l) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// True if no stop is less than the one before it.
    pub fn is_sorted<C>(&self, stops: &[Stop<C>]) -> bool {
        stops
            .windows(2)
            .all(|w| !self.less(w[1].position(), w[0].position()))
    }

    /// Index of the first stop not less than `t`.
    pub fn lower_bound<C>(&self, stops: &[Stop<C>], t: f32) -> usize {
        stops.partition_point(|s| self.less(s.position(), t))
    }

    /// Index of the first stop greater than `t`.
    pub fn upper_bound<C>(&self, stops: &[Stop<C>], t: f32) -> usize {
        stops.partition_point(|s| !self.less(t, s.position()))
    }

    /// The pair of stops enclosing `t`, clamped at both ends.
    ///
    /// - `t` before the first stop: `(0, 0)`
    /// - `t` after the last stop: `(n − 1, n − 1)`
    /// - `t` equivalent to a stop: `(k, k)`, `k` being the last stop of
    ///   that equivalence class
    /// - otherwise: the neighbours `(k, k + 1)` with `t` strictly between
    ///
    /// Returns `None` for an empty slice.
    pub fn bracket<C>(&self, stops: &[Stop<C>], t: f32) -> Option<(usize, usize)> {
        if stops.is_empty() {
            return None;
        }
        let lower = self.lower_bound(stops, t);
        let upper = self.upper_bound(stops, t);

        if lower < upper {
            return Some((upper - 1, upper - 1));
        }
        if upper == 0 {
            Some((0, 0))
        } else if upper == stops.len() {
            Some((upper - 1, upper - 1))
        } else {
            Some((upper - 1, upper))
        }
    }
}

/// Sort stops by position.
///
/// Uses the IEEE total order, which is a refinement of the epsilon order:
/// the result is also sorted under [`PositionedCompare`], and the sort stays
/// well-defined even though epsilon-equivalence is not transitive. Stable, so
/// equivalent stops keep their input order.
pub(crate) fn sort_stops<C>(stops: &mut [Stop<C>]) {
    stops.sort_by(|a, b| a.position().total_cmp(&b.position()));
}
