// SPDX-FileCopyrightText: 2024 Helge Eichhorn <git@helgeeichhorn.de>
// SPDX-FileCopyrightText: 2025 Angus Morrison <github@angus-morrison.com>
//
// SPDX-License-Identifier: MPL-2.0

/*!
    Module `axis` provides [Axis], an evenly spaced 1-D coordinate axis with
    an optional periodic (circular) topology for longitudes.

    An axis is the arithmetic progression `start + i * step` for
    `0 <= i < len`. Periodic axes span exactly 360° and wrap index lookups
    across the seam, so neighbor queries are total over the real line.
*/

use thiserror::Error;

use crate::math::normalize_degrees_from;

/// Default tolerance used to check that explicit points are evenly spaced.
pub const DEFAULT_EPSILON: f64 = 1e-6;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum InvalidAxisError {
    #[error("an axis requires at least 2 points, but {0} were given")]
    TooFewPoints(usize),
    #[error("axis step cannot be zero or non-finite")]
    InvalidStep,
    #[error(
        "axis points are not evenly spaced: point {index} deviates from the \
         expected spacing by {deviation}"
    )]
    UnevenSpacing { index: usize, deviation: f64 },
    #[error("a periodic axis must span 360°, but this axis spans {0}")]
    InvalidSpan(f64),
}

/// An evenly spaced coordinate axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    start: f64,
    step: f64,
    len: usize,
    periodic: bool,
}

impl Axis {
    /// Creates an axis from `(start, end, step)`, inclusive of both ends.
    pub fn from_range(start: f64, end: f64, step: f64) -> Result<Self, InvalidAxisError> {
        if step == 0.0 || !step.is_finite() {
            return Err(InvalidAxisError::InvalidStep);
        }
        let len = ((end - start) / step).round() as i64 + 1;
        if len < 2 {
            return Err(InvalidAxisError::TooFewPoints(len.max(0) as usize));
        }
        Self::checked(start, step, len as usize, false)
    }

    /// Creates an axis from explicit points, which must be evenly spaced to
    /// within [DEFAULT_EPSILON].
    pub fn from_points(points: &[f64]) -> Result<Self, InvalidAxisError> {
        Self::from_points_with_epsilon(points, DEFAULT_EPSILON, false)
    }

    /// Creates a periodic (360°-wrapping) axis from explicit points.
    ///
    /// Longitudes that cross the ±180° seam are canonicalized by removing a
    /// single 360° wrap before the spacing check.
    pub fn periodic_from_points(points: &[f64]) -> Result<Self, InvalidAxisError> {
        Self::from_points_with_epsilon(points, DEFAULT_EPSILON, true)
    }

    /// Creates a periodic axis from `(start, step, len)`.
    pub fn periodic(start: f64, step: f64, len: usize) -> Result<Self, InvalidAxisError> {
        if step == 0.0 || !step.is_finite() {
            return Err(InvalidAxisError::InvalidStep);
        }
        Self::checked(start, step, len, true)
    }

    pub fn from_points_with_epsilon(
        points: &[f64],
        epsilon: f64,
        periodic: bool,
    ) -> Result<Self, InvalidAxisError> {
        if points.len() < 2 {
            return Err(InvalidAxisError::TooFewPoints(points.len()));
        }
        let points = if periodic {
            unwrap_seam(points)
        } else {
            points.to_vec()
        };
        let step = (points[points.len() - 1] - points[0]) / (points.len() - 1) as f64;
        if step == 0.0 || !step.is_finite() {
            return Err(InvalidAxisError::InvalidStep);
        }
        for (index, point) in points.iter().enumerate() {
            let deviation = (point - (points[0] + index as f64 * step)).abs();
            if deviation > epsilon {
                return Err(InvalidAxisError::UnevenSpacing { index, deviation });
            }
        }
        Self::checked_with_epsilon(points[0], step, points.len(), periodic, epsilon)
    }

    fn checked(
        start: f64,
        step: f64,
        len: usize,
        periodic: bool,
    ) -> Result<Self, InvalidAxisError> {
        Self::checked_with_epsilon(start, step, len, periodic, DEFAULT_EPSILON)
    }

    fn checked_with_epsilon(
        start: f64,
        step: f64,
        len: usize,
        periodic: bool,
        epsilon: f64,
    ) -> Result<Self, InvalidAxisError> {
        if len < 2 {
            return Err(InvalidAxisError::TooFewPoints(len));
        }
        if periodic {
            let span = (step * len as f64).abs();
            if (span - 360.0).abs() > epsilon {
                return Err(InvalidAxisError::InvalidSpan(span));
            }
        }
        Ok(Self {
            start,
            step,
            len,
            periodic,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn is_periodic(&self) -> bool {
        self.periodic
    }

    pub fn is_ascending(&self) -> bool {
        self.step > 0.0
    }

    /// The smallest coordinate on the axis.
    pub fn min_value(&self) -> f64 {
        if self.is_ascending() {
            self.start
        } else {
            self.value(self.len - 1)
        }
    }

    /// The coordinate of node `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn value(&self, index: usize) -> f64 {
        assert!(index < self.len, "axis index {index} out of bounds");
        self.start + index as f64 * self.step
    }

    /// Maps `coordinate` into `[min_value, min_value + 360)` when the axis
    /// is periodic; returns it unchanged otherwise.
    pub fn normalize(&self, coordinate: f64) -> f64 {
        if self.periodic {
            normalize_degrees_from(coordinate, self.min_value())
        } else {
            coordinate
        }
    }

    /// The index of the node nearest to `coordinate`.
    ///
    /// Out-of-range coordinates are clamped to the first or last node when
    /// `bounded`, and yield `None` otherwise.
    pub fn find_index(&self, coordinate: f64, bounded: bool) -> Option<usize> {
        let position = (self.normalize(coordinate) - self.start) / self.step;
        let index = position.round() as i64;
        if index < 0 {
            return bounded.then_some(0);
        }
        if index >= self.len as i64 {
            return bounded.then_some(self.len - 1);
        }
        Some(index as usize)
    }

    /// The pair of adjacent nodes framing `coordinate`.
    ///
    /// On a periodic axis the lookup is total and the pair wraps across the
    /// seam as `(len - 1, 0)`. On a bounded axis, coordinates outside the
    /// range yield `None`. A coordinate exactly on the last node pairs with
    /// its predecessor.
    pub fn find_indices(&self, coordinate: f64) -> Option<(usize, usize)> {
        let position = (self.normalize(coordinate) - self.start) / self.step;
        if !self.periodic && !(0.0..=(self.len - 1) as f64).contains(&position) {
            return None;
        }
        let nearest = position.round();
        let (i0, i1) = if nearest <= 0.0 {
            (0, 1)
        } else if nearest < position {
            (nearest as usize, nearest as usize + 1)
        } else {
            (nearest as usize - 1, nearest as usize)
        };
        if i1 == self.len {
            // Reachable for periodic axes only: wrap the upper neighbor.
            return Some((i0, 0));
        }
        Some((i0, i1))
    }
}

/// Removes a single 360° wrap from a run of longitudes crossing the ±180°
/// seam, e.g. `[179.0, -180.0, -179.0]` becomes `[179.0, 180.0, 181.0]`.
fn unwrap_seam(points: &[f64]) -> Vec<f64> {
    let mut points = points.to_vec();
    for index in 1..points.len() {
        let jump = points[index] - points[index - 1];
        if jump.abs() > 180.0 {
            let shift = -360.0 * jump.signum();
            points[index..].iter_mut().for_each(|p| *p += shift);
            break;
        }
    }
    points
}
