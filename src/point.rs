//! Objective-space points: coordinates, domination, and ratio distance.
//!
//! A [`Point`] is an ordered tuple of `f64` coordinates. Points are the
//! currency of the whole crate: the scalarization oracle returns them, the
//! non-dominated set stores them, and facets measure their approximation
//! error against them.
//!
//! Two relations matter here:
//!
//! - **Domination**: `p` ε-covers `q` iff `p_i <= (1 + ε) * q_i` for all
//!   coordinates. With ε = 0 this is the classic (weak) Pareto domination.
//! - **Ratio distance** from `p` to `q`: `max(0, max_i (q_i - p_i) / p_i)`,
//!   the smallest ε such that `q` ε-covers `p`.
//!
//! # Example
//!
//! ```
//! use pareto_chord::Point;
//!
//! let p = Point::from([1.0, 5.0]);
//! let q = Point::from([2.0, 6.0]);
//!
//! assert!(p.dominates(&q, 0.0).unwrap());
//! assert_eq!(p.ratio_distance(&q).unwrap(), 1.0);
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// A point in `d`-dimensional objective space.
///
/// Equality is exact and coordinate-wise; points of different dimensions
/// are simply unequal. The lexicographic order ([`lex_cmp`](Self::lex_cmp))
/// and the geometric relations below are only defined between points of the
/// same dimension and report [`Error::DifferentDimensions`] otherwise.
///
/// The textual form is `(c1, c2, ..., cd)`; see the [`fmt::Display`] and
/// [`FromStr`] implementations. A zero-dimensional point renders as `()`
/// but is rejected by the parser.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    coordinates: Vec<f64>,
}

impl Point {
    /// Creates a point from its coordinates.
    #[must_use]
    pub fn new(coordinates: Vec<f64>) -> Self {
        Self { coordinates }
    }

    /// Returns the point's dimension.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.coordinates.len()
    }

    /// Returns the `index`-th coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonExistentCoordinate`] if `index >= self.dim()`.
    pub fn coord(&self, index: usize) -> Result<f64> {
        self.coordinates
            .get(index)
            .copied()
            .ok_or(Error::NonExistentCoordinate {
                index,
                dimension: self.dim(),
            })
    }

    /// Returns the coordinates as a slice.
    #[must_use]
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// Returns `true` if every coordinate is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coordinates.iter().all(|&c| c == 0.0)
    }

    /// Returns `true` if every coordinate is strictly positive.
    #[must_use]
    pub fn is_strictly_positive(&self) -> bool {
        !self.coordinates.is_empty() && self.coordinates.iter().all(|&c| c > 0.0)
    }

    /// Compares two points lexicographically.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DifferentDimensions`] if the dimensions differ.
    pub fn lex_cmp(&self, other: &Self) -> Result<Ordering> {
        if self.dim() != other.dim() {
            return Err(Error::DifferentDimensions {
                expected: self.dim(),
                got: other.dim(),
            });
        }
        for (&a, &b) in self.coordinates.iter().zip(&other.coordinates) {
            match a.partial_cmp(&b) {
                Some(Ordering::Equal) | None => {}
                Some(ordering) => return Ok(ordering),
            }
        }
        Ok(Ordering::Equal)
    }

    /// Computes the ratio distance from `self` to `q`.
    ///
    /// Defined as `max(0, max_i (q_i - p_i) / p_i)`: the smallest ε >= 0
    /// such that `q` ε-covers `self`. A coordinate where `self` is zero
    /// contributes `+∞` when the corresponding coordinate of `q` is
    /// positive and nothing otherwise, so the result may be
    /// [`f64::INFINITY`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DifferentDimensions`] if the dimensions differ.
    pub fn ratio_distance(&self, q: &Self) -> Result<f64> {
        if self.dim() != q.dim() {
            return Err(Error::DifferentDimensions {
                expected: self.dim(),
                got: q.dim(),
            });
        }
        let mut max_ratio = 0.0_f64;
        for (&pi, &qi) in self.coordinates.iter().zip(&q.coordinates) {
            if pi == 0.0 {
                if qi > 0.0 {
                    return Ok(f64::INFINITY);
                }
            } else {
                max_ratio = max_ratio.max((qi - pi) / pi);
            }
        }
        Ok(max_ratio)
    }

    /// Checks whether `self` ε-covers `q`.
    ///
    /// `self` ε-covers `q` iff `p_i <= (1 + eps) * q_i` for every
    /// coordinate. With `eps = 0` this is the domination test used by
    /// [`NonDominatedSet`](crate::NonDominatedSet); note that it is
    /// reflexive (every point 0-covers itself).
    ///
    /// Both points must have non-negative coordinates for the relation to
    /// make sense.
    ///
    /// # Errors
    ///
    /// - [`Error::NegativeApproximationRatio`] if `eps < 0`.
    /// - [`Error::DifferentDimensions`] if the dimensions differ.
    /// - [`Error::NotPositivePoint`] if either point has a negative
    ///   coordinate.
    pub fn dominates(&self, q: &Self, eps: f64) -> Result<bool> {
        if eps < 0.0 {
            return Err(Error::NegativeApproximationRatio(eps));
        }
        if self.dim() != q.dim() {
            return Err(Error::DifferentDimensions {
                expected: self.dim(),
                got: q.dim(),
            });
        }
        if self
            .coordinates
            .iter()
            .chain(&q.coordinates)
            .any(|&c| c < 0.0)
        {
            return Err(Error::NotPositivePoint);
        }
        Ok(self
            .coordinates
            .iter()
            .zip(&q.coordinates)
            .all(|(&pi, &qi)| pi <= (1.0 + eps) * qi))
    }
}

impl<const N: usize> From<[f64; N]> for Point {
    fn from(coordinates: [f64; N]) -> Self {
        Self::new(coordinates.to_vec())
    }
}

impl From<Vec<f64>> for Point {
    fn from(coordinates: Vec<f64>) -> Self {
        Self::new(coordinates)
    }
}

impl From<&[f64]> for Point {
    fn from(coordinates: &[f64]) -> Self {
        Self::new(coordinates.to_vec())
    }
}

impl FromIterator<f64> for Point {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl PartialOrd for Point {
    /// Lexicographic order; `None` across dimensions.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.lex_cmp(other).ok()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coordinates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

impl FromStr for Point {
    type Err = Error;

    /// Parses the `(c1, c2, ..., cd)` form; scientific notation is fine.
    ///
    /// Zero-dimensional literals (`()`) are rejected.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::ParsePoint(s.to_string());

        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(malformed)?
            .trim();
        if inner.is_empty() {
            return Err(malformed());
        }

        let coordinates = inner
            .split(',')
            .map(|part| part.trim().parse::<f64>().map_err(|_| malformed()))
            .collect::<Result<Vec<f64>>>()?;
        Ok(Self::new(coordinates))
    }
}
