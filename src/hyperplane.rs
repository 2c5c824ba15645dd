//! Hyperplanes `a · x = b` in `d`-dimensional objective space.
//!
//! Hyperplanes play two roles in the chord algorithm: the supporting
//! hyperplane of a facet upper-bounds where Pareto points can lie, and the
//! *lower-bound* hyperplane attached to each oracle answer (normal = the
//! weights used, offset = the achieved objective value) certifies that no
//! feasible point lies below it. The representation is scale-invariant:
//! equality and parallelism compare coefficient vectors up to a scalar by
//! cross-multiplication.

use core::fmt;

use crate::error::{Error, Result};
use crate::linalg;
use crate::point::Point;

/// A hyperplane `{ x : a_1 x_1 + ... + a_d x_d = b }`.
///
/// # Example
///
/// ```
/// use pareto_chord::{Hyperplane, Point};
///
/// let h = Hyperplane::new([1.0, 1.0], 4.0);
/// assert_eq!(h.ratio_distance(&Point::from([1.0, 1.0])).unwrap(), 1.0);
///
/// // Scale invariance: 2x + 2y = 8 is the same hyperplane.
/// assert_eq!(h, Hyperplane::new([2.0, 2.0], 8.0));
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hyperplane {
    coefficients: Vec<f64>,
    b: f64,
}

impl Hyperplane {
    /// Creates a hyperplane from its coefficients and right hand side.
    #[must_use]
    pub fn new(coefficients: impl Into<Vec<f64>>, b: f64) -> Self {
        Self {
            coefficients: coefficients.into(),
            b,
        }
    }

    /// Creates the hyperplane through `d` points in `d` dimensions.
    ///
    /// The normal is computed by the generalized cross product: component
    /// `i` is the determinant of the coordinate matrix with column `i`
    /// replaced by ones. Affinely dependent points yield the all-zero
    /// coefficient vector; callers treat that as the degenerate case.
    ///
    /// # Errors
    ///
    /// - [`Error::NullObject`] if `points` is empty.
    /// - [`Error::DifferentDimensions`] if the number of points does not
    ///   match their dimension, or the points have mixed dimensions.
    pub fn through_points(points: &[Point]) -> Result<Self> {
        let first = points.first().ok_or(Error::NullObject)?;
        let d = first.dim();
        for p in points {
            if p.dim() != d {
                return Err(Error::DifferentDimensions {
                    expected: d,
                    got: p.dim(),
                });
            }
        }
        if points.len() != d {
            return Err(Error::DifferentDimensions {
                expected: d,
                got: points.len(),
            });
        }

        let rows: Vec<Vec<f64>> = points.iter().map(|p| p.coordinates().to_vec()).collect();
        let coefficients = linalg::facet_normal(&rows);
        let b = linalg::dot(&coefficients, first.coordinates());
        Ok(Self { coefficients, b })
    }

    /// Creates the line through two 2D points.
    ///
    /// # Errors
    ///
    /// - [`Error::SamePoints`] if `p1 == p2`.
    /// - [`Error::Not2DPoints`] if either point is not 2-dimensional.
    pub fn through_line(p1: &Point, p2: &Point) -> Result<Self> {
        if p1 == p2 {
            return Err(Error::SamePoints);
        }
        if p1.dim() != 2 || p2.dim() != 2 {
            return Err(Error::Not2DPoints);
        }
        Self::through_points(&[p1.clone(), p2.clone()])
    }

    /// Returns the `index`-th coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonExistentCoefficient`] if `index >= self.dim()`.
    pub fn coeff(&self, index: usize) -> Result<f64> {
        self.coefficients
            .get(index)
            .copied()
            .ok_or(Error::NonExistentCoefficient {
                index,
                dimension: self.dim(),
            })
    }

    /// Returns the coefficients as a slice.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Returns the equation's right hand side.
    #[must_use]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Returns the dimension of the space the hyperplane lives in.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.coefficients.len()
    }

    /// Computes the ratio distance from `p` to the hyperplane.
    ///
    /// `max(0, (b - a·p) / (a·p))`: the smallest ε >= 0 such that some
    /// point on the hyperplane ε-covers `p`. Points on the far side of the
    /// hyperplane are at distance 0.
    ///
    /// # Errors
    ///
    /// - [`Error::DifferentDimensions`] if the dimensions differ.
    /// - [`Error::InfiniteRatioDistance`] if `a·p = 0` while `p` is not on
    ///   the hyperplane (scaling `p` moves it parallel to the hyperplane,
    ///   so no multiple of it ever reaches the hyperplane).
    pub fn ratio_distance(&self, p: &Point) -> Result<f64> {
        if self.dim() != p.dim() {
            return Err(Error::DifferentDimensions {
                expected: self.dim(),
                got: p.dim(),
            });
        }
        let product = linalg::dot(&self.coefficients, p.coordinates());
        if linalg::approx_eq(product, self.b) {
            return Ok(0.0);
        }
        if linalg::approx_zero(product) {
            return Err(Error::InfiniteRatioDistance);
        }
        Ok(((self.b - product) / product).max(0.0))
    }

    /// Returns the parallel hyperplane through `p` (same coefficients,
    /// `b' = a·p`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DifferentDimensions`] if the dimensions differ.
    pub fn parallel_through(&self, p: &Point) -> Result<Self> {
        if self.dim() != p.dim() {
            return Err(Error::DifferentDimensions {
                expected: self.dim(),
                got: p.dim(),
            });
        }
        Ok(Self {
            coefficients: self.coefficients.clone(),
            b: linalg::dot(&self.coefficients, p.coordinates()),
        })
    }

    /// Checks whether two hyperplanes are parallel.
    ///
    /// Coefficient vectors are compared up to a scalar by cross-multiplying
    /// every pair of components, so scaled representations compare as
    /// expected. Hyperplanes of different dimensions are never parallel.
    #[must_use]
    pub fn is_parallel(&self, other: &Self) -> bool {
        if self.dim() != other.dim() {
            return false;
        }
        for i in 0..self.dim() {
            for j in (i + 1)..self.dim() {
                let lhs = self.coefficients[i] * other.coefficients[j];
                let rhs = other.coefficients[i] * self.coefficients[j];
                if !linalg::approx_eq(lhs, rhs) {
                    return false;
                }
            }
        }
        true
    }

    /// Finds the point where two lines (2D hyperplanes) intersect.
    ///
    /// # Errors
    ///
    /// - [`Error::Not2DHyperplanes`] if either hyperplane is not a line.
    /// - [`Error::ParallelHyperplanes`] if the lines are parallel (or
    ///   equal).
    pub fn intersection(&self, other: &Self) -> Result<Point> {
        if self.dim() != 2 || other.dim() != 2 {
            return Err(Error::Not2DHyperplanes);
        }
        if self.is_parallel(other) {
            return Err(Error::ParallelHyperplanes);
        }
        let rows = vec![self.coefficients.clone(), other.coefficients.clone()];
        let solution =
            linalg::solve(&rows, &[self.b, other.b]).ok_or(Error::ParallelHyperplanes)?;
        Ok(Point::new(solution))
    }
}

impl PartialEq for Hyperplane {
    /// Scale-invariant equality: same direction (parallel) and
    /// cross-multiplied offsets `a_i * b' = a'_i * b` agree.
    fn eq(&self, other: &Self) -> bool {
        self.is_parallel(other)
            && self
                .coefficients
                .iter()
                .zip(&other.coefficients)
                .all(|(&a, &a_other)| linalg::approx_eq(a * other.b, a_other * self.b))
    }
}

impl fmt::Display for Hyperplane {
    /// Renders the equation, e.g. `( 2.2 * x1 + 5 * x2 - 1.7 * x3 = 9.2 )`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.coefficients.first() else {
            return write!(f, "()");
        };
        write!(f, "( {first} * x1")?;
        for (i, &a) in self.coefficients.iter().enumerate().skip(1) {
            let sign = if a >= 0.0 { '+' } else { '-' };
            write!(f, " {sign} {} * x{}", a.abs(), i + 1)?;
        }
        write!(f, " = {} )", self.b)
    }
}
