//! Oracle answers: an objective-space point paired with the solution that
//! achieves it and the weights that produced it.

use core::cmp::Ordering;

use crate::point::Point;

/// A point in objective space together with the underlying solution and the
/// weight vector the scalarization oracle was called with.
///
/// `S` is the caller's solution payload (a path, an assignment, an index
/// into a candidate list, ...). The driver clones accepted values while
/// retriangulating, so `S: Clone` is required wherever facets are built.
///
/// Equality compares the points only; two answers reaching the same
/// objective vector through different solutions count as the same Pareto
/// point. Ordering is the point's lexicographic order.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointAndSolution<S> {
    /// The objective-space point.
    pub point: Point,
    /// The solution achieving `point`.
    pub solution: S,
    /// The weights the oracle was called with to obtain `point`.
    pub weights: Vec<f64>,
}

impl<S> PointAndSolution<S> {
    /// Creates a new oracle answer.
    ///
    /// The point's dimension must match the number of weights.
    #[must_use]
    pub fn new(point: Point, solution: S, weights: Vec<f64>) -> Self {
        debug_assert_eq!(point.dim(), weights.len());
        Self {
            point,
            solution,
            weights,
        }
    }

    /// Returns the dimension of the contained point.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.point.dim()
    }
}

impl<S> PartialEq for PointAndSolution<S> {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl<S> PartialOrd for PointAndSolution<S> {
    /// Lexicographic order of the contained points; `None` across
    /// dimensions.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.point.partial_cmp(&other.point)
    }
}
