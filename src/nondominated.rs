//! An insertion-only set that keeps exactly the Pareto-optimal elements it
//! has seen.
//!
//! [`NonDominatedSet`] is generic over anything carrying a [`Point`]: plain
//! points, or [`PointAndSolution`](crate::PointAndSolution) values when the
//! underlying solutions must travel with their objective vectors. The set
//! maintains one invariant: no stored element 0-dominates another.
//!
//! # Example
//!
//! ```
//! use pareto_chord::{NonDominatedSet, Point};
//!
//! let mut set: NonDominatedSet<Point> = NonDominatedSet::new();
//! assert!(set.insert(Point::from([1.0, 5.0])).unwrap());
//! assert!(set.insert(Point::from([5.0, 1.0])).unwrap());
//!
//! // (2, 2) dominates (and evicts) nothing, but is itself undominated.
//! assert!(set.insert(Point::from([2.0, 2.0])).unwrap());
//! assert_eq!(set.len(), 3);
//!
//! // (1.5, 1.5) dominates (2, 2) and replaces it.
//! assert!(set.insert(Point::from([1.5, 1.5])).unwrap());
//! assert_eq!(set.len(), 3);
//! assert!(!set.contains(&Point::from([2.0, 2.0])));
//! ```

use crate::error::Result;
use crate::point::Point;
use crate::solution::PointAndSolution;

/// Something that occupies a position in objective space.
///
/// Implemented by [`Point`] itself and by
/// [`PointAndSolution`](crate::PointAndSolution); the set only ever looks
/// at the point when deciding domination.
pub trait ParetoElement {
    /// The element's position in objective space.
    fn point(&self) -> &Point;
}

impl ParetoElement for Point {
    fn point(&self) -> &Point {
        self
    }
}

impl<S> ParetoElement for PointAndSolution<S> {
    fn point(&self) -> &Point {
        &self.point
    }
}

/// An insertion-only container storing only mutually non-dominated
/// elements.
///
/// All elements share one dimension (enforced by the underlying domination
/// test). Iteration order is unspecified.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NonDominatedSet<T> {
    elements: Vec<T>,
}

impl<T: ParetoElement> NonDominatedSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Inserts `candidate`, keeping the set non-dominated.
    ///
    /// Returns `false` (and leaves the set unchanged) if any stored element
    /// 0-dominates the candidate — in particular for duplicates, since
    /// 0-domination is reflexive. Otherwise every stored element the
    /// candidate 0-dominates is removed, the candidate is stored, and the
    /// call returns `true`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the domination test (dimension mismatch,
    /// negative coordinates); the set is unchanged in that case.
    pub fn insert(&mut self, candidate: T) -> Result<bool> {
        let mut evicted = Vec::new();
        for (i, stored) in self.elements.iter().enumerate() {
            if stored.point().dominates(candidate.point(), 0.0)? {
                return Ok(false);
            }
            if candidate.point().dominates(stored.point(), 0.0)? {
                evicted.push(i);
            }
        }
        for i in evicted.into_iter().rev() {
            self.elements.swap_remove(i);
        }
        self.elements.push(candidate);
        Ok(true)
    }

    /// Inserts every element of `candidates`.
    ///
    /// Equivalent to repeated [`insert`](Self::insert); returns `true` iff
    /// at least one insertion succeeded.
    ///
    /// # Errors
    ///
    /// Stops at (and propagates) the first domination-test error.
    pub fn insert_all<I: IntoIterator<Item = T>>(&mut self, candidates: I) -> Result<bool> {
        let mut any = false;
        for candidate in candidates {
            any |= self.insert(candidate)?;
        }
        Ok(any)
    }

    /// Returns the number of stored elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns `true` if some stored element sits exactly at `point`.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        self.elements.iter().any(|e| e.point() == point)
    }

    /// Iterates over the stored elements in unspecified order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.elements.iter()
    }
}

impl<T> IntoIterator for NonDominatedSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NonDominatedSet<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
