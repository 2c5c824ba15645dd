//! The approximation driver: a chord-style refinement loop over the lower
//! envelope of oracle-returned points.
//!
//! # How a run proceeds
//!
//! 1. **Seeding**: the oracle is called once per axis with the axis-aligned
//!    weight vectors, yielding the extreme points of the Pareto set.
//! 2. **Initial polytope**: the seeds span one simplicial facet whose
//!    normal is the mean of the seed weight vectors.
//! 3. **Refinement**: facets wait in a priority queue keyed by their
//!    certified error bound ([`Facet::local_error_upper_bound`]). The
//!    facet with the largest bound is probed: the oracle is called with
//!    the facet's normal as weights. If the answer improves the facet by
//!    more than the tolerance, it is inserted into the result set and the
//!    facets it pierces are retriangulated around it; otherwise the facet
//!    is final. The loop ends when every queued facet's bound is within
//!    the tolerance.
//!
//! Boundary facets (no usable lower distal point) are excluded from
//! refinement, as are facets for which no valid oracle direction exists.
//!
//! # Example
//!
//! ```
//! use pareto_chord::{ChordSolver, Point, PointAndSolution, Result};
//!
//! // Three candidate schedules with (cost, duration) objectives.
//! let feasible = [
//!     Point::from([1.0, 5.0]),
//!     Point::from([2.0, 3.0]),
//!     Point::from([5.0, 1.0]),
//! ];
//!
//! // The oracle minimizes weights · objectives, breaking ties towards the
//! // lexicographically smallest point.
//! let mut oracle = |weights: &[f64]| -> Result<PointAndSolution<usize>> {
//!     let cost = |p: &Point| -> f64 {
//!         weights.iter().zip(p.coordinates()).map(|(w, c)| w * c).sum()
//!     };
//!     let mut best = 0;
//!     for i in 1..feasible.len() {
//!         let (a, b) = (cost(&feasible[i]), cost(&feasible[best]));
//!         if a < b - 1e-9 || ((a - b).abs() <= 1e-9 && feasible[i] < feasible[best]) {
//!             best = i;
//!         }
//!     }
//!     Ok(PointAndSolution::new(feasible[best].clone(), best, weights.to_vec()))
//! };
//!
//! let solver = ChordSolver::new(2, 0.0)?;
//! let front = solver.approximate(&mut oracle)?;
//! assert_eq!(front.len(), 3);
//! # Ok::<(), pareto_chord::Error>(())
//! ```

use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::facet::Facet;
use crate::linalg;
use crate::nondominated::NonDominatedSet;
use crate::solution::PointAndSolution;

/// The linear-scalarization oracle a problem must provide.
///
/// Given non-negative weights `w` of the objective space dimension, `comb`
/// returns a feasible solution minimizing `w · c(x)` together with its
/// objective vector. The oracle must be deterministic and idempotent with
/// respect to `w`. When `w` has zero components, any solution that is
/// lexicographically minimal among the tied minimizers may be returned.
///
/// Closures implement the trait directly, so quick experiments don't need
/// a dedicated type:
///
/// ```
/// use pareto_chord::{Point, PointAndSolution, Result, ScalarizationOracle};
///
/// let mut oracle = |weights: &[f64]| -> Result<PointAndSolution<()>> {
///     Ok(PointAndSolution::new(Point::from([1.0, 1.0]), (), weights.to_vec()))
/// };
/// let answer = oracle.comb(&[0.5, 0.5]).unwrap();
/// assert_eq!(answer.point, Point::from([1.0, 1.0]));
/// ```
///
/// An infeasible problem should report [`Error::OracleFailure`]; the driver
/// treats every oracle error as fatal.
pub trait ScalarizationOracle<S> {
    /// Returns a feasible solution minimizing `weights · c(x)`.
    ///
    /// # Errors
    ///
    /// Implementations report [`Error::OracleFailure`] (or any other error)
    /// when no solution can be produced; the driver aborts the run.
    fn comb(&mut self, weights: &[f64]) -> Result<PointAndSolution<S>>;
}

impl<S, F> ScalarizationOracle<S> for F
where
    F: FnMut(&[f64]) -> Result<PointAndSolution<S>>,
{
    fn comb(&mut self, weights: &[f64]) -> Result<PointAndSolution<S>> {
        self(weights)
    }
}

// ---------------------------------------------------------------------------
// Priority queue entries
// ---------------------------------------------------------------------------

/// A refinable facet waiting in the priority queue.
///
/// Ordered by bound (largest first); ties go to the oldest entry.
struct QueuedFacet<S> {
    bound: f64,
    seq: u64,
    facet: Facet<S>,
}

impl<S> PartialEq for QueuedFacet<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == core::cmp::Ordering::Equal
    }
}

impl<S> Eq for QueuedFacet<S> {}

impl<S> PartialOrd for QueuedFacet<S> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for QueuedFacet<S> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.bound
            .total_cmp(&other.bound)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

// ---------------------------------------------------------------------------
// ChordSolver
// ---------------------------------------------------------------------------

/// Approximates the Pareto set of a multi-objective problem to within a
/// ratio tolerance, using a [`ScalarizationOracle`].
///
/// The solver itself only holds configuration; all run state lives on the
/// stack of [`approximate`](Self::approximate), so one solver can serve
/// many problems (and many solvers can run on separate threads, each with
/// its own oracle).
///
/// # Example
///
/// See the [module documentation](self).
#[derive(Clone, Copy, Debug)]
pub struct ChordSolver {
    dimension: usize,
    tolerance: f64,
}

impl ChordSolver {
    /// Creates a solver for `dimension` objectives and a ratio `tolerance`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedDimension`] unless `dimension` is 1, 2 or 3.
    /// - [`Error::NegativeApproximationRatio`] if `tolerance < 0`.
    pub fn new(dimension: usize, tolerance: f64) -> Result<Self> {
        if !(1..=3).contains(&dimension) {
            return Err(Error::UnsupportedDimension(dimension));
        }
        if tolerance < 0.0 {
            return Err(Error::NegativeApproximationRatio(tolerance));
        }
        Ok(Self {
            dimension,
            tolerance,
        })
    }

    /// Returns the objective space dimension.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the ratio tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Computes an approximate Pareto set of the oracle's problem.
    ///
    /// Every point in the returned set was produced by the oracle; the set
    /// holds only mutually non-dominated points and, for a well-behaved
    /// oracle, ε-covers every point the oracle can return.
    ///
    /// # Errors
    ///
    /// Oracle errors and invariant violations (answers of the wrong
    /// dimension, negative coordinates reaching the domination test) are
    /// fatal and abort the run. Boundary-facet conditions are handled
    /// internally and never surface.
    #[allow(clippy::cast_precision_loss)]
    pub fn approximate<S, O>(&self, oracle: &mut O) -> Result<NonDominatedSet<PointAndSolution<S>>>
    where
        S: Clone,
        O: ScalarizationOracle<S> + ?Sized,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "approximate",
            dimension = self.dimension,
            tolerance = self.tolerance
        )
        .entered();

        let d = self.dimension;
        let mut result = NonDominatedSet::new();

        // Seed with the axis-aligned weight vectors.
        let mut seeds: Vec<PointAndSolution<S>> = Vec::with_capacity(d);
        for axis in 0..d {
            let mut weights = vec![0.0; d];
            weights[axis] = 1.0;
            let answer = self.call_oracle(oracle, &weights)?;
            if !seeds.iter().any(|s| s.point == answer.point) {
                seeds.push(answer.clone());
            }
            result.insert(answer)?;
        }
        if d == 1 || seeds.len() < d {
            // The axis runs collapsed: nothing to span a facet with.
            return Ok(result);
        }

        // Affinely dependent seeds span no refinable facet: the lone facet
        // of their affine hull is a boundary facet.
        let seed_rows: Vec<Vec<f64>> = seeds
            .iter()
            .map(|s| s.point.coordinates().to_vec())
            .collect();
        if linalg::facet_normal(&seed_rows)
            .iter()
            .all(|&c| linalg::approx_zero(c))
        {
            #[cfg(feature = "tracing")]
            tracing::info!(points = result.len(), "seeds are affinely dependent");
            return Ok(result);
        }

        // Initial facet: the seed simplex, oriented by the mean of the
        // seed weight vectors.
        let mut mean_weights = vec![0.0; d];
        for seed in &seeds {
            for (m, &w) in mean_weights.iter_mut().zip(&seed.weights) {
                *m += w;
            }
        }
        for m in &mut mean_weights {
            *m /= d as f64;
        }

        let mut queue: BinaryHeap<QueuedFacet<S>> = BinaryHeap::new();
        let mut next_seq = 0_u64;
        Self::enqueue(Facet::with_normal(seeds, mean_weights), &mut queue, &mut next_seq)?;

        // Refinement loop.
        while queue
            .peek()
            .is_some_and(|top| top.bound > self.tolerance)
        {
            let Some(entry) = queue.pop() else { break };
            let facet = entry.facet;

            // The raw normal is the probing direction of choice; fall back
            // to the mean vertex weights when it has non-positive
            // components.
            let weights = if facet.normal().iter().all(|&c| c > 0.0) {
                facet.normalized_normal()
            } else {
                facet.mean_vertex_weights()
            };
            if weights.iter().any(|&w| w <= 0.0) {
                // No usable oracle direction: the facet is final.
                continue;
            }

            let answer = self.call_oracle(oracle, &weights)?;

            if facet.vertices().iter().any(|v| v.point == answer.point) {
                // The oracle cannot improve this facet.
                continue;
            }
            if answer.point.is_strictly_positive() {
                match facet.ratio_distance(&answer.point) {
                    Ok(improvement) if improvement <= self.tolerance => continue,
                    Ok(_) => {}
                    Err(Error::InfiniteRatioDistance) => continue,
                    Err(e) => return Err(e),
                }
            }
            if !result.insert(answer.clone())? {
                // Dominated by (or equal to) a point we already hold.
                continue;
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(point = %answer.point, bound = entry.bound, "accepted point");

            // Retriangulate the visible region: the popped facet plus any
            // queued facet the new point lies strictly below.
            let mut visible = vec![facet];
            let mut kept = Vec::with_capacity(queue.len());
            for other in queue.drain() {
                if other.facet.point_lies_below(&answer.point) {
                    visible.push(other.facet);
                } else {
                    kept.push(other);
                }
            }
            queue.extend(kept);

            for pierced in visible {
                for i in 0..d {
                    let mut vertices = pierced.vertices().to_vec();
                    vertices[i] = answer.clone();
                    Self::enqueue(Facet::from_vertices(vertices, true), &mut queue, &mut next_seq)?;
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::info!(points = result.len(), "approximation finished");
        Ok(result)
    }

    /// Queues a freshly built facet, discarding boundary facets.
    ///
    /// Facets whose bound computation reports an infinite ratio distance
    /// are boundary facets in disguise and are discarded the same way; all
    /// other construction errors are fatal.
    fn enqueue<S>(
        facet: Result<Facet<S>>,
        queue: &mut BinaryHeap<QueuedFacet<S>>,
        next_seq: &mut u64,
    ) -> Result<()> {
        match facet {
            Ok(facet) if !facet.is_boundary_facet() => {
                let bound = facet.local_error_upper_bound()?;
                queue.push(QueuedFacet {
                    bound,
                    seq: *next_seq,
                    facet,
                });
                *next_seq += 1;
            }
            Ok(_) | Err(Error::InfiniteRatioDistance) => {}
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Calls the oracle and validates its answer.
    ///
    /// The answer's weight field is overwritten with the weights actually
    /// used, so facet vertices always carry their true lower-bound
    /// hyperplanes.
    fn call_oracle<S, O>(&self, oracle: &mut O, weights: &[f64]) -> Result<PointAndSolution<S>>
    where
        O: ScalarizationOracle<S> + ?Sized,
    {
        let mut answer = oracle.comb(weights)?;
        if answer.point.dim() != self.dimension {
            return Err(Error::DifferentDimensions {
                expected: self.dimension,
                got: answer.point.dim(),
            });
        }
        answer.weights = weights.to_vec();

        #[cfg(feature = "tracing")]
        tracing::debug!(?weights, point = %answer.point, "oracle answered");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    #[test]
    fn test_new_validates_configuration() {
        assert!(ChordSolver::new(2, 0.0).is_ok());
        assert!(ChordSolver::new(1, 0.5).is_ok());
        assert!(matches!(
            ChordSolver::new(0, 0.0),
            Err(Error::UnsupportedDimension(0))
        ));
        assert!(matches!(
            ChordSolver::new(4, 0.0),
            Err(Error::UnsupportedDimension(4))
        ));
        assert!(matches!(
            ChordSolver::new(2, -0.1),
            Err(Error::NegativeApproximationRatio(_))
        ));
    }

    #[test]
    fn test_one_dimensional_problem_needs_one_call() {
        let mut calls = 0;
        let mut oracle = |weights: &[f64]| -> Result<PointAndSolution<()>> {
            calls += 1;
            Ok(PointAndSolution::new(Point::from([7.0]), (), weights.to_vec()))
        };
        let front = ChordSolver::new(1, 0.0)
            .unwrap()
            .approximate(&mut oracle)
            .unwrap();
        assert_eq!(calls, 1);
        assert_eq!(front.len(), 1);
        assert!(front.contains(&Point::from([7.0])));
    }

    #[test]
    fn test_collapsed_seeds_terminate_early() {
        // A single feasible point: both axis runs return it.
        let mut calls = 0;
        let mut oracle = |weights: &[f64]| -> Result<PointAndSolution<()>> {
            calls += 1;
            Ok(PointAndSolution::new(
                Point::from([3.0, 4.0]),
                (),
                weights.to_vec(),
            ))
        };
        let front = ChordSolver::new(2, 0.0)
            .unwrap()
            .approximate(&mut oracle)
            .unwrap();
        assert_eq!(calls, 2);
        assert_eq!(front.len(), 1);
    }

    #[test]
    fn test_oracle_failure_is_fatal() {
        let mut oracle = |_: &[f64]| -> Result<PointAndSolution<()>> {
            Err(Error::OracleFailure("no feasible solution".into()))
        };
        let result = ChordSolver::new(2, 0.0).unwrap().approximate(&mut oracle);
        assert!(matches!(result, Err(Error::OracleFailure(_))));
    }

    #[test]
    fn test_wrong_answer_dimension_is_fatal() {
        let mut oracle = |weights: &[f64]| -> Result<PointAndSolution<()>> {
            Ok(PointAndSolution::new(
                Point::from([1.0, 2.0, 3.0]),
                (),
                vec![weights[0], weights[1], 0.0],
            ))
        };
        let result = ChordSolver::new(2, 0.0).unwrap().approximate(&mut oracle);
        assert!(matches!(
            result,
            Err(Error::DifferentDimensions { expected: 2, got: 3 })
        ));
    }
}
