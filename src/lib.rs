//! Approximate Pareto sets for multi-objective optimization problems.
//!
//! This library implements a multi-dimensional generalization of the
//! **chord algorithm**: given a black-box [`ScalarizationOracle`] that can
//! minimize any non-negative weighting of the objectives, it computes a set
//! of feasible points that approximates the problem's Pareto set to within
//! a user-chosen **ratio tolerance** ε — every point the oracle can produce
//! is ε-covered by some returned point.
//!
//! The algorithm maintains the convex lower envelope of the oracle answers
//! seen so far. Each facet of that envelope knows an upper bound on its
//! local approximation error, certified by its [lower distal
//! point](Facet::lower_distal_point): the intersection of the lower-bound
//! hyperplanes the oracle guaranteed when it produced the facet's vertices.
//! The facet with the worst bound is refined first, so oracle calls go
//! where they help the most and the run stops as soon as every facet is
//! within tolerance.
//!
//! # Quick start
//!
//! ```
//! use pareto_chord::{ChordSolver, Point, PointAndSolution, Result};
//!
//! // A tiny discrete biobjective problem: three candidate plans.
//! let feasible = [
//!     Point::from([1.0, 5.0]),
//!     Point::from([2.0, 3.0]),
//!     Point::from([5.0, 1.0]),
//! ];
//!
//! // The scalarization oracle: minimize weights · objectives, breaking
//! // ties towards the lexicographically smallest point.
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
//! // With tolerance 0 the whole supported Pareto set is recovered.
//! let solver = ChordSolver::new(2, 0.0)?;
//! let front = solver.approximate(&mut oracle)?;
//! assert_eq!(front.len(), 3);
//!
//! // A coarser tolerance keeps only the seeds: the interior point is
//! // already 1-covered by them.
//! let coarse = ChordSolver::new(2, 1.0)?.approximate(&mut oracle)?;
//! assert_eq!(coarse.len(), 2);
//! # Ok::<(), pareto_chord::Error>(())
//! ```
//!
//! # Providing an oracle
//!
//! Anything implementing [`ScalarizationOracle`] works; closures implement
//! it directly. For combinatorial problems the oracle typically runs a
//! single-objective solver (shortest path, matching, ...) on the
//! weight-combined costs and returns the solution alongside its objective
//! vector. The solution payload type `S` travels with each point, so the
//! returned [`NonDominatedSet`] pairs every Pareto point with a concrete
//! solution achieving it.
//!
//! # Scope and limits
//!
//! - Objective space dimension 1, 2 or 3.
//! - Final Pareto points must be strictly positive (the ratio distance is
//!   only meaningful there); intermediate scalarizations may be negative.
//! - The approximation covers the *supported* Pareto points — those
//!   attainable as minimizers of some non-negative weighting. Points
//!   inside a concavity of the front cannot be produced by any linear
//!   scalarization oracle.
//!
//! # Feature flags
//!
//! - `serde`: `Serialize`/`Deserialize` for points, hyperplanes, oracle
//!   answers and result sets.
//! - `tracing`: spans and events for each run, oracle call and accepted
//!   point.

mod chord;
mod error;
mod facet;
mod hyperplane;
mod linalg;
mod nondominated;
mod point;
mod solution;

pub use chord::{ChordSolver, ScalarizationOracle};
pub use error::{Error, Result};
pub use facet::Facet;
pub use hyperplane::Hyperplane;
pub use nondominated::{NonDominatedSet, ParetoElement};
pub use point::Point;
pub use solution::PointAndSolution;
