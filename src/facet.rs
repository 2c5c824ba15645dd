//! Simplicial facets of the lower-envelope polytope and their certified
//! approximation error bounds.
//!
//! A facet is spanned by exactly `d` oracle answers in `d`-dimensional
//! objective space. Each vertex `v_i` carries the weight vector `w_i` that
//! produced it, and the hyperplane `{ x : w_i · x = w_i · v_i }` is a lower
//! bound for the whole Pareto set — the oracle certified that no feasible
//! point lies below it. Where those `d` lower-bound hyperplanes intersect
//! in a unique point, that point is the facet's **lower distal point**
//! (LDP): the farthest point the facet's region of the Pareto set could
//! possibly reach. The ratio distance from the LDP up to the facet's
//! supporting hyperplane is therefore an upper bound on the facet's local
//! approximation error.
//!
//! A facet without a usable LDP (no unique intersection, or an LDP that is
//! not strictly positive, or affinely dependent vertices) is a **boundary
//! facet**: its error cannot be bounded this way and the driver excludes it
//! from refinement.
//!
//! # Example
//!
//! ```
//! use pareto_chord::{Facet, Point, PointAndSolution};
//!
//! // Two axis-optimal answers in 2D, found with weights (1,0) and (0,1).
//! let facet = Facet::from_vertices(
//!     vec![
//!         PointAndSolution::new(Point::from([1.0, 5.0]), (), vec![1.0, 0.0]),
//!         PointAndSolution::new(Point::from([5.0, 1.0]), (), vec![0.0, 1.0]),
//!     ],
//!     true,
//! )
//! .unwrap();
//!
//! // The lower-bound lines x = 1 and y = 1 meet in (1, 1).
//! assert_eq!(facet.lower_distal_point(), Some(&Point::from([1.0, 1.0])));
//! assert_eq!(facet.local_error_upper_bound().unwrap(), 2.0);
//! ```

use crate::error::{Error, Result};
use crate::linalg;
use crate::point::Point;
use crate::solution::PointAndSolution;

/// Bound sentinel: the LDP exists but is not strictly positive.
const BOUND_LDP_NOT_POSITIVE: f64 = -1.0;
/// Bound sentinel: no unique LDP exists (or the vertices are degenerate).
const BOUND_NO_UNIQUE_LDP: f64 = -2.0;

/// A `d`-vertex facet of the lower envelope in `d` dimensions.
///
/// The normal, the lower distal point, and the error bound are computed at
/// construction and immutable afterwards. A facet is either refinable
/// (strictly positive LDP and a finite bound) or a boundary facet.
#[derive(Clone, Debug)]
pub struct Facet<S> {
    vertices: Vec<PointAndSolution<S>>,
    normal: Vec<f64>,
    lower_distal_point: Option<Point>,
    local_error_upper_bound: f64,
    is_boundary: bool,
}

impl<S> Facet<S> {
    /// Creates a facet from its vertices, computing the outward normal.
    ///
    /// The normal comes from the hyperplane through the vertex points
    /// (generalized cross product). Of the two opposite normals through
    /// the same vertices, `prefer_nonnegative_normal` requests the one
    /// without negative components: if the flag is set and every computed
    /// component is `<= 0`, all signs are flipped. Affinely dependent
    /// vertices yield the all-zero normal and mark the facet boundary
    /// immediately.
    ///
    /// # Errors
    ///
    /// - [`Error::NullObject`] if `vertices` is empty.
    /// - [`Error::DifferentDimensions`] if the facet is not simplicial
    ///   (vertex count != dimension) or a vertex or its weight vector has
    ///   the wrong dimension.
    /// - [`Error::InfiniteRatioDistance`] if the LDP exists, is strictly
    ///   positive, but lies in a direction perpendicular to the normal;
    ///   callers treat such a facet as a boundary facet.
    pub fn from_vertices(
        vertices: Vec<PointAndSolution<S>>,
        prefer_nonnegative_normal: bool,
    ) -> Result<Self> {
        Self::validate(&vertices)?;

        let rows: Vec<Vec<f64>> = vertices
            .iter()
            .map(|v| v.point.coordinates().to_vec())
            .collect();
        let mut normal = linalg::facet_normal(&rows);
        if prefer_nonnegative_normal && normal.iter().all(|&c| c <= 0.0) {
            reverse_sign(&mut normal);
        }
        Self::build(vertices, normal)
    }

    /// Creates a facet from its vertices and an already-known normal.
    ///
    /// The normal is trusted; the driver uses this when it knows the
    /// outward direction (e.g. the mean of the seed weight vectors for the
    /// initial facet).
    ///
    /// # Errors
    ///
    /// Same as [`from_vertices`](Self::from_vertices), plus
    /// [`Error::DifferentDimensions`] if the normal's length does not match
    /// the vertex dimension.
    pub fn with_normal(vertices: Vec<PointAndSolution<S>>, normal: Vec<f64>) -> Result<Self> {
        let d = Self::validate(&vertices)?;
        if normal.len() != d {
            return Err(Error::DifferentDimensions {
                expected: d,
                got: normal.len(),
            });
        }
        Self::build(vertices, normal)
    }

    /// Checks the simplicial-facet preconditions; returns the dimension.
    fn validate(vertices: &[PointAndSolution<S>]) -> Result<usize> {
        let first = vertices.first().ok_or(Error::NullObject)?;
        let d = first.dim();
        for v in vertices {
            if v.dim() != d {
                return Err(Error::DifferentDimensions {
                    expected: d,
                    got: v.dim(),
                });
            }
            if v.weights.len() != d {
                return Err(Error::DifferentDimensions {
                    expected: d,
                    got: v.weights.len(),
                });
            }
        }
        if vertices.len() != d {
            return Err(Error::DifferentDimensions {
                expected: d,
                got: vertices.len(),
            });
        }
        Ok(d)
    }

    /// Computes the LDP and classifies the facet.
    fn build(vertices: Vec<PointAndSolution<S>>, normal: Vec<f64>) -> Result<Self> {
        let mut facet = Self {
            vertices,
            normal,
            lower_distal_point: None,
            local_error_upper_bound: BOUND_NO_UNIQUE_LDP,
            is_boundary: true,
        };
        if facet.normal.iter().all(|&c| linalg::approx_zero(c)) {
            return Ok(facet);
        }
        if let Some(ldp) = Self::solve_lower_distal_point(&facet.vertices) {
            if ldp.is_strictly_positive() {
                facet.local_error_upper_bound = facet.ratio_distance(&ldp)?;
                facet.is_boundary = false;
            } else {
                facet.local_error_upper_bound = BOUND_LDP_NOT_POSITIVE;
            }
            facet.lower_distal_point = Some(ldp);
        }
        Ok(facet)
    }

    /// Intersects the vertices' lower-bound hyperplanes.
    ///
    /// Solves `W x = c` where row `i` of `W` is the weight vector of vertex
    /// `i` and `c_i = w_i · v_i`. `None` when no unique solution exists.
    fn solve_lower_distal_point(vertices: &[PointAndSolution<S>]) -> Option<Point> {
        let rows: Vec<Vec<f64>> = vertices.iter().map(|v| v.weights.clone()).collect();
        let rhs: Vec<f64> = vertices
            .iter()
            .map(|v| linalg::dot(&v.weights, v.point.coordinates()))
            .collect();
        linalg::solve(&rows, &rhs).map(Point::new)
    }

    /// Returns the dimension of the space the facet lives in.
    #[must_use]
    pub fn space_dimension(&self) -> usize {
        self.normal.len()
    }

    /// Returns the facet's vertices in insertion order.
    #[must_use]
    pub fn vertices(&self) -> &[PointAndSolution<S>] {
        &self.vertices
    }

    /// Returns the facet's normal vector.
    #[must_use]
    pub fn normal(&self) -> &[f64] {
        &self.normal
    }

    /// Returns a copy of the normal scaled to unit 2-norm.
    #[must_use]
    pub fn normalized_normal(&self) -> Vec<f64> {
        linalg::normalized(&self.normal)
    }

    /// Returns `true` if the facet has no usable lower distal point.
    #[must_use]
    pub fn is_boundary_facet(&self) -> bool {
        self.is_boundary
    }

    /// Returns the facet's lower distal point, if a unique one exists.
    #[must_use]
    pub fn lower_distal_point(&self) -> Option<&Point> {
        self.lower_distal_point.as_ref()
    }

    /// Returns the upper bound on the facet's local approximation error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BoundaryFacet`] if the facet is a boundary facet.
    pub fn local_error_upper_bound(&self) -> Result<f64> {
        if self.is_boundary {
            return Err(Error::BoundaryFacet);
        }
        Ok(self.local_error_upper_bound)
    }

    /// Elementwise mean of the vertices' weight vectors.
    ///
    /// The driver falls back to this direction when the raw normal is
    /// unsuitable as oracle weights (contains non-positive components).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_vertex_weights(&self) -> Vec<f64> {
        let d = self.space_dimension();
        let mut mean = vec![0.0; d];
        for v in &self.vertices {
            for (m, &w) in mean.iter_mut().zip(&v.weights) {
                *m += w;
            }
        }
        for m in &mut mean {
            *m /= d as f64;
        }
        mean
    }

    /// Returns `true` if no normal component is negative.
    #[must_use]
    pub fn has_all_normal_nonnegative(&self) -> bool {
        self.normal.iter().all(|&c| c >= 0.0)
    }

    /// Returns `true` if no normal component is positive.
    #[must_use]
    pub fn has_all_normal_nonpositive(&self) -> bool {
        self.normal.iter().all(|&c| c <= 0.0)
    }

    /// The supporting hyperplane's offset, `normal · v_0`.
    fn offset(&self) -> f64 {
        linalg::dot(&self.normal, self.vertices[0].point.coordinates())
    }

    /// Computes the ratio distance from `p` to the supporting hyperplane.
    ///
    /// `max(0, (offset - normal·p) / (normal·p))` with
    /// `offset = normal · v_0`: the smallest ε >= 0 such that some point on
    /// the supporting hyperplane ε-covers `p`. Points on the hyperplane are
    /// at distance 0.
    ///
    /// # Errors
    ///
    /// - [`Error::DifferentDimensions`] if the dimensions differ.
    /// - [`Error::NotStrictlyPositivePoint`] if `p` is not strictly
    ///   positive.
    /// - [`Error::InfiniteRatioDistance`] if `normal·p = 0` while `p` is
    ///   not on the hyperplane (scaling `p` only moves it parallel to the
    ///   hyperplane).
    pub fn ratio_distance(&self, p: &Point) -> Result<f64> {
        if p.dim() != self.space_dimension() {
            return Err(Error::DifferentDimensions {
                expected: self.space_dimension(),
                got: p.dim(),
            });
        }
        if !p.is_strictly_positive() {
            return Err(Error::NotStrictlyPositivePoint);
        }

        let product = linalg::dot(&self.normal, p.coordinates());
        let offset = self.offset();
        if linalg::approx_eq(product, offset) {
            return Ok(0.0);
        }
        if linalg::approx_zero(product) {
            return Err(Error::InfiniteRatioDistance);
        }
        Ok(((offset - product) / product).max(0.0))
    }

    /// Returns `true` if `p` lies strictly below the supporting hyperplane
    /// (`normal · p < offset`), i.e. the facet is visible from `p` and must
    /// be retriangulated once `p` joins the polytope.
    #[must_use]
    pub fn point_lies_below(&self, p: &Point) -> bool {
        debug_assert_eq!(p.dim(), self.space_dimension());
        let product = linalg::dot(&self.normal, p.coordinates());
        let offset = self.offset();
        product < offset && !linalg::approx_eq(product, offset)
    }
}

/// Flips the sign of every component, switching between the two opposite
/// normals through the same vertices.
fn reverse_sign(normal: &mut [f64]) {
    for c in normal {
        *c = -*c;
    }
}
