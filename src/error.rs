#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when two objects live in spaces of different dimensions.
    #[error("dimension mismatch: expected {expected} dimensions but got {got}")]
    DifferentDimensions {
        /// The dimension of the object the operation was called on.
        expected: usize,
        /// The dimension of the offending argument.
        got: usize,
    },

    /// Returned when a point coordinate index is out of bounds.
    #[error("coordinate {index} does not exist: point has {dimension} dimensions")]
    NonExistentCoordinate {
        /// The requested coordinate index.
        index: usize,
        /// The point's dimension.
        dimension: usize,
    },

    /// Returned when a hyperplane coefficient index is out of bounds.
    #[error("coefficient {index} does not exist: hyperplane has {dimension} coefficients")]
    NonExistentCoefficient {
        /// The requested coefficient index.
        index: usize,
        /// The hyperplane's space dimension.
        dimension: usize,
    },

    /// Returned when an empty object was supplied where a value was required.
    #[error("empty object where a value was required")]
    NullObject,

    /// Returned when a line was requested through two equal points.
    #[error("cannot construct a line through two equal points")]
    SamePoints,

    /// Returned when a 2D-only construction received non-2D points.
    #[error("operation requires 2-dimensional points")]
    Not2DPoints,

    /// Returned when a 2D-only hyperplane operation received non-2D hyperplanes.
    #[error("operation requires 2-dimensional hyperplanes (lines)")]
    Not2DHyperplanes,

    /// Returned when intersecting hyperplanes that are parallel (or equal).
    #[error("hyperplanes are parallel and do not intersect in a unique point")]
    ParallelHyperplanes,

    /// Returned when asking a boundary facet for its approximation error bound.
    #[error("facet is a boundary facet and has no approximation error bound")]
    BoundaryFacet,

    /// Returned when a ratio distance is unbounded (the point's coordinate
    /// vector is perpendicular to the hyperplane's normal).
    #[error("ratio distance is infinite")]
    InfiniteRatioDistance,

    /// Returned when an approximation ratio is negative.
    #[error("invalid approximation ratio: {0} must be non-negative")]
    NegativeApproximationRatio(f64),

    /// Returned when a domination test received a point with negative
    /// coordinates.
    #[error("domination requires points with non-negative coordinates")]
    NotPositivePoint,

    /// Returned when a ratio-distance computation received a point that is
    /// not strictly positive.
    #[error("ratio distance requires a strictly positive point")]
    NotStrictlyPositivePoint,

    /// Returned when the scalarization oracle fails (e.g., the problem has
    /// no feasible solution).
    #[error("scalarization oracle failed: {0}")]
    OracleFailure(String),

    /// Returned when a solver is configured with an unsupported objective
    /// space dimension.
    #[error("unsupported objective space dimension: {0} (must be 1, 2 or 3)")]
    UnsupportedDimension(usize),

    /// Returned when parsing a point from its textual form fails.
    #[error("malformed point literal: {0:?}")]
    ParsePoint(String),
}

pub type Result<T> = core::result::Result<T, Error>;
