//! Small dense linear-algebra helpers for the geometric core.
//!
//! Everything here operates on tiny systems (the objective space dimension
//! is at most 3), so the nalgebra types never leave this module.

use nalgebra::{DMatrix, DVector};

/// Tolerance for near-equality decisions on coordinates and coefficients.
pub(crate) const COMPARISON_TOLERANCE: f64 = 1e-9;

/// Tolerance below which a determinant counts as singular.
const SINGULARITY_TOLERANCE: f64 = 1e-10;

/// Absolute-or-relative near-equality under [`COMPARISON_TOLERANCE`].
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= COMPARISON_TOLERANCE * 1.0_f64.max(a.abs()).max(b.abs())
}

/// Returns `true` if `x` is within [`COMPARISON_TOLERANCE`] of zero.
pub(crate) fn approx_zero(x: f64) -> bool {
    x.abs() <= COMPARISON_TOLERANCE
}

/// Dot product of two equal-length slices.
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(&x, &y)| x * y).sum()
}

/// Euclidean (2-)norm.
pub(crate) fn l2_norm(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}

/// Returns a copy of `v` scaled to unit 2-norm.
///
/// A vector with (near-)zero norm is returned unchanged; the callers treat
/// such vectors as degenerate before ever normalizing them.
pub(crate) fn normalized(v: &[f64]) -> Vec<f64> {
    let norm = l2_norm(v);
    if approx_zero(norm) {
        return v.to_vec();
    }
    v.iter().map(|&x| x / norm).collect()
}

/// Determinant of a square matrix given as rows.
pub(crate) fn determinant(rows: &[Vec<f64>]) -> f64 {
    let n = rows.len();
    debug_assert!(rows.iter().all(|r| r.len() == n));
    DMatrix::from_fn(n, n, |r, c| rows[r][c]).determinant()
}

/// Solves the square system `rows * x = rhs`.
///
/// Returns `None` when the system has no unique solution (the coefficient
/// matrix is singular under [`SINGULARITY_TOLERANCE`]).
pub(crate) fn solve(rows: &[Vec<f64>], rhs: &[f64]) -> Option<Vec<f64>> {
    let n = rows.len();
    debug_assert_eq!(rhs.len(), n);
    debug_assert!(rows.iter().all(|r| r.len() == n));

    if determinant(rows).abs() <= SINGULARITY_TOLERANCE {
        return None;
    }
    let matrix = DMatrix::from_fn(n, n, |r, c| rows[r][c]);
    let solution = matrix.lu().solve(&DVector::from_column_slice(rhs))?;
    Some(solution.iter().copied().collect())
}

/// Normal vector of the hyperplane through `d` points in `d` dimensions.
///
/// `rows` holds one point per row. Component `i` of the normal is the
/// determinant of the coordinate matrix with column `i` replaced by ones
/// (the generalized cross product, evaluated by column replacement in the
/// `d x (d+1)` matrix of coordinates augmented with a ones column).
///
/// Affinely dependent points yield the all-zero vector; callers treat that
/// as the degenerate case.
pub(crate) fn facet_normal(rows: &[Vec<f64>]) -> Vec<f64> {
    let d = rows.len();
    debug_assert!(rows.iter().all(|r| r.len() == d));

    (0..d)
        .map(|i| {
            let replaced: Vec<Vec<f64>> = rows
                .iter()
                .map(|row| {
                    let mut row = row.clone();
                    row[i] = 1.0;
                    row
                })
                .collect();
            determinant(&replaced)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinant_2x2() {
        let rows = vec![vec![2.0, 3.0], vec![5.0, 1.0]];
        assert!(approx_eq(determinant(&rows), -13.0));
    }

    #[test]
    fn test_determinant_3x3() {
        let rows = vec![
            vec![1.0, 2.0, 3.0],
            vec![0.0, 1.0, 4.0],
            vec![5.0, 6.0, 0.0],
        ];
        assert!(approx_eq(determinant(&rows), 1.0));
    }

    #[test]
    fn test_solve_unique() {
        // x + y = 3, x - y = 1  =>  (2, 1)
        let rows = vec![vec![1.0, 1.0], vec![1.0, -1.0]];
        let x = solve(&rows, &[3.0, 1.0]).unwrap();
        assert!(approx_eq(x[0], 2.0));
        assert!(approx_eq(x[1], 1.0));
    }

    #[test]
    fn test_solve_identity_3d() {
        let rows = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        let x = solve(&rows, &[4.0, 5.0, 6.0]).unwrap();
        assert_eq!(x, vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_solve_singular() {
        let rows = vec![vec![1.0, 1.0], vec![2.0, 2.0]];
        assert!(solve(&rows, &[1.0, 2.0]).is_none());
    }

    #[test]
    fn test_facet_normal_line() {
        // Line through (2, 3) and (5, 1): normal (y2 - y1, x1 - x2).
        let rows = vec![vec![2.0, 3.0], vec![5.0, 1.0]];
        let n = facet_normal(&rows);
        assert!(approx_eq(n[0], -2.0));
        assert!(approx_eq(n[1], -3.0));
    }

    #[test]
    fn test_facet_normal_unit_simplex() {
        let rows = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        let n = facet_normal(&rows);
        assert!(approx_eq(n[0], 1.0));
        assert!(approx_eq(n[1], 1.0));
        assert!(approx_eq(n[2], 1.0));
    }

    #[test]
    fn test_facet_normal_collinear_is_zero() {
        let rows = vec![
            vec![1.0, 2.0, 3.0],
            vec![2.0, 2.0, 2.0],
            vec![3.0, 2.0, 1.0],
        ];
        let n = facet_normal(&rows);
        assert!(n.iter().all(|&c| approx_zero(c)));
    }

    #[test]
    fn test_l2_norm_and_normalized() {
        assert!(approx_eq(l2_norm(&[3.0, 4.0]), 5.0));
        let unit = normalized(&[3.0, 4.0]);
        assert!(approx_eq(unit[0], 0.6));
        assert!(approx_eq(unit[1], 0.8));
        assert!(approx_eq(l2_norm(&unit), 1.0));
    }
}
