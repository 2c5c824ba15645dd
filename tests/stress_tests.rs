//! Randomized stress tests for the approximation driver, with seeded RNGs
//! for reproducibility.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pareto_chord::{ChordSolver, Point, PointAndSolution, Result, ScalarizationOracle};

/// Minimizes `weights · p` over a fixed candidate list, breaking cost ties
/// towards the lexicographically smallest candidate.
struct DiscreteOracle {
    candidates: Vec<Point>,
    calls: usize,
}

impl ScalarizationOracle<usize> for DiscreteOracle {
    fn comb(&mut self, weights: &[f64]) -> Result<PointAndSolution<usize>> {
        self.calls += 1;
        let cost = |p: &Point| -> f64 {
            weights.iter().zip(p.coordinates()).map(|(w, c)| w * c).sum()
        };
        let mut best = 0;
        for i in 1..self.candidates.len() {
            let (a, b) = (cost(&self.candidates[i]), cost(&self.candidates[best]));
            if a < b - 1e-9 || ((a - b).abs() <= 1e-9 && self.candidates[i] < self.candidates[best])
            {
                best = i;
            }
        }
        Ok(PointAndSolution::new(
            self.candidates[best].clone(),
            best,
            weights.to_vec(),
        ))
    }
}

fn random_candidates(rng: &mut StdRng, n: usize, d: usize) -> Vec<Point> {
    (0..n)
        .map(|_| (0..d).map(|_| rng.gen_range(1.0..10.0)).collect())
        .collect()
}

/// Vertices of the south-west chain of the lower convex hull: exactly the
/// points a linear scalarization can return under positive weights.
fn lower_left_hull(candidates: &[Point]) -> Vec<Point> {
    let coord = |p: &Point, i: usize| p.coord(i).unwrap();
    let mut pts = candidates.to_vec();
    pts.sort_by(|a, b| a.lex_cmp(b).unwrap());

    // Andrew's monotone chain, lower hull only.
    let mut hull: Vec<Point> = Vec::new();
    for p in &pts {
        while hull.len() >= 2 {
            let a = &hull[hull.len() - 2];
            let b = &hull[hull.len() - 1];
            let cross = (coord(b, 0) - coord(a, 0)) * (coord(p, 1) - coord(a, 1))
                - (coord(b, 1) - coord(a, 1)) * (coord(p, 0) - coord(a, 0));
            if cross <= 0.0 {
                hull.pop();
            } else {
                break;
            }
        }
        hull.push(p.clone());
    }

    // Keep the strictly decreasing-y prefix; hull vertices past the
    // y-minimum are dominated and unreachable for positive weights.
    let mut chain: Vec<Point> = Vec::new();
    for p in hull {
        if chain
            .last()
            .is_none_or(|last| coord(&p, 1) < coord(last, 1))
        {
            chain.push(p);
        } else {
            break;
        }
    }
    chain
}

fn front_points(front: impl IntoIterator<Item = PointAndSolution<usize>>) -> Vec<Point> {
    let mut points: Vec<Point> = front.into_iter().map(|e| e.point).collect();
    points.sort_by(|a, b| a.lex_cmp(b).unwrap());
    points
}

#[test]
fn test_2d_exact_run_recovers_the_lower_hull() {
    for seed in [7_u64, 21, 1234, 98765] {
        let mut rng = StdRng::seed_from_u64(seed);
        let candidates = random_candidates(&mut rng, 12, 2);
        let mut oracle = DiscreteOracle {
            candidates: candidates.clone(),
            calls: 0,
        };

        let front = ChordSolver::new(2, 0.0)
            .unwrap()
            .approximate(&mut oracle)
            .unwrap();
        let result = front_points(front);
        let expected = lower_left_hull(&candidates);

        assert_eq!(result, expected, "seed {seed}");
        // Each hull vertex costs at most one discovery probe plus one
        // finalizing probe per incident chord.
        assert!(
            oracle.calls <= 4 * expected.len() + 4,
            "seed {seed}: {} oracle calls for {} hull vertices",
            oracle.calls,
            expected.len()
        );
    }
}

#[test]
fn test_2d_tolerant_run_returns_hull_subset() {
    for seed in [3_u64, 5, 77] {
        let mut rng = StdRng::seed_from_u64(seed);
        let candidates = random_candidates(&mut rng, 16, 2);
        let mut oracle = DiscreteOracle {
            candidates: candidates.clone(),
            calls: 0,
        };

        let front = ChordSolver::new(2, 0.25)
            .unwrap()
            .approximate(&mut oracle)
            .unwrap();
        let hull = lower_left_hull(&candidates);

        assert!(!front.is_empty());
        for answer in front.iter() {
            // Everything returned is a supported Pareto point.
            assert!(hull.contains(&answer.point), "seed {seed}");
            assert!(answer.point.is_strictly_positive());
        }
        for a in front.iter() {
            for b in front.iter() {
                if a.point != b.point {
                    assert!(!a.point.dominates(&b.point, 0.0).unwrap(), "seed {seed}");
                }
            }
        }
        // The axis extremes always survive seeding.
        assert!(front.contains(&hull[0]), "seed {seed}");
        assert!(front.contains(&hull[hull.len() - 1]), "seed {seed}");
    }
}

#[test]
fn test_3d_runs_keep_the_set_invariants() {
    for seed in [11_u64, 42] {
        let mut rng = StdRng::seed_from_u64(seed);
        let candidates = random_candidates(&mut rng, 9, 3);

        for tolerance in [0.0, 0.3] {
            let mut oracle = DiscreteOracle {
                candidates: candidates.clone(),
                calls: 0,
            };
            let front = ChordSolver::new(3, tolerance)
                .unwrap()
                .approximate(&mut oracle)
                .unwrap();

            assert!(!front.is_empty());
            for answer in front.iter() {
                assert_eq!(answer.point.dim(), 3);
                assert!(answer.point.is_strictly_positive());
                assert!(
                    candidates.contains(&answer.point),
                    "seed {seed}: foreign point {}",
                    answer.point
                );
            }
            for a in front.iter() {
                for b in front.iter() {
                    if a.point != b.point {
                        assert!(
                            !a.point.dominates(&b.point, 0.0).unwrap(),
                            "seed {seed}: {} dominates {}",
                            a.point,
                            b.point
                        );
                    }
                }
            }

            // The per-axis minimizers are unique for random reals, so each
            // seed is undominated and must survive into the result.
            for axis in 0..3 {
                let extreme = candidates
                    .iter()
                    .min_by(|a, b| a.coord(axis).unwrap().total_cmp(&b.coord(axis).unwrap()))
                    .unwrap();
                assert!(front.contains(extreme), "seed {seed}: axis {axis}");
            }
            assert!(oracle.calls < 500, "seed {seed}: runaway refinement");
        }
    }
}
