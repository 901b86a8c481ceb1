//! Nelder-Mead simplex optimization
//!
//! The Nelder-Mead algorithm is a derivative-free local method. It keeps a
//! simplex of N+1 points in N-dimensional space and reflects, expands,
//! contracts or shrinks it toward lower objective values. As an island
//! algorithm it starts from a random point of the box, so an archipelago of
//! simplex islands behaves like a multi-start local search.

use rand::SeedableRng;

use super::bounds::Bounds;
use super::config::ArchipelagoConfig;
use super::improves;
use super::result::{ConvergenceHistory, IslandChampion, TerminationReason};
use super::Problem;

/// Standard Nelder-Mead coefficients
const REFLECTION_COEF: f64 = 1.0;
const EXPANSION_COEF: f64 = 2.0;
const CONTRACTION_COEF: f64 = 0.5;
const SHRINK_COEF: f64 = 0.5;

/// Initial step along each axis as a fraction of the dimension's width
const INITIAL_STEP: f64 = 0.1;

/// A point in parameter space with its objective value
#[derive(Clone)]
struct SimplexVertex {
    values: Vec<f64>,
    objective: f64,
}

/// Best first, worst last; NaN sorts after every number
fn sort_simplex(simplex: &mut [SimplexVertex]) {
    simplex.sort_by(|a, b| {
        if improves(a.objective, b.objective) {
            std::cmp::Ordering::Less
        } else if improves(b.objective, a.objective) {
            std::cmp::Ordering::Greater
        } else {
            std::cmp::Ordering::Equal
        }
    });
}

/// Initialize the simplex around `start` with N+1 points
fn initialize_simplex<P: Problem + ?Sized>(
    problem: &P,
    start: Vec<f64>,
    evaluations: &mut usize,
) -> Vec<SimplexVertex> {
    let bounds = problem.bounds();
    let n = start.len();
    let mut simplex = Vec::with_capacity(n + 1);

    // Create n additional points by perturbing each dimension
    for i in 0..n {
        let mut point = start.clone();
        let (min, max) = (bounds.lower()[i], bounds.upper()[i]);
        let step = INITIAL_STEP * (max - min);

        if point[i] + step <= max {
            point[i] += step;
        } else {
            point[i] -= step;
        }

        let objective = problem.fitness(&point);
        simplex.push(SimplexVertex {
            values: point,
            objective,
        });
    }

    let objective = problem.fitness(&start);
    simplex.insert(
        0,
        SimplexVertex {
            values: start,
            objective,
        },
    );
    *evaluations += n + 1;

    simplex
}

/// Calculate the centroid of all points except the worst
fn centroid(simplex: &[SimplexVertex]) -> Vec<f64> {
    let n = simplex[0].values.len();
    let mut center = vec![0.0; n];

    // Exclude the last (worst) point
    for vertex in simplex.iter().take(simplex.len() - 1) {
        for (i, val) in vertex.values.iter().enumerate() {
            center[i] += val;
        }
    }

    let count = (simplex.len() - 1) as f64;
    for val in &mut center {
        *val /= count;
    }

    center
}

/// Move `point` through the centroid: `c + coef * (c - p)`
fn reflect(point: &[f64], centroid: &[f64], coef: f64, bounds: &Bounds) -> Vec<f64> {
    let mut moved: Vec<f64> = point
        .iter()
        .zip(centroid.iter())
        .map(|(p, c)| c + coef * (c - p))
        .collect();
    bounds.clamp(&mut moved);
    moved
}

/// Calculate simplex size (max distance from centroid)
fn simplex_size(simplex: &[SimplexVertex], centroid: &[f64]) -> f64 {
    simplex
        .iter()
        .map(|v| {
            v.values
                .iter()
                .zip(centroid.iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .fold(0.0_f64, |a, b| a.max(b))
}

/// Run a Nelder-Mead island from a random starting point
///
/// # Arguments
/// * `problem` - Problem to minimize
/// * `config` - `generations` caps the iterations, `tolerance` the simplex size
/// * `island` - Position of this island, copied into the champion
/// * `seed` - Seed used to draw the starting point
pub fn minimize_nelder_mead<P: Problem + ?Sized>(
    problem: &P,
    config: &ArchipelagoConfig,
    island: usize,
    seed: u64,
) -> IslandChampion {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
    let bounds = problem.bounds();
    let start = bounds.sample(&mut rng);

    let mut evaluations = 0;
    let mut simplex = initialize_simplex(problem, start, &mut evaluations);
    let mut history = ConvergenceHistory::new();
    let mut termination_reason = TerminationReason::GenerationLimit;

    for _ in 0..config.generations {
        sort_simplex(&mut simplex);
        history.record(simplex[0].objective);

        let cent = centroid(&simplex);
        if simplex_size(&simplex, &cent) < config.tolerance {
            termination_reason = TerminationReason::Converged;
            break;
        }

        let worst_idx = simplex.len() - 1;
        let best_objective = simplex[0].objective;
        let second_worst_objective = simplex[worst_idx - 1].objective;
        let worst_objective = simplex[worst_idx].objective;
        let worst_values = simplex[worst_idx].values.clone();

        // Try reflection
        let reflected = reflect(&worst_values, &cent, REFLECTION_COEF, bounds);
        let reflected_obj = problem.fitness(&reflected);
        evaluations += 1;

        if improves(reflected_obj, best_objective) {
            // Reflected is best so far - try expansion
            let expanded = reflect(&worst_values, &cent, EXPANSION_COEF, bounds);
            let expanded_obj = problem.fitness(&expanded);
            evaluations += 1;

            simplex[worst_idx] = if improves(expanded_obj, reflected_obj) {
                SimplexVertex {
                    values: expanded,
                    objective: expanded_obj,
                }
            } else {
                SimplexVertex {
                    values: reflected,
                    objective: reflected_obj,
                }
            };
        } else if improves(reflected_obj, second_worst_objective) {
            simplex[worst_idx] = SimplexVertex {
                values: reflected,
                objective: reflected_obj,
            };
        } else {
            // Contract toward the better of reflected and worst
            let contract_point = if improves(reflected_obj, worst_objective) {
                &reflected
            } else {
                &worst_values
            };
            let contracted = reflect(contract_point, &cent, -CONTRACTION_COEF, bounds);
            let contracted_obj = problem.fitness(&contracted);
            evaluations += 1;

            if improves(contracted_obj, worst_objective) {
                simplex[worst_idx] = SimplexVertex {
                    values: contracted,
                    objective: contracted_obj,
                };
            } else {
                // Shrink the simplex toward the best point
                let best_values = simplex[0].values.clone();
                for vertex in simplex.iter_mut().skip(1) {
                    let mut shrunk: Vec<f64> = best_values
                        .iter()
                        .zip(vertex.values.iter())
                        .map(|(b, v)| b + SHRINK_COEF * (v - b))
                        .collect();
                    bounds.clamp(&mut shrunk);
                    vertex.objective = problem.fitness(&shrunk);
                    vertex.values = shrunk;
                    evaluations += 1;
                }
            }
        }
    }

    sort_simplex(&mut simplex);
    let best = simplex.swap_remove(0);

    IslandChampion {
        island,
        seed,
        parameter_values: best.values,
        objective_value: best.objective,
        evaluations,
        termination_reason,
        history,
    }
}
