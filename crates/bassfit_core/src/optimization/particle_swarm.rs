//! Particle swarm optimization
//!
//! Canonical swarm with a constriction factor: every particle keeps its own
//! best position and is pulled toward it and toward the best position of its
//! neighbourhood. Velocities are capped per dimension and particles that
//! leave the box are put back on the violated bound with zero velocity.
//!
//! Positions and velocities are stored in flat row-major buffers
//! (`particle * dim + d`) so a generation does not allocate.

use rand::{Rng, SeedableRng};

use super::config::{ArchipelagoConfig, Topology};
use super::improves;
use super::result::{ConvergenceHistory, IslandChampion, TerminationReason};
use super::Problem;

/// Index of the lowest value; ties go to the first
fn argmin(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, value) in values.iter().enumerate().skip(1) {
        if improves(*value, values[best]) {
            best = i;
        }
    }
    best
}

/// Best personal-best index inside each particle's neighbourhood
fn neighbourhood_bests(topology: Topology, pbest_f: &[f64], out: &mut [usize]) {
    let n = pbest_f.len();
    match topology {
        Topology::Global => {
            let best = argmin(pbest_f);
            out.fill(best);
        }
        Topology::Ring { neighbours } => {
            let radius = (neighbours / 2).max(1).min(n / 2);
            for (i, slot) in out.iter_mut().enumerate() {
                let mut best = i;
                for offset in 1..=radius {
                    for j in [(i + offset) % n, (i + n - offset) % n] {
                        if improves(pbest_f[j], pbest_f[best]) {
                            best = j;
                        }
                    }
                }
                *slot = best;
            }
        }
    }
}

/// Run one particle swarm island
///
/// # Arguments
/// * `problem` - Problem to minimize
/// * `config` - Archipelago configuration (population, generations, PSO
///   coefficients)
/// * `island` - Position of this island, copied into the champion
/// * `seed` - Seed of the island's random stream
pub fn minimize_particle_swarm<P: Problem + ?Sized>(
    problem: &P,
    config: &ArchipelagoConfig,
    island: usize,
    seed: u64,
) -> IslandChampion {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
    let settings = &config.pso;
    let bounds = problem.bounds();
    let lower = bounds.lower();
    let upper = bounds.upper();
    let dim = bounds.dimension();
    let np = config.population_size.max(2);

    let vmax: Vec<f64> = bounds.widths().map(|w| w * settings.max_velocity).collect();

    // Initial swarm
    let mut x = vec![0.0; np * dim];
    let mut v = vec![0.0; np * dim];
    for i in 0..np {
        for d in 0..dim {
            x[i * dim + d] = lower[d] + rng.random::<f64>() * (upper[d] - lower[d]);
            v[i * dim + d] = (2.0 * rng.random::<f64>() - 1.0) * vmax[d];
        }
    }

    let mut fitness: Vec<f64> = x.chunks_exact(dim).map(|p| problem.fitness(p)).collect();
    let mut evaluations = np;

    let mut pbest = x.clone();
    let mut pbest_f = fitness.clone();
    let mut neighbours = vec![0usize; np];

    let mut history = ConvergenceHistory::new();
    let mut best_f = pbest_f[argmin(&pbest_f)];
    let mut stalled_for = 0usize;
    let mut termination_reason = TerminationReason::GenerationLimit;

    for _generation in 0..config.generations {
        neighbourhood_bests(settings.topology, &pbest_f, &mut neighbours);

        for i in 0..np {
            let nb = neighbours[i];
            for d in 0..dim {
                let k = i * dim + d;
                let r1 = rng.random::<f64>();
                let r2 = rng.random::<f64>();

                let mut vel = settings.omega
                    * (v[k]
                        + settings.eta1 * r1 * (pbest[k] - x[k])
                        + settings.eta2 * r2 * (pbest[nb * dim + d] - x[k]));
                vel = vel.clamp(-vmax[d], vmax[d]);

                let mut pos = x[k] + vel;
                if pos < lower[d] {
                    pos = lower[d];
                    vel = 0.0;
                } else if pos > upper[d] {
                    pos = upper[d];
                    vel = 0.0;
                }
                x[k] = pos;
                v[k] = vel;
            }

            let row = i * dim..(i + 1) * dim;
            fitness[i] = problem.fitness(&x[row.clone()]);
            if improves(fitness[i], pbest_f[i]) {
                pbest_f[i] = fitness[i];
                pbest[row.clone()].copy_from_slice(&x[row]);
            }
        }
        evaluations += np;

        let generation_best = pbest_f[argmin(&pbest_f)];
        history.record(generation_best);

        if improves(generation_best, best_f) {
            best_f = generation_best;
            stalled_for = 0;
        } else {
            stalled_for += 1;
        }

        if let Some(limit) = settings.stall_generations
            && stalled_for >= limit
        {
            termination_reason = TerminationReason::Converged;
            break;
        }
    }

    let best = argmin(&pbest_f);
    IslandChampion {
        island,
        seed,
        parameter_values: pbest[best * dim..(best + 1) * dim].to_vec(),
        objective_value: pbest_f[best],
        evaluations,
        termination_reason,
        history,
    }
}
