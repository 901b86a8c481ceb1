//! Archipelago runner
//!
//! Islands are independent: each one gets its own seed derived from the
//! base seed and runs the configured algorithm to completion. With the
//! `parallel` feature the islands run on a dedicated rayon pool of at most
//! `max_workers` threads; the call blocks until every island has finished.
//! Champions come back in island order whatever the pool size, so a fixed
//! base seed gives the same result on any machine.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rand::{RngCore, SeedableRng};

use crate::error::Result;

use super::Problem;
use super::config::{AlgorithmKind, ArchipelagoConfig};
use super::nelder_mead::minimize_nelder_mead;
use super::particle_swarm::minimize_particle_swarm;
use super::result::{ArchipelagoResult, IslandChampion};

/// Derive one seed per island from the base seed
#[must_use]
pub fn island_seeds(base_seed: u64, islands: usize) -> Vec<u64> {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(base_seed);
    (0..islands).map(|_| rng.next_u64()).collect()
}

fn run_island<P: Problem + ?Sized>(
    problem: &P,
    config: &ArchipelagoConfig,
    island: usize,
    seed: u64,
) -> IslandChampion {
    match config.algorithm {
        AlgorithmKind::ParticleSwarm => minimize_particle_swarm(problem, config, island, seed),
        AlgorithmKind::NelderMead => minimize_nelder_mead(problem, config, island, seed),
    }
}

/// Evolve every island of the archipelago and collect their champions
///
/// # Arguments
/// * `problem` - Problem shared read-only by all islands
/// * `config` - Algorithm, sizing, worker cap and seed
///
/// # Errors
/// Returns `InvalidConfig` for an invalid configuration or bounds and
/// `WorkerPool` if the thread pool cannot be created.
pub fn evolve<P: Problem + ?Sized>(
    problem: &P,
    config: &ArchipelagoConfig,
) -> Result<ArchipelagoResult> {
    config.validate()?;
    problem.bounds().validate()?;

    let base_seed = config.seed.unwrap_or_else(|| rand::rng().next_u64());
    let seeds = island_seeds(base_seed, config.islands);

    #[cfg(feature = "parallel")]
    let champions: Vec<IslandChampion> = {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_count())
            .thread_name(|i| format!("island-worker-{i}"))
            .build()?;

        pool.install(|| {
            seeds
                .par_iter()
                .enumerate()
                .map(|(island, &seed)| run_island(problem, config, island, seed))
                .collect()
        })
    };

    #[cfg(not(feature = "parallel"))]
    let champions: Vec<IslandChampion> = seeds
        .iter()
        .enumerate()
        .map(|(island, &seed)| run_island(problem, config, island, seed))
        .collect();

    Ok(ArchipelagoResult {
        seed: base_seed,
        champions,
    })
}
