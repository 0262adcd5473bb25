//! MFSS execution loop.
//!
//! # Algorithm
//!
//! 1. Seed the population with randomized greedy solutions.
//! 2. At each iteration:
//!    a. Take the `n_best` cheapest members as the elite set `Sn`
//!    b. Draw a base solution `B` and a reference group `Skn ⊆ Sn`
//!    c. Fix the facilities `Skn` agrees on most with `B`
//!    d. Let the optimizer solve the restricted problem within `τ`
//!    e. Accept the result only if its pattern is new and it strictly
//!       improves the best cost
//!    f. Grow `τ` after `stagnation_limit` iterations without acceptance
//! 3. Return the best solution after `max_iterations`.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::config::{fixed_set_size, MfssConfig};
use super::fixed_set::build_fixed_set;
use super::population::Population;
use crate::error::TscflpError;
use crate::greedy::{GreedyConfig, GreedyConstructor};
use crate::model::{Instance, Solution};
use crate::optimizer::Optimizer;

/// Result of an MFSS run.
#[derive(Debug, Clone)]
pub struct MfssResult {
    /// The best solution found.
    pub best: Solution,

    /// Total number of search iterations.
    pub iterations: usize,

    /// Number of accepted (strictly improving) solutions.
    pub improvements: usize,

    /// Number of optimizer results whose pattern was already present.
    pub duplicates: usize,

    /// How many times the time budget was grown.
    pub time_limit_increases: usize,

    /// Time budget at the end of the run.
    pub final_time_limit: Duration,

    /// Final population, seeds first, then accepted solutions in order.
    pub population: Vec<Solution>,

    /// Best cost after seeding, then after every iteration.
    pub cost_history: Vec<f64>,
}

/// Executes the Matheuristic Fixed Set Search.
///
/// # Usage
///
/// ```
/// use std::time::Duration;
/// use u_facility::mfss::{MfssConfig, MfssRunner};
/// use u_facility::model::Instance;
/// use u_facility::optimizer::{ExactOptimizer, Optimizer};
///
/// let inst = Instance::new(
///     vec![120.0, 115.0, 110.0],
///     vec![300.0, 250.0, 250.0],
///     vec![60.0, 58.0, 55.0],
///     vec![220.0, 210.0, 200.0],
///     vec![90.0, 110.0, 100.0, 90.0],
///     vec![vec![10.0, 14.0, 16.0], vec![16.0, 12.0, 10.0], vec![11.0, 15.0, 18.0]],
///     vec![
///         vec![8.0, 9.0, 5.0, 11.0],
///         vec![6.0, 8.0, 10.0, 7.0],
///         vec![7.0, 9.0, 12.0, 6.0],
///     ],
/// )
/// .unwrap();
///
/// let config = MfssConfig::default()
///     .with_population_size(4)
///     .with_size_max(3)
///     .with_initial_time_limit(Duration::from_millis(100))
///     .with_max_iterations(10)
///     .with_seed(42);
///
/// let optimizer = ExactOptimizer::default();
/// let result = MfssRunner::run(&inst, &optimizer, &config).unwrap();
/// let optimum = optimizer.solve(&inst, None, None).unwrap();
/// assert!(result.best.cost >= optimum.cost - 1e-6);
/// assert_eq!(result.iterations, 10);
/// ```
pub struct MfssRunner;

impl MfssRunner {
    /// Runs MFSS with a generator seeded from `config.seed`.
    pub fn run<O>(
        instance: &Instance,
        optimizer: &O,
        config: &MfssConfig,
    ) -> Result<MfssResult, TscflpError>
    where
        O: Optimizer + ?Sized,
    {
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        Self::run_with_rng(instance, optimizer, config, &mut rng)
    }

    /// Runs MFSS drawing all randomness (seeding and search) from `rng`.
    #[tracing::instrument(
        level = "debug",
        name = "mfss",
        skip_all,
        fields(max_iterations = config.max_iterations, size_max = config.size_max)
    )]
    pub fn run_with_rng<O, R>(
        instance: &Instance,
        optimizer: &O,
        config: &MfssConfig,
        rng: &mut R,
    ) -> Result<MfssResult, TscflpError>
    where
        O: Optimizer + ?Sized,
        R: Rng,
    {
        config.validate().map_err(TscflpError::InvalidConfig)?;

        let mut population = seed_population(instance, optimizer, config, rng)?;
        let mut best = population
            .best()
            .cloned()
            .ok_or_else(|| TscflpError::InvalidConfig("empty initial population".into()))?;
        info!(
            cost = best.cost,
            seeded = population.len(),
            "initial population built"
        );

        let size = fixed_set_size(instance.facility_count(), config.size_max);
        let mut tau = config.initial_time_limit;
        let mut stagnation = 0usize;
        let mut improvements = 0usize;
        let mut duplicates = 0usize;
        let mut time_limit_increases = 0usize;

        let mut cost_history = Vec::with_capacity(config.max_iterations + 1);
        cost_history.push(best.cost);

        for iteration in 0..config.max_iterations {
            let candidate = {
                let elite = population.elite(config.n_best);
                let base = elite[rng.random_range(0..elite.len())];

                let k = rng.random_range(2..=elite.len().max(2)).min(elite.len());
                let reference: Vec<&Solution> = index::sample(rng, elite.len(), k)
                    .into_iter()
                    .map(|idx| elite[idx])
                    .collect();

                let fixed = build_fixed_set(base, &reference, size, instance, rng);
                optimizer.solve(instance, Some(&fixed), Some(tau))?
            };

            if population.contains_pattern(&candidate) {
                duplicates += 1;
                stagnation += 1;
                debug!(iteration, cost = candidate.cost, "duplicate pattern discarded");
            } else if candidate.cost < best.cost - config.epsilon {
                info!(
                    iteration,
                    previous = best.cost,
                    cost = candidate.cost,
                    "improved solution"
                );
                best = candidate.clone();
                population.try_insert(candidate);
                improvements += 1;
                stagnation = 0;
            } else {
                stagnation += 1;
                debug!(iteration, cost = candidate.cost, "no improvement");
            }

            if stagnation >= config.stagnation_limit {
                tau = Duration::try_from_secs_f64(tau.as_secs_f64() * config.time_growth)
                    .unwrap_or(Duration::MAX);
                stagnation = 0;
                time_limit_increases += 1;
                info!(iteration, time_limit = ?tau, "stagnation, time limit increased");
            }

            cost_history.push(best.cost);
        }

        info!(
            cost = best.cost,
            improvements,
            duplicates,
            population = population.len(),
            "mfss finished"
        );

        Ok(MfssResult {
            best,
            iterations: config.max_iterations,
            improvements,
            duplicates,
            time_limit_increases,
            final_time_limit: tau,
            population: population.into_vec(),
            cost_history,
        })
    }
}

/// Builds `population_size` randomized greedy solutions; repeated
/// patterns are dropped.
fn seed_population<O, R>(
    instance: &Instance,
    optimizer: &O,
    config: &MfssConfig,
    rng: &mut R,
) -> Result<Population, TscflpError>
where
    O: Optimizer + ?Sized,
    R: Rng,
{
    let greedy = GreedyConfig::default().with_rcl_size(config.rcl_size);

    let seeds = construct_seeds(instance, optimizer, &greedy, config.population_size, rng)?;

    let mut population = Population::new();
    let mut rejected = 0usize;
    for solution in seeds {
        if !population.try_insert(solution) {
            rejected += 1;
        }
    }
    debug!(
        accepted = population.len(),
        rejected, "population seeded"
    );
    Ok(population)
}

#[cfg(not(feature = "parallel"))]
fn construct_seeds<O, R>(
    instance: &Instance,
    optimizer: &O,
    greedy: &GreedyConfig,
    n: usize,
    rng: &mut R,
) -> Result<Vec<Solution>, TscflpError>
where
    O: Optimizer + ?Sized,
    R: Rng,
{
    (0..n)
        .map(|_| GreedyConstructor::run(instance, optimizer, greedy, rng))
        .collect()
}

/// Parallel seeding: every construction gets its own generator, seeded
/// from `rng` in index order, so results do not depend on scheduling.
#[cfg(feature = "parallel")]
fn construct_seeds<O, R>(
    instance: &Instance,
    optimizer: &O,
    greedy: &GreedyConfig,
    n: usize,
    rng: &mut R,
) -> Result<Vec<Solution>, TscflpError>
where
    O: Optimizer + ?Sized,
    R: Rng,
{
    use rayon::prelude::*;

    let seeds: Vec<u64> = (0..n).map(|_| rng.random()).collect();
    seeds
        .into_par_iter()
        .map(|seed| {
            let mut local = StdRng::seed_from_u64(seed);
            GreedyConstructor::run(instance, optimizer, greedy, &mut local)
        })
        .collect()
}
