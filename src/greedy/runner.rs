//! Randomized greedy construction.
//!
//! # Algorithm
//!
//! While demand `T` is unallocated:
//! 1. Pick a primary `i*` by `h_p(i) = f_i / U_i + avg_j c_ij` over
//!    secondaries with residual capacity, and draw `min(T, U_i)` from it.
//! 2. Route that amount into secondaries picked by
//!    `h_s(j) = c_i*j + g_j / V_j + avg_k d_jk` over unmet customers.
//! 3. Hand each secondary's share to customers picked by `d_j*k`.
//!
//! Every pick goes through the [`RestrictedCandidateList`]. The opened
//! pattern is then re-solved by the optimizer so that the returned cost
//! reflects optimal flow.

use rand::Rng;
use tracing::{debug, trace};

use super::config::GreedyConfig;
use super::rcl::RestrictedCandidateList;
use crate::error::{Stage, TscflpError};
use crate::model::{FixedSet, Instance, Solution};
use crate::optimizer::Optimizer;

/// Result of a greedy construction.
#[derive(Debug, Clone)]
pub struct GreedyOutcome {
    /// The pattern chosen by the heuristic, every facility fixed.
    pub pattern: FixedSet,

    /// The optimizer's solution for that pattern.
    pub solution: Solution,
}

/// Residual capacities and demand during construction.
#[derive(Debug, Clone)]
struct Residuals {
    primary: Vec<f64>,
    secondary: Vec<f64>,
    demand: Vec<f64>,
    /// Demand not yet drawn from any primary.
    outstanding: f64,
}

impl Residuals {
    fn new(instance: &Instance) -> Self {
        Self {
            primary: instance.primary_capacities().to_vec(),
            secondary: instance.secondary_capacities().to_vec(),
            demand: instance.demands().to_vec(),
            outstanding: instance.total_demand(),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

fn open_indices(values: &[f64], eps: f64) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, &v)| v > eps)
        .map(|(idx, _)| idx)
        .collect()
}

/// Builds one feasible TSCFLP pattern by randomized greedy selection.
///
/// # Usage
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_facility::greedy::{GreedyConfig, GreedyConstructor};
/// use u_facility::model::Instance;
/// use u_facility::optimizer::ExactOptimizer;
///
/// let inst = Instance::new(
///     vec![100.0, 300.0],
///     vec![50.0, 50.0],
///     vec![10.0],
///     vec![50.0],
///     vec![20.0],
///     vec![vec![1.0], vec![1.0]],
///     vec![vec![1.0]],
/// )
/// .unwrap();
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let sol = GreedyConstructor::run(&inst, &ExactOptimizer::default(), &GreedyConfig::default(), &mut rng)
///     .unwrap();
/// assert_eq!(sol.open_i, vec![1, 0]);
/// assert!((sol.cost - 150.0).abs() < 1e-9);
/// ```
pub struct GreedyConstructor;

impl GreedyConstructor {
    /// Constructs a pattern and returns the optimizer's solution for it.
    pub fn run<O, R>(
        instance: &Instance,
        optimizer: &O,
        config: &GreedyConfig,
        rng: &mut R,
    ) -> Result<Solution, TscflpError>
    where
        O: Optimizer + ?Sized,
        R: Rng,
    {
        Self::construct(instance, optimizer, config, rng).map(|outcome| outcome.solution)
    }

    /// Constructs a pattern and keeps it alongside the solution.
    #[tracing::instrument(level = "debug", name = "greedy", skip_all, fields(rcl_size = config.rcl_size))]
    pub fn construct<O, R>(
        instance: &Instance,
        optimizer: &O,
        config: &GreedyConfig,
        rng: &mut R,
    ) -> Result<GreedyOutcome, TscflpError>
    where
        O: Optimizer + ?Sized,
        R: Rng,
    {
        let (open_i, open_j) = Self::select_pattern(instance, config, rng)?;
        let pattern = FixedSet::from_pattern(&open_i, &open_j);

        let solution = optimizer.solve(instance, Some(&pattern), None)?;
        debug!(
            cost = solution.cost,
            primaries = solution.open_primaries().len(),
            secondaries = solution.open_secondaries().len(),
            "greedy pattern costed"
        );

        Ok(GreedyOutcome { pattern, solution })
    }

    /// Runs the three selection loops and returns the 0/1 pattern of
    /// selected primaries and secondaries, without costing it.
    pub fn select_pattern<R: Rng>(
        instance: &Instance,
        config: &GreedyConfig,
        rng: &mut R,
    ) -> Result<(Vec<u8>, Vec<u8>), TscflpError> {
        config.validate().map_err(TscflpError::InvalidConfig)?;

        let eps = config.epsilon;
        let rcl = RestrictedCandidateList::new(config.rcl_size);
        let mut state = Residuals::new(instance);
        let mut selected_i = vec![0u8; instance.primary_count()];
        let mut selected_j = vec![0u8; instance.secondary_count()];

        while state.outstanding > eps {
            // 1) Primary
            let candidates = open_indices(&state.primary, eps);
            let (i_star, drawn) = rcl
                .select(
                    &mut state,
                    &candidates,
                    |s, i| {
                        let avg_c = mean(
                            open_indices(&s.secondary, eps)
                                .into_iter()
                                .map(|j| instance.upstream_cost(i, j)),
                        );
                        instance.primary_cost(i) / instance.primary_capacity(i) + avg_c
                    },
                    |s, i| {
                        let used = s.outstanding.min(s.primary[i]);
                        s.primary[i] -= used;
                        s.outstanding -= used;
                        used
                    },
                    rng,
                )
                .ok_or(TscflpError::ResourceExhausted {
                    stage: Stage::Primary,
                    remaining: state.outstanding,
                })?;
            selected_i[i_star] = 1;
            trace!(primary = i_star, drawn, "selected primary");

            // 2) Secondaries absorbing the drawn amount
            let mut from_primary = drawn;
            while from_primary > eps {
                let candidates = open_indices(&state.secondary, eps);
                let remaining = from_primary;
                let (j_star, routed) = rcl
                    .select(
                        &mut state,
                        &candidates,
                        |s, j| {
                            let avg_d = mean(
                                open_indices(&s.demand, eps)
                                    .into_iter()
                                    .map(|k| instance.downstream_cost(j, k)),
                            );
                            instance.upstream_cost(i_star, j)
                                + instance.secondary_cost(j) / instance.secondary_capacity(j)
                                + avg_d
                        },
                        |s, j| {
                            let used = remaining.min(s.secondary[j]);
                            s.secondary[j] -= used;
                            used
                        },
                        rng,
                    )
                    .ok_or(TscflpError::ResourceExhausted {
                        stage: Stage::Secondary,
                        remaining: from_primary,
                    })?;
                selected_j[j_star] = 1;
                from_primary -= routed;
                trace!(secondary = j_star, routed, "selected secondary");

                // 3) Customers served from this secondary
                // Residual demand can be spread over customers that each
                // hold less than `eps`; the loop then ends with no pick.
                let mut from_secondary = routed;
                while from_secondary > eps {
                    let candidates = open_indices(&state.demand, eps);
                    let remaining = from_secondary;
                    let Some((k_star, served)) = rcl.select(
                        &mut state,
                        &candidates,
                        |_, k| instance.downstream_cost(j_star, k),
                        |s, k| {
                            let amount = remaining.min(s.demand[k]);
                            s.demand[k] -= amount;
                            amount
                        },
                        rng,
                    ) else {
                        break;
                    };
                    from_secondary -= served;
                    trace!(customer = k_star, served, "assigned customer");
                }
            }
        }

        Ok((selected_i, selected_j))
    }
}
