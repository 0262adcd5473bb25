//! Exact optimizer: enumerates free facilities, routes flow exactly.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::flow::min_cost_flow;
use super::types::{Optimizer, OptimizerError};
use crate::model::{FixedSet, Instance, Solution};

/// Built-in [`Optimizer`] for small and restricted instances.
///
/// Facilities fixed by the [`FixedSet`] keep their value. Every 0/1
/// assignment of the remaining free facilities is visited, starting
/// from "all free open", and costed as fixed opening cost plus the
/// optimal transport cost from [`min_cost_flow`]. Patterns whose open
/// capacity cannot cover the demand, or whose fixed opening cost alone
/// reaches the incumbent, are skipped without a flow solve.
///
/// The enumeration stops at the time budget once a feasible pattern is
/// known. Without a budget, or when the enumeration completes, the
/// result is optimal under the fixed set.
///
/// # Examples
///
/// ```
/// use u_facility::model::{FixedSet, Instance};
/// use u_facility::optimizer::{ExactOptimizer, Optimizer};
///
/// let inst = Instance::new(
///     vec![10.0, 50.0],
///     vec![100.0, 100.0],
///     vec![5.0],
///     vec![100.0],
///     vec![10.0],
///     vec![vec![1.0], vec![1.0]],
///     vec![vec![1.0]],
/// )
/// .unwrap();
///
/// let sol = ExactOptimizer::default().solve(&inst, None, None).unwrap();
/// assert_eq!(sol.open_i, vec![1, 0]);
/// assert!((sol.cost - 35.0).abs() < 1e-9);
///
/// let mut fixed = FixedSet::new();
/// fixed.fix_primary(0, false);
/// let sol = ExactOptimizer::default().solve(&inst, Some(&fixed), None).unwrap();
/// assert_eq!(sol.open_i, vec![0, 1]);
/// ```
/// Free facilities are enumerated through a `u64` mask.
const FREE_LIMIT: usize = 63;

#[derive(Debug, Clone)]
pub struct ExactOptimizer {
    /// Largest number of free facilities accepted per solve.
    max_free: usize,
}

impl Default for ExactOptimizer {
    fn default() -> Self {
        Self { max_free: 24 }
    }
}

impl ExactOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_free(mut self, n: usize) -> Self {
        self.max_free = n.min(FREE_LIMIT);
        self
    }

    pub fn max_free(&self) -> usize {
        self.max_free
    }
}

/// A free facility position inside the enumeration mask.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Primary(usize),
    Secondary(usize),
}

impl Optimizer for ExactOptimizer {
    fn solve(
        &self,
        instance: &Instance,
        fixed: Option<&FixedSet>,
        time_limit: Option<Duration>,
    ) -> Result<Solution, OptimizerError> {
        let n_i = instance.primary_count();
        let n_j = instance.secondary_count();
        let deadline = time_limit.map(|t| Instant::now() + t);

        let mut open_i = vec![false; n_i];
        let mut open_j = vec![false; n_j];
        let mut free_i = vec![true; n_i];
        let mut free_j = vec![true; n_j];

        if let Some(fixed) = fixed {
            for (i, value) in fixed.primaries() {
                if i >= n_i {
                    return Err(OptimizerError::InvalidFixedSet {
                        kind: "primary",
                        index: i,
                    });
                }
                open_i[i] = value;
                free_i[i] = false;
            }
            for (j, value) in fixed.secondaries() {
                if j >= n_j {
                    return Err(OptimizerError::InvalidFixedSet {
                        kind: "secondary",
                        index: j,
                    });
                }
                open_j[j] = value;
                free_j[j] = false;
            }
        }

        let slots: Vec<Slot> = (0..n_i)
            .filter(|&i| free_i[i])
            .map(Slot::Primary)
            .chain((0..n_j).filter(|&j| free_j[j]).map(Slot::Secondary))
            .collect();

        let limit = self.max_free.min(FREE_LIMIT);
        if slots.len() > limit {
            return Err(OptimizerError::Solver(format!(
                "{} free facilities exceed the enumeration limit of {}",
                slots.len(),
                limit
            )));
        }
        let patterns: u64 = 1u64 << slots.len();

        let total_demand = instance.total_demand();
        let capacity_slack = 1e-6 * total_demand.max(1.0);
        let mut best: Option<(f64, Vec<bool>, Vec<bool>)> = None;
        let mut visited = 0usize;
        let mut truncated = false;

        for mask in (0..patterns).rev() {
            if let Some(deadline) = deadline {
                if best.is_some() && Instant::now() >= deadline {
                    truncated = true;
                    break;
                }
            }

            for (bit, slot) in slots.iter().enumerate() {
                let open = mask & (1u64 << bit) != 0;
                match *slot {
                    Slot::Primary(i) => open_i[i] = open,
                    Slot::Secondary(j) => open_j[j] = open,
                }
            }

            let cap_i: f64 = (0..n_i)
                .filter(|&i| open_i[i])
                .map(|i| instance.primary_capacity(i))
                .sum();
            let cap_j: f64 = (0..n_j)
                .filter(|&j| open_j[j])
                .map(|j| instance.secondary_capacity(j))
                .sum();
            if cap_i + capacity_slack < total_demand || cap_j + capacity_slack < total_demand {
                continue;
            }

            let fixed_cost: f64 = (0..n_i)
                .filter(|&i| open_i[i])
                .map(|i| instance.primary_cost(i))
                .sum::<f64>()
                + (0..n_j)
                    .filter(|&j| open_j[j])
                    .map(|j| instance.secondary_cost(j))
                    .sum::<f64>();
            if matches!(best, Some((cost, _, _)) if fixed_cost >= cost) {
                continue;
            }

            visited += 1;
            let Some(transport) = min_cost_flow(instance, &open_i, &open_j) else {
                continue;
            };
            let cost = fixed_cost + transport;
            if best.as_ref().is_none_or(|(b, _, _)| cost < *b) {
                trace!(cost, mask, "exact optimizer: new incumbent");
                best = Some((cost, open_i.clone(), open_j.clone()));
            }
        }

        let (cost, best_i, best_j) = best.ok_or(OptimizerError::Infeasible)?;
        debug!(
            free = slots.len(),
            visited, truncated, cost, "exact optimizer finished"
        );

        Ok(Solution::new(
            cost,
            best_i.into_iter().map(u8::from).collect(),
            best_j.into_iter().map(u8::from).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2 primaries, 2 secondaries, 2 customers.
    fn small() -> Instance {
        Instance::new(
            vec![100.0, 80.0],
            vec![30.0, 30.0],
            vec![20.0, 60.0],
            vec![30.0, 30.0],
            vec![10.0, 15.0],
            vec![vec![1.0, 2.0], vec![3.0, 1.0]],
            vec![vec![2.0, 2.0], vec![1.0, 1.0]],
        )
        .unwrap()
    }

    fn brute_force(inst: &Instance) -> f64 {
        let mut best = f64::INFINITY;
        for mi in 0..4u8 {
            for mj in 0..4u8 {
                let oi = [mi & 1 != 0, mi & 2 != 0];
                let oj = [mj & 1 != 0, mj & 2 != 0];
                if let Some(t) = min_cost_flow(inst, &oi, &oj) {
                    let fixed: f64 = (0..2)
                        .filter(|&i| oi[i])
                        .map(|i| inst.primary_cost(i))
                        .sum::<f64>()
                        + (0..2)
                            .filter(|&j| oj[j])
                            .map(|j| inst.secondary_cost(j))
                            .sum::<f64>();
                    best = best.min(fixed + t);
                }
            }
        }
        best
    }

    #[test]
    fn test_unrestricted_matches_brute_force() {
        let inst = small();
        let sol = ExactOptimizer::default().solve(&inst, None, None).unwrap();
        assert!((sol.cost - brute_force(&inst)).abs() < 1e-9);
        assert_eq!(sol.open_i, vec![0, 1]);
        assert_eq!(sol.open_j, vec![0, 1]);
        // 80 + 60 + 25 * (1 + 1)
        assert!((sol.cost - 190.0).abs() < 1e-9, "got {}", sol.cost);
    }

    #[test]
    fn test_fixed_values_are_echoed() {
        let inst = small();
        let fixed = FixedSet::from_pattern(&[1, 1], &[0, 1]);
        let sol = ExactOptimizer::default()
            .solve(&inst, Some(&fixed), None)
            .unwrap();
        assert_eq!(sol.open_i, vec![1, 1]);
        assert_eq!(sol.open_j, vec![0, 1]);
        // 180 + 60 + 25 * (1 + 1) via primary 1 -> secondary 1
        assert!((sol.cost - 290.0).abs() < 1e-9, "got {}", sol.cost);
    }

    #[test]
    fn test_infeasible_fixed_set() {
        let inst = small();
        let mut fixed = FixedSet::new();
        fixed.fix_secondary(0, false);
        fixed.fix_secondary(1, false);
        let err = ExactOptimizer::default()
            .solve(&inst, Some(&fixed), None)
            .unwrap_err();
        assert_eq!(err, OptimizerError::Infeasible);
    }

    #[test]
    fn test_unknown_index() {
        let inst = small();
        let mut fixed = FixedSet::new();
        fixed.fix_primary(7, true);
        let err = ExactOptimizer::default()
            .solve(&inst, Some(&fixed), None)
            .unwrap_err();
        assert_eq!(
            err,
            OptimizerError::InvalidFixedSet {
                kind: "primary",
                index: 7
            }
        );
    }

    #[test]
    fn test_free_limit() {
        let inst = small();
        let err = ExactOptimizer::new()
            .with_max_free(3)
            .solve(&inst, None, None)
            .unwrap_err();
        assert!(matches!(err, OptimizerError::Solver(_)));
    }

    #[test]
    fn test_free_limit_is_capped() {
        let optimizer = ExactOptimizer::new().with_max_free(65);
        assert_eq!(optimizer.max_free(), 63);

        // 64 primaries plus one secondary, all free.
        let inst = Instance::new(
            vec![1.0; 64],
            vec![1.0; 64],
            vec![1.0],
            vec![100.0],
            vec![1.0],
            vec![vec![1.0]; 64],
            vec![vec![1.0]],
        )
        .unwrap();
        let err = optimizer
            .solve(&inst, None, Some(Duration::from_millis(50)))
            .unwrap_err();
        assert!(matches!(err, OptimizerError::Solver(_)));

        let unclamped = ExactOptimizer { max_free: 65 };
        let err = unclamped
            .solve(&inst, None, Some(Duration::from_millis(50)))
            .unwrap_err();
        assert!(matches!(err, OptimizerError::Solver(_)));
    }

    #[test]
    fn test_zero_budget_still_returns_feasible() {
        let inst = small();
        let sol = ExactOptimizer::default()
            .solve(&inst, None, Some(Duration::ZERO))
            .unwrap();
        // First visited pattern opens everything.
        assert_eq!(sol.open_i, vec![1, 1]);
        assert_eq!(sol.open_j, vec![1, 1]);
        assert!(sol.cost >= brute_force(&inst) - 1e-9);
    }
}
