//! The optimizer capability.

use std::time::Duration;

use thiserror::Error;

use crate::model::{FixedSet, Instance, Solution};

/// Failure to produce a solution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizerError {
    /// No open/close pattern compatible with the fixed set can route
    /// the full demand.
    #[error("no feasible pattern under the given fixed set")]
    Infeasible,

    /// The fixed set references a facility the instance does not have.
    #[error("fixed set references unknown {kind} facility {index}")]
    InvalidFixedSet { kind: &'static str, index: usize },

    /// Backend-specific failure.
    #[error("{0}")]
    Solver(String),
}

/// Solves an instance, optionally under a partial assignment of
/// facility decisions and a time budget.
///
/// Implementations must return a [`Solution`] whose `open_i` and
/// `open_j` cover *all* facilities of `instance`: fixed facilities echo
/// their forced value, free facilities are decided by the solve.
///
/// A time budget only truncates the search for free facilities; an
/// implementation that has not yet found any feasible pattern when the
/// budget runs out keeps going until it has one or proves there is none.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_facility::model::{FixedSet, Instance, Solution};
/// use u_facility::optimizer::{Optimizer, OptimizerError};
///
/// /// Opens everything and reports the fixed opening cost only.
/// struct OpenAll;
///
/// impl Optimizer for OpenAll {
///     fn solve(
///         &self,
///         instance: &Instance,
///         _fixed: Option<&FixedSet>,
///         _time_limit: Option<Duration>,
///     ) -> Result<Solution, OptimizerError> {
///         let cost = (0..instance.primary_count())
///             .map(|i| instance.primary_cost(i))
///             .chain((0..instance.secondary_count()).map(|j| instance.secondary_cost(j)))
///             .sum();
///         Ok(Solution::new(
///             cost,
///             vec![1; instance.primary_count()],
///             vec![1; instance.secondary_count()],
///         ))
///     }
/// }
/// ```
pub trait Optimizer: Send + Sync {
    fn solve(
        &self,
        instance: &Instance,
        fixed: Option<&FixedSet>,
        time_limit: Option<Duration>,
    ) -> Result<Solution, OptimizerError>;
}
