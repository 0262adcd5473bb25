//! Error types shared by the constructor and the search.

use std::fmt;

use thiserror::Error;

use crate::optimizer::OptimizerError;

/// Construction step at which residual capacity ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// No primary facility has residual capacity left.
    Primary,
    /// No secondary facility can absorb the flow drawn from a primary.
    Secondary,
    /// No customer with unmet demand is left for the flow in a secondary.
    Customer,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Primary => write!(f, "primary"),
            Stage::Secondary => write!(f, "secondary"),
            Stage::Customer => write!(f, "customer"),
        }
    }
}

/// Errors returned by [`GreedyConstructor`](crate::greedy::GreedyConstructor)
/// and [`MfssRunner`](crate::mfss::MfssRunner).
#[derive(Debug, Error)]
pub enum TscflpError {
    /// Residual capacity is exhausted while flow is still unallocated.
    ///
    /// Indicates that the instance cannot cover its demand.
    #[error("{stage} capacity exhausted with {remaining} units unallocated")]
    ResourceExhausted { stage: Stage, remaining: f64 },

    /// The optimizer failed to produce a solution.
    #[error("optimizer failed: {0}")]
    Optimizer(#[from] OptimizerError),

    /// The run configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
