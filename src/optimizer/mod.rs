//! Exact re-optimization of facility patterns.
//!
//! The greedy constructor and the fixed set search only decide *which*
//! facilities to hold open or closed. Everything else (flow routing,
//! the exact cost, the free facilities of a partial assignment) is
//! delegated to an [`Optimizer`].
//!
//! [`ExactOptimizer`] is the built-in implementation. It routes flow
//! with a min-cost-flow solver and enumerates the free facilities of a
//! partial assignment. Any MILP backend can be plugged in instead by
//! implementing the trait.

mod exact;
mod flow;
mod types;

pub use exact::ExactOptimizer;
pub use flow::min_cost_flow;
pub use types::{Optimizer, OptimizerError};
