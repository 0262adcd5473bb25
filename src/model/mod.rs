//! Problem data and solution values for the Two-Stage Capacitated
//! Facility Location Problem (TSCFLP).
//!
//! - [`Instance`]: immutable problem data (costs, capacities, demand)
//! - [`Solution`]: an open/close pattern together with its optimized cost
//! - [`FixedSet`]: a partial assignment of facility decisions for one solve
//!
//! All three are passive value types shared by the greedy constructor,
//! the optimizer and the fixed set search.

mod fixed;
mod instance;
mod solution;

pub use fixed::FixedSet;
pub use instance::{Instance, InstanceError};
pub use solution::{Pattern, Solution};
