//! Matheuristic Fixed Set Search (MFSS).
//!
//! A population-based matheuristic: elite solutions vote on which
//! facility decisions look structurally sound, those decisions are
//! frozen, and an exact [`Optimizer`](crate::optimizer::Optimizer)
//! re-solves the remaining, much smaller subproblem under a time
//! budget that grows when the search stagnates.
//!
//! - [`MfssConfig`]: population, elite, subproblem size and time budget
//! - [`MfssRunner`]: seeds the population and runs the search loop
//! - [`build_fixed_set`]: elite-consensus partial assignment
//! - [`Population`]: append-only pool without duplicate patterns
//!
//! # References
//!
//! Jovanovic & Voß (2019), "Fixed set search applied to the traveling
//! salesman problem"

mod config;
mod fixed_set;
mod population;
mod runner;

pub use config::{fixed_set_size, MfssConfig};
pub use fixed_set::build_fixed_set;
pub use population::Population;
pub use runner::{MfssResult, MfssRunner};
