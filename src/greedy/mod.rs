//! Randomized greedy constructor for the TSCFLP.
//!
//! Builds one feasible facility pattern by sequentially picking a
//! primary, the secondaries that absorb its output and the customers
//! those secondaries serve, then asks an
//! [`Optimizer`](crate::optimizer::Optimizer) for the exact cost of the
//! pattern.
//!
//! With a candidate list width of 1 the construction is deterministic;
//! wider lists (GRASP-style) are used to seed a diverse population for
//! the fixed set search.
//!
//! # References
//!
//! Feo & Resende (1995), "Greedy Randomized Adaptive Search Procedures"

mod config;
mod rcl;
mod runner;

pub use config::GreedyConfig;
pub use rcl::RestrictedCandidateList;
pub use runner::{GreedyConstructor, GreedyOutcome};
