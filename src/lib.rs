//! Two-Stage Capacitated Facility Location (TSCFLP) heuristics.
//!
//! Chooses which primary and secondary facilities to open, and how flow
//! moves primary → secondary → customer, minimizing fixed opening plus
//! transport cost under capacity and demand constraints.
//!
//! - **Greedy**: randomized greedy construction of one feasible pattern,
//!   with a Restricted Candidate List for diversification.
//! - **MFSS**: Matheuristic Fixed Set Search, which repeatedly fixes the
//!   facility decisions elite solutions agree on and re-solves the rest.
//! - **Optimizer**: the exact re-optimization capability both rely on;
//!   [`optimizer::ExactOptimizer`] is built in, other solvers plug in
//!   through [`optimizer::Optimizer`].
//!
//! # Architecture
//!
//! All randomness is passed explicitly as `&mut R: rand::Rng`, so runs
//! are reproducible from a seed. Execution is single-threaded except
//! for optional parallel population seeding (`parallel` feature).
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use u_facility::mfss::{MfssConfig, MfssRunner};
//! use u_facility::model::Instance;
//! use u_facility::optimizer::ExactOptimizer;
//!
//! let inst = Instance::new(
//!     vec![120.0, 110.0],
//!     vec![300.0, 250.0],
//!     vec![60.0, 55.0, 53.0],
//!     vec![220.0, 200.0, 180.0],
//!     vec![90.0, 110.0, 100.0],
//!     vec![vec![10.0, 16.0, 15.0], vec![11.0, 18.0, 14.0]],
//!     vec![vec![8.0, 9.0, 5.0], vec![7.0, 9.0, 12.0], vec![10.0, 7.0, 11.0]],
//! )
//! .unwrap();
//!
//! let config = MfssConfig::default()
//!     .with_population_size(5)
//!     .with_size_max(3)
//!     .with_initial_time_limit(Duration::from_millis(100))
//!     .with_max_iterations(5)
//!     .with_seed(1);
//! let result = MfssRunner::run(&inst, &ExactOptimizer::default(), &config).unwrap();
//! assert_eq!(result.best.open_i.len(), 2);
//! ```

pub mod error;
pub mod greedy;
pub mod mfss;
pub mod model;
pub mod optimizer;

pub use error::{Stage, TscflpError};
