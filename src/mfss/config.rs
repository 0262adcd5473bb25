//! MFSS configuration.

use std::time::Duration;

/// Configuration for the Matheuristic Fixed Set Search.
///
/// # Fixed set size
///
/// Each iteration fixes `min(n - 1, n - size_max)` of the `n = |I| + |J|`
/// facility decisions (saturating at 0), so at most `size_max` and at
/// least one facility stay free for the optimizer.
///
/// # Time budget
///
/// Every restricted subproblem is solved with the current budget `τ`,
/// starting at `initial_time_limit`. After `stagnation_limit`
/// consecutive iterations without an accepted improvement, `τ` is
/// multiplied by `time_growth`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_facility::mfss::MfssConfig;
///
/// let config = MfssConfig::default()
///     .with_population_size(20)
///     .with_n_best(6)
///     .with_size_max(5)
///     .with_initial_time_limit(Duration::from_millis(250))
///     .with_max_iterations(100)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MfssConfig {
    /// Number of greedy solutions seeding the population (`Npop`).
    pub population_size: usize,

    /// Size of the elite set drawn from the population (`n_best`).
    pub n_best: usize,

    /// Maximum number of free facilities per subproblem (`Sizemax`).
    pub size_max: usize,

    /// Initial optimizer time budget (`tinit`).
    pub initial_time_limit: Duration,

    /// Number of search iterations.
    pub max_iterations: usize,

    /// RCL width used by the greedy constructor while seeding.
    pub rcl_size: usize,

    /// Consecutive non-improving iterations before `τ` grows.
    pub stagnation_limit: usize,

    /// Multiplier applied to `τ` on stagnation.
    pub time_growth: f64,

    /// Strict-improvement tolerance.
    pub epsilon: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for MfssConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            n_best: 5,
            size_max: 10,
            initial_time_limit: Duration::from_secs(1),
            max_iterations: 50,
            rcl_size: 2,
            stagnation_limit: 5,
            time_growth: 2.0,
            epsilon: 1e-6,
            seed: None,
        }
    }
}

impl MfssConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_n_best(mut self, n: usize) -> Self {
        self.n_best = n;
        self
    }

    pub fn with_size_max(mut self, n: usize) -> Self {
        self.size_max = n;
        self
    }

    pub fn with_initial_time_limit(mut self, t: Duration) -> Self {
        self.initial_time_limit = t;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_rcl_size(mut self, n: usize) -> Self {
        self.rcl_size = n;
        self
    }

    pub fn with_stagnation(mut self, limit: usize, growth: f64) -> Self {
        self.stagnation_limit = limit;
        self.time_growth = growth;
        self
    }

    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.epsilon = eps;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population_size must be positive".into());
        }
        if self.n_best == 0 {
            return Err("n_best must be positive".into());
        }
        if self.rcl_size == 0 {
            return Err("rcl_size must be at least 1".into());
        }
        if self.stagnation_limit == 0 {
            return Err("stagnation_limit must be positive".into());
        }
        if !(self.time_growth >= 1.0 && self.time_growth.is_finite()) {
            return Err(format!(
                "time_growth must be finite and >= 1, got {}",
                self.time_growth
            ));
        }
        if !(self.epsilon >= 0.0 && self.epsilon.is_finite()) {
            return Err(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            ));
        }
        Ok(())
    }
}

/// Number of facility decisions fixed per iteration.
///
/// `min(total - 1, total - size_max)`, saturating at 0: a `size_max` of
/// `total` or more leaves every facility free.
///
/// # Examples
///
/// ```
/// use u_facility::mfss::fixed_set_size;
///
/// assert_eq!(fixed_set_size(7, 5), 2);
/// assert_eq!(fixed_set_size(7, 0), 6);
/// assert_eq!(fixed_set_size(7, 10), 0);
/// ```
pub fn fixed_set_size(total: usize, size_max: usize) -> usize {
    total
        .saturating_sub(1)
        .min(total.saturating_sub(size_max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MfssConfig::default();
        assert_eq!(config.population_size, 10);
        assert_eq!(config.n_best, 5);
        assert_eq!(config.size_max, 10);
        assert_eq!(config.initial_time_limit, Duration::from_secs(1));
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.rcl_size, 2);
        assert_eq!(config.stagnation_limit, 5);
        assert!((config.time_growth - 2.0).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_population() {
        let config = MfssConfig::default().with_population_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_growth() {
        assert!(MfssConfig::default()
            .with_stagnation(5, 0.5)
            .validate()
            .is_err());
        assert!(MfssConfig::default()
            .with_stagnation(0, 2.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_fixed_set_size() {
        assert_eq!(fixed_set_size(7, 1), 6);
        assert_eq!(fixed_set_size(7, 3), 4);
        assert_eq!(fixed_set_size(7, 7), 0);
        assert_eq!(fixed_set_size(1, 0), 0);
        assert_eq!(fixed_set_size(0, 0), 0);
    }
}
