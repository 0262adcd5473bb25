//! Greedy constructor configuration.

/// Configuration for the greedy constructor.
///
/// # Examples
///
/// ```
/// use u_facility::greedy::GreedyConfig;
///
/// // Pure greedy: always take the best-scored candidate.
/// let pure = GreedyConfig::default();
/// assert_eq!(pure.rcl_size, 1);
///
/// // Randomized: pick uniformly among the two best candidates.
/// let randomized = GreedyConfig::default().with_rcl_size(2);
/// assert!(randomized.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GreedyConfig {
    /// Width of the Restricted Candidate List.
    ///
    /// `1` is deterministic; larger values diversify construction.
    pub rcl_size: usize,

    /// Residual amounts at or below this are treated as zero.
    pub epsilon: f64,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self {
            rcl_size: 1,
            epsilon: 1e-6,
        }
    }
}

impl GreedyConfig {
    pub fn with_rcl_size(mut self, n: usize) -> Self {
        self.rcl_size = n;
        self
    }

    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.epsilon = eps;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.rcl_size == 0 {
            return Err("rcl_size must be at least 1".into());
        }
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(format!(
                "epsilon must be positive and finite, got {}",
                self.epsilon
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GreedyConfig::default();
        assert_eq!(config.rcl_size, 1);
        assert!((config.epsilon - 1e-6).abs() < 1e-15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_rcl() {
        assert!(GreedyConfig::default().with_rcl_size(0).validate().is_err());
    }

    #[test]
    fn test_validate_bad_epsilon() {
        assert!(GreedyConfig::default().with_epsilon(0.0).validate().is_err());
        assert!(GreedyConfig::default()
            .with_epsilon(f64::NAN)
            .validate()
            .is_err());
    }
}
