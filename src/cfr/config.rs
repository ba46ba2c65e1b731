//! Configuration options for the DCFR minimizer.
//!
//! This module provides the discount-schedule configuration, the per-iteration
//! discount weights derived from it, and the statistics recorded during a run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cfr::error::ConfigError;

/// Configuration for the DCFR minimizer.
///
/// The three exponents define the Discounted CFR schedule (Brown & Sandholm,
/// 2019). The defaults are the `(1.5, 0, 2)` schedule.
///
/// # Example
/// ```
/// use dcfr_solver::cfr::DcfrConfig;
///
/// let config = DcfrConfig::default();
/// assert_eq!(config.alpha, 1.5);
/// assert_eq!(config.beta, 0.0);
/// assert_eq!(config.gamma, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DcfrConfig {
    /// Exponent discounting positive cumulative regret.
    pub alpha: f64,

    /// Exponent discounting negative cumulative regret.
    ///
    /// With `beta = 0` negative regret is halved on every update.
    pub beta: f64,

    /// Exponent weighting contributions to the cumulative strategy.
    pub gamma: f64,

    /// Iterations between progress log lines. 0 disables them.
    pub log_interval: u64,
}

impl Default for DcfrConfig {
    fn default() -> Self {
        Self {
            alpha: 1.5,
            beta: 0.0,
            gamma: 2.0,
            log_interval: 1000,
        }
    }
}

impl DcfrConfig {
    /// Builder method: set the positive-regret exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Builder method: set the negative-regret exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Builder method: set the strategy-weight exponent.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Builder method: set the progress log interval.
    pub fn with_log_interval(mut self, interval: u64) -> Self {
        self.log_interval = interval;
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta), ("gamma", self.gamma)] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidExponent(name, value));
            }
        }
        Ok(())
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    ///
    /// Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Discount weights in effect for one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountWeights {
    /// Multiplier for cumulative regret that is currently non-negative.
    pub alpha: f64,
    /// Multiplier for cumulative regret that is currently negative.
    pub beta: f64,
    /// Weight of this iteration's strategy in the cumulative strategy.
    pub gamma: f64,
}

impl DiscountWeights {
    /// Weights for the 1-indexed iteration `t`.
    ///
    /// `alpha_t = t^a / (t^a + 1)`, `beta_t = t^b / (t^b + 1)` and
    /// `gamma_t = (t + 1)^g`.
    pub fn at(t: u64, config: &DcfrConfig) -> Self {
        let t = t as f64;
        let pow_alpha = t.powf(config.alpha);
        let pow_beta = t.powf(config.beta);
        Self {
            alpha: pow_alpha / (pow_alpha + 1.0),
            beta: pow_beta / (pow_beta + 1.0),
            gamma: (t + 1.0).powf(config.gamma),
        }
    }
}

/// Statistics tracked during a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CFRStats {
    /// Total number of iterations completed.
    pub iterations: u64,

    /// Number of distinct public histories (table slots).
    pub public_histories: usize,

    /// Number of decision nodes in the public tree.
    pub decision_nodes: usize,

    /// Number of terminal nodes in the public tree.
    pub terminal_nodes: usize,

    /// Total time spent iterating (in seconds).
    pub elapsed_seconds: f64,

    /// Iterations per second.
    pub iterations_per_second: f64,
}

impl CFRStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update iterations per second based on elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.iterations_per_second = self.iterations as f64 / self.elapsed_seconds;
        }
    }
}
