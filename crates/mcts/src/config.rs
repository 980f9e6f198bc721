//! UCT configuration parameters.
//!
//! These parameters control the behavior of the Monte Carlo Tree Search
//! engine. They are plain data so they can be loaded from a JSON file.

use serde::{Deserialize, Serialize};
use uct_core::{Result, UctError};

/// Exploration constant used during tree descent (1/sqrt(2)).
pub const DEFAULT_EXPLORATION: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// UCT configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UctConfig {
    /// Number of selection/simulation/backpropagation iterations per search.
    pub iterations: usize,

    /// UCB1 exploration constant C used while descending the tree.
    /// The final recommendation always uses C = 0.
    pub exploration: f64,

    /// Successor draws allowed while looking for a sibling-distinct state.
    pub max_expansion_attempts: usize,

    /// Rollout steps allowed before the playout is declared non-terminating.
    pub max_rollout_depth: usize,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration: DEFAULT_EXPLORATION,
            max_expansion_attempts: 256,
            max_rollout_depth: 10_000,
        }
    }
}

impl UctConfig {
    /// Create a new config with the specified iteration budget.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Replace the descent exploration constant.
    pub fn exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Check that the parameters describe a runnable search.
    ///
    /// # Errors
    /// Returns `UctError::InvalidConfig` for a negative or non-finite
    /// exploration constant, or a zero retry/depth limit.
    pub fn validate(&self) -> Result<()> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(UctError::InvalidConfig(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration
            )));
        }
        if self.max_expansion_attempts == 0 {
            return Err(UctError::InvalidConfig(
                "max_expansion_attempts must be at least 1".to_string(),
            ));
        }
        if self.max_rollout_depth == 0 {
            return Err(UctError::InvalidConfig(
                "max_rollout_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
