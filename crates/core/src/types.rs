//! Validated scalar types shared by the search engine.

use crate::{Result, UctError};
use std::fmt;

/// A rollout reward.
///
/// Invariant: the wrapped value is finite, so statistics built from it never
/// turn into NaN.
///
/// # Example
/// ```
/// use uct_core::Reward;
///
/// let reward = Reward::new(-2.0).unwrap();
/// assert_eq!(reward.get(), -2.0);
/// assert!(Reward::new(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Reward(f64);

impl Reward {
    /// Create a new reward.
    ///
    /// # Errors
    /// Returns `UctError::NonFiniteReward` for NaN or infinite values.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(UctError::NonFiniteReward(value));
        }
        Ok(Self(value))
    }

    /// Validate a reward reported by a domain.
    ///
    /// # Errors
    /// Returns `UctError::UndefinedReward` for `None`, and
    /// `UctError::NonFiniteReward` for NaN or infinite values.
    pub fn from_domain(value: Option<f64>) -> Result<Self> {
        value.ok_or(UctError::UndefinedReward).and_then(Self::new)
    }

    /// Get the raw value.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<Reward> for f64 {
    fn from(reward: Reward) -> Self {
        reward.0
    }
}

impl fmt::Display for Reward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
