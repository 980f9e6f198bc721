//! Summation toy problem for MCTS validation.
//!
//! Starting from an initial value, each round adds one number drawn from a
//! fixed set of choices. When the rounds run out the reward is
//! `-|target - value|`, so the best play steers the running sum towards the
//! target. With the default choices `{1, -1, 2, -2}` every state has exactly
//! four distinct successors.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uct_core::{Domain, Result, UctError};

/// Rules of a summation problem.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummationConfig {
    /// Increments available in every round.
    pub choices: Vec<i64>,

    /// Number of rounds, counting the initial state as round 0.
    /// The process ends at round `max_rounds - 1`.
    pub max_rounds: u32,

    /// Value the final sum should land on.
    pub target: i64,

    /// Value of the initial state.
    pub initial_value: i64,
}

impl Default for SummationConfig {
    fn default() -> Self {
        Self {
            choices: vec![1, -1, 2, -2],
            max_rounds: 10,
            target: 1,
            initial_value: 0,
        }
    }
}

impl SummationConfig {
    /// # Errors
    /// Returns `UctError::InvalidConfig` for an empty or repeating choice
    /// set, or zero rounds.
    pub fn validate(&self) -> Result<()> {
        if self.choices.is_empty() {
            return Err(UctError::InvalidConfig(
                "summation needs at least one choice".to_string(),
            ));
        }
        // Each choice is one child slot, so repeats would leave slots unfillable.
        for (i, choice) in self.choices.iter().enumerate() {
            if self.choices[..i].contains(choice) {
                return Err(UctError::InvalidConfig(format!(
                    "summation choice {} is listed more than once",
                    choice
                )));
            }
        }
        if self.max_rounds == 0 {
            return Err(UctError::InvalidConfig(
                "summation needs at least one round".to_string(),
            ));
        }
        Ok(())
    }
}

/// One point of a summation run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SumState {
    value: i64,
    round: u32,
    /// Every increment applied so far, oldest first.
    history: Vec<i64>,
}

impl SumState {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            round: 0,
            history: Vec::new(),
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn history(&self) -> &[i64] {
        &self.history
    }

    /// State after adding `choice`, or `None` if the sum leaves the `i64` range.
    pub fn advance(&self, choice: i64) -> Option<Self> {
        let value = self.value.checked_add(choice)?;
        let mut history = self.history.clone();
        history.push(choice);
        Some(Self {
            value,
            round: self.round + 1,
            history,
        })
    }
}

impl fmt::Display for SumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value={}, round_index={}", self.value, self.round)
    }
}

/// Summation problem implementation.
#[derive(Clone, Debug, Default)]
pub struct Summation {
    config: SummationConfig,
}

impl Summation {
    /// # Errors
    /// Returns `UctError::InvalidConfig` if the rules cannot be played.
    pub fn new(config: SummationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SummationConfig {
        &self.config
    }

    pub fn initial_state(&self) -> SumState {
        SumState::new(self.config.initial_value)
    }

    /// Distance between `state` and the target.
    pub fn distance(&self, state: &SumState) -> u64 {
        self.config.target.abs_diff(state.value)
    }
}

impl Domain for Summation {
    type State = SumState;
    type Signature = i64;

    fn is_terminal(&self, state: &SumState) -> bool {
        state.round >= self.config.max_rounds.saturating_sub(1)
    }

    fn reward(&self, state: &SumState) -> Option<f64> {
        if self.is_terminal(state) {
            Some(-(self.distance(state) as f64))
        } else {
            None
        }
    }

    fn random_successor<R: Rng + ?Sized>(&self, state: &SumState, rng: &mut R) -> Option<SumState> {
        if self.is_terminal(state) {
            return None;
        }
        self.config
            .choices
            .choose(rng)
            .and_then(|&choice| state.advance(choice))
    }

    fn signature(&self, state: &SumState) -> i64 {
        state.value
    }

    fn branching_factor(&self, _state: &SumState) -> usize {
        self.config.choices.len()
    }
}
