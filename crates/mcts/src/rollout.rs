//! Simulation (default policy) abstraction for MCTS.
//!
//! A rollout plays the decision process forward from a state until it
//! terminates and reports the terminal reward. Rollouts work on state
//! values only; they never touch the search tree.

use rand::Rng;
use std::cell::RefCell;
use uct_core::{Domain, Result, Reward, UctError};

/// Trait for estimating the value of a state by simulation.
pub trait RolloutPolicy<D: Domain> {
    /// Play from `state` to a terminal state and return its reward.
    ///
    /// # Errors
    /// Fails if the domain is malformed (a non-terminal state without
    /// successors, an undefined or non-finite terminal reward) or the
    /// playout does not terminate.
    fn rollout(&self, domain: &D, state: &D::State) -> Result<Reward>;
}

/// Rollout policy drawing uniformly random successors.
pub struct RandomRollout<R: Rng> {
    /// Random number generator (wrapped in RefCell for interior mutability).
    rng: RefCell<R>,

    /// Steps allowed before the playout is treated as non-terminating.
    max_depth: usize,
}

impl<R: Rng> RandomRollout<R> {
    /// Create a new random rollout policy.
    ///
    /// # Arguments
    /// * `rng` - Random number generator for successor draws
    /// * `max_depth` - Maximum transitions in one playout
    pub fn new(rng: R, max_depth: usize) -> Self {
        Self {
            rng: RefCell::new(rng),
            max_depth,
        }
    }
}

impl<D: Domain, R: Rng> RolloutPolicy<D> for RandomRollout<R> {
    fn rollout(&self, domain: &D, initial_state: &D::State) -> Result<Reward> {
        let mut rng = self.rng.borrow_mut();
        let mut state = initial_state.clone();
        let mut depth = 0;

        while !domain.is_terminal(&state) {
            if depth >= self.max_depth {
                return Err(UctError::RolloutDepthExceeded {
                    limit: self.max_depth,
                });
            }
            state = domain
                .random_successor(&state, &mut *rng)
                .ok_or(UctError::NoSuccessor { depth })?;
            depth += 1;
        }

        Reward::from_domain(domain.reward(&state))
    }
}
