//! Seeded evaluation trials.
//!
//! Each trial runs one full search and compares the recommended root child
//! against a root child drawn uniformly at random, both scored by their
//! distance to the target.

use crate::RunConfig;
use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use uct_mcts::games::Summation;

/// Outcome of one trial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrialOutcome {
    pub seed: u64,
    /// Distance of the recommended child to the target.
    pub recommended: u64,
    /// Distance of the randomly drawn child to the target.
    pub random: u64,
}

/// Aggregated trial results.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvaluationSummary {
    /// Recommended child strictly closer than the random one.
    pub wins: usize,
    pub ties: usize,
    pub losses: usize,
    pub mean_recommended_distance: f64,
    pub mean_random_distance: f64,
}

impl EvaluationSummary {
    pub fn from_outcomes(outcomes: &[TrialOutcome]) -> Self {
        if outcomes.is_empty() {
            return Self::default();
        }

        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome.recommended.cmp(&outcome.random) {
                std::cmp::Ordering::Less => summary.wins += 1,
                std::cmp::Ordering::Equal => summary.ties += 1,
                std::cmp::Ordering::Greater => summary.losses += 1,
            }
        }

        let n = outcomes.len() as f64;
        summary.mean_recommended_distance =
            outcomes.iter().map(|o| o.recommended as f64).sum::<f64>() / n;
        summary.mean_random_distance = outcomes.iter().map(|o| o.random as f64).sum::<f64>() / n;
        summary
    }

    pub fn total(&self) -> usize {
        self.wins + self.ties + self.losses
    }

    /// Fraction of trials where the recommendation was at least as close.
    pub fn not_worse_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            (self.wins + self.ties) as f64 / self.total() as f64
        }
    }
}

/// Run a single seeded trial.
pub fn run_trial(config: &RunConfig, seed: u64) -> Result<TrialOutcome> {
    let game = Summation::new(config.domain.clone())?;
    let mut mcts = config.mcts(seed);

    let result = mcts.search(&game, game.initial_state())?;

    let mut pick_rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(2));
    let random_child = result
        .children
        .choose(&mut pick_rng)
        .context("search returned a recommendation without root children")?;

    Ok(TrialOutcome {
        seed,
        recommended: game.distance(&result.state),
        random: game.distance(&random_child.state),
    })
}

/// Run `trials` independent trials in parallel.
///
/// Trial `i` uses seed `base_seed + i * 1000`, so results do not depend on
/// scheduling.
pub fn run_trials(config: &RunConfig, trials: u64, base_seed: u64) -> Result<Vec<TrialOutcome>> {
    (0..trials)
        .into_par_iter()
        .map(|i| run_trial(config, base_seed.wrapping_add(i.wrapping_mul(1000))))
        .collect()
}
