//! End-to-end tests of UCT on the summation problem.
//!
//! Rollouts are random, so the checks are statistical over many seeded
//! searches rather than exact expectations for a single run.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uct_core::Domain;
use uct_mcts::{
    games::{Summation, SummationConfig},
    Mcts, RandomRollout, UctConfig,
};

/// Run a 1000-iteration search with the given seed and return the distance
/// of the recommended child to the target, plus the mean distance of all
/// root children (what a uniformly drawn child scores on average).
fn search_distances(game: &Summation, seed: u64) -> (u64, f64) {
    let config = UctConfig::default();
    let rollout = RandomRollout::new(
        ChaCha8Rng::seed_from_u64(seed.wrapping_add(10_000)),
        config.max_rollout_depth,
    );
    let mut mcts = Mcts::new(config, rollout, ChaCha8Rng::seed_from_u64(seed));

    let result = mcts.search(game, game.initial_state()).unwrap();
    assert_eq!(result.root_visits, 1000);
    assert_eq!(result.children.len(), 4);

    let mean_child = result
        .children
        .iter()
        .map(|c| game.distance(&c.state) as f64)
        .sum::<f64>()
        / result.children.len() as f64;

    (game.distance(&result.state), mean_child)
}

/// With ten rounds the recommended first move lands closer to the target
/// than a uniformly chosen root child on average.
#[test]
fn test_default_problem_beats_random_child() {
    let game = Summation::default();
    let trials = 200;

    let mut recommended_total = 0.0;
    let mut random_total = 0.0;
    for seed in 0..trials {
        let (recommended, mean_child) = search_distances(&game, seed);
        recommended_total += recommended as f64;
        random_total += mean_child;
    }

    let recommended_mean = recommended_total / trials as f64;
    let random_mean = random_total / trials as f64;

    // Children are always {1, -1, 2, -2}: mean distance to 1 is 1.5.
    assert!((random_mean - 1.5).abs() < 1e-9);
    assert!(
        recommended_mean < 1.35,
        "recommended mean distance {} not better than random {}",
        recommended_mean,
        random_mean
    );
}

/// With few rounds left the signal is strong: the recommended child is
/// within one step of the target in a large majority of runs.
#[test]
fn test_short_problem_large_majority() {
    let game = Summation::new(SummationConfig {
        max_rounds: 4,
        ..Default::default()
    })
    .unwrap();
    let trials = 100;

    let close = (0..trials)
        .filter(|&seed| search_distances(&game, seed).0 <= 1)
        .count();

    assert!(
        close >= 70,
        "recommended child within 1 of target in only {}/{} runs",
        close,
        trials
    );
}

/// When the children are terminal their mean reward is exact, so the
/// pure-exploitation pick is always the child that hits the target.
#[test]
fn test_single_step_problem_is_exact() {
    let game = Summation::new(SummationConfig {
        max_rounds: 2,
        ..Default::default()
    })
    .unwrap();

    for seed in 0..20 {
        let config = UctConfig::with_iterations(50);
        let rollout = RandomRollout::new(ChaCha8Rng::seed_from_u64(seed), config.max_rollout_depth);
        let mut mcts = Mcts::new(config, rollout, ChaCha8Rng::seed_from_u64(seed + 100));

        let result = mcts.search(&game, game.initial_state()).unwrap();
        assert_eq!(result.state.value(), 1, "seed {}", seed);
        assert_eq!(result.mean_reward, 0.0);
        assert!(game.is_terminal(&result.state));
    }
}

/// Playing the whole process by repeatedly following the recommendation.
#[test]
fn test_playthrough_reaches_terminal() {
    let game = Summation::default();
    let config = UctConfig::with_iterations(300);
    let rollout = RandomRollout::new(ChaCha8Rng::seed_from_u64(5), config.max_rollout_depth);
    let mut mcts = Mcts::new(config, rollout, ChaCha8Rng::seed_from_u64(6));

    let mut state = game.initial_state();
    let mut steps = 0;
    while !game.is_terminal(&state) {
        state = mcts.search(&game, state).unwrap().state;
        steps += 1;
    }

    assert_eq!(steps, 9);
    assert_eq!(state.history().len(), 9);
    assert_eq!(state.history().iter().sum::<i64>(), state.value());
    assert!(game.reward(&state).is_some());
}
