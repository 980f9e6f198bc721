//! Property-based tests for the UCT search engine.
//!
//! These tests check the tree statistics after arbitrary seeded runs:
//! - Root visits equal completed iterations
//! - Every node's visits and rewards are accounted for by its subtree
//! - No node exceeds the branching factor; siblings stay distinct
//! - Backpropagation touches exactly the path to the root
//! - Visit counts never decrease

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uct_core::Domain;
use uct_mcts::{
    games::{SumState, Summation, SummationConfig},
    Mcts, NodeId, RandomRollout, Tree, UctConfig,
};

/// Tolerance for comparing accumulated reward sums.
const REWARD_TOLERANCE: f64 = 1e-6;

type SumMcts = Mcts<Summation, RandomRollout<ChaCha8Rng>, ChaCha8Rng>;

fn create_mcts(seed: u64, iterations: usize) -> SumMcts {
    let config = UctConfig::with_iterations(iterations);
    let rollout = RandomRollout::new(
        ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
        config.max_rollout_depth,
    );
    Mcts::new(config, rollout, ChaCha8Rng::seed_from_u64(seed))
}

fn summation(max_rounds: u32) -> Summation {
    Summation::new(SummationConfig {
        max_rounds,
        ..Default::default()
    })
    .unwrap()
}

fn visit_snapshot(tree: &Tree<SumState>) -> Vec<u32> {
    tree.ids().map(|id| tree.get(id).visit_count()).collect()
}

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Iteration budgets small enough for fast tests
fn arb_iterations() -> impl Strategy<Value = usize> {
    1usize..300
}

/// Round limits that keep the root non-terminal
fn arb_rounds() -> impl Strategy<Value = u32> {
    2u32..12
}

// =============================================================================
// Statistic consistency
// =============================================================================

proptest! {
    /// Root visits equal the iteration budget.
    #[test]
    fn prop_root_visits_equal_iterations(
        seed in arb_seed(),
        iterations in arb_iterations(),
        rounds in arb_rounds(),
    ) {
        let game = summation(rounds);
        let mut mcts = create_mcts(seed, iterations);
        let result = mcts.search(&game, game.initial_state()).unwrap();

        prop_assert_eq!(result.root_visits as usize, iterations);
        prop_assert_eq!(mcts.tree().unwrap().root().visit_count() as usize, iterations);
    }

    /// Each non-root, non-terminal node started exactly one rollout (when it
    /// was created); the root and everything else is accounted for by children.
    #[test]
    fn prop_visits_accounted_by_subtree(
        seed in arb_seed(),
        iterations in arb_iterations(),
        rounds in arb_rounds(),
    ) {
        let game = summation(rounds);
        let mut mcts = create_mcts(seed, iterations);
        mcts.search(&game, game.initial_state()).unwrap();
        let tree = mcts.tree().unwrap();

        for id in tree.ids() {
            let node = tree.get(id);
            let child_visits: u32 = node.children().iter().map(|&c| tree.get(c).visit_count()).sum();

            prop_assert!(node.visit_count() >= 1, "node {} never visited", id);
            if node.is_root() {
                prop_assert_eq!(node.visit_count(), child_visits);
            } else if !game.is_terminal(node.state()) {
                prop_assert_eq!(node.visit_count(), child_visits + 1);
            } else {
                prop_assert!(node.children().is_empty());
            }
        }

        let root = tree.root();
        let child_reward: f64 = root.children().iter().map(|&c| tree.get(c).total_reward()).sum();
        prop_assert!(
            (root.total_reward() - child_reward).abs() < REWARD_TOLERANCE,
            "root reward {} != children reward {}",
            root.total_reward(),
            child_reward
        );
    }

    /// Rewards are never positive in the summation domain, so no total can be.
    #[test]
    fn prop_total_reward_bounded_by_visits(
        seed in arb_seed(),
        iterations in arb_iterations(),
    ) {
        let game = Summation::default();
        let mut mcts = create_mcts(seed, iterations);
        mcts.search(&game, game.initial_state()).unwrap();
        let tree = mcts.tree().unwrap();

        // Final values lie within 2 * 9 of zero, so a reward is at least -19.
        for id in tree.ids() {
            let node = tree.get(id);
            prop_assert!(node.total_reward() <= 0.0);
            prop_assert!(node.total_reward() >= -19.0 * f64::from(node.visit_count()));
        }
    }
}

// =============================================================================
// Branching bound
// =============================================================================

proptest! {
    /// No node holds more children than the branching factor, and sibling
    /// states never share a signature.
    #[test]
    fn prop_branching_bound(
        seed in arb_seed(),
        iterations in arb_iterations(),
        rounds in arb_rounds(),
    ) {
        let game = summation(rounds);
        let mut mcts = create_mcts(seed, iterations);
        mcts.search(&game, game.initial_state()).unwrap();
        let tree = mcts.tree().unwrap();

        for id in tree.ids() {
            let node = tree.get(id);
            prop_assert!(node.children().len() <= game.branching_factor(node.state()));

            let mut values: Vec<i64> = node
                .children()
                .iter()
                .map(|&c| game.signature(tree.get(c).state()))
                .collect();
            let count = values.len();
            values.sort_unstable();
            values.dedup();
            prop_assert_eq!(values.len(), count, "duplicate siblings under {}", id);

            for &child in node.children() {
                prop_assert_eq!(tree.get(child).parent(), Some(id));
                prop_assert_eq!(tree.get(child).state().round(), node.state().round() + 1);
            }
        }
    }
}

// =============================================================================
// Backprop completeness and monotonicity
// =============================================================================

proptest! {
    /// Backpropagating from depth d changes exactly d + 1 nodes, each by one
    /// visit and the full reward.
    #[test]
    fn prop_backprop_touches_path_only(
        seed in arb_seed(),
        depth in 0usize..9,
        reward in -20.0f64..0.0,
    ) {
        let game = Summation::default();
        let mut mcts = create_mcts(seed, 1);
        mcts.reset(game.initial_state());

        // A chain of `depth` nodes plus one off-path sibling at every level.
        let mut leaf = NodeId::ROOT;
        for _ in 0..depth {
            mcts.expand(&game, leaf).unwrap();
            leaf = mcts.expand(&game, leaf).unwrap();
        }

        let before = visit_snapshot(mcts.tree().unwrap());
        mcts.backpropagate(leaf, reward).unwrap();
        let tree = mcts.tree().unwrap();
        let after = visit_snapshot(tree);

        let path: Vec<NodeId> = tree.ancestors(leaf).collect();
        prop_assert_eq!(path.len(), depth + 1);
        prop_assert_eq!(tree.depth(leaf), depth);

        for id in tree.ids() {
            let changed = after[id.index()] - before[id.index()];
            if path.contains(&id) {
                prop_assert_eq!(changed, 1);
                prop_assert!((tree.get(id).total_reward() - reward).abs() < REWARD_TOLERANCE);
            } else {
                prop_assert_eq!(changed, 0);
                prop_assert_eq!(tree.get(id).total_reward(), 0.0);
            }
        }
    }

    /// Visit counts never decrease from one iteration to the next.
    #[test]
    fn prop_visits_monotonic(
        seed in arb_seed(),
        iterations in 1usize..120,
    ) {
        let game = Summation::default();
        let mut mcts = create_mcts(seed, iterations);
        mcts.reset(game.initial_state());

        let mut previous: Vec<u32> = visit_snapshot(mcts.tree().unwrap());
        for i in 0..iterations {
            mcts.iterate(&game).unwrap();
            let current = visit_snapshot(mcts.tree().unwrap());

            prop_assert!(current.len() >= previous.len());
            for (old, new) in previous.iter().zip(&current) {
                prop_assert!(new >= old);
            }
            prop_assert_eq!(current[0] as usize, i + 1);
            previous = current;
        }
    }
}

// =============================================================================
// Determinism
// =============================================================================

proptest! {
    /// Same seed, same search.
    #[test]
    fn prop_deterministic(seed in arb_seed(), iterations in arb_iterations()) {
        let game = Summation::default();
        let run = || {
            let mut mcts = create_mcts(seed, iterations);
            mcts.search(&game, game.initial_state()).unwrap()
        };

        let first = run();
        let second = run();
        prop_assert_eq!(first.best, second.best);
        prop_assert_eq!(first.children, second.children);
        prop_assert_eq!(first.tree_size, second.tree_size);
    }
}
