//! Monte Carlo Tree Search implementation.
//!
//! Implements plain UCT: every iteration descends the tree with UCB1,
//! expands one new child, runs a random rollout from it and backs the
//! reward up to the root.

use crate::{
    config::UctConfig,
    node::{NodeId, NodeStats},
    rollout::RolloutPolicy,
    selection,
    tree::Tree,
};
use log::{debug, trace};
use rand::Rng;
use std::marker::PhantomData;
use uct_core::{Domain, Result, UctError};

/// Statistics of one root child, in discovery order.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildStats<S> {
    pub id: NodeId,
    pub state: S,
    pub stats: NodeStats,
}

/// Result of an MCTS search.
#[derive(Clone, Debug)]
pub struct SearchResult<S> {
    /// Recommended child of the root (highest mean reward, first on ties).
    pub best: NodeId,

    /// State held by the recommended child.
    pub state: S,

    /// Visits of the recommended child.
    pub visit_count: u32,

    /// Mean reward of the recommended child.
    pub mean_reward: f64,

    /// Visits of the root; equals the number of completed iterations.
    pub root_visits: u32,

    /// Every root child, in discovery order.
    pub children: Vec<ChildStats<S>>,

    /// Number of nodes in the tree after the search.
    pub tree_size: usize,
}

/// Monte Carlo Tree Search with UCB1 selection.
///
/// Generic over:
/// - `D`: The decision process being searched
/// - `P`: The rollout (simulation) policy
/// - `R`: The random number generator used by expansion
pub struct Mcts<D: Domain, P: RolloutPolicy<D>, R: Rng> {
    config: UctConfig,
    rollout: P,
    rng: R,
    tree: Option<Tree<D::State>>,
    _domain: PhantomData<D>,
}

impl<D, P, R> Mcts<D, P, R>
where
    D: Domain,
    P: RolloutPolicy<D>,
    R: Rng,
{
    /// Create a new MCTS instance.
    pub fn new(config: UctConfig, rollout: P, rng: R) -> Self {
        Self {
            config,
            rollout,
            rng,
            tree: None,
            _domain: PhantomData,
        }
    }

    pub fn config(&self) -> &UctConfig {
        &self.config
    }

    /// The tree built by the last search, if any.
    pub fn tree(&self) -> Option<&Tree<D::State>> {
        self.tree.as_ref()
    }

    /// Start a new tree rooted at `root_state`, dropping the previous one.
    pub fn reset(&mut self, root_state: D::State) {
        if let Some(tree) = self.tree.as_mut() {
            tree.reset(root_state);
        } else {
            self.tree = Some(Tree::new(root_state));
        }
    }

    /// Run a full search from `root_state` and recommend a child of the root.
    ///
    /// The recommendation is only advice: advancing the decision process
    /// with the returned state is up to the caller.
    ///
    /// # Errors
    /// Returns `UctError::TerminalRoot` for a terminal root, and propagates
    /// any expansion, rollout or selection failure.
    pub fn search(&mut self, domain: &D, root_state: D::State) -> Result<SearchResult<D::State>> {
        self.config.validate()?;
        if domain.is_terminal(&root_state) {
            return Err(UctError::TerminalRoot);
        }

        self.reset(root_state);
        for _ in 0..self.config.iterations {
            self.iterate(domain)?;
        }

        let result = self.recommend()?;
        debug!(
            "search finished: {} iterations, {} nodes, best child {} (visits={}, mean={:.4})",
            result.root_visits,
            result.tree_size,
            result.best,
            result.visit_count,
            result.mean_reward
        );
        Ok(result)
    }

    /// Run one selection -> simulation -> backpropagation pass on the current tree.
    ///
    /// # Errors
    /// Returns `UctError::NoTree` before the first `reset` or `search`, and
    /// propagates expansion, rollout and selection failures.
    pub fn iterate(&mut self, domain: &D) -> Result<()> {
        let leaf = self.tree_policy(domain, NodeId::ROOT)?;
        let reward = self.rollout.rollout(domain, self.current_tree()?.get(leaf).state())?;
        trace!("iteration: leaf {} reward {}", leaf, reward);
        self.backpropagate(leaf, reward.get())
    }

    /// Descend from `from` to the node the next rollout should start at.
    ///
    /// Stops at a terminal node, or expands and returns a new child at the
    /// first node that still has free child slots. Fully expanded nodes are
    /// crossed by UCB1 with the configured exploration constant.
    ///
    /// # Errors
    /// Returns `UctError::NoSuccessor` for a non-terminal node whose domain
    /// reports no child slots, besides the errors of `expand` and UCB1.
    pub fn tree_policy(&mut self, domain: &D, from: NodeId) -> Result<NodeId> {
        let mut current = from;
        loop {
            let tree = self.current_tree()?;
            let node = tree.get(current);
            if domain.is_terminal(node.state()) {
                return Ok(current);
            }
            let branching = domain.branching_factor(node.state());
            if branching == 0 {
                return Err(UctError::NoSuccessor {
                    depth: tree.depth(current),
                });
            }
            if node.children().len() < branching {
                return self.expand(domain, current);
            }
            current = selection::best_child(tree, current, self.config.exploration)?;
        }
    }

    /// Attach a new child whose state differs from every existing sibling.
    ///
    /// # Errors
    /// Returns `UctError::NoTree` before the first `reset`,
    /// `UctError::FullyExpanded` when the node has no free child slot,
    /// `UctError::NoSuccessor` when the domain offers no successor at all, and
    /// `UctError::ExpansionExhausted` when `max_expansion_attempts` draws
    /// produce only duplicates.
    pub fn expand(&mut self, domain: &D, node_id: NodeId) -> Result<NodeId> {
        let max_attempts = self.config.max_expansion_attempts;
        let tree = self.tree.as_mut().ok_or(UctError::NoTree)?;
        let node = tree.get(node_id);
        let branching = domain.branching_factor(node.state());

        if branching == 0 {
            return Err(UctError::NoSuccessor {
                depth: tree.depth(node_id),
            });
        }
        if node.children().len() >= branching {
            return Err(UctError::FullyExpanded {
                node: node_id.index(),
            });
        }

        let existing: Vec<D::Signature> = node
            .children()
            .iter()
            .map(|&id| domain.signature(tree.get(id).state()))
            .collect();

        for _ in 0..max_attempts {
            let candidate = domain
                .random_successor(node.state(), &mut self.rng)
                .ok_or_else(|| UctError::NoSuccessor {
                    depth: tree.depth(node_id),
                })?;
            let signature = domain.signature(&candidate);
            if !existing.contains(&signature) {
                trace!("expand {}: new child {:?}", node_id, signature);
                return Ok(tree.add_child(node_id, candidate));
            }
        }

        Err(UctError::ExpansionExhausted {
            node: node_id.index(),
            attempts: max_attempts,
            existing: existing.len(),
        })
    }

    /// Add one visit and `reward` to `node_id` and every ancestor up to the root.
    ///
    /// # Errors
    /// Returns `UctError::NoTree` before the first `reset`.
    pub fn backpropagate(&mut self, node_id: NodeId, reward: f64) -> Result<()> {
        let tree = self.tree.as_mut().ok_or(UctError::NoTree)?;
        let mut current = Some(node_id);
        while let Some(id) = current {
            let node = tree.get_mut(id);
            node.stats.record(reward);
            current = node.parent;
        }
        Ok(())
    }

    /// Best root child under pure exploitation, plus per-child statistics.
    fn recommend(&self) -> Result<SearchResult<D::State>> {
        let tree = self.current_tree()?;
        let best = selection::best_child(tree, NodeId::ROOT, 0.0)?;
        let best_node = tree.get(best);

        let children = tree
            .root()
            .children()
            .iter()
            .map(|&id| {
                let child = tree.get(id);
                ChildStats {
                    id,
                    state: child.state().clone(),
                    stats: child.stats().clone(),
                }
            })
            .collect();

        Ok(SearchResult {
            best,
            state: best_node.state().clone(),
            visit_count: best_node.visit_count(),
            mean_reward: best_node.stats().mean_reward().unwrap_or(0.0),
            root_visits: tree.root().visit_count(),
            children,
            tree_size: tree.len(),
        })
    }

    fn current_tree(&self) -> Result<&Tree<D::State>> {
        self.tree.as_ref().ok_or(UctError::NoTree)
    }
}
