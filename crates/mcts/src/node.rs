//! MCTS node types for tree storage.
//!
//! Nodes live in an arena and refer to each other by index, so the parent
//! link is a plain handle that never keeps anything alive.

use std::fmt;

/// Index into the node arena.
///
/// This is a lightweight handle that references a node in the tree.
/// Using indices instead of pointers avoids Rc/RefCell overhead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Statistics for a single MCTS node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStats {
    /// Number of completed iterations whose backpropagation passed through this node.
    pub visit_count: u32,

    /// Sum of every reward backpropagated through this node (not averaged).
    pub total_reward: f64,
}

impl NodeStats {
    /// Mean reward over all visits.
    ///
    /// Returns `None` if the node has never been visited.
    pub fn mean_reward(&self) -> Option<f64> {
        if self.visit_count == 0 {
            None
        } else {
            Some(self.total_reward / f64::from(self.visit_count))
        }
    }

    /// Record one visit carrying `reward`.
    pub(crate) fn record(&mut self, reward: f64) {
        self.visit_count += 1;
        self.total_reward += reward;
    }
}

/// A node in the MCTS tree.
///
/// Each node owns one state of the decision process, plus the search
/// statistics gathered for it.
#[derive(Clone, Debug)]
pub struct Node<S> {
    pub(crate) state: S,
    pub(crate) parent: Option<NodeId>,
    /// Children in discovery order.
    pub(crate) children: Vec<NodeId>,
    pub(crate) stats: NodeStats,
}

impl<S> Node<S> {
    /// Create a fresh node with zero visits and zero reward.
    pub(crate) fn new(state: S, parent: Option<NodeId>) -> Self {
        Self {
            state,
            parent,
            children: Vec::new(),
            stats: NodeStats::default(),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn stats(&self) -> &NodeStats {
        &self.stats
    }

    pub fn visit_count(&self) -> u32 {
        self.stats.visit_count
    }

    pub fn total_reward(&self) -> f64 {
        self.stats.total_reward
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl<S: fmt::Display> fmt::Display for Node<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node: total_reward={}, visit_count={}, state: {}",
            self.stats.total_reward, self.stats.visit_count, self.state
        )
    }
}
