//! Arena-allocated MCTS tree.
//!
//! Using a Vec<Node> with indices provides better cache locality
//! and simpler ownership compared to Rc<RefCell<Node>>.

use crate::node::{Node, NodeId};

/// Arena-allocated MCTS tree.
///
/// Nodes are stored in a contiguous vector and referenced by index.
/// The root sits at `NodeId::ROOT`; nodes are never removed, the whole
/// arena is discarded at once by `reset`.
#[derive(Clone, Debug)]
pub struct Tree<S> {
    nodes: Vec<Node<S>>,
}

impl<S> Tree<S> {
    /// Create a new tree holding only a root for `root_state`.
    pub fn new(root_state: S) -> Self {
        Self {
            nodes: vec![Node::new(root_state, None)],
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId did not come from this tree.
    pub fn get(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<S> {
        &mut self.nodes[id.0]
    }

    /// Attach a new zero-statistics child holding `state` under `parent`.
    pub fn add_child(&mut self, parent: NodeId, state: S) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(state, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Discard every node and start over from `root_state`.
    pub fn reset(&mut self, root_state: S) {
        self.nodes.clear();
        self.nodes.push(Node::new(root_state, None));
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists for the lifetime of the tree.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> &Node<S> {
        self.get(NodeId::ROOT)
    }

    /// Walk from `id` up to the root, inclusive.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, S> {
        Ancestors {
            tree: self,
            next: Some(id),
        }
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count() - 1
    }

    /// All node IDs in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }
}

/// Iterator over a node and its ancestors, ending at the root.
pub struct Ancestors<'a, S> {
    tree: &'a Tree<S>,
    next: Option<NodeId>,
}

impl<S> Iterator for Ancestors<'_, S> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.get(current).parent;
        Some(current)
    }
}
