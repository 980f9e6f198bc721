//! UCB1 child selection.
//!
//! score(child) = Q/n + C * sqrt(2 * ln(N) / n)
//! where Q is the child's total reward, n its visit count and N the
//! parent's visit count.

use crate::{node::NodeId, tree::Tree};
use uct_core::{Result, UctError};

/// UCB1 score of a child with `total_reward` over `visits`.
///
/// # Errors
/// Returns `UctError::UnvisitedChild` when `visits` is zero and
/// `UctError::UnvisitedParent` when `parent_visits` is zero.
pub fn ucb1_score(
    child: NodeId,
    total_reward: f64,
    visits: u32,
    parent: NodeId,
    parent_visits: u32,
    exploration: f64,
) -> Result<f64> {
    if visits == 0 {
        return Err(UctError::UnvisitedChild { child: child.index() });
    }
    if parent_visits == 0 {
        return Err(UctError::UnvisitedParent { node: parent.index() });
    }

    let n = f64::from(visits);
    let exploit = total_reward / n;
    let explore = (2.0 * f64::from(parent_visits).ln() / n).sqrt();
    Ok(exploit + exploration * explore)
}

/// Pick the child of `node` with the highest UCB1 score.
///
/// Children are scanned in discovery order and the best candidate only
/// changes on a strictly greater score, so the first maximal child wins.
/// Pass `exploration = 0.0` for the final, pure-exploitation choice.
///
/// # Errors
/// Returns `UctError::NoChildren` for a leaf, or the scoring errors of
/// [`ucb1_score`] when any child has not been visited yet.
pub fn best_child<S>(tree: &Tree<S>, node: NodeId, exploration: f64) -> Result<NodeId> {
    let parent = tree.get(node);
    let parent_visits = parent.visit_count();

    let mut best = None;
    let mut best_score = f64::NEG_INFINITY;

    for &child_id in parent.children() {
        let child = tree.get(child_id);
        let score = ucb1_score(
            child_id,
            child.total_reward(),
            child.visit_count(),
            node,
            parent_visits,
            exploration,
        )?;

        if best.is_none() || score > best_score {
            best_score = score;
            best = Some(child_id);
        }
    }

    best.ok_or(UctError::NoChildren { node: node.index() })
}
