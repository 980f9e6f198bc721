use rand::Rng;
use std::fmt::Debug;

/// A sequential decision process searchable by UCT.
///
/// The trait holds the rules; `State` values are immutable snapshots and
/// every transition produces a fresh one. The search engine never inspects
/// a state beyond the capabilities listed here.
pub trait Domain {
    /// One point in the decision process
    type State: Clone;

    /// Comparable key used to keep sibling states distinct during expansion
    type Signature: PartialEq + Debug;

    /// Returns true once the process has ended
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Returns the reward of a state:
    /// - `Some(r)` for a terminal state
    /// - `None` when no reward is defined (non-terminal states)
    fn reward(&self, state: &Self::State) -> Option<f64>;

    /// Draws a successor uniformly from the available choices.
    ///
    /// Returns `None` when the state has no legal successor.
    fn random_successor<R: Rng + ?Sized>(&self, state: &Self::State, rng: &mut R)
        -> Option<Self::State>;

    /// Duplicate-detection key for `state`
    fn signature(&self, state: &Self::State) -> Self::Signature;

    /// Maximum number of distinct successors of `state`
    fn branching_factor(&self, state: &Self::State) -> usize;
}
