use thiserror::Error;

/// Errors that can occur while searching a decision process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UctError {
    #[error("UCB1 score requested for unvisited child {child}")]
    UnvisitedChild { child: usize },

    #[error("UCB1 selection requested below unvisited node {node}")]
    UnvisitedParent { node: usize },

    #[error("node {node} has no children to select from")]
    NoChildren { node: usize },

    #[error("node {node} already holds all of its child slots")]
    FullyExpanded { node: usize },

    #[error(
        "no further distinct successor states for node {node} \
         ({existing} children, {attempts} draws)"
    )]
    ExpansionExhausted {
        node: usize,
        attempts: usize,
        existing: usize,
    },

    #[error("non-terminal state at depth {depth} has no successor")]
    NoSuccessor { depth: usize },

    #[error("reward requested for a state without a defined reward")]
    UndefinedReward,

    #[error("domain produced a non-finite reward: {0}")]
    NonFiniteReward(f64),

    #[error("rollout did not reach a terminal state within {limit} steps")]
    RolloutDepthExceeded { limit: usize },

    #[error("root state is terminal, there is no move to recommend")]
    TerminalRoot,

    #[error("search tree used before a root state was set")]
    NoTree,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience Result type for search operations
pub type Result<T> = std::result::Result<T, UctError>;
