//! Monte Carlo Tree Search with UCB1 selection (UCT).
//!
//! This crate provides a generic MCTS engine that can search any decision
//! process implementing the `uct_core::Domain` trait.
//!
//! # Features
//!
//! - **Generic**: Works with any `Domain` implementation
//! - **UCB1 Selection**: Balances mean reward against an exploration bonus
//! - **Arena Tree**: Nodes addressed by index, parent links are plain handles
//! - **Rollout Abstraction**: Random playouts by default, pluggable policies
//! - **Bounded Expansion**: Duplicate-avoiding expansion fails fast instead of spinning
//!
//! # Example
//!
//! ```
//! use uct_mcts::{games::Summation, Mcts, RandomRollout, UctConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let game = Summation::default();
//! let state = game.initial_state();
//!
//! let config = UctConfig::with_iterations(200);
//! let rollout = RandomRollout::new(ChaCha8Rng::seed_from_u64(7), config.max_rollout_depth);
//! let mut mcts = Mcts::new(config, rollout, ChaCha8Rng::seed_from_u64(42));
//!
//! let result = mcts.search(&game, state).unwrap();
//! assert_eq!(result.root_visits, 200);
//! println!("Recommended: {} (mean reward {:.3})", result.state, result.mean_reward);
//! ```

pub mod config;
pub mod games;
pub mod node;
pub mod rollout;
pub mod search;
pub mod selection;
pub mod tree;

pub use config::UctConfig;
pub use node::{Node, NodeId, NodeStats};
pub use rollout::{RandomRollout, RolloutPolicy};
pub use search::{ChildStats, Mcts, SearchResult};
pub use tree::Tree;
