//! UCT Core - decision-process abstraction and common types
//!
//! This crate provides the `Domain` trait that any sequential decision
//! process implements to be searchable by the UCT engine in `uct-mcts`.
//!
//! # Types
//!
//! - [`Domain`] - Trait for decision-process implementations
//! - [`Reward`] - Finite rollout reward
//! - [`UctError`] - Failures surfaced by the search engine

mod domain;
mod error;
mod types;

pub use domain::Domain;
pub use error::{Result, UctError};
pub use types::Reward;
