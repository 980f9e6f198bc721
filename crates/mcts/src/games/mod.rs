//! Toy decision processes for MCTS validation.
//!
//! These domains are small enough to reason about by hand, which makes
//! them useful for checking search behavior end to end.

pub mod summation;

pub use summation::{SumState, Summation, SummationConfig};
