//! Core domain types
//!
//! Words, feedback patterns and the weighted candidate pool. Everything here
//! is pure and shared read-only by the scoring workers.

mod pattern;
mod pool;
mod word;

pub use pattern::{Pattern, PatternError, Tile};
pub use pool::CandidatePool;
pub use word::{Word, WordError};
