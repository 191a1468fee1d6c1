//! Solver error types

use crate::core::Word;
use thiserror::Error;

/// Failures that abort a proposal or a scoring pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// No candidate is left to score against
    #[error("candidate pool is empty")]
    EmptyPool,

    /// Nothing to guess from
    #[error("guess vocabulary is empty")]
    EmptyVocabulary,

    /// Pool weights cannot form a sampling distribution
    #[error("candidate weights cannot be sampled: {0}")]
    InvalidWeights(String),

    /// A scoring task returned an error; the score map would be incomplete
    #[error("scoring '{guess}' failed: {reason}")]
    ScoringFailed { guess: Word, reason: String },

    /// A scoring worker panicked; the score map would be incomplete
    #[error("a scoring worker panicked, proposal aborted")]
    WorkerPanicked,
}
