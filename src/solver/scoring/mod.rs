//! Guess scoring strategies
//!
//! Defines the `ScoringStrategy` trait and its two implementations: an exact
//! expectation over the whole pool and a Monte-Carlo estimate over a
//! weighted sample of it.

mod exhaustive;
mod sampled;

pub use exhaustive::ExhaustiveScorer;
pub use sampled::SampledScorer;

use super::{OpeningBook, ScoreRecord, SolverError};
use crate::core::{CandidatePool, Word};
use rand::rngs::StdRng;
use std::borrow::Cow;

/// Scores one guess against a read-only candidate pool
///
/// Implementations are shared by reference across scoring workers, so they
/// hold configuration only. Any randomness comes from the `rng` each worker
/// owns.
pub trait ScoringStrategy: Sync {
    /// Short name for display
    fn name(&self) -> &'static str;

    /// Score `guess` against `pool`
    ///
    /// # Errors
    /// Returns `SolverError` if the pool is empty or its weights cannot be
    /// sampled.
    fn score(
        &self,
        guess: &Word,
        pool: &CandidatePool,
        rng: &mut StdRng,
    ) -> Result<ScoreRecord, SolverError>;

    /// A guess to play without searching, if the pool makes one obvious
    fn shortcut(&self, _pool: &CandidatePool) -> Option<Word> {
        None
    }

    /// Whether turn 2 may answer from the book's second-turn table
    fn uses_second_turn_book(&self) -> bool {
        false
    }

    /// The pool the search should score against
    ///
    /// # Errors
    /// Returns `SolverError` if the pool cannot be resampled.
    fn prepare_pool<'p>(
        &self,
        pool: &'p CandidatePool,
        _rng: &mut StdRng,
    ) -> Result<Cow<'p, CandidatePool>, SolverError> {
        Ok(Cow::Borrowed(pool))
    }

    /// Opening book used when none is configured
    fn default_book(&self) -> OpeningBook;
}

/// Runtime-selectable scoring strategy
///
/// Keeps static dispatch inside the scoring loop while letting the CLI pick
/// the variant.
#[derive(Debug, Clone)]
pub enum Scorer {
    /// Monte-Carlo estimate over the pool's prior weights
    Sampled(SampledScorer),
    /// Exact expectation over every candidate
    Exhaustive(ExhaustiveScorer),
}

impl ScoringStrategy for Scorer {
    fn name(&self) -> &'static str {
        match self {
            Self::Sampled(s) => s.name(),
            Self::Exhaustive(s) => s.name(),
        }
    }

    fn score(
        &self,
        guess: &Word,
        pool: &CandidatePool,
        rng: &mut StdRng,
    ) -> Result<ScoreRecord, SolverError> {
        match self {
            Self::Sampled(s) => s.score(guess, pool, rng),
            Self::Exhaustive(s) => s.score(guess, pool, rng),
        }
    }

    fn shortcut(&self, pool: &CandidatePool) -> Option<Word> {
        match self {
            Self::Sampled(s) => s.shortcut(pool),
            Self::Exhaustive(s) => s.shortcut(pool),
        }
    }

    fn uses_second_turn_book(&self) -> bool {
        match self {
            Self::Sampled(s) => s.uses_second_turn_book(),
            Self::Exhaustive(s) => s.uses_second_turn_book(),
        }
    }

    fn prepare_pool<'p>(
        &self,
        pool: &'p CandidatePool,
        rng: &mut StdRng,
    ) -> Result<Cow<'p, CandidatePool>, SolverError> {
        match self {
            Self::Sampled(s) => s.prepare_pool(pool, rng),
            Self::Exhaustive(s) => s.prepare_pool(pool, rng),
        }
    }

    fn default_book(&self) -> OpeningBook {
        match self {
            Self::Sampled(s) => s.default_book(),
            Self::Exhaustive(s) => s.default_book(),
        }
    }
}
