//! Opening book precomputation
//!
//! Searches the best second guess for every feedback the opener can get and
//! writes the table in the book file format.

use crate::core::{CandidatePool, Word};
use crate::output::formatters::progress_bar;
use crate::solver::{BookError, GuessOptimizer, OpeningBook, ScoringStrategy, SolverError};
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;

pub struct PrecomputeResult {
    pub book: OpeningBook,
    pub duration: Duration,
}

#[derive(Debug, Error)]
pub enum PrecomputeError {
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error(transparent)]
    Book(#[from] BookError),
}

/// Build the book for `opener` and, if `output` is given, save it there
///
/// # Errors
///
/// Returns an error if a search fails or the file cannot be written.
pub fn precompute_book<S: ScoringStrategy>(
    optimizer: &mut GuessOptimizer<S>,
    vocabulary: &[Word],
    pool: &CandidatePool,
    opener: Word,
    output: Option<&Path>,
    show_progress: bool,
) -> Result<PrecomputeResult, PrecomputeError> {
    let start = Instant::now();
    let pb = progress_bar(0, show_progress);
    let book = OpeningBook::precompute(optimizer, vocabulary, pool, opener, &pb)?;

    if let Some(path) = output {
        book.save(path)?;
    }

    Ok(PrecomputeResult {
        book,
        duration: start.elapsed(),
    })
}
