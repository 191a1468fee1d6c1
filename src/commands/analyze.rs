//! Word analysis command
//!
//! Scores one guess against the full candidate pool and ranks it against the
//! rest of the vocabulary.

use crate::core::{CandidatePool, Pattern, Word};
use crate::solver::{GuessOptimizer, ScoreRecord, ScoringStrategy, SolverError};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Result of analyzing a word
pub struct AnalysisResult {
    pub word: Word,
    pub score: ScoreRecord,
    /// 1-based position among all scored guesses
    pub rank: usize,
    pub best: Word,
    pub best_score: ScoreRecord,
    /// Distinct feedback patterns the guess can receive
    pub buckets: usize,
    pub largest_bucket: usize,
    /// Expected pool size after the guess, weighted by the prior
    pub expected_remaining: f64,
    pub total_candidates: usize,
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("'{0}' is not in the guess vocabulary")]
    NotInVocabulary(Word),
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Analyze `word` as a guess against `pool`
///
/// # Errors
///
/// Returns an error if:
/// - The word is not in the vocabulary
/// - Scoring the vocabulary fails
pub fn analyze_word<S: ScoringStrategy>(
    word: Word,
    optimizer: &mut GuessOptimizer<S>,
    vocabulary: &[Word],
    pool: &CandidatePool,
) -> Result<AnalysisResult, AnalyzeError> {
    if !vocabulary.contains(&word) {
        return Err(AnalyzeError::NotInVocabulary(word));
    }

    let scores = optimizer.score_all(vocabulary, pool)?;
    let ranked = scores.ranked(usize::MAX);
    let rank = ranked
        .iter()
        .position(|(w, _)| *w == word)
        .map_or(ranked.len(), |i| i + 1);
    let (best, best_score) = ranked.first().copied().ok_or(SolverError::EmptyVocabulary)?;
    let score = scores.get(&word).unwrap_or(ScoreRecord::WORST);

    // Prior mass per feedback pattern
    let mut buckets: FxHashMap<Pattern, (usize, f64)> = FxHashMap::default();
    for (answer, weight) in pool.iter() {
        let bucket = buckets
            .entry(Pattern::calculate(&word, &answer))
            .or_insert((0, 0.0));
        bucket.0 += 1;
        bucket.1 += weight;
    }
    let total_weight = pool.total_weight();
    let expected_remaining = if total_weight > 0.0 {
        buckets
            .values()
            .map(|(size, mass)| *size as f64 * mass / total_weight)
            .sum()
    } else {
        0.0
    };

    Ok(AnalysisResult {
        word,
        score,
        rank,
        best,
        best_score,
        buckets: buckets.len(),
        largest_bucket: buckets.values().map(|(size, _)| *size).max().unwrap_or(0),
        expected_remaining,
        total_candidates: pool.len(),
    })
}
