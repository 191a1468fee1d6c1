//! Benchmark command
//!
//! Plays many known targets through one session and reports the guess
//! distribution.

use super::solve::{SolveConfig, SolveError, solve_word};
use crate::core::Word;
use crate::output::formatters::progress_bar;
use crate::session::GameSession;
use crate::solver::ScoringStrategy;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub total_words: usize,
    pub solved: usize,
    pub failed: Vec<Word>,
    pub total_guesses: usize,
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    /// Guess count → number of solved targets
    pub distribution: BTreeMap<usize, usize>,
    pub duration: Duration,
    pub words_per_second: f64,
}

/// Solve every target in turn
///
/// Targets not solved within `max_guesses` are listed in `failed` and left
/// out of the guess statistics.
///
/// # Errors
///
/// Returns `SolveError` if a target is not a candidate or the session fails.
pub fn run_benchmark<S: ScoringStrategy>(
    session: &mut GameSession<'_, S>,
    targets: &[Word],
    max_guesses: usize,
    show_progress: bool,
) -> Result<BenchmarkResult, SolveError> {
    let start = Instant::now();
    let mut total_guesses = 0;
    let mut min_guesses = usize::MAX;
    let mut max_seen = 0;
    let mut failed = Vec::new();
    let mut distribution: BTreeMap<usize, usize> = BTreeMap::new();

    let pb = progress_bar(targets.len(), show_progress);

    for target in targets {
        let mut config = SolveConfig::new(*target);
        config.max_guesses = max_guesses;
        let result = solve_word(&config, session)?;

        if result.success {
            let guesses = result.guesses.len();
            total_guesses += guesses;
            min_guesses = min_guesses.min(guesses);
            max_seen = max_seen.max(guesses);
            *distribution.entry(guesses).or_insert(0) += 1;
        } else {
            failed.push(*target);
        }

        pb.inc(1);
        let solved: usize = distribution.values().sum();
        if solved > 0 {
            pb.set_message(format!("avg {:.3}", total_guesses as f64 / solved as f64));
        }
    }
    pb.finish_and_clear();

    let duration = start.elapsed();
    let total_words = targets.len();
    let solved = total_words - failed.len();

    Ok(BenchmarkResult {
        total_words,
        solved,
        failed,
        total_guesses,
        average_guesses: if solved > 0 {
            total_guesses as f64 / solved as f64
        } else {
            0.0
        },
        min_guesses: if solved > 0 { min_guesses } else { 0 },
        max_guesses: max_seen,
        distribution,
        duration,
        words_per_second: if duration.as_secs_f64() > 0.0 {
            total_words as f64 / duration.as_secs_f64()
        } else {
            0.0
        },
    })
}
