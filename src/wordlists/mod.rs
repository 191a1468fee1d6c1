//! Word lists and the pools built from them
//!
//! The sampled variant plays over a vocabulary weighted by word frequency;
//! the exhaustive variant plays over a uniform answer list guessed from a
//! larger allowed list.

pub mod loader;

use crate::core::{CandidatePool, Word};
use rustc_hash::{FxHashMap, FxHashSet};

/// Pool of `words` weighted by frequency
///
/// Words with no or zero frequency cannot be the answer and are left out.
#[must_use]
pub fn frequency_pool(words: &[Word], frequencies: &FxHashMap<Word, u64>) -> CandidatePool {
    CandidatePool::weighted(words.iter().filter_map(|word| {
        frequencies
            .get(word)
            .filter(|&&count| count > 0)
            .map(|&count| (*word, count as f64))
    }))
}

/// Uniform pool over the answer list plus any extra answers
#[must_use]
pub fn union_pool(answers: &[Word], extra: &[Word]) -> CandidatePool {
    CandidatePool::uniform(answers.iter().chain(extra).copied())
}

/// Guess vocabulary: the allowed list plus every pool word it is missing
#[must_use]
pub fn union_vocabulary(allowed: &[Word], pool: &CandidatePool) -> Vec<Word> {
    let mut seen: FxHashSet<Word> = FxHashSet::default();
    allowed
        .iter()
        .chain(pool.words())
        .copied()
        .filter(|word| seen.insert(*word))
        .collect()
}
