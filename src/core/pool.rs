//! Weighted candidate pool
//!
//! The pool is the posterior: every word still consistent with the feedback
//! seen so far, each carrying a prior weight.

use super::Word;
use rustc_hash::FxHashSet;

/// Words still consistent with all observed feedback, with prior weights
///
/// Words are unique. Weights are non-negative and finite; pools built by
/// the constructors sum to 1. Filtering keeps the original weights, so call
/// [`CandidatePool::normalized`] afterwards when a distribution is needed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePool {
    words: Vec<Word>,
    weights: Vec<f64>,
}

impl CandidatePool {
    /// Unweighted pool: every distinct word gets weight 1/n
    #[must_use]
    pub fn uniform<I>(words: I) -> Self
    where
        I: IntoIterator<Item = Word>,
    {
        let mut seen = FxHashSet::default();
        let words: Vec<Word> = words.into_iter().filter(|w| seen.insert(*w)).collect();
        let weight = if words.is_empty() {
            0.0
        } else {
            1.0 / words.len() as f64
        };
        let weights = vec![weight; words.len()];
        Self { words, weights }
    }

    /// Weighted pool from `(word, weight)` pairs
    ///
    /// Zero, negative and non-finite weights are dropped, later duplicates
    /// are ignored, and the remaining weights are normalized to sum to 1.
    #[must_use]
    pub fn weighted<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Word, f64)>,
    {
        let mut seen = FxHashSet::default();
        let (words, weights) = pairs
            .into_iter()
            .filter(|&(_, w)| w.is_finite() && w > 0.0)
            .filter(|(word, _)| seen.insert(*word))
            .unzip();
        Self { words, weights }.normalized()
    }

    /// Number of candidates
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when no candidate remains
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Candidate words in pool order
    #[inline]
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Candidate weights, aligned with [`CandidatePool::words`]
    #[inline]
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Iterate over `(word, weight)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (Word, f64)> + '_ {
        self.words.iter().copied().zip(self.weights.iter().copied())
    }

    /// True when `word` is a candidate
    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    /// Weight of `word`, or `None` if it is not a candidate
    #[must_use]
    pub fn weight_of(&self, word: &Word) -> Option<f64> {
        self.words
            .iter()
            .position(|w| w == word)
            .map(|i| self.weights[i])
    }

    /// Sum of all weights
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Copy of the pool with weights rescaled to sum to 1
    ///
    /// A pool whose weights sum to zero is returned unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total = self.total_weight();
        if total <= 0.0 {
            return self.clone();
        }
        Self {
            words: self.words.clone(),
            weights: self.weights.iter().map(|w| w / total).collect(),
        }
    }

    /// Subset of candidates satisfying `keep`, original weights retained
    #[must_use]
    pub fn retain<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Word) -> bool,
    {
        let (words, weights) = self.iter().filter(|(word, _)| keep(word)).unzip();
        Self { words, weights }
    }

    /// Highest-weight candidate, ties broken by lexical order
    #[must_use]
    pub fn most_probable(&self) -> Option<(Word, f64)> {
        self.iter().max_by(|(w1, p1), (w2, p2)| {
            p1.total_cmp(p2).then_with(|| w2.cmp(w1))
        })
    }

    /// Candidates ordered by weight (descending), then lexically
    #[must_use]
    pub fn ranked(&self) -> Vec<(Word, f64)> {
        let mut ranked: Vec<(Word, f64)> = self.iter().collect();
        ranked.sort_by(|(w1, p1), (w2, p2)| p2.total_cmp(p1).then_with(|| w1.cmp(w2)));
        ranked
    }
}
