//! Solver configuration
//!
//! Plain settings collected from the command line, from which the scorer,
//! the opening book and the optimizer are built.

use super::book::{BookError, OpeningBook};
use super::engine::GuessOptimizer;
use super::scoring::{ExhaustiveScorer, SampledScorer, Scorer, ScoringStrategy};
use crate::core::Word;
use std::path::PathBuf;

/// Which scoring strategy to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Monte-Carlo over a frequency-weighted pool
    #[default]
    Sampled,
    /// Exact expectation over a uniform pool
    Exhaustive,
}

impl Variant {
    /// Parse a variant name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "sampled" | "sample" | "s" => Some(Self::Sampled),
            "exhaustive" | "exact" | "e" => Some(Self::Exhaustive),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sampled => "sampled",
            Self::Exhaustive => "exhaustive",
        }
    }
}

/// Tunables shared by every command
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub variant: Variant,
    pub num_samples: usize,
    pub posterior_clip: usize,
    pub confidence_threshold: f64,
    pub empty_split_penalty: f64,
    /// Fixed base seed, random when absent
    pub seed: Option<u64>,
    /// Opener override, replaces the book's opener and drops its table
    pub opener: Option<Word>,
    /// Opening book file, the variant's built-in opener when absent
    pub book_path: Option<PathBuf>,
    pub show_progress: bool,
}

impl SolverConfig {
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        let sampled = SampledScorer::default();
        Self {
            variant,
            num_samples: sampled.num_samples,
            posterior_clip: sampled.posterior_clip,
            confidence_threshold: sampled.confidence_threshold,
            empty_split_penalty: sampled.empty_split_penalty,
            seed: None,
            opener: None,
            book_path: None,
            show_progress: true,
        }
    }

    /// The configured scoring strategy
    #[must_use]
    pub fn scorer(&self) -> Scorer {
        match self.variant {
            Variant::Sampled => Scorer::Sampled(SampledScorer::new(
                self.num_samples,
                self.confidence_threshold,
                self.posterior_clip,
                self.empty_split_penalty,
            )),
            Variant::Exhaustive => {
                Scorer::Exhaustive(ExhaustiveScorer::new(self.empty_split_penalty))
            }
        }
    }

    /// Book file if given, otherwise the scorer's built-in opener; an opener
    /// override wins over both
    ///
    /// # Errors
    /// Returns `BookError` if the book file cannot be read or parsed.
    pub fn opening_book(&self, scorer: &Scorer) -> Result<OpeningBook, BookError> {
        let book = match &self.book_path {
            Some(path) => OpeningBook::load(path)?,
            None => scorer.default_book(),
        };

        Ok(match self.opener {
            Some(opener) if opener != book.opener() => OpeningBook::new(opener),
            _ => book,
        })
    }

    /// Build the optimizer for this configuration
    ///
    /// # Errors
    /// Returns `BookError` if the opening book cannot be loaded.
    pub fn optimizer(&self) -> Result<GuessOptimizer<Scorer>, BookError> {
        let scorer = self.scorer();
        let book = self.opening_book(&scorer)?;

        let optimizer = GuessOptimizer::new(scorer)
            .with_book(book)
            .with_progress(self.show_progress);
        Ok(match self.seed {
            Some(seed) => optimizer.with_seed(seed),
            None => optimizer,
        })
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}
