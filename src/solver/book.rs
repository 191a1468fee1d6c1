//! Opening book
//!
//! A fixed first guess plus, optionally, the best second guess for every
//! feedback the first guess can receive. The first-turn split depends only
//! on the reported pattern, so the second guess can be computed ahead of
//! time and looked up instead of searched.
//!
//! Book files are plain text:
//!
//! ```text
//! # comments and blank lines are ignored
//! salet
//! xxxxx courd
//! xxyxx inorb
//! ```
//!
//! The first entry is the opener, every following line maps a pattern to
//! the second guess.

use super::engine::GuessOptimizer;
use super::filter::refine;
use super::scoring::ScoringStrategy;
use super::SolverError;
use crate::core::{CandidatePool, Pattern, PatternError, Word, WordError};
use indicatif::ProgressBar;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reading or writing a book file
#[derive(Debug, Error)]
pub enum BookError {
    #[error("cannot access opening book {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("opening book has no opener")]
    MissingOpener,
    #[error("line {line}: invalid opener: {source}")]
    InvalidOpener { line: usize, source: WordError },
    #[error("line {line}: expected '<pattern> <word>'")]
    MalformedLine { line: usize },
    #[error("line {line}: {source}")]
    InvalidPattern { line: usize, source: PatternError },
    #[error("line {line}: {source}")]
    InvalidWord { line: usize, source: WordError },
}

/// Precomputed first guess and second-turn replies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningBook {
    opener: Word,
    replies: FxHashMap<Pattern, Word>,
}

impl OpeningBook {
    /// Book with an opener and no second-turn table
    #[must_use]
    pub fn new(opener: Word) -> Self {
        Self {
            opener,
            replies: FxHashMap::default(),
        }
    }

    /// Add (or replace) the reply for one first-turn pattern
    #[must_use]
    pub fn with_reply(mut self, pattern: Pattern, reply: Word) -> Self {
        self.replies.insert(pattern, reply);
        self
    }

    #[must_use]
    pub const fn opener(&self) -> Word {
        self.opener
    }

    /// Second guess after the opener received `pattern`
    #[must_use]
    pub fn reply(&self, pattern: Pattern) -> Option<Word> {
        self.replies.get(&pattern).copied()
    }

    /// Number of second-turn entries
    #[must_use]
    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }

    /// Second-turn entries ordered by pattern
    #[must_use]
    pub fn replies(&self) -> Vec<(Pattern, Word)> {
        let mut replies: Vec<(Pattern, Word)> =
            self.replies.iter().map(|(p, w)| (*p, *w)).collect();
        replies.sort_unstable();
        replies
    }

    /// Parse the text format described in the module docs
    ///
    /// # Errors
    /// Returns `BookError` naming the first offending line.
    pub fn parse(text: &str) -> Result<Self, BookError> {
        let mut entries = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (line, opener) = entries.next().ok_or(BookError::MissingOpener)?;
        let opener = Word::new(opener).map_err(|source| BookError::InvalidOpener { line, source })?;
        let mut book = Self::new(opener);

        for (line, entry) in entries {
            let mut fields = entry.split_whitespace();
            let (Some(pattern), Some(reply), None) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(BookError::MalformedLine { line });
            };

            let pattern =
                Pattern::parse(pattern).map_err(|source| BookError::InvalidPattern { line, source })?;
            let reply = Word::new(reply).map_err(|source| BookError::InvalidWord { line, source })?;
            book.replies.insert(pattern, reply);
        }

        Ok(book)
    }

    /// Read a book file
    ///
    /// # Errors
    /// Returns `BookError` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BookError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| BookError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Write the book in the text format
    ///
    /// # Errors
    /// Returns `BookError::Io` if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BookError> {
        let path = path.as_ref();
        fs::write(path, self.to_string()).map_err(|source| BookError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Search the best second guess for every pattern `opener` can receive
    /// against `pool`
    ///
    /// Patterns that already identify a single candidate map to that
    /// candidate; the all-green pattern gets no entry.
    ///
    /// # Errors
    /// Returns `SolverError` if any search fails.
    pub fn precompute<S: ScoringStrategy>(
        optimizer: &mut GuessOptimizer<S>,
        vocabulary: &[Word],
        pool: &CandidatePool,
        opener: Word,
        progress: &ProgressBar,
    ) -> Result<Self, SolverError> {
        let patterns: BTreeSet<Pattern> = pool
            .words()
            .iter()
            .map(|answer| Pattern::calculate(&opener, answer))
            .filter(|pattern| !pattern.is_perfect())
            .collect();

        progress.set_length(patterns.len() as u64);
        let mut book = Self::new(opener);

        for pattern in patterns {
            progress.set_message(pattern.to_string());
            let remaining = refine(&opener, pattern, pool).normalized();

            let reply = match remaining.words() {
                [] => None,
                [only] => Some(*only),
                _ => Some(optimizer.search(vocabulary, &remaining)?.guess),
            };
            if let Some(reply) = reply {
                book.replies.insert(pattern, reply);
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
        Ok(book)
    }
}

impl fmt::Display for OpeningBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.opener)?;
        for (pattern, reply) in self.replies() {
            writeln!(f, "{pattern} {reply}")?;
        }
        Ok(())
    }
}
