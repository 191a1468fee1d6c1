//! Wordle ABC
//!
//! An interactive Wordle solver. Each turn it scores every allowed guess by
//! how far it narrows the candidate pool, either exactly or by sampling
//! answers from a frequency prior, and refines the pool with the feedback
//! the operator reports.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_abc::core::{CandidatePool, Pattern, Word};
//! use wordle_abc::solver::{ExhaustiveScorer, GuessOptimizer, TurnContext, refine};
//!
//! let words: Vec<Word> = ["crane", "plant", "slant", "grant"]
//!     .iter()
//!     .map(|w| Word::new(w).unwrap())
//!     .collect();
//! let pool = CandidatePool::uniform(words.iter().copied());
//!
//! let mut optimizer = GuessOptimizer::new(ExhaustiveScorer::default()).with_seed(7);
//! let guess = optimizer
//!     .propose(&words, &pool, &TurnContext::new(2, None))
//!     .unwrap()
//!     .guess;
//!
//! // Feedback against the hidden answer CRANE
//! let pattern = Pattern::calculate(&guess, &words[0]);
//! let pool = refine(&guess, pattern, &pool);
//! assert_eq!(pool.words(), [words[0]]);
//! ```

// Core domain types
pub mod core;

// Guess scoring and selection
pub mod solver;

// Game state machine
pub mod session;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
