//! Guess selection
//!
//! Posterior filtering, guess scoring strategies, the opening book and the
//! optimizer that ties them together.

mod book;
mod config;
mod engine;
mod error;
pub mod filter;
mod score;
pub mod scoring;

pub use book::{BookError, OpeningBook};
pub use config::{SolverConfig, Variant};
pub use engine::{GuessOptimizer, Proposal, ProposalSource, TurnContext};
pub use error::SolverError;
pub use filter::{Constraint, refine};
pub use score::{ScoreMap, ScoreRecord};
pub use scoring::{ExhaustiveScorer, SampledScorer, Scorer, ScoringStrategy};
