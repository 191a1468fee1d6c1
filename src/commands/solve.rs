//! Word solving command
//!
//! Plays a known target through a game session and records every turn.

use crate::core::{Pattern, Word};
use crate::session::{Command, GameSession, SessionError};
use crate::solver::{ProposalSource, ScoreRecord, ScoringStrategy};
use thiserror::Error;

/// Configuration for solving a word
pub struct SolveConfig {
    pub target: Word,
    pub max_guesses: usize,
}

impl SolveConfig {
    #[must_use]
    pub const fn new(target: Word) -> Self {
        Self {
            target,
            max_guesses: 6,
        }
    }
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("'{0}' is not a candidate answer")]
    NotACandidate(Word),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Result of solving a word
pub struct SolveResult {
    pub success: bool,
    pub guesses: Vec<GuessStep>,
    pub target: Word,
}

/// A single guess step in the solution
pub struct GuessStep {
    pub word: Word,
    pub pattern: Pattern,
    pub candidates_before: usize,
    pub candidates_after: usize,
    pub source: ProposalSource,
    pub score: Option<ScoreRecord>,
}

/// Solve `config.target`, starting the session over first
///
/// # Errors
///
/// Returns an error if:
/// - The target is not in the session's candidate pool
/// - The session cannot provide a guess
pub fn solve_word<S: ScoringStrategy>(
    config: &SolveConfig,
    session: &mut GameSession<'_, S>,
) -> Result<SolveResult, SolveError> {
    session.apply(Command::Restart)?;
    if !session.pool().contains(&config.target) {
        return Err(SolveError::NotACandidate(config.target));
    }

    let mut guesses: Vec<GuessStep> = Vec::new();

    for _ in 0..config.max_guesses {
        let candidates_before = session.pool().len();
        let guess = session.next_guess()?;
        let (source, score) = session
            .pending_proposal()
            .map(|p| {
                let score = p.scores.as_ref().and_then(|s| s.get(&guess));
                (p.source, score)
            })
            .unwrap_or((ProposalSource::Search, None));

        let pattern = Pattern::calculate(&guess, &config.target);
        session.apply(Command::Pattern(pattern))?;

        guesses.push(GuessStep {
            word: guess,
            pattern,
            candidates_before,
            candidates_after: session.pool().len(),
            source,
            score,
        });

        if pattern.is_perfect() {
            return Ok(SolveResult {
                success: true,
                guesses,
                target: config.target,
            });
        }
    }

    Ok(SolveResult {
        success: false,
        guesses,
        target: config.target,
    })
}
