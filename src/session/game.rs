//! Turn-by-turn game state
//!
//! The session owns the evolving candidate pool and the optimizer. It emits
//! one guess per turn and consumes exactly one operator command at a time.

use super::command::Command;
use crate::core::{CandidatePool, Pattern, Word};
use crate::solver::{
    GuessOptimizer, Proposal, ProposalSource, ScoringStrategy, SolverError, TurnContext, refine,
};
use rustc_hash::FxHashSet;
use std::borrow::Cow;
use thiserror::Error;

/// Where the session is in the turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Ready to compute the next guess
    AwaitingGuessChoice,
    /// A guess was emitted, waiting for its feedback
    AwaitingFeedback,
}

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Replacement for a guess the game rejected
    Guess(Word),
    /// Remaining candidates, most probable first
    Candidates(Vec<Word>),
    /// Feedback applied
    Refined { remaining: usize },
    Restarted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("no guess is waiting for feedback")]
    NoPendingGuess,

    #[error("feedback for '{0}' is still pending")]
    FeedbackPending(Word),

    /// The reported feedback eliminates every candidate; nothing was changed
    #[error("feedback {pattern} for '{guess}' leaves no candidates, check the pattern")]
    Contradiction { guess: Word, pattern: Pattern },

    #[error("every scored guess has been rejected")]
    NoGuessAvailable,
}

/// An interactive game against one hidden answer
pub struct GameSession<'a, S: ScoringStrategy> {
    optimizer: GuessOptimizer<S>,
    vocabulary: &'a [Word],
    initial_pool: CandidatePool,
    pool: CandidatePool,
    turn: usize,
    last_feedback: Option<(Word, Pattern)>,
    pending: Option<Proposal>,
    rejected: FxHashSet<Word>,
    state: SessionState,
}

impl<'a, S: ScoringStrategy> GameSession<'a, S> {
    /// Start a game on turn 1 with a fresh copy of `initial_pool`
    pub fn new(
        optimizer: GuessOptimizer<S>,
        vocabulary: &'a [Word],
        initial_pool: CandidatePool,
    ) -> Self {
        let initial_pool = initial_pool.normalized();
        Self {
            optimizer,
            vocabulary,
            pool: initial_pool.clone(),
            initial_pool,
            turn: 1,
            last_feedback: None,
            pending: None,
            rejected: FxHashSet::default(),
            state: SessionState::AwaitingGuessChoice,
        }
    }

    pub const fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    /// 1-based turn number
    pub const fn turn(&self) -> usize {
        self.turn
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Guess and feedback applied last
    pub const fn last_feedback(&self) -> Option<(Word, Pattern)> {
        self.last_feedback
    }

    pub fn pending_guess(&self) -> Option<Word> {
        self.pending.as_ref().map(|p| p.guess)
    }

    /// The proposal waiting for feedback, with its scores if a search ran
    pub const fn pending_proposal(&self) -> Option<&Proposal> {
        self.pending.as_ref()
    }

    pub const fn optimizer(&self) -> &GuessOptimizer<S> {
        &self.optimizer
    }

    /// Only one candidate left; informational, the session keeps running
    pub fn is_solved(&self) -> bool {
        self.pool.len() == 1
    }

    /// Compute and emit the guess for this turn
    ///
    /// # Errors
    /// Returns `SessionError::FeedbackPending` if the previous guess has not
    /// been answered yet, or the optimizer's error.
    pub fn next_guess(&mut self) -> Result<Word, SessionError> {
        if let Some(pending) = &self.pending {
            return Err(SessionError::FeedbackPending(pending.guess));
        }

        let ctx = TurnContext::new(self.turn, self.last_feedback);
        let vocabulary = self.vocabulary();
        let proposal = self.optimizer.propose(&vocabulary, &self.pool, &ctx)?;
        let guess = proposal.guess;

        self.pending = Some(proposal);
        self.state = SessionState::AwaitingFeedback;
        Ok(guess)
    }

    /// Apply one operator command
    ///
    /// # Errors
    /// Returns `SessionError` if the command does not fit the current state,
    /// if feedback contradicts the pool (the pool is left unchanged), or if
    /// no replacement guess can be found.
    pub fn apply(&mut self, command: Command) -> Result<Outcome, SessionError> {
        match command {
            Command::Pattern(pattern) => {
                let guess = self.pending_guess().ok_or(SessionError::NoPendingGuess)?;
                let remaining = self.narrow(guess, pattern)?;
                Ok(Outcome::Refined { remaining })
            }
            Command::InvalidGuess => self.reject_pending().map(Outcome::Guess),
            Command::ListCandidates => Ok(Outcome::Candidates(
                self.pool.ranked().into_iter().map(|(w, _)| w).collect(),
            )),
            Command::ManualOverride(word, pattern) => {
                let remaining = self.narrow(word, pattern)?;
                Ok(Outcome::Refined { remaining })
            }
            Command::Restart => {
                self.restart();
                Ok(Outcome::Restarted)
            }
        }
    }

    /// Refine the pool with one guess/feedback pair and advance the turn
    fn narrow(&mut self, guess: Word, pattern: Pattern) -> Result<usize, SessionError> {
        let refined = refine(&guess, pattern, &self.pool);
        if refined.is_empty() {
            return Err(SessionError::Contradiction { guess, pattern });
        }

        self.pool = refined.normalized();
        self.turn += 1;
        self.last_feedback = Some((guess, pattern));
        self.pending = None;
        self.state = SessionState::AwaitingGuessChoice;
        Ok(self.pool.len())
    }

    /// Exclude the pending guess for the rest of the game and pick the next
    /// best one
    ///
    /// A shortcut proposal carries no scores, so a full search runs first.
    fn reject_pending(&mut self) -> Result<Word, SessionError> {
        let rejected = self.pending_guess().ok_or(SessionError::NoPendingGuess)?;
        let mut replacement = self.pending.clone().ok_or(SessionError::NoPendingGuess)?;

        if replacement.scores.is_none() {
            let vocabulary: Vec<Word> = self
                .vocabulary()
                .iter()
                .filter(|w| **w != rejected)
                .copied()
                .collect();
            replacement = match self.optimizer.search(&vocabulary, &self.pool) {
                Ok(proposal) => proposal,
                Err(SolverError::EmptyVocabulary) => return Err(SessionError::NoGuessAvailable),
                Err(e) => return Err(e.into()),
            };
        }

        let scores = replacement
            .scores
            .as_mut()
            .ok_or(SessionError::NoGuessAvailable)?;
        scores.disqualify(&rejected);
        let next = scores.best().ok_or(SessionError::NoGuessAvailable)?;
        replacement.guess = next;
        replacement.source = ProposalSource::Search;

        // Only a guess that was actually replaced counts as rejected
        self.rejected.insert(rejected);
        self.pending = Some(replacement);
        Ok(next)
    }

    fn restart(&mut self) {
        self.pool = self.initial_pool.clone();
        self.turn = 1;
        self.last_feedback = None;
        self.pending = None;
        self.rejected.clear();
        self.state = SessionState::AwaitingGuessChoice;
    }

    /// Vocabulary without the words rejected this game
    fn vocabulary(&self) -> Cow<'a, [Word]> {
        if self.rejected.is_empty() {
            return Cow::Borrowed(self.vocabulary);
        }
        Cow::Owned(
            self.vocabulary
                .iter()
                .filter(|w| !self.rejected.contains(*w))
                .copied()
                .collect(),
        )
    }
}
