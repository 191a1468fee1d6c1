//! Exact expected-remaining scoring
//!
//! Every candidate is treated in turn as the hidden answer.

use super::ScoringStrategy;
use crate::core::{CandidatePool, Pattern, Word};
use crate::solver::filter::Constraint;
use crate::solver::{OpeningBook, ScoreRecord, SolverError};
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;

/// Precomputed best opener for the exhaustive search
const OPENER: Word = Word::from_array(*b"salet");

/// Exact expectation over the full candidate set
///
/// For each candidate `t`: simulate the feedback of the guess against `t`,
/// refine the pool with it, and add `-|refined|` to the primary score and
/// the number of greens to the secondary score.
#[derive(Debug, Clone, PartialEq)]
pub struct ExhaustiveScorer {
    /// An empty simulated split costs `empty_split_penalty × |pool|`
    pub empty_split_penalty: f64,
}

impl ExhaustiveScorer {
    #[must_use]
    pub const fn new(empty_split_penalty: f64) -> Self {
        Self {
            empty_split_penalty,
        }
    }

    /// Cost of one simulated split
    ///
    /// An empty refinement must not look like a perfect split, so it costs
    /// as much as keeping the whole pool (times the penalty).
    fn split_cost(&self, survivors: usize, pool_len: usize) -> f64 {
        if survivors == 0 {
            self.empty_split_penalty * pool_len as f64
        } else {
            survivors as f64
        }
    }
}

impl Default for ExhaustiveScorer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ScoringStrategy for ExhaustiveScorer {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn score(
        &self,
        guess: &Word,
        pool: &CandidatePool,
        _rng: &mut StdRng,
    ) -> Result<ScoreRecord, SolverError> {
        if pool.is_empty() {
            return Err(SolverError::EmptyPool);
        }

        // Targets sharing a pattern share the refined pool
        let mut splits: FxHashMap<Pattern, usize> = FxHashMap::default();
        for target in pool.words() {
            *splits.entry(Pattern::calculate(guess, target)).or_insert(0) += 1;
        }

        let mut primary = 0.0;
        let mut secondary = 0.0;
        for (pattern, hits) in splits {
            let constraint = Constraint::new(guess, pattern);
            let survivors = pool.words().iter().filter(|w| constraint.admits(w)).count();
            let hits = hits as f64;

            primary -= self.split_cost(survivors, pool.len()) * hits;
            secondary += f64::from(pattern.count_greens()) * hits;
        }

        Ok(ScoreRecord::new(primary, secondary))
    }

    fn uses_second_turn_book(&self) -> bool {
        true
    }

    fn default_book(&self) -> OpeningBook {
        OpeningBook::new(OPENER)
    }
}
