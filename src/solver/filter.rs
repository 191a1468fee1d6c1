//! Posterior narrowing
//!
//! Turns one (guess, feedback) observation into a per-candidate test and
//! applies it to a pool.

use crate::core::{CandidatePool, Pattern, Tile, Word};

/// Letter-count and position constraints implied by one observation
///
/// `present[letter]` is the number of non-gray tiles the guess received for
/// that letter. Given a truthful pattern it equals the letter's occurrence
/// count in the answer, up to the number of times the guess used it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint {
    guess: Word,
    tiles: [Tile; 5],
    present: [u8; 26],
}

impl Constraint {
    /// Precompute the constraint for `guess` observed with `pattern`
    #[must_use]
    pub fn new(guess: &Word, pattern: Pattern) -> Self {
        let tiles = pattern.tiles();
        let mut present = [0u8; 26];
        for (&ch, tile) in guess.chars().iter().zip(tiles) {
            if tile != Tile::Gray {
                present[usize::from(ch - b'a')] += 1;
            }
        }
        Self {
            guess: *guess,
            tiles,
            present,
        }
    }

    /// True when `candidate` is consistent with the observation
    ///
    /// - gray: the candidate holds the letter at most `present` times, so a
    ///   letter marked gray at one slot and yellow/green at another is
    ///   bounded rather than forbidden
    /// - yellow: at least `present` occurrences, and not at this slot
    /// - green: the letter sits at this slot
    #[must_use]
    pub fn admits(&self, candidate: &Word) -> bool {
        let counts = candidate.letter_counts();
        self.guess
            .chars()
            .iter()
            .zip(self.tiles)
            .enumerate()
            .all(|(i, (&letter, tile))| {
                let index = usize::from(letter - b'a');
                match tile {
                    Tile::Gray => counts[index] <= self.present[index],
                    Tile::Yellow => {
                        counts[index] >= self.present[index] && candidate.char_at(i) != letter
                    }
                    Tile::Green => candidate.char_at(i) == letter,
                }
            })
    }
}

/// Candidates of `pool` consistent with `guess` having produced `observed`
///
/// The result is always a subset of `pool` with the original weights, and
/// reapplying the same observation changes nothing. An empty result means
/// the reported feedback contradicts every candidate; detecting that is up
/// to the caller.
///
/// # Examples
/// ```
/// use wordle_abc::core::{CandidatePool, Pattern, Word};
/// use wordle_abc::solver::refine;
///
/// let words = ["crane", "plant", "slant", "grant"].map(|w| Word::new(w).unwrap());
/// let pool = CandidatePool::uniform(words);
/// let guess = Word::new("grant").unwrap();
/// let refined = refine(&guess, Pattern::parse("xgggx").unwrap(), &pool);
///
/// assert_eq!(refined.words(), &[Word::new("crane").unwrap()]);
/// ```
#[must_use]
pub fn refine(guess: &Word, observed: Pattern, pool: &CandidatePool) -> CandidatePool {
    let constraint = Constraint::new(guess, observed);
    pool.retain(|candidate| constraint.admits(candidate))
}
