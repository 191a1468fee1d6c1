//! Per-guess scores and the score map collected from a search

use crate::core::Word;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;

/// Score of one guess against the current pool
///
/// Higher is better for both metrics. `primary` estimates how far the guess
/// narrows the pool, `secondary` (expected greens) breaks ties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRecord {
    pub primary: f64,
    pub secondary: f64,
}

impl ScoreRecord {
    /// Worst possible record, used to disqualify a guess
    pub const WORST: Self = Self {
        primary: f64::NEG_INFINITY,
        secondary: f64::NEG_INFINITY,
    };

    #[must_use]
    pub const fn new(primary: f64, secondary: f64) -> Self {
        Self { primary, secondary }
    }

    /// Total order: primary first, then secondary
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.primary
            .total_cmp(&other.primary)
            .then_with(|| self.secondary.total_cmp(&other.secondary))
    }
}

/// Every scored guess of one search, with rejected words excluded from
/// selection
#[derive(Debug, Clone, Default)]
pub struct ScoreMap {
    entries: FxHashMap<Word, ScoreRecord>,
    disqualified: FxHashSet<Word>,
}

impl ScoreMap {
    #[must_use]
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Word, ScoreRecord)>,
    {
        Self {
            entries: entries.into_iter().collect(),
            disqualified: FxHashSet::default(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, word: &Word) -> Option<ScoreRecord> {
        self.entries.get(word).copied()
    }

    /// Mark `word` as the worst possible guess
    ///
    /// Returns false if the word was never scored.
    pub fn disqualify(&mut self, word: &Word) -> bool {
        match self.entries.get_mut(word) {
            Some(record) => {
                *record = ScoreRecord::WORST;
                self.disqualified.insert(*word);
                true
            }
            None => false,
        }
    }

    /// The winning guess
    ///
    /// Maximum primary score, then maximum secondary score, then the
    /// lexically smallest word. Disqualified words never win.
    #[must_use]
    pub fn best(&self) -> Option<Word> {
        self.entries
            .iter()
            .filter(|(word, _)| !self.disqualified.contains(*word))
            .max_by(|(w1, r1), (w2, r2)| r1.rank_cmp(r2).then_with(|| w2.cmp(w1)))
            .map(|(word, _)| *word)
    }

    /// The `limit` best entries in winning order
    #[must_use]
    pub fn ranked(&self, limit: usize) -> Vec<(Word, ScoreRecord)> {
        let mut ranked: Vec<(Word, ScoreRecord)> = self
            .entries
            .iter()
            .filter(|(word, _)| !self.disqualified.contains(*word))
            .map(|(word, record)| (*word, *record))
            .collect();
        ranked.sort_by(|(w1, r1), (w2, r2)| r2.rank_cmp(r1).then_with(|| w1.cmp(w2)));
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    #[test]
    fn best_prefers_primary_then_secondary_then_word() {
        let map = ScoreMap::from_entries([
            (word("slant"), ScoreRecord::new(-4.0, 14.0)),
            (word("plant"), ScoreRecord::new(-4.0, 14.0)),
            (word("grant"), ScoreRecord::new(-6.0, 14.0)),
            (word("crane"), ScoreRecord::new(-4.0, 12.0)),
        ]);
        assert_eq!(map.best(), Some(word("plant")));

        let ranked: Vec<Word> = map.ranked(4).into_iter().map(|(w, _)| w).collect();
        assert_eq!(
            ranked,
            [word("plant"), word("slant"), word("crane"), word("grant")]
        );
    }

    #[test]
    fn disqualified_words_are_skipped() {
        let mut map = ScoreMap::from_entries([
            (word("plant"), ScoreRecord::new(-4.0, 14.0)),
            (word("grant"), ScoreRecord::new(-6.0, 14.0)),
        ]);
        assert!(map.disqualify(&word("plant")));
        assert_eq!(map.get(&word("plant")), Some(ScoreRecord::WORST));
        assert_eq!(map.best(), Some(word("grant")));

        assert!(map.disqualify(&word("grant")));
        assert_eq!(map.best(), None);
        assert!(!map.disqualify(&word("crane")));
    }

    #[test]
    fn rank_cmp_orders_worst_lowest() {
        let record = ScoreRecord::new(-1000.0, 0.0);
        assert_eq!(ScoreRecord::WORST.rank_cmp(&record), Ordering::Less);
        assert_eq!(record.rank_cmp(&record), Ordering::Equal);
    }
}
