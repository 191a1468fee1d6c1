//! Monte-Carlo scoring over a weighted pool
//!
//! Hidden answers are drawn from the pool's prior, so common words dominate
//! the estimate. Results vary run to run unless the rng is seeded.

use super::ScoringStrategy;
use crate::core::{CandidatePool, Pattern, Word};
use crate::solver::filter::Constraint;
use crate::solver::{OpeningBook, ScoreRecord, SolverError};
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use rustc_hash::{FxHashMap, FxHashSet};
use std::borrow::Cow;

/// Precomputed best opener for the sampled search
const OPENER: Word = Word::from_array(*b"tares");

/// Weighted Monte-Carlo estimate of how well a guess narrows the pool
///
/// Also owns the early-exit and pool down-sampling rules, which only make
/// sense when the pool carries a prior.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledScorer {
    /// Hidden answers drawn per guess (capped at the pool size)
    pub num_samples: usize,
    /// Play the most probable candidate once its prior exceeds this
    pub confidence_threshold: f64,
    /// Larger pools are down-sampled to this many draws before a search
    pub posterior_clip: usize,
    /// An empty simulated split weighs `empty_split_penalty × total weight`
    pub empty_split_penalty: f64,
}

impl SampledScorer {
    #[must_use]
    pub const fn new(
        num_samples: usize,
        confidence_threshold: f64,
        posterior_clip: usize,
        empty_split_penalty: f64,
    ) -> Self {
        Self {
            num_samples,
            confidence_threshold,
            posterior_clip,
            empty_split_penalty,
        }
    }

    /// Sampler over the pool's prior weights
    fn sampler(pool: &CandidatePool) -> Result<WeightedIndex<f64>, SolverError> {
        if pool.is_empty() {
            return Err(SolverError::EmptyPool);
        }
        WeightedIndex::new(pool.weights()).map_err(|e| SolverError::InvalidWeights(e.to_string()))
    }
}

impl Default for SampledScorer {
    fn default() -> Self {
        Self::new(32, 0.8, 128, 1.0)
    }
}

impl ScoringStrategy for SampledScorer {
    fn name(&self) -> &'static str {
        "sampled"
    }

    /// Primary score is `|pool| / Σ run_scores`, where a run score is the
    /// prior mass that survives refinement with one sampled answer's
    /// feedback. Secondary score is sampled greens per candidate.
    fn score(
        &self,
        guess: &Word,
        pool: &CandidatePool,
        rng: &mut StdRng,
    ) -> Result<ScoreRecord, SolverError> {
        let sampler = Self::sampler(pool)?;
        let samples = self.num_samples.min(pool.len());
        let floor = self.empty_split_penalty * pool.total_weight();

        let mut surviving_mass: FxHashMap<Pattern, f64> = FxHashMap::default();
        let mut total_mass = 0.0;
        let mut greens = 0u32;

        for _ in 0..samples {
            let target = pool.words()[sampler.sample(rng)];
            let pattern = Pattern::calculate(guess, &target);
            let mass = *surviving_mass.entry(pattern).or_insert_with(|| {
                let constraint = Constraint::new(guess, pattern);
                let mass: f64 = pool
                    .iter()
                    .filter(|(word, _)| constraint.admits(word))
                    .map(|(_, weight)| weight)
                    .sum();
                if mass > 0.0 { mass } else { floor }
            });

            total_mass += mass;
            greens += u32::from(pattern.count_greens());
        }

        let size = pool.len() as f64;
        Ok(ScoreRecord::new(size / total_mass, f64::from(greens) / size))
    }

    /// The most probable candidate, once its prior passes the confidence
    /// threshold or only two candidates are left
    fn shortcut(&self, pool: &CandidatePool) -> Option<Word> {
        let (best, weight) = pool.most_probable()?;
        let total = pool.total_weight();
        let probability = if total > 0.0 { weight / total } else { 0.0 };

        (probability > self.confidence_threshold || pool.len() == 2).then_some(best)
    }

    /// Bound the search cost: pools larger than `posterior_clip` are
    /// replaced by the distinct words of `posterior_clip` weighted draws,
    /// keeping their prior weights, renormalized
    fn prepare_pool<'p>(
        &self,
        pool: &'p CandidatePool,
        rng: &mut StdRng,
    ) -> Result<Cow<'p, CandidatePool>, SolverError> {
        if pool.len() <= self.posterior_clip {
            return Ok(Cow::Borrowed(pool));
        }

        let sampler = Self::sampler(pool)?;
        let drawn: FxHashSet<Word> = (0..self.posterior_clip)
            .map(|_| pool.words()[sampler.sample(rng)])
            .collect();

        Ok(Cow::Owned(
            pool.retain(|word| drawn.contains(word)).normalized(),
        ))
    }

    fn default_book(&self) -> OpeningBook {
        OpeningBook::new(OPENER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    fn pool_of(words: &[&str]) -> CandidatePool {
        CandidatePool::uniform(words.iter().map(|w| word(w)))
    }

    /// Distinct synthetic words, enough to exceed the clip
    fn synthetic_pool(size: usize) -> CandidatePool {
        CandidatePool::uniform((0..size).map(|i| {
            let a = b'a' + (i % 26) as u8;
            let b = b'a' + ((i / 26) % 26) as u8;
            Word::new(std::str::from_utf8(&[a, b, b'x', b'y', b'z']).unwrap()).unwrap()
        }))
    }

    const SPREAD: [&str; 30] = [
        "crane", "plant", "slant", "grant", "brine", "shine", "stone", "store", "adore", "alone",
        "abode", "trace", "grace", "brace", "place", "plane", "crate", "irate", "slate", "stale",
        "steal", "least", "beast", "feast", "roast", "toast", "boast", "coast", "ghost", "hoist",
    ];

    #[test]
    fn seeded_scoring_is_reproducible() {
        let scorer = SampledScorer::default();
        let pool = pool_of(&SPREAD);
        let guess = word("crane");

        let first = scorer
            .score(&guess, &pool, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let second = scorer
            .score(&guess, &pool, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn perfect_splitter_beats_non_splitter() {
        // Sample size equals the pool size. ZZZZZ keeps the whole mass for
        // every draw; PLANT isolates each candidate (mass 1/4 per draw).
        let scorer = SampledScorer::new(4, 0.8, 128, 1.0);
        let pool = pool_of(&["crane", "plant", "slant", "grant"]);
        let mut rng = StdRng::seed_from_u64(3);

        let blind = scorer.score(&word("zzzzz"), &pool, &mut rng).unwrap();
        let sharp = scorer.score(&word("plant"), &pool, &mut rng).unwrap();

        assert!((blind.primary - 1.0).abs() < 1e-9);
        assert!((sharp.primary - 4.0).abs() < 1e-9);
        assert!(blind.secondary.abs() < f64::EPSILON);
        assert!(sharp.primary > blind.primary);
    }

    #[test]
    fn variance_shrinks_with_more_samples() {
        // `primary × samples` estimates |pool| / E[surviving mass] at every
        // sample size, so its spread is comparable across sizes.
        fn spread(samples: usize) -> f64 {
            let scorer = SampledScorer::new(samples, 0.8, 128, 1.0);
            let pool = pool_of(&SPREAD);
            let guess = word("crane");
            let estimates: Vec<f64> = (0..200)
                .map(|seed| {
                    let mut rng = StdRng::seed_from_u64(seed);
                    scorer.score(&guess, &pool, &mut rng).unwrap().primary * samples as f64
                })
                .collect();
            let mean = estimates.iter().sum::<f64>() / estimates.len() as f64;
            estimates.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / estimates.len() as f64
        }

        let few = spread(2);
        let many = spread(30);
        assert!(few > 0.0);
        assert!(many < few, "variance with 30 samples {many} >= with 2 samples {few}");
    }

    #[test]
    fn sample_count_is_capped_by_pool_size() {
        // Two candidates, 32 requested samples: only two draws happen, so
        // at most 2 × 5 greens per 2 candidates.
        let pool = pool_of(&["crane", "plant"]);
        let record = SampledScorer::default()
            .score(&word("crane"), &pool, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert!(record.secondary <= 5.0);
    }

    #[test]
    fn shortcut_on_high_confidence() {
        let pool = CandidatePool::weighted([
            (word("crane"), 0.9),
            (word("plant"), 0.05),
            (word("slant"), 0.05),
        ]);
        assert_eq!(SampledScorer::default().shortcut(&pool), Some(word("crane")));
    }

    #[test]
    fn shortcut_on_two_candidates() {
        let pool = CandidatePool::weighted([(word("plant"), 0.4), (word("slant"), 0.6)]);
        assert_eq!(SampledScorer::default().shortcut(&pool), Some(word("slant")));
    }

    #[test]
    fn no_shortcut_when_uncertain() {
        let pool = pool_of(&["crane", "plant", "slant"]);
        assert_eq!(SampledScorer::default().shortcut(&pool), None);
    }

    #[test]
    fn small_pools_are_not_resampled() {
        let pool = pool_of(&SPREAD);
        let prepared = SampledScorer::default()
            .prepare_pool(&pool, &mut StdRng::seed_from_u64(0))
            .unwrap();
        assert!(matches!(prepared, Cow::Borrowed(_)));
    }

    #[test]
    fn large_pools_are_clipped_and_renormalized() {
        let pool = synthetic_pool(300);
        let scorer = SampledScorer::new(32, 0.8, 16, 1.0);
        let prepared = scorer
            .prepare_pool(&pool, &mut StdRng::seed_from_u64(5))
            .unwrap();

        assert!(!prepared.is_empty());
        assert!(prepared.len() <= 16);
        assert!((prepared.total_weight() - 1.0).abs() < 1e-9);
        assert!(prepared.words().iter().all(|w| pool.contains(w)));
    }

    #[test]
    fn empty_pool_is_an_error() {
        let result = SampledScorer::default().score(
            &word("crane"),
            &CandidatePool::default(),
            &mut StdRng::seed_from_u64(0),
        );
        assert_eq!(result, Err(SolverError::EmptyPool));
    }
}
